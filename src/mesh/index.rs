//! Index base detection and normalization.
//!
//! Triangle files may number their entities from 0 or from 1. The convention
//! is decided once per dataset from the first vertex record, and every
//! index-valued field (triangle corners, segment and edge endpoints, ray
//! origins, neighbors) is rewritten to 0-based on decode.
//!
//! Negative values are sentinels ("no neighbor", "no endpoint") and are
//! never shifted.

use std::fmt;

/// Numbering convention of a file family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexBase {
    /// The first entity is numbered 0.
    Zero,
    /// The first entity is numbered 1.
    One,
}

impl IndexBase {
    /// Infer the base from the leading index of the first vertex record.
    ///
    /// Only the literal tokens `0` and `1` are accepted.
    pub fn from_leading_index(token: &str) -> Option<IndexBase> {
        match token {
            "0" => Some(IndexBase::Zero),
            "1" => Some(IndexBase::One),
            _ => None,
        }
    }

    /// Amount subtracted from every non-sentinel index.
    #[inline]
    pub fn offset(self) -> i32 {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Rewrite one index to 0-based, leaving sentinels untouched.
    #[inline]
    pub fn normalize(self, index: i32) -> i32 {
        if is_sentinel(index) {
            index
        } else {
            index - self.offset()
        }
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset())
    }
}

/// Check whether an index value is a non-referencing sentinel.
#[inline]
pub fn is_sentinel(index: i32) -> bool {
    index < 0
}

/// Normalize an index with an optional base.
///
/// With no base (no vertex section was loaded) indices are kept as written.
#[inline]
pub fn normalize_index(base: Option<IndexBase>, index: i32) -> i32 {
    match base {
        Some(base) => base.normalize(index),
        None => index,
    }
}

/// Normalize a slice of indices in place.
pub fn normalize_indices(base: Option<IndexBase>, indices: &mut [i32]) {
    if let Some(base) = base {
        for index in indices.iter_mut() {
            *index = base.normalize(*index);
        }
    }
}
