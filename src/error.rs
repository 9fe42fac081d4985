//! Error types for tridata.
//!
//! Decoding failures are reported in two layers: [`DecodeError`] describes
//! what went wrong inside one section of one file, and [`TriangleError`]
//! adds which file it happened in, plus the failures that only exist at the
//! dataset or file-system level.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::io::FileKind;
use crate::mesh::IndexBase;

/// Result type alias using [`TriangleError`].
pub type Result<T> = std::result::Result<T, TriangleError>;

/// The record kind a decoder was working on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Vertex records (`.node`, or the head of a `.poly`).
    Vertices,
    /// Element (triangle) records.
    Elements,
    /// Segment records of a `.poly`.
    Segments,
    /// Hole records of a `.poly`.
    Holes,
    /// Regional attribute records of a `.poly`.
    Regions,
    /// Maximum-area records.
    AreaConstraints,
    /// Finite edge and ray records.
    Edges,
    /// Triangle neighbor records.
    Neighbors,
}

impl Section {
    /// Human-readable section name.
    pub fn name(self) -> &'static str {
        match self {
            Section::Vertices => "vertex",
            Section::Elements => "element",
            Section::Segments => "segment",
            Section::Holes => "hole",
            Section::Regions => "region",
            Section::AreaConstraints => "area constraint",
            Section::Edges => "edge",
            Section::Neighbors => "neighbor",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while decoding a single file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A header token is not a non-negative integer.
    #[error("{section} header: {token:?} is not a non-negative integer")]
    MalformedHeader {
        /// Section whose header was being read.
        section: Section,
        /// The offending token.
        token: String,
    },

    /// Fewer tokens remain than the section requires.
    #[error("{section} section needs {expected} tokens, but only {found} remain")]
    TokenCountMismatch {
        /// Section being decoded.
        section: Section,
        /// Tokens required.
        expected: usize,
        /// Tokens available.
        found: usize,
    },

    /// A line-oriented section holds fewer records than its header declares.
    #[error("{section} header declares {expected} records, but only {found} were found")]
    RecordCountMismatch {
        /// Section being decoded.
        section: Section,
        /// Records declared.
        expected: usize,
        /// Records found.
        found: usize,
    },

    /// Tokens remain after the last section of a file.
    #[error("{count} unexpected tokens after the {section} section")]
    TrailingTokens {
        /// Last section that was decoded.
        section: Section,
        /// Number of leftover tokens.
        count: usize,
    },

    /// The first vertex record's index is neither `0` nor `1`.
    #[error("cannot infer index base: first vertex index is {token:?}, expected 0 or 1")]
    AmbiguousIndexBase {
        /// The leading index token of the first vertex record.
        token: String,
    },

    /// An edge file line has neither the finite-edge nor the ray shape.
    #[error(
        "edge file line {line} has {fields} fields, expected {edge_fields} (edge) or {ray_fields} (ray)"
    )]
    UnclassifiedEdgeLine {
        /// 1-based line number in the edge file.
        line: usize,
        /// Number of fields on the line.
        fields: usize,
        /// Field count of a finite edge.
        edge_fields: usize,
        /// Field count of a ray.
        ray_fields: usize,
    },

    /// The region tokens do not split into 4-field records.
    #[error("{count} region records do not match the {tokens} remaining tokens (4 fields per record)")]
    RegionFieldCountAmbiguity {
        /// Declared region count.
        count: usize,
        /// Tokens remaining for the region section.
        tokens: usize,
    },

    /// A data field cannot be parsed as its declared numeric kind.
    #[error("{section} record {record}, field {field}: cannot parse {token:?}")]
    MalformedField {
        /// Section being decoded.
        section: Section,
        /// 0-based record position.
        record: usize,
        /// 0-based field position within the record.
        field: usize,
        /// The offending token.
        token: String,
    },

    /// Only planar vertices are supported.
    #[error("unsupported vertex dimension {dimension}, only 2 is supported")]
    UnsupportedDimension {
        /// Declared dimension.
        dimension: usize,
    },
}

/// Errors that can occur while loading a mesh dataset.
#[derive(Error, Debug)]
pub enum TriangleError {
    /// A file failed to decode.
    #[error("invalid {file} file: {source}")]
    Decode {
        /// The file being decoded.
        file: FileKind,
        /// What went wrong.
        #[source]
        source: DecodeError,
    },

    /// The node and poly files disagree on the index base.
    #[error("node file is {node}-based but poly file is {poly}-based")]
    ConflictingIndexBase {
        /// Base inferred from the node file.
        node: IndexBase,
        /// Base inferred from the poly file.
        poly: IndexBase,
    },

    /// A mesh file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No file with any known extension exists for the dataset.
    #[error("no mesh files named {name:?} found in {directory}")]
    NotFound {
        /// Directory that was searched.
        directory: PathBuf,
        /// Base name of the dataset.
        name: String,
    },
}

impl TriangleError {
    /// Attach the file kind to a section-level error.
    pub fn decode(file: FileKind, source: DecodeError) -> Self {
        TriangleError::Decode { file, source }
    }

    /// The section-level error, if this is a decode failure.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            TriangleError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
