//! Comment stripping, tokenization and header-driven record consumption.
//!
//! Every Triangle file is a stream of whitespace-separated tokens, with `#`
//! starting a comment that runs to the end of the line. Section decoders
//! walk the stream with a [`TokenCursor`]: read a few header integers, work
//! out the record width, then take `count × width` tokens as a
//! [`Records`] table.

use std::ops::Range;
use std::str::FromStr;

use nalgebra::{DMatrix, Scalar};

use crate::error::{DecodeError, Section};

/// Default comment marker.
pub const COMMENT_MARKER: char = '#';

/// Remove the comment span (marker to end of line) from one line.
#[inline]
pub fn strip_comment(line: &str, marker: char) -> &str {
    match line.find(marker) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Split text into tokens with comments removed.
///
/// Line breaks act as token separators, so a comment never swallows the
/// content of the following line.
pub fn tokenize(text: &str, marker: char) -> Vec<&str> {
    text.lines()
        .flat_map(|line| strip_comment(line, marker).split_whitespace())
        .collect()
}

/// A non-blank line of a file, split into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Tokens on the line, comments removed.
    pub tokens: Vec<&'a str>,
}

/// Split text into lines of tokens, dropping lines left blank after comment
/// removal.
pub fn tokenize_lines(text: &str, marker: char) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let tokens: Vec<&str> = strip_comment(line, marker).split_whitespace().collect();
            (!tokens.is_empty()).then_some(Line {
                number: i + 1,
                tokens,
            })
        })
        .collect()
}

/// Parse one token as a header integer.
pub(crate) fn parse_header_value(section: Section, token: &str) -> Result<usize, DecodeError> {
    token.parse::<usize>().map_err(|_| DecodeError::MalformedHeader {
        section,
        token: token.to_string(),
    })
}

/// Sum the field counts of a record, failing if a header declares more
/// fields than can be addressed.
pub(crate) fn record_width(section: Section, fields: &[usize], available: usize) -> Result<usize, DecodeError> {
    fields
        .iter()
        .try_fold(0usize, |width, &n| width.checked_add(n))
        .ok_or(DecodeError::TokenCountMismatch {
            section,
            expected: usize::MAX,
            found: available,
        })
}

/// A left-to-right cursor over a token sequence.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [&'a str],
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor at the start of `tokens`.
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self { tokens }
    }

    /// Number of tokens not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether every token has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The unconsumed tokens.
    #[inline]
    pub fn rest(&self) -> &'a [&'a str] {
        self.tokens
    }

    /// Width of a record made of the given field groups.
    pub fn record_width(&self, section: Section, fields: &[usize]) -> Result<usize, DecodeError> {
        record_width(section, fields, self.tokens.len())
    }

    /// Consume `N` header tokens as non-negative integers.
    pub fn take_header<const N: usize>(
        &mut self,
        section: Section,
    ) -> Result<[usize; N], DecodeError> {
        if self.tokens.len() < N {
            return Err(DecodeError::TokenCountMismatch {
                section,
                expected: N,
                found: self.tokens.len(),
            });
        }

        let (head, rest) = self.tokens.split_at(N);
        let mut values = [0usize; N];
        for (value, token) in values.iter_mut().zip(head) {
            *value = parse_header_value(section, token)?;
        }

        self.tokens = rest;
        Ok(values)
    }

    /// Consume exactly `count × width` tokens as a record table.
    pub fn take_records(
        &mut self,
        section: Section,
        count: usize,
        width: usize,
    ) -> Result<Records<'a>, DecodeError> {
        debug_assert!(width > 0, "record width must be positive");

        let expected = count.saturating_mul(width);
        if self.tokens.len() < expected {
            return Err(DecodeError::TokenCountMismatch {
                section,
                expected,
                found: self.tokens.len(),
            });
        }

        let (head, rest) = self.tokens.split_at(expected);
        self.tokens = rest;
        Ok(Records {
            section,
            tokens: head,
            width,
        })
    }

    /// Consume every remaining token.
    pub fn take_rest(&mut self) -> &'a [&'a str] {
        std::mem::take(&mut self.tokens)
    }

    /// Fail if tokens remain after the last section of a file.
    pub fn finish(&self, section: Section) -> Result<(), DecodeError> {
        if self.tokens.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingTokens {
                section,
                count: self.tokens.len(),
            })
        }
    }
}

/// A block of fixed-width records taken from a [`TokenCursor`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    section: Section,
    tokens: &'a [&'a str],
    width: usize,
}

impl<'a> Records<'a> {
    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len() / self.width
    }

    /// Check whether the table holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The fields of one record.
    #[inline]
    pub fn row(&self, record: usize) -> &'a [&'a str] {
        &self.tokens[record * self.width..(record + 1) * self.width]
    }

    /// Parse one field.
    pub fn parse<T: FromStr>(&self, record: usize, field: usize) -> Result<T, DecodeError> {
        let token = self.row(record)[field];
        token.parse::<T>().map_err(|_| DecodeError::MalformedField {
            section: self.section,
            record,
            field,
            token: token.to_string(),
        })
    }

    /// Parse a range of fields of every record, row-major.
    pub fn parse_fields<T: FromStr>(&self, fields: Range<usize>) -> Result<Vec<T>, DecodeError> {
        let mut values = Vec::with_capacity(self.len() * fields.len());
        for record in 0..self.len() {
            for field in fields.clone() {
                values.push(self.parse(record, field)?);
            }
        }
        Ok(values)
    }

    /// Parse a range of fields as a `len × fields.len()` matrix.
    pub fn matrix<T>(&self, fields: Range<usize>) -> Result<DMatrix<T>, DecodeError>
    where
        T: Scalar + FromStr,
    {
        let ncols = fields.len();
        let values = self.parse_fields(fields)?;
        Ok(DMatrix::from_row_slice(self.len(), ncols, &values))
    }

    /// Parse a range of fields as a matrix, or `None` if the range is empty.
    pub fn optional_matrix<T>(&self, fields: Range<usize>) -> Result<Option<DMatrix<T>>, DecodeError>
    where
        T: Scalar + FromStr,
    {
        if fields.is_empty() {
            Ok(None)
        } else {
            self.matrix(fields).map(Some)
        }
    }
}
