//! Area constraint decoding (`.area` files).
//!
//! Header: `count`, followed by `count` records of `index max_area`.
//! Constraints are stored in record order; the file is expected to list one
//! record per element, in element order.

use super::tokenizer::TokenCursor;
use crate::error::{DecodeError, Section};

/// Decode an area constraint section.
pub fn decode_areas(cursor: &mut TokenCursor<'_>) -> Result<Option<Vec<f64>>, DecodeError> {
    let [count] = cursor.take_header::<1>(Section::AreaConstraints)?;
    if count == 0 {
        return Ok(None);
    }

    let records = cursor.take_records(Section::AreaConstraints, count, 2)?;
    let areas = records.parse_fields(1..2)?;

    tracing::debug!(count, "decoded area constraint section");

    Ok(Some(areas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tokenizer::{tokenize, COMMENT_MARKER};

    fn decode(text: &str) -> Result<Option<Vec<f64>>, DecodeError> {
        let tokens = tokenize(text, COMMENT_MARKER);
        let mut cursor = TokenCursor::new(&tokens);
        decode_areas(&mut cursor)
    }

    #[test]
    fn test_areas() {
        let areas = decode("3\n1 0.5\n2 -1\n3 1e-2\n").unwrap().unwrap();
        assert_eq!(areas, vec![0.5, -1.0, 0.01]);
    }

    #[test]
    fn test_zero_count() {
        assert!(decode("0\n").unwrap().is_none());
    }

    #[test]
    fn test_missing_records() {
        let err = decode("2\n1 0.5\n").unwrap_err();
        assert_eq!(
            err,
            DecodeError::TokenCountMismatch {
                section: Section::AreaConstraints,
                expected: 4,
                found: 2,
            }
        );
    }
}
