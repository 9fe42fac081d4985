//! Element section decoding (`.ele` files).
//!
//! Header: `count nodes_per_element attribute_count`, followed by `count`
//! records of `index v0 v1 v2 [extra nodes...] [attributes...]`.

use nalgebra::DMatrix;

use super::tokenizer::TokenCursor;
use crate::error::{DecodeError, Section};
use crate::mesh::{normalize_indices, IndexBase};

/// Decoded element records.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSection {
    /// Corner indices, one row per element, 0-based when a base is known.
    pub triangles: DMatrix<i32>,
    /// Per-element attributes, if the header declares any.
    pub attributes: Option<DMatrix<f64>>,
}

/// Decode an element section, normalizing corner indices with `base`.
pub fn decode_elements(
    cursor: &mut TokenCursor<'_>,
    base: Option<IndexBase>,
) -> Result<Option<ElementSection>, DecodeError> {
    let [count, nodes, attr_count] = cursor.take_header::<3>(Section::Elements)?;
    if count == 0 {
        return Ok(None);
    }

    let width = cursor.record_width(Section::Elements, &[1, nodes, attr_count])?;
    let records = cursor.take_records(Section::Elements, count, width)?;

    let mut triangles: DMatrix<i32> = records.matrix(1..1 + nodes)?;
    normalize_indices(base, triangles.as_mut_slice());
    let attributes = records.optional_matrix(1 + nodes..width)?;

    tracing::debug!(count, width, "decoded element section");

    Ok(Some(ElementSection {
        triangles,
        attributes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tokenizer::{tokenize, COMMENT_MARKER};

    fn decode(text: &str, base: Option<IndexBase>) -> Result<Option<ElementSection>, DecodeError> {
        let tokens = tokenize(text, COMMENT_MARKER);
        let mut cursor = TokenCursor::new(&tokens);
        decode_elements(&mut cursor, base)
    }

    #[test]
    fn test_single_triangle() {
        let section = decode("1 3 0\n0 0 1 2\n", Some(IndexBase::Zero))
            .unwrap()
            .unwrap();
        assert_eq!(section.triangles, DMatrix::from_row_slice(1, 3, &[0, 1, 2]));
        assert!(section.attributes.is_none());
    }

    #[test]
    fn test_one_based_corners_are_shifted() {
        let section = decode("2 3 0\n1 1 2 3\n2 2 4 3\n", Some(IndexBase::One))
            .unwrap()
            .unwrap();
        assert_eq!(
            section.triangles,
            DMatrix::from_row_slice(2, 3, &[0, 1, 2, 1, 3, 2])
        );
    }

    #[test]
    fn test_no_base_keeps_indices() {
        let section = decode("1 3 0\n1 1 2 3\n", None).unwrap().unwrap();
        assert_eq!(section.triangles, DMatrix::from_row_slice(1, 3, &[1, 2, 3]));
    }

    #[test]
    fn test_six_node_elements_with_attributes() {
        let text = "1 6 1\n0 0 1 2 3 4 5 0.25\n";
        let section = decode(text, Some(IndexBase::Zero)).unwrap().unwrap();
        assert_eq!(section.triangles.shape(), (1, 6));
        assert_eq!(section.triangles[(0, 5)], 5);

        let attributes = section.attributes.unwrap();
        assert_eq!(attributes.shape(), (1, 1));
        assert_eq!(attributes[(0, 0)], 0.25);
    }

    #[test]
    fn test_zero_count() {
        assert!(decode("0 3 0\n", Some(IndexBase::Zero)).unwrap().is_none());
    }

    #[test]
    fn test_oversized_attribute_count() {
        let err = decode("1 3 18446744073709551615\n0 0 1 2\n", None).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TokenCountMismatch {
                section: Section::Elements,
                expected: usize::MAX,
                found: 4,
            }
        );
    }

    #[test]
    fn test_non_integer_corner() {
        let err = decode("1 3 0\n0 0 1.5 2\n", None).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField { section: Section::Elements, record: 0, field: 2, .. }
        ));
    }
}
