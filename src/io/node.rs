//! Vertex section decoding (`.node` files and the head of `.poly` files).
//!
//! Header: `count dimension attribute_count marker_count`, followed by
//! `count` records of `index x y [attributes...] [markers...]`.
//!
//! The first record's leading index also decides the [`IndexBase`] of the
//! whole file family.

use nalgebra::{DMatrix, Point2};

use super::tokenizer::TokenCursor;
use crate::error::{DecodeError, Section};
use crate::mesh::IndexBase;

/// Decoded vertex records.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSection {
    /// Vertex coordinates.
    pub vertices: Vec<Point2<f64>>,
    /// Per-vertex attributes, if the header declares any.
    pub attributes: Option<DMatrix<f64>>,
    /// Per-vertex boundary markers, if the header declares any.
    pub markers: Option<DMatrix<i32>>,
    /// Numbering convention inferred from the first record.
    pub index_base: IndexBase,
}

/// Decode a vertex section.
///
/// Returns `None` when the header declares zero vertices; the cursor is then
/// left just past the header.
pub fn decode_vertices(cursor: &mut TokenCursor<'_>) -> Result<Option<VertexSection>, DecodeError> {
    let [count, dimension, attr_count, marker_count] =
        cursor.take_header::<4>(Section::Vertices)?;
    if count == 0 {
        return Ok(None);
    }
    if dimension != 2 {
        return Err(DecodeError::UnsupportedDimension { dimension });
    }

    let width = cursor.record_width(Section::Vertices, &[1, dimension, attr_count, marker_count])?;
    let records = cursor.take_records(Section::Vertices, count, width)?;

    let leading = records.row(0)[0];
    let index_base =
        IndexBase::from_leading_index(leading).ok_or_else(|| DecodeError::AmbiguousIndexBase {
            token: leading.to_string(),
        })?;

    let coords: Vec<f64> = records.parse_fields(1..3)?;
    let vertices = coords
        .chunks_exact(2)
        .map(|xy| Point2::new(xy[0], xy[1]))
        .collect();

    let attr_start = 1 + dimension;
    let marker_start = attr_start + attr_count;
    let attributes = records.optional_matrix(attr_start..marker_start)?;
    let markers = records.optional_matrix(marker_start..marker_start + marker_count)?;

    tracing::debug!(count, width, base = %index_base, "decoded vertex section");

    Ok(Some(VertexSection {
        vertices,
        attributes,
        markers,
        index_base,
    }))
}
