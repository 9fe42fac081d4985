//! Planar straight-line graph decoding (`.poly` files).
//!
//! A `.poly` file chains several sections on one token stream:
//!
//! 1. a vertex section, identical to a `.node` file (often empty when the
//!    vertices live in a separate `.node` file),
//! 2. segments: `count marker_count`, then `index v0 v1 [markers...]`,
//! 3. holes: `count`, then `index x y`,
//! 4. optionally, regions: `count`, then `index x y attribute`.
//!
//! The sections must be read in that order. [`decode_poly`] runs the whole
//! pipeline; the loader splits it into [`decode_vertices`](super::node::decode_vertices)
//! and [`decode_boundary`] so the index base is known before elements are
//! read.

use nalgebra::{DMatrix, Point2};

use super::node::{decode_vertices, VertexSection};
use super::tokenizer::TokenCursor;
use crate::error::{DecodeError, Section};
use crate::mesh::{normalize_index, IndexBase, Region};

/// Fields per region record.
pub const REGION_FIELDS: usize = 4;

/// Decoded segment records.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSection {
    /// Segment endpoints, 0-based when a base is known.
    pub segments: Vec<[i32; 2]>,
    /// Per-segment boundary markers, if the header declares any.
    pub markers: Option<DMatrix<i32>>,
}

/// Everything after the vertex section of a `.poly` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundarySection {
    /// Segments, if any were declared.
    pub segments: Option<SegmentSection>,
    /// Hole points, if any were declared.
    pub holes: Option<Vec<Point2<f64>>>,
    /// Regional attributes, if present.
    pub regions: Option<Vec<Region>>,
}

/// A fully decoded `.poly` file.
#[derive(Debug, Clone, PartialEq)]
pub struct PolySection {
    /// The leading vertex section.
    pub vertices: Option<VertexSection>,
    /// Segments, holes and regions.
    pub boundary: BoundarySection,
}

/// Decode a segment section, normalizing endpoints with `base`.
pub fn decode_segments(
    cursor: &mut TokenCursor<'_>,
    base: Option<IndexBase>,
) -> Result<Option<SegmentSection>, DecodeError> {
    let [count, marker_count] = cursor.take_header::<2>(Section::Segments)?;
    if count == 0 {
        return Ok(None);
    }

    let width = cursor.record_width(Section::Segments, &[3, marker_count])?;
    let records = cursor.take_records(Section::Segments, count, width)?;

    let endpoints: Vec<i32> = records.parse_fields(1..3)?;
    let segments = endpoints
        .chunks_exact(2)
        .map(|e| [normalize_index(base, e[0]), normalize_index(base, e[1])])
        .collect();
    let markers = records.optional_matrix(3..width)?;

    tracing::debug!(count, width, "decoded segment section");

    Ok(Some(SegmentSection { segments, markers }))
}

/// Decode a hole section. Hole points are coordinates, so nothing is
/// index-shifted.
pub fn decode_holes(cursor: &mut TokenCursor<'_>) -> Result<Option<Vec<Point2<f64>>>, DecodeError> {
    let [count] = cursor.take_header::<1>(Section::Holes)?;
    if count == 0 {
        return Ok(None);
    }

    let records = cursor.take_records(Section::Holes, count, 3)?;
    let coords: Vec<f64> = records.parse_fields(1..3)?;

    tracing::debug!(count, "decoded hole section");

    Ok(Some(
        coords
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect(),
    ))
}

/// Decode a region section.
///
/// Regions are the last section of a file, so every remaining token belongs
/// to them. Records are read as `index x y attribute`; when the remaining
/// tokens do not amount to exactly `count` such records the layout is
/// ambiguous and decoding fails instead of guessing.
///
/// With `allow_trailing`, tokens past the `count` records are left on the
/// cursor instead, and only too few tokens is an error.
pub fn decode_regions(
    cursor: &mut TokenCursor<'_>,
    allow_trailing: bool,
) -> Result<Option<Vec<Region>>, DecodeError> {
    let [count] = cursor.take_header::<1>(Section::Regions)?;
    if count == 0 {
        return Ok(None);
    }

    let tokens = cursor.remaining();
    let needed = count.saturating_mul(REGION_FIELDS);
    if tokens < needed || (tokens > needed && !allow_trailing) {
        return Err(DecodeError::RegionFieldCountAmbiguity { count, tokens });
    }

    let records = cursor.take_records(Section::Regions, count, REGION_FIELDS)?;
    let mut regions = Vec::with_capacity(count);
    for record in 0..records.len() {
        let x = records.parse(record, 1)?;
        let y = records.parse(record, 2)?;
        let attribute = records.parse(record, 3)?;
        regions.push(Region::new(Point2::new(x, y), attribute));
    }

    tracing::debug!(count, "decoded region section");

    Ok(Some(regions))
}

/// Decode segments, holes and, if any tokens remain, regions.
///
/// `allow_trailing` is passed on to [`decode_regions`].
pub fn decode_boundary(
    cursor: &mut TokenCursor<'_>,
    base: Option<IndexBase>,
    allow_trailing: bool,
) -> Result<BoundarySection, DecodeError> {
    let segments = decode_segments(cursor, base)?;
    let holes = decode_holes(cursor)?;
    let regions = if cursor.is_empty() {
        None
    } else {
        decode_regions(cursor, allow_trailing)?
    };

    Ok(BoundarySection {
        segments,
        holes,
        regions,
    })
}

/// Decode a complete `.poly` token stream.
///
/// Segment endpoints are normalized with the base inferred from the file's
/// own vertex section, falling back to `base` when that section is empty.
pub fn decode_poly(
    cursor: &mut TokenCursor<'_>,
    base: Option<IndexBase>,
) -> Result<PolySection, DecodeError> {
    let vertices = decode_vertices(cursor)?;
    let base = vertices.as_ref().map(|v| v.index_base).or(base);
    let boundary = decode_boundary(cursor, base, false)?;
    Ok(PolySection { vertices, boundary })
}
