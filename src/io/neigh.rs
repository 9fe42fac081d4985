//! Triangle neighbor decoding (`.neigh` files).
//!
//! Header: `count neighbors_per_element`, followed by `count` records of
//! `index n0 n1 n2`. A negative neighbor means the element has no neighbor
//! across that edge; such sentinels are never shifted.

use nalgebra::DMatrix;

use super::tokenizer::TokenCursor;
use crate::error::{DecodeError, Section};
use crate::mesh::{normalize_indices, IndexBase};

/// Decode a neighbor section, normalizing neighbor indices with `base`.
pub fn decode_neighbors(
    cursor: &mut TokenCursor<'_>,
    base: Option<IndexBase>,
) -> Result<Option<DMatrix<i32>>, DecodeError> {
    let [count, neighbors] = cursor.take_header::<2>(Section::Neighbors)?;
    if count == 0 {
        return Ok(None);
    }

    let width = cursor.record_width(Section::Neighbors, &[1, neighbors])?;
    let records = cursor.take_records(Section::Neighbors, count, width)?;
    let mut table: DMatrix<i32> = records.matrix(1..width)?;
    normalize_indices(base, table.as_mut_slice());

    tracing::debug!(count, width, "decoded neighbor section");

    Ok(Some(table))
}
