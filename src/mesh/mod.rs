//! Decoded mesh data structures.
//!
//! The primary type is [`MeshData`], the typed result of decoding a family
//! of Triangle files. Every array it holds is optional, and all index-valued
//! arrays are 0-based once an [`IndexBase`] has been inferred.
//!
//! ```
//! use tridata::mesh::{IndexBase, MeshData};
//!
//! let data = MeshData::new();
//! assert!(data.keys().is_empty());
//! assert_eq!(IndexBase::One.normalize(3), 2);
//! ```

mod data;
mod index;

pub use data::{MeshData, Region};
pub use index::{is_sentinel, normalize_index, normalize_indices, IndexBase};
