//! # tridata
//!
//! Decoder for the ASCII file family of the Triangle mesh generator.
//!
//! Triangle describes a mesh with up to six files sharing a base name
//! (`.node`, `.ele`, `.poly`, `.area`, `.edge`, `.neigh`). tridata reads them
//! into a single typed [`MeshData`](mesh::MeshData), ready for plotting or
//! for feeding back into a triangulation engine.
//!
//! ## Features
//!
//! - **Header-driven records**: attribute and marker columns are sized from
//!   each section's header
//! - **Index normalization**: 0- and 1-based files decode to the same
//!   0-based indices; negative sentinels are preserved
//! - **Edges and rays**: `.edge` files from Voronoi output are split into
//!   finite edges and semi-infinite rays
//! - **Strict by default**: miscounted sections, ambiguous region layouts
//!   and unrecognized lines are errors, never silent truncation
//!
//! ## Quick Start
//!
//! ```no_run
//! use tridata::prelude::*;
//!
//! // Reads meshes/A.node, meshes/A.ele, ... whichever exist
//! let data = tridata::io::load("meshes", "A").unwrap();
//!
//! println!("Vertices: {}", data.num_vertices());
//! println!("Triangles: {}", data.num_triangles());
//! println!("Fields: {:?}", data.keys());
//! ```
//!
//! ## Decoding Text
//!
//! ```
//! use tridata::prelude::*;
//!
//! let sources = MeshSources::new()
//!     .with(FileKind::Node, "3 2 0 0\n1 0.0 0.0\n2 1.0 0.0\n3 0.0 1.0\n")
//!     .with(FileKind::Ele, "1 3 0\n1 1 2 3\n");
//!
//! let data = loads(&sources).unwrap();
//! assert_eq!(data.index_base, Some(IndexBase::One));
//!
//! // Corner indices are 0-based regardless of the source numbering
//! let triangles = data.triangles.unwrap();
//! assert_eq!(triangles.row(0).iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// ```
/// use tridata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{DecodeError, Result, Section, TriangleError};
    pub use crate::io::{loads, loads_with_options, EdgeLinePolicy, FileKind, LoadOptions, MeshSources};
    pub use crate::mesh::{IndexBase, MeshData, Region};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point2;

    #[test]
    fn test_unit_triangle() {
        let sources = MeshSources::new()
            .with(FileKind::Node, "3 2 0 0\n0 0.0 0.0\n1 1.0 0.0\n2 0.0 1.0\n")
            .with(FileKind::Ele, "1 3 0\n0 0 1 2\n");

        let data = loads(&sources).unwrap();

        assert_eq!(data.num_vertices(), 3);
        assert_eq!(data.num_triangles(), 1);
        assert_eq!(data.keys(), vec!["vertices", "triangles"]);

        // Every corner references an existing vertex
        let triangles = data.triangles.as_ref().unwrap();
        for &v in triangles.iter() {
            assert!((0..data.num_vertices() as i32).contains(&v));
        }

        let (min, max) = data.bounding_box().unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(1.0, 1.0));
    }
}
