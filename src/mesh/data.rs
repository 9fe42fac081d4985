//! The decoded mesh dataset.
//!
//! [`MeshData`] collects everything decoded from one file family. Each output
//! array is an `Option`: a section that was absent, or declared zero records,
//! leaves its field as `None` rather than holding an empty array.

use nalgebra::{DMatrix, Point2, Vector2};

use super::index::IndexBase;

/// A regional attribute record from a `.poly` file.
///
/// Source records are `index x y attribute`; the decoded form carries a
/// zero-filled placeholder so that it lines up with the 4-field layout
/// `[x, y, 0, attribute]` expected by the triangulation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// A point inside the region.
    pub point: Point2<f64>,
    /// Regional attribute.
    pub attribute: f64,
}

impl Region {
    /// Create a region record.
    pub fn new(point: Point2<f64>, attribute: f64) -> Self {
        Self { point, attribute }
    }

    /// The 4-field layout `[x, y, 0, attribute]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.point.x, self.point.y, 0.0, self.attribute]
    }
}

/// A mesh dataset decoded from Triangle files.
///
/// All index-valued fields are 0-based when [`index_base`](Self::index_base)
/// is known. Negative sentinel values are kept as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Numbering convention of the source files, if any vertices were read.
    pub index_base: Option<IndexBase>,

    /// Vertex coordinates.
    pub vertices: Option<Vec<Point2<f64>>>,
    /// Per-vertex attributes (N × A).
    pub vertex_attributes: Option<DMatrix<f64>>,
    /// Per-vertex boundary markers (N × M).
    pub vertex_markers: Option<DMatrix<i32>>,

    /// Element corner indices (T × nodes per element).
    pub triangles: Option<DMatrix<i32>>,
    /// Per-element attributes (T × A).
    pub triangle_attributes: Option<DMatrix<f64>>,

    /// Segment endpoints.
    pub segments: Option<Vec<[i32; 2]>>,
    /// Per-segment boundary markers (S × M).
    pub segment_markers: Option<DMatrix<i32>>,

    /// Hole points.
    pub holes: Option<Vec<Point2<f64>>>,

    /// Maximum area per element.
    pub triangle_max_area: Option<Vec<f64>>,

    /// Finite edge endpoints.
    pub edges: Option<Vec<[i32; 2]>>,
    /// Per-edge boundary markers.
    pub edge_markers: Option<DMatrix<i32>>,
    /// Origin vertex of each ray.
    pub ray_origins: Option<Vec<i32>>,
    /// Direction of each ray.
    pub ray_directions: Option<Vec<Vector2<f64>>>,
    /// Per-ray boundary markers.
    pub ray_markers: Option<DMatrix<i32>>,

    /// Regional attribute records.
    pub regions: Option<Vec<Region>>,

    /// Neighboring element indices (T × neighbors per element).
    pub triangle_neighbors: Option<DMatrix<i32>>,
}

impl MeshData {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the fields that are present, in canonical order.
    pub fn keys(&self) -> Vec<&'static str> {
        let present = [
            ("vertices", self.vertices.is_some()),
            ("vertex_attributes", self.vertex_attributes.is_some()),
            ("vertex_markers", self.vertex_markers.is_some()),
            ("triangles", self.triangles.is_some()),
            ("triangle_attributes", self.triangle_attributes.is_some()),
            ("segments", self.segments.is_some()),
            ("segment_markers", self.segment_markers.is_some()),
            ("holes", self.holes.is_some()),
            ("triangle_max_area", self.triangle_max_area.is_some()),
            ("edges", self.edges.is_some()),
            ("edge_markers", self.edge_markers.is_some()),
            ("ray_origins", self.ray_origins.is_some()),
            ("ray_directions", self.ray_directions.is_some()),
            ("ray_markers", self.ray_markers.is_some()),
            ("regions", self.regions.is_some()),
            ("triangle_neighbors", self.triangle_neighbors.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(key, is_present)| is_present.then_some(key))
            .collect()
    }

    /// Check whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Check whether nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Number of vertices (0 if none were decoded).
    pub fn num_vertices(&self) -> usize {
        self.vertices.as_ref().map_or(0, Vec::len)
    }

    /// Number of elements (0 if none were decoded).
    pub fn num_triangles(&self) -> usize {
        self.triangles.as_ref().map_or(0, DMatrix::nrows)
    }

    /// Axis-aligned bounding box of the vertices.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let vertices = self.vertices.as_ref()?;
        let first = vertices.first()?;
        let (mut min, mut max) = (*first, *first);
        for v in vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Some((min, max))
    }
}
