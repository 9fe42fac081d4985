//! Assembling a [`MeshData`] from the text of several files.
//!
//! The loader tokenizes each available file and runs its decoders in a fixed
//! order:
//!
//! 1. vertex sections: the `.node` file, then the head of the `.poly` file,
//! 2. elements (`.ele`),
//! 3. the rest of the `.poly` pipeline: segments, holes, regions,
//! 4. area constraints (`.area`),
//! 5. edges and rays (`.edge`),
//! 6. neighbors (`.neigh`).
//!
//! Vertex sections come first because they decide the index base every
//! later decoder needs. Any failure aborts the whole load.

use std::collections::BTreeMap;

use super::tokenizer::{tokenize, tokenize_lines, TokenCursor};
use super::{area, edge, ele, neigh, node, poly, FileKind, LoadOptions};
use crate::error::{DecodeError, Result, Section, TriangleError};
use crate::mesh::{IndexBase, MeshData};

/// Raw text of the files making up one dataset.
///
/// ```
/// use tridata::io::{loads, FileKind, MeshSources};
///
/// let sources = MeshSources::new()
///     .with(FileKind::Node, "3 2 0 0\n0 0 0\n1 1 0\n2 0 1\n")
///     .with(FileKind::Ele, "1 3 0\n0 0 1 2\n");
///
/// let data = loads(&sources).unwrap();
/// assert_eq!(data.num_triangles(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshSources {
    texts: BTreeMap<FileKind, String>,
}

impl MeshSources {
    /// Create an empty set of sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the text of one file, replacing any previous text for that kind.
    pub fn insert(&mut self, kind: FileKind, text: impl Into<String>) -> Option<String> {
        self.texts.insert(kind, text.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, kind: FileKind, text: impl Into<String>) -> Self {
        self.insert(kind, text);
        self
    }

    /// The text of one file, if present.
    pub fn get(&self, kind: FileKind) -> Option<&str> {
        self.texts.get(&kind).map(String::as_str)
    }

    /// The kinds present, in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = FileKind> + '_ {
        self.texts.keys().copied()
    }

    /// Number of files present.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check whether no file is present.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Decode a dataset with default options.
pub fn loads(sources: &MeshSources) -> Result<MeshData> {
    loads_with_options(sources, &LoadOptions::default())
}

/// Decode a dataset.
pub fn loads_with_options(sources: &MeshSources, options: &LoadOptions) -> Result<MeshData> {
    let marker = options.comment_marker;
    let mut data = MeshData::new();

    let node_base = match sources.get(FileKind::Node) {
        Some(text) => {
            let section = decode_file(text, FileKind::Node, Section::Vertices, options, |cursor| {
                node::decode_vertices(cursor)
            })?;
            section.map(|section| {
                let base = section.index_base;
                set_vertices(&mut data, section);
                base
            })
        }
        None => None,
    };

    let poly_tokens = sources.get(FileKind::Poly).map(|text| tokenize(text, marker));
    let mut poly_cursor = poly_tokens.as_deref().map(|tokens| TokenCursor::new(tokens));

    let mut poly_base = None;
    if let Some(cursor) = poly_cursor.as_mut() {
        let section = node::decode_vertices(cursor).map_err(|e| TriangleError::decode(FileKind::Poly, e))?;
        if let Some(section) = section {
            if data.vertices.is_some() {
                tracing::debug!("poly file vertices replace node file vertices");
            }
            poly_base = Some(section.index_base);
            set_vertices(&mut data, section);
        }
    }

    let base = resolve_base(node_base, poly_base)?;
    data.index_base = base;

    if let Some(text) = sources.get(FileKind::Ele) {
        let section = decode_file(text, FileKind::Ele, Section::Elements, options, |cursor| {
            ele::decode_elements(cursor, base)
        })?;
        if let Some(section) = section {
            data.triangles = Some(section.triangles);
            data.triangle_attributes = section.attributes;
        }
    }

    if let Some(cursor) = poly_cursor.as_mut() {
        let boundary = poly::decode_boundary(cursor, base, options.allow_trailing_tokens)
            .and_then(|boundary| {
                finish(cursor, Section::Regions, options)?;
                Ok(boundary)
            })
            .map_err(|e| TriangleError::decode(FileKind::Poly, e))?;

        if let Some(segments) = boundary.segments {
            data.segments = Some(segments.segments);
            data.segment_markers = segments.markers;
        }
        data.holes = boundary.holes;
        data.regions = boundary.regions;
    }

    if let Some(text) = sources.get(FileKind::Area) {
        data.triangle_max_area = decode_file(
            text,
            FileKind::Area,
            Section::AreaConstraints,
            options,
            area::decode_areas,
        )?;
    }

    if let Some(text) = sources.get(FileKind::Edge) {
        let lines = tokenize_lines(text, marker);
        let section = edge::decode_edges(
            &lines,
            base,
            options.unclassified_edges,
            options.allow_trailing_tokens,
        )
        .map_err(|e| TriangleError::decode(FileKind::Edge, e))?;

        if let Some(section) = section {
            data.edges = section.edges;
            data.edge_markers = section.edge_markers;
            data.ray_origins = section.ray_origins;
            data.ray_directions = section.ray_directions;
            data.ray_markers = section.ray_markers;
        }
    }

    if let Some(text) = sources.get(FileKind::Neigh) {
        data.triangle_neighbors = decode_file(text, FileKind::Neigh, Section::Neighbors, options, |cursor| {
            neigh::decode_neighbors(cursor, base)
        })?;
    }

    Ok(data)
}

/// Tokenize a single-section file, decode it, and check nothing is left over.
fn decode_file<T>(
    text: &str,
    file: FileKind,
    last: Section,
    options: &LoadOptions,
    decode: impl FnOnce(&mut TokenCursor<'_>) -> std::result::Result<T, DecodeError>,
) -> Result<T> {
    let tokens = tokenize(text, options.comment_marker);
    let mut cursor = TokenCursor::new(&tokens);
    decode(&mut cursor)
        .and_then(|value| {
            finish(&cursor, last, options)?;
            Ok(value)
        })
        .map_err(|e| TriangleError::decode(file, e))
}

fn finish(cursor: &TokenCursor<'_>, last: Section, options: &LoadOptions) -> std::result::Result<(), DecodeError> {
    if options.allow_trailing_tokens {
        if !cursor.is_empty() {
            tracing::debug!(section = %last, count = cursor.remaining(), "ignoring trailing tokens");
        }
        Ok(())
    } else {
        cursor.finish(last)
    }
}

fn resolve_base(node: Option<IndexBase>, poly: Option<IndexBase>) -> Result<Option<IndexBase>> {
    match (node, poly) {
        (Some(node), Some(poly)) if node != poly => {
            Err(TriangleError::ConflictingIndexBase { node, poly })
        }
        (node, poly) => Ok(node.or(poly)),
    }
}

fn set_vertices(data: &mut MeshData, section: node::VertexSection) {
    data.vertices = Some(section.vertices);
    data.vertex_attributes = section.attributes;
    data.vertex_markers = section.markers;
}
