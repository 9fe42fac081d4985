//! Triangle file decoding.
//!
//! A mesh dataset is spread over up to six ASCII files sharing a base name:
//!
//! | Kind | Extension | Contents |
//! |------|-----------|----------|
//! | [`FileKind::Node`] | `.node` | vertices, attributes, markers |
//! | [`FileKind::Ele`] | `.ele` | triangles, attributes |
//! | [`FileKind::Poly`] | `.poly` | vertices, segments, holes, regions |
//! | [`FileKind::Area`] | `.area` | maximum area per triangle |
//! | [`FileKind::Edge`] | `.edge` | edges and rays |
//! | [`FileKind::Neigh`] | `.neigh` | triangle neighbors |
//!
//! # Usage
//!
//! Load every file named `name.*` found in a directory:
//!
//! ```no_run
//! use tridata::io;
//!
//! let data = io::load("meshes", "A").unwrap();
//! println!("{} vertices", data.num_vertices());
//! ```
//!
//! Or decode text that is already in memory:
//!
//! ```
//! use tridata::io::{loads, FileKind, MeshSources};
//!
//! let sources = MeshSources::new().with(FileKind::Node, "1 2 0 0\n1 0.5 0.5\n");
//! let data = loads(&sources).unwrap();
//! assert_eq!(data.num_vertices(), 1);
//! ```

pub mod area;
pub mod edge;
pub mod ele;
pub mod loader;
pub mod neigh;
pub mod node;
pub mod poly;
pub mod tokenizer;

use std::fmt;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Result, TriangleError};
use crate::mesh::MeshData;

pub use loader::{loads, loads_with_options, MeshSources};

/// The six Triangle file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileKind {
    /// Vertex file.
    Node,
    /// Element file.
    Ele,
    /// Planar straight-line graph file.
    Poly,
    /// Area constraint file.
    Area,
    /// Edge file.
    Edge,
    /// Neighbor file.
    Neigh,
}

impl FileKind {
    /// All kinds, in loading order.
    pub const ALL: [FileKind; 6] = [
        FileKind::Node,
        FileKind::Ele,
        FileKind::Poly,
        FileKind::Area,
        FileKind::Edge,
        FileKind::Neigh,
    ];

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Node => "node",
            FileKind::Ele => "ele",
            FileKind::Poly => "poly",
            FileKind::Area => "area",
            FileKind::Edge => "edge",
            FileKind::Neigh => "neigh",
        }
    }

    /// Detect kind from a file extension.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_lowercase().as_str() {
            "node" => Some(FileKind::Node),
            "ele" => Some(FileKind::Ele),
            "poly" => Some(FileKind::Poly),
            "area" => Some(FileKind::Area),
            "edge" => Some(FileKind::Edge),
            "neigh" => Some(FileKind::Neigh),
            _ => None,
        }
    }

    /// Detect kind from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FileKind> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileKind::from_extension)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// What to do with edge file lines that are neither edges nor rays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeLinePolicy {
    /// Fail the load.
    #[default]
    Reject,
    /// Drop the line with a warning.
    Skip,
}

/// Options for decoding a dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Character that starts a comment running to the end of the line.
    pub comment_marker: char,

    /// Handling of unclassifiable edge file lines.
    pub unclassified_edges: EdgeLinePolicy,

    /// Whether tokens after the last section of a file are ignored instead
    /// of failing the load.
    pub allow_trailing_tokens: bool,

    /// Whether [`load_all`] decodes datasets in parallel.
    pub parallel: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            comment_marker: tokenizer::COMMENT_MARKER,
            unclassified_edges: EdgeLinePolicy::Reject,
            allow_trailing_tokens: false,
            parallel: true,
        }
    }
}

impl LoadOptions {
    /// Set the comment marker.
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Set the policy for unclassifiable edge file lines.
    pub fn with_unclassified_edges(mut self, policy: EdgeLinePolicy) -> Self {
        self.unclassified_edges = policy;
        self
    }

    /// Set whether trailing tokens are ignored.
    pub fn with_trailing_tokens(mut self, allow: bool) -> Self {
        self.allow_trailing_tokens = allow;
        self
    }

    /// Set whether [`load_all`] runs in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Read the text of every `<directory>/<name>.<ext>` that exists.
///
/// Fails with [`TriangleError::NotFound`] when none of the six files exist.
pub fn read_sources<P: AsRef<Path>>(directory: P, name: &str) -> Result<MeshSources> {
    let directory = directory.as_ref();
    let mut sources = MeshSources::new();

    for kind in FileKind::ALL {
        let path = directory.join(format!("{}.{}", name, kind.extension()));
        if !path.is_file() {
            tracing::trace!(path = %path.display(), "no such mesh file");
            continue;
        }

        let text = fs::read_to_string(&path).map_err(|source| TriangleError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read mesh file");
        sources.insert(kind, text);
    }

    if sources.is_empty() {
        return Err(TriangleError::NotFound {
            directory: directory.to_path_buf(),
            name: name.to_string(),
        });
    }
    Ok(sources)
}

/// Load the dataset `name` from `directory` with default options.
///
/// # Example
///
/// ```no_run
/// use tridata::io::load;
///
/// let data = load("meshes", "la").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(directory: P, name: &str) -> Result<MeshData> {
    load_with_options(directory, name, &LoadOptions::default())
}

/// Load the dataset `name` from `directory`.
pub fn load_with_options<P: AsRef<Path>>(
    directory: P,
    name: &str,
    options: &LoadOptions,
) -> Result<MeshData> {
    let sources = read_sources(directory, name)?;
    loads_with_options(&sources, options)
}

/// Load several datasets from one directory.
///
/// Results are returned in the order of `names`. Datasets share nothing, so
/// they are decoded in parallel unless [`LoadOptions::parallel`] is off.
pub fn load_all<P, S>(directory: P, names: &[S], options: &LoadOptions) -> Vec<Result<MeshData>>
where
    P: AsRef<Path>,
    S: AsRef<str> + Sync,
{
    let directory = directory.as_ref();
    if options.parallel {
        names
            .par_iter()
            .map(|name| load_with_options(directory, name.as_ref(), options))
            .collect()
    } else {
        names
            .iter()
            .map(|name| load_with_options(directory, name.as_ref(), options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use nalgebra::DMatrix;
    use std::path::PathBuf;

    fn write(dir: &Path, file: &str, text: &str) {
        fs::write(dir.join(file), text).unwrap();
    }

    #[test]
    fn test_file_kind_from_path() {
        assert_eq!(FileKind::from_path("mesh/A.node"), Some(FileKind::Node));
        assert_eq!(FileKind::from_path("A.NEIGH"), Some(FileKind::Neigh));
        assert_eq!(FileKind::from_path("A.obj"), None);
        assert_eq!(FileKind::from_path("A"), None);

        for kind in FileKind::ALL {
            assert_eq!(FileKind::from_extension(kind.extension()), Some(kind));
        }
        assert_eq!(FileKind::Ele.to_string(), ".ele");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tri.node", "3 2 0 1\n1 0 0 1\n2 1 0 1\n3 0 1 0\n");
        write(dir.path(), "tri.ele", "1 3 0\n1 1 2 3\n");
        write(dir.path(), "other.ele", "1 3 0\n1 3 2 1\n");

        let data = load(dir.path(), "tri").unwrap();
        assert_eq!(data.num_vertices(), 3);
        assert_eq!(data.triangles, Some(DMatrix::from_row_slice(1, 3, &[0, 1, 2])));
        assert_eq!(data.vertex_markers.map(|m| m.shape()), Some((3, 1)));
    }

    #[test]
    fn test_read_sources_only_picks_matching_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.node", "0 2 0 0\n");
        write(dir.path(), "a.edge", "0 0\n");
        write(dir.path(), "b.ele", "0 3 0\n");

        let sources = read_sources(dir.path(), "a").unwrap();
        assert_eq!(
            sources.kinds().collect::<Vec<_>>(),
            vec![FileKind::Node, FileKind::Edge]
        );
    }

    #[test]
    fn test_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path(), "missing").unwrap_err();
        match err {
            TriangleError::NotFound { directory, name } => {
                assert_eq!(directory, PathBuf::from(dir.path()));
                assert_eq!(name, "missing");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.node", "2 2 0 0\n0 0 0\n");

        let err = load(dir.path(), "bad").unwrap_err();
        assert!(matches!(err, TriangleError::Decode { file: FileKind::Node, .. }));
        assert!(matches!(
            err.decode_error(),
            Some(DecodeError::TokenCountMismatch { expected: 6, found: 3, .. })
        ));
        assert!(err.to_string().starts_with("invalid .node file"));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tri.ele", "1 3 0\n0 0 1 2\n");
        fs::write(dir.path().join("tri.node"), [0xff, 0xfe, 0x20, 0x32]).unwrap();

        let err = load(dir.path(), "tri").unwrap_err();
        assert!(err.decode_error().is_none());
        match err {
            TriangleError::Read { path, source } => {
                assert_eq!(path, dir.path().join("tri.node"));
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("expected Read, got {:?}", other),
        }
    }

    #[test]
    fn test_load_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "one.node", "1 2 0 0\n0 0 0\n");
        write(dir.path(), "two.node", "2 2 0 0\n0 0 0\n1 1 1\n");

        let names = ["two", "missing", "one"];
        for parallel in [true, false] {
            let options = LoadOptions::default().with_parallel(parallel);
            let results = load_all(dir.path(), &names, &options);

            assert_eq!(results.len(), 3);
            assert_eq!(results[0].as_ref().unwrap().num_vertices(), 2);
            assert!(matches!(results[1], Err(TriangleError::NotFound { .. })));
            assert_eq!(results[2].as_ref().unwrap().num_vertices(), 1);
        }
    }

    #[test]
    fn test_options_builder() {
        let options = LoadOptions::default()
            .with_comment_marker('%')
            .with_unclassified_edges(EdgeLinePolicy::Skip)
            .with_trailing_tokens(true)
            .with_parallel(false);

        assert_eq!(options.comment_marker, '%');
        assert_eq!(options.unclassified_edges, EdgeLinePolicy::Skip);
        assert!(options.allow_trailing_tokens);
        assert!(!options.parallel);

        let sources = MeshSources::new().with(FileKind::Node, "% comment\n1 2 0 0\n0 1 1\n");
        assert_eq!(loads_with_options(&sources, &options).unwrap().num_vertices(), 1);
    }
}
