//! Edge and ray decoding (`.edge` files).
//!
//! Unlike the other formats, an edge file mixes two record shapes, so it is
//! read line by line rather than as one token stream. The header line is
//! `count marker_count`; each following line is either
//!
//! - a finite edge: `index v0 v1 [markers...]`, or
//! - a ray (Voronoi diagrams): `index origin -1 dx dy [markers...]`, where
//!   the third field is a sentinel and is not interpreted.
//!
//! Lines are told apart by their field count only.

use nalgebra::{DMatrix, Vector2};

use super::tokenizer::{record_width, Line, TokenCursor};
use super::EdgeLinePolicy;
use crate::error::{DecodeError, Section};
use crate::mesh::{normalize_index, IndexBase};

/// Fields of a finite edge record, excluding markers.
pub const EDGE_FIELDS: usize = 3;

/// Fields of a ray record, excluding markers.
pub const RAY_FIELDS: usize = 5;

/// One classified line of an edge file.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRecord {
    /// A finite edge between two vertices.
    Edge {
        /// Record index as written.
        index: i32,
        /// Endpoint vertex indices.
        endpoints: [i32; 2],
        /// Boundary markers.
        markers: Vec<i32>,
    },
    /// A semi-infinite edge.
    Ray {
        /// Record index as written.
        index: i32,
        /// Origin vertex index.
        origin: i32,
        /// Direction of the ray.
        direction: Vector2<f64>,
        /// Boundary markers.
        markers: Vec<i32>,
    },
    /// A line with neither shape.
    Unrecognized {
        /// 1-based line number.
        line: usize,
        /// Number of fields on the line.
        fields: usize,
    },
}

impl EdgeRecord {
    /// Classify and parse one line.
    ///
    /// `record` is the position of the line among the data lines, used for
    /// error reporting. Indices are returned as written.
    pub fn classify(line: &Line<'_>, record: usize, marker_count: usize) -> Result<EdgeRecord, DecodeError> {
        let fields = &line.tokens;
        let parse_int = |field: usize| parse_field::<i32>(fields, record, field);
        let has_width = |base: usize| base.checked_add(marker_count) == Some(fields.len());

        if has_width(EDGE_FIELDS) {
            Ok(EdgeRecord::Edge {
                index: parse_int(0)?,
                endpoints: [parse_int(1)?, parse_int(2)?],
                markers: (EDGE_FIELDS..fields.len())
                    .map(parse_int)
                    .collect::<Result<_, _>>()?,
            })
        } else if has_width(RAY_FIELDS) {
            let dx = parse_field::<f64>(fields, record, 3)?;
            let dy = parse_field::<f64>(fields, record, 4)?;
            Ok(EdgeRecord::Ray {
                index: parse_int(0)?,
                origin: parse_int(1)?,
                direction: Vector2::new(dx, dy),
                markers: (RAY_FIELDS..fields.len())
                    .map(parse_int)
                    .collect::<Result<_, _>>()?,
            })
        } else {
            Ok(EdgeRecord::Unrecognized {
                line: line.number,
                fields: fields.len(),
            })
        }
    }
}

fn parse_field<T: std::str::FromStr>(fields: &[&str], record: usize, field: usize) -> Result<T, DecodeError> {
    fields[field].parse().map_err(|_| DecodeError::MalformedField {
        section: Section::Edges,
        record,
        field,
        token: fields[field].to_string(),
    })
}

/// Decoded edge file contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSection {
    /// Finite edge endpoints, if any finite edges were present.
    pub edges: Option<Vec<[i32; 2]>>,
    /// Finite edge markers (edges × marker count).
    pub edge_markers: Option<DMatrix<i32>>,
    /// Ray origins, if any rays were present.
    pub ray_origins: Option<Vec<i32>>,
    /// Ray directions, parallel to `ray_origins`.
    pub ray_directions: Option<Vec<Vector2<f64>>>,
    /// Ray markers (rays × marker count).
    pub ray_markers: Option<DMatrix<i32>>,
}

/// Decode the lines of an edge file.
///
/// Endpoints and origins are normalized with `base`; directions never are.
/// Lines of neither shape are handled according to `policy`. The number of
/// classified records must match the header count; surplus lines are an
/// error unless `allow_trailing` is set.
pub fn decode_edges(
    lines: &[Line<'_>],
    base: Option<IndexBase>,
    policy: EdgeLinePolicy,
    allow_trailing: bool,
) -> Result<Option<EdgeSection>, DecodeError> {
    let Some((header, body)) = lines.split_first() else {
        return Err(DecodeError::TokenCountMismatch {
            section: Section::Edges,
            expected: 2,
            found: 0,
        });
    };

    let mut cursor = TokenCursor::new(&header.tokens);
    let [count, marker_count] = cursor.take_header::<2>(Section::Edges)?;
    cursor.finish(Section::Edges)?;

    let available: usize = body.iter().map(|line| line.tokens.len()).sum();
    let ray_fields = record_width(Section::Edges, &[RAY_FIELDS, marker_count], available)?;
    let edge_fields = EDGE_FIELDS + marker_count;

    let mut edges = Vec::new();
    let mut edge_markers = Vec::new();
    let mut ray_origins = Vec::new();
    let mut ray_directions = Vec::new();
    let mut ray_markers = Vec::new();

    let mut decoded = 0;
    let mut consumed = 0;
    for (record, line) in body.iter().enumerate() {
        if decoded == count {
            break;
        }
        consumed += 1;

        match EdgeRecord::classify(line, record, marker_count)? {
            EdgeRecord::Edge {
                endpoints, markers, ..
            } => {
                edges.push(endpoints.map(|v| normalize_index(base, v)));
                edge_markers.extend(markers);
            }
            EdgeRecord::Ray {
                origin,
                direction,
                markers,
                ..
            } => {
                ray_origins.push(normalize_index(base, origin));
                ray_directions.push(direction);
                ray_markers.extend(markers);
            }
            EdgeRecord::Unrecognized { line, fields } => match policy {
                EdgeLinePolicy::Reject => {
                    return Err(DecodeError::UnclassifiedEdgeLine {
                        line,
                        fields,
                        edge_fields,
                        ray_fields,
                    });
                }
                EdgeLinePolicy::Skip => {
                    tracing::warn!(line, fields, "skipping unclassified edge file line");
                    continue;
                }
            },
        }
        decoded += 1;
    }

    if decoded < count {
        return Err(DecodeError::RecordCountMismatch {
            section: Section::Edges,
            expected: count,
            found: decoded,
        });
    }

    let leftover: usize = body[consumed..].iter().map(|line| line.tokens.len()).sum();
    if leftover > 0 && !allow_trailing {
        return Err(DecodeError::TrailingTokens {
            section: Section::Edges,
            count: leftover,
        });
    }

    if count == 0 {
        return Ok(None);
    }

    tracing::debug!(
        count,
        edges = edges.len(),
        rays = ray_origins.len(),
        "decoded edge section"
    );

    let marker_matrix = |rows: usize, values: Vec<i32>| {
        (rows > 0 && marker_count > 0)
            .then(|| DMatrix::from_row_slice(rows, marker_count, &values))
    };
    let edge_count = edges.len();
    let ray_count = ray_origins.len();

    Ok(Some(EdgeSection {
        edge_markers: marker_matrix(edge_count, edge_markers),
        ray_markers: marker_matrix(ray_count, ray_markers),
        edges: (edge_count > 0).then_some(edges),
        ray_origins: (ray_count > 0).then_some(ray_origins),
        ray_directions: (ray_count > 0).then_some(ray_directions),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tokenizer::{tokenize_lines, COMMENT_MARKER};

    fn decode(
        text: &str,
        base: Option<IndexBase>,
        policy: EdgeLinePolicy,
    ) -> Result<Option<EdgeSection>, DecodeError> {
        let lines = tokenize_lines(text, COMMENT_MARKER);
        decode_edges(&lines, base, policy, false)
    }

    #[test]
    fn test_edges_and_rays_in_either_order() {
        for text in ["2 0\n0 0 1\n1 2 -1 0.5 -1.0\n", "2 0\n1 2 -1 0.5 -1.0\n0 0 1\n"] {
            let section = decode(text, Some(IndexBase::Zero), EdgeLinePolicy::Reject)
                .unwrap()
                .unwrap();
            assert_eq!(section.edges, Some(vec![[0, 1]]));
            assert_eq!(section.ray_origins, Some(vec![2]));
            assert_eq!(section.ray_directions, Some(vec![Vector2::new(0.5, -1.0)]));
            assert!(section.edge_markers.is_none());
        }
    }

    #[test]
    fn test_one_based_shift_skips_directions() {
        let text = "2 1\n1 1 2 5\n2 3 -1 1 2 0\n";
        let section = decode(text, Some(IndexBase::One), EdgeLinePolicy::Reject)
            .unwrap()
            .unwrap();

        assert_eq!(section.edges, Some(vec![[0, 1]]));
        assert_eq!(section.ray_origins, Some(vec![2]));
        assert_eq!(section.ray_directions, Some(vec![Vector2::new(1.0, 2.0)]));
        assert_eq!(section.edge_markers, Some(DMatrix::from_row_slice(1, 1, &[5])));
        assert_eq!(section.ray_markers, Some(DMatrix::from_row_slice(1, 1, &[0])));
    }

    #[test]
    fn test_only_finite_edges() {
        let section = decode("1 0\n0 0 1\n", None, EdgeLinePolicy::Reject)
            .unwrap()
            .unwrap();
        assert!(section.edges.is_some());
        assert!(section.ray_origins.is_none());
        assert!(section.ray_directions.is_none());
    }

    #[test]
    fn test_unclassified_line_rejected() {
        let err = decode("2 0\n0 0 1\n1 2 3 4\n", None, EdgeLinePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnclassifiedEdgeLine {
                line: 3,
                fields: 4,
                edge_fields: 3,
                ray_fields: 5,
            }
        );
    }

    #[test]
    fn test_unclassified_line_skipped() {
        let text = "2 0\n0 0 1\n1 2 3 4\n2 1 2\n";
        let section = decode(text, None, EdgeLinePolicy::Skip).unwrap().unwrap();
        assert_eq!(section.edges, Some(vec![[0, 1], [1, 2]]));
    }

    #[test]
    fn test_missing_records() {
        let err = decode("3 0\n0 0 1\n", None, EdgeLinePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            DecodeError::RecordCountMismatch {
                section: Section::Edges,
                expected: 3,
                found: 1,
            }
        );
    }

    #[test]
    fn test_trailing_lines() {
        let lines = tokenize_lines("1 0\n0 0 1\n1 1 2\n", COMMENT_MARKER);
        let err = decode_edges(&lines, None, EdgeLinePolicy::Reject, false).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TrailingTokens {
                section: Section::Edges,
                count: 3,
            }
        );

        let section = decode_edges(&lines, None, EdgeLinePolicy::Reject, true)
            .unwrap()
            .unwrap();
        assert_eq!(section.edges, Some(vec![[0, 1]]));
    }

    #[test]
    fn test_zero_count_and_empty_file() {
        assert!(decode("0 0\n", None, EdgeLinePolicy::Reject).unwrap().is_none());
        assert!(matches!(
            decode("# nothing\n", None, EdgeLinePolicy::Reject),
            Err(DecodeError::TokenCountMismatch { section: Section::Edges, .. })
        ));
    }

    #[test]
    fn test_oversized_marker_count() {
        let err = decode("1 18446744073709551615\n0 0 1\n", None, EdgeLinePolicy::Skip).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TokenCountMismatch {
                section: Section::Edges,
                expected: usize::MAX,
                found: 3,
            }
        );

        // No line can have that many fields
        let line = Line {
            number: 2,
            tokens: vec!["0", "0", "1"],
        };
        assert_eq!(
            EdgeRecord::classify(&line, 0, usize::MAX).unwrap(),
            EdgeRecord::Unrecognized { line: 2, fields: 3 }
        );
    }

    #[test]
    fn test_malformed_header_line() {
        let err = decode("2 0 9\n", None, EdgeLinePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TrailingTokens {
                section: Section::Edges,
                count: 1,
            }
        );
    }
}
