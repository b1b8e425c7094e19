//! Plain-text point and edge-list files.
//!
//! Point files hold one `(x,y)` point per line. Edge-list files hold one edge
//! per line: the two endpoint points followed by the edge weight with four
//! decimal places, separated by single spaces:
//!
//! ```text
//! (0,0) (10,0) 10.0000
//! (0,0) (20,0) 20.0000
//! ```
//!
//! Each edge line starts with the endpoint that comes first in x-sorted
//! vertex order, which is not necessarily the vertex whose search found it.
//!
//! Readers skip blank lines. Every other line must parse, so a comment or
//! header line is reported as a parse error.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::core::knn_graph::KnnGraph;
use crate::geometry::point::{Point, PointParseError};

/// Decimal places used for edge weights in edge-list files.
pub const EDGE_WEIGHT_PRECISION: usize = 4;

/// Errors that can occur while reading or writing point and edge files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PointIoError {
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A point on the given line could not be parsed.
    #[error("Line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The point parse failure.
        #[source]
        source: PointParseError,
    },
    /// An edge-list line did not have the `p q weight` shape.
    #[error("Line {line}: malformed edge: {message}")]
    MalformedEdge {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

/// Yields `(line_number, trimmed_text)` for every line holding data.
fn data_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), PointIoError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Ok((index + 1, trimmed.to_string())))
                }
            }
            Err(err) => Some(Err(PointIoError::from(err))),
        })
}

fn parse_point_at(line: usize, text: &str) -> Result<Point, PointIoError> {
    text.parse()
        .map_err(|source| PointIoError::Parse { line, source })
}

/// Reads one point per line.
///
/// # Errors
///
/// [`PointIoError::Io`] if reading fails, [`PointIoError::Parse`] on the first
/// malformed line.
///
/// # Examples
///
/// ```rust
/// use knn_graph::geometry::point::Point;
/// use knn_graph::io::read_points;
///
/// let text = "(1,2)\n\n( 3 , 4 )\n";
/// let points = read_points(text.as_bytes()).unwrap();
/// assert_eq!(points, vec![Point::new(1, 2), Point::new(3, 4)]);
///
/// // Anything but a point or a blank line is rejected.
/// assert!(read_points("(1,2)\n# comment\n".as_bytes()).is_err());
/// ```
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point>, PointIoError> {
    data_lines(reader)
        .map(|entry| {
            let (line, text) = entry?;
            parse_point_at(line, &text)
        })
        .collect()
}

/// Writes one `(x,y)` point per line.
///
/// # Errors
///
/// [`PointIoError::Io`] if writing fails.
pub fn write_points<W: Write>(points: &[Point], mut writer: W) -> Result<(), PointIoError> {
    for point in points {
        writeln!(writer, "{point}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the edges of `graph` in commit order, one per line.
///
/// # Errors
///
/// [`PointIoError::Io`] if writing fails.
///
/// # Examples
///
/// ```rust
/// use knn_graph::prelude::*;
/// use knn_graph::io::write_edges;
///
/// let graph = build_knn_graph(&[Point::new(0, 0), Point::new(1, 1)], 1).unwrap();
/// let mut out = Vec::new();
/// write_edges(&graph, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "(0,0) (1,1) 1.4142\n");
/// ```
pub fn write_edges<W: Write>(graph: &KnnGraph, mut writer: W) -> Result<(), PointIoError> {
    for (a, b, weight) in graph.edge_points() {
        writeln!(
            writer,
            "{a} {b} {weight:.precision$}",
            precision = EDGE_WEIGHT_PRECISION
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads an edge list written by [`write_edges`].
///
/// # Errors
///
/// [`PointIoError::Io`] if reading fails, [`PointIoError::Parse`] for an
/// invalid endpoint, [`PointIoError::MalformedEdge`] for a wrong field count or
/// an invalid weight.
pub fn read_edges<R: BufRead>(reader: R) -> Result<Vec<(Point, Point, f64)>, PointIoError> {
    data_lines(reader)
        .map(|entry| {
            let (line, text) = entry?;
            let fields: Vec<&str> = text.split_whitespace().collect();
            let [a, b, weight] = fields.as_slice() else {
                return Err(PointIoError::MalformedEdge {
                    line,
                    message: format!("{} fields found, 3 expected", fields.len()),
                });
            };
            let weight: f64 = weight.parse().map_err(|err| PointIoError::MalformedEdge {
                line,
                message: format!("invalid weight {weight:?}: {err}"),
            })?;
            Ok((parse_point_at(line, a)?, parse_point_at(line, b)?, weight))
        })
        .collect()
}
