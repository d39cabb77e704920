//! TSPLIB-style coordinate input.
//!
//! Only the coordinate section is read: header lines are skipped until a
//! line equal to `NODE_COORD_SECTION`, after which the input is a stream of
//! whitespace-separated `id x y` triples, ending at end of input or at an
//! `EOF` token. Triples may span or share lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, TspError};
use crate::model::{Instance, Point};

/// Marker line that starts the coordinate section.
pub const COORD_SECTION_MARKER: &str = "NODE_COORD_SECTION";

/// Token that ends the coordinate section.
pub const EOF_MARKER: &str = "EOF";

/// Parses points from a reader.
///
/// Input without the coordinate marker yields no points. A token that is
/// not a number, or a triple cut short by the end of input, is a
/// [`TspError::Parse`].
///
/// # Examples
///
/// ```
/// use u_tsp::io::tsplib::parse_points;
///
/// let text = "NAME : square\nTYPE : TSP\nNODE_COORD_SECTION\n1 0 0\n2 0 10\n3 10 10\n4 10 0\nEOF\n";
/// let points = parse_points(text.as_bytes()).unwrap();
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[2].id, 3);
/// ```
pub fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut in_section = false;
    let mut id: Option<u32> = None;
    let mut x: Option<f64> = None;
    let mut last_line = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        last_line = line_no;

        if !in_section {
            if line.trim() == COORD_SECTION_MARKER {
                in_section = true;
            }
            continue;
        }

        for token in line.split_whitespace() {
            if token == EOF_MARKER && id.is_none() {
                debug!(event = "tsplib_parsed", points = points.len(), line = line_no);
                return Ok(points);
            }
            match (id, x) {
                (None, _) => id = Some(parse_token(token, line_no)?),
                (Some(_), None) => x = Some(parse_token(token, line_no)?),
                (Some(point_id), Some(px)) => {
                    let py = parse_token(token, line_no)?;
                    points.push(Point::new(point_id, px, py));
                    id = None;
                    x = None;
                }
            }
        }
    }

    if id.is_some() {
        return Err(TspError::Parse {
            line: last_line,
            token: String::new(),
        });
    }
    if !in_section {
        warn!(event = "tsplib_no_coord_section");
    }
    debug!(event = "tsplib_parsed", points = points.len(), line = last_line);
    Ok(points)
}

/// Reads points from a file.
///
/// A missing or unreadable file is [`TspError::InputUnavailable`].
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TspError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(BufReader::new(file))
}

/// Like [`read_points`], but a file that cannot be opened yields no points
/// and a warning. Parse errors are still returned.
pub fn read_points_or_empty(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    match read_points(path) {
        Err(TspError::InputUnavailable { path, source }) => {
            warn!(
                event = "input_unavailable",
                path = %path.display(),
                error = %source,
            );
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Reads a file into an [`Instance`] with the default rounded metric.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    read_points(path).map(Instance::new)
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| TspError::Parse {
        line,
        token: token.to_string(),
    })
}
