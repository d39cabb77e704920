//! Solution files and checkpointing.
//!
//! A solution file holds the tour cost, rounded to a non-negative integer,
//! on its first line, followed by one point id per line in visiting order.

use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, TspError};
use crate::model::{Instance, Metric, Tour};
use crate::observer::{Improvement, Observer};

/// Writes `tour` as a solution to `writer`.
///
/// The cost line is computed from the instance, not taken from the tour's
/// cached cost. A tour that is not a permutation of the instance is
/// [`TspError::InvalidTour`] and nothing is written.
///
/// # Examples
///
/// ```
/// use u_tsp::io::solution::write_solution;
/// use u_tsp::model::{Instance, Point, Tour};
///
/// let instance = Instance::new(vec![
///     Point::new(10, 0.0, 0.0),
///     Point::new(20, 3.0, 4.0),
/// ]);
/// let mut out = Vec::new();
/// write_solution(&mut out, &instance, &Tour::identity(&instance)).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "10\n10\n20\n");
/// ```
pub fn write_solution<W: Write, M: Metric>(
    mut writer: W,
    instance: &Instance<M>,
    tour: &Tour,
) -> Result<()> {
    if !tour.is_permutation_of(instance.len()) {
        return Err(TspError::InvalidTour(format!(
            "tour of {} positions does not match {} points",
            tour.len(),
            instance.len()
        )));
    }
    let cost = instance.tour_cost(tour.order()).round().max(0.0) as u64;
    writeln!(writer, "{cost}")?;
    for id in instance.ids(tour.order()) {
        writeln!(writer, "{id}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `tour` as a solution file at `path`, replacing any previous one.
///
/// The solution is written to `<path>.tmp` first and renamed over `path`,
/// so an interrupted write leaves the previous file intact.
pub fn save_solution<M: Metric>(
    path: impl AsRef<Path>,
    instance: &Instance<M>,
    tour: &Tour,
) -> Result<()> {
    let path = path.as_ref();
    let staging = staging_path(path);
    let written = File::create(&staging)
        .map_err(TspError::from)
        .and_then(|file| write_solution(BufWriter::new(file), instance, tour))
        .and_then(|()| fs::rename(&staging, path).map_err(TspError::from));
    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Reads a solution back as its cost line and point ids.
pub fn read_solution<R: BufRead>(reader: R) -> Result<(u64, Vec<u32>)> {
    let mut lines = reader.lines().enumerate();
    let Some((_, first)) = lines.next() else {
        return Err(TspError::Parse {
            line: 1,
            token: String::new(),
        });
    };
    let first = first?;
    let cost = parse_line(&first, 1)?;

    let mut ids = Vec::new();
    for (index, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        ids.push(parse_line(&line, index + 1)?);
    }
    Ok((cost, ids))
}

fn parse_line<T: std::str::FromStr>(line: &str, line_no: usize) -> Result<T> {
    let token = line.trim();
    token.parse().map_err(|_| TspError::Parse {
        line: line_no,
        token: token.to_string(),
    })
}

/// Observer that rewrites a solution file on every improvement.
///
/// Write failures do not stop the search: they are logged at `warn` and the
/// latest one is kept in [`last_error`](Self::last_error).
///
/// # Examples
///
/// ```no_run
/// use u_tsp::construct::{MultiStart, MultiStartConfig};
/// use u_tsp::io::{tsplib, CheckpointWriter};
/// use u_tsp::model::Instance;
/// use u_tsp::CancelToken;
///
/// let instance = Instance::new(tsplib::read_points("berlin52.tsp")?);
/// let mut checkpoint = CheckpointWriter::new("berlin52.sol", &instance);
/// let result = MultiStart::run_with_cancel(
///     &instance,
///     &MultiStartConfig::default(),
///     &CancelToken::new(),
///     &mut checkpoint,
/// )?;
/// println!("best {} after {} writes", result.best_cost, checkpoint.writes());
/// # Ok::<(), u_tsp::TspError>(())
/// ```
#[derive(Debug)]
pub struct CheckpointWriter<'a, M = crate::model::Euc2d> {
    path: PathBuf,
    instance: &'a Instance<M>,
    writes: usize,
    last_error: Option<TspError>,
}

impl<'a, M: Metric> CheckpointWriter<'a, M> {
    /// Checkpoints tours of `instance` to `path`.
    pub fn new(path: impl Into<PathBuf>, instance: &'a Instance<M>) -> Self {
        Self {
            path: path.into(),
            instance,
            writes: 0,
            last_error: None,
        }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// The most recent write failure, if any.
    pub fn last_error(&self) -> Option<&TspError> {
        self.last_error.as_ref()
    }

    /// Takes the most recent write failure, clearing it.
    pub fn take_error(&mut self) -> Option<TspError> {
        self.last_error.take()
    }
}

impl<M: Metric> Observer for CheckpointWriter<'_, M> {
    fn on_improvement(&mut self, improvement: &Improvement<'_>) {
        match save_solution(&self.path, self.instance, improvement.tour) {
            Ok(()) => {
                self.writes += 1;
                debug!(
                    event = "checkpoint_written",
                    path = %self.path.display(),
                    strategy = %improvement.strategy,
                    cost = improvement.cost,
                );
            }
            Err(err) => {
                warn!(
                    event = "checkpoint_failed",
                    path = %self.path.display(),
                    error = %err,
                );
                self.last_error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::observer::Strategy;
    use std::io::Cursor;

    fn square() -> Instance {
        Instance::new(vec![
            Point::new(1, 0.0, 0.0),
            Point::new(2, 0.0, 10.0),
            Point::new(3, 10.0, 10.0),
            Point::new(4, 10.0, 0.0),
        ])
    }

    #[test]
    fn test_write_format() {
        let inst = square();
        let tour = Tour::new(vec![2, 1, 0, 3], &inst);
        let mut out = Vec::new();
        write_solution(&mut out, &inst, &tour).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "40\n3\n2\n1\n4\n");
    }

    #[test]
    fn test_cost_is_rounded() {
        let inst = Instance::with_metric(
            vec![Point::new(1, 0.0, 0.0), Point::new(2, 1.0, 1.0)],
            crate::model::Euclidean,
        );
        let mut out = Vec::new();
        write_solution(&mut out, &inst, &Tour::identity(&inst)).unwrap();
        // 2 * sqrt(2) = 2.83
        assert!(String::from_utf8(out).unwrap().starts_with("3\n"));
    }

    #[test]
    fn test_empty_tour() {
        let inst = Instance::new(Vec::new());
        let mut out = Vec::new();
        write_solution(&mut out, &inst, &Tour::empty()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n");
    }

    #[test]
    fn test_read_back() {
        let inst = square();
        let tour = Tour::new(vec![0, 2, 1, 3], &inst);
        let mut out = Vec::new();
        write_solution(&mut out, &inst, &tour).unwrap();
        let (cost, ids) = read_solution(Cursor::new(out)).unwrap();
        assert_eq!(cost, 48);
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_read_malformed() {
        assert!(read_solution(Cursor::new("")).is_err());
        let err = read_solution(Cursor::new("40\n1\nx\n")).unwrap_err();
        assert!(matches!(err, TspError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_save_solution_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sol");
        let inst = square();
        save_solution(&path, &inst, &Tour::new(vec![0, 2, 1, 3], &inst)).unwrap();
        save_solution(&path, &inst, &Tour::identity(&inst)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "40\n1\n2\n3\n4\n");
    }

    #[test]
    fn test_mismatched_tour_is_rejected() {
        let pair = Instance::new(vec![Point::new(1, 0.0, 0.0), Point::new(2, 3.0, 4.0)]);
        let mut out = Vec::new();
        let err = write_solution(&mut out, &pair, &Tour::identity(&square())).unwrap_err();
        assert!(matches!(err, TspError::InvalidTour(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.sol");
        let inst = square();
        save_solution(&path, &inst, &Tour::identity(&inst)).unwrap();

        let pair = Instance::new(vec![Point::new(1, 0.0, 0.0), Point::new(2, 3.0, 4.0)]);
        assert!(save_solution(&path, &pair, &Tour::identity(&inst)).is_err());

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "40\n1\n2\n3\n4\n");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_checkpoint_ignores_mismatched_tour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.sol");
        let pair = Instance::new(vec![Point::new(1, 0.0, 0.0), Point::new(2, 3.0, 4.0)]);
        let mut writer = CheckpointWriter::new(&path, &pair);
        let tour = Tour::identity(&square());
        writer.on_improvement(&Improvement {
            strategy: Strategy::Genetic,
            cost: tour.cost(),
            tour: &tour,
            iteration: 0,
        });
        assert_eq!(writer.writes(), 0);
        assert!(matches!(writer.last_error(), Some(TspError::InvalidTour(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_checkpoint_writer_keeps_latest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.sol");
        let inst = square();
        let mut writer = CheckpointWriter::new(&path, &inst);

        for order in [vec![0, 2, 1, 3], vec![0, 1, 2, 3]] {
            let tour = Tour::new(order, &inst);
            writer.on_improvement(&Improvement {
                strategy: Strategy::TwoOpt,
                cost: tour.cost(),
                tour: &tour,
                iteration: 0,
            });
        }

        assert_eq!(writer.writes(), 2);
        assert!(writer.last_error().is_none());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("40\n"));
    }

    #[test]
    fn test_checkpoint_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("best.sol");
        let inst = square();
        let mut writer = CheckpointWriter::new(&path, &inst);
        let tour = Tour::identity(&inst);
        writer.on_improvement(&Improvement {
            strategy: Strategy::Exact,
            cost: tour.cost(),
            tour: &tour,
            iteration: 1,
        });
        assert_eq!(writer.writes(), 0);
        assert!(matches!(writer.last_error(), Some(TspError::Io(_))));
        assert!(writer.take_error().is_some());
        assert!(writer.last_error().is_none());
    }
}
