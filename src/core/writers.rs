//! CSV writers for cleaned path points and duplicate reports.
//!
//! - Cleaned points use the same column layout the loader reads, so a cleaned
//!   file can be fed back in (or streamed to the robot) unchanged.
//! - Duplicate reports list each point that ended a streak of suppressed
//!   duplicates together with the streak length.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use super::loaders::PathPoint;
use crate::processors::dedup::DuplicateEvent;

/// Header written for cleaned path point files.
pub const PATH_POINTS_HEADER: [&str; 6] = ["row", "index", "x", "y", "z", "t"];

/// Header written for duplicate report files.
pub const DUPLICATE_REPORT_HEADER: [&str; 6] = ["index", "x", "y", "z", "t", "suppressed"];

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a CSV writer over a buffered file, creating parent directories first.
fn create_csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    ensure_parent_dirs(path)?;
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::Writer::from_writer(BufWriter::new(file)))
}

/// Formats a point's fields with the shortest text that parses back to the
/// same `f64`, so reloading a written file reproduces the points bit for bit.
fn format_point(point: &PathPoint) -> [String; 5] {
    [
        point.index.to_string(),
        point.position.x.to_string(),
        point.position.y.to_string(),
        point.position.z.to_string(),
        point.t.to_string(),
    ]
}

/// Write path points to CSV in the loader's column layout.
///
/// The first column holds the 0-based output row number; the remaining
/// columns are index, x, y, z and t.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created if needed)
/// * `points` - Points to write, in order
///
/// # Errors
///
/// Returns an error if:
/// - Parent directories cannot be created
/// - File cannot be created or written to
///
/// # Example
///
/// ```no_run
/// use path_checker::core::writers::write_path_points_csv;
/// use std::path::Path;
///
/// write_path_points_csv(Path::new("path_clean.csv"), &[]).unwrap();
/// ```
pub fn write_path_points_csv(path: &Path, points: &[PathPoint]) -> Result<()> {
    let mut csv_writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();

    csv_writer
        .write_record(PATH_POINTS_HEADER)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for (row, point) in points.iter().enumerate() {
        let [index, x, y, z, t] = format_point(point);
        csv_writer
            .write_record([row.to_string(), index, x, y, z, t])
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write duplicate events to CSV.
///
/// Creates a CSV file with headers "index,x,y,z,t,suppressed" and one row per
/// event, where `suppressed` is the number of duplicates removed right before
/// that point.
pub fn write_duplicate_report_csv(path: &Path, events: &[DuplicateEvent]) -> Result<()> {
    let mut csv_writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();

    csv_writer
        .write_record(DUPLICATE_REPORT_HEADER)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for event in events {
        let [index, x, y, z, t] = format_point(&event.point);
        csv_writer
            .write_record([index, x, y, z, t, event.suppressed.to_string()])
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}
