//! Point types and the CSV loader for robot path and tracker logs.
//!
//! Both logs share one row layout:
//! - Header row (skipped)
//! - Columns: row id (ignored), Index, X, Y, Z, T, ... (extra columns ignored)

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::config::CsvConfig;

/// Minimum number of columns in a path point row.
pub const MIN_COLUMNS: usize = 6;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),

    #[error("Line {line}: expected at least {min} columns, found {found}", min = MIN_COLUMNS)]
    MissingColumns { line: u64, found: usize },

    #[error("Line {line}, column {column}: cannot parse {value:?}")]
    ParseError {
        line: u64,
        column: usize,
        value: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// A position in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Returns the point as an `[x, y, z]` array.
    #[inline]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// One recorded sample of a tool path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    /// Sample index as recorded in the log.
    pub index: i64,
    /// Tool position.
    pub position: Point3,
    /// Opaque per-sample parameter, carried through untouched.
    pub t: f64,
}

impl PathPoint {
    pub fn new(index: i64, position: Point3, t: f64) -> Self {
        Self { index, position, t }
    }

    /// Euclidean distance between the positions of two samples.
    #[inline]
    pub fn distance(&self, other: &PathPoint) -> f64 {
        self.position.distance(&other.position)
    }
}

/// Load path points from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the path or tracker CSV file
/// * `config` - CSV dialect settings
///
/// # Returns
///
/// The points in file row order. A header-only or empty file yields an
/// empty vector.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a row has fewer than
/// [`MIN_COLUMNS`] columns, or a numeric field does not parse.
pub fn load_path_points_csv<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Vec<PathPoint>> {
    let file = File::open(path.as_ref())?;
    read_path_points(BufReader::new(file), config)
}

/// Read path points from any reader using the same rules as
/// [`load_path_points_csv`].
pub fn read_path_points<R: Read>(reader: R, config: &CsvConfig) -> Result<Vec<PathPoint>> {
    if !config.delimiter.is_ascii() {
        return Err(LoaderError::InvalidDelimiter(config.delimiter));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < MIN_COLUMNS {
            return Err(LoaderError::MissingColumns {
                line,
                found: record.len(),
            });
        }

        let index: i64 = parse_field(&record, 1, line)?;
        let x: f64 = parse_field(&record, 2, line)?;
        let y: f64 = parse_field(&record, 3, line)?;
        let z: f64 = parse_field(&record, 4, line)?;
        let t: f64 = parse_field(&record, 5, line)?;

        points.push(PathPoint::new(index, Point3::new(x, y, z), t));
    }

    Ok(points)
}

fn parse_field<T: FromStr>(record: &StringRecord, column: usize, line: u64) -> Result<T> {
    let raw = record.get(column).unwrap_or("");
    raw.parse().map_err(|_| LoaderError::ParseError {
        line,
        column,
        value: raw.to_string(),
    })
}
