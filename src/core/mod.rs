//! Core data types and I/O operations.

pub mod loaders;
pub mod writers;

pub use loaders::{load_path_points_csv, read_path_points, LoaderError, PathPoint, Point3};
pub use writers::{write_duplicate_report_csv, write_path_points_csv, WriteError};
