//! Sequential duplicate point checking for robot tool-path logs.
//!
//! This crate provides tools for:
//! - Loading indexed, timestamped 3D path points from CSV logs
//! - Collapsing runs of consecutive near-duplicate points within a tolerance
//! - Reporting where duplicates occurred and how many each location absorbed
//! - Writing cleaned point sequences and duplicate reports back to CSV
//!
//! # Example
//!
//! ```no_run
//! use path_checker::{config::CsvConfig, processors::inspection::check_paths};
//! use std::path::Path;
//!
//! let report = check_paths(
//!     Path::new("path.csv"),
//!     Path::new("tracker.csv"),
//!     0.01,
//!     &CsvConfig::default(),
//! )
//! .unwrap();
//! println!("path duplicates: {:?}", report.path.bad_point_counts());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{CheckerConfig, CsvConfig, DedupConfig, OutputConfig};
pub use core::loaders::{PathPoint, Point3};
pub use processors::dedup::{remove_sequential_duplicates, FilterResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
