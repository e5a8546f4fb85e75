//! Path and tracker inspection.
//!
//! Loads a path log and a tracker log, removes sequential duplicates from
//! each, and exposes the bad points, their suppression counts and the
//! cleaned points for each sequence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{CsvConfig, OutputConfig};
use crate::core::loaders::{load_path_points_csv, Point3};
use crate::core::writers::{write_duplicate_report_csv, write_path_points_csv};
use super::dedup::{remove_sequential_duplicates, FilterResult};

/// Duplicate removal outcome for one CSV log.
#[derive(Debug, Clone)]
pub struct SequenceReport {
    /// File the points were read from.
    pub source: PathBuf,
    /// Tolerance used for the run.
    pub tolerance: f64,
    /// Kept points, duplicate events and streak counts from the filter pass.
    pub result: FilterResult,
}

/// Files written by [`SequenceReport::write_outputs`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenOutputs {
    pub clean_csv: PathBuf,
    pub report_csv: PathBuf,
}

impl SequenceReport {
    /// Positions of kept points that ended a streak of duplicates.
    pub fn bad_points(&self) -> Vec<Point3> {
        self.result.events.iter().map(|e| e.point.position).collect()
    }

    /// Streak lengths, parallel to [`bad_points`](Self::bad_points).
    pub fn bad_point_counts(&self) -> Vec<usize> {
        self.result.events.iter().map(|e| e.suppressed).collect()
    }

    /// Positions of all kept points.
    pub fn clean_points(&self) -> Vec<Point3> {
        self.result.kept.iter().map(|p| p.position).collect()
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.result.input_len
    }

    #[inline]
    pub fn kept(&self) -> usize {
        self.result.kept.len()
    }

    #[inline]
    pub fn removed(&self) -> usize {
        self.result.removed()
    }

    #[inline]
    pub fn max_streak(&self) -> usize {
        self.result.max_streak
    }

    fn stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "points".to_string())
    }

    /// Output path for a file derived from the source stem.
    fn derived_path(&self, output_dir: &Path, prefix: &str, suffix: &str) -> PathBuf {
        output_dir.join(format!("{}{}{}.csv", prefix, self.stem(), suffix))
    }

    /// Write the cleaned points and the duplicate report into `output_dir`.
    ///
    /// File names are `<stem><clean_suffix>.csv` and `<stem><report_suffix>.csv`.
    pub fn write_outputs(&self, output_dir: &Path, config: &OutputConfig) -> Result<WrittenOutputs> {
        self.write_outputs_with_prefix(output_dir, "", config)
    }

    /// Same as [`write_outputs`](Self::write_outputs) with `prefix` prepended
    /// to both file names.
    pub fn write_outputs_with_prefix(
        &self,
        output_dir: &Path,
        prefix: &str,
        config: &OutputConfig,
    ) -> Result<WrittenOutputs> {
        let clean_csv = self.derived_path(output_dir, prefix, &config.clean_suffix);
        let report_csv = self.derived_path(output_dir, prefix, &config.report_suffix);

        write_path_points_csv(&clean_csv, &self.result.kept)
            .with_context(|| format!("Failed to write cleaned points: {}", clean_csv.display()))?;
        write_duplicate_report_csv(&report_csv, &self.result.events)
            .with_context(|| format!("Failed to write duplicate report: {}", report_csv.display()))?;

        log::info!("Cleaned points -> {}", clean_csv.display());
        log::info!("Duplicate report -> {}", report_csv.display());

        Ok(WrittenOutputs {
            clean_csv,
            report_csv,
        })
    }
}

/// Reports for the planned path and the tracked path.
#[derive(Debug, Clone)]
pub struct PathCheckReport {
    pub path: SequenceReport,
    pub tracker: SequenceReport,
}

/// Bad points, bad point counts and clean points for path then tracker.
pub type CheckOutputs = (
    Vec<Point3>,
    Vec<usize>,
    Vec<Point3>,
    Vec<Point3>,
    Vec<usize>,
    Vec<Point3>,
);

impl PathCheckReport {
    /// The six parallel outputs of a check, path first.
    pub fn outputs(&self) -> CheckOutputs {
        (
            self.path.bad_points(),
            self.path.bad_point_counts(),
            self.path.clean_points(),
            self.tracker.bad_points(),
            self.tracker.bad_point_counts(),
            self.tracker.clean_points(),
        )
    }

    /// Write cleaned points and duplicate reports for both sequences.
    ///
    /// Files are named after each source stem. When both sources share a stem
    /// the names get a `path_` / `tracker_` prefix so the tracker outputs do
    /// not replace the path outputs.
    pub fn write_outputs(&self, output_dir: &Path, config: &OutputConfig) -> Result<[WrittenOutputs; 2]> {
        let (path_prefix, tracker_prefix) = if self.path.stem() == self.tracker.stem() {
            log::warn!(
                "Path and tracker share the stem '{}', prefixing output names",
                self.path.stem()
            );
            ("path_", "tracker_")
        } else {
            ("", "")
        };

        let path = self.path.write_outputs_with_prefix(output_dir, path_prefix, config)?;
        let tracker = self
            .tracker
            .write_outputs_with_prefix(output_dir, tracker_prefix, config)?;
        Ok([path, tracker])
    }
}

/// Load one CSV log and remove its sequential duplicates.
///
/// # Arguments
///
/// * `file` - Path or tracker CSV file
/// * `tolerance` - Duplicate distance tolerance (must be >= 0)
/// * `csv_config` - CSV dialect settings
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the tolerance is invalid.
pub fn inspect_sequence(file: &Path, tolerance: f64, csv_config: &CsvConfig) -> Result<SequenceReport> {
    let points = load_path_points_csv(file, csv_config)
        .with_context(|| format!("Failed to load points: {}", file.display()))?;

    let result = remove_sequential_duplicates(&points, tolerance)
        .with_context(|| format!("Failed to filter points: {}", file.display()))?;

    let file_name = file
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    log::info!(
        "{}: kept {} of {} points, removed {} ({} duplicate locations)",
        file_name,
        result.kept.len(),
        result.input_len,
        result.removed(),
        result.events.len()
    );
    log::info!("{}: most sequential removed {}", file_name, result.max_streak);
    if result.trailing_suppressed > 0 {
        log::debug!(
            "{}: {} trailing duplicates after last kept point",
            file_name,
            result.trailing_suppressed
        );
    }

    Ok(SequenceReport {
        source: file.to_path_buf(),
        tolerance,
        result,
    })
}

/// Check both the planned path and the tracked path for sequential duplicates.
pub fn check_paths(
    path_file: &Path,
    tracker_file: &Path,
    tolerance: f64,
    csv_config: &CsvConfig,
) -> Result<PathCheckReport> {
    let path = inspect_sequence(path_file, tolerance, csv_config)?;
    let tracker = inspect_sequence(tracker_file, tolerance, csv_config)?;
    Ok(PathCheckReport { path, tracker })
}
