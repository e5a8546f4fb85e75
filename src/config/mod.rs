//! Configuration types for the path checker.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for sequential duplicate removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Maximum distance between a point and the current anchor for the point
    /// to count as a duplicate (same units as the CSV coordinates, usually mm)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1.0
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

/// Configuration for reading path point CSV files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter (must be a single ASCII character)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether the first row is a header and should be skipped
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,
}

fn default_delimiter() -> char {
    ','
}

fn default_has_headers() -> bool {
    true
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            has_headers: default_has_headers(),
        }
    }
}

/// Configuration for output file naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suffix appended to the input file stem for the cleaned point CSV
    #[serde(default = "default_clean_suffix")]
    pub clean_suffix: String,

    /// Suffix appended to the input file stem for the duplicate report CSV
    #[serde(default = "default_report_suffix")]
    pub report_suffix: String,
}

fn default_clean_suffix() -> String {
    "_clean".to_string()
}

fn default_report_suffix() -> String {
    "_duplicates".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            clean_suffix: default_clean_suffix(),
            report_suffix: default_report_suffix(),
        }
    }
}

/// Main configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckerConfig {
    #[serde(default)]
    pub dedup: DedupConfig,

    #[serde(default)]
    pub csv: CsvConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl CheckerConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: CheckerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
