//! Command-line interface for the path checker.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::writers;
use crate::processors::inspection::{self, PathCheckReport, SequenceReport, WrittenOutputs};
use crate::CheckerConfig;

#[derive(Parser)]
#[command(name = "path-checker")]
#[command(about = "Sequential duplicate point checker for robot path and tracker logs", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a path log and a tracker log for sequential duplicate points
    Check {
        /// Planned path CSV file
        path_csv: PathBuf,
        /// Tracked path CSV file
        tracker_csv: PathBuf,
        /// Duplicate distance tolerance (overrides config)
        #[arg(short, long)]
        tolerance: Option<f64>,
        /// Write cleaned CSVs and duplicate reports into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Remove sequential duplicates from a single CSV log
    Dedup {
        /// Input CSV file
        input_csv: PathBuf,
        /// Duplicate distance tolerance (overrides config)
        #[arg(short, long)]
        tolerance: Option<f64>,
        /// Output CSV for the cleaned points
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output CSV for the duplicate report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Write the default configuration to a YAML file
    InitConfig {
        /// Destination YAML file
        file: PathBuf,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<60} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.chars().count() > 38 {
            format!("{}...", value.chars().take(35).collect::<String>())
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<38} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

/// Summary rows shared by `check` and `dedup`.
fn sequence_summary(report: &SequenceReport) -> Vec<(&'static str, String)> {
    vec![
        ("Input file", report.source.display().to_string()),
        ("Tolerance", report.tolerance.to_string()),
        ("Points read", report.total().to_string()),
        ("Points kept", report.kept().to_string()),
        ("Points removed", report.removed().to_string()),
        ("Duplicate locations", report.result.events.len().to_string()),
        ("Most sequential", report.max_streak().to_string()),
    ]
}

fn print_duplicate_locations(label: &str, report: &SequenceReport) {
    if report.result.events.is_empty() {
        return;
    }
    println!("{} duplicate locations (index: x, y, z -> suppressed):", label);
    for event in &report.result.events {
        let p = event.point.position;
        println!(
            "  {:>8}: {:.4}, {:.4}, {:.4} -> {}",
            event.point.index, p.x, p.y, p.z, event.suppressed
        );
    }
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match CheckerConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
                CheckerConfig::default()
            }
        },
        None => CheckerConfig::default(),
    };

    // Dispatch to subcommands
    match cli.command {
        Commands::Check { path_csv, tracker_csv, tolerance, output_dir } => {
            cmd_check(&path_csv, &tracker_csv, tolerance, output_dir.as_deref(), &config);
        }
        Commands::Dedup { input_csv, tolerance, output, report } => {
            cmd_dedup(&input_csv, tolerance, output.as_deref(), report.as_deref(), &config);
        }
        Commands::InitConfig { file } => {
            cmd_init_config(&file, &config);
        }
    }
}

/// Run both checks and write outputs when `output_dir` is set.
///
/// A `tolerance` given on the command line takes precedence over the config.
fn run_check(
    path_csv: &Path,
    tracker_csv: &Path,
    tolerance: Option<f64>,
    output_dir: Option<&Path>,
    config: &CheckerConfig,
) -> Result<(PathCheckReport, Option<[WrittenOutputs; 2]>)> {
    let tolerance = tolerance.unwrap_or(config.dedup.tolerance);
    let report = inspection::check_paths(path_csv, tracker_csv, tolerance, &config.csv)?;

    let written = match output_dir {
        Some(dir) => Some(report.write_outputs(dir, &config.output)?),
        None => None,
    };

    Ok((report, written))
}

/// Dedup one log and write the cleaned points and report where requested.
fn run_dedup(
    input_csv: &Path,
    tolerance: Option<f64>,
    output: Option<&Path>,
    report_path: Option<&Path>,
    config: &CheckerConfig,
) -> Result<SequenceReport> {
    let tolerance = tolerance.unwrap_or(config.dedup.tolerance);
    let report = inspection::inspect_sequence(input_csv, tolerance, &config.csv)?;

    if let Some(path) = output {
        writers::write_path_points_csv(path, &report.result.kept)
            .with_context(|| format!("Failed to write cleaned points: {}", path.display()))?;
        info!("Cleaned points -> {}", path.display());
    }

    if let Some(path) = report_path {
        writers::write_duplicate_report_csv(path, &report.result.events)
            .with_context(|| format!("Failed to write duplicate report: {}", path.display()))?;
        info!("Duplicate report -> {}", path.display());
    }

    Ok(report)
}

fn cmd_check(
    path_csv: &Path,
    tracker_csv: &Path,
    tolerance: Option<f64>,
    output_dir: Option<&Path>,
    config: &CheckerConfig,
) {
    let start = Instant::now();

    println!("Checking path and tracker logs...");
    println!("Path: {}", path_csv.display());
    println!("Tracker: {}", tracker_csv.display());
    println!("Tolerance: {}", tolerance.unwrap_or(config.dedup.tolerance));

    let spinner = create_spinner("Removing sequential duplicates...");

    let (report, written) = match run_check(path_csv, tracker_csv, tolerance, output_dir, config) {
        Ok(r) => r,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Check failed: {:#}", e);
            std::process::exit(1);
        }
    };

    spinner.finish_and_clear();

    let mut path_items = sequence_summary(&report.path);
    let mut tracker_items = sequence_summary(&report.tracker);
    if let Some([path_out, tracker_out]) = &written {
        path_items.push(("Cleaned CSV", path_out.clean_csv.display().to_string()));
        tracker_items.push(("Cleaned CSV", tracker_out.clean_csv.display().to_string()));
    }
    tracker_items.push(("Duration", format!("{:.2?}", start.elapsed())));

    print_summary("Path Check", &path_items);
    print_duplicate_locations("Path", &report.path);
    print_summary("Tracker Check", &tracker_items);
    print_duplicate_locations("Tracker", &report.tracker);
}

fn cmd_dedup(
    input_csv: &Path,
    tolerance: Option<f64>,
    output: Option<&Path>,
    report_path: Option<&Path>,
    config: &CheckerConfig,
) {
    let start = Instant::now();
    let spinner = create_spinner("Removing sequential duplicates...");

    let report = match run_dedup(input_csv, tolerance, output, report_path, config) {
        Ok(r) => r,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Dedup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    spinner.finish_and_clear();

    let mut items = sequence_summary(&report);
    if let Some(path) = output {
        items.push(("Output file", path.display().to_string()));
    }
    if let Some(path) = report_path {
        items.push(("Report file", path.display().to_string()));
    }
    items.push(("Duration", format!("{:.2?}", start.elapsed())));

    print_summary("Dedup Complete", &items);
    print_duplicate_locations("Input", &report);
}

fn cmd_init_config(file: &Path, config: &CheckerConfig) {
    match config.to_yaml(file) {
        Ok(()) => println!("Wrote config to {}", file.display()),
        Err(e) => {
            error!("Failed to write config to {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}
