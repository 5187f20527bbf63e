//! Parity check: end-to-end comparison of two profile files.
//!
//! Parses both inputs, compares them, writes the human-readable report and
//! optionally a JSON report.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::profile::parse_profile_file;
use crate::io::report::write_comparison_report;
use crate::verify::profile_compare::{compare_profiles, ProfileComparison};

/// Default `--tolerance`: anything but an exact match is flagged.
pub const DEFAULT_TOLERANCE: f64 = 1e-20;

/// Configuration for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub file_a: PathBuf,
    pub file_b: PathBuf,
    /// Maximum allowed absolute per-element deviation.
    pub tolerance: f64,
    /// Print both values at every index of maximal deviation.
    pub verbose: bool,
    /// Path for an optional JSON report.
    pub output_report: Option<PathBuf>,
}

impl CompareConfig {
    pub fn new(file_a: impl Into<PathBuf>, file_b: impl Into<PathBuf>) -> Self {
        Self {
            file_a: file_a.into(),
            file_b: file_b.into(),
            tolerance: DEFAULT_TOLERANCE,
            verbose: false,
            output_report: None,
        }
    }
}

/// Run a comparison, writing the report to `out`.
///
/// Returns the comparison; parse and I/O failures abort with an error.
pub fn run_compare<W: Write>(cfg: &CompareConfig, out: &mut W) -> Result<ProfileComparison> {
    let profiles_a = parse_profile_file(&cfg.file_a)
        .with_context(|| format!("failed to parse {}", cfg.file_a.display()))?;
    let profiles_b = parse_profile_file(&cfg.file_b)
        .with_context(|| format!("failed to parse {}", cfg.file_b.display()))?;
    info!(
        "Loaded {} sequences from {} and {} from {}",
        profiles_a.len(),
        cfg.file_a.display(),
        profiles_b.len(),
        cfg.file_b.display()
    );

    let comparison = compare_profiles(&profiles_a, &profiles_b, cfg.tolerance);
    debug!(
        sequences = comparison.sequences_compared,
        labels = comparison.labels_compared,
        discrepancies = comparison.discrepancies.len(),
        "comparison finished"
    );

    let name_a = cfg.file_a.display().to_string();
    let name_b = cfg.file_b.display().to_string();
    for line in comparison.report_lines(&name_a, &name_b, cfg.verbose) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    if let Some(report_path) = &cfg.output_report {
        write_comparison_report(report_path, &cfg.file_a, &cfg.file_b, &comparison)?;
        info!("Wrote JSON report to {}", report_path.display());
    }

    if comparison.passed() {
        info!("Profiles match within tolerance {}", cfg.tolerance);
    } else {
        info!(
            "{} discrepancies found (tolerance {})",
            comparison.discrepancies.len(),
            cfg.tolerance
        );
    }

    Ok(comparison)
}
