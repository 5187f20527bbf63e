//! JSON comparison report writer.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verify::profile_compare::ProfileComparison;

/// Write the full comparison as a pretty-printed JSON document.
pub fn write_comparison_report(
    path: &Path,
    file_a: &Path,
    file_b: &Path,
    comparison: &ProfileComparison,
) -> Result<()> {
    let report = serde_json::json!({
        "file_a": file_a.display().to_string(),
        "file_b": file_b.display().to_string(),
        "passed": comparison.passed(),
        "tolerance": comparison.tolerance,
        "sequences_compared": comparison.sequences_compared,
        "labels_compared": comparison.labels_compared,
        "num_discrepancies": comparison.discrepancies.len(),
        "discrepancies": comparison.discrepancies,
    });

    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
