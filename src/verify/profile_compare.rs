//! Profile comparison: walks two parsed profile files and collects every
//! discrepancy in report order.
//!
//! Order is fixed: sequences only in A, sequences only in B, then for each
//! shared sequence (sorted) every label in either file (sorted).

use std::collections::BTreeSet;

use serde::Serialize;

use crate::io::profile::ProfileMap;
use crate::verify::format::{g, repr};
use crate::verify::vector_compare::{compare_vectors, LengthMismatch, VectorStats};

/// Which of the two inputs a record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// Values of both inputs at one position of maximal deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuePair {
    pub index: usize,
    pub value_a: f64,
    pub value_b: f64,
}

/// A single reason the two files do not match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// Sequences that appear in only one file, sorted.
    SequencesOnlyIn { side: Side, sequences: Vec<String> },
    /// A label present for a shared sequence in only one file.
    MissingLabel {
        sequence: String,
        label: String,
        missing_in: Side,
    },
    LengthMismatch {
        sequence: String,
        label: String,
        len_a: usize,
        len_b: usize,
    },
    ToleranceExceeded {
        sequence: String,
        label: String,
        tolerance: f64,
        stats: VectorStats,
        /// One entry per index in `stats.argmax_indices`.
        max_values: Vec<ValuePair>,
    },
}

impl Discrepancy {
    /// Render the report lines for this discrepancy.
    ///
    /// `name_a`/`name_b` are how the two inputs are named in the output.
    pub fn render(&self, name_a: &str, name_b: &str, verbose: bool) -> Vec<String> {
        let name_of = |side: Side| match side {
            Side::A => name_a,
            Side::B => name_b,
        };
        match self {
            Discrepancy::SequencesOnlyIn { side, sequences } => {
                vec![format!(
                    "Sequences only in {}: {}",
                    name_of(*side),
                    sequences.join(", ")
                )]
            }
            Discrepancy::MissingLabel {
                sequence,
                label,
                missing_in,
            } => vec![format!(
                "[{sequence}] Missing label {label} in {}",
                name_of(*missing_in)
            )],
            Discrepancy::LengthMismatch {
                sequence,
                label,
                len_a,
                len_b,
            } => vec![format!(
                "[{sequence}][{label}] length mismatch: {len_a} vs {len_b}"
            )],
            Discrepancy::ToleranceExceeded {
                sequence,
                label,
                tolerance,
                stats,
                max_values,
            } => {
                let mut lines = vec![format!(
                    "[{sequence}][{label}] max Δ={} (mean={}, rms={}) exceeds tolerance {} at indices {:?}",
                    g(stats.max_abs_diff),
                    g(stats.mean_abs_diff),
                    g(stats.rms_diff),
                    g(*tolerance),
                    stats.argmax_indices,
                )];
                if verbose {
                    lines.extend(max_values.iter().map(|p| {
                        format!(
                            "    idx {}: {} vs {}",
                            p.index,
                            repr(p.value_a),
                            repr(p.value_b)
                        )
                    }));
                }
                lines
            }
        }
    }
}

/// Outcome of comparing two profile maps.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileComparison {
    pub tolerance: f64,
    pub sequences_compared: usize,
    pub labels_compared: usize,
    pub discrepancies: Vec<Discrepancy>,
}

/// Message printed when nothing was flagged.
pub const SUCCESS_MESSAGE: &str = "All sequences and profile values match exactly.";

impl ProfileComparison {
    /// True if no discrepancy was recorded.
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Full human-readable report, one entry per output line.
    pub fn report_lines(&self, name_a: &str, name_b: &str, verbose: bool) -> Vec<String> {
        if self.passed() {
            return vec![SUCCESS_MESSAGE.to_string()];
        }
        self.discrepancies
            .iter()
            .flat_map(|d| d.render(name_a, name_b, verbose))
            .collect()
    }
}

/// Compare every shared sequence and label of `a` and `b`.
///
/// A label fails when its maximum absolute deviation is strictly greater than
/// `tolerance`; a deviation equal to the tolerance passes.
pub fn compare_profiles(a: &ProfileMap, b: &ProfileMap, tolerance: f64) -> ProfileComparison {
    let mut discrepancies = Vec::new();

    let only_a: Vec<String> = a.keys().filter(|k| !b.contains_key(*k)).cloned().collect();
    let only_b: Vec<String> = b.keys().filter(|k| !a.contains_key(*k)).cloned().collect();
    for (side, sequences) in [(Side::A, only_a), (Side::B, only_b)] {
        if !sequences.is_empty() {
            discrepancies.push(Discrepancy::SequencesOnlyIn { side, sequences });
        }
    }

    let mut sequences_compared = 0;
    let mut labels_compared = 0;

    for (seq, prof_a) in a {
        let Some(prof_b) = b.get(seq) else {
            continue;
        };
        sequences_compared += 1;

        let labels: BTreeSet<&String> = prof_a.keys().chain(prof_b.keys()).collect();
        for label in labels {
            let (vec_a, vec_b) = match (prof_a.get(label), prof_b.get(label)) {
                (Some(va), Some(vb)) => (va, vb),
                (None, _) => {
                    discrepancies.push(Discrepancy::MissingLabel {
                        sequence: seq.clone(),
                        label: label.clone(),
                        missing_in: Side::A,
                    });
                    continue;
                }
                (_, None) => {
                    discrepancies.push(Discrepancy::MissingLabel {
                        sequence: seq.clone(),
                        label: label.clone(),
                        missing_in: Side::B,
                    });
                    continue;
                }
            };

            labels_compared += 1;
            let stats = match compare_vectors(vec_a, vec_b) {
                Ok(stats) => stats,
                Err(LengthMismatch { len_a, len_b }) => {
                    discrepancies.push(Discrepancy::LengthMismatch {
                        sequence: seq.clone(),
                        label: label.clone(),
                        len_a,
                        len_b,
                    });
                    continue;
                }
            };
            if stats.within(tolerance) {
                continue;
            }

            let max_values = stats
                .argmax_indices
                .iter()
                .map(|&index| ValuePair {
                    index,
                    value_a: vec_a[index],
                    value_b: vec_b[index],
                })
                .collect();
            discrepancies.push(Discrepancy::ToleranceExceeded {
                sequence: seq.clone(),
                label: label.clone(),
                tolerance,
                stats,
                max_values,
            });
        }
    }

    ProfileComparison {
        tolerance,
        sequences_compared,
        labels_compared,
        discrepancies,
    }
}
