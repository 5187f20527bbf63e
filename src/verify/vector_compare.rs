//! Elementwise comparison of two profile vectors.

use serde::Serialize;
use thiserror::Error;

/// The two vectors cannot be compared position by position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Length mismatch: {len_a} vs {len_b}")]
pub struct LengthMismatch {
    pub len_a: usize,
    pub len_b: usize,
}

/// Difference statistics for one pair of equal-length vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorStats {
    pub max_abs_diff: f64,
    pub mean_abs_diff: f64,
    pub rms_diff: f64,
    /// Every position whose absolute difference equals `max_abs_diff`,
    /// ascending.
    pub argmax_indices: Vec<usize>,
}

impl VectorStats {
    fn zero() -> Self {
        Self {
            max_abs_diff: 0.0,
            mean_abs_diff: 0.0,
            rms_diff: 0.0,
            argmax_indices: Vec::new(),
        }
    }

    /// Whether the largest deviation is within `tolerance`.
    ///
    /// The bound is inclusive. A NaN maximum is never within tolerance.
    #[inline]
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_abs_diff <= tolerance
    }
}

/// Compare two vectors elementwise.
///
/// If any difference is NaN the maximum is NaN and `argmax_indices` holds the
/// NaN positions.
pub fn compare_vectors(a: &[f64], b: &[f64]) -> Result<VectorStats, LengthMismatch> {
    if a.len() != b.len() {
        return Err(LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(VectorStats::zero());
    }

    let deltas: Vec<f64> = a.iter().zip(b).map(|(x, y)| (x - y).abs()).collect();

    let max_abs_diff = deltas.iter().copied().fold(0.0_f64, |acc, d| {
        if acc.is_nan() || d.is_nan() {
            f64::NAN
        } else {
            acc.max(d)
        }
    });

    let argmax_indices = deltas
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == max_abs_diff || (d.is_nan() && max_abs_diff.is_nan()))
        .map(|(i, _)| i)
        .collect();

    let n = deltas.len() as f64;
    let mean_abs_diff = deltas.iter().sum::<f64>() / n;
    let rms_diff = (deltas.iter().map(|d| d * d).sum::<f64>() / n).sqrt();

    Ok(VectorStats {
        max_abs_diff,
        mean_abs_diff,
        rms_diff,
        argmax_indices,
    })
}
