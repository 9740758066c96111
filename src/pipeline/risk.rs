//! Percentile-based risk classification.
//!
//! The cutoff is recomputed from each batch's own probability vector: the
//! top ~5% of every upload is flagged high risk regardless of absolute
//! score magnitude. For the severely imbalanced populations this tool
//! targets, a fixed global threshold would label nearly everything low
//! risk, so risk labeling is intentionally batch-relative.

use super::error::ScoreError;
use super::stats::quantile;

/// Label for rows at or above the batch cutoff.
pub const HIGH_RISK_LABEL: &str = "Alto Risco";
/// Label for rows below the batch cutoff.
pub const LOW_RISK_LABEL: &str = "Baixo Risco";

/// Default cutoff percentile: flag the top 5% of the batch.
pub const DEFAULT_RISK_PERCENTILE: f64 = 0.95;

/// Below this many rows the batch percentile is statistically unstable.
/// Small batches are still classified, but callers should warn.
pub const STABLE_BATCH_SIZE: usize = 20;

/// Result of classifying one batch of probabilities.
#[derive(Debug, Clone)]
pub struct RiskClassification {
    /// The batch's percentile cutoff value.
    pub cutoff: f64,
    /// Per-row label, aligned with the input probability vector.
    pub labels: Vec<&'static str>,
    pub high_count: usize,
    pub low_count: usize,
}

impl RiskClassification {
    /// Percentage of the batch labeled high risk.
    pub fn high_pct(&self) -> f64 {
        100.0 * self.high_count as f64 / self.labels.len() as f64
    }

    /// Percentage of the batch labeled low risk.
    pub fn low_pct(&self) -> f64 {
        100.0 * self.low_count as f64 / self.labels.len() as f64
    }

    /// Whether the batch is large enough for a stable percentile.
    pub fn is_stable(&self) -> bool {
        self.labels.len() >= STABLE_BATCH_SIZE
    }
}

/// Classify a batch of probabilities against its own percentile cutoff.
///
/// Every probability `>=` the cutoff is high risk; ties with the cutoff
/// value are inclusive, so the high-risk count always equals the count of
/// probabilities at or above the cutoff.
pub fn classify(probabilities: &[f64], percentile: f64) -> Result<RiskClassification, ScoreError> {
    let cutoff = quantile(probabilities, percentile).ok_or(ScoreError::EmptyBatch)?;

    let labels: Vec<&'static str> = probabilities
        .iter()
        .map(|&p| {
            if p >= cutoff {
                HIGH_RISK_LABEL
            } else {
                LOW_RISK_LABEL
            }
        })
        .collect();

    let high_count = labels.iter().filter(|l| **l == HIGH_RISK_LABEL).count();
    let low_count = labels.len() - high_count;

    Ok(RiskClassification {
        cutoff,
        labels,
        high_count,
        low_count,
    })
}
