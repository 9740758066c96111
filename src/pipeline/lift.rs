//! Decile lift table.
//!
//! Measures the model's ranking power against an available ground-truth
//! label: rows are ranked by descending probability and split into ten
//! equal-sized rank groups; each group's default rate is compared to the
//! overall batch rate. Only computable when the label column is present in
//! the upload — the caller skips this view otherwise.

use serde::Serialize;

use super::error::ScoreError;

/// Number of rank groups in the lift table.
pub const NUM_DECILES: usize = 10;

/// One rank group of the lift table. Decile 0 holds the highest-risk rows.
#[derive(Debug, Clone, Serialize)]
pub struct DecileRow {
    pub decile: usize,
    pub count: usize,
    pub positives: usize,
    /// Positive (default) rate within the decile.
    pub rate: f64,
    /// Decile rate relative to the overall batch rate.
    pub lift: f64,
}

/// Compute the decile lift table for a scored batch.
///
/// `probabilities` and `labels` are row-aligned; `labels[i]` is true when
/// row `i` defaulted. Rank boundaries are `floor(d * n / 10)`, so decile
/// counts always sum to the batch size. The sort is stable: ties keep
/// their upload order.
pub fn compute_lift(probabilities: &[f64], labels: &[bool]) -> Result<Vec<DecileRow>, ScoreError> {
    let n = probabilities.len();
    if n != labels.len() {
        return Err(ScoreError::DimensionMismatch {
            component: "lift",
            expected: n,
            actual: labels.len(),
        });
    }
    if n < NUM_DECILES {
        return Err(ScoreError::DegenerateBatch {
            reason: format!("lift needs at least {} rows, got {}", NUM_DECILES, n),
        });
    }

    let positives_total = labels.iter().filter(|l| **l).count();
    if positives_total == 0 {
        return Err(ScoreError::DegenerateBatch {
            reason: "no positive labels in batch: overall default rate is zero".to_string(),
        });
    }
    let overall_rate = positives_total as f64 / n as f64;

    // Rank rows by descending probability, stable across ties
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        probabilities[b]
            .partial_cmp(&probabilities[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut table = Vec::with_capacity(NUM_DECILES);
    for decile in 0..NUM_DECILES {
        let start = decile * n / NUM_DECILES;
        let end = (decile + 1) * n / NUM_DECILES;
        let group = &order[start..end];

        let count = group.len();
        let positives = group.iter().filter(|&&idx| labels[idx]).count();
        let rate = positives as f64 / count as f64;

        table.push(DecileRow {
            decile,
            count,
            positives,
            rate,
            lift: rate / overall_rate,
        });
    }

    Ok(table)
}
