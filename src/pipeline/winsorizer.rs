//! Winsorizing clamp transformer.
//!
//! Fitted on training data (outside this tool), applied at inference time:
//! `fit` learns per-column `[lower_quantile, upper_quantile]` bounds and
//! `transform` clips every value into its column's fitted range. The fitted
//! bounds are serialized inside the model artifact.

use serde::{Deserialize, Serialize};

use super::error::ScoreError;
use super::stats::quantile;

/// Default lower quantile for the clamp bounds.
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.01;
/// Default upper quantile for the clamp bounds.
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.99;

/// Quantile clamp with learned per-column bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winsorizer {
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    /// Per-column lower bounds, present only after `fit`.
    #[serde(default)]
    pub lower_bounds: Option<Vec<f64>>,
    /// Per-column upper bounds, present only after `fit`.
    #[serde(default)]
    pub upper_bounds: Option<Vec<f64>>,
}

impl Default for Winsorizer {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE)
    }
}

impl Winsorizer {
    /// Create an unfitted clamp with the given quantile pair.
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Self {
        Self {
            lower_quantile,
            upper_quantile,
            lower_bounds: None,
            upper_bounds: None,
        }
    }

    /// Whether `fit` has stored bounds.
    pub fn is_fitted(&self) -> bool {
        self.lower_bounds.is_some() && self.upper_bounds.is_some()
    }

    /// Number of columns the clamp was fitted on, if fitted.
    pub fn width(&self) -> Option<usize> {
        self.lower_bounds.as_ref().map(|b| b.len())
    }

    /// Learn per-column bounds from column-major data.
    ///
    /// Each entry of `columns` is one column's values across all rows.
    /// Columns that are empty or all-NaN get unbounded `[-inf, inf]` bounds
    /// so transform leaves them untouched.
    pub fn fit(&mut self, columns: &[Vec<f64>]) {
        let mut lower = Vec::with_capacity(columns.len());
        let mut upper = Vec::with_capacity(columns.len());

        for col in columns {
            lower.push(quantile(col, self.lower_quantile).unwrap_or(f64::NEG_INFINITY));
            upper.push(quantile(col, self.upper_quantile).unwrap_or(f64::INFINITY));
        }

        self.lower_bounds = Some(lower);
        self.upper_bounds = Some(upper);
    }

    /// Clip column-major data into the fitted per-column bounds.
    ///
    /// Values already inside a column's range pass through unchanged; NaN
    /// passes through so the model's missing-value routing still applies.
    pub fn transform(&self, columns: &mut [Vec<f64>]) -> Result<(), ScoreError> {
        let (lower, upper) = match (&self.lower_bounds, &self.upper_bounds) {
            (Some(l), Some(u)) => (l, u),
            _ => {
                return Err(ScoreError::NotFitted {
                    component: "Winsorizer",
                })
            }
        };

        if columns.len() != lower.len() {
            return Err(ScoreError::DimensionMismatch {
                component: "Winsorizer",
                expected: lower.len(),
                actual: columns.len(),
            });
        }

        for (col, (&lo, &hi)) in columns.iter_mut().zip(lower.iter().zip(upper.iter())) {
            for value in col.iter_mut() {
                if !value.is_nan() {
                    *value = value.clamp(lo, hi);
                }
            }
        }

        Ok(())
    }

    /// Validate that serialized bounds are consistent with `expected` columns.
    pub fn validate(&self, expected: usize) -> Result<(), ScoreError> {
        match (&self.lower_bounds, &self.upper_bounds) {
            (Some(l), Some(u)) if l.len() == expected && u.len() == expected => Ok(()),
            (Some(l), _) => Err(ScoreError::InvalidArtifact {
                reason: format!(
                    "winsorizer bounds cover {} column(s) but the pipeline has {} numeric column(s)",
                    l.len(),
                    expected
                ),
            }),
            _ => Err(ScoreError::InvalidArtifact {
                reason: "winsorizer in the artifact is not fitted".to_string(),
            }),
        }
    }
}
