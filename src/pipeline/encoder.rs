//! Fitted one-hot encoder for categorical columns.
//!
//! Categories are learned at training time and frozen in the artifact. At
//! inference, a value never seen during training (or a null) encodes to an
//! all-zero indicator block for that column — the batch never fails over an
//! unseen level.

use serde::{Deserialize, Serialize};

use super::error::ScoreError;

/// One-hot encoder with fitted category levels per column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    /// Fitted category levels, one list per categorical column, in the
    /// fitted column order. Level order within a column is load-bearing:
    /// it defines the indicator layout the model was trained on.
    pub categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    /// Learn category levels from column-major string data.
    ///
    /// Levels are stored sorted (the sklearn convention); nulls contribute
    /// no level.
    pub fn fit(columns: &[Vec<Option<String>>]) -> Self {
        let categories = columns
            .iter()
            .map(|col| {
                let mut levels: Vec<String> = col.iter().flatten().cloned().collect();
                levels.sort();
                levels.dedup();
                levels
            })
            .collect();
        Self { categories }
    }

    /// Number of categorical columns the encoder was fitted on.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Total number of generated indicator features.
    pub fn output_width(&self) -> usize {
        self.categories.iter().map(|levels| levels.len()).sum()
    }

    /// Generated feature names, `"{column}_{level}"` in fitted order.
    pub fn feature_names(&self, column_names: &[String]) -> Result<Vec<String>, ScoreError> {
        if column_names.len() != self.categories.len() {
            return Err(ScoreError::DimensionMismatch {
                component: "OneHotEncoder",
                expected: self.categories.len(),
                actual: column_names.len(),
            });
        }

        let mut names = Vec::with_capacity(self.output_width());
        for (col, levels) in column_names.iter().zip(&self.categories) {
            for level in levels {
                names.push(format!("{}_{}", col, level));
            }
        }
        Ok(names)
    }

    /// Encode column-major values into row-major indicator blocks.
    ///
    /// Each output row is the concatenation of the per-column indicator
    /// blocks. Unknown or null values yield an all-zero block.
    pub fn transform(&self, columns: &[Vec<Option<String>>]) -> Result<Vec<Vec<f64>>, ScoreError> {
        if columns.len() != self.categories.len() {
            return Err(ScoreError::DimensionMismatch {
                component: "OneHotEncoder",
                expected: self.categories.len(),
                actual: columns.len(),
            });
        }

        let n_rows = columns.first().map_or(0, |c| c.len());
        let width = self.output_width();
        let mut rows = vec![vec![0.0; width]; n_rows];

        let mut offset = 0;
        for (col, levels) in columns.iter().zip(&self.categories) {
            for (row_idx, value) in col.iter().enumerate() {
                if let Some(v) = value {
                    // Unknown level: no index found, block stays all-zero
                    if let Some(level_idx) = levels.iter().position(|l| l == v) {
                        rows[row_idx][offset + level_idx] = 1.0;
                    }
                }
            }
            offset += levels.len();
        }

        Ok(rows)
    }
}
