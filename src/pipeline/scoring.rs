//! The fitted scoring pipeline: preprocessing stages plus the model.
//!
//! Mirrors the two named stages the artifact exposes — `preprocessing`
//! (winsorizing clamp over the numeric columns, one-hot encoding over the
//! categorical columns) and `model` (the tree ensemble). Both stages have
//! typed accessors; nothing is resolved by reflection at runtime.
//!
//! Feature order is load-bearing end to end: numeric columns first, in
//! fitted order, then the encoder's expanded category levels. The
//! reconstructed name list in [`ScoringPipeline::feature_names`] must line
//! up with the model's internal feature order or the importance ranking is
//! silently mislabeled.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::encoder::OneHotEncoder;
use super::error::ScoreError;
use super::gbdt::GbdtModel;
use super::winsorizer::Winsorizer;

/// Fitted preprocessing stage: column groups and their transformers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    /// Numeric feature columns, in the order the model was fitted on.
    pub numeric_columns: Vec<String>,
    pub winsorizer: Winsorizer,
    /// Categorical feature columns, in the order the model was fitted on.
    pub categorical_columns: Vec<String>,
    pub encoder: OneHotEncoder,
}

impl Preprocessor {
    /// Total width of the preprocessed feature vector.
    pub fn output_width(&self) -> usize {
        self.numeric_columns.len() + self.encoder.output_width()
    }

    /// Pull the numeric column group out of the batch, column-major,
    /// nulls as NaN.
    fn numeric_matrix(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>, ScoreError> {
        let mut columns = Vec::with_capacity(self.numeric_columns.len());
        for name in &self.numeric_columns {
            let col = df.column(name).map_err(|_| ScoreError::MissingColumn {
                column: name.clone(),
            })?;

            if !col.dtype().is_primitive_numeric() && col.dtype() != &DataType::Boolean {
                return Err(ScoreError::IncompatibleType {
                    column: name.clone(),
                    dtype: col.dtype().to_string(),
                });
            }

            let float_col =
                col.cast(&DataType::Float64)
                    .map_err(|_| ScoreError::IncompatibleType {
                        column: name.clone(),
                        dtype: col.dtype().to_string(),
                    })?;
            let ca = float_col.f64().map_err(|_| ScoreError::IncompatibleType {
                column: name.clone(),
                dtype: col.dtype().to_string(),
            })?;

            columns.push(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());
        }
        Ok(columns)
    }

    /// Pull the categorical column group out of the batch, column-major,
    /// nulls as None.
    fn categorical_matrix(&self, df: &DataFrame) -> Result<Vec<Vec<Option<String>>>, ScoreError> {
        let mut columns = Vec::with_capacity(self.categorical_columns.len());
        for name in &self.categorical_columns {
            let col = df.column(name).map_err(|_| ScoreError::MissingColumn {
                column: name.clone(),
            })?;

            if col.dtype().is_nested() {
                return Err(ScoreError::IncompatibleType {
                    column: name.clone(),
                    dtype: col.dtype().to_string(),
                });
            }

            let string_col =
                col.cast(&DataType::String)
                    .map_err(|_| ScoreError::IncompatibleType {
                        column: name.clone(),
                        dtype: col.dtype().to_string(),
                    })?;
            let ca = string_col
                .str()
                .map_err(|_| ScoreError::IncompatibleType {
                    column: name.clone(),
                    dtype: col.dtype().to_string(),
                })?;

            columns.push(ca.into_iter().map(|v| v.map(|s| s.to_string())).collect());
        }
        Ok(columns)
    }

    /// Transform a batch into the row-major feature matrix the model expects.
    pub fn transform(&self, df: &DataFrame) -> Result<Vec<Vec<f64>>, ScoreError> {
        let mut numeric = self.numeric_matrix(df)?;
        self.winsorizer.transform(&mut numeric)?;

        let categorical = self.categorical_matrix(df)?;
        let encoded = self.encoder.transform(&categorical)?;

        let n_rows = df.height();
        let width = self.output_width();
        let mut rows = Vec::with_capacity(n_rows);
        for row_idx in 0..n_rows {
            let mut row = Vec::with_capacity(width);
            for col in &numeric {
                row.push(col[row_idx]);
            }
            if !encoded.is_empty() {
                row.extend_from_slice(&encoded[row_idx]);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Reconstruct human-readable feature names in fit-time order:
    /// numeric column names first, then the encoder's generated level names.
    pub fn feature_names(&self) -> Result<Vec<String>, ScoreError> {
        let mut names = self.numeric_columns.clone();
        names.extend(self.encoder.feature_names(&self.categorical_columns)?);
        Ok(names)
    }
}

/// A feature paired with its trained gain importance.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub gain: f64,
}

/// The complete fitted pipeline as stored in the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPipeline {
    pub preprocessing: Preprocessor,
    pub model: GbdtModel,
}

impl ScoringPipeline {
    /// Probability of the positive class (default) for every row in the
    /// batch. Fails with a schema error and no partial output when a fitted
    /// column is absent or has an unusable dtype.
    pub fn predict_proba(&self, df: &DataFrame) -> Result<Vec<f64>, ScoreError> {
        if df.height() == 0 {
            return Err(ScoreError::EmptyBatch);
        }
        let rows = self.preprocessing.transform(df)?;
        self.model.predict_proba(&rows)
    }

    /// Reconstructed feature names aligned with the model's internal order.
    pub fn feature_names(&self) -> Result<Vec<String>, ScoreError> {
        self.preprocessing.feature_names()
    }

    /// Feature importance ranking by descending training-time gain.
    pub fn gain_importance(&self) -> Result<Vec<FeatureImportance>, ScoreError> {
        let names = self.feature_names()?;
        let gains = self.model.gain_importance();
        if names.len() != gains.len() {
            return Err(ScoreError::InvalidArtifact {
                reason: format!(
                    "reconstructed {} feature name(s) but the model has {} gain score(s)",
                    names.len(),
                    gains.len()
                ),
            });
        }

        let mut ranked: Vec<FeatureImportance> = names
            .into_iter()
            .zip(gains.iter())
            .map(|(feature, &gain)| FeatureImportance { feature, gain })
            .collect();
        ranked.sort_by(|a, b| b.gain.partial_cmp(&a.gain).unwrap_or(std::cmp::Ordering::Equal));
        Ok(ranked)
    }

    /// Check internal consistency after deserialization.
    pub fn validate(&self) -> Result<(), ScoreError> {
        self.preprocessing
            .winsorizer
            .validate(self.preprocessing.numeric_columns.len())?;
        if self.preprocessing.encoder.width() != self.preprocessing.categorical_columns.len() {
            return Err(ScoreError::InvalidArtifact {
                reason: format!(
                    "encoder covers {} column(s) but the pipeline lists {} categorical column(s)",
                    self.preprocessing.encoder.width(),
                    self.preprocessing.categorical_columns.len()
                ),
            });
        }
        self.model.validate()?;
        if self.preprocessing.output_width() != self.model.n_features() {
            return Err(ScoreError::InvalidArtifact {
                reason: format!(
                    "preprocessing produces {} feature(s) but the model expects {}",
                    self.preprocessing.output_width(),
                    self.model.n_features()
                ),
            });
        }
        Ok(())
    }
}
