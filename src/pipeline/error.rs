//! Error types for the scoring pipeline.
//!
//! `ScoreError` covers the failure modes of the fitted pipeline core:
//! using a transformer before it is fitted, feeding it a matrix of the
//! wrong width, uploading a batch whose schema does not match what the
//! pipeline was fitted on, and degenerate batches that cannot support the
//! requested statistic.

use thiserror::Error;

/// Errors produced by the scoring pipeline and its transformers.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// A transformer was used before `fit` stored its learned state.
    #[error("{component} is not fitted: call fit before transform")]
    NotFitted {
        /// Component name, e.g. "Winsorizer"
        component: &'static str,
    },

    /// Input width does not match the fitted width.
    #[error("{component} was fitted on {expected} column(s) but received {actual}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A column the pipeline was fitted on is absent from the input table.
    #[error("schema mismatch: required column '{column}' not found in input")]
    MissingColumn { column: String },

    /// A column is present but its dtype cannot be used.
    #[error("schema mismatch: column '{column}' has incompatible dtype {dtype}")]
    IncompatibleType { column: String, dtype: String },

    /// The batch has no rows, so no batch statistic can be computed.
    #[error("batch is empty: nothing to score")]
    EmptyBatch,

    /// The batch cannot support the requested computation.
    #[error("degenerate batch: {reason}")]
    DegenerateBatch { reason: String },

    /// The model artifact is internally inconsistent.
    #[error("invalid model artifact: {reason}")]
    InvalidArtifact { reason: String },
}
