//! Escora: Credit Scoring Library
//!
//! A library for scoring applicant batches with a pre-trained
//! winsorize/one-hot/GBDT pipeline, batch-relative risk classification
//! and decile lift analysis.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
