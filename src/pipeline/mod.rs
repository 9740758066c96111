//! Pipeline module - scoring, classification and lift computation

pub mod artifact;
pub mod encoder;
pub mod error;
pub mod gbdt;
pub mod lift;
pub mod loader;
pub mod risk;
pub mod scoring;
pub mod stats;
pub mod winsorizer;

pub use encoder::OneHotEncoder;
pub use error::ScoreError;
pub use gbdt::{GbdtModel, Node, Tree};
pub use lift::{compute_lift, DecileRow, NUM_DECILES};
pub use loader::{dataset_stats, extract_target, load_dataset};
pub use risk::{
    classify, RiskClassification, DEFAULT_RISK_PERCENTILE, HIGH_RISK_LABEL, LOW_RISK_LABEL,
    STABLE_BATCH_SIZE,
};
pub use scoring::{FeatureImportance, Preprocessor, ScoringPipeline};
pub use winsorizer::Winsorizer;
