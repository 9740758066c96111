//! Gradient-boosted tree ensemble for binary classification.
//!
//! Inference-only: the ensemble is trained offline and ships inside the
//! model artifact as serialized trees plus the per-feature gain vector
//! recorded at training time. Margins are additive across trees; the
//! positive-class probability is the sigmoid of the summed margin.
//!
//! Missing values (NaN) route to the left child, the usual GBDT default
//! direction.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::ScoreError;

/// A node in a regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        value: f64,
    },
}

impl Node {
    /// Evaluate one feature row down to a leaf value.
    fn eval(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = row.get(*feature).copied().unwrap_or(f64::NAN);
                    node = if v.is_nan() || v < *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Largest feature index referenced by this subtree, if any split exists.
    fn max_feature(&self) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::Split {
                feature,
                left,
                right,
                ..
            } => {
                let mut max = *feature;
                if let Some(m) = left.max_feature() {
                    max = max.max(m);
                }
                if let Some(m) = right.max_feature() {
                    max = max.max(m);
                }
                Some(max)
            }
        }
    }
}

/// A single boosted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub root: Node,
}

/// Serialized tree ensemble with training-time gain importances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModel {
    /// Margin added before any tree contribution.
    pub base_score: f64,
    pub trees: Vec<Tree>,
    /// Total training-loss reduction attributable to splits on each
    /// feature, aligned with the preprocessed feature order.
    pub feature_gain: Vec<f64>,
}

impl GbdtModel {
    /// Feature-vector width the model expects (length of the gain vector).
    pub fn n_features(&self) -> usize {
        self.feature_gain.len()
    }

    /// Raw additive margin for one row.
    fn predict_margin(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.root.eval(row)).sum::<f64>()
    }

    /// Positive-class probabilities for a row-major feature matrix.
    ///
    /// Pure inference: no side effects, no partial output on error.
    pub fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ScoreError> {
        let expected = self.n_features();
        for row in rows {
            if row.len() != expected {
                return Err(ScoreError::DimensionMismatch {
                    component: "GbdtModel",
                    expected,
                    actual: row.len(),
                });
            }
        }

        Ok(rows
            .par_iter()
            .map(|row| sigmoid(self.predict_margin(row)))
            .collect())
    }

    /// The trained gain importance vector.
    pub fn gain_importance(&self) -> &[f64] {
        &self.feature_gain
    }

    /// Check internal consistency of a deserialized model.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.trees.is_empty() {
            return Err(ScoreError::InvalidArtifact {
                reason: "model has no trees".to_string(),
            });
        }
        if let Some(gain) = self.feature_gain.iter().find(|g| **g < 0.0 || g.is_nan()) {
            return Err(ScoreError::InvalidArtifact {
                reason: format!("negative or NaN gain importance: {}", gain),
            });
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            if let Some(max) = tree.root.max_feature() {
                if max >= self.n_features() {
                    return Err(ScoreError::InvalidArtifact {
                        reason: format!(
                            "tree {} splits on feature {} but the model has {} feature(s)",
                            idx,
                            max,
                            self.n_features()
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
