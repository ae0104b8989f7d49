//! Random Forest - bagged decision trees for binary classification

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::tree::{DecisionTree, TreeConfig};
use crate::constants::{DEFAULT_MODEL_SEED, DEFAULT_N_TREES};
use crate::error::{Result, RiskError};

/// Random Forest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Base seed; tree `i` uses `seed + i`
    pub seed: u64,
    /// Maximum depth of each tree
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (ceil of sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            seed: DEFAULT_MODEL_SEED,
            // Keeps persisted trees well inside serde_json's recursion limit
            max_depth: Some(32),
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
        }
    }
}

/// Random Forest model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_features: usize,
    /// Distinct labels seen during fit, ascending
    classes: Vec<bool>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Train the forest on `samples` / `labels` (same length, non-empty)
    pub fn fit<R: AsRef<[f64]>>(config: ForestConfig, samples: &[R], labels: &[bool]) -> Result<Self> {
        if samples.is_empty() {
            return Err(RiskError::EmptyTrainingTable);
        }
        if samples.len() != labels.len() {
            return Err(RiskError::ShapeMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }

        let n_samples = samples.len();
        let n_features = samples[0].as_ref().len();
        let max_features = config
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .clamp(1, n_features.max(1));

        let tree_config = TreeConfig {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            min_samples_leaf: config.min_samples_leaf.max(1),
            max_features,
        };

        let trees: Vec<DecisionTree> = (0..config.n_trees.max(1))
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));

                let indices: Vec<usize> = if config.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };

                DecisionTree::fit(samples, labels, &indices, n_features, &tree_config, &mut rng)
            })
            .collect();

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        // Aggregate feature importances
        let mut feature_importances = vec![0.0; n_features];
        for tree in &trees {
            for (total, imp) in feature_importances.iter_mut().zip(tree.importances()) {
                *total += imp;
            }
        }
        let sum: f64 = feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut feature_importances {
                *imp /= sum;
            }
        }

        Ok(Self {
            config,
            trees,
            n_features,
            classes,
            feature_importances,
        })
    }

    /// Probability of the positive class; None when training saw one class
    pub fn predict_proba_one(&self, sample: &[f64]) -> Option<f64> {
        if self.classes.len() < 2 || self.trees.is_empty() {
            return None;
        }

        let total: f64 = self.trees.iter().map(|t| t.predict_one(sample)).sum();
        Some(total / self.trees.len() as f64)
    }

    /// Predicted class
    pub fn predict_one(&self, sample: &[f64]) -> bool {
        match self.classes.as_slice() {
            [only] => *only,
            _ => self.predict_proba_one(sample).is_some_and(|p| p > 0.5),
        }
    }

    /// Structural checks for a forest read back from disk
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if self.feature_importances.len() != self.n_features {
            return Err(format!(
                "{} importances for {} features",
                self.feature_importances.len(),
                self.n_features
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if let Some(feature) = tree.root().max_feature() {
                if feature >= self.n_features {
                    return Err(format!("tree {} splits on unknown feature {}", i, feature));
                }
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[bool] {
        &self.classes
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}
