//! Risk Model - training and inference contract
//!
//! A `RiskModel` only exists in the trained state: the sole constructors are
//! `train` and loading a persisted artifact. Retraining yields a new instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::forest::{ForestConfig, RandomForest};
use crate::constants::{DEFAULT_MODEL_SEED, DEFAULT_N_TREES};
use crate::error::Result;
use crate::logic::features::layout::{layout_hash, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::features::FeatureVector;
use crate::logic::training::{TableSource, TrainingTable};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Training knobs exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            seed: DEFAULT_MODEL_SEED,
        }
    }
}

impl TrainerConfig {
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees: self.n_trees,
            seed: self.seed,
            ..Default::default()
        }
    }
}

/// Everything known about how a model was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub label_policy: String,
    pub n_trees: usize,
    pub seed: u64,
    pub training_rows: usize,
    pub positive_rows: usize,
    pub table_source: TableSource,
    pub trained_at: DateTime<Utc>,
}

/// Prediction output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub risk: bool,
    /// Confidence the employee is at-risk, 0.0 - 1.0
    pub probability: f64,
}

// ============================================================================
// RISK MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RiskModel {
    metadata: ModelMetadata,
    forest: RandomForest,
}

impl RiskModel {
    /// Fit a fresh model on `table`
    pub fn train(table: &TrainingTable, config: &TrainerConfig) -> Result<Self> {
        let samples = table.feature_matrix();
        let labels = table.labels();

        log::info!(
            "Training risk model: {} rows ({} at-risk), {} trees, seed {}",
            table.len(),
            table.positive_count(),
            config.n_trees,
            config.seed
        );

        let forest = RandomForest::fit(config.forest_config(), &samples, &labels)?;

        let metadata = ModelMetadata {
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            label_policy: table.label_policy().to_string(),
            n_trees: forest.n_trees(),
            seed: config.seed,
            training_rows: table.len(),
            positive_rows: table.positive_count(),
            table_source: table.source(),
            trained_at: Utc::now(),
        };

        Ok(Self { metadata, forest })
    }

    /// Reassemble a model read from storage
    pub(crate) fn from_parts(metadata: ModelMetadata, forest: RandomForest) -> Self {
        Self { metadata, forest }
    }

    /// Score one feature vector. Never fails and never mutates the model.
    pub fn predict(&self, features: &FeatureVector) -> Prediction {
        let sample = features.to_f64();
        let risk = self.forest.predict_one(&sample);

        // Single-class training leaves no probability to report
        let probability = self
            .forest
            .predict_proba_one(&sample)
            .unwrap_or(if risk { 1.0 } else { 0.0 });

        Prediction { risk, probability }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Feature importances keyed by layout name
    pub fn feature_importances(&self) -> Vec<(&'static str, f64)> {
        FEATURE_LAYOUT
            .iter()
            .copied()
            .zip(self.forest.feature_importances().iter().copied())
            .collect()
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

pub fn train(table: &TrainingTable, config: &TrainerConfig) -> Result<RiskModel> {
    RiskModel::train(table, config)
}

pub fn predict(model: &RiskModel, features: &FeatureVector) -> Prediction {
    model.predict(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use crate::logic::training::TrainingRow;

    fn fallback_model() -> RiskModel {
        train(&TrainingTable::fallback(), &TrainerConfig::default()).unwrap()
    }

    fn sample_vectors() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new(0, 30_000, 1, 0),
            FeatureVector::new(1, 45_000, 1, 6),
            FeatureVector::new(5, 50_000, 3, 1),
            FeatureVector::new(2, 32_000, 0, 4),
            FeatureVector::new(10, 60_000, 2, 8),
        ]
    }

    #[test]
    fn test_train_on_fallback() {
        let model = fallback_model();
        let meta = model.metadata();

        assert_eq!(meta.n_trees, 50);
        assert_eq!(meta.seed, 42);
        assert_eq!(meta.training_rows, 8);
        assert_eq!(meta.positive_rows, 3);
        assert_eq!(meta.table_source, TableSource::Fallback);
        assert_eq!(meta.feature_version, FEATURE_VERSION);
        assert_eq!(model.feature_importances().len(), 4);
    }

    #[test]
    fn test_probability_in_range() {
        let model = fallback_model();
        for features in sample_vectors() {
            let prediction = model.predict(&features);
            assert!((0.0..=1.0).contains(&prediction.probability));
            assert_eq!(prediction.risk, prediction.probability > 0.5);
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = fallback_model();
        for features in sample_vectors() {
            let first = predict(&model, &features);
            for _ in 0..5 {
                assert_eq!(predict(&model, &features), first);
            }
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let a = fallback_model();
        let b = fallback_model();
        assert_eq!(a.forest(), b.forest());
    }

    #[test]
    fn test_fallback_rows_are_learned() {
        let model = fallback_model();
        // Heavy absence with weak performance sits squarely in the at-risk region
        assert!(model.predict(&FeatureVector::new(6, 60_000, 1, 7)).risk);
        assert!(!model.predict(&FeatureVector::new(5, 35_000, 3, 0)).risk);
    }

    #[test]
    fn test_single_class_degenerate_probability() {
        let rows = (0..6)
            .map(|i| TrainingRow {
                features: FeatureVector::new(i, 40_000, 2, 0),
                label: false,
            })
            .collect();
        let table = TrainingTable::new(rows, TableSource::Employees, "test");
        let model = train(&table, &TrainerConfig::default()).unwrap();

        let prediction = model.predict(&FeatureVector::new(3, 40_000, 0, 9));
        assert_eq!(prediction, Prediction { risk: false, probability: 0.0 });

        let rows = (0..6)
            .map(|i| TrainingRow {
                features: FeatureVector::new(i, 40_000, 2, 9),
                label: true,
            })
            .collect();
        let table = TrainingTable::new(rows, TableSource::Employees, "test");
        let model = train(&table, &TrainerConfig::default()).unwrap();

        let prediction = model.predict(&FeatureVector::new(3, 40_000, 0, 0));
        assert_eq!(prediction, Prediction { risk: true, probability: 1.0 });
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let table = TrainingTable::new(Vec::new(), TableSource::Employees, "test");
        let result = train(&table, &TrainerConfig::default());
        assert!(matches!(result, Err(RiskError::EmptyTrainingTable)));
    }
}
