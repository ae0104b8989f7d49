//! Model status handler

use payroll_risk_core::{LayoutInfo, ModelMetadata, ModelOrigin};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub path: String,
    pub origin: ModelOrigin,
    pub metadata: ModelMetadata,
    pub layout: LayoutInfo,
    pub feature_importances: Vec<FeatureImportance>,
}

#[derive(Debug, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

/// Describe the running model
pub fn model_report(state: &AppState) -> ModelReport {
    ModelReport {
        path: state.config.model_path.display().to_string(),
        origin: state.origin.clone(),
        metadata: state.model.metadata().clone(),
        layout: LayoutInfo::current(),
        feature_importances: state
            .model
            .feature_importances()
            .into_iter()
            .map(|(feature, importance)| FeatureImportance { feature, importance })
            .collect(),
    }
}
