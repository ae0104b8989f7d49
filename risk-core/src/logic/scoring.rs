//! Per-record scoring entry points used by request handlers

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PERFORMANCE_SCORE, DEFAULT_SALARY};
use crate::logic::features::{derive_features, EmployeeAttributes, FeatureVector};
use crate::logic::model::{Prediction, RiskModel};

/// Score a stored employee
pub fn score(model: &RiskModel, attrs: &EmployeeAttributes) -> Prediction {
    let features = derive_features(attrs);
    let prediction = model.predict(&features);
    log::trace!("Scored {} -> {:?}", features.to_log_entry(), prediction);
    prediction
}

/// Ad-hoc scoring request. `perf_score` is already numeric (0-3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub tenure: Option<i64>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub perf_score: Option<i64>,
    #[serde(default)]
    pub absence: Option<i64>,
}

impl ScoreRequest {
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new(
            self.tenure.unwrap_or(0),
            self.salary.unwrap_or(DEFAULT_SALARY),
            self.perf_score.unwrap_or(DEFAULT_PERFORMANCE_SCORE),
            self.absence.unwrap_or(0),
        )
    }
}

pub fn score_request(model: &RiskModel, request: &ScoreRequest) -> Prediction {
    model.predict(&request.features())
}

/// Anything that can be listed with a risk flag
pub trait RiskSubject {
    fn subject_id(&self) -> &str;
    fn subject_name(&self) -> &str;
    fn attributes(&self) -> EmployeeAttributes;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnnotation {
    pub employee_id: String,
    pub name: String,
    pub risk: bool,
    pub probability: f64,
}

/// Score every subject, preserving order
pub fn annotate<T: RiskSubject>(model: &RiskModel, subjects: &[T]) -> Vec<RiskAnnotation> {
    subjects
        .iter()
        .map(|subject| {
            let prediction = score(model, &subject.attributes());
            RiskAnnotation {
                employee_id: subject.subject_id().to_string(),
                name: subject.subject_name().to_string(),
                risk: prediction.risk,
                probability: prediction.probability,
            }
        })
        .collect()
}

pub fn risk_count(annotations: &[RiskAnnotation]) -> usize {
    annotations.iter().filter(|a| a.risk).count()
}
