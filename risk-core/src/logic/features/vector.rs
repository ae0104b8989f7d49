//! Feature Vector - Core data structure for model input
//!
//! Values are stored in the order defined by `FEATURE_LAYOUT`. The vector
//! carries no version of its own: it only ever lives inside the process that
//! derived it, and persisted models are checked against the layout instead.

use serde::{Deserialize, Serialize};

use super::attributes::EmployeeAttributes;
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::constants::DEFAULT_SALARY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [i64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from individual features, in layout order
    pub fn new(tenure_years: i64, salary: i64, performance_score: i64, absence_count: i64) -> Self {
        Self {
            values: [tenure_years, salary, performance_score, absence_count],
        }
    }

    pub fn as_array(&self) -> &[i64; FEATURE_COUNT] {
        &self.values
    }

    pub fn performance_score(&self) -> i64 {
        self.values[2]
    }

    /// Model input
    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.values.map(|v| v as f64)
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<i64> {
        super::layout::feature_index(name).map(|i| self.values[i])
    }

    /// Named values for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::Value::Object(
            FEATURE_LAYOUT
                .iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(*value)))
                .collect(),
        )
    }
}

/// Map raw attributes onto the feature layout.
///
/// Total over its domain: missing numeric fields become 0 except salary
/// (30000), and missing or unrecognized performance becomes score 1.
pub fn derive_features(attrs: &EmployeeAttributes) -> FeatureVector {
    FeatureVector::new(
        attrs.tenure_years.unwrap_or(0),
        attrs.salary.unwrap_or(DEFAULT_SALARY),
        attrs.performance_score(),
        attrs.absence_count.unwrap_or(0),
    )
}
