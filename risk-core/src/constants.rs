//! Central Configuration Constants
//!
//! Single source of truth for the scoring defaults.
//! Host applications override the model knobs through `TrainerConfig`.

use std::path::PathBuf;

/// Number of trees in the risk forest
pub const DEFAULT_N_TREES: usize = 50;

/// Random seed used for bootstrap sampling and feature shuffling
pub const DEFAULT_MODEL_SEED: u64 = 42;

/// Below this many derived rows the fallback table is used instead
pub const MIN_TRAINING_ROWS: usize = 5;

// ============================================
// Attribute defaults (applied by the deriver)
// ============================================

/// Salary assumed when an employee record has none
pub const DEFAULT_SALARY: i64 = 30_000;

/// Score for a missing or unrecognized performance label ("Average")
pub const DEFAULT_PERFORMANCE_SCORE: i64 = 1;

/// Absences at or above this count mark an employee at-risk
pub const ABSENCE_RISK_THRESHOLD: i64 = 5;

/// Performance scores at or below this value mark an employee at-risk
pub const PERFORMANCE_RISK_CEILING: i64 = 0;

// ============================================
// Artifact location
// ============================================

/// App directory name under the platform data dir
pub const APP_DIR: &str = "hr-risk";

/// Artifact file name
pub const MODEL_FILE_NAME: &str = "payroll_risk_model.json";

/// Default artifact path
pub fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(MODEL_FILE_NAME)
}
