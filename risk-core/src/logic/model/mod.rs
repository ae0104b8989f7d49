//! Model Module - Payroll Risk Classifier
//!
//! Forest internals are kept apart from the training/inference contract
//! and from persistence, so the classifier can be swapped without touching
//! the startup lifecycle.

pub mod tree;
pub mod forest;
pub mod inference;
pub mod storage;
pub mod lifecycle;

// Re-export common types
pub use forest::{ForestConfig, RandomForest};
pub use inference::{predict, train, ModelMetadata, Prediction, RiskModel, TrainerConfig};
pub use lifecycle::{initialize_risk_model, retrain_and_save, EmployeeSource, InitOptions, ModelOrigin, RetrainReason};
pub use storage::{load_model, save_model, ARTIFACT_FORMAT_VERSION};
