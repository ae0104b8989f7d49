//! Payroll risk scoring core
//!
//! ```text
//! EmployeeAttributes ──derive_features──▶ FeatureVector ──predict──▶ Prediction
//!        │                                     ▲
//!        └──synthesize_label──▶ TrainingTable ─┴─train──▶ RiskModel ◀─▶ artifact
//! ```
//!
//! The host owns the employee store and passes it in as an `EmployeeSource`;
//! `initialize_risk_model` is the only entry point that touches disk.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{Result, RiskError, SourceError};
pub use logic::features::{derive_features, EmployeeAttributes, FeatureVector, LayoutInfo, Performance};
pub use logic::labels::{synthesize_label, HeuristicLabelPolicy, LabelPolicy};
pub use logic::model::{
    initialize_risk_model, load_model, predict, retrain_and_save, save_model, train, EmployeeSource,
    InitOptions, ModelMetadata, ModelOrigin, Prediction, RetrainReason, RiskModel, TrainerConfig,
};
pub use logic::scoring::{annotate, risk_count, score, score_request, RiskAnnotation, RiskSubject, ScoreRequest};
pub use logic::training::{build_training_table, build_training_table_with, TableSource, TrainingRow, TrainingTable};
