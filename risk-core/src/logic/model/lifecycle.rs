//! Startup lifecycle: load the cached model or train a new one

use std::path::Path;

use serde::Serialize;

use super::inference::{RiskModel, TrainerConfig};
use super::storage::{load_model, save_model};
use crate::error::{Result, RiskError, SourceError};
use crate::logic::features::EmployeeAttributes;
use crate::logic::training::build_training_table;

/// Read access to the employee records used for training
pub trait EmployeeSource {
    fn all_employees(&self) -> std::result::Result<Vec<EmployeeAttributes>, SourceError>;
}

impl EmployeeSource for [EmployeeAttributes] {
    fn all_employees(&self) -> std::result::Result<Vec<EmployeeAttributes>, SourceError> {
        Ok(self.to_vec())
    }
}

impl EmployeeSource for Vec<EmployeeAttributes> {
    fn all_employees(&self) -> std::result::Result<Vec<EmployeeAttributes>, SourceError> {
        Ok(self.clone())
    }
}

/// Why a model was trained instead of loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RetrainReason {
    Forced,
    Missing,
    /// The artifact existed but was rejected
    Invalid(String),
}

/// How the running model was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum ModelOrigin {
    Loaded,
    Trained { cause: RetrainReason },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Bypass the cached artifact unconditionally
    pub force_retrain: bool,
    pub trainer: TrainerConfig,
}

/// Load-or-train startup hook.
///
/// A readable, layout-compatible artifact at `path` is reused. Anything else
/// (absent, corrupt, stale) leads to a retrain whose result overwrites the
/// artifact. Source and save failures are returned to the caller.
pub fn initialize_risk_model<S>(
    path: &Path,
    source: &S,
    options: &InitOptions,
) -> Result<(RiskModel, ModelOrigin)>
where
    S: EmployeeSource + ?Sized,
{
    let cause = if options.force_retrain {
        log::info!("Forced retrain requested, ignoring {}", path.display());
        RetrainReason::Forced
    } else if !path.exists() {
        log::info!("No risk model at {}, training a new one", path.display());
        RetrainReason::Missing
    } else {
        match load_model(path) {
            Ok(model) => return Ok((model, ModelOrigin::Loaded)),
            Err(e) => {
                log::warn!("Discarding risk model at {}: {}", path.display(), e);
                RetrainReason::Invalid(e.to_string())
            }
        }
    };

    let model = retrain_and_save(path, source, &options.trainer)?;
    Ok((model, ModelOrigin::Trained { cause }))
}

/// Build a table from `source`, fit, and overwrite the artifact
pub fn retrain_and_save<S>(path: &Path, source: &S, trainer: &TrainerConfig) -> Result<RiskModel>
where
    S: EmployeeSource + ?Sized,
{
    let employees = source.all_employees().map_err(RiskError::Source)?;
    let table = build_training_table(&employees);
    let model = RiskModel::train(&table, trainer)?;
    save_model(&model, path)?;
    Ok(model)
}
