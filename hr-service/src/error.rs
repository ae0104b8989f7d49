//! Error handling

use payroll_risk_core::RiskError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // Database errors
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Risk scoring errors
    #[error(transparent)]
    Risk(#[from] RiskError),
}
