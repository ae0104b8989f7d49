//! Error types for the risk scoring core

use thiserror::Error;

use crate::logic::features::layout::LayoutMismatchError;

/// Result type alias
pub type Result<T> = std::result::Result<T, RiskError>;

/// Boxed error raised by an employee source
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RiskError {
    /// Training was attempted on a table without rows
    #[error("training table is empty")]
    EmptyTrainingTable,

    #[error("{samples} samples but {labels} labels")]
    ShapeMismatch { samples: usize, labels: usize },

    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Artifact was written for a different feature layout
    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("unsupported artifact format v{found} (expected v{expected})")]
    UnsupportedFormat { expected: u32, found: u32 },

    #[error("artifact checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// The employee source could not be read
    #[error("employee source failed: {0}")]
    Source(#[source] SourceError),
}
