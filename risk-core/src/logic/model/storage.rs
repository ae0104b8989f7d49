//! Model artifact persistence
//!
//! The artifact is a JSON envelope around the serialized forest. The envelope
//! records the feature layout the model was trained against and a SHA-256 of
//! the forest payload, so stale or damaged files are refused at load time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::forest::RandomForest;
use super::inference::{ModelMetadata, RiskModel};
use crate::error::{Result, RiskError};
use crate::logic::features::layout::{validate_layout, FEATURE_COUNT};

/// Envelope format version
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub metadata: ModelMetadata,
    /// Lowercase hex SHA-256 of `payload`
    pub checksum: String,
    /// Serialized `RandomForest`
    pub payload: String,
}

impl ModelArtifact {
    pub fn from_model(model: &RiskModel) -> Result<Self> {
        let payload = serde_json::to_string(model.forest())?;

        Ok(Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            metadata: model.metadata().clone(),
            checksum: payload_checksum(&payload),
            payload,
        })
    }

    /// Validate the envelope and rebuild the model
    pub fn into_model(self) -> Result<RiskModel> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(RiskError::UnsupportedFormat {
                expected: ARTIFACT_FORMAT_VERSION,
                found: self.format_version,
            });
        }

        validate_layout(self.metadata.feature_version, self.metadata.layout_hash)?;

        let actual = payload_checksum(&self.payload);
        if actual != self.checksum {
            return Err(RiskError::ChecksumMismatch {
                expected: self.checksum,
                actual,
            });
        }

        let forest: RandomForest = serde_json::from_str(&self.payload)?;
        if forest.n_features() != FEATURE_COUNT {
            return Err(RiskError::CorruptArtifact(format!(
                "forest expects {} features, layout has {}",
                forest.n_features(),
                FEATURE_COUNT
            )));
        }
        forest.validate().map_err(RiskError::CorruptArtifact)?;

        Ok(RiskModel::from_parts(self.metadata, forest))
    }
}

pub fn payload_checksum(payload: &str) -> String {
    hex::encode(Sha256::digest(payload.as_bytes()))
}

/// Save model to disk, replacing any previous artifact
pub fn save_model(model: &RiskModel, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let artifact = ModelArtifact::from_model(model)?;
    let json = serde_json::to_vec_pretty(&artifact)?;

    // Readers only ever see the old file or the complete new one
    let staging = staging_path(path);
    fs::write(&staging, json)?;
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    log::info!("Saved risk model to {}", path.display());
    Ok(())
}

/// Sibling file the artifact is written to before being renamed into place
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load model from disk with validation
pub fn load_model(path: &Path) -> Result<RiskModel> {
    let data = fs::read(path)?;
    let artifact: ModelArtifact = serde_json::from_slice(&data)?;
    let model = artifact.into_model()?;

    log::info!(
        "Loaded risk model from {} (trained {}, {} rows)",
        path.display(),
        model.metadata().trained_at,
        model.metadata().training_rows
    );
    Ok(model)
}
