//! Feature layout shared by training, inference and persisted models.
//!
//! Any change to `FEATURE_LAYOUT` (new feature, reorder, removal) must bump
//! `FEATURE_VERSION`. Artifacts store both the version and a CRC32 of the
//! layout; either one differing makes the artifact unusable.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Bump on every layout change
pub const FEATURE_VERSION: u8 = 1;

/// Column order of `FeatureVector`
pub const FEATURE_LAYOUT: &[&str] = &[
    "tenure_years",      // years with the company
    "salary",            // annual salary
    "performance_score", // Excellent=3 .. Below Average=0
    "absence_count",     // recorded absences
];

pub const FEATURE_COUNT: usize = 4;

/// CRC32 over the version byte and NUL-terminated feature names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Running layout, as reported to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub features: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            features: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A persisted model was built for another layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "feature layout v{} ({:08x}) does not match running v{} ({:08x})",
            self.actual_version, self.actual_hash, self.expected_version, self.expected_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    let expected_hash = layout_hash();
    if version == FEATURE_VERSION && hash == expected_hash {
        return Ok(());
    }

    Err(LayoutMismatchError {
        expected_version: FEATURE_VERSION,
        expected_hash,
        actual_version: version,
        actual_hash: hash,
    })
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}
