//! Configuration module

use std::env;
use std::path::PathBuf;

use payroll_risk_core::constants::{default_model_path, DEFAULT_MODEL_SEED, DEFAULT_N_TREES};
use payroll_risk_core::TrainerConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file holding the employee documents
    pub database_path: PathBuf,

    /// Risk model artifact
    pub model_path: PathBuf,

    /// Trees in the risk forest
    pub n_trees: usize,

    /// Seed for model training
    pub model_seed: u64,

    /// Ignore the cached artifact at startup
    pub force_retrain: bool,

    /// Populate empty collections with sample records
    pub seed_sample_data: bool,

    /// Fixed seed for sample data (random when unset)
    pub sample_data_seed: Option<u64>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("hr_risk.sqlite3")),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_model_path),

            n_trees: lookup("RISK_MODEL_TREES")
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_N_TREES),

            model_seed: lookup("RISK_MODEL_SEED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MODEL_SEED),

            force_retrain: lookup("FORCE_RETRAIN")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(false),

            seed_sample_data: lookup("SEED_SAMPLE_DATA")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),

            sample_data_seed: lookup("SAMPLE_DATA_SEED").and_then(|v| v.parse().ok()),

            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }

    pub fn trainer(&self) -> TrainerConfig {
        TrainerConfig {
            n_trees: self.n_trees,
            seed: self.model_seed,
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
