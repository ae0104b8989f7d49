//! HR Risk Service
//!
//! Command-line host for the payroll risk model.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     hr-risk CLI                      │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────┐  │
//! │  │  Handlers  │  │  Sample    │  │  Risk model    │  │
//! │  │  (JSON)    │  │  seeding   │  │  (load/train)  │  │
//! │  └─────┬──────┘  └─────┬──────┘  └───────┬────────┘  │
//! │        └───────────────┼─────────────────┘           │
//! │                        ▼                             │
//! │                 ┌─────────────┐                      │
//! │                 │   SQLite    │                      │
//! │                 └─────────────┘                      │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod seed;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use payroll_risk_core::{initialize_risk_model, InitOptions, ModelOrigin, RiskModel, ScoreRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::DocumentStore;

pub use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "hr-risk")]
#[command(about = "HR records and payroll risk scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ignore the saved model and retrain at startup
    #[arg(long, global = true)]
    force_retrain: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// HR dashboard summary with risk predictions
    Dashboard,

    /// Single employee with payroll, attendance and risk
    Employee {
        /// Employee id (e.g., E101)
        id: String,
    },

    /// Score ad-hoc attributes
    Score {
        #[arg(long)]
        tenure: Option<i64>,

        #[arg(long)]
        salary: Option<i64>,

        /// Numeric performance score (0-3)
        #[arg(long)]
        perf_score: Option<i64>,

        #[arg(long)]
        absence: Option<i64>,
    },

    /// Retrain from the store, save, and print the model metadata
    Retrain,
}

/// Application state shared by handlers
pub struct AppState {
    pub store: DocumentStore,
    pub config: Config,
    pub model: Arc<RiskModel>,
    pub origin: ModelOrigin,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env first so RUST_LOG from it reaches the filter
    dotenvy::dotenv().ok();

    // Initialize logging. Stdout carries the JSON output.
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = Config::from_env();
    if cli.force_retrain || matches!(cli.command, Commands::Retrain) {
        config.force_retrain = true;
    }

    tracing::info!("HR risk service starting...");
    tracing::info!("Database: {}", config.database_path.display());
    if config.is_production() && config.sample_data_seed.is_some() {
        tracing::warn!("SAMPLE_DATA_SEED is set in production");
    }

    let state = bootstrap(config).context("Failed to start HR risk service")?;

    match cli.command {
        Commands::Dashboard => print_json(&handlers::dashboard::hr_dashboard(&state)?),
        Commands::Employee { id } => print_json(&handlers::employee::employee_view(&state, &id)?),
        Commands::Score {
            tenure,
            salary,
            perf_score,
            absence,
        } => {
            let request = ScoreRequest {
                tenure,
                salary,
                perf_score,
                absence,
            };
            print_json(&handlers::predict::predict(&state, &request))
        }
        Commands::Retrain => print_json(&handlers::model::model_report(&state)),
    }
}

const DEFAULT_LOG_FILTER: &str = "hr_risk=info,payroll_risk_core=info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Open the store, seed it, and load or train the risk model
fn bootstrap(config: Config) -> AppResult<AppState> {
    let mut store = DocumentStore::open(&config.database_path)?;

    if config.seed_sample_data {
        let mut rng = match config.sample_data_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        seed::seed_sample_data(&mut store, &mut rng)?;
    }

    let options = InitOptions {
        force_retrain: config.force_retrain,
        trainer: config.trainer(),
    };
    let (model, origin) = initialize_risk_model(&config.model_path, &store, &options)?;

    let metadata = model.metadata();
    tracing::info!(
        ?origin,
        rows = metadata.training_rows,
        source = ?metadata.table_source,
        "Risk model ready"
    );

    Ok(AppState {
        store,
        config,
        model: Arc::new(model),
        origin,
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
