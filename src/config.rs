//! Configuration types for jobtrace
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Load batch job summaries and log exports into SQLite
#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobtrace",
    version,
    about = "Load batch job summaries and log exports into SQLite",
    long_about = "Reads JSON job-execution summaries and CSV application log exports and \
                  loads them into two SQLite tables (batch, log) keyed by a UUID-shaped \
                  correlation id extracted from the job name or log message.\n\n\
                  Both tables are dropped and recreated on every run.",
    after_help = "EXAMPLES:\n    \
        jobtrace --input-file-batch jobs.json\n    \
        jobtrace --input-file-batch a.json --input-file-batch b.json --database runs.db\n    \
        jobtrace --input-file-batch jobs.json --input-file-logs logs.csv --debug"
)]
pub struct CliArgs {
    /// Input JSON file with batch job summaries (can be repeated)
    #[arg(long = "input-file-batch", value_name = "FILE", action = clap::ArgAction::Append)]
    pub input_file_batch: Vec<PathBuf>,

    /// Input CSV file with application log exports (can be repeated)
    #[arg(long = "input-file-logs", value_name = "FILE", action = clap::ArgAction::Append)]
    pub input_file_logs: Vec<PathBuf>,

    /// SQLite database location
    #[arg(long, default_value = "status.db", value_name = "FILE")]
    pub database: PathBuf,

    /// Show debug messages
    #[arg(long)]
    pub debug: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// JSON summary inputs, ingested first
    pub summary_inputs: Vec<PathBuf>,

    /// CSV log inputs, ingested after all summaries
    pub log_inputs: Vec<PathBuf>,

    /// SQLite database path
    pub database_path: PathBuf,

    /// Debug logging
    pub debug: bool,
}

impl IngestConfig {
    /// Create and validate configuration from CLI arguments
    ///
    /// Summary inputs are checked for existence up front so a typo fails
    /// before any table is dropped. Log inputs are opened lazily during
    /// ingestion and are not pre-validated.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        for path in &args.input_file_batch {
            if !path.exists() {
                return Err(ConfigError::InputFileMissing { path: path.clone() });
            }
        }

        // Validate database path
        if let Some(parent) = args.database.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidDatabasePath {
                    path: args.database.clone(),
                    reason: format!("Parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        Ok(Self {
            summary_inputs: args.input_file_batch,
            log_inputs: args.input_file_logs,
            database_path: args.database,
            debug: args.debug,
        })
    }
}
