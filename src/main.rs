//! jobtrace - Batch job report and log export loader
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use jobtrace::config::{CliArgs, IngestConfig};
use jobtrace::db::{schema, RowWriter};
use jobtrace::ingest;
use rusqlite::Connection;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.debug)?;

    // Validate and create config
    let config = IngestConfig::from_args(args).context("Invalid configuration")?;

    // Open the database and recreate the schema
    let conn = Connection::open(&config.database_path).with_context(|| {
        format!(
            "Failed to open database at '{}'",
            config.database_path.display()
        )
    })?;
    schema::create_database(&conn).context("Failed to initialize database schema")?;
    let mut writer = RowWriter::new(conn);

    // All summary files first, then all log files; each file is fully
    // read, parsed, and loaded before the next begins
    let mut summary_records = 0usize;
    for path in &config.summary_inputs {
        debug!(path = %path.display(), "Ingesting summary file");
        let file = open_input(path)?;
        summary_records += ingest::ingest_summaries(file, &mut writer)
            .with_context(|| format!("Failed to ingest summaries from '{}'", path.display()))?;
    }

    let mut log_rows = 0usize;
    for path in &config.log_inputs {
        debug!(path = %path.display(), "Ingesting log file");
        let file = open_input(path)?;
        log_rows += ingest::ingest_logs(file, &mut writer)
            .with_context(|| format!("Failed to ingest logs from '{}'", path.display()))?;
    }

    // Explicit close on the success path so a close failure is reported
    writer.finish().context("Failed to close database")?;

    info!(
        summaries = summary_records,
        log_rows, "Ingest complete"
    );
    println!(
        "Loaded {} batch record(s) and {} log row(s) into {}",
        summary_records,
        log_rows,
        config.database_path.display()
    );

    Ok(())
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open input file '{}'", path.display()))
}

fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("jobtrace=debug,warn")
    } else {
        EnvFilter::new("jobtrace=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
