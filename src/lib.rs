//! jobtrace - Batch job report and log export loader
//!
//! A small tool that loads two externally-produced report formats into a
//! SQLite database for later correlation queries:
//!
//! - JSON job-execution summaries (a single `jobSummaryList` array of
//!   batch compute job records)
//! - CSV application log exports (header-first, timestamped rows with
//!   service and thread metadata)
//!
//! Each record lands in one of two tables (`batch`, `log`) keyed by a
//! UUID-shaped correlation id extracted from the job name or log message.
//! Both tables are dropped and recreated on every run, so the database
//! always reflects exactly the inputs of the last invocation.
//!
//! # Pipeline
//!
//! ```text
//! summaries.json ──► ingest::summary ──┐
//!                                      ├──► db::RowWriter ──► SQLite (status.db)
//! logs.csv ────────► ingest::logs ─────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! jobtrace --input-file-batch jobs.json --input-file-logs logs.csv
//!
//! # Join the two tables on the extracted correlation id
//! sqlite3 status.db "SELECT b.name, l.ts, l.service \
//!                    FROM batch b JOIN log l USING (correlation_id)"
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod ingest;

pub use config::{CliArgs, IngestConfig};
pub use db::RowWriter;
pub use error::{Result, TraceError};
