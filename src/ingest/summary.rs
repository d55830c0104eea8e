//! Summary ingestion path: JSON job-execution reports
//!
//! Reads the whole stream into memory, deserializes the fixed document
//! shape, and loads one row per job summary. A job name without a
//! correlation id aborts the file: every `batch` row must carry one, and a
//! name that lacks it means the input itself is malformed.

use crate::db::RowWriter;
use crate::error::IngestResult;
use crate::ingest::model::{BatchRow, SummaryFile};
use std::io::Read;
use tracing::{info, warn};

/// Ingest one summary document into the `batch` table
///
/// Returns the number of job records read from the document. Records whose
/// insert fails are logged and skipped but still counted as read.
pub fn ingest_summaries<R: Read>(mut input: R, writer: &mut RowWriter) -> IngestResult<usize> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;
    let document: SummaryFile = serde_json::from_slice(&raw)?;

    info!(records = document.job_summary_list.len(), "Read batch records");

    for summary in &document.job_summary_list {
        let row = BatchRow::from_summary(summary)?;
        if let Err(e) = writer.insert_job(&row) {
            if e.is_row_error() {
                warn!(job_id = %summary.job_id, error = %e, "Skipping batch record that failed to insert");
            } else {
                return Err(e.into());
            }
        }
    }

    Ok(document.job_summary_list.len())
}
