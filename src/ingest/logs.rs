//! Log ingestion path: CSV application log exports
//!
//! Expected input content:
//!
//! ```text
//! date,Service,@thread_name,message
//! 2021-12-11T06:25:15.107Z,worker,thread-1,Submitting job [c86a5ae7-3d84-405e-be0d-5936bbb18ab3] to Batch
//! ```
//!
//! Columns are located by header name, order-independent; extra columns are
//! ignored. Timestamps must match the export format exactly: a mismatch
//! means upstream corruption, so it aborts the file instead of being
//! skipped like a per-row insert failure.

use crate::db::RowWriter;
use crate::error::{IngestError, IngestResult};
use crate::ingest::correlation_id;
use crate::ingest::model::LogRow;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use std::io::Read;
use tracing::{info, warn};

const FIELD_DATE: &str = "date";
const FIELD_SERVICE: &str = "Service";
const FIELD_THREAD: &str = "@thread_name";
const FIELD_MESSAGE: &str = "message";

/// Exact timestamp pattern of the log export's date column
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Positions of the four required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    service: usize,
    thread: usize,
    message: usize,
}

impl ColumnMap {
    fn from_header(header: &StringRecord) -> IngestResult<Self> {
        Ok(Self {
            date: column_index(header, FIELD_DATE)?,
            service: column_index(header, FIELD_SERVICE)?,
            thread: column_index(header, FIELD_THREAD)?,
            message: column_index(header, FIELD_MESSAGE)?,
        })
    }
}

fn column_index(header: &StringRecord, column: &'static str) -> IngestResult<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| IngestError::MissingColumn {
            column,
            header: header.iter().map(str::to_string).collect(),
        })
}

fn parse_timestamp(value: &str, row: usize) -> IngestResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|source| IngestError::InvalidTimestamp {
            row,
            value: value.to_string(),
            source,
        })
}

/// Ingest one log export into the `log` table
///
/// Returns the number of data rows read (header excluded). Rows whose
/// insert fails are logged and skipped but still counted as read.
pub fn ingest_logs<R: Read>(input: R, writer: &mut RowWriter) -> IngestResult<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let columns = ColumnMap::from_header(reader.headers()?)?;

    let mut rows = 0usize;
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based row number in the file; the header is row 1
        let row_number = index + 2;

        let raw_ts = record.get(columns.date).unwrap_or_default();
        let ts = parse_timestamp(raw_ts, row_number)?;

        let message = record.get(columns.message).unwrap_or_default();
        let row = LogRow {
            correlation_id: correlation_id(message).unwrap_or_default().to_string(),
            ts,
            service: record.get(columns.service).unwrap_or_default().to_string(),
            thread: record.get(columns.thread).unwrap_or_default().to_string(),
        };

        rows += 1;
        if let Err(e) = writer.insert_log(&row) {
            if e.is_row_error() {
                warn!(row = row_number, error = %e, "Skipping log row that failed to insert");
            } else {
                return Err(e.into());
            }
        }
    }

    info!(rows, "Read log records");
    Ok(rows)
}
