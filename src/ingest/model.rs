//! Input schema types and their normalized row forms
//!
//! The serde types mirror the fixed summary document schema: unknown fields
//! are ignored and missing fields default to the zero value of their type.

use crate::error::IngestError;
use crate::ingest::correlation_id;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level summary document: a single array of job summaries
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryFile {
    pub job_summary_list: Vec<JobSummary>,
}

/// One batch compute job as reported by the summary export
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: String,
    pub job_name: String,
    pub created_at: i64,
    pub started_at: i64,
    pub stopped_at: i64,
    pub status: String,
    pub status_reason: String,
    pub container: ContainerDetail,
}

/// Container section of a job summary
///
/// The exit code is part of the fixed input schema but is not persisted.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerDetail {
    pub exit_code: i64,
}

/// Normalized `batch` table row
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub external_id: String,
    pub correlation_id: String,
    pub name: String,
    pub created: DateTime<Utc>,
    pub started: DateTime<Utc>,
    pub stopped: DateTime<Utc>,
    pub status: String,
    pub status_reason: String,
}

impl BatchRow {
    /// Normalize a job summary into its persisted form
    ///
    /// Fails if the job name carries no correlation id (every batch row
    /// must have one) or if an epoch-millisecond field cannot be
    /// represented as a timestamp.
    pub fn from_summary(summary: &JobSummary) -> Result<Self, IngestError> {
        let correlation_id = correlation_id(&summary.job_name).ok_or_else(|| {
            IngestError::MissingCorrelationId {
                job_name: summary.job_name.clone(),
            }
        })?;

        Ok(Self {
            external_id: summary.job_id.clone(),
            correlation_id: correlation_id.to_string(),
            name: summary.job_name.clone(),
            created: from_epoch_millis(summary.created_at)?,
            started: from_epoch_millis(summary.started_at)?,
            stopped: from_epoch_millis(summary.stopped_at)?,
            status: summary.status.clone(),
            status_reason: summary.status_reason.clone(),
        })
    }
}

/// Normalized `log` table row
#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    /// Correlation id extracted from the message; empty when absent
    pub correlation_id: String,
    pub ts: DateTime<Utc>,
    pub service: String,
    pub thread: String,
}

fn from_epoch_millis(millis: i64) -> Result<DateTime<Utc>, IngestError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or(IngestError::TimestampOutOfRange { millis })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(job_name: &str) -> JobSummary {
        JobSummary {
            job_id: "j1".into(),
            job_name: job_name.into(),
            created_at: 1000,
            started_at: 2000,
            stopped_at: 3000,
            status: "SUCCEEDED".into(),
            status_reason: String::new(),
            container: ContainerDetail::default(),
        }
    }

    #[test]
    fn test_from_summary_extracts_correlation_id() {
        let row =
            BatchRow::from_summary(&summary("run-c86a5ae7-3d84-405e-be0d-5936bbb18ab3")).unwrap();
        assert_eq!(row.external_id, "j1");
        assert_eq!(row.correlation_id, "c86a5ae7-3d84-405e-be0d-5936bbb18ab3");
        assert_eq!(row.created, DateTime::from_timestamp_millis(1000).unwrap());
        assert_eq!(row.stopped, DateTime::from_timestamp_millis(3000).unwrap());
    }

    #[test]
    fn test_from_summary_requires_correlation_id() {
        let err = BatchRow::from_summary(&summary("nightly-report")).unwrap_err();
        assert!(matches!(err, IngestError::MissingCorrelationId { .. }));
    }

    #[test]
    fn test_from_summary_rejects_out_of_range_epoch() {
        let mut s = summary("run-c86a5ae7-3d84-405e-be0d-5936bbb18ab3");
        s.created_at = i64::MAX;
        let err = BatchRow::from_summary(&s).unwrap_err();
        assert!(matches!(err, IngestError::TimestampOutOfRange { .. }));
    }

    #[test]
    fn test_summary_document_missing_fields_default() {
        let document: SummaryFile = serde_json::from_str(
            r#"{"jobSummaryList":[{"jobId":"j1","jobName":"n"}]}"#,
        )
        .unwrap();
        let job = &document.job_summary_list[0];
        assert_eq!(job.created_at, 0);
        assert_eq!(job.status, "");
        assert_eq!(job.container.exit_code, 0);
    }

    #[test]
    fn test_summary_document_unknown_fields_ignored() {
        let document: SummaryFile = serde_json::from_str(
            r#"{"jobSummaryList":[{"jobId":"j1","jobQueue":"default","container":{"exitCode":1,"image":"app:latest"}}]}"#,
        )
        .unwrap();
        assert_eq!(document.job_summary_list[0].container.exit_code, 1);
    }

    #[test]
    fn test_empty_document_defaults_to_no_jobs() {
        let document: SummaryFile = serde_json::from_str("{}").unwrap();
        assert!(document.job_summary_list.is_empty());
    }
}
