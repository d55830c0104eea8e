//! Per-row SQLite writer
//!
//! Each insert runs inside its own transaction: begin, prepare, execute,
//! commit. Store-level failures (begin, prepare, commit) surface as the
//! fatal `DbError::Sqlite`; only the execute step maps to the recoverable
//! `DbError::RowInsert`, which callers log and skip.

use crate::error::{DbError, DbResult};
use crate::ingest::model::{BatchRow, LogRow};
use rusqlite::{params, Connection};

const INSERT_BATCH: &str = "INSERT INTO batch \
    (external_id, correlation_id, name, created, started, stopped, status, status_reason) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const INSERT_LOG: &str =
    "INSERT INTO log (correlation_id, ts, service, thread) VALUES (?1, ?2, ?3, ?4)";

/// Writer that owns the database connection for the lifetime of a run
pub struct RowWriter {
    conn: Connection,
}

impl RowWriter {
    /// Wrap an open connection whose schema has already been created
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert one batch summary row in an isolated transaction
    pub fn insert_job(&mut self, row: &BatchRow) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_BATCH)?;
            stmt.execute(params![
                row.external_id,
                row.correlation_id,
                row.name,
                row.created,
                row.started,
                row.stopped,
                row.status,
                row.status_reason,
            ])
            .map_err(DbError::RowInsert)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert one log row in an isolated transaction
    pub fn insert_log(&mut self, row: &LogRow) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_LOG)?;
            stmt.execute(params![row.correlation_id, row.ts, row.service, row.thread])
                .map_err(DbError::RowInsert)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Close the connection, surfacing any close failure
    ///
    /// Only called on the normal exit path. On an error path the writer is
    /// dropped instead and the connection closes silently, so a close
    /// failure can never mask an earlier, more meaningful error.
    pub fn finish(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, e)| DbError::Close(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use chrono::DateTime;

    fn writer() -> RowWriter {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_database(&conn).unwrap();
        RowWriter::new(conn)
    }

    fn batch_row() -> BatchRow {
        BatchRow {
            external_id: "j1".into(),
            correlation_id: "c86a5ae7-3d84-405e-be0d-5936bbb18ab3".into(),
            name: "run-c86a5ae7-3d84-405e-be0d-5936bbb18ab3".into(),
            created: DateTime::from_timestamp_millis(1000).unwrap(),
            started: DateTime::from_timestamp_millis(2000).unwrap(),
            stopped: DateTime::from_timestamp_millis(3000).unwrap(),
            status: "SUCCEEDED".into(),
            status_reason: String::new(),
        }
    }

    #[test]
    fn test_insert_job_commits_one_row() {
        let mut writer = writer();
        writer.insert_job(&batch_row()).unwrap();

        let count: i64 = writer
            .conn
            .query_row("SELECT COUNT(*) FROM batch", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_insert_log_allows_empty_correlation_id() {
        let mut writer = writer();
        writer
            .insert_log(&LogRow {
                correlation_id: String::new(),
                ts: DateTime::from_timestamp_millis(0).unwrap(),
                service: "worker".into(),
                thread: "thread-1".into(),
            })
            .unwrap();

        let id: String = writer
            .conn
            .query_row("SELECT correlation_id FROM log", [], |row| row.get(0))
            .unwrap();
        assert_eq!(id, "");
    }

    #[test]
    fn test_timestamps_round_trip() {
        let mut writer = writer();
        let row = batch_row();
        writer.insert_job(&row).unwrap();

        let created: DateTime<chrono::Utc> = writer
            .conn
            .query_row("SELECT created FROM batch", [], |r| r.get(0))
            .unwrap();
        assert_eq!(created, row.created);
    }

    #[test]
    fn test_finish_closes_cleanly() {
        let writer = writer();
        writer.finish().unwrap();
    }
}
