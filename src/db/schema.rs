//! Database schema definitions and creation
//!
//! This module defines the SQLite schema for the two loaded report formats
//! and provides the function that (re)creates it at startup.
//!
//! The schema is deliberately destructive: both tables are dropped and
//! recreated on every run, so the database always holds exactly the rows
//! from the last invocation. There is no uniqueness constraint on either
//! table; re-ingesting the same file within one run duplicates rows.

use crate::error::DbResult;
use rusqlite::Connection;

/// SQL to (re)create the batch job summary table
const CREATE_BATCH_TABLE: &str = r#"
DROP TABLE IF EXISTS batch;
CREATE TABLE batch (
    external_id TEXT NOT NULL,
    correlation_id TEXT NOT NULL,
    name TEXT NOT NULL,
    created TIMESTAMP,
    started TIMESTAMP,
    stopped TIMESTAMP,
    status TEXT,
    status_reason TEXT
)
"#;

/// SQL to (re)create the application log table
///
/// correlation_id is NOT NULL but may be the empty string: not every log
/// message carries a correlation id.
const CREATE_LOG_TABLE: &str = r#"
DROP TABLE IF EXISTS log;
CREATE TABLE log (
    correlation_id TEXT NOT NULL,
    ts TIMESTAMP,
    service TEXT,
    thread TEXT
)
"#;

/// Drop and recreate both tables on an open connection
///
/// Must run exactly once before any ingestion. Any failure here is fatal;
/// there are no partial-state guarantees beyond "tables may or may not
/// exist".
pub fn create_database(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_BATCH_TABLE)?;
    conn.execute_batch(CREATE_LOG_TABLE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        create_database(&conn).unwrap();

        let tables = table_names(&conn);
        assert!(tables.contains(&"batch".to_string()));
        assert!(tables.contains(&"log".to_string()));
    }

    #[test]
    fn test_recreation_discards_rows() {
        let conn = Connection::open_in_memory().unwrap();
        create_database(&conn).unwrap();

        conn.execute(
            "INSERT INTO batch (external_id, correlation_id, name) VALUES ('j1', 'c1', 'n1')",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO log (correlation_id) VALUES ('c1')", [])
            .unwrap();

        // Re-running the initializer empties both tables
        create_database(&conn).unwrap();

        let batch: i64 = conn
            .query_row("SELECT COUNT(*) FROM batch", [], |row| row.get(0))
            .unwrap();
        let log: i64 = conn
            .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))
            .unwrap();
        assert_eq!(batch, 0);
        assert_eq!(log, 0);
    }
}
