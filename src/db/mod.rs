//! Database module for SQLite storage
//!
//! This module owns everything that touches the database:
//! - `schema`: fixed DDL that drops and recreates the two tables at startup
//! - `writer`: per-row inserts, each inside its own committed transaction
//!
//! One row per transaction bounds the blast radius of a single bad record:
//! a failed insert rolls back only itself and the rest of the batch
//! continues. Large inputs therefore produce many small commits; there is
//! no batching.

pub mod schema;
pub mod writer;

pub use schema::create_database;
pub use writer::RowWriter;
