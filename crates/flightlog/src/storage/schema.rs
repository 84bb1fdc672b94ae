//! `SQLite` schema definitions for flightlog.
//!
//! Collections are stored as opaque JSON blobs under a logical key. The
//! blobs carry no version; older documents are read with missing fields
//! defaulted, so the table layout is the only schema there is.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the entries table.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_ENTRIES_TABLE];

/// Create all tables if missing.
///
/// # Errors
///
/// Returns an error if a creation statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
