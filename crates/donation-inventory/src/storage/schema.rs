//! `SQLite` schema for the slot store.
//!
//! Only the table layout is versioned. The JSON stored inside a slot is opaque
//! here.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

/// Layout version written to `metadata` by this build.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// SQL statement to create the slots table.
pub const CREATE_SLOTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_SLOTS_TABLE, CREATE_METADATA_TABLE];

/// Create the tables if needed and stamp the layout version.
///
/// # Errors
///
/// Returns [`Error::DatabaseMigration`] if the file records a version this
/// build cannot read, or a query error if the statements fail.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match stored {
        None => {
            conn.execute(
                "INSERT INTO metadata (key, value) VALUES (?1, ?2)",
                (VERSION_KEY, CURRENT_VERSION.to_string()),
            )?;
            Ok(())
        }
        Some(value) => match value.parse::<i32>() {
            Ok(version) if version <= CURRENT_VERSION => Ok(()),
            Ok(version) => Err(Error::DatabaseMigration {
                message: format!(
                    "slot database has layout version {version}, newer than supported {CURRENT_VERSION}"
                ),
            }),
            Err(_) => Err(Error::DatabaseMigration {
                message: format!("invalid schema version: {value}"),
            }),
        },
    }
}
