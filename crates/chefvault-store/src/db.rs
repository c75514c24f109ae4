//! Database connection management
//!
//! Opening, per-connection pragmas, checkpointing and row counts. Pragmas
//! are session state in SQLite: `configure` must run on every connection
//! the catalog opens, including the one reopened after a restore.

use crate::errors::{from_rusqlite, Result};
use crate::migrations::embedded::{RECIPES_TABLE, RECIPE_TAGS_TABLE, TAGS_TABLE};
use chefvault_core::CatalogCounts;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Open a SQLite database at the given path, creating it if missing
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open an existing database without write access
pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(from_rusqlite)
}

/// Configure a connection: referential integrity and durability mode
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "journal mode set");

    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Whether foreign key enforcement is active on this connection
pub fn foreign_keys_enabled(conn: &Connection) -> Result<bool> {
    let enabled: i64 = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .map_err(from_rusqlite)?;
    Ok(enabled == 1)
}

/// Flush the write-ahead log into the main database file
///
/// A busy checkpoint is not an error: the online backup that follows reads
/// a consistent snapshot regardless, it only means the main file alone is
/// not yet up to date.
pub fn checkpoint(conn: &Connection) -> Result<()> {
    let (busy, log_frames, checkpointed): (i64, i64, i64) = conn
        .query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .map_err(from_rusqlite)?;

    if busy != 0 {
        tracing::warn!(log_frames, checkpointed, "checkpoint could not complete");
    } else {
        tracing::debug!(log_frames, checkpointed, "checkpoint complete");
    }
    Ok(())
}

/// File behind the `main` schema; `None` for an in-memory database
pub fn main_file(conn: &Connection) -> Result<Option<PathBuf>> {
    let file: String = conn
        .query_row(
            "SELECT file FROM pragma_database_list WHERE name = 'main'",
            [],
            |row| row.get::<_, Option<String>>(0).map(Option::unwrap_or_default),
        )
        .map_err(from_rusqlite)?;
    Ok((!file.is_empty()).then(|| PathBuf::from(file)))
}

/// Count rows in the three structural tables
pub fn catalog_counts(conn: &Connection) -> Result<CatalogCounts> {
    Ok(CatalogCounts {
        recipes: count_rows(conn, RECIPES_TABLE)?,
        tags: count_rows(conn, TAGS_TABLE)?,
        recipe_tags: count_rows(conn, RECIPE_TAGS_TABLE)?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    // Table names come from the embedded schema, never from input
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .map_err(from_rusqlite)
}
