//! Schema introspection
//!
//! Uses the table-valued `pragma_table_info` function so table and column
//! names are bound as parameters instead of spliced into SQL.

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;

/// Whether a table with this exact name exists
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [table],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(exists == 1)
}

/// Whether `table` has a column named `column`
///
/// A missing table has no columns.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(count > 0)
}

/// Names from `required` that are not tables in this database
pub fn missing_tables<'a>(conn: &Connection, required: &[&'a str]) -> Result<Vec<&'a str>> {
    let mut missing = Vec::new();
    for table in required {
        if !table_exists(conn, table)? {
            missing.push(*table);
        }
    }
    Ok(missing)
}
