//! Schema runner
//!
//! Creates missing tables and adds missing columns. Never drops or rewrites
//! anything, so it is safe to run on every open regardless of schema age.

use crate::errors::{from_rusqlite, Result};
use crate::migrations::embedded::{additive_columns, base_tables};
use crate::migrations::introspection::column_exists;
use rusqlite::Connection;

/// Bring the database up to the current schema
///
/// Runs in one transaction: either every missing table and column is
/// created or none is.
///
/// # Errors
/// Returns a `Persistence` error if any DDL statement fails.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    observed!("ensure_schema", ensure_schema_impl(conn))
}

fn ensure_schema_impl(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;

    for table in base_tables() {
        tx.execute_batch(table.sql).map_err(from_rusqlite)?;
        tracing::debug!(table = table.name, "table ensured");
    }

    let mut added = 0usize;
    for column in additive_columns() {
        if column_exists(&tx, column.table, column.column)? {
            continue;
        }
        tx.execute_batch(&format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            column.table, column.column, column.definition
        ))
        .map_err(from_rusqlite)?;
        tracing::debug!(
            table = column.table,
            column = column.column,
            "added column"
        );
        added += 1;
    }

    tx.commit().map_err(from_rusqlite)?;

    if added > 0 {
        tracing::info!(columns_added = added, "schema upgraded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(ensure_schema(&mut conn).is_ok());
    }

    #[test]
    fn test_idempotency() {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        assert!(ensure_schema(&mut conn).is_ok());
    }
}
