//! Restore of the live store from a backup file

use super::{pre_restore_path, remove_sidecars, same_file};
use crate::catalog::Catalog;
use crate::db;
use crate::errors::{empty_file, invalid_input, io_error, missing_tables, Result};
use crate::migrations;
use crate::migrations::embedded::REQUIRED_TABLES;
use chefvault_core::CatalogCounts;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pause between replacing the live file and reopening it
pub const RESTORE_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Outcome of a completed restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    /// The backup file that was restored
    pub source: PathBuf,
    /// Copy of the previous live store, if one could be taken
    pub safety_copy: Option<PathBuf>,
    /// Row counts of the reopened store
    pub counts: CatalogCounts,
}

/// Replace the catalog's live store with the backup at `source`
///
/// The source is validated before the live store is touched. The previous
/// live file is copied to `<live>.pre_restore` (best-effort) and is never
/// removed automatically. If overwriting fails, the safety copy is put back.
/// In every case after the handle is closed, the catalog is reopened with
/// its pragmas and schema reapplied before this returns.
///
/// # Errors
/// - `InvalidInput` for an in-memory catalog or a source that is the live file
/// - `Io` if the source is unreadable or the overwrite fails
/// - `EmptyFile` for a zero-length source
/// - `Persistence` if the source is not a database
/// - `MissingTable` if the source lacks a structural table
pub fn restore(catalog: &mut Catalog, source: &Path) -> Result<RestoreReport> {
    observed!(
        "restore",
        [source = %source.display()],
        restore_impl(catalog, source, |from: &Path, to: &Path| fs::copy(from, to))
    )
}

fn restore_impl<F>(catalog: &mut Catalog, source: &Path, overwrite: F) -> Result<RestoreReport>
where
    F: FnOnce(&Path, &Path) -> io::Result<u64>,
{
    let live = catalog
        .path()
        .map(Path::to_path_buf)
        .ok_or_else(|| invalid_input("restore", "An in-memory catalog cannot be restored"))?;

    validate_source(source, &live)?;

    // Flush the WAL so the safety copy is the complete live state.
    db::checkpoint(catalog.conn()?)?;
    catalog.close()?;

    let safety = pre_restore_path(&live);
    let safety_copy = match fs::copy(&live, &safety) {
        Ok(_) => Some(safety),
        Err(e) => {
            tracing::warn!(path = %safety.display(), error = %e, "could not take safety copy");
            None
        }
    };

    remove_sidecars(&live);
    if let Err(e) = overwrite(source, &live) {
        let err = io_error("restore_copy", e).with_entity_id(live.display().to_string());
        let err = match rollback(safety_copy.as_deref(), &live) {
            Ok(()) => err,
            Err(rollback_err) => err.with_source(rollback_err),
        };
        if let Err(reopen_err) = catalog.reopen() {
            tracing::error!(error = %reopen_err, "could not reopen store after failed restore");
        }
        return Err(err);
    }

    std::thread::sleep(RESTORE_SETTLE_DELAY);
    catalog.reopen()?;
    let counts = catalog.counts()?;
    tracing::info!(counts = %counts, "restore complete");

    Ok(RestoreReport {
        source: source.to_path_buf(),
        safety_copy,
        counts,
    })
}

/// Check that `source` is a non-empty, readable catalog other than `live`
fn validate_source(source: &Path, live: &Path) -> Result<()> {
    let metadata = fs::metadata(source)
        .map_err(|e| io_error("restore_validate", e).with_entity_id(source.display().to_string()))?;
    if metadata.len() == 0 {
        return Err(empty_file("restore_validate", source));
    }

    if same_file(source, live) {
        return Err(invalid_input(
            "restore_validate",
            "Backup source is the live store itself",
        )
        .with_entity_id(source.display().to_string()));
    }

    let conn = db::open_read_only(source)
        .map_err(|e| e.with_op("restore_validate").with_entity_id(source.display().to_string()))?;
    let missing = migrations::missing_tables(&conn, &REQUIRED_TABLES)
        .map_err(|e| e.with_op("restore_validate").with_entity_id(source.display().to_string()))?;
    if !missing.is_empty() {
        return Err(missing_tables(source, &missing));
    }
    Ok(())
}

fn rollback(safety_copy: Option<&Path>, live: &Path) -> Result<()> {
    let Some(safety) = safety_copy else {
        tracing::warn!("no safety copy to roll back to");
        return Ok(());
    };
    fs::copy(safety, live).map_err(|e| io_error("restore_rollback", e))?;
    tracing::warn!(path = %live.display(), "restore rolled back from safety copy");
    Ok(())
}
