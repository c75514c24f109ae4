//! Consistent snapshot export of the live store

use super::{remove_sidecars, same_file, sidecar_paths};
use crate::db;
use crate::errors::{empty_file, from_rusqlite, invalid_input, io_error, Result};
use chefvault_core::CatalogCounts;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name prefix for timestamped backups
pub const BACKUP_FILE_PREFIX: &str = "recipes_backup_";

const PAGES_PER_STEP: i32 = 128;

/// Outcome of a completed backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    /// Where the backup was written
    pub path: PathBuf,
    /// Size of the backup file in bytes
    pub bytes: u64,
    /// Row counts of the live store before copying
    pub baseline: CatalogCounts,
    /// Row counts read back from the backup file
    pub copied: CatalogCounts,
}

impl BackupReport {
    /// Whether the backup holds as many rows as the live store did
    pub fn verified(&self) -> bool {
        self.baseline == self.copied
    }
}

/// `<dir>/recipes_backup_YYYYMMDD_HHMMSS.db` for the current local time
pub fn timestamped_backup_path(dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}{}.db", BACKUP_FILE_PREFIX, stamp))
}

/// Copy the whole live store into a fresh standalone file at `dest`
///
/// Any file already at `dest` is replaced. The copy is made with the
/// online backup API, so a write in flight cannot tear it. A row count that
/// differs from the live store is logged as a warning and reported through
/// [`BackupReport::verified`]; it does not fail the backup.
///
/// # Errors
/// - `InvalidInput` if `dest` is the live store file or one of its sidecars
/// - `Io` if the destination directory or file cannot be prepared
/// - `Persistence` if the page copy fails
/// - `EmptyFile` if the written file has no content
pub fn backup(conn: &Connection, dest: &Path) -> Result<BackupReport> {
    observed!(
        "backup",
        [dest = %dest.display()],
        backup_impl(conn, dest)
    )
}

fn backup_impl(conn: &Connection, dest: &Path) -> Result<BackupReport> {
    reject_live_destination(conn, dest)?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("backup_create_dir", e))?;
    }

    db::checkpoint(conn)?;
    let baseline = db::catalog_counts(conn)?;

    if dest.exists() {
        fs::remove_file(dest).map_err(|e| io_error("backup_remove_existing", e))?;
    }
    remove_sidecars(dest);

    copy_pages(conn, dest)?;

    let bytes = fs::metadata(dest)
        .map_err(|e| io_error("backup_verify", e))?
        .len();
    if bytes == 0 {
        return Err(empty_file("backup_verify", dest));
    }

    let copied = {
        let reader = db::open_read_only(dest)?;
        db::catalog_counts(&reader)?
    };
    if copied != baseline {
        tracing::warn!(
            dest = %dest.display(),
            baseline = %baseline,
            copied = %copied,
            "backup row counts differ from live store"
        );
    }

    Ok(BackupReport {
        path: dest.to_path_buf(),
        bytes,
        baseline,
        copied,
    })
}

/// Refuse a destination that would unlink files the live connection holds open
fn reject_live_destination(conn: &Connection, dest: &Path) -> Result<()> {
    let Some(live) = db::main_file(conn)? else {
        return Ok(());
    };
    let [wal, shm] = sidecar_paths(&live);
    if [live.as_path(), wal.as_path(), shm.as_path()]
        .iter()
        .any(|held| same_file(dest, held))
    {
        return Err(
            invalid_input("backup", "Backup destination is the live store itself")
                .with_entity_id(dest.display().to_string()),
        );
    }
    Ok(())
}

/// Page-level copy of `conn` into a new database file at `dest`
///
/// The copy inherits the live store's WAL flag; it is switched back to a
/// rollback journal so the file stands alone.
fn copy_pages(conn: &Connection, dest: &Path) -> Result<()> {
    let mut target = db::open(dest)?;
    {
        let backup = Backup::new(conn, &mut target).map_err(from_rusqlite)?;
        backup
            .run_to_completion(PAGES_PER_STEP, Duration::ZERO, None)
            .map_err(from_rusqlite)?;
    }

    let mode: String = target
        .pragma_update_and_check(None, "journal_mode", "DELETE", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "backup journal mode");

    target.close().map_err(|(_, e)| from_rusqlite(e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_backup_path_shape() {
        let path = timestamped_backup_path(Path::new("backups"));
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(path.starts_with("backups"));
        assert!(name.starts_with(BACKUP_FILE_PREFIX));
        assert!(name.ends_with(".db"));
        // recipes_backup_ + YYYYMMDD_HHMMSS + .db
        assert_eq!(name.len(), BACKUP_FILE_PREFIX.len() + 15 + 3);
    }

    #[test]
    fn test_report_verified() {
        let counts = CatalogCounts {
            recipes: 2,
            tags: 1,
            recipe_tags: 2,
        };
        let mut report = BackupReport {
            path: PathBuf::from("x.db"),
            bytes: 4096,
            baseline: counts,
            copied: counts,
        };
        assert!(report.verified());

        report.copied.recipes = 1;
        assert!(!report.verified());
    }
}
