//! The long-lived catalog store handle
//!
//! A `Catalog` owns the one connection a front end works through. It is
//! opened once at startup, lent to the repositories as `&Connection`, and
//! closed at shutdown. Restore closes and reopens it in place, so callers
//! keep using the same handle.

use crate::backup::{self, BackupReport, RestoreReport};
use crate::db;
use crate::errors::{from_rusqlite, io_error, store_closed, Result};
use crate::migrations;
use chefvault_core::CatalogCounts;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the live store file
pub const DEFAULT_DB_PATH: &str = "./data/recipes.db";

/// Default directory for timestamped backups
pub const DEFAULT_BACKUP_DIR: &str = "./data/backups";

/// Where the catalog lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub backup_dir: PathBuf,
}

impl CatalogConfig {
    pub fn new(db_path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            backup_dir: backup_dir.into(),
        }
    }

    /// A fresh timestamped path under the backup directory
    pub fn default_backup_path(&self) -> PathBuf {
        backup::timestamped_backup_path(&self.backup_dir)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH, DEFAULT_BACKUP_DIR)
    }
}

/// Open store handle
///
/// `path` is `None` for an in-memory catalog. `conn` is `None` only while
/// closed; every accessor reports `StoreClosed` in that state.
pub struct Catalog {
    path: Option<PathBuf>,
    conn: Option<Connection>,
}

impl Catalog {
    /// Open the store at `config.db_path`, creating it and its directory if
    /// missing, and bring its schema up to date
    ///
    /// # Errors
    /// Any failure here is fatal for a front end: `Io` if the directory
    /// cannot be created, `Persistence` if opening or migrating fails.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        Self::open_path(&config.db_path)
    }

    /// Open the store file at `path`; see [`Catalog::open`]
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        observed!(
            "catalog_open",
            [path = %path.display()],
            Self::open_path_impl(path)
        )
    }

    fn open_path_impl(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error("catalog_create_dir", e))?;
        }
        let conn = connect(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Some(conn),
        })
    }

    /// A throwaway catalog that lives only as long as the handle
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        migrations::ensure_schema(&mut conn)?;
        Ok(Self {
            path: None,
            conn: Some(conn),
        })
    }

    /// The open connection
    ///
    /// # Errors
    /// `StoreClosed` after [`Catalog::close`].
    pub fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(store_closed)
    }

    /// Store file path; `None` for an in-memory catalog
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Row counts across the three structural tables
    pub fn counts(&self) -> Result<CatalogCounts> {
        db::catalog_counts(self.conn()?)
    }

    /// Write a standalone backup of the live store to `dest`
    pub fn backup_to(&self, dest: &Path) -> Result<BackupReport> {
        backup::backup(self.conn()?, dest)
    }

    /// Replace the live store with the backup at `source`
    pub fn restore_from(&mut self, source: &Path) -> Result<RestoreReport> {
        backup::restore(self, source)
    }

    /// Close the connection; closing twice is a no-op
    ///
    /// # Errors
    /// `Persistence` if SQLite refuses to close. The handle stays open then.
    pub fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            if let Err((conn, e)) = conn.close() {
                self.conn = Some(conn);
                return Err(from_rusqlite(e).with_op("catalog_close"));
            }
            tracing::debug!("catalog closed");
        }
        Ok(())
    }

    /// Reopen the store file after it was replaced on disk
    pub(crate) fn reopen(&mut self) -> Result<()> {
        self.close()?;
        let path = self.path.clone().ok_or_else(store_closed)?;
        self.conn = Some(connect(&path)?);
        tracing::debug!(path = %path.display(), "catalog reopened");
        Ok(())
    }
}

/// Open, apply session pragmas and migrate; pragmas do not survive a reopen
fn connect(path: &Path) -> Result<Connection> {
    let mut conn = db::open(path)?;
    db::configure(&conn)?;
    migrations::ensure_schema(&mut conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.backup_dir, PathBuf::from(DEFAULT_BACKUP_DIR));
        assert!(config
            .default_backup_path()
            .starts_with(DEFAULT_BACKUP_DIR));
    }

    #[test]
    fn test_in_memory_catalog_is_migrated() {
        let catalog = Catalog::open_in_memory().unwrap();
        assert!(catalog.is_open());
        assert!(catalog.path().is_none());
        assert_eq!(catalog.counts().unwrap(), CatalogCounts::default());
    }

    #[test]
    fn test_closed_catalog_reports_store_closed() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.close().unwrap();
        catalog.close().unwrap();

        let err = catalog.counts().unwrap_err();
        assert_eq!(err.kind(), chefvault_core::ExErrorKind::StoreClosed);
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CatalogConfig::new(
            dir.path().join("nested").join("recipes.db"),
            dir.path().join("backups"),
        );

        let catalog = Catalog::open(&config).unwrap();
        assert!(config.db_path.exists());
        assert_eq!(catalog.path(), Some(config.db_path.as_path()));
        assert!(db::foreign_keys_enabled(catalog.conn().unwrap()).unwrap());
    }
}
