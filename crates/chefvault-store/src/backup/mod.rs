//! Backup/Restore Manager
//!
//! `snapshot` exports the live store to a standalone file through the SQLite
//! online backup API. `restore` replaces the live file with a validated
//! backup, keeping a `.pre_restore` safety copy next to it.
//!
//! Both work on the store handle and the filesystem directly; neither goes
//! through the repositories.

mod restore;
mod snapshot;

pub use restore::{restore, RestoreReport, RESTORE_SETTLE_DELAY};
pub use snapshot::{backup, timestamped_backup_path, BackupReport, BACKUP_FILE_PREFIX};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the live store path for the safety copy
pub const PRE_RESTORE_SUFFIX: &str = ".pre_restore";

/// Path of the safety copy taken before a restore overwrites `live`
pub fn pre_restore_path(live: &Path) -> PathBuf {
    with_suffix(live, PRE_RESTORE_SUFFIX)
}

/// The `-wal` and `-shm` files SQLite keeps next to a WAL-mode database
pub(crate) fn sidecar_paths(db: &Path) -> [PathBuf; 2] {
    [with_suffix(db, "-wal"), with_suffix(db, "-shm")]
}

/// Remove WAL sidecars of `db`, ignoring ones that do not exist
pub(crate) fn remove_sidecars(db: &Path) {
    for sidecar in sidecar_paths(db) {
        match fs::remove_file(&sidecar) {
            Ok(()) => tracing::debug!(path = %sidecar.display(), "removed stale sidecar"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %sidecar.display(), error = %e, "could not remove sidecar")
            }
        }
    }
}

/// Whether two paths name the same existing file
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
