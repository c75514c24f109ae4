//! Backup, restore and stats commands

use chefvault_store::{Catalog, CatalogConfig};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Destination file; defaults to a timestamped file in --backup-dir
    pub dest: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// Backup file to restore from
    pub source: PathBuf,
}

pub fn execute_backup(
    args: BackupArgs,
    catalog: &Catalog,
    config: &CatalogConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let dest = args.dest.unwrap_or_else(|| config.default_backup_path());
    let report = catalog.backup_to(&dest)?;

    println!("Backup written: {}", report.path.display());
    println!("  size: {} bytes", report.bytes);
    println!("  contents: {}", report.copied);
    if !report.verified() {
        println!("  warning: live store had {}", report.baseline);
    }
    Ok(())
}

pub fn execute_restore(
    args: RestoreArgs,
    catalog: &mut Catalog,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = catalog.restore_from(&args.source)?;

    println!("Restored from: {}", report.source.display());
    match &report.safety_copy {
        Some(path) => println!("  previous catalog kept at: {}", path.display()),
        None => println!("  warning: no safety copy of the previous catalog was taken"),
    }
    println!("  contents: {}", report.counts);
    Ok(())
}

pub fn execute_stats(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", catalog.counts()?);
    Ok(())
}
