//! ChefVault CLI
//!
//! Thin front end over the recipe catalog store

use chefvault_core::logging_facility::{init, Profile};
use chefvault_store::catalog::{DEFAULT_BACKUP_DIR, DEFAULT_DB_PATH};
use chefvault_store::{Catalog, CatalogConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "chefvault")]
#[command(about = "ChefVault - personal recipe catalog", long_about = None)]
struct Cli {
    /// Live catalog store file
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Directory for timestamped backups
    #[arg(long, global = true, default_value = DEFAULT_BACKUP_DIR)]
    backup_dir: PathBuf,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recipe operations
    Recipe(commands::recipe::RecipeArgs),
    /// Tag operations
    Tag(commands::tag::TagArgs),
    /// Write a backup of the whole catalog
    Backup(commands::backup::BackupArgs),
    /// Replace the catalog with a backup
    Restore(commands::backup::RestoreArgs),
    /// Show row counts
    Stats,
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let config = CatalogConfig::new(cli.db, cli.backup_dir);
    let mut catalog = match Catalog::open(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: could not open catalog {}: {}", config.db_path.display(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Recipe(args) => commands::recipe::execute(args, &catalog),
        Commands::Tag(args) => commands::tag::execute(args, &catalog),
        Commands::Backup(args) => commands::backup::execute_backup(args, &catalog, &config),
        Commands::Restore(args) => commands::backup::execute_restore(args, &mut catalog),
        Commands::Stats => commands::backup::execute_stats(&catalog),
    };

    let closed = catalog.close();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = closed {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
