//! ChefVault Store - persistence layer for the recipe catalog
//!
//! Provides:
//! - SQLite connection management with per-connection pragmas
//! - Schema Manager with additive, introspection-driven migration
//! - Recipe and Tag repositories
//! - Backup/Restore Manager built on the SQLite online backup API
//! - The long-lived `Catalog` store handle

/// Wrap a boundary operation with start/end/error lifecycle events
macro_rules! observed {
    ($op:expr, [$($field:tt)*], $body:expr) => {{
        chefvault_core::log_op_start!($op, $($field)*);
        let start = std::time::Instant::now();
        let result = $body;
        match &result {
            Ok(_) => {
                chefvault_core::log_op_end!($op, duration_ms = start.elapsed().as_millis() as u64)
            }
            Err(e) => {
                chefvault_core::log_op_error!(
                    $op,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    $($field)*
                )
            }
        }
        result
    }};
    ($op:expr, $body:expr) => {{
        chefvault_core::log_op_start!($op);
        let start = std::time::Instant::now();
        let result = $body;
        match &result {
            Ok(_) => {
                chefvault_core::log_op_end!($op, duration_ms = start.elapsed().as_millis() as u64)
            }
            Err(e) => {
                chefvault_core::log_op_error!(
                    $op,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                )
            }
        }
        result
    }};
}

pub mod backup;
pub mod catalog;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use backup::{BackupReport, RestoreReport};
pub use catalog::{Catalog, CatalogConfig};
pub use errors::Result;
pub use repo::{RecipeRepo, TagRepo};
