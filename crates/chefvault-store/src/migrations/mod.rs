//! Schema Manager
//!
//! Provides:
//! - Idempotent creation of the base tables
//! - Additive column migration driven by schema introspection
//! - The table/column introspection used by migration and restore validation

pub mod embedded;
pub mod introspection;
mod runner;

pub use introspection::{column_exists, missing_tables, table_exists};
pub use runner::ensure_schema;
