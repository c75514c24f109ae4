//! Error handling for chefvault-store
//!
//! Wraps chefvault-core ExError with store-specific helpers

use chefvault_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a not-found error for an entity looked up by id or name
pub fn not_found(entity: &str, id: impl ToString) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_entity_id(id.to_string())
        .with_message(format!("{} not found", entity))
}

/// Create a validation error for a backup file lacking structural tables
pub fn missing_tables(path: &Path, missing: &[&str]) -> ExError {
    ExError::new(ExErrorKind::MissingTable)
        .with_op("restore_validate")
        .with_entity_id(path.display().to_string())
        .with_message(format!(
            "Backup is missing required tables: {}",
            missing.join(", ")
        ))
}

/// Create an error for a zero-length store file
pub fn empty_file(operation: &str, path: &Path) -> ExError {
    ExError::new(ExErrorKind::EmptyFile)
        .with_op(operation.to_string())
        .with_entity_id(path.display().to_string())
        .with_message("File is empty")
}

/// Create an error for use of a handle whose connection is closed
pub fn store_closed() -> ExError {
    ExError::new(ExErrorKind::StoreClosed).with_message("Catalog store is not open")
}

/// Create an invalid-input error
pub fn invalid_input(operation: &str, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(operation.to_string())
        .with_message(message)
}
