//! ChefVault Core - domain model and shared facilities
//!
//! This crate provides:
//! - The recipe catalog model (Recipe, Ingredient, Tag, CatalogCounts)
//! - Validation rules enforced before any store mutation
//! - Deterministic ingredient text formatting
//! - The structured error facility and the logging facility
//!
//! Persistence lives in `chefvault-store`.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod rules;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result};
pub use model::{CatalogCounts, Ingredient, Recipe, RecipeId, Tag, TagId};
