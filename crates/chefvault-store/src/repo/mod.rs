//! Repository layer for the recipe catalog
//!
//! Repositories are stateless: every operation takes the connection owned by
//! the `Catalog` handle, so tests can run them against isolated in-memory
//! databases.

pub mod hydration;
pub mod recipe_repo;
pub mod tag_repo;

pub use recipe_repo::RecipeRepo;
pub use tag_repo::{TagRepo, TAG_SUGGESTION_LIMIT};
