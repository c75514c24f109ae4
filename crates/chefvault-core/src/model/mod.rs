pub mod counts;
pub mod ingredient;
pub mod recipe;
pub mod tag;

pub use counts::CatalogCounts;
pub use ingredient::{format_ingredient, format_ingredients, format_quantity, Ingredient};
pub use recipe::{Recipe, RecipeId, UNSAVED_RECIPE_ID};
pub use tag::{Tag, TagId};
