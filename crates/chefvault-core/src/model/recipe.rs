use serde::{Deserialize, Serialize};

use super::ingredient::{format_ingredients, Ingredient};

/// Store-assigned recipe identity
pub type RecipeId = i64;

/// Identity carried by a recipe that has not been persisted yet
pub const UNSAVED_RECIPE_ID: RecipeId = 0;

/// Recipe - the central catalog entity describing one dish
///
/// `completed` and `rating` move together: a rating other than 0 is only
/// meaningful (and only accepted by the store) once the recipe is completed.
/// `tags` is filled in by the store on read, sorted alphabetically, and is
/// ignored on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Store-assigned identifier, `UNSAVED_RECIPE_ID` until persisted
    pub id: RecipeId,

    /// Display name (required, non-empty)
    pub name: String,

    /// Free-text ingredient list
    pub ingredients: String,

    /// Free-text preparation steps
    pub preparation: String,

    /// Preparation time in minutes
    pub prep_time: u32,

    /// Free-text category, may be empty
    pub category: String,

    /// Number of servings
    pub servings: u32,

    /// Whether the recipe has been cooked at least once
    pub completed: bool,

    /// 0 = unrated, otherwise 1-5
    pub rating: u8,

    /// Reference to an image file; existence is not checked
    pub image_path: Option<String>,

    /// Associated tag names, alphabetical
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Recipe {
    /// Create an unsaved recipe with the base attributes
    ///
    /// The recipe starts not completed, unrated, without image and tags.
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        preparation: impl Into<String>,
        prep_time: u32,
        category: impl Into<String>,
        servings: u32,
    ) -> Self {
        Self {
            id: UNSAVED_RECIPE_ID,
            name: name.into(),
            ingredients: ingredients.into(),
            preparation: preparation.into(),
            prep_time,
            category: category.into(),
            servings,
            completed: false,
            rating: 0,
            image_path: None,
            tags: Vec::new(),
        }
    }

    /// Replace the free-text ingredients with the rendering of a structured list
    pub fn with_ingredient_list(mut self, list: &[Ingredient]) -> Self {
        self.ingredients = format_ingredients(list);
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Whether the recipe carries a store-assigned identity
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_RECIPE_ID
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }
}
