//! Validation rules applied before any store mutation
//!
//! Each check returns a [`ValidationError`]; the store converts it into an
//! [`ExError`] so callers see one error type across the boundary.

use crate::errors::{ExError, ExErrorKind};
use crate::model::{Recipe, RecipeId};
use thiserror::Error;

/// Lowest rating a completed recipe can be given
pub const RATING_MIN: i64 = 1;

/// Highest rating a completed recipe can be given
pub const RATING_MAX: i64 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Recipe name cannot be empty")]
    EmptyName,

    #[error("Rating must be between {min} and {max}, got {score}", min = RATING_MIN, max = RATING_MAX)]
    RatingOutOfRange { score: i64 },

    #[error("Recipe {recipe_id} must be marked as completed before it can be rated")]
    NotCompleted { recipe_id: RecipeId },

    #[error("Rating {rating} requires a completed recipe")]
    RatingWithoutCompletion { rating: u8 },

    #[error("Tag name cannot be empty")]
    EmptyTagName,
}

impl From<ValidationError> for ExError {
    fn from(err: ValidationError) -> Self {
        let kind = match &err {
            ValidationError::EmptyName | ValidationError::EmptyTagName => ExErrorKind::InvalidInput,
            ValidationError::RatingOutOfRange { .. }
            | ValidationError::RatingWithoutCompletion { .. } => ExErrorKind::InvalidRating,
            ValidationError::NotCompleted { .. } => ExErrorKind::NotCompleted,
        };
        let ex = ExError::new(kind).with_message(err.to_string());
        match err {
            ValidationError::NotCompleted { recipe_id } => ex.with_entity_id(recipe_id.to_string()),
            _ => ex,
        }
    }
}

/// Check a recipe before insert
///
/// # Errors
/// - `EmptyName` when the name is blank
/// - `RatingOutOfRange` when the supplied rating is above `RATING_MAX`
/// - `RatingWithoutCompletion` when a rating is supplied for an incomplete recipe
pub fn validate_new_recipe(recipe: &Recipe) -> Result<(), ValidationError> {
    if recipe.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if i64::from(recipe.rating) > RATING_MAX {
        return Err(ValidationError::RatingOutOfRange {
            score: i64::from(recipe.rating),
        });
    }
    if recipe.rating != 0 && !recipe.completed {
        return Err(ValidationError::RatingWithoutCompletion {
            rating: recipe.rating,
        });
    }
    Ok(())
}

/// Check a score given to `rate` and narrow it to the stored type
///
/// # Errors
/// `RatingOutOfRange` unless `RATING_MIN <= score <= RATING_MAX`
pub fn validate_rating(score: i64) -> Result<u8, ValidationError> {
    if (RATING_MIN..=RATING_MAX).contains(&score) {
        u8::try_from(score).map_err(|_| ValidationError::RatingOutOfRange { score })
    } else {
        Err(ValidationError::RatingOutOfRange { score })
    }
}

/// Check that a recipe can receive a rating
///
/// # Errors
/// `NotCompleted` when the completed flag is false
pub fn validate_rateable(recipe_id: RecipeId, completed: bool) -> Result<(), ValidationError> {
    if completed {
        Ok(())
    } else {
        Err(ValidationError::NotCompleted { recipe_id })
    }
}

/// Check a tag name; names are stored and compared exactly as given
///
/// # Errors
/// `EmptyTagName` when the name is empty or only whitespace
pub fn validate_tag_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::EmptyTagName)
    } else {
        Ok(())
    }
}
