//! Recipe repository
//!
//! CRUD, completion/rating transitions and filtered listings over the
//! `recipes` table. Every listing is ordered by id and decorated with tags.

use crate::errors::{from_rusqlite, not_found, Result};
use crate::repo::hydration::{load_tag_names, query_recipes, recipe_from_row, RECIPE_COLUMNS};
use chefvault_core::model::{Recipe, RecipeId};
use chefvault_core::rules::validation::{validate_new_recipe, validate_rateable, validate_rating};
use rusqlite::{Connection, OptionalExtension};

/// SQLite repository for recipes
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe and return its store-assigned id
    ///
    /// `id` and `tags` on the input are ignored; `completed`, `rating` and
    /// `image_path` are stored as supplied.
    ///
    /// # Errors
    /// - `InvalidInput` for an empty name
    /// - `InvalidRating` for a rating on an incomplete recipe or above 5
    /// - `Persistence` if the insert fails
    pub fn create(conn: &Connection, recipe: &Recipe) -> Result<RecipeId> {
        observed!(
            "recipe_create",
            [recipe_name = recipe.name.as_str()],
            Self::create_impl(conn, recipe)
        )
    }

    fn create_impl(conn: &Connection, recipe: &Recipe) -> Result<RecipeId> {
        validate_new_recipe(recipe)?;

        conn.execute(
            "INSERT INTO recipes (name, ingredients, preparation, prep_time, category, servings, completed, rating, image_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                recipe.name,
                recipe.ingredients,
                recipe.preparation,
                recipe.prep_time,
                recipe.category,
                recipe.servings,
                recipe.completed,
                recipe.rating,
                recipe.image_path,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// All recipes ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Recipe>> {
        observed!(
            "recipe_list",
            query_recipes(
                conn,
                &format!("SELECT {} FROM recipes ORDER BY id", RECIPE_COLUMNS),
                [],
            )
        )
    }

    /// Look up one recipe; `None` when no row has this id
    pub fn get_by_id(conn: &Connection, id: RecipeId) -> Result<Option<Recipe>> {
        observed!("recipe_get", [recipe_id = id], Self::get_by_id_impl(conn, id))
    }

    fn get_by_id_impl(conn: &Connection, id: RecipeId) -> Result<Option<Recipe>> {
        let recipe = conn
            .query_row(
                &format!("SELECT {} FROM recipes WHERE id = ?1", RECIPE_COLUMNS),
                [id],
                recipe_from_row,
            )
            .optional()
            .map_err(from_rusqlite)?;

        match recipe {
            Some(mut recipe) => {
                recipe.tags = load_tag_names(conn, recipe.id)?;
                Ok(Some(recipe))
            }
            None => Ok(None),
        }
    }

    /// Recipes whose name contains `fragment`, ignoring ASCII case
    ///
    /// `%` and `_` in the fragment match literally.
    pub fn search_by_name(conn: &Connection, fragment: &str) -> Result<Vec<Recipe>> {
        observed!(
            "recipe_search",
            query_recipes(
                conn,
                &format!(
                    "SELECT {} FROM recipes WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id",
                    RECIPE_COLUMNS
                ),
                [contains_pattern(fragment)],
            )
        )
    }

    /// Delete a recipe; its tag associations go with it
    ///
    /// Returns whether a row was removed.
    pub fn delete(conn: &Connection, id: RecipeId) -> Result<bool> {
        observed!("recipe_delete", [recipe_id = id], {
            conn.execute("DELETE FROM recipes WHERE id = ?1", [id])
                .map(|changed| changed > 0)
                .map_err(from_rusqlite)
        })
    }

    /// Set the completed flag; returns whether the recipe exists
    ///
    /// Marking done keeps the rating. Clearing the flag also clears the
    /// rating, since an incomplete recipe cannot carry one.
    pub fn mark_done(conn: &Connection, id: RecipeId, completed: bool) -> Result<bool> {
        observed!("recipe_mark_done", [recipe_id = id, completed = completed], {
            conn.execute(
                "UPDATE recipes
                 SET completed = ?1,
                     rating = CASE WHEN ?1 THEN rating ELSE 0 END
                 WHERE id = ?2",
                rusqlite::params![completed, id],
            )
            .map(|changed| changed > 0)
            .map_err(from_rusqlite)
        })
    }

    /// Completed recipes ordered by id
    pub fn list_done(conn: &Connection) -> Result<Vec<Recipe>> {
        observed!(
            "recipe_list_done",
            query_recipes(
                conn,
                &format!(
                    "SELECT {} FROM recipes WHERE completed = 1 ORDER BY id",
                    RECIPE_COLUMNS
                ),
                [],
            )
        )
    }

    /// Rate a completed recipe
    ///
    /// # Errors
    /// Checked in this order, before anything is written:
    /// - `InvalidRating` unless `1 <= score <= 5`
    /// - `NotFound` if no recipe has this id
    /// - `NotCompleted` if the recipe is not marked done
    pub fn rate(conn: &Connection, id: RecipeId, score: i64) -> Result<()> {
        observed!(
            "recipe_rate",
            [recipe_id = id, score = score],
            Self::rate_impl(conn, id, score)
        )
    }

    fn rate_impl(conn: &Connection, id: RecipeId, score: i64) -> Result<()> {
        let rating = validate_rating(score)?;

        let completed: Option<bool> = conn
            .query_row("SELECT completed FROM recipes WHERE id = ?1", [id], |row| {
                row.get::<_, Option<i64>>(0).map(|v| v.unwrap_or(0) != 0)
            })
            .optional()
            .map_err(from_rusqlite)?;
        let completed = completed.ok_or_else(|| not_found("Recipe", id).with_op("recipe_rate"))?;
        validate_rateable(id, completed)?;

        conn.execute(
            "UPDATE recipes SET rating = ?1 WHERE id = ?2",
            rusqlite::params![rating, id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Completed recipes with exactly this rating, ordered by id
    pub fn list_by_rating(conn: &Connection, score: i64) -> Result<Vec<Recipe>> {
        observed!(
            "recipe_list_by_rating",
            [score = score],
            query_recipes(
                conn,
                &format!(
                    "SELECT {} FROM recipes WHERE completed = 1 AND rating = ?1 ORDER BY id",
                    RECIPE_COLUMNS
                ),
                [score],
            )
        )
    }

    /// Set or clear the image reference; returns whether the recipe exists
    pub fn update_image(conn: &Connection, id: RecipeId, image_path: Option<&str>) -> Result<bool> {
        observed!("recipe_update_image", [recipe_id = id], {
            conn.execute(
                "UPDATE recipes SET image_path = ?1 WHERE id = ?2",
                rusqlite::params![image_path, id],
            )
            .map(|changed| changed > 0)
            .map_err(from_rusqlite)
        })
    }

    /// Whether a recipe with this id exists
    pub fn exists(conn: &Connection, id: RecipeId) -> Result<bool> {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)",
                [id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(exists == 1)
    }
}

/// `%fragment%` with LIKE wildcards in the fragment escaped by `\`
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("bread"), "%bread%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }
}
