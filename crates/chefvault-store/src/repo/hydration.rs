//! Row-to-model hydration
//!
//! Maps `recipes` rows into `Recipe` values and decorates them with their
//! tag names. Columns that older stores left NULL read as their defaults.

use crate::errors::{from_rusqlite, Result};
use chefvault_core::model::{Recipe, RecipeId};
use rusqlite::{Connection, Params, Row};

/// Recipe columns in hydration order
pub const RECIPE_COLUMNS: &str =
    "id, name, ingredients, preparation, prep_time, category, servings, completed, rating, image_path";

/// Recipe columns qualified with the `r` alias, for joins
pub const RECIPE_COLUMNS_R: &str = "r.id, r.name, r.ingredients, r.preparation, r.prep_time, \
     r.category, r.servings, r.completed, r.rating, r.image_path";

/// Build a Recipe from a row selected with `RECIPE_COLUMNS`; tags are left empty
pub fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let prep_time: Option<i64> = row.get(4)?;
    let servings: Option<i64> = row.get(6)?;
    let completed: Option<i64> = row.get(7)?;
    let rating: Option<i64> = row.get(8)?;

    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        ingredients: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        preparation: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        prep_time: non_negative(prep_time),
        category: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        servings: non_negative(servings),
        completed: completed.unwrap_or(0) != 0,
        rating: u8::try_from(rating.unwrap_or(0).clamp(0, 5)).unwrap_or(0),
        image_path: row.get(9)?,
        tags: Vec::new(),
    })
}

fn non_negative(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

/// Alphabetical tag names attached to a recipe
pub fn load_tag_names(conn: &Connection, recipe_id: RecipeId) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.name FROM tags t
             INNER JOIN recipe_tags rt ON t.id = rt.tag_id
             WHERE rt.recipe_id = ?1
             ORDER BY t.name",
        )
        .map_err(from_rusqlite)?;

    let names = stmt
        .query_map([recipe_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;

    Ok(names)
}

/// Run a recipe query and decorate every result with its tags
///
/// One extra lookup per recipe; fine at personal-catalog scale.
pub fn query_recipes<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Recipe>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let mut recipes = stmt
        .query_map(params, recipe_from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    drop(stmt);

    for recipe in &mut recipes {
        recipe.tags = load_tag_names(conn, recipe.id)?;
    }
    Ok(recipes)
}
