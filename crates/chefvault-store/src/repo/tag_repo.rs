//! Tag repository
//!
//! Deduplicated tags, the recipe-tag association table, reverse lookup and
//! prefix suggestions. Tag names compare case-sensitively everywhere.

use crate::errors::{from_rusqlite, not_found, Result};
use crate::repo::hydration::{load_tag_names, query_recipes, RECIPE_COLUMNS_R};
use crate::repo::recipe_repo::RecipeRepo;
use chefvault_core::model::{Recipe, RecipeId, Tag, TagId};
use chefvault_core::rules::validation::validate_tag_name;
use rusqlite::{Connection, OptionalExtension};

/// Maximum number of names returned by `by_prefix`
pub const TAG_SUGGESTION_LIMIT: i64 = 10;

/// SQLite repository for tags and recipe-tag associations
pub struct TagRepo;

impl TagRepo {
    /// Return the id of the tag with this name, creating it if needed
    ///
    /// The name is matched and stored exactly as given. Calling twice with
    /// the same name returns the same id.
    ///
    /// # Errors
    /// - `InvalidInput` for a blank name
    /// - `Persistence` if the lookup or insert fails
    pub fn create_or_get(conn: &Connection, name: &str) -> Result<TagId> {
        observed!("tag_create_or_get", [tag = name], Self::create_or_get_impl(conn, name))
    }

    fn create_or_get_impl(conn: &Connection, name: &str) -> Result<TagId> {
        validate_tag_name(name)?;

        if let Some(id) = Self::find_by_name(conn, name)? {
            return Ok(id);
        }

        conn.execute("INSERT INTO tags (name) VALUES (?1)", [name])
            .map_err(from_rusqlite)?;
        let id = conn.last_insert_rowid();
        tracing::debug!(tag = name, tag_id = id, "tag created");
        Ok(id)
    }

    /// Exact, case-sensitive lookup of a tag id by name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<TagId>> {
        conn.query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()
        .map_err(from_rusqlite)
    }

    /// Alphabetical tag names attached to a recipe
    ///
    /// Empty for an unknown recipe.
    pub fn tags_for(conn: &Connection, recipe_id: RecipeId) -> Result<Vec<String>> {
        observed!(
            "tag_tags_for",
            [recipe_id = recipe_id],
            load_tag_names(conn, recipe_id)
        )
    }

    /// Associate a tag with a recipe; a no-op if the pair already exists
    ///
    /// # Errors
    /// `Persistence` if either id does not reference an existing row.
    pub fn attach(conn: &Connection, recipe_id: RecipeId, tag_id: TagId) -> Result<()> {
        observed!("tag_attach", [recipe_id = recipe_id, tag_id = tag_id], {
            conn.execute(
                "INSERT OR IGNORE INTO recipe_tags (recipe_id, tag_id) VALUES (?1, ?2)",
                [recipe_id, tag_id],
            )
            .map(|_| ())
            .map_err(from_rusqlite)
        })
    }

    /// Remove an association; a no-op if the pair is absent
    pub fn detach(conn: &Connection, recipe_id: RecipeId, tag_id: TagId) -> Result<()> {
        observed!("tag_detach", [recipe_id = recipe_id, tag_id = tag_id], {
            conn.execute(
                "DELETE FROM recipe_tags WHERE recipe_id = ?1 AND tag_id = ?2",
                [recipe_id, tag_id],
            )
            .map(|_| ())
            .map_err(from_rusqlite)
        })
    }

    /// Attach a tag to a recipe by name, creating the tag on first use
    ///
    /// # Errors
    /// - `NotFound` if the recipe does not exist (no tag is created)
    /// - `InvalidInput` for a blank name
    pub fn tag_recipe(conn: &Connection, recipe_id: RecipeId, name: &str) -> Result<TagId> {
        observed!(
            "tag_recipe",
            [recipe_id = recipe_id, tag = name],
            Self::tag_recipe_impl(conn, recipe_id, name)
        )
    }

    fn tag_recipe_impl(conn: &Connection, recipe_id: RecipeId, name: &str) -> Result<TagId> {
        if !RecipeRepo::exists(conn, recipe_id)? {
            return Err(not_found("Recipe", recipe_id).with_op("tag_recipe"));
        }
        let tag_id = Self::create_or_get(conn, name)?;
        Self::attach(conn, recipe_id, tag_id)?;
        Ok(tag_id)
    }

    /// Detach a tag from a recipe by name
    ///
    /// Returns false when no tag has this name. The tag itself is kept even
    /// if no recipe uses it any more.
    pub fn untag_recipe(conn: &Connection, recipe_id: RecipeId, name: &str) -> Result<bool> {
        observed!("untag_recipe", [recipe_id = recipe_id, tag = name], {
            match Self::find_by_name(conn, name) {
                Ok(Some(tag_id)) => Self::detach(conn, recipe_id, tag_id).map(|()| true),
                Ok(None) => Ok(false),
                Err(e) => Err(e),
            }
        })
    }

    /// Recipes carrying the tag with exactly this name, ordered by id
    ///
    /// Each recipe comes back with its full tag set.
    pub fn recipes_by_tag(conn: &Connection, name: &str) -> Result<Vec<Recipe>> {
        observed!(
            "tag_recipes_by_tag",
            [tag = name],
            query_recipes(
                conn,
                &format!(
                    "SELECT {} FROM recipes r
                     INNER JOIN recipe_tags rt ON r.id = rt.recipe_id
                     INNER JOIN tags t ON t.id = rt.tag_id
                     WHERE t.name = ?1
                     ORDER BY r.id",
                    RECIPE_COLUMNS_R
                ),
                [name],
            )
        )
    }

    /// Every tag, alphabetical by name
    pub fn list_all(conn: &Connection) -> Result<Vec<Tag>> {
        observed!("tag_list_all", Self::list_all_impl(conn))
    }

    fn list_all_impl(conn: &Connection) -> Result<Vec<Tag>> {
        let mut stmt = conn
            .prepare("SELECT id, name FROM tags ORDER BY name")
            .map_err(from_rusqlite)?;

        let tags = stmt
            .query_map([], |row| Ok(Tag::new(row.get(0)?, row.get::<_, String>(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(tags)
    }

    /// Tag names starting with `prefix`, alphabetical, at most
    /// `TAG_SUGGESTION_LIMIT` of them
    ///
    /// Case-sensitive; an empty prefix matches every tag.
    pub fn by_prefix(conn: &Connection, prefix: &str) -> Result<Vec<String>> {
        observed!("tag_by_prefix", [prefix = prefix], Self::by_prefix_impl(conn, prefix))
    }

    fn by_prefix_impl(conn: &Connection, prefix: &str) -> Result<Vec<String>> {
        // substr keeps the match case-sensitive, which LIKE is not for ASCII.
        let mut stmt = conn
            .prepare(
                "SELECT name FROM tags
                 WHERE substr(name, 1, length(?1)) = ?1
                 ORDER BY name
                 LIMIT ?2",
            )
            .map_err(from_rusqlite)?;

        let names = stmt
            .query_map(rusqlite::params![prefix, TAG_SUGGESTION_LIMIT], |row| {
                row.get(0)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;

        Ok(names)
    }

    /// Delete a tag; its recipe associations go with it
    ///
    /// Returns whether a row was removed.
    pub fn delete(conn: &Connection, tag_id: TagId) -> Result<bool> {
        observed!("tag_delete", [tag_id = tag_id], {
            conn.execute("DELETE FROM tags WHERE id = ?1", [tag_id])
                .map(|changed| changed > 0)
                .map_err(from_rusqlite)
        })
    }
}
