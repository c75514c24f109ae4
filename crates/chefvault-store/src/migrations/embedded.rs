//! Embedded schema definitions
//!
//! Base tables carry only the columns of the first catalog revision.
//! Everything added later is declared as an additive column so fresh and
//! old stores go through the same upgrade path.

pub const RECIPES_TABLE: &str = "recipes";
pub const TAGS_TABLE: &str = "tags";
pub const RECIPE_TAGS_TABLE: &str = "recipe_tags";

/// Tables a store file must contain to be a catalog
pub const REQUIRED_TABLES: [&str; 3] = [RECIPES_TABLE, TAGS_TABLE, RECIPE_TAGS_TABLE];

/// Base table definition
pub struct TableDef {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Column added after the first revision, with the default existing rows get
pub struct ColumnDef {
    pub table: &'static str,
    pub column: &'static str,
    pub definition: &'static str,
}

/// Base tables in creation order (referenced tables first)
pub fn base_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: RECIPES_TABLE,
            sql: "CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                ingredients TEXT NOT NULL DEFAULT '',
                preparation TEXT NOT NULL DEFAULT '',
                prep_time INTEGER NOT NULL DEFAULT 0,
                category TEXT NOT NULL DEFAULT '',
                servings INTEGER NOT NULL DEFAULT 0
            )",
        },
        TableDef {
            name: TAGS_TABLE,
            sql: "CREATE TABLE IF NOT EXISTS tags (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )",
        },
        TableDef {
            name: RECIPE_TAGS_TABLE,
            sql: "CREATE TABLE IF NOT EXISTS recipe_tags (
                recipe_id INTEGER NOT NULL,
                tag_id INTEGER NOT NULL,
                PRIMARY KEY (recipe_id, tag_id),
                FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE,
                FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag_id)",
        },
    ]
}

/// Additive columns in the order they were introduced
pub fn additive_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef {
            table: RECIPES_TABLE,
            column: "completed",
            definition: "INTEGER NOT NULL DEFAULT 0",
        },
        ColumnDef {
            table: RECIPES_TABLE,
            column: "rating",
            definition: "INTEGER NOT NULL DEFAULT 0",
        },
        ColumnDef {
            table: RECIPES_TABLE,
            column: "image_path",
            definition: "TEXT",
        },
    ]
}
