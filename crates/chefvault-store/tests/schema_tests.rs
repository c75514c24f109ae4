#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chefvault_store::migrations::{column_exists, ensure_schema, missing_tables, table_exists};
use chefvault_store::migrations::embedded::REQUIRED_TABLES;
use chefvault_store::{db, Catalog, RecipeRepo};
use rusqlite::Connection;

#[test]
fn test_ensure_schema_on_empty_db() {
    // Given: An empty database
    let mut conn = Connection::open_in_memory().unwrap();

    // When: The schema is ensured
    ensure_schema(&mut conn).unwrap();

    // Then: All structural tables and every later column exist
    assert!(missing_tables(&conn, &REQUIRED_TABLES).unwrap().is_empty());
    for column in ["completed", "rating", "image_path"] {
        assert!(
            column_exists(&conn, "recipes", column).unwrap(),
            "Missing column: {}",
            column
        );
    }
}

#[test]
fn test_ensure_schema_is_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();
    ensure_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO recipes (name) VALUES ('Soup')", [])
        .unwrap();

    ensure_schema(&mut conn).unwrap();
    ensure_schema(&mut conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1, "Re-running the schema must not touch data");
}

#[test]
fn test_old_store_is_upgraded_additively() {
    // Given: A store from the first revision, without completion/rating/image
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            ingredients TEXT,
            preparation TEXT,
            prep_time INTEGER,
            category TEXT,
            servings INTEGER
        );
        INSERT INTO recipes (name, ingredients, prep_time, servings)
            VALUES ('Legacy Stew', '2 carrots', 90, 4);",
    )
    .unwrap();
    assert!(!column_exists(&conn, "recipes", "rating").unwrap());
    assert!(!table_exists(&conn, "tags").unwrap());

    // When: The schema is ensured
    ensure_schema(&mut conn).unwrap();

    // Then: Missing columns and tables are added, existing rows keep their data
    assert!(column_exists(&conn, "recipes", "completed").unwrap());
    assert!(column_exists(&conn, "recipes", "image_path").unwrap());
    assert!(table_exists(&conn, "recipe_tags").unwrap());

    let stew = RecipeRepo::get_by_id(&conn, 1).unwrap().unwrap();
    assert_eq!(stew.name, "Legacy Stew");
    assert_eq!(stew.ingredients, "2 carrots");
    assert_eq!(stew.preparation, "");
    assert_eq!(stew.prep_time, 90);
    assert!(!stew.completed);
    assert_eq!(stew.rating, 0);
    assert!(stew.image_path.is_none());
}

#[test]
fn test_missing_tables_reports_absent_names() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE recipes (id INTEGER PRIMARY KEY, name TEXT)")
        .unwrap();

    let missing = missing_tables(&conn, &REQUIRED_TABLES).unwrap();
    assert_eq!(missing, vec!["tags", "recipe_tags"]);
}

#[test]
fn test_pragmas_applied_on_open() {
    let (_dir, _config, catalog) = common::disk_catalog();
    let conn = catalog.conn().unwrap();

    assert!(db::foreign_keys_enabled(conn).unwrap());

    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn test_reopening_a_store_keeps_its_data() {
    let (_dir, config, mut catalog) = common::disk_catalog();
    common::insert(&catalog, "Pancakes");
    catalog.close().unwrap();

    let reopened = Catalog::open(&config).unwrap();
    let all = RecipeRepo::list(reopened.conn().unwrap()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Pancakes");
    assert!(db::foreign_keys_enabled(reopened.conn().unwrap()).unwrap());
}
