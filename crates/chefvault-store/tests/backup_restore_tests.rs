#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chefvault_core::{CatalogCounts, ExErrorKind};
use chefvault_store::backup::{self, pre_restore_path};
use chefvault_store::{Catalog, RecipeRepo, TagRepo};
use std::fs;
use std::path::PathBuf;

/// Two recipes, two tags, three links
fn seed(catalog: &Catalog) {
    let conn = catalog.conn().unwrap();
    let soup = common::insert(catalog, "Soup");
    let cake = common::insert(catalog, "Cake");
    TagRepo::tag_recipe(conn, soup, "winter").unwrap();
    TagRepo::tag_recipe(conn, cake, "winter").unwrap();
    TagRepo::tag_recipe(conn, cake, "sweet").unwrap();
    RecipeRepo::mark_done(conn, cake, true).unwrap();
    RecipeRepo::rate(conn, cake, 5).unwrap();
}

const SEEDED: CatalogCounts = CatalogCounts {
    recipes: 2,
    tags: 2,
    recipe_tags: 3,
};

#[test]
fn test_backup_writes_standalone_verified_copy() {
    let (_dir, config, catalog) = common::disk_catalog();
    seed(&catalog);
    let dest = config.backup_dir.join("nested").join("copy.db");

    let report = catalog.backup_to(&dest).unwrap();

    assert_eq!(report.path, dest);
    assert!(report.bytes > 0);
    assert_eq!(report.baseline, SEEDED);
    assert_eq!(report.copied, SEEDED);
    assert!(report.verified());

    let tables = common::table_names(&dest);
    for table in ["recipes", "tags", "recipe_tags"] {
        assert!(tables.contains(&table.to_string()));
    }
}

#[test]
fn test_backup_replaces_existing_destination() {
    let (_dir, config, catalog) = common::disk_catalog();
    seed(&catalog);
    let dest = config.backup_dir.join("copy.db");
    fs::create_dir_all(&config.backup_dir).unwrap();
    fs::write(&dest, b"not a database").unwrap();

    let report = catalog.backup_to(&dest).unwrap();
    assert_eq!(report.copied, SEEDED);
}

#[test]
fn test_backup_rejects_live_file_as_destination() {
    // Given
    let (_dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);

    // When
    let err = catalog.backup_to(&config.db_path).unwrap_err();

    // Then
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(config.db_path.exists());

    // Writes after the refused backup still reach the file on disk
    common::insert(&catalog, "Stew");
    catalog.close().unwrap();
    let reopened = Catalog::open(&config).unwrap();
    assert_eq!(
        reopened.counts().unwrap(),
        CatalogCounts {
            recipes: 3,
            ..SEEDED
        }
    );
}

#[test]
fn test_backup_rejects_live_wal_sidecar_as_destination() {
    let (_dir, config, catalog) = common::disk_catalog();
    seed(&catalog);
    let wal = PathBuf::from(format!("{}-wal", config.db_path.display()));
    assert!(wal.exists());

    let err = catalog.backup_to(&wal).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(catalog.counts().unwrap(), SEEDED);
}

#[test]
fn test_backup_of_in_memory_catalog() {
    let catalog = common::memory_catalog();
    seed(&catalog);
    let dir = tempfile::TempDir::new().unwrap();
    let dest = dir.path().join("memory.db");

    let report = catalog.backup_to(&dest).unwrap();
    assert_eq!(report.copied, SEEDED);
}

#[test]
fn test_backup_then_restore_round_trip() {
    let (_dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);
    let before = catalog.counts().unwrap();
    let dest = config.default_backup_path();

    catalog.backup_to(&dest).unwrap();
    let report = catalog.restore_from(&dest).unwrap();

    assert_eq!(report.counts, before);
    assert_eq!(catalog.counts().unwrap(), before);
    assert_eq!(report.source, dest);
}

#[test]
fn test_restore_brings_back_old_state_and_keeps_safety_copy() {
    let (_dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);
    let dest = config.backup_dir.join("before-changes.db");
    catalog.backup_to(&dest).unwrap();

    // Given: Changes made after the backup
    let extra = common::insert(&catalog, "Added Later");
    TagRepo::tag_recipe(catalog.conn().unwrap(), extra, "new").unwrap();
    assert_eq!(catalog.counts().unwrap().recipes, 3);

    // When: The backup is restored
    let report = catalog.restore_from(&dest).unwrap();

    // Then: The live store matches the backup
    assert_eq!(report.counts, SEEDED);
    let conn = catalog.conn().unwrap();
    let names: Vec<_> = RecipeRepo::list(conn)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Soup", "Cake"]);
    let cake = RecipeRepo::get_by_id(conn, 2).unwrap().unwrap();
    assert_eq!(cake.rating, 5);
    assert_eq!(cake.tags, vec!["sweet", "winter"]);

    // And: The pre-restore safety copy holds the discarded state
    let safety = report.safety_copy.expect("Safety copy should be taken");
    assert_eq!(safety, pre_restore_path(&config.db_path));
    let previous = Catalog::open_path(&safety).unwrap();
    assert_eq!(previous.counts().unwrap().recipes, 3);
}

#[test]
fn test_restored_store_enforces_foreign_keys() {
    let (_dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);
    let dest = config.backup_dir.join("fk.db");
    catalog.backup_to(&dest).unwrap();
    catalog.restore_from(&dest).unwrap();

    let conn = catalog.conn().unwrap();
    assert!(chefvault_store::db::foreign_keys_enabled(conn).unwrap());

    RecipeRepo::delete(conn, 2).unwrap();
    let links: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM recipe_tags WHERE recipe_id = 2",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(links, 0, "Cascade must work on the reopened handle");
}

#[test]
fn test_restore_rejects_missing_tables_before_touching_live_store() {
    let (dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);

    let partial = dir.path().join("partial.db");
    let conn = rusqlite::Connection::open(&partial).unwrap();
    conn.execute_batch("CREATE TABLE recipes (id INTEGER PRIMARY KEY, name TEXT)")
        .unwrap();
    drop(conn);

    let err = catalog.restore_from(&partial).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MissingTable);
    assert!(err.message().contains("tags"));
    assert!(catalog.is_open());
    assert_eq!(catalog.counts().unwrap(), SEEDED);
    assert!(!pre_restore_path(&config.db_path).exists());
}

#[test]
fn test_restore_rejects_empty_and_missing_files() {
    let (dir, _config, mut catalog) = common::disk_catalog();
    seed(&catalog);

    let empty = dir.path().join("empty.db");
    fs::write(&empty, b"").unwrap();
    let err = catalog.restore_from(&empty).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyFile);

    let err = catalog
        .restore_from(&dir.path().join("does-not-exist.db"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);

    assert_eq!(catalog.counts().unwrap(), SEEDED);
}

#[test]
fn test_restore_rejects_non_database_file() {
    let (dir, _config, mut catalog) = common::disk_catalog();
    seed(&catalog);
    let junk = dir.path().join("junk.db");
    fs::write(&junk, vec![b'x'; 4096]).unwrap();

    let err = catalog.restore_from(&junk).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(catalog.counts().unwrap(), SEEDED);
}

#[test]
fn test_restore_rejects_live_file_as_source() {
    let (_dir, config, mut catalog) = common::disk_catalog();
    seed(&catalog);

    let err = catalog.restore_from(&config.db_path).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(catalog.counts().unwrap(), SEEDED);
}

#[test]
fn test_in_memory_catalog_cannot_be_restored() {
    let mut catalog = common::memory_catalog();
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("source.db");
    let donor = Catalog::open_path(&source).unwrap();
    seed(&donor);
    drop(donor);

    let err = catalog.restore_from(&source).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[test]
fn test_restore_upgrades_an_old_backup() {
    let (dir, _config, mut catalog) = common::disk_catalog();
    let old = dir.path().join("old.db");
    let conn = rusqlite::Connection::open(&old).unwrap();
    conn.execute_batch(
        "CREATE TABLE recipes (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL,
            ingredients TEXT, preparation TEXT, prep_time INTEGER, category TEXT, servings INTEGER);
         CREATE TABLE tags (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE NOT NULL);
         CREATE TABLE recipe_tags (recipe_id INTEGER, tag_id INTEGER,
            PRIMARY KEY (recipe_id, tag_id));
         INSERT INTO recipes (name, prep_time, servings) VALUES ('Old Favourite', 20, 1);",
    )
    .unwrap();
    drop(conn);

    let report = catalog.restore_from(&old).unwrap();
    assert_eq!(report.counts.recipes, 1);

    let conn = catalog.conn().unwrap();
    let id = RecipeRepo::list(conn).unwrap()[0].id;
    RecipeRepo::mark_done(conn, id, true).unwrap();
    RecipeRepo::rate(conn, id, 4).unwrap();
    assert_eq!(RecipeRepo::get_by_id(conn, id).unwrap().unwrap().rating, 4);
}

#[test]
fn test_timestamped_backup_name() {
    let (_dir, config, _catalog) = common::disk_catalog();
    let path = config.default_backup_path();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();

    assert!(path.starts_with(&config.backup_dir));
    assert!(name.starts_with(backup::BACKUP_FILE_PREFIX));
    assert!(name.ends_with(".db"));
}
