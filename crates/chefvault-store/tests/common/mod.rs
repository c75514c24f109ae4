#![allow(dead_code)]

use chefvault_core::model::{Recipe, RecipeId};
use chefvault_store::{Catalog, CatalogConfig, RecipeRepo};
use std::path::Path;
use tempfile::TempDir;

pub fn memory_catalog() -> Catalog {
    Catalog::open_in_memory().expect("Failed to open in-memory catalog")
}

/// On-disk catalog under a fresh temp dir; keep the TempDir alive
pub fn disk_catalog() -> (TempDir, CatalogConfig, Catalog) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = CatalogConfig::new(
        dir.path().join("data").join("recipes.db"),
        dir.path().join("data").join("backups"),
    );
    let catalog = Catalog::open(&config).expect("Failed to open catalog");
    (dir, config, catalog)
}

pub fn bread() -> Recipe {
    Recipe::new(
        "Bread",
        "500 grams flour\n1 cup water",
        "Knead, rise, bake",
        180,
        "Baking",
        2,
    )
}

pub fn recipe(name: &str) -> Recipe {
    Recipe::new(name, "", "", 10, "", 1)
}

pub fn insert(catalog: &Catalog, name: &str) -> RecipeId {
    RecipeRepo::create(catalog.conn().unwrap(), &recipe(name)).expect("Failed to create recipe")
}

pub fn table_names(path: &Path) -> Vec<String> {
    let conn = rusqlite::Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}
