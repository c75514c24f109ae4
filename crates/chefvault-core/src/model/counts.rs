use serde::{Deserialize, Serialize};
use std::fmt;

/// Row counts across the three structural tables
///
/// Used as the baseline/verification pair for backups and as the
/// confirmation report after a restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub recipes: i64,
    pub tags: i64,
    pub recipe_tags: i64,
}

impl fmt::Display for CatalogCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} recipes, {} tags, {} recipe-tag links",
            self.recipes, self.tags, self.recipe_tags
        )
    }
}
