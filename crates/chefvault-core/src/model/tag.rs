use serde::{Deserialize, Serialize};

/// Store-assigned tag identity
pub type TagId = i64;

/// Tag - a deduplicated label attached to any number of recipes
///
/// Names are unique across the catalog with case-sensitive comparison, so
/// `"Vegan"` and `"vegan"` are two different tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
