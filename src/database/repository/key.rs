//! Cache key for records.

use std::fmt;

use crate::database::models::Category;

/// Cache slot for one (owner id, category) pair.
///
/// Equality and hashing are structural, so two keys built from equal
/// inputs address the same slot. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    owner_id: String,
    category_id: u32,
}

impl RecordKey {
    pub fn new(owner_id: &str, category: Category) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            category_id: category.id(),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn category(&self) -> Category {
        Category::new(self.category_id)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner_id, self.category())
    }
}
