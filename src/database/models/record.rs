//! Per-owner record model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Category;

/// A record owned by one owner id within one category.
///
/// Every field is owned data, so `clone()` is a deep copy: the clone shares
/// nothing mutable with the original. The access layer relies on this to
/// hand out records that can't reach back into its cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// External owner identifier (e.g. a user id)
    pub owner_id: String,

    pub category: Category,

    /// Named attributes
    #[serde(default)]
    pub payload: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record for an owner and category.
    pub fn new(owner_id: impl Into<String>, category: Category) -> Self {
        Self {
            owner_id: owner_id.into(),
            category,
            payload: BTreeMap::new(),
        }
    }

    /// Set an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Set an attribute, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.payload.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.payload.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.payload.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// True for a freshly created default record.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
