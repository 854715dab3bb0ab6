//! Record categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical bucket of records owned by one owner id.
///
/// Identified by a stable integer id. Id `0` is reserved for "no category"
/// and is what `Category::default()` yields; the service rejects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(u32);

impl Category {
    pub const UNSET: Category = Category(0);
    pub const INBOX: Category = Category(1);
    pub const OUTBOX: Category = Category(2);
    pub const SETTINGS: Category = Category(3);
    pub const PROFILE: Category = Category(4);

    /// Application-defined category.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    /// Name of a well-known category, if this is one.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::INBOX => Some("inbox"),
            Self::OUTBOX => Some("outbox"),
            Self::SETTINGS => Some("settings"),
            Self::PROFILE => Some("profile"),
            _ => None,
        }
    }

    /// Parse a well-known name (case-insensitive) or a numeric id.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.to_lowercase().as_str() {
            "inbox" => Some(Self::INBOX),
            "outbox" => Some(Self::OUTBOX),
            "settings" => Some(Self::SETTINGS),
            "profile" => Some(Self::PROFILE),
            _ => raw.parse::<u32>().ok().map(Self),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "#{}", self.0),
        }
    }
}
