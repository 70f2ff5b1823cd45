//! Item definitions for the game world.

mod tag;

pub use tag::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Unique identifier for all items in the game, locations included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Create a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an item ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a nil/empty item ID.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, taggable object: the player character, a thing, or a location.
///
/// A location is simply an item that is not contained in anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Sorted so that descriptions are stable.
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Item {
    /// Create a new untagged item with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            tags: BTreeSet::new(),
            description: None,
        }
    }

    /// Add a tag to this item.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add multiple tags to this item.
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if the item carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tag the item. Returns false if it already had the tag.
    pub fn tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Remove a tag. Returns false if the item did not have it.
    pub fn untag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Check whether a tag pattern holds for this item.
    pub fn matches(&self, pattern: &TagPattern) -> bool {
        self.has_tag(&pattern.name) == pattern.polarity
    }

    /// The explicit description, or the name followed by `+Tag` for each tag.
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_else(|| self.to_string())
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for tag in &self.tags {
            write!(f, "+{}", tag)?;
        }
        Ok(())
    }
}
