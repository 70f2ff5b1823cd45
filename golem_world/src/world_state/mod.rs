//! World state management - items, their containment tree, and the by-name registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, WorldError};
use crate::items::{Item, ItemId};

/// One item of a world snapshot, with the container it sits in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub item: Item,
    pub parent: Option<ItemId>,
}

/// A serializable view of the whole world, items in creation order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldSnapshot {
    pub items: Vec<SnapshotEntry>,
    pub status: Option<String>,
}

/// The complete state of the game world.
///
/// Items form a forest: every item has at most one container, and an item
/// with no container is a location.
#[derive(Debug, Clone, Default)]
pub struct World {
    items: HashMap<ItemId, Item>,

    /// Creation order, used for snapshots and iteration.
    order: Vec<ItemId>,

    /// Index: name -> items with this name, oldest first.
    by_name: HashMap<String, Vec<ItemId>>,

    parents: HashMap<ItemId, ItemId>,
    children: HashMap<ItemId, Vec<ItemId>>,

    /// Last status message shown to the player.
    status: Option<String>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world from space-separated item descriptions such as
    /// `"Alice+PC stone hole"`. Every item starts as a location.
    pub fn from_descriptions(descriptions: &str) -> Result<Self> {
        let mut world = Self::new();
        for description in descriptions.split_whitespace() {
            let mut parts = description.split('+');
            let name = parts.next().unwrap_or_default();
            if name.is_empty() || parts.clone().any(str::is_empty) {
                return Err(WorldError::InvalidDescription(description.to_string()));
            }
            world.add_item(Item::new(name).with_tags(parts));
        }
        Ok(world)
    }

    /// Add an item to the world and register it under its name.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.by_name.entry(item.name.clone()).or_default().push(id);
        self.order.push(id);
        self.items.insert(id, item);
        id
    }

    /// Create and add an untagged item.
    pub fn create(&mut self, name: impl Into<String>) -> ItemId {
        self.add_item(Item::new(name))
    }

    /// Remove an item from the world entirely. Its children become locations.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.detach_unchecked(id);
        for child in self.children.remove(&id).unwrap_or_default() {
            self.parents.remove(&child);
        }
        if let Some(ids) = self.by_name.get_mut(&item.name) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_name.remove(&item.name);
            }
        }
        self.order.retain(|other| *other != id);
        Some(item)
    }

    /// Get item by ID.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get mutable item by ID.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// The first live item registered under `name`.
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        self.by_name.get(name).and_then(|ids| ids.first().copied())
    }

    /// All live items registered under `name`, oldest first.
    pub fn items_named(&self, name: &str) -> &[ItemId] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Iterate over all items in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Get the total number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Place `child` inside `parent`, taking it out of its current container.
    pub fn append_child(&mut self, parent: ItemId, child: ItemId) -> Result<()> {
        self.require(parent)?;
        self.require(child)?;
        if parent == child || self.is_inside(parent, child) {
            return Err(WorldError::ContainmentCycle {
                item: child,
                container: parent,
            });
        }
        if self.parents.get(&child) == Some(&parent) {
            return Ok(());
        }

        self.detach_unchecked(child);
        self.parents.insert(child, parent);
        self.children.entry(parent).or_default().push(child);

        tracing::debug!(%parent, %child, "Item moved");
        Ok(())
    }

    /// Take `child` out of `parent`. Returns false if it was not there.
    pub fn remove_child(&mut self, parent: ItemId, child: ItemId) -> Result<bool> {
        self.require(parent)?;
        self.require(child)?;
        if self.parents.get(&child) != Some(&parent) {
            return Ok(false);
        }
        self.detach_unchecked(child);
        Ok(true)
    }

    /// Take an item out of whatever contains it, returning the old container.
    pub fn detach(&mut self, child: ItemId) -> Result<Option<ItemId>> {
        self.require(child)?;
        Ok(self.detach_unchecked(child))
    }

    /// Get the container of an item.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.parents.get(&id).copied()
    }

    /// Get the items directly inside an item, in insertion order.
    pub fn children_of(&self, id: ItemId) -> &[ItemId] {
        self.children.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Get the location of an item: the outermost container, or the item
    /// itself when it is not contained in anything.
    pub fn location_of(&self, id: ItemId) -> ItemId {
        let mut current = id;
        while let Some(parent) = self.parents.get(&current) {
            current = *parent;
        }
        current
    }

    /// Tag an item. Returns false if it already had the tag.
    pub fn tag_item(&mut self, id: ItemId, tag: impl Into<String>) -> Result<bool> {
        let item = self.items.get_mut(&id).ok_or(WorldError::ItemNotFound(id))?;
        Ok(item.tag(tag))
    }

    /// Remove a tag from an item. Returns false if it did not have the tag.
    pub fn untag_item(&mut self, id: ItemId, tag: &str) -> Result<bool> {
        let item = self.items.get_mut(&id).ok_or(WorldError::ItemNotFound(id))?;
        Ok(item.untag(tag))
    }

    /// Set the status message.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
    }

    /// Get the current status message.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Build a serializable snapshot of the world.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            items: self
                .iter()
                .map(|item| SnapshotEntry {
                    item: item.clone(),
                    parent: self.parent_of(item.id),
                })
                .collect(),
            status: self.status.clone(),
        }
    }

    /// Serialize a snapshot of the world as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    fn require(&self, id: ItemId) -> Result<()> {
        if self.items.contains_key(&id) {
            Ok(())
        } else {
            Err(WorldError::ItemNotFound(id))
        }
    }

    /// Whether `id` is somewhere inside `container`.
    fn is_inside(&self, id: ItemId, container: ItemId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parents.get(&current) {
            if *parent == container {
                return true;
            }
            current = *parent;
        }
        false
    }

    fn detach_unchecked(&mut self, child: ItemId) -> Option<ItemId> {
        let parent = self.parents.remove(&child)?;
        if let Some(siblings) = self.children.get_mut(&parent) {
            siblings.retain(|id| *id != child);
            if siblings.is_empty() {
                self.children.remove(&parent);
            }
        }
        Some(parent)
    }
}
