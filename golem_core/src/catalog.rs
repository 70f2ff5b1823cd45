//! The read-only view of the item world that the matcher queries.

use golem_world::{ItemId, World};

/// Lookup service passed to every search.
///
/// Items are opaque handles; the catalog answers the two questions an edge can
/// ask about one (its name, whether it has a tag) and resolves a name to a
/// default item for rules that mention a fixed world object.
pub trait ItemCatalog {
    type Item: Clone + std::fmt::Debug;

    /// The name of an item, or `None` if the handle is stale.
    fn name(&self, item: &Self::Item) -> Option<&str>;

    /// Whether the item carries the tag.
    fn has_tag(&self, item: &Self::Item, tag: &str) -> bool;

    /// A live item with this name, if any.
    fn find_by_name(&self, name: &str) -> Option<Self::Item>;

    /// Short text for log lines.
    fn describe(&self, item: &Self::Item) -> String {
        self.name(item)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{:?}", item))
    }
}

impl ItemCatalog for World {
    type Item = ItemId;

    fn name(&self, item: &ItemId) -> Option<&str> {
        self.get(*item).map(|i| i.name.as_str())
    }

    fn has_tag(&self, item: &ItemId, tag: &str) -> bool {
        self.get(*item).is_some_and(|i| i.has_tag(tag))
    }

    fn find_by_name(&self, name: &str) -> Option<ItemId> {
        World::find_by_name(self, name)
    }

    fn describe(&self, item: &ItemId) -> String {
        self.get(*item)
            .map(|i| i.to_string())
            .unwrap_or_else(|| item.to_string())
    }
}
