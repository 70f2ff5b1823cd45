//! Error types for the `golem_world` crate.

use crate::items::ItemId;

/// Errors that can occur while building or rearranging the item world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No item with this ID exists in the world.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// No live item carries this name.
    #[error("no item named {0:?}")]
    NameNotFound(String),

    /// Moving the item would place it inside itself.
    #[error("item {item} cannot be placed inside {container}, which it contains")]
    ContainmentCycle {
        /// The item being moved.
        item: ItemId,
        /// The requested container.
        container: ItemId,
    },

    /// A tag pattern without a leading `+` or `-`, or without a name.
    #[error("invalid tag pattern: {0:?}")]
    InvalidTagPattern(String),

    /// An item description with no name before its tags.
    #[error("invalid item description: {0:?}")]
    InvalidDescription(String),
}

/// Result alias for world operations.
pub type Result<T> = std::result::Result<T, WorldError>;
