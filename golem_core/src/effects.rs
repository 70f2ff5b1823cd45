//! Effects - what happens once a rule matched.
//!
//! Any `Fn(&[Item], &mut World)` closure is an effect. [`Action`] provides the
//! usual building blocks for the item world: status messages, moving,
//! removing and tagging items. Items are referenced 1-based, in the order the
//! rule collected them.

use golem_world::{ItemId, World, WorldError};
use serde::{Deserialize, Serialize};

use crate::automaton::Automaton;
use crate::catalog::ItemCatalog;
use crate::error::ActionError;

/// The effect of a rule, run once per successful [`Automaton::apply`].
pub trait Effect<C: ItemCatalog>: Sized {
    /// Run the effect with the items collected by the winning path.
    fn invoke(&self, automaton: &Automaton<Self>, items: &[C::Item], world: &mut C);
}

impl<C, F> Effect<C> for F
where
    C: ItemCatalog,
    F: Fn(&[C::Item], &mut C),
{
    fn invoke(&self, _automaton: &Automaton<Self>, items: &[C::Item], world: &mut C) {
        self(items, world)
    }
}

/// Built-in effects on the item world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Show a message to the player.
    Status { text: String },

    /// Put collected item `item` inside collected item `into`.
    Move { item: usize, into: usize },

    /// Put collected item `item` inside the world item named `location`.
    MoveTo { item: usize, location: String },

    /// Take collected item `item` out of its container.
    Remove { item: usize },

    /// Give collected item `item` the tag.
    AddTag { item: usize, tag: String },

    /// Take the tag off collected item `item`.
    RemoveTag { item: usize, tag: String },

    /// Tag the world item named `name`, which need not be a collected item.
    TagNamed { name: String, tag: String },

    /// Run actions in order. A failing step does not stop the others.
    Sequence { actions: Vec<Action> },
}

impl Action {
    /// Create a status action.
    pub fn status(text: impl Into<String>) -> Self {
        Action::Status { text: text.into() }
    }

    /// Create a move action between collected items.
    pub fn move_into(item: usize, into: usize) -> Self {
        Action::Move { item, into }
    }

    /// Create a move action into a named location.
    pub fn move_to(item: usize, location: impl Into<String>) -> Self {
        Action::MoveTo {
            item,
            location: location.into(),
        }
    }

    /// Create a remove action.
    pub fn remove(item: usize) -> Self {
        Action::Remove { item }
    }

    /// Create a tagging action.
    pub fn add_tag(item: usize, tag: impl Into<String>) -> Self {
        Action::AddTag {
            item,
            tag: tag.into(),
        }
    }

    /// Create an untagging action.
    pub fn remove_tag(item: usize, tag: impl Into<String>) -> Self {
        Action::RemoveTag {
            item,
            tag: tag.into(),
        }
    }

    /// Create an action tagging a named world item.
    pub fn tag_named(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Action::TagNamed {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Create a sequence of actions.
    pub fn seq(actions: impl IntoIterator<Item = Action>) -> Self {
        Action::Sequence {
            actions: actions.into_iter().collect(),
        }
    }

    /// Run the action against the world.
    pub fn run(&self, items: &[ItemId], world: &mut World) -> Result<(), ActionError> {
        match self {
            Action::Status { text } => world.set_status(text.clone()),
            Action::Move { item, into } => {
                let item = reference(items, *item)?;
                let into = reference(items, *into)?;
                world.append_child(into, item)?;
            }
            Action::MoveTo { item, location } => {
                let item = reference(items, *item)?;
                let location = world
                    .find_by_name(location)
                    .ok_or_else(|| ActionError::UnknownLocation(location.clone()))?;
                world.append_child(location, item)?;
            }
            Action::Remove { item } => {
                world.detach(reference(items, *item)?)?;
            }
            Action::AddTag { item, tag } => {
                world.tag_item(reference(items, *item)?, tag.clone())?;
            }
            Action::RemoveTag { item, tag } => {
                world.untag_item(reference(items, *item)?, tag)?;
            }
            Action::TagNamed { name, tag } => {
                let id = world
                    .find_by_name(name)
                    .ok_or_else(|| WorldError::NameNotFound(name.clone()))?;
                world.tag_item(id, tag.clone())?;
            }
            Action::Sequence { actions } => {
                for action in actions {
                    action.invoke_step(items, world);
                }
            }
        }
        Ok(())
    }

    fn invoke_step(&self, items: &[ItemId], world: &mut World) {
        if let Err(error) = self.run(items, world) {
            tracing::warn!(%error, action = ?self, "Effect step skipped");
        }
    }
}

impl Effect<World> for Action {
    fn invoke(&self, _automaton: &Automaton<Self>, items: &[ItemId], world: &mut World) {
        self.invoke_step(items, world);
    }
}

/// Resolve a 1-based item reference.
fn reference(items: &[ItemId], index: usize) -> Result<ItemId, ActionError> {
    index
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .copied()
        .ok_or(ActionError::BadReference {
            index,
            available: items.len(),
        })
}
