//! Error types for the `golem_core` crate.
//!
//! Matching itself never fails: an action with no rule is a normal outcome.
//! Errors come from building an automaton and from running built-in actions.

use golem_world::WorldError;

use crate::automaton::StateId;

/// Errors raised while constructing an automaton.
#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    /// An edge refers to a state that was never created.
    #[error("unknown state: {0}")]
    UnknownState(StateId),

    /// An edge would close a loop; rule graphs must stay acyclic.
    #[error("edge {from} -> {to} closes a cycle")]
    Cycle {
        /// Source of the offending edge.
        from: StateId,
        /// Destination of the offending edge.
        to: StateId,
    },

    /// Weights rank rules and must not be negative.
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight {
        /// Index of the edge in its definition.
        edge: usize,
        /// The rejected weight.
        weight: i64,
    },

    /// Weight does not fit the weight type.
    #[error("edge {edge} has weight {weight}, which is too large")]
    WeightTooLarge {
        /// Index of the edge in its definition.
        edge: usize,
        /// The rejected weight.
        weight: i64,
    },

    /// An edge definition lacks a field its kind requires.
    #[error("edge {edge} is missing field `{field}`")]
    MissingField {
        /// Index of the edge in its definition.
        edge: usize,
        /// The missing field.
        field: &'static str,
    },

    /// An effect edge names an effect that was not supplied.
    #[error("unknown effect: {0:?}")]
    UnknownEffect(String),

    #[error(transparent)]
    InvalidTag(#[from] WorldError),

    #[error("invalid TOML graph definition: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON graph definition: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a built-in action step.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A 1-based item reference past the collected items.
    #[error("item {index} referenced, but only {available} collected")]
    BadReference {
        /// The 1-based reference.
        index: usize,
        /// Number of collected items.
        available: usize,
    },

    /// No live item with the destination's name.
    #[error("no location named {0:?}")]
    UnknownLocation(String),

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Result alias for automaton construction.
pub type Result<T> = std::result::Result<T, AutomatonError>;
