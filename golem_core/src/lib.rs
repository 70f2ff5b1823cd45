//! # Golem Core
//!
//! The rule engine of Golem. Rules such as "drag stone onto hole" are held in
//! a weighted automaton; a player action (an item, optionally dragged onto a
//! target item) is matched against it and the lightest matching rule's effect
//! runs.
//!
//! ## Core Components
//!
//! - **automaton**: States, edges, path search and weight-based selection
//! - **catalog**: The read-only item lookup a search queries
//! - **effects**: The effect contract and built-in actions on the item world
//! - **definition**: Automata described as TOML or JSON data
//!
//! ## Design Philosophy
//!
//! - **Data, not code**: An automaton is plain data built once and then only read
//! - **Injected world**: Items are looked up through a catalog passed to every search, never through globals
//! - **Silent misses**: An action with no rule is a normal outcome, not an error

pub mod automaton;
pub mod catalog;
pub mod definition;
pub mod effects;
pub mod error;

pub use automaton::*;
pub use catalog::*;
pub use definition::*;
pub use effects::*;
pub use error::*;
