//! # Golem World
//!
//! The item world the rule engine acts upon: named, tagged items arranged in a
//! containment tree, with a by-name registry used to resolve implicit targets.
//! This crate holds no rule logic.

pub mod error;
pub mod items;
pub mod world_state;

pub use error::*;
pub use items::*;
pub use world_state::*;
