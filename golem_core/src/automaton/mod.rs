//! Automaton - weighted rules matched against player actions.
//!
//! A search works as follows:
//! 1. **Input**: the acted-upon item, plus the target item for a drag
//! 2. **Seed**: a single path with no weight and no collected items
//! 3. **Enumeration**: from each state, every outgoing edge is tried in order
//!    on its own copy of the paths; matching edges continue into their
//!    destination, effect edges complete their paths
//! 4. **Selection**: the complete path with the smallest weight wins, the
//!    first one found among equals
//! 5. **Effect**: the winner's effect runs with the items it collected

mod edge;
mod path;

pub use edge::*;
pub use path::*;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::effects::Effect;
use crate::error::{AutomatonError, Result};

/// Index of a state in its automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub usize);

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A state and its outgoing edges, in the order they are tried.
#[derive(Debug, Clone)]
pub struct State<E> {
    edges: Vec<Edge<E>>,
}

impl<E> State<E> {
    fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Get the outgoing edges.
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }
}

/// Configuration for the path search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Most states a single search may visit. A search that would visit more
    /// selects nothing.
    pub max_visits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_visits: 4096 }
    }
}

/// The rule automaton. State 0 is the initial state.
#[derive(Debug, Clone)]
pub struct Automaton<E> {
    states: Vec<State<E>>,
    config: SearchConfig,
}

impl<E> Default for Automaton<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Automaton<E> {
    /// Create an automaton holding only its initial state.
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    /// Create an automaton with the given search configuration.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            states: vec![State::new()],
            config,
        }
    }

    /// Get the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The initial state.
    pub fn initial(&self) -> StateId {
        StateId(0)
    }

    /// Add a new state with no outgoing edges.
    pub fn create_state(&mut self) -> StateId {
        self.states.push(State::new());
        StateId(self.states.len() - 1)
    }

    /// Get a state by ID.
    pub fn state(&self, id: StateId) -> Option<&State<E>> {
        self.states.get(id.0)
    }

    /// Get the total number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Iterate over all states with their IDs.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State<E>)> {
        self.states.iter().enumerate().map(|(i, s)| (StateId(i), s))
    }

    /// Add an outgoing edge to `source`.
    ///
    /// Returns the edge's destination (or `source` for an effect edge) so that
    /// a rule can be built as a chain. Both states must exist, and the edge may
    /// not close a loop: the rule graph stays acyclic.
    pub fn attach(&mut self, source: StateId, edge: Edge<E>) -> Result<StateId> {
        if source.0 >= self.states.len() {
            return Err(AutomatonError::UnknownState(source));
        }
        let dest = edge.dest();
        if let Some(dest) = dest {
            if dest.0 >= self.states.len() {
                return Err(AutomatonError::UnknownState(dest));
            }
            if self.reaches(dest, source) {
                return Err(AutomatonError::Cycle { from: source, to: dest });
            }
        }

        tracing::trace!(%source, kind = edge.kind(), weight = edge.weight(), "Attached edge");
        self.states[source.0].edges.push(edge);
        Ok(dest.unwrap_or(source))
    }

    /// Whether `to` can be reached from `from`.
    fn reaches(&self, from: StateId, to: StateId) -> bool {
        let mut seen = vec![false; self.states.len()];
        let mut stack = vec![from];
        while let Some(state) = stack.pop() {
            if state == to {
                return true;
            }
            if std::mem::replace(&mut seen[state.0], true) {
                continue;
            }
            stack.extend(
                self.states[state.0]
                    .edges
                    .iter()
                    .filter_map(Edge::dest),
            );
        }
        false
    }

    /// Find the rule matching an action without running it.
    ///
    /// `target` is the item dragged onto, if any. Returns the lightest complete
    /// path, or `None` when no rule matches or the search exceeded
    /// [`SearchConfig::max_visits`].
    pub fn select<'a, C: ItemCatalog>(
        &'a self,
        catalog: &C,
        item: C::Item,
        target: Option<C::Item>,
    ) -> Option<Match<'a, E, C::Item>> {
        let mut input = vec![item];
        input.extend(target);

        let mut found = Vec::new();
        let mut visits = 0;
        if !self.search(self.initial(), &input, &[Path::new()], catalog, &mut found, &mut visits) {
            tracing::warn!(
                max_visits = self.config.max_visits,
                "Search limit reached; no rule selected"
            );
            return None;
        }

        let best = select_lightest(found);
        match &best {
            Some(m) => tracing::debug!(weight = m.weight, items = m.items.len(), "Selected rule"),
            None => tracing::debug!("No rule matched"),
        }
        best
    }

    /// Run the rule matching an action against `world`.
    ///
    /// Returns whether an effect ran. An action no rule matches does nothing.
    pub fn apply<C>(&self, world: &mut C, item: C::Item, target: Option<C::Item>) -> bool
    where
        C: ItemCatalog,
        E: Effect<C>,
    {
        tracing::debug!(
            item = %world.describe(&item),
            target = ?target.as_ref().map(|t| world.describe(t)),
            "Apply"
        );
        let Some(found) = self.select(&*world, item, target) else {
            return false;
        };
        found.effect.invoke(self, &found.items, world);
        true
    }

    /// Returns `false` once the visit limit cut the search short.
    fn search<'a, C: ItemCatalog>(
        &'a self,
        state: StateId,
        input: &[C::Item],
        paths: &[Path<'a, E, C::Item>],
        catalog: &C,
        found: &mut Vec<Path<'a, E, C::Item>>,
        visits: &mut usize,
    ) -> bool {
        let Some(node) = self.states.get(state.0) else {
            return true;
        };
        if *visits >= self.config.max_visits {
            return false;
        }
        *visits += 1;
        tracing::trace!(%state, input = input.len(), "Visiting state");

        for edge in &node.edges {
            let mut forked = paths.to_vec();
            match edge.follow(state, input, &mut forked, catalog) {
                Some(Step::Continue { dest, input }) => {
                    if !self.search(dest, &input, &forked, catalog, found, visits) {
                        return false;
                    }
                }
                Some(Step::Complete) => found.extend(forked),
                None => {}
            }
        }
        true
    }

    /// Render the automaton as a Graphviz digraph.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

const TAG_COLOR: &str = "#5eb26b";
const COMMA_COLOR: &str = "#4dbce9";
const SEMICOLON_COLOR: &str = "#ad2bad";
const EFFECT_COLOR: &str = "#ff6a4d";

impl<E> std::fmt::Display for Automaton<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "digraph automaton {{")?;
        writeln!(f, "  rankdir=LR;")?;
        writeln!(f, "  node [shape=circle, fontname=Avenir];")?;
        writeln!(f, "  edge [fontname=Avenir];")?;
        writeln!(f, "  sink [shape=point, color=\"{}\"];", EFFECT_COLOR)?;
        for (id, state) in self.states() {
            writeln!(f, "  {} [label=\"{}\"];", id, id.0)?;
            for edge in state.edges() {
                let (label, color) = match edge {
                    Edge::Name { name, .. } => (name.clone(), None),
                    Edge::Tag { tag, polarity, .. } => {
                        let sign = if *polarity { '+' } else { '-' };
                        (format!("{}{}", sign, tag), Some(TAG_COLOR))
                    }
                    Edge::Comma { .. } => (String::new(), Some(COMMA_COLOR)),
                    Edge::Semicolon { .. } => (String::new(), Some(SEMICOLON_COLOR)),
                    Edge::Effect { .. } => (String::new(), Some(EFFECT_COLOR)),
                };
                let dest = edge
                    .dest()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "sink".to_string());
                write!(f, "  {} -> {} [label=\"{}", id, dest, label)?;
                if edge.weight() > 0 {
                    write!(f, "/{}", edge.weight())?;
                }
                write!(f, "\"")?;
                if let Some(color) = color {
                    write!(f, ", color=\"{}\"", color)?;
                }
                writeln!(f, "];")?;
            }
        }
        write!(f, "}}")
    }
}
