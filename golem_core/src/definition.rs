//! Declarative graph definitions, loaded from TOML or JSON.
//!
//! A definition lists how many states the automaton has and the edges between
//! them. Effect edges name their effect; names are resolved when the automaton
//! is built, either against a caller-supplied table or against the actions
//! declared in the definition itself.

use golem_world::TagPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::automaton::{Automaton, Edge, SearchConfig, StateId, Weight};
use crate::effects::Action;
use crate::error::{AutomatonError, Result};

/// Kinds of edges in a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Name,
    Tag,
    Comma,
    Semicolon,
    Effect,
}

/// One edge of a graph definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub from: usize,
    /// Destination; not used by effect edges.
    #[serde(default)]
    pub to: Option<usize>,
    pub kind: EdgeKind,
    /// Item name, for name edges.
    #[serde(default)]
    pub name: Option<String>,
    /// Signed tag such as `+Open`, for tag edges.
    #[serde(default)]
    pub tag: Option<String>,
    /// Effect name, for effect edges.
    #[serde(default)]
    pub effect: Option<String>,
    /// Signed so that negative weights can be reported instead of failing to parse.
    #[serde(default)]
    pub weight: i64,
}

/// A whole automaton, as data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphDefinition {
    /// Number of states, the initial one included.
    pub states: usize,

    /// Overrides [`SearchConfig::max_visits`].
    #[serde(default)]
    pub max_visits: Option<usize>,

    #[serde(default)]
    pub edges: Vec<EdgeDefinition>,

    /// Named built-in actions that effect edges may refer to.
    #[serde(default)]
    pub actions: BTreeMap<String, Action>,
}

impl GraphDefinition {
    /// Parse a definition from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a definition from JSON.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Build an automaton, resolving effect names against `effects`.
    ///
    /// Edges are attached in definition order, which is also the order the
    /// search tries them in.
    pub fn build<E: Clone>(&self, effects: &HashMap<String, E>) -> Result<Automaton<E>> {
        let mut config = SearchConfig::default();
        if let Some(max_visits) = self.max_visits {
            config.max_visits = max_visits;
        }

        let mut automaton = Automaton::with_config(config);
        for _ in 1..self.states {
            automaton.create_state();
        }

        for (index, def) in self.edges.iter().enumerate() {
            let weight = edge_weight(index, def.weight)?;
            let dest = || {
                def.to.map(StateId).ok_or(AutomatonError::MissingField {
                    edge: index,
                    field: "to",
                })
            };
            let edge = match def.kind {
                EdgeKind::Name => Edge::name(required(index, &def.name, "name")?, dest()?),
                EdgeKind::Tag => {
                    let pattern: TagPattern = required(index, &def.tag, "tag")?.parse()?;
                    Edge::tag_pattern(pattern, dest()?)
                }
                EdgeKind::Comma => Edge::comma(dest()?),
                EdgeKind::Semicolon => Edge::semicolon(dest()?),
                EdgeKind::Effect => {
                    let name = required(index, &def.effect, "effect")?;
                    let effect = effects
                        .get(name)
                        .cloned()
                        .ok_or_else(|| AutomatonError::UnknownEffect(name.to_string()))?;
                    Edge::effect(effect)
                }
            };
            automaton.attach(StateId(def.from), edge.with_weight(weight))?;
        }

        tracing::debug!(
            states = automaton.state_count(),
            edges = self.edges.len(),
            "Built automaton from definition"
        );
        Ok(automaton)
    }

    /// Build an automaton whose effects are the actions declared in the definition.
    pub fn build_actions(&self) -> Result<Automaton<Action>> {
        let actions: HashMap<String, Action> = self
            .actions
            .iter()
            .map(|(name, action)| (name.clone(), action.clone()))
            .collect();
        self.build(&actions)
    }
}

fn required<'a>(edge: usize, value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or(AutomatonError::MissingField { edge, field })
}

fn edge_weight(edge: usize, weight: i64) -> Result<Weight> {
    if weight < 0 {
        return Err(AutomatonError::NegativeWeight { edge, weight });
    }
    Weight::try_from(weight).map_err(|_| AutomatonError::WeightTooLarge { edge, weight })
}
