//! Edges - the matching alphabet of the automaton.

use golem_world::TagPattern;

use super::{Path, StateId};
use crate::catalog::ItemCatalog;

/// Cost of following an edge. Lower total weight wins.
pub type Weight = u32;

/// A labelled transition out of a state.
///
/// Name and tag edges look at the current item without consuming it, so
/// several constraints on the same item can be chained. Comma and semicolon
/// edges consume the current item and collect it for the effect. An effect
/// edge ends the match.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge<E> {
    /// The current item has this name, or there is no current item and a
    /// live item with this name exists (it becomes the current item).
    Name {
        name: String,
        weight: Weight,
        dest: StateId,
    },

    /// The current item has (or, with `polarity == false`, lacks) the tag.
    Tag {
        tag: String,
        polarity: bool,
        weight: Weight,
        dest: StateId,
    },

    /// There is a current item; collect it and move on to the next one.
    Comma { weight: Weight, dest: StateId },

    /// At most one item is left; collect it and expect no more input.
    Semicolon { weight: Weight, dest: StateId },

    /// At most one item is left; collect it and select this effect.
    Effect { effect: E, weight: Weight },
}

/// Where the search continues after an edge matched.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step<I> {
    Continue { dest: StateId, input: Vec<I> },
    Complete,
}

impl<E> Edge<E> {
    /// Create a name edge with weight 0.
    pub fn name(name: impl Into<String>, dest: StateId) -> Self {
        Edge::Name {
            name: name.into(),
            weight: 0,
            dest,
        }
    }

    /// Create a tag edge with weight 0.
    pub fn tag(tag: impl Into<String>, polarity: bool, dest: StateId) -> Self {
        Edge::Tag {
            tag: tag.into(),
            polarity,
            weight: 0,
            dest,
        }
    }

    /// Create a tag edge from a signed pattern such as `+Open`.
    pub fn tag_pattern(pattern: TagPattern, dest: StateId) -> Self {
        Self::tag(pattern.name, pattern.polarity, dest)
    }

    /// Create a comma edge with weight 0.
    pub fn comma(dest: StateId) -> Self {
        Edge::Comma { weight: 0, dest }
    }

    /// Create a semicolon edge with weight 0.
    pub fn semicolon(dest: StateId) -> Self {
        Edge::Semicolon { weight: 0, dest }
    }

    /// Create an effect edge with weight 0.
    pub fn effect(effect: E) -> Self {
        Edge::Effect { effect, weight: 0 }
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        match &mut self {
            Edge::Name { weight: w, .. }
            | Edge::Tag { weight: w, .. }
            | Edge::Comma { weight: w, .. }
            | Edge::Semicolon { weight: w, .. }
            | Edge::Effect { weight: w, .. } => *w = weight,
        }
        self
    }

    /// Get the weight.
    pub fn weight(&self) -> Weight {
        match self {
            Edge::Name { weight, .. }
            | Edge::Tag { weight, .. }
            | Edge::Comma { weight, .. }
            | Edge::Semicolon { weight, .. }
            | Edge::Effect { weight, .. } => *weight,
        }
    }

    /// Get the destination state. Effect edges have none.
    pub fn dest(&self) -> Option<StateId> {
        match self {
            Edge::Name { dest, .. }
            | Edge::Tag { dest, .. }
            | Edge::Comma { dest, .. }
            | Edge::Semicolon { dest, .. } => Some(*dest),
            Edge::Effect { .. } => None,
        }
    }

    /// Whether following this edge leaves the input untouched.
    pub fn is_lookahead(&self) -> bool {
        matches!(self, Edge::Name { .. } | Edge::Tag { .. })
    }

    /// Get the kind of this edge.
    pub fn kind(&self) -> &'static str {
        match self {
            Edge::Name { .. } => "name",
            Edge::Tag { .. } => "tag",
            Edge::Comma { .. } => "comma",
            Edge::Semicolon { .. } => "semicolon",
            Edge::Effect { .. } => "effect",
        }
    }

    /// Try to follow this edge out of `source` with the remaining `input`.
    ///
    /// On a match every path in `paths` is updated in place; the caller owns
    /// them, so they must already be copies private to this edge.
    pub(crate) fn follow<'a, C: ItemCatalog>(
        &'a self,
        source: StateId,
        input: &[C::Item],
        paths: &mut [Path<'a, E, C::Item>],
        catalog: &C,
    ) -> Option<Step<C::Item>> {
        match self {
            Edge::Name { name, weight, dest } => {
                let input = match input.first() {
                    Some(head) if catalog.name(head) == Some(name.as_str()) => input.to_vec(),
                    Some(_) => return None,
                    None => vec![catalog.find_by_name(name)?],
                };
                for path in paths.iter_mut() {
                    path.add_weight(*weight);
                }
                tracing::debug!(
                    %source,
                    %dest,
                    item = %catalog.describe(&input[0]),
                    name = %name,
                    weight,
                    "Matched name"
                );
                Some(Step::Continue { dest: *dest, input })
            }
            Edge::Tag {
                tag,
                polarity,
                weight,
                dest,
            } => {
                let head = input.first()?;
                if catalog.has_tag(head, tag) != *polarity {
                    return None;
                }
                for path in paths.iter_mut() {
                    path.add_weight(*weight);
                }
                tracing::debug!(
                    %source,
                    %dest,
                    item = %catalog.describe(head),
                    tag = %tag,
                    polarity,
                    weight,
                    "Matched tag"
                );
                Some(Step::Continue {
                    dest: *dest,
                    input: input.to_vec(),
                })
            }
            Edge::Comma { weight, dest } => {
                let (head, tail) = input.split_first()?;
                for path in paths.iter_mut() {
                    path.push(head.clone());
                    path.add_weight(*weight);
                }
                tracing::debug!(
                    %source,
                    %dest,
                    item = %catalog.describe(head),
                    weight,
                    "Collected item"
                );
                Some(Step::Continue {
                    dest: *dest,
                    input: tail.to_vec(),
                })
            }
            Edge::Semicolon { weight, dest } => {
                if input.len() > 1 {
                    return None;
                }
                for path in paths.iter_mut() {
                    if let Some(head) = input.first() {
                        path.push(head.clone());
                    }
                    path.add_weight(*weight);
                }
                tracing::debug!(%source, %dest, weight, "Collected last item");
                Some(Step::Continue {
                    dest: *dest,
                    input: Vec::new(),
                })
            }
            Edge::Effect { effect, weight } => {
                if input.len() > 1 {
                    return None;
                }
                for path in paths.iter_mut() {
                    if let Some(head) = input.first() {
                        path.push(head.clone());
                    }
                    path.add_weight(*weight);
                    path.effect = Some(effect);
                }
                tracing::debug!(%source, weight, "Reached effect");
                Some(Step::Complete)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golem_world::{ItemId, World};

    type TestPath<'a> = Path<'a, &'static str, ItemId>;

    fn stone_and_hole() -> (World, ItemId, ItemId) {
        let world = World::from_descriptions("stone+Heavy hole").unwrap();
        let stone = world.find_by_name("stone").unwrap();
        let hole = world.find_by_name("hole").unwrap();
        (world, stone, hole)
    }

    #[test]
    fn test_builders_and_accessors() {
        let edge: Edge<()> = Edge::name("stone", StateId(2)).with_weight(3);
        assert_eq!(edge.weight(), 3);
        assert_eq!(edge.dest(), Some(StateId(2)));
        assert!(edge.is_lookahead());
        assert_eq!(edge.kind(), "name");

        let effect = Edge::effect("drop").with_weight(1);
        assert_eq!(effect.dest(), None);
        assert!(!effect.is_lookahead());

        let negative: Edge<()> = Edge::tag_pattern("-Open".parse().unwrap(), StateId(1));
        assert!(matches!(negative, Edge::Tag { polarity: false, ref tag, .. } if tag == "Open"));
    }

    #[test]
    fn test_name_edge_does_not_consume() {
        let (world, stone, hole) = stone_and_hole();
        let edge: Edge<&str> = Edge::name("stone", StateId(1)).with_weight(2);
        let mut paths = vec![TestPath::new()];

        let step = edge.follow(StateId(0), &[stone, hole], &mut paths, &world);

        assert_eq!(
            step,
            Some(Step::Continue {
                dest: StateId(1),
                input: vec![stone, hole]
            })
        );
        assert_eq!(paths[0].weight, 2);
        assert!(paths[0].items.is_empty());
    }

    #[test]
    fn test_name_edge_rejects_other_name() {
        let (world, stone, hole) = stone_and_hole();
        let edge: Edge<&str> = Edge::name("hole", StateId(1));
        let mut paths = vec![TestPath::new()];

        // "hole" is in the world, but the fallback only applies to empty input.
        assert!(edge.follow(StateId(0), &[stone], &mut paths, &world).is_none());
        assert!(edge.follow(StateId(0), &[hole], &mut paths, &world).is_some());
    }

    #[test]
    fn test_name_edge_falls_back_to_registry() {
        let (world, _, hole) = stone_and_hole();
        let edge: Edge<&str> = Edge::name("hole", StateId(1));
        let mut paths = vec![TestPath::new()];

        let step = edge.follow(StateId(0), &[], &mut paths, &world);
        assert_eq!(
            step,
            Some(Step::Continue {
                dest: StateId(1),
                input: vec![hole]
            })
        );

        let missing: Edge<&str> = Edge::name("fountain", StateId(1));
        assert!(missing.follow(StateId(0), &[], &mut paths, &world).is_none());
    }

    #[test]
    fn test_tag_edge_polarity() {
        let (world, stone, hole) = stone_and_hole();
        let heavy: Edge<&str> = Edge::tag("Heavy", true, StateId(1));
        let light: Edge<&str> = Edge::tag("Heavy", false, StateId(1));
        let mut paths = vec![TestPath::new()];

        assert!(heavy.follow(StateId(0), &[stone], &mut paths, &world).is_some());
        assert!(heavy.follow(StateId(0), &[hole], &mut paths, &world).is_none());
        assert!(light.follow(StateId(0), &[hole], &mut paths, &world).is_some());
        assert!(light.follow(StateId(0), &[], &mut paths, &world).is_none());
    }

    #[test]
    fn test_comma_edge_consumes_head() {
        let (world, stone, hole) = stone_and_hole();
        let edge: Edge<&str> = Edge::comma(StateId(1)).with_weight(1);
        let mut paths = vec![TestPath::new()];

        let step = edge.follow(StateId(0), &[stone, hole], &mut paths, &world);
        assert_eq!(
            step,
            Some(Step::Continue {
                dest: StateId(1),
                input: vec![hole]
            })
        );
        assert_eq!(paths[0].items, vec![stone]);
        assert_eq!(paths[0].weight, 1);

        assert!(edge.follow(StateId(0), &[], &mut paths, &world).is_none());
    }

    #[test]
    fn test_semicolon_edge_needs_at_most_one_item() {
        let (world, stone, hole) = stone_and_hole();
        let edge: Edge<&str> = Edge::semicolon(StateId(1));
        let mut paths = vec![TestPath::new()];

        assert!(edge
            .follow(StateId(0), &[stone, hole], &mut paths, &world)
            .is_none());

        let step = edge.follow(StateId(0), &[hole], &mut paths, &world);
        assert_eq!(
            step,
            Some(Step::Continue {
                dest: StateId(1),
                input: vec![]
            })
        );
        assert_eq!(paths[0].items, vec![hole]);

        // Empty input still matches and collects nothing.
        let mut empty = vec![TestPath::new()];
        assert!(edge.follow(StateId(0), &[], &mut empty, &world).is_some());
        assert!(empty[0].items.is_empty());
    }

    #[test]
    fn test_effect_edge_completes_path() {
        let (world, stone, hole) = stone_and_hole();
        let edge = Edge::effect("drop").with_weight(4);
        let mut paths = vec![TestPath::new()];

        assert!(edge
            .follow(StateId(0), &[stone, hole], &mut paths, &world)
            .is_none());
        assert!(!paths[0].is_complete());

        let step = edge.follow(StateId(0), &[stone], &mut paths, &world);
        assert_eq!(step, Some(Step::Complete));
        assert!(paths[0].is_complete());
        assert_eq!(paths[0].effect, Some(&"drop"));
        assert_eq!(paths[0].items, vec![stone]);
        assert_eq!(paths[0].weight, 4);
    }
}
