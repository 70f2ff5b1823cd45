//! Paths - candidate matches tracked during a search.

use super::Weight;

/// A candidate match through the automaton.
///
/// Paths never outlive the search that created them. Each branch of the search
/// works on its own copy, so sibling edges accumulate weight independently.
#[derive(Debug)]
pub struct Path<'a, E, I> {
    /// Sum of the weights of the followed edges.
    pub weight: Weight,
    /// Items collected by consuming edges, in consumption order.
    pub items: Vec<I>,
    /// Set once an effect edge was reached.
    pub effect: Option<&'a E>,
}

impl<E, I> Path<'_, E, I> {
    /// Create a fresh seed path: no weight, no items, no effect.
    pub fn new() -> Self {
        Self {
            weight: 0,
            items: Vec::new(),
            effect: None,
        }
    }

    /// A path is complete once it has an effect.
    pub fn is_complete(&self) -> bool {
        self.effect.is_some()
    }

    /// Add the weight of a followed edge.
    pub fn add_weight(&mut self, weight: Weight) {
        self.weight = self.weight.saturating_add(weight);
    }

    /// Collect an item.
    pub fn push(&mut self, item: I) {
        self.items.push(item);
    }
}

impl<E, I> Default for Path<'_, E, I> {
    fn default() -> Self {
        Self::new()
    }
}

// Deep copy of the record; the effect is shared since the automaton owns it.
impl<E, I: Clone> Clone for Path<'_, E, I> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight,
            items: self.items.clone(),
            effect: self.effect,
        }
    }
}

/// The winning path of a search.
#[derive(Debug)]
pub struct Match<'a, E, I> {
    pub effect: &'a E,
    pub items: Vec<I>,
    pub weight: Weight,
}

impl<E, I> Match<'_, E, I> {
    /// Get a collected item by its 1-based reference.
    pub fn item(&self, reference: usize) -> Option<&I> {
        reference.checked_sub(1).and_then(|i| self.items.get(i))
    }
}

/// Pick the complete path with the smallest weight.
///
/// Only a strictly lighter path replaces the current best, so among equal
/// weights the first one enumerated wins. Incomplete paths are ignored.
pub fn select_lightest<'a, E, I>(
    paths: impl IntoIterator<Item = Path<'a, E, I>>,
) -> Option<Match<'a, E, I>> {
    let mut best: Option<Match<'a, E, I>> = None;
    for path in paths {
        let Some(effect) = path.effect else {
            continue;
        };
        if best.as_ref().map_or(true, |b| path.weight < b.weight) {
            best = Some(Match {
                effect,
                items: path.items,
                weight: path.weight,
            });
        }
    }
    best
}
