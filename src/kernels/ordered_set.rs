//! This module contains a small, pure ordered-set utility: a de-duplicating
//! collection that preserves insertion order of first occurrence.
//!
//! It backs two contracts that both require "stable, first-seen order, no
//! duplicates": column summary category detection, and the union of
//! schema-declared categories with data-derived categories during
//! reconciliation. Keeping it in one place avoids ad hoc per-field logic.

use std::hash::Hash;

use hashbrown::HashSet;

/// A set that remembers the order in which distinct values first appeared.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet<T: Eq + Hash + Clone> {
    seen: HashSet<T>,
    order: Vec<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            order: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a value; returns `true` if it was not already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.order.push(value);
            true
        } else {
            false
        }
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.order
    }
}

/// Stable first-seen-order union of two value sequences, duplicates removed.
pub fn union_preserving_order<T: Eq + Hash + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut set = OrderedSet::with_capacity(first.len() + second.len());
    set.extend(first.iter().cloned());
    set.extend(second.iter().cloned());
    set.into_vec()
}
