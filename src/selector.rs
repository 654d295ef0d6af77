//! Picks the slice a spin lands on.
//!
//! Names on the priority list are favoured until each of their slices has
//! won once. After that every slice is equally likely.

use rand::Rng;
use std::collections::BTreeSet;

/// Names the selector favours until they have won.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityNames(Vec<String>);

impl PriorityNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PriorityNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

/// Indices of priority slices that have already won.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WonSet(BTreeSet<usize>);

impl WonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Follows the items after `index` was removed from the list: the removed
    /// index is dropped and every index above it moves down by one.
    pub fn shift_after_removal(&mut self, index: usize) {
        self.0 = self
            .0
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
    }
}

/// Indices whose item is a priority name that has not won yet.
pub fn pending_priority_indices(
    items: &[String],
    priority: &PriorityNames,
    won: &WonSet,
) -> Vec<usize> {
    if priority.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .enumerate()
        .filter(|(index, item)| priority.contains(item) && !won.contains(*index))
        .map(|(index, _)| index)
        .collect()
}

/// Chooses the index the next spin lands on, or `None` for an empty list.
pub fn select_next<R: Rng>(
    items: &[String],
    priority: &PriorityNames,
    won: &WonSet,
    rng: &mut R,
) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    let candidates = pending_priority_indices(items, priority, won);
    let index = if candidates.is_empty() {
        rng.random_range(0..items.len())
    } else {
        candidates[rng.random_range(0..candidates.len())]
    };
    Some(index)
}
