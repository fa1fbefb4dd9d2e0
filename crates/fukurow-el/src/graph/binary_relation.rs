//! 二項関係

use std::collections::{BTreeMap, BTreeSet};

pub(crate) static EMPTY_SET: BTreeSet<usize> = BTreeSet::new();

/// Set of integer pairs indexed by both components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryRelation {
    by_first: BTreeMap<usize, BTreeSet<usize>>,
    by_second: BTreeMap<usize, BTreeSet<usize>>,
    len: usize,
}

impl BinaryRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the pair, returning whether it was new
    pub fn add(&mut self, first: usize, second: usize) -> bool {
        let inserted = self.by_first.entry(first).or_default().insert(second);
        if inserted {
            self.by_second.entry(second).or_default().insert(first);
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, first: usize, second: usize) -> bool {
        self.by_first
            .get(&first)
            .map(|seconds| seconds.contains(&second))
            .unwrap_or(false)
    }

    /// All `y` such that `(first, y)` is in the relation
    pub fn by_first(&self, first: usize) -> &BTreeSet<usize> {
        self.by_first.get(&first).unwrap_or(&EMPTY_SET)
    }

    /// All `x` such that `(x, second)` is in the relation
    pub fn by_second(&self, second: usize) -> &BTreeSet<usize> {
        self.by_second.get(&second).unwrap_or(&EMPTY_SET)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.by_first
            .iter()
            .flat_map(|(first, seconds)| seconds.iter().map(move |second| (*first, *second)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
