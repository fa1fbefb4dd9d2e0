//! 包摂グラフ (S)

use super::binary_relation::EMPTY_SET;
use std::collections::{BTreeMap, BTreeSet};

/// Per-vertex set of recorded subsumers.
///
/// A vertex that gets the bottom vertex as subsumer is equivalent to bottom:
/// it is then subsumed by every vertex and further insertions are no-ops.
/// Every vertex is subsumed by the top vertex whether or not it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsumerGraph {
    bottom: usize,
    top: usize,
    subsumers: BTreeMap<usize, BTreeSet<usize>>,
    bottom_equivalents: BTreeSet<usize>,
}

impl SubsumerGraph {
    /// Graph containing only the two reserved vertices
    pub fn new(bottom: usize, top: usize) -> Self {
        let mut graph = Self {
            bottom,
            top,
            subsumers: BTreeMap::new(),
            bottom_equivalents: BTreeSet::new(),
        };
        graph.add_vertex(top);
        graph.add_vertex(bottom);
        graph.add_ancestor(bottom, bottom);
        graph
    }

    pub fn bottom(&self) -> usize {
        self.bottom
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn add_vertex(&mut self, vertex: usize) -> bool {
        if self.subsumers.contains_key(&vertex) {
            return false;
        }
        self.subsumers.insert(vertex, BTreeSet::new());
        true
    }

    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.subsumers.contains_key(&vertex)
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.subsumers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.subsumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsumers.is_empty()
    }

    /// Number of recorded `(vertex, subsumer)` pairs
    pub fn entry_count(&self) -> usize {
        self.subsumers.values().map(BTreeSet::len).sum()
    }

    /// Record `ancestor` as a subsumer of `vertex`.
    ///
    /// Returns `false` when the pair was already recorded or `vertex` is
    /// already equivalent to bottom.
    pub fn add_ancestor(&mut self, vertex: usize, ancestor: usize) -> bool {
        if self.bottom_equivalents.contains(&vertex) {
            return false;
        }
        let inserted = self.subsumers.entry(vertex).or_default().insert(ancestor);
        if inserted && ancestor == self.bottom {
            self.bottom_equivalents.insert(vertex);
        }
        inserted
    }

    /// Whether the pair has been recorded explicitly
    pub fn is_recorded(&self, vertex: usize, ancestor: usize) -> bool {
        self.subsumers
            .get(&vertex)
            .map(|ancestors| ancestors.contains(&ancestor))
            .unwrap_or(false)
    }

    /// Whether `vertex ⊑ ancestor` holds in the graph
    pub fn is_subsumed_by(&self, vertex: usize, ancestor: usize) -> bool {
        ancestor == self.top
            || vertex == ancestor
            || self.bottom_equivalents.contains(&vertex)
            || self.is_recorded(vertex, ancestor)
    }

    pub fn is_bottom_equivalent(&self, vertex: usize) -> bool {
        self.bottom_equivalents.contains(&vertex)
    }

    pub fn bottom_equivalents(&self) -> &BTreeSet<usize> {
        &self.bottom_equivalents
    }

    /// Subsumers recorded for `vertex`, without the bottom expansion
    pub fn recorded_subsumers(&self, vertex: usize) -> &BTreeSet<usize> {
        self.subsumers.get(&vertex).unwrap_or(&EMPTY_SET)
    }

    /// All subsumers of `vertex`, including itself and top.
    ///
    /// A bottom-equivalent vertex yields every vertex of the graph.
    pub fn subsumers(&self, vertex: usize) -> BTreeSet<usize> {
        if !self.contains_vertex(vertex) {
            return BTreeSet::new();
        }
        if self.is_bottom_equivalent(vertex) {
            return self.vertices().collect();
        }
        let mut subsumers = self.recorded_subsumers(vertex).clone();
        subsumers.insert(vertex);
        subsumers.insert(self.top);
        subsumers
    }

    /// Copy of the graph restricted to `keep` (reserved vertices are always kept)
    pub fn restrict(&self, keep: &BTreeSet<usize>) -> SubsumerGraph {
        let mut restricted = SubsumerGraph::new(self.bottom, self.top);
        for vertex in self.vertices().filter(|v| keep.contains(v)) {
            restricted.add_vertex(vertex);
        }
        for (vertex, ancestors) in &self.subsumers {
            if !restricted.contains_vertex(*vertex) {
                continue;
            }
            for ancestor in ancestors {
                if restricted.contains_vertex(*ancestor) {
                    restricted.add_ancestor(*vertex, *ancestor);
                }
            }
        }
        restricted
    }
}
