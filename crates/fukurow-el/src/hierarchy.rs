//! 分類結果の階層ビュー

use crate::graph::SubsumerGraph;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Queries over a final [`SubsumerGraph`].
///
/// Ancestors and descendants are strict (equivalent elements excluded);
/// parents and children are the direct ones.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    graph: SubsumerGraph,
    subsumers: BTreeMap<usize, BTreeSet<usize>>,
    subsumees: BTreeMap<usize, BTreeSet<usize>>,
}

impl Hierarchy {
    pub fn new(graph: SubsumerGraph) -> Self {
        let mut subsumers = BTreeMap::new();
        let mut subsumees: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for vertex in graph.vertices() {
            let above = graph.subsumers(vertex);
            for ancestor in &above {
                subsumees.entry(*ancestor).or_default().insert(vertex);
            }
            subsumers.insert(vertex, above);
        }
        Self {
            graph,
            subsumers,
            subsumees,
        }
    }

    pub fn graph(&self) -> &SubsumerGraph {
        &self.graph
    }

    pub fn elements(&self) -> BTreeSet<usize> {
        self.graph.vertices().collect()
    }

    pub fn contains(&self, element: usize) -> bool {
        self.graph.contains_vertex(element)
    }

    /// Whether `sub ⊑ sup`
    pub fn is_subsumed_by(&self, sub: usize, sup: usize) -> bool {
        self.subsumers
            .get(&sub)
            .map(|above| above.contains(&sup))
            .unwrap_or(false)
    }

    /// All subsumers, including the element itself
    pub fn subsumers(&self, element: usize) -> BTreeSet<usize> {
        self.subsumers.get(&element).cloned().unwrap_or_default()
    }

    pub fn equivalents(&self, element: usize) -> BTreeSet<usize> {
        self.subsumers(element)
            .into_iter()
            .filter(|other| self.is_subsumed_by(*other, element))
            .collect()
    }

    pub fn ancestors(&self, element: usize) -> BTreeSet<usize> {
        self.subsumers(element)
            .into_iter()
            .filter(|other| !self.is_subsumed_by(*other, element))
            .collect()
    }

    pub fn descendants(&self, element: usize) -> BTreeSet<usize> {
        self.subsumees
            .get(&element)
            .map(|below| {
                below
                    .iter()
                    .copied()
                    .filter(|other| !self.is_subsumed_by(element, *other))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Minimal strict ancestors
    pub fn parents(&self, element: usize) -> BTreeSet<usize> {
        let ancestors = self.ancestors(element);
        ancestors
            .iter()
            .copied()
            .filter(|candidate| {
                !ancestors
                    .iter()
                    .any(|other| other != candidate && self.is_strictly_below(*other, *candidate))
            })
            .collect()
    }

    /// Maximal strict descendants
    pub fn children(&self, element: usize) -> BTreeSet<usize> {
        let descendants = self.descendants(element);
        descendants
            .iter()
            .copied()
            .filter(|candidate| {
                !descendants
                    .iter()
                    .any(|other| other != candidate && self.is_strictly_below(*candidate, *other))
            })
            .collect()
    }

    fn is_strictly_below(&self, sub: usize, sup: usize) -> bool {
        self.is_subsumed_by(sub, sup) && !self.is_subsumed_by(sup, sub)
    }
}

/// Serialized as a map from each element to its direct parents
impl Serialize for Hierarchy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let parents: BTreeMap<usize, BTreeSet<usize>> = self
            .graph
            .vertices()
            .map(|element| (element, self.parents(element)))
            .collect();
        parents.serialize(serializer)
    }
}
