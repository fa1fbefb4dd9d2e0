//! V ノード

use crate::entity::{ClassId, PropertyId, CLASS_TOP};
use std::collections::BTreeSet;

/// Node of the V table: base classes together with existential markers.
///
/// A marker `(r, A)` states that the node has an `r`-successor in `A`, so the
/// node stands for `base ⊓ C₁ ⊓ … ⊓ Cₖ ⊓ ∃r₁.A₁ ⊓ … ⊓ ∃rₙ.Aₙ` where the `Cᵢ`
/// are the extra conjuncts left by merging functional successors. Values are
/// immutable; adding a marker yields a new node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExistentialNode {
    class_id: ClassId,
    conjuncts: BTreeSet<ClassId>,
    existentials: BTreeSet<(PropertyId, ClassId)>,
}

impl ExistentialNode {
    /// Node without markers
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            conjuncts: BTreeSet::new(),
            existentials: BTreeSet::new(),
        }
    }

    pub fn with_existentials(class_id: ClassId, existentials: impl IntoIterator<Item = (PropertyId, ClassId)>) -> Self {
        Self {
            class_id,
            conjuncts: BTreeSet::new(),
            existentials: existentials.into_iter().collect(),
        }
    }

    /// First base class
    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    /// Every base class, the first one included
    pub fn bases(&self) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::once(self.class_id).chain(self.conjuncts.iter().copied())
    }

    /// Copy of this node with one more marker
    pub fn with_existential(&self, property: PropertyId, class_id: ClassId) -> Self {
        let mut existentials = self.existentials.clone();
        existentials.insert((property, class_id));
        Self {
            class_id: self.class_id,
            conjuncts: self.conjuncts.clone(),
            existentials,
        }
    }

    /// Node for `self ⊓ other`.
    ///
    /// Bases are kept in one canonical order so equal conjunctions intern to
    /// the same node; ⊤ is dropped next to any other base.
    pub fn conjoin(&self, other: &ExistentialNode) -> Self {
        let mut bases: BTreeSet<ClassId> = self.bases().chain(other.bases()).collect();
        if bases.len() > 1 {
            bases.remove(&CLASS_TOP);
        }
        let mut bases = bases.into_iter();
        let class_id = bases.next().unwrap_or(CLASS_TOP);
        Self {
            class_id,
            conjuncts: bases.collect(),
            existentials: self.existentials.union(&other.existentials).copied().collect(),
        }
    }

    pub fn has_existential(&self, property: PropertyId, class_id: ClassId) -> bool {
        self.existentials.contains(&(property, class_id))
    }

    pub fn existentials(&self) -> impl Iterator<Item = (PropertyId, ClassId)> + '_ {
        self.existentials.iter().copied()
    }

    /// Classes marked for `property`
    pub fn classes_for(&self, property: PropertyId) -> impl Iterator<Item = ClassId> + '_ {
        self.existentials
            .range((property, ClassId::MIN)..=(property, ClassId::MAX))
            .map(|(_, class_id)| *class_id)
    }

    /// Properties that carry at least one marker
    pub fn properties(&self) -> BTreeSet<PropertyId> {
        self.existentials.iter().map(|(property, _)| *property).collect()
    }

    /// Whether `other` has every base and every marker of `self`, so `other ⊑ self`
    pub fn is_covered_by(&self, other: &ExistentialNode) -> bool {
        self.bases().all(|base| base == other.class_id || other.conjuncts.contains(&base))
            && self.existentials.is_subset(&other.existentials)
    }

    /// Whether the node is just its base class
    pub fn is_trivial(&self) -> bool {
        self.conjuncts.is_empty() && self.existentials.is_empty()
    }
}
