//! プロパティごとの後続関係 (R)

use super::binary_relation::{BinaryRelation, EMPTY_SET};
use crate::entity::{NodeId, PropertyId};
use std::collections::{BTreeMap, BTreeSet};

/// Successor relation per object property.
///
/// Besides one [`BinaryRelation`] per property it keeps, for every node, the
/// properties it occurs with on either side and the properties relating each
/// pair of nodes.
#[derive(Debug, Clone, Default)]
pub struct RelationMap {
    relations: BTreeMap<PropertyId, BinaryRelation>,
    properties_by_first: BTreeMap<NodeId, BTreeSet<PropertyId>>,
    properties_by_second: BTreeMap<NodeId, BTreeSet<PropertyId>>,
    properties_by_pair: BTreeMap<(NodeId, NodeId), BTreeSet<PropertyId>>,
    len: usize,
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `(first, second)` to the relation of `property`
    pub fn add(&mut self, property: PropertyId, first: NodeId, second: NodeId) -> bool {
        let inserted = self.relations.entry(property).or_default().add(first, second);
        if inserted {
            self.properties_by_first.entry(first).or_default().insert(property);
            self.properties_by_second.entry(second).or_default().insert(property);
            self.properties_by_pair.entry((first, second)).or_default().insert(property);
            self.len += 1;
        }
        inserted
    }

    pub fn contains(&self, property: PropertyId, first: NodeId, second: NodeId) -> bool {
        self.relations
            .get(&property)
            .map(|relation| relation.contains(first, second))
            .unwrap_or(false)
    }

    pub fn relation(&self, property: PropertyId) -> Option<&BinaryRelation> {
        self.relations.get(&property)
    }

    /// Successors of `first` under `property`
    pub fn by_first(&self, property: PropertyId, first: NodeId) -> &BTreeSet<NodeId> {
        self.relations
            .get(&property)
            .map(|relation| relation.by_first(first))
            .unwrap_or(&EMPTY_SET)
    }

    /// Predecessors of `second` under `property`
    pub fn by_second(&self, property: PropertyId, second: NodeId) -> &BTreeSet<NodeId> {
        self.relations
            .get(&property)
            .map(|relation| relation.by_second(second))
            .unwrap_or(&EMPTY_SET)
    }

    /// Properties for which `first` has a successor
    pub fn properties_from(&self, first: NodeId) -> &BTreeSet<PropertyId> {
        self.properties_by_first.get(&first).unwrap_or(&EMPTY_SET)
    }

    /// Properties for which `second` has a predecessor
    pub fn properties_to(&self, second: NodeId) -> &BTreeSet<PropertyId> {
        self.properties_by_second.get(&second).unwrap_or(&EMPTY_SET)
    }

    /// Properties relating `first` to `second`
    pub fn properties_between(&self, first: NodeId, second: NodeId) -> &BTreeSet<PropertyId> {
        self.properties_by_pair.get(&(first, second)).unwrap_or(&EMPTY_SET)
    }

    pub fn properties(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.relations.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_access_patterns() {
        let mut map = RelationMap::new();
        assert!(map.add(10, 4, 5));
        assert!(map.add(11, 4, 5));
        assert!(map.add(10, 6, 5));
        assert!(!map.add(10, 4, 5));

        assert_eq!(map.len(), 3);
        assert_eq!(map.by_first(10, 4), &BTreeSet::from([5]));
        assert_eq!(map.by_second(10, 5), &BTreeSet::from([4, 6]));
        assert_eq!(map.properties_between(4, 5), &BTreeSet::from([10, 11]));
        assert_eq!(map.properties_from(6), &BTreeSet::from([10]));
        assert_eq!(map.properties_to(5), &BTreeSet::from([10, 11]));
        assert!(map.by_first(12, 4).is_empty());
        assert!(map.properties_between(5, 4).is_empty());
    }

    #[test]
    fn test_relation_map_is_shareable_for_reads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelationMap>();
        assert_send_sync::<BinaryRelation>();
    }
}
