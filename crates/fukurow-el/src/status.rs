//! 分類状態 (S・R・V)

use crate::entity::{ClassId, NodeId, PropertyId, CLASS_BOTTOM, CLASS_TOP};
use crate::graph::{ExistentialNode, RelationMap, SubsumerGraph};
use crate::ontology::ExtendedOntology;
use crate::{ElError, Result};
use std::collections::{BTreeSet, HashMap};

/// Live state of one classification run.
///
/// Holds the subsumer graph S over nodes, the successor relation R and the
/// node table V. Class ids are nodes themselves (with no markers); nodes with
/// markers get ids from `first_virtual_id` upward. The three `add`/`create`
/// primitives are the only way to mutate it.
#[derive(Debug)]
pub struct ClassifierStatus {
    ontology: ExtendedOntology,
    subsumers: SubsumerGraph,
    relations: RelationMap,
    classes: BTreeSet<ClassId>,
    nodes: HashMap<NodeId, ExistentialNode>,
    node_ids: HashMap<ExistentialNode, NodeId>,
    nodes_by_base: HashMap<ClassId, Vec<NodeId>>,
    first_virtual_id: NodeId,
    next_node_id: NodeId,
}

impl ClassifierStatus {
    /// Status seeded with one node per class; ⊤ and ⊥ are always included
    pub fn new(
        ontology: ExtendedOntology,
        classes: impl IntoIterator<Item = ClassId>,
        first_virtual_id: NodeId,
    ) -> Result<Self> {
        let mut classes: BTreeSet<ClassId> = classes.into_iter().collect();
        classes.insert(CLASS_BOTTOM);
        classes.insert(CLASS_TOP);

        if let Some(class) = classes.iter().find(|c| **c >= first_virtual_id) {
            return Err(ElError::InvalidArgument(format!(
                "class id {} collides with node ids starting at {}",
                class, first_virtual_id
            )));
        }

        let mut status = Self {
            ontology,
            subsumers: SubsumerGraph::new(CLASS_BOTTOM, CLASS_TOP),
            relations: RelationMap::new(),
            classes: BTreeSet::new(),
            nodes: HashMap::new(),
            node_ids: HashMap::new(),
            nodes_by_base: HashMap::new(),
            first_virtual_id,
            next_node_id: first_virtual_id,
        };
        for class in &classes {
            let node = ExistentialNode::new(*class);
            status.subsumers.add_vertex(*class);
            status.node_ids.insert(node.clone(), *class);
            status.nodes.insert(*class, node);
        }
        status.classes = classes;
        Ok(status)
    }

    pub fn ontology(&self) -> &ExtendedOntology {
        &self.ontology
    }

    /// Insert `sup` into the subsumers of `sub`
    pub fn add_new_s_entry(&mut self, sub: NodeId, sup: ClassId) -> Result<bool> {
        self.check_node(sub)?;
        self.check_class(sup)?;
        Ok(self.subsumers.add_ancestor(sub, sup))
    }

    /// Insert `(left, right)` into the successor relation of `property`
    pub fn add_new_r_entry(&mut self, property: PropertyId, left: NodeId, right: NodeId) -> Result<bool> {
        self.check_node(left)?;
        self.check_node(right)?;
        Ok(self.relations.add(property, left, right))
    }

    /// Id of `node`, interning it when absent.
    ///
    /// A node without markers is its base class.
    pub fn create_or_get_node_id(&mut self, node: &ExistentialNode) -> Result<NodeId> {
        self.check_class(node.class_id())?;
        if let Some(id) = self.node_ids.get(node) {
            return Ok(*id);
        }
        for class in node.bases().chain(node.existentials().map(|(_, class)| class)) {
            self.check_class(class)?;
        }

        let id = self.next_node_id;
        self.next_node_id += 1;
        self.subsumers.add_vertex(id);
        self.node_ids.insert(node.clone(), id);
        self.nodes.insert(id, node.clone());
        for base in node.bases() {
            self.nodes_by_base.entry(base).or_default().push(id);
        }
        Ok(id)
    }

    /// Existing id of `node`, if interned
    pub fn node_id(&self, node: &ExistentialNode) -> Option<NodeId> {
        self.node_ids.get(node).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&ExistentialNode> {
        self.nodes.get(&id)
    }

    pub fn is_virtual(&self, id: NodeId) -> bool {
        id >= self.first_virtual_id
    }

    pub fn is_class(&self, id: ClassId) -> bool {
        self.classes.contains(&id)
    }

    pub fn classes(&self) -> &BTreeSet<ClassId> {
        &self.classes
    }

    /// Virtual nodes having `class` among their bases
    pub fn virtual_nodes_with_base(&self, class: ClassId) -> &[NodeId] {
        self.nodes_by_base.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Virtual nodes other than `id` whose value entails the value of `id`
    pub fn nodes_covering(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        self.virtual_nodes_with_base(node.class_id())
            .iter()
            .copied()
            .filter(|other| *other != id && self.nodes.get(other).is_some_and(|value| node.is_covered_by(value)))
            .collect()
    }

    /// Nodes other than `id` whose value is entailed by the value of `id`
    pub fn nodes_covered_by(&self, id: NodeId) -> BTreeSet<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return BTreeSet::new();
        };
        let mut covered = BTreeSet::new();
        for base in node.bases() {
            covered.insert(base);
            for other in self.virtual_nodes_with_base(base) {
                if self.nodes.get(other).is_some_and(|value| value.is_covered_by(node)) {
                    covered.insert(*other);
                }
            }
        }
        covered.remove(&id);
        covered
    }

    pub fn virtual_node_count(&self) -> usize {
        self.next_node_id - self.first_virtual_id
    }

    /// Recorded subsumers of `node`
    pub fn subsumers(&self, node: NodeId) -> &BTreeSet<ClassId> {
        self.subsumers.recorded_subsumers(node)
    }

    pub fn is_subsumed_by(&self, node: NodeId, class: ClassId) -> bool {
        self.subsumers.is_subsumed_by(node, class)
    }

    pub fn is_bottom_equivalent(&self, node: NodeId) -> bool {
        self.subsumers.is_bottom_equivalent(node)
    }

    /// `y` with `R(property, node, y)`
    pub fn successors(&self, property: PropertyId, node: NodeId) -> &BTreeSet<NodeId> {
        self.relations.by_first(property, node)
    }

    /// `x` with `R(property, x, node)`
    pub fn predecessors(&self, property: PropertyId, node: NodeId) -> &BTreeSet<NodeId> {
        self.relations.by_second(property, node)
    }

    pub fn properties_from(&self, node: NodeId) -> &BTreeSet<PropertyId> {
        self.relations.properties_from(node)
    }

    pub fn properties_to(&self, node: NodeId) -> &BTreeSet<PropertyId> {
        self.relations.properties_to(node)
    }

    pub fn properties_between(&self, left: NodeId, right: NodeId) -> &BTreeSet<PropertyId> {
        self.relations.properties_between(left, right)
    }

    pub fn has_relation(&self, property: PropertyId, left: NodeId, right: NodeId) -> bool {
        self.relations.contains(property, left, right)
    }

    pub fn subsumer_graph(&self) -> &SubsumerGraph {
        &self.subsumers
    }

    pub fn relation_map(&self) -> &RelationMap {
        &self.relations
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if self.nodes.contains_key(&node) {
            Ok(())
        } else {
            Err(ElError::InvalidArgument(format!("unknown node {}", node)))
        }
    }

    fn check_class(&self, class: ClassId) -> Result<()> {
        if self.classes.contains(&class) {
            Ok(())
        } else {
            Err(ElError::InvalidArgument(format!("unknown class {}", class)))
        }
    }
}
