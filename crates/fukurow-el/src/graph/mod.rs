//! S・R・V を支えるグラフ構造

pub mod binary_relation;
pub mod existential_node;
pub mod relation_map;
pub mod subsumer_graph;

pub use binary_relation::BinaryRelation;
pub use existential_node::ExistentialNode;
pub use relation_map::RelationMap;
pub use subsumer_graph::SubsumerGraph;
