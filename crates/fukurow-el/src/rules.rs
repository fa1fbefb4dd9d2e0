//! 完備化規則
//!
//! 各規則は状態を読み取り、導出した事実を返すだけの純粋関数です。
//! 状態への反映は不動点ドライバ (processor) が行います。

use crate::entity::{ClassId, NodeId, PropertyId, CLASS_BOTTOM};
use crate::graph::ExistentialNode;
use crate::status::ClassifierStatus;

/// Fact produced by a rule, applied by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// `class ∈ S(node)`
    Subsumer { node: NodeId, class: ClassId },
    /// `(left, right) ∈ R(property)`
    Successor {
        property: PropertyId,
        left: NodeId,
        right: NodeId,
    },
    /// `(left, id(node)) ∈ R(property)`, interning `node` first
    Node {
        property: PropertyId,
        left: NodeId,
        node: ExistentialNode,
    },
}

/// Completion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionRule {
    /// A ⊑ B and A₁ ⊓ A₂ ⊑ B
    Cr1,
    /// A ⊑ ∃r.B
    Cr2,
    /// ∃r.A ⊑ B
    Cr3,
    /// subsumers reach every node whose value entails the node
    Cr4,
    /// r ⊑ s
    Cr5,
    /// r ∘ s ⊑ t
    Cr6,
    /// marker synthesis across inverse properties
    Cr7,
    /// successors over a functional property are merged into one node
    Cr8,
    /// CR7 that skips nodes already covered by a successor
    Cr9,
    /// ⊥ propagates to predecessors
    CrBottom,
}

impl CompletionRule {
    pub fn name(&self) -> &'static str {
        match self {
            CompletionRule::Cr1 => "CR1",
            CompletionRule::Cr2 => "CR2",
            CompletionRule::Cr3 => "CR3",
            CompletionRule::Cr4 => "CR4",
            CompletionRule::Cr5 => "CR5",
            CompletionRule::Cr6 => "CR6",
            CompletionRule::Cr7 => "CR7",
            CompletionRule::Cr8 => "CR8",
            CompletionRule::Cr9 => "CR9",
            CompletionRule::CrBottom => "CR-Bottom",
        }
    }

    /// Apply the rule to a new `class ∈ S(node)`
    pub fn apply_s(&self, status: &ClassifierStatus, node: NodeId, class: ClassId, out: &mut Vec<Derivation>) {
        match self {
            CompletionRule::Cr1 => cr1(status, node, class, out),
            CompletionRule::Cr2 => cr2(status, node, class, out),
            CompletionRule::Cr3 => cr3_s(status, node, class, out),
            CompletionRule::Cr4 => cr4(status, node, class, out),
            CompletionRule::Cr7 => synthesize_s(status, node, class, false, out),
            CompletionRule::Cr9 => synthesize_s(status, node, class, true, out),
            CompletionRule::CrBottom => bottom_s(status, node, class, out),
            CompletionRule::Cr5 | CompletionRule::Cr6 | CompletionRule::Cr8 => {}
        }
    }

    /// Apply the rule to a new `(left, right) ∈ R(property)`
    pub fn apply_r(
        &self,
        status: &ClassifierStatus,
        property: PropertyId,
        left: NodeId,
        right: NodeId,
        out: &mut Vec<Derivation>,
    ) {
        match self {
            CompletionRule::Cr3 => cr3_r(status, property, left, right, out),
            CompletionRule::Cr5 => cr5(status, property, left, right, out),
            CompletionRule::Cr6 => cr6(status, property, left, right, out),
            CompletionRule::Cr7 => synthesize_r(status, property, left, right, false, out),
            CompletionRule::Cr9 => synthesize_r(status, property, left, right, true, out),
            CompletionRule::Cr8 => cr8_r(status, property, left, right, out),
            CompletionRule::CrBottom => bottom_r(status, left, right, out),
            CompletionRule::Cr1 | CompletionRule::Cr2 | CompletionRule::Cr4 => {}
        }
    }
}

/// Rules subscribed to S-entries and to R-entries, selected once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChain {
    pub s_chain: Vec<CompletionRule>,
    pub r_chain: Vec<CompletionRule>,
}

impl RuleChain {
    pub fn new(extended: bool, bottom: bool, optimized: bool) -> Self {
        let mut s_chain = vec![
            CompletionRule::Cr1,
            CompletionRule::Cr2,
            CompletionRule::Cr3,
            CompletionRule::Cr4,
        ];
        let mut r_chain = vec![CompletionRule::Cr3, CompletionRule::Cr5, CompletionRule::Cr6];

        if extended {
            let synthesis = if optimized {
                CompletionRule::Cr9
            } else {
                CompletionRule::Cr7
            };
            s_chain.push(synthesis);
            r_chain.extend([synthesis, CompletionRule::Cr8]);
        }
        if bottom {
            s_chain.push(CompletionRule::CrBottom);
            r_chain.push(CompletionRule::CrBottom);
        }

        Self { s_chain, r_chain }
    }

    pub fn contains(&self, rule: CompletionRule) -> bool {
        self.s_chain.contains(&rule) || self.r_chain.contains(&rule)
    }
}

fn subsumer(status: &ClassifierStatus, node: NodeId, class: ClassId, out: &mut Vec<Derivation>) {
    if !status.is_subsumed_by(node, class) {
        out.push(Derivation::Subsumer { node, class });
    }
}

fn successor(status: &ClassifierStatus, property: PropertyId, left: NodeId, right: NodeId, out: &mut Vec<Derivation>) {
    if !status.has_relation(property, left, right) {
        out.push(Derivation::Successor { property, left, right });
    }
}

fn cr1(status: &ClassifierStatus, x: NodeId, a: ClassId, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    for b in ontology.gci0_axioms(a) {
        subsumer(status, x, *b, out);
    }
    for (other, b) in ontology.gci1_axioms(a) {
        if status.is_subsumed_by(x, *other) {
            subsumer(status, x, *b, out);
        }
    }
}

fn cr2(status: &ClassifierStatus, x: NodeId, a: ClassId, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    for (r, b) in ontology.gci2_axioms(a) {
        successor(status, *r, x, *b, out);
    }
}

fn cr3_s(status: &ClassifierStatus, y: NodeId, a: ClassId, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    for r in status.properties_to(y) {
        let supers = ontology.gci3_axioms(*r, a);
        if supers.is_empty() {
            continue;
        }
        for x in status.predecessors(*r, y) {
            for b in supers {
                subsumer(status, *x, *b, out);
            }
        }
    }
}

fn cr3_r(status: &ClassifierStatus, r: PropertyId, x: NodeId, y: NodeId, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    for a in status.subsumers(y) {
        for b in ontology.gci3_axioms(r, *a) {
            subsumer(status, x, *b, out);
        }
    }
}

fn cr4(status: &ClassifierStatus, y: NodeId, c: ClassId, out: &mut Vec<Derivation>) {
    for node in status.nodes_covering(y) {
        subsumer(status, node, c, out);
    }
}

fn cr5(status: &ClassifierStatus, r: PropertyId, x: NodeId, y: NodeId, out: &mut Vec<Derivation>) {
    for s in status.ontology().super_properties(r) {
        successor(status, *s, x, y, out);
    }
}

fn cr6(status: &ClassifierStatus, r: PropertyId, x: NodeId, y: NodeId, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    // (r, x, y) が左側: r ∘ s ⊑ t
    for (s, t) in ontology.ri3_axioms_by_left(r) {
        for z in status.successors(*s, y) {
            successor(status, *t, x, *z, out);
        }
    }
    // (r, x, y) が右側: l ∘ r ⊑ t
    for (l, t) in ontology.ri3_axioms_by_right(r) {
        for w in status.predecessors(*l, x) {
            successor(status, *t, *w, y, out);
        }
    }
}

/// Whether a marker on property `t` can be used by any other rule
fn is_relevant_marker(status: &ClassifierStatus, t: PropertyId) -> bool {
    let ontology = status.ontology();
    !ontology.gci3_fillers_below(t).is_empty()
        || !ontology.ri3_axioms_by_left(t).is_empty()
        || !ontology.ri3_axioms_by_right(t).is_empty()
        || ontology.is_functional(t)
}

/// Request the node `y ⊓ ∃marker` as an `r`-successor of `x`
fn synthesize(
    status: &ClassifierStatus,
    r: PropertyId,
    x: NodeId,
    y: NodeId,
    marker: (PropertyId, ClassId),
    optimized: bool,
    out: &mut Vec<Derivation>,
) {
    let Some(current) = status.node(y) else {
        return;
    };
    if current.has_existential(marker.0, marker.1) {
        return;
    }
    let node = current.with_existential(marker.0, marker.1);

    if optimized {
        let covered = status
            .successors(r, x)
            .iter()
            .filter_map(|z| status.node(*z))
            .any(|existing| node.is_covered_by(existing));
        if covered {
            return;
        }
    } else if status.node_id(&node).is_some_and(|id| status.has_relation(r, x, id)) {
        return;
    }

    out.push(Derivation::Node {
        property: r,
        left: x,
        node,
    });
}

fn synthesize_r(
    status: &ClassifierStatus,
    property: PropertyId,
    x: NodeId,
    y: NodeId,
    optimized: bool,
    out: &mut Vec<Derivation>,
) {
    let ontology = status.ontology();

    // (property, x, y) を r として: y の新しいノードを x から見た逆向きの印で作る
    if let Some(inverse) = ontology.inverse_of(property) {
        let mut markers = Vec::new();
        for a in ontology.gci3_fillers_below(inverse) {
            if status.subsumers(x).contains(a) {
                markers.push((inverse, *a));
            }
        }
        if !status.is_virtual(x) && !ontology.ri3_axioms_by_left(inverse).is_empty() {
            markers.push((inverse, x));
        }
        for (right, t) in ontology.ri3_axioms_by_left(inverse) {
            if !is_relevant_marker(status, *t) {
                continue;
            }
            for a in status.successors(*right, x) {
                if !status.is_virtual(*a) {
                    markers.push((*t, *a));
                }
            }
        }
        for marker in markers {
            synthesize(status, property, x, y, marker, optimized, out);
        }
    }

    // (property, x, y) を s として: inv(r) ∘ s ⊑ t なら x の r 後続に (t, y) を付ける
    if status.is_virtual(y) {
        return;
    }
    for (left, t) in ontology.ri3_axioms_by_right(property) {
        if !is_relevant_marker(status, *t) {
            continue;
        }
        let Some(r) = ontology.inverse_of(*left) else {
            continue;
        };
        for z in status.successors(r, x) {
            synthesize(status, r, x, *z, (*t, y), optimized, out);
        }
    }
}

fn synthesize_s(status: &ClassifierStatus, x: NodeId, a: ClassId, optimized: bool, out: &mut Vec<Derivation>) {
    let ontology = status.ontology();
    for p in ontology.gci3_properties_below(a) {
        let Some(r) = ontology.inverse_of(*p) else {
            continue;
        };
        for y in status.successors(r, x) {
            synthesize(status, r, x, *y, (*p, a), optimized, out);
        }
    }
}

/// `x ⊑ ∃r.y₁` and `x ⊑ ∃r.y₂` with functional `r` give `x ⊑ ∃r.(y₁ ⊓ y₂)`
fn cr8_r(status: &ClassifierStatus, r: PropertyId, x: NodeId, y: NodeId, out: &mut Vec<Derivation>) {
    if !status.ontology().is_functional(r) {
        return;
    }
    let Some(current) = status.node(y) else {
        return;
    };
    for y2 in status.successors(r, x) {
        if *y2 == y {
            continue;
        }
        let Some(other) = status.node(*y2) else {
            continue;
        };
        let merged = current.conjoin(other);
        // 既存の後続が結合を含意していれば CR4 が包含者を運ぶ
        let covered = status
            .successors(r, x)
            .iter()
            .filter_map(|z| status.node(*z))
            .any(|existing| merged.is_covered_by(existing));
        if !covered {
            out.push(Derivation::Node {
                property: r,
                left: x,
                node: merged,
            });
        }
    }
}

fn bottom_r(status: &ClassifierStatus, x: NodeId, y: NodeId, out: &mut Vec<Derivation>) {
    if status.is_bottom_equivalent(y) {
        subsumer(status, x, CLASS_BOTTOM, out);
    }
}

fn bottom_s(status: &ClassifierStatus, y: NodeId, c: ClassId, out: &mut Vec<Derivation>) {
    if c != CLASS_BOTTOM {
        return;
    }
    for r in status.properties_to(y) {
        for x in status.predecessors(*r, y) {
            subsumer(status, *x, CLASS_BOTTOM, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axiom::NormalizedAxiom;
    use crate::entity::{EntityManager, CLASS_TOP};
    use crate::ontology::ExtendedOntology;

    fn status(axioms: &[NormalizedAxiom], manager: &EntityManager) -> ClassifierStatus {
        let ontology = ExtendedOntology::new(axioms, manager);
        ClassifierStatus::new(ontology, 4..10, manager.peek_next_id()).unwrap()
    }

    #[test]
    fn test_chain_selection() {
        let basic = RuleChain::new(false, false, true);
        assert_eq!(basic.s_chain.len(), 4);
        assert!(!basic.contains(CompletionRule::Cr7));
        assert!(!basic.contains(CompletionRule::CrBottom));

        let extended = RuleChain::new(true, true, false);
        assert!(extended.contains(CompletionRule::Cr7));
        assert!(!extended.contains(CompletionRule::Cr9));
        assert!(extended.r_chain.contains(&CompletionRule::CrBottom));

        assert!(RuleChain::new(true, false, true).contains(CompletionRule::Cr9));
    }

    #[test]
    fn test_cr1_uses_conjunctions() {
        let manager = EntityManager::new(10);
        let mut status = status(&[NormalizedAxiom::gci0(4, 5), NormalizedAxiom::gci1(4, 6, 7)], &manager);

        let mut out = Vec::new();
        CompletionRule::Cr1.apply_s(&status, 8, 4, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: 8, class: 5 }]);

        status.add_new_s_entry(8, 6).unwrap();
        out.clear();
        CompletionRule::Cr1.apply_s(&status, 8, 4, &mut out);
        assert!(out.contains(&Derivation::Subsumer { node: 8, class: 7 }));
    }

    #[test]
    fn test_cr3_fires_from_both_sides() {
        let manager = EntityManager::new(10);
        let mut status = status(&[NormalizedAxiom::gci3(10, 5, 6)], &manager);
        status.add_new_r_entry(10, 4, 5).unwrap();
        status.add_new_s_entry(5, 5).unwrap();

        let mut out = Vec::new();
        CompletionRule::Cr3.apply_r(&status, 10, 4, 5, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: 4, class: 6 }]);

        out.clear();
        CompletionRule::Cr3.apply_s(&status, 5, 5, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: 4, class: 6 }]);
    }

    #[test]
    fn test_cr6_joins_on_both_sides() {
        let manager = EntityManager::new(12);
        let mut status = status(&[NormalizedAxiom::ri3(10, 11, 12)], &manager);
        status.add_new_r_entry(10, 4, 5).unwrap();
        status.add_new_r_entry(11, 5, 6).unwrap();

        let mut out = Vec::new();
        CompletionRule::Cr6.apply_r(&status, 10, 4, 5, &mut out);
        assert_eq!(out, vec![Derivation::Successor { property: 12, left: 4, right: 6 }]);

        out.clear();
        CompletionRule::Cr6.apply_r(&status, 11, 5, 6, &mut out);
        assert_eq!(out, vec![Derivation::Successor { property: 12, left: 4, right: 6 }]);
    }

    #[test]
    fn test_bottom_travels_backward() {
        let manager = EntityManager::new(10);
        let mut status = status(&[], &manager);
        status.add_new_r_entry(10, 4, 5).unwrap();
        status.add_new_s_entry(5, CLASS_BOTTOM).unwrap();

        let mut out = Vec::new();
        CompletionRule::CrBottom.apply_s(&status, 5, CLASS_BOTTOM, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: 4, class: CLASS_BOTTOM }]);

        out.clear();
        CompletionRule::CrBottom.apply_r(&status, 10, 4, 5, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: 4, class: CLASS_BOTTOM }]);

        out.clear();
        CompletionRule::CrBottom.apply_s(&status, 5, CLASS_TOP, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cr8_merges_successors_of_virtual_node() {
        let manager = EntityManager::new(12);
        let mut status = status(&[NormalizedAxiom::functional(10)], &manager);
        let x = status
            .create_or_get_node_id(&ExistentialNode::new(4).with_existential(11, 5))
            .unwrap();
        status.add_new_r_entry(10, x, 6).unwrap();
        status.add_new_r_entry(10, x, 7).unwrap();

        let merged = ExistentialNode::new(6).conjoin(&ExistentialNode::new(7));
        let mut out = Vec::new();
        CompletionRule::Cr8.apply_r(&status, 10, x, 7, &mut out);
        assert_eq!(
            out,
            vec![Derivation::Node {
                property: 10,
                left: x,
                node: merged.clone(),
            }]
        );

        // 結合を含意する後続があれば何もしない
        let merged_id = status.create_or_get_node_id(&merged).unwrap();
        status.add_new_r_entry(10, x, merged_id).unwrap();
        out.clear();
        CompletionRule::Cr8.apply_r(&status, 10, x, 7, &mut out);
        assert!(out.is_empty());

        status.add_new_r_entry(12, x, 6).unwrap();
        status.add_new_r_entry(12, x, 7).unwrap();
        CompletionRule::Cr8.apply_r(&status, 12, x, 7, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cr4_reaches_entailing_nodes() {
        let manager = EntityManager::new(12);
        let mut status = status(&[], &manager);
        let marked = ExistentialNode::new(4).with_existential(11, 5);
        let marked_id = status.create_or_get_node_id(&marked).unwrap();
        let merged_id = status
            .create_or_get_node_id(&marked.conjoin(&ExistentialNode::new(6)))
            .unwrap();

        let mut out = Vec::new();
        CompletionRule::Cr4.apply_s(&status, 6, 8, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: merged_id, class: 8 }]);

        out.clear();
        CompletionRule::Cr4.apply_s(&status, marked_id, 8, &mut out);
        assert_eq!(out, vec![Derivation::Subsumer { node: merged_id, class: 8 }]);

        out.clear();
        CompletionRule::Cr4.apply_s(&status, 4, 8, &mut out);
        assert_eq!(
            out,
            vec![
                Derivation::Subsumer { node: marked_id, class: 8 },
                Derivation::Subsumer { node: merged_id, class: 8 },
            ]
        );
    }

    #[test]
    fn test_synthesis_marks_inverse_fillers() {
        let mut manager = EntityManager::new(10);
        let inverse = manager.inverse_or_create(10).unwrap();
        let mut status = status(&[NormalizedAxiom::gci3(inverse, 4, 7)], &manager);
        status.add_new_s_entry(6, 4).unwrap();
        status.add_new_r_entry(10, 6, 5).unwrap();

        let expected = Derivation::Node {
            property: 10,
            left: 6,
            node: ExistentialNode::new(5).with_existential(inverse, 4),
        };

        let mut out = Vec::new();
        CompletionRule::Cr7.apply_r(&status, 10, 6, 5, &mut out);
        assert_eq!(out, vec![expected.clone()]);

        out.clear();
        CompletionRule::Cr9.apply_s(&status, 6, 4, &mut out);
        assert_eq!(out, vec![expected.clone()]);

        // 既に印を持つ後続があれば CR9 は何もしない
        let node_id = status
            .create_or_get_node_id(&ExistentialNode::new(5).with_existential(inverse, 4))
            .unwrap();
        status.add_new_r_entry(10, 6, node_id).unwrap();
        out.clear();
        CompletionRule::Cr9.apply_r(&status, 10, 6, 5, &mut out);
        assert!(out.is_empty());
    }
}
