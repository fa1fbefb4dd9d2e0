//! 完備化の性質テスト
//!
//! 小さなランダムオントロジー上で単調性・冪等性・逆プロパティの対称性と、
//! 二つの合成規則 (CR7/CR9) が同じ分類を返すことを確認します。

use fukurow_el::{
    CelProcessor, ClassExpression, ClassifierConfig, ClassifierStatus, ComplexAxiom, ElReasoner, EntityManager, Expressivity,
    ExtendedOntology, NoProgressMonitor, Normalizer, Ontology, PropertyExpression, RoleSaturator,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

const FIRST_CLASS: usize = 4;
const LAST_CLASS: usize = 10;
const FIRST_PROPERTY: usize = 10;
const LAST_PROPERTY: usize = 13;

fn class() -> impl Strategy<Value = ClassExpression> {
    prop_oneof![
        8 => (FIRST_CLASS..LAST_CLASS).prop_map(ClassExpression::Class),
        1 => Just(ClassExpression::Class(fukurow_el::entity::CLASS_BOTTOM)),
    ]
}

fn property() -> impl Strategy<Value = PropertyExpression> {
    (FIRST_PROPERTY..LAST_PROPERTY).prop_map(PropertyExpression::Property)
}

fn any_property() -> impl Strategy<Value = PropertyExpression> {
    prop_oneof![
        (FIRST_PROPERTY..LAST_PROPERTY).prop_map(PropertyExpression::Property),
        (FIRST_PROPERTY..LAST_PROPERTY).prop_map(PropertyExpression::InverseOf),
    ]
}

/// EL axioms with chains and ⊥, no inverse or functional properties
fn el_axiom() -> impl Strategy<Value = ComplexAxiom> {
    prop_oneof![
        (class(), class()).prop_map(|(sub, sup)| ComplexAxiom::SubClassOf(sub, sup)),
        (class(), property(), class())
            .prop_map(|(sub, p, filler)| ComplexAxiom::SubClassOf(sub, ClassExpression::some(p, filler))),
        (property(), class(), class())
            .prop_map(|(p, filler, sup)| ComplexAxiom::SubClassOf(ClassExpression::some(p, filler), sup)),
        (class(), class(), class()).prop_map(|(a, b, sup)| {
            ComplexAxiom::SubClassOf(ClassExpression::and(vec![a, b]), sup)
        }),
        (property(), property()).prop_map(|(sub, sup)| ComplexAxiom::SubObjectPropertyOf(sub, sup)),
        (property(), property(), property())
            .prop_map(|(r, s, t)| ComplexAxiom::SubPropertyChainOf(vec![r, s], t)),
        property().prop_map(ComplexAxiom::TransitiveObjectProperty),
    ]
}

/// Axioms over the full supported language
fn full_axiom() -> impl Strategy<Value = ComplexAxiom> {
    prop_oneof![
        4 => el_axiom(),
        1 => (class(), any_property(), class())
            .prop_map(|(sub, p, filler)| ComplexAxiom::SubClassOf(sub, ClassExpression::some(p, filler))),
        1 => (any_property(), class(), class())
            .prop_map(|(p, filler, sup)| ComplexAxiom::SubClassOf(ClassExpression::some(p, filler), sup)),
        1 => property().prop_map(ComplexAxiom::FunctionalObjectProperty),
        1 => (property(), class()).prop_map(|(p, c)| ComplexAxiom::ObjectPropertyRange(p, c)),
    ]
}

/// Processor ready to run, built the way the reasoner builds it
fn processor(ontology: &Ontology) -> CelProcessor {
    let mut manager = EntityManager::new(ontology.highest_id());
    let normalized = Normalizer::new(&mut manager).normalize(&ontology.axioms).unwrap();
    let expressivity = Expressivity::detect(&normalized, &manager);
    let saturated = RoleSaturator::new(&mut manager).saturate(&normalized).unwrap();
    let extended = ExtendedOntology::new(&saturated, &manager);

    let mut classes: BTreeSet<usize> = ontology.classes.clone();
    classes.extend(extended.classes().iter().copied());
    classes.extend(manager.auxiliary_classes());
    let status = ClassifierStatus::new(extended, classes, manager.peek_next_id()).unwrap();
    let chain = ElReasoner::new().select_rules(&expressivity);
    CelProcessor::new(status, chain, false, Arc::new(NoProgressMonitor)).unwrap()
}

/// Every recorded S- and R-entry
fn entries(status: &ClassifierStatus) -> (BTreeSet<(usize, usize)>, BTreeSet<(usize, usize, usize)>) {
    let graph = status.subsumer_graph();
    let s = graph
        .vertices()
        .flat_map(move |vertex| graph.recorded_subsumers(vertex).iter().map(move |c| (vertex, *c)))
        .collect();
    let relations = status.relation_map();
    let r = relations
        .properties()
        .flat_map(move |p| {
            relations
                .relation(p)
                .into_iter()
                .flat_map(move |relation| relation.pairs().map(move |(x, y)| (p, x, y)))
        })
        .collect();
    (s, r)
}

/// Subsumption pairs between original classes
fn subsumptions(ontology: &Ontology) -> BTreeSet<(usize, usize)> {
    subsumptions_with(ontology, ClassifierConfig::default())
}

fn subsumptions_with(ontology: &Ontology, config: ClassifierConfig) -> BTreeSet<(usize, usize)> {
    let classification = ElReasoner::with_config(config).classify_ontology(ontology).unwrap();
    let classes = classification.classes();
    classes
        .elements()
        .into_iter()
        .flat_map(|element| classes.subsumers(element).into_iter().map(move |sup| (element, sup)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// S, R and V only grow while the processor runs
    #[test]
    fn prop_status_grows_monotonically(axioms in prop::collection::vec(full_axiom(), 1..12)) {
        let ontology = Ontology::from_axioms(axioms);
        let mut processor = processor(&ontology);
        let (mut s, mut r) = entries(processor.status());
        let mut nodes = processor.status().virtual_node_count();

        while !processor.is_ready() {
            processor.process().unwrap();
            let (next_s, next_r) = entries(processor.status());
            let next_nodes = processor.status().virtual_node_count();
            prop_assert!(next_s.is_superset(&s));
            prop_assert!(next_r.is_superset(&r));
            prop_assert!(next_nodes >= nodes);
            s = next_s;
            r = next_r;
            nodes = next_nodes;
        }
    }

    /// Processing after the fixpoint changes nothing
    #[test]
    fn prop_fixpoint_is_idempotent(axioms in prop::collection::vec(full_axiom(), 1..12)) {
        let ontology = Ontology::from_axioms(axioms);
        let mut processor = processor(&ontology);
        processor.run().unwrap();
        let before = entries(processor.status());
        let nodes = processor.status().virtual_node_count();
        let processed = processor.processed();

        prop_assert!(!processor.process().unwrap());
        processor.run().unwrap();
        prop_assert_eq!(entries(processor.status()), before);
        prop_assert_eq!(processor.status().virtual_node_count(), nodes);
        prop_assert_eq!(processor.processed(), processed);
    }

    /// Adding axioms never retracts a subsumption
    #[test]
    fn prop_more_axioms_more_subsumptions(
        base in prop::collection::vec(el_axiom(), 1..8),
        extra in prop::collection::vec(el_axiom(), 1..4),
    ) {
        let smaller = Ontology::from_axioms(base.clone());
        let mut larger = smaller.clone();
        for axiom in extra {
            larger.add_axiom(axiom);
        }

        let before = subsumptions(&smaller);
        let after = subsumptions(&larger);
        for (sub, sup) in before {
            prop_assert!(after.contains(&(sub, sup)), "{} ⊑ {} was lost", sub, sup);
        }
    }

    /// CR7 and CR9 agree, also when functional successors get merged
    #[test]
    fn prop_plain_and_optimized_synthesis_agree(
        axioms in prop::collection::vec(full_axiom(), 1..10),
        functional in property(),
    ) {
        let mut ontology = Ontology::from_axioms(axioms);
        ontology.add_axiom(ComplexAxiom::FunctionalObjectProperty(functional));

        let optimized = subsumptions_with(&ontology, ClassifierConfig::default());
        let plain = subsumptions_with(
            &ontology,
            ClassifierConfig {
                activate_optimized_rules: false,
                ..ClassifierConfig::default()
            },
        );
        prop_assert_eq!(optimized, plain);
    }

    /// inverse(inverse(r)) == r for every created inverse
    #[test]
    fn prop_inverse_is_an_involution(properties in prop::collection::vec(FIRST_PROPERTY..LAST_PROPERTY, 1..6)) {
        let mut manager = EntityManager::new(LAST_PROPERTY);
        for property in &properties {
            let inverse = manager.inverse_or_create(*property).unwrap();
            prop_assert_eq!(manager.inverse_of(inverse), Some(*property));
            prop_assert_eq!(manager.inverse_or_create(*property).unwrap(), inverse);
        }
    }

    /// The saturated ontology pairs every property with its inverse
    #[test]
    fn prop_saturated_inverses_are_symmetric(axioms in prop::collection::vec(full_axiom(), 1..10)) {
        let ontology = Ontology::from_axioms(axioms);
        let mut manager = EntityManager::new(ontology.highest_id());
        let normalized = Normalizer::new(&mut manager).normalize(&ontology.axioms).unwrap();
        let saturated = RoleSaturator::new(&mut manager).saturate(&normalized).unwrap();
        let extended = ExtendedOntology::new(&saturated, &manager);

        for property in extended.properties() {
            let inverse = extended.inverse_of(*property);
            prop_assert!(inverse.is_some(), "property {} has no inverse", property);
            prop_assert_eq!(inverse.and_then(|i| extended.inverse_of(i)), Some(*property));
        }
    }
}
