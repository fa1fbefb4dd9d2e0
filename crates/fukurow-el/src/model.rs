//! 入力オントロジーのデータモデル

use crate::entity::{ClassId, IndividualId, PropertyId, FIRST_USER_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Object property expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyExpression {
    /// Named object property
    Property(PropertyId),
    /// Inverse property: R⁻
    InverseOf(PropertyId),
}

impl PropertyExpression {
    pub fn named_property(&self) -> PropertyId {
        match self {
            PropertyExpression::Property(id) | PropertyExpression::InverseOf(id) => *id,
        }
    }
}

/// EL++ class expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassExpression {
    /// Named class, including the reserved ⊤ and ⊥ ids
    Class(ClassId),

    /// Singleton class: {a}
    Nominal(IndividualId),

    /// Intersection of classes: C1 ⊓ C2 ⊓ ... ⊓ Cn
    IntersectionOf(Vec<ClassExpression>),

    /// Existential restriction: ∃R.C
    SomeValuesFrom {
        property: PropertyExpression,
        filler: Box<ClassExpression>,
    },

    /// Has value: ∃R.{a}
    HasValue {
        property: PropertyExpression,
        individual: IndividualId,
    },
}

impl ClassExpression {
    pub fn some(property: PropertyExpression, filler: ClassExpression) -> Self {
        ClassExpression::SomeValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    pub fn and(operands: Vec<ClassExpression>) -> Self {
        ClassExpression::IntersectionOf(operands)
    }
}

/// Axiom accepted by the normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexAxiom {
    /// SubClassOf(C1 C2)
    SubClassOf(ClassExpression, ClassExpression),

    /// EquivalentClasses(C1 ... Cn)
    EquivalentClasses(Vec<ClassExpression>),

    /// DisjointClasses(C1 ... Cn)
    DisjointClasses(Vec<ClassExpression>),

    /// SubObjectPropertyOf(P1 P2)
    SubObjectPropertyOf(PropertyExpression, PropertyExpression),

    /// SubObjectPropertyOf(ObjectPropertyChain(P1 ... Pn) P)
    SubPropertyChainOf(Vec<PropertyExpression>, PropertyExpression),

    /// EquivalentObjectProperties(P1 ... Pn)
    EquivalentObjectProperties(Vec<PropertyExpression>),

    /// InverseObjectProperties(P1 P2)
    InverseObjectProperties(PropertyExpression, PropertyExpression),

    /// TransitiveObjectProperty(P)
    TransitiveObjectProperty(PropertyExpression),

    /// ReflexiveObjectProperty(P)
    ReflexiveObjectProperty(PropertyExpression),

    /// FunctionalObjectProperty(P)
    FunctionalObjectProperty(PropertyExpression),

    /// InverseFunctionalObjectProperty(P)
    InverseFunctionalObjectProperty(PropertyExpression),

    /// SymmetricObjectProperty(P)
    SymmetricObjectProperty(PropertyExpression),

    /// ObjectPropertyDomain(P C)
    ObjectPropertyDomain(PropertyExpression, ClassExpression),

    /// ObjectPropertyRange(P C)
    ObjectPropertyRange(PropertyExpression, ClassExpression),

    /// Declaration(Class(C))
    ClassDeclaration(ClassId),

    /// Declaration(ObjectProperty(P))
    ObjectPropertyDeclaration(PropertyId),

    /// Declaration(NamedIndividual(i))
    NamedIndividualDeclaration(IndividualId),

    /// ClassAssertion(C i)
    ClassAssertion(ClassExpression, IndividualId),

    /// ObjectPropertyAssertion(P i1 i2)
    ObjectPropertyAssertion(PropertyExpression, IndividualId, IndividualId),

    /// SameIndividual(i1 ... in)
    SameIndividual(Vec<IndividualId>),

    /// DifferentIndividuals(i1 ... in)
    DifferentIndividuals(Vec<IndividualId>),
}

/// Input ontology over integer ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    /// All axioms in the ontology
    pub axioms: Vec<ComplexAxiom>,

    /// All classes mentioned in the ontology
    pub classes: BTreeSet<ClassId>,

    /// All object properties mentioned in the ontology
    pub properties: BTreeSet<PropertyId>,

    /// All individuals mentioned in the ontology
    pub individuals: BTreeSet<IndividualId>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_axioms(axioms: impl IntoIterator<Item = ComplexAxiom>) -> Self {
        let mut ontology = Self::new();
        for axiom in axioms {
            ontology.add_axiom(axiom);
        }
        ontology
    }

    pub fn add_axiom(&mut self, axiom: ComplexAxiom) {
        // Extract classes, properties, and individuals from the axiom
        match &axiom {
            ComplexAxiom::SubClassOf(c1, c2) => {
                self.collect_class_expression(c1);
                self.collect_class_expression(c2);
            }
            ComplexAxiom::EquivalentClasses(classes) | ComplexAxiom::DisjointClasses(classes) => {
                for class in classes {
                    self.collect_class_expression(class);
                }
            }
            ComplexAxiom::SubObjectPropertyOf(p1, p2) | ComplexAxiom::InverseObjectProperties(p1, p2) => {
                self.properties.insert(p1.named_property());
                self.properties.insert(p2.named_property());
            }
            ComplexAxiom::SubPropertyChainOf(chain, p) => {
                self.properties.extend(chain.iter().map(PropertyExpression::named_property));
                self.properties.insert(p.named_property());
            }
            ComplexAxiom::EquivalentObjectProperties(properties) => {
                self.properties.extend(properties.iter().map(PropertyExpression::named_property));
            }
            ComplexAxiom::TransitiveObjectProperty(p)
            | ComplexAxiom::ReflexiveObjectProperty(p)
            | ComplexAxiom::FunctionalObjectProperty(p)
            | ComplexAxiom::InverseFunctionalObjectProperty(p)
            | ComplexAxiom::SymmetricObjectProperty(p) => {
                self.properties.insert(p.named_property());
            }
            ComplexAxiom::ObjectPropertyDomain(p, c) | ComplexAxiom::ObjectPropertyRange(p, c) => {
                self.properties.insert(p.named_property());
                self.collect_class_expression(c);
            }
            ComplexAxiom::ClassDeclaration(c) => {
                self.classes.insert(*c);
            }
            ComplexAxiom::ObjectPropertyDeclaration(p) => {
                self.properties.insert(*p);
            }
            ComplexAxiom::NamedIndividualDeclaration(i) => {
                self.individuals.insert(*i);
            }
            ComplexAxiom::ClassAssertion(c, i) => {
                self.collect_class_expression(c);
                self.individuals.insert(*i);
            }
            ComplexAxiom::ObjectPropertyAssertion(p, i1, i2) => {
                self.properties.insert(p.named_property());
                self.individuals.insert(*i1);
                self.individuals.insert(*i2);
            }
            ComplexAxiom::SameIndividual(individuals) | ComplexAxiom::DifferentIndividuals(individuals) => {
                self.individuals.extend(individuals.iter().copied());
            }
        }

        self.axioms.push(axiom);
    }

    /// Highest id mentioned by any entity of the ontology
    pub fn highest_id(&self) -> usize {
        [
            self.classes.iter().next_back(),
            self.properties.iter().next_back(),
            self.individuals.iter().next_back(),
        ]
        .into_iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(FIRST_USER_ID - 1)
    }

    fn collect_class_expression(&mut self, expr: &ClassExpression) {
        match expr {
            ClassExpression::Class(id) => {
                self.classes.insert(*id);
            }
            ClassExpression::Nominal(individual) => {
                self.individuals.insert(*individual);
            }
            ClassExpression::IntersectionOf(operands) => {
                for operand in operands {
                    self.collect_class_expression(operand);
                }
            }
            ClassExpression::SomeValuesFrom { property, filler } => {
                self.properties.insert(property.named_property());
                self.collect_class_expression(filler);
            }
            ClassExpression::HasValue { property, individual } => {
                self.properties.insert(property.named_property());
                self.individuals.insert(*individual);
            }
        }
    }
}
