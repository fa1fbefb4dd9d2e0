//! 拡張オントロジー (完備化規則用の索引)

use crate::axiom::NormalizedAxiom;
use crate::entity::{ClassId, EntityManager, PropertyId};
use std::collections::{BTreeSet, HashMap};

static EMPTY_IDS: BTreeSet<usize> = BTreeSet::new();

/// Read-only index over saturated normal forms.
///
/// Every lookup returns a possibly empty collection keyed by the component a
/// completion rule starts from.
#[derive(Debug, Clone, Default)]
pub struct ExtendedOntology {
    /// A ⊑ B, by A
    gci0: HashMap<ClassId, Vec<ClassId>>,
    /// A₁ ⊓ A₂ ⊑ B, by each operand: (other operand, B)
    gci1: HashMap<ClassId, Vec<(ClassId, ClassId)>>,
    /// A ⊑ ∃r.B, by A: (r, B)
    gci2: HashMap<ClassId, Vec<(PropertyId, ClassId)>>,
    /// ∃r.A ⊑ B, by (r, A)
    gci3: HashMap<(PropertyId, ClassId), Vec<ClassId>>,
    /// Fillers A of some ∃t.A ⊑ B, by every s ⊑ t
    gci3_fillers_below: HashMap<PropertyId, BTreeSet<ClassId>>,
    /// Properties s ⊑ t for some ∃t.A ⊑ B, by A
    gci3_properties_below: HashMap<ClassId, BTreeSet<PropertyId>>,
    /// r ⊑ s, by r (strict)
    ri2_by_sub: HashMap<PropertyId, BTreeSet<PropertyId>>,
    /// r ⊑ s, by s (strict)
    ri2_by_super: HashMap<PropertyId, BTreeSet<PropertyId>>,
    /// r ∘ s ⊑ t, by r: (s, t)
    ri3_by_left: HashMap<PropertyId, Vec<(PropertyId, PropertyId)>>,
    /// r ∘ s ⊑ t, by s: (r, t)
    ri3_by_right: HashMap<PropertyId, Vec<(PropertyId, PropertyId)>>,
    functional: BTreeSet<PropertyId>,
    reflexive: BTreeSet<PropertyId>,
    inverse_of: HashMap<PropertyId, PropertyId>,
    classes: BTreeSet<ClassId>,
    properties: BTreeSet<PropertyId>,
    axiom_count: usize,
}

impl ExtendedOntology {
    /// Build the index from a saturated axiom set
    pub fn new<'a>(axioms: impl IntoIterator<Item = &'a NormalizedAxiom>, manager: &EntityManager) -> Self {
        let mut ontology = Self {
            inverse_of: manager.inverse_map().clone(),
            ..Self::default()
        };

        let mut gci3_axioms = Vec::new();
        for axiom in axioms {
            ontology.axiom_count += 1;
            ontology.classes.extend(axiom.classes());
            ontology.properties.extend(axiom.properties());

            match *axiom {
                NormalizedAxiom::Gci0 { sub_class, super_class } => {
                    ontology.gci0.entry(sub_class).or_default().push(super_class);
                }
                NormalizedAxiom::Gci1 { left_sub_class, right_sub_class, super_class } => {
                    ontology
                        .gci1
                        .entry(left_sub_class)
                        .or_default()
                        .push((right_sub_class, super_class));
                    if left_sub_class != right_sub_class {
                        ontology
                            .gci1
                            .entry(right_sub_class)
                            .or_default()
                            .push((left_sub_class, super_class));
                    }
                }
                NormalizedAxiom::Gci2 { sub_class, property, filler } => {
                    ontology.gci2.entry(sub_class).or_default().push((property, filler));
                }
                NormalizedAxiom::Gci3 { property, filler, super_class } => {
                    ontology.gci3.entry((property, filler)).or_default().push(super_class);
                    gci3_axioms.push((property, filler));
                }
                NormalizedAxiom::Ri1 { property } => {
                    ontology.reflexive.insert(property);
                }
                NormalizedAxiom::Ri2 { sub_property, super_property } => {
                    if sub_property != super_property {
                        ontology.ri2_by_sub.entry(sub_property).or_default().insert(super_property);
                        ontology.ri2_by_super.entry(super_property).or_default().insert(sub_property);
                    }
                }
                NormalizedAxiom::Ri3 { left_sub_property, right_sub_property, super_property } => {
                    ontology
                        .ri3_by_left
                        .entry(left_sub_property)
                        .or_default()
                        .push((right_sub_property, super_property));
                    ontology
                        .ri3_by_right
                        .entry(right_sub_property)
                        .or_default()
                        .push((left_sub_property, super_property));
                }
                NormalizedAxiom::Functional { property } => {
                    ontology.functional.insert(property);
                }
            }
        }

        // 部分プロパティ経由で GCI3 が適用できるフィラー
        for (property, filler) in gci3_axioms {
            let below: Vec<PropertyId> = std::iter::once(property)
                .chain(ontology.sub_properties(property).iter().copied())
                .collect();
            for sub in below {
                ontology.gci3_fillers_below.entry(sub).or_default().insert(filler);
                ontology.gci3_properties_below.entry(filler).or_default().insert(sub);
            }
        }

        ontology
    }

    pub fn gci0_axioms(&self, class: ClassId) -> &[ClassId] {
        self.gci0.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(other operand, super class)` for conjunctions mentioning `class`
    pub fn gci1_axioms(&self, class: ClassId) -> &[(ClassId, ClassId)] {
        self.gci1.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(property, filler)` for existentials below `class`
    pub fn gci2_axioms(&self, class: ClassId) -> &[(PropertyId, ClassId)] {
        self.gci2.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Super classes of `∃property.filler`
    pub fn gci3_axioms(&self, property: PropertyId, filler: ClassId) -> &[ClassId] {
        self.gci3.get(&(property, filler)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fillers `A` such that some `∃t.A ⊑ B` holds with `property ⊑ t`
    pub fn gci3_fillers_below(&self, property: PropertyId) -> &BTreeSet<ClassId> {
        self.gci3_fillers_below.get(&property).unwrap_or(&EMPTY_IDS)
    }

    /// Properties `s` such that some `∃t.filler ⊑ B` holds with `s ⊑ t`
    pub fn gci3_properties_below(&self, filler: ClassId) -> &BTreeSet<PropertyId> {
        self.gci3_properties_below.get(&filler).unwrap_or(&EMPTY_IDS)
    }

    /// Strict super properties
    pub fn super_properties(&self, property: PropertyId) -> &BTreeSet<PropertyId> {
        self.ri2_by_sub.get(&property).unwrap_or(&EMPTY_IDS)
    }

    /// Strict sub properties
    pub fn sub_properties(&self, property: PropertyId) -> &BTreeSet<PropertyId> {
        self.ri2_by_super.get(&property).unwrap_or(&EMPTY_IDS)
    }

    pub fn is_sub_property(&self, sub: PropertyId, sup: PropertyId) -> bool {
        sub == sup || self.super_properties(sub).contains(&sup)
    }

    /// `(right, super)` for compositions whose left operand is `property`
    pub fn ri3_axioms_by_left(&self, property: PropertyId) -> &[(PropertyId, PropertyId)] {
        self.ri3_by_left.get(&property).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(left, super)` for compositions whose right operand is `property`
    pub fn ri3_axioms_by_right(&self, property: PropertyId) -> &[(PropertyId, PropertyId)] {
        self.ri3_by_right.get(&property).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_functional(&self, property: PropertyId) -> bool {
        self.functional.contains(&property)
    }

    pub fn reflexive_properties(&self) -> &BTreeSet<PropertyId> {
        &self.reflexive
    }

    pub fn inverse_of(&self, property: PropertyId) -> Option<PropertyId> {
        self.inverse_of.get(&property).copied()
    }

    /// Classes mentioned by any indexed axiom
    pub fn classes(&self) -> &BTreeSet<ClassId> {
        &self.classes
    }

    /// Properties mentioned by any indexed axiom
    pub fn properties(&self) -> &BTreeSet<PropertyId> {
        &self.properties
    }

    pub fn axiom_count(&self) -> usize {
        self.axiom_count
    }
}
