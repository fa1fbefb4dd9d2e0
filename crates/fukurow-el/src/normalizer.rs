//! 公理の正規化
//!
//! 複合公理を 7 種類の正規形へ書き換える小さな書き換え系です。
//! 補助クラス・補助プロパティは EntityManager から払い出します。

use crate::axiom::NormalizedAxiom;
use crate::entity::{ClassId, EntityManager, PropertyId, CLASS_BOTTOM, CLASS_TOP};
use crate::model::{ClassExpression, ComplexAxiom, PropertyExpression};
use crate::{ElError, Result};
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// Class expression with every property and individual resolved to an id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Term {
    Class(ClassId),
    And(Vec<Term>),
    Some(PropertyId, Box<Term>),
}

impl Term {
    fn is_atomic(&self) -> bool {
        matches!(self, Term::Class(_))
    }

    /// Binary conjunction, flattening nested conjunctions
    fn and(left: Term, right: Term) -> Term {
        let mut operands = Vec::new();
        for term in [left, right] {
            match term {
                Term::And(inner) => operands.extend(inner),
                other => operands.push(other),
            }
        }
        Term::And(operands)
    }

    /// Whether the term is unsatisfiable because ⊥ occurs in a conjunct or filler
    fn contains_bottom(&self) -> bool {
        match self {
            Term::Class(class) => *class == CLASS_BOTTOM,
            Term::And(operands) => operands.iter().any(Term::contains_bottom),
            Term::Some(_, filler) => filler.contains_bottom(),
        }
    }
}

/// Rewrite still waiting in the worklist
#[derive(Debug, Clone)]
enum Pending {
    SubClass(Term, Term),
    SubProperty(Vec<PropertyId>, PropertyId),
    Reflexive(PropertyId),
    Functional(PropertyId),
}

/// Normalizer for [`ComplexAxiom`]s.
///
/// Each input axiom is first translated into pending rewrites over integer
/// ids; the worklist then rewrites them until only normal forms remain.
/// Fresh names for identical sub-expressions are reused within one run.
pub struct Normalizer<'a> {
    manager: &'a mut EntityManager,
    // 左辺: C ⊑ X, 右辺: X ⊑ C
    lhs_names: HashMap<Term, ClassId>,
    rhs_names: HashMap<Term, ClassId>,
}

impl<'a> Normalizer<'a> {
    pub fn new(manager: &'a mut EntityManager) -> Self {
        Self {
            manager,
            lhs_names: HashMap::new(),
            rhs_names: HashMap::new(),
        }
    }

    /// Normalize a set of axioms
    pub fn normalize<'b>(&mut self, axioms: impl IntoIterator<Item = &'b ComplexAxiom>) -> Result<BTreeSet<NormalizedAxiom>> {
        let mut worklist = VecDeque::new();
        let mut input_count = 0usize;
        for axiom in axioms {
            input_count += 1;
            worklist.extend(self.translate(axiom)?);
        }

        let mut normalized = BTreeSet::new();
        while let Some(pending) = worklist.pop_front() {
            self.rewrite(pending, &mut worklist, &mut normalized)?;
        }

        debug!(
            "Normalized {} axioms into {} normal forms ({} auxiliary classes)",
            input_count,
            normalized.len(),
            self.manager.auxiliary_classes().count()
        );
        Ok(normalized)
    }

    /// Normalize a single axiom
    pub fn normalize_axiom(&mut self, axiom: &ComplexAxiom) -> Result<BTreeSet<NormalizedAxiom>> {
        self.normalize(std::iter::once(axiom))
    }

    /// 公理レベルの書き換え
    fn translate(&mut self, axiom: &ComplexAxiom) -> Result<Vec<Pending>> {
        let mut pending = Vec::new();
        match axiom {
            ComplexAxiom::SubClassOf(sub, sup) => {
                pending.push(Pending::SubClass(self.term(sub)?, self.term(sup)?));
            }
            ComplexAxiom::EquivalentClasses(classes) => {
                let terms = classes.iter().map(|c| self.term(c)).collect::<Result<Vec<_>>>()?;
                for (sub, sup) in cyclic_pairs(&terms) {
                    pending.push(Pending::SubClass(sub.clone(), sup.clone()));
                }
            }
            ComplexAxiom::DisjointClasses(classes) => {
                let terms = classes.iter().map(|c| self.term(c)).collect::<Result<Vec<_>>>()?;
                for (i, left) in terms.iter().enumerate() {
                    for right in &terms[i + 1..] {
                        pending.push(Pending::SubClass(
                            Term::and(left.clone(), right.clone()),
                            Term::Class(CLASS_BOTTOM),
                        ));
                    }
                }
            }
            ComplexAxiom::SubObjectPropertyOf(sub, sup) => {
                pending.push(Pending::SubProperty(vec![self.property(sub)?], self.property(sup)?));
            }
            ComplexAxiom::SubPropertyChainOf(chain, sup) => {
                if chain.is_empty() {
                    return Err(ElError::InvalidAxiom(
                        "property chain must contain at least one property".to_string(),
                    ));
                }
                let chain = chain.iter().map(|p| self.property(p)).collect::<Result<Vec<_>>>()?;
                pending.push(Pending::SubProperty(chain, self.property(sup)?));
            }
            ComplexAxiom::EquivalentObjectProperties(properties) => {
                let ids = properties.iter().map(|p| self.property(p)).collect::<Result<Vec<_>>>()?;
                for (sub, sup) in cyclic_pairs(&ids) {
                    pending.push(Pending::SubProperty(vec![*sub], *sup));
                }
            }
            ComplexAxiom::InverseObjectProperties(first, second) => {
                let first = self.property(first)?;
                let second = self.property(second)?;
                let second_inverse = self.manager.inverse_or_create(second)?;
                pending.push(Pending::SubProperty(vec![first], second_inverse));
                pending.push(Pending::SubProperty(vec![second_inverse], first));
            }
            ComplexAxiom::TransitiveObjectProperty(p) => {
                let p = self.property(p)?;
                pending.push(Pending::SubProperty(vec![p, p], p));
            }
            ComplexAxiom::ReflexiveObjectProperty(p) => {
                pending.push(Pending::Reflexive(self.property(p)?));
            }
            ComplexAxiom::FunctionalObjectProperty(p) => {
                pending.push(Pending::Functional(self.property(p)?));
            }
            ComplexAxiom::InverseFunctionalObjectProperty(p) => {
                let p = self.property(p)?;
                pending.push(Pending::Functional(self.manager.inverse_or_create(p)?));
            }
            ComplexAxiom::SymmetricObjectProperty(p) => {
                let p = self.property(p)?;
                let inverse = self.manager.inverse_or_create(p)?;
                pending.push(Pending::SubProperty(vec![p], inverse));
            }
            ComplexAxiom::ObjectPropertyDomain(p, class) => {
                let p = self.property(p)?;
                pending.push(Pending::SubClass(
                    Term::Some(p, Box::new(Term::Class(CLASS_TOP))),
                    self.term(class)?,
                ));
            }
            ComplexAxiom::ObjectPropertyRange(p, class) => {
                let p = self.property(p)?;
                let inverse = self.manager.inverse_or_create(p)?;
                pending.push(Pending::SubClass(
                    Term::Some(inverse, Box::new(Term::Class(CLASS_TOP))),
                    self.term(class)?,
                ));
            }
            ComplexAxiom::ClassDeclaration(id)
            | ComplexAxiom::ObjectPropertyDeclaration(id)
            | ComplexAxiom::NamedIndividualDeclaration(id) => {
                self.manager.check_known(*id)?;
            }
            ComplexAxiom::ClassAssertion(class, individual) => {
                let nominal = self.manager.nominal_class(*individual)?;
                pending.push(Pending::SubClass(Term::Class(nominal), self.term(class)?));
            }
            ComplexAxiom::ObjectPropertyAssertion(p, subject, object) => {
                let p = self.property(p)?;
                let subject = self.manager.nominal_class(*subject)?;
                let object = self.manager.nominal_class(*object)?;
                pending.push(Pending::SubClass(
                    Term::Class(subject),
                    Term::Some(p, Box::new(Term::Class(object))),
                ));
            }
            ComplexAxiom::SameIndividual(individuals) => {
                let nominals = individuals
                    .iter()
                    .map(|i| self.manager.nominal_class(*i))
                    .collect::<Result<Vec<_>>>()?;
                for (sub, sup) in cyclic_pairs(&nominals) {
                    pending.push(Pending::SubClass(Term::Class(*sub), Term::Class(*sup)));
                }
            }
            ComplexAxiom::DifferentIndividuals(individuals) => {
                let nominals = individuals
                    .iter()
                    .map(|i| self.manager.nominal_class(*i))
                    .collect::<Result<Vec<_>>>()?;
                for (i, left) in nominals.iter().enumerate() {
                    for right in &nominals[i + 1..] {
                        pending.push(Pending::SubClass(
                            Term::and(Term::Class(*left), Term::Class(*right)),
                            Term::Class(CLASS_BOTTOM),
                        ));
                    }
                }
            }
        }
        Ok(pending)
    }

    fn property(&mut self, expr: &PropertyExpression) -> Result<PropertyId> {
        match expr {
            PropertyExpression::Property(id) => {
                self.manager.check_known(*id)?;
                Ok(*id)
            }
            PropertyExpression::InverseOf(id) => self.manager.inverse_or_create(*id),
        }
    }

    fn term(&mut self, expr: &ClassExpression) -> Result<Term> {
        match expr {
            ClassExpression::Class(id) => {
                self.manager.check_known(*id)?;
                Ok(Term::Class(*id))
            }
            ClassExpression::Nominal(individual) => Ok(Term::Class(self.manager.nominal_class(*individual)?)),
            ClassExpression::IntersectionOf(operands) => {
                if operands.is_empty() {
                    return Err(ElError::InvalidAxiom("empty intersection".to_string()));
                }
                let mut flattened = Vec::with_capacity(operands.len());
                for operand in operands {
                    match self.term(operand)? {
                        Term::And(inner) => flattened.extend(inner),
                        other => flattened.push(other),
                    }
                }
                if flattened.len() == 1 {
                    Ok(flattened.remove(0))
                } else {
                    Ok(Term::And(flattened))
                }
            }
            ClassExpression::SomeValuesFrom { property, filler } => {
                let property = self.property(property)?;
                Ok(Term::Some(property, Box::new(self.term(filler)?)))
            }
            ClassExpression::HasValue { property, individual } => {
                let property = self.property(property)?;
                let nominal = self.manager.nominal_class(*individual)?;
                Ok(Term::Some(property, Box::new(Term::Class(nominal))))
            }
        }
    }

    /// 1 ステップの書き換え
    fn rewrite(
        &mut self,
        pending: Pending,
        worklist: &mut VecDeque<Pending>,
        out: &mut BTreeSet<NormalizedAxiom>,
    ) -> Result<()> {
        match pending {
            Pending::SubClass(sub, sup) => self.rewrite_subclass(sub, sup, worklist, out),
            Pending::SubProperty(chain, sup) => self.rewrite_chain(chain, sup, worklist, out),
            Pending::Reflexive(property) => {
                out.insert(NormalizedAxiom::ri1(property));
                Ok(())
            }
            Pending::Functional(property) => {
                out.insert(NormalizedAxiom::functional(property));
                Ok(())
            }
        }
    }

    fn rewrite_subclass(
        &mut self,
        sub: Term,
        sup: Term,
        worklist: &mut VecDeque<Pending>,
        out: &mut BTreeSet<NormalizedAxiom>,
    ) -> Result<()> {
        // ⊥ ⊑ C と C ⊑ ⊤ は自明
        if sub.contains_bottom() || sup == Term::Class(CLASS_TOP) {
            return Ok(());
        }

        match (sub, sup) {
            (sub, Term::And(conjuncts)) => {
                for conjunct in conjuncts {
                    worklist.push_back(Pending::SubClass(sub.clone(), conjunct));
                }
            }
            (Term::Class(a), Term::Class(b)) => {
                if a != b {
                    out.insert(NormalizedAxiom::gci0(a, b));
                }
            }
            (Term::Class(a), Term::Some(property, filler)) => match *filler {
                Term::Class(b) => {
                    out.insert(NormalizedAxiom::gci2(a, property, b));
                }
                filler => {
                    let name = self.rhs_name(&filler, worklist);
                    out.insert(NormalizedAxiom::gci2(a, property, name));
                }
            },
            (sub, sup) if !sup.is_atomic() => {
                let name = self.manager.create_class();
                worklist.push_back(Pending::SubClass(sub, Term::Class(name)));
                worklist.push_back(Pending::SubClass(Term::Class(name), sup));
            }
            (Term::Some(property, filler), Term::Class(b)) => match *filler {
                Term::Class(a) => {
                    out.insert(NormalizedAxiom::gci3(property, a, b));
                }
                filler => {
                    let name = self.lhs_name(&filler, worklist);
                    out.insert(NormalizedAxiom::gci3(property, name, b));
                }
            },
            (Term::And(conjuncts), Term::Class(b)) => {
                let mut atoms = Vec::with_capacity(conjuncts.len());
                for conjunct in conjuncts {
                    match conjunct {
                        Term::Class(CLASS_TOP) => {}
                        Term::Class(a) => atoms.push(a),
                        complex => atoms.push(self.lhs_name(&complex, worklist)),
                    }
                }
                atoms.sort_unstable();
                atoms.dedup();
                match atoms.as_slice() {
                    [] => {
                        worklist.push_back(Pending::SubClass(Term::Class(CLASS_TOP), Term::Class(b)));
                    }
                    [a] => {
                        worklist.push_back(Pending::SubClass(Term::Class(*a), Term::Class(b)));
                    }
                    [a1, a2] => {
                        out.insert(NormalizedAxiom::gci1(*a1, *a2, b));
                    }
                    [a1, a2, rest @ ..] => {
                        // 二項の連言へ畳み込む
                        let folded = self.lhs_name(&Term::And(vec![Term::Class(*a1), Term::Class(*a2)]), worklist);
                        let mut remaining = vec![Term::Class(folded)];
                        remaining.extend(rest.iter().map(|a| Term::Class(*a)));
                        worklist.push_back(Pending::SubClass(Term::And(remaining), Term::Class(b)));
                    }
                }
            }
            (sub, sup) => {
                return Err(ElError::InvalidAxiom(format!(
                    "cannot normalize {:?} ⊑ {:?}",
                    sub, sup
                )));
            }
        }
        Ok(())
    }

    fn rewrite_chain(
        &mut self,
        chain: Vec<PropertyId>,
        sup: PropertyId,
        worklist: &mut VecDeque<Pending>,
        out: &mut BTreeSet<NormalizedAxiom>,
    ) -> Result<()> {
        match chain.as_slice() {
            [] => Err(ElError::InvalidAxiom(format!("empty property chain below {}", sup))),
            [sub] => {
                if *sub != sup {
                    out.insert(NormalizedAxiom::ri2(*sub, sup));
                }
                Ok(())
            }
            [left, right] => {
                out.insert(NormalizedAxiom::ri3(*left, *right, sup));
                Ok(())
            }
            [left, right, rest @ ..] => {
                let folded = self.manager.create_property();
                out.insert(NormalizedAxiom::ri3(*left, *right, folded));

                // 逆プロパティが既にあれば鏡像の公理も出力する
                let inverses = [*left, *right].map(|p| self.manager.inverse_of(p));
                if let [Some(left_inverse), Some(right_inverse)] = inverses {
                    let folded_inverse = self.manager.inverse_or_create(folded)?;
                    out.insert(NormalizedAxiom::ri3(right_inverse, left_inverse, folded_inverse));
                }

                let mut remaining = vec![folded];
                remaining.extend_from_slice(rest);
                worklist.push_back(Pending::SubProperty(remaining, sup));
                Ok(())
            }
        }
    }

    /// Fresh class `X` with `term ⊑ X`
    fn lhs_name(&mut self, term: &Term, worklist: &mut VecDeque<Pending>) -> ClassId {
        if let Some(name) = self.lhs_names.get(term) {
            return *name;
        }
        let name = self.manager.create_class();
        self.lhs_names.insert(term.clone(), name);
        worklist.push_back(Pending::SubClass(term.clone(), Term::Class(name)));
        name
    }

    /// Fresh class `X` with `X ⊑ term`
    fn rhs_name(&mut self, term: &Term, worklist: &mut VecDeque<Pending>) -> ClassId {
        if let Some(name) = self.rhs_names.get(term) {
            return *name;
        }
        let name = self.manager.create_class();
        self.rhs_names.insert(term.clone(), name);
        worklist.push_back(Pending::SubClass(Term::Class(name), term.clone()));
        name
    }
}

/// `(x₀, x₁), …, (xₙ₋₁, x₀)`; empty for fewer than two elements
fn cyclic_pairs<T>(items: &[T]) -> Vec<(&T, &T)> {
    if items.len() < 2 {
        return Vec::new();
    }
    items
        .iter()
        .zip(items.iter().cycle().skip(1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FIRST_USER_ID;

    const A: ClassId = FIRST_USER_ID;
    const B: ClassId = FIRST_USER_ID + 1;
    const C: ClassId = FIRST_USER_ID + 2;
    const D: ClassId = FIRST_USER_ID + 3;
    const R: PropertyId = FIRST_USER_ID + 4;
    const S: PropertyId = FIRST_USER_ID + 5;
    const T: PropertyId = FIRST_USER_ID + 6;
    const U: PropertyId = FIRST_USER_ID + 7;
    const HIGHEST: usize = FIRST_USER_ID + 7;

    fn class(id: ClassId) -> ClassExpression {
        ClassExpression::Class(id)
    }

    fn prop(id: PropertyId) -> PropertyExpression {
        PropertyExpression::Property(id)
    }

    fn normalize(axioms: &[ComplexAxiom]) -> (BTreeSet<NormalizedAxiom>, EntityManager) {
        let mut manager = EntityManager::new(HIGHEST);
        let normalized = Normalizer::new(&mut manager).normalize(axioms).unwrap();
        (normalized, manager)
    }

    #[test]
    fn test_conjunction_on_the_right_is_split() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubClassOf(
            class(A),
            ClassExpression::and(vec![class(B), class(C), class(D)]),
        )]);

        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci0(A, B),
                NormalizedAxiom::gci0(A, C),
                NormalizedAxiom::gci0(A, D),
            ])
        );
        assert_eq!(manager.auxiliary_classes().count(), 0);
    }

    #[test]
    fn test_sub_side_bottom_is_dropped() {
        let (normalized, _) = normalize(&[
            ComplexAxiom::SubClassOf(class(CLASS_BOTTOM), class(A)),
            ComplexAxiom::SubClassOf(
                ClassExpression::and(vec![class(A), ClassExpression::some(prop(R), class(CLASS_BOTTOM))]),
                class(B),
            ),
            ComplexAxiom::SubClassOf(class(A), class(CLASS_TOP)),
        ]);
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_nested_existential_gets_a_fresh_name() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubClassOf(
            class(A),
            ClassExpression::some(prop(R), ClassExpression::some(prop(S), class(B))),
        )]);

        let fresh: Vec<_> = manager.auxiliary_classes().collect();
        assert_eq!(fresh.len(), 1);
        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci2(A, R, fresh[0]),
                NormalizedAxiom::gci2(fresh[0], S, B),
            ])
        );
    }

    #[test]
    fn test_existential_on_the_left() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubClassOf(
            ClassExpression::some(prop(R), ClassExpression::and(vec![class(A), class(B)])),
            class(C),
        )]);

        let fresh: Vec<_> = manager.auxiliary_classes().collect();
        assert_eq!(fresh.len(), 1);
        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci1(A, B, fresh[0]),
                NormalizedAxiom::gci3(R, fresh[0], C),
            ])
        );
    }

    #[test]
    fn test_complex_both_sides() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubClassOf(
            ClassExpression::some(prop(R), class(A)),
            ClassExpression::some(prop(S), class(B)),
        )]);

        let fresh: Vec<_> = manager.auxiliary_classes().collect();
        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci3(R, A, fresh[0]),
                NormalizedAxiom::gci2(fresh[0], S, B),
            ])
        );
    }

    #[test]
    fn test_nary_conjunction_is_folded() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubClassOf(
            ClassExpression::and(vec![class(A), class(B), class(C)]),
            class(D),
        )]);

        let fresh: Vec<_> = manager.auxiliary_classes().collect();
        assert_eq!(fresh.len(), 1);
        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci1(A, B, fresh[0]),
                NormalizedAxiom::gci1(C, fresh[0], D),
            ])
        );
    }

    #[test]
    fn test_long_chain_is_folded_left_to_right() {
        let (normalized, manager) = normalize(&[ComplexAxiom::SubPropertyChainOf(
            vec![prop(R), prop(S), prop(T), prop(U)],
            prop(R),
        )]);

        let fresh: Vec<_> = manager.auxiliary_properties().collect();
        assert_eq!(fresh.len(), 2);
        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::ri3(R, S, fresh[0]),
                NormalizedAxiom::ri3(fresh[0], T, fresh[1]),
                NormalizedAxiom::ri3(fresh[1], U, R),
            ])
        );
    }

    #[test]
    fn test_long_chain_over_inverses_is_mirrored() {
        let mut manager = EntityManager::new(HIGHEST);
        let r_inverse = manager.inverse_or_create(R).unwrap();
        let s_inverse = manager.inverse_or_create(S).unwrap();
        let normalized = Normalizer::new(&mut manager)
            .normalize(&[ComplexAxiom::SubPropertyChainOf(vec![prop(R), prop(S), prop(T)], prop(R))])
            .unwrap();

        let folded = normalized
            .iter()
            .find_map(|axiom| match axiom {
                NormalizedAxiom::Ri3 { left_sub_property: R, right_sub_property: S, super_property } => {
                    Some(*super_property)
                }
                _ => None,
            })
            .unwrap();
        let folded_inverse = manager.inverse_of(folded).unwrap();
        assert!(normalized.contains(&NormalizedAxiom::ri3(s_inverse, r_inverse, folded_inverse)));
    }

    #[test]
    fn test_property_characteristics() {
        let (normalized, manager) = normalize(&[
            ComplexAxiom::TransitiveObjectProperty(prop(R)),
            ComplexAxiom::ReflexiveObjectProperty(prop(S)),
            ComplexAxiom::FunctionalObjectProperty(prop(T)),
            ComplexAxiom::InverseFunctionalObjectProperty(prop(U)),
        ]);
        let u_inverse = manager.inverse_of(U).unwrap();

        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::ri3(R, R, R),
                NormalizedAxiom::ri1(S),
                NormalizedAxiom::functional(T),
                NormalizedAxiom::functional(u_inverse),
            ])
        );
    }

    #[test]
    fn test_domain_and_range() {
        let (normalized, manager) = normalize(&[
            ComplexAxiom::ObjectPropertyDomain(prop(R), class(A)),
            ComplexAxiom::ObjectPropertyRange(prop(R), class(B)),
        ]);
        let r_inverse = manager.inverse_of(R).unwrap();

        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci3(R, CLASS_TOP, A),
                NormalizedAxiom::gci3(r_inverse, CLASS_TOP, B),
            ])
        );
    }

    #[test]
    fn test_equivalent_and_disjoint_classes() {
        let (normalized, _) = normalize(&[
            ComplexAxiom::EquivalentClasses(vec![class(A), class(B)]),
            ComplexAxiom::DisjointClasses(vec![class(C), class(D)]),
        ]);

        assert_eq!(
            normalized,
            BTreeSet::from([
                NormalizedAxiom::gci0(A, B),
                NormalizedAxiom::gci0(B, A),
                NormalizedAxiom::gci1(C, D, CLASS_BOTTOM),
            ])
        );
    }

    #[test]
    fn test_assertions_use_nominal_classes() {
        let (normalized, manager) = normalize(&[
            ComplexAxiom::ClassAssertion(class(A), C),
            ComplexAxiom::ObjectPropertyAssertion(prop(R), C, D),
        ]);
        let c = manager.nominal_class_of(C).unwrap();
        let d = manager.nominal_class_of(D).unwrap();

        assert_eq!(
            normalized,
            BTreeSet::from([NormalizedAxiom::gci0(c, A), NormalizedAxiom::gci2(c, R, d)])
        );
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut manager = EntityManager::new(HIGHEST);
        let mut normalizer = Normalizer::new(&mut manager);

        let unknown = normalizer.normalize_axiom(&ComplexAxiom::SubClassOf(class(A), class(HIGHEST + 100)));
        assert!(matches!(unknown, Err(ElError::InvalidArgument(_))));

        let empty_chain = normalizer.normalize_axiom(&ComplexAxiom::SubPropertyChainOf(vec![], prop(R)));
        assert!(matches!(empty_chain, Err(ElError::InvalidAxiom(_))));

        let empty_and = normalizer.normalize_axiom(&ComplexAxiom::SubClassOf(ClassExpression::and(vec![]), class(A)));
        assert!(matches!(empty_and, Err(ElError::InvalidAxiom(_))));
    }
}
