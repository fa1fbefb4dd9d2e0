//! ロール階層の飽和
//!
//! 完備化の前にプロパティ包摂・逆プロパティ・合成・関数性の閉包を
//! 計算しておき、拡張オントロジーを静的な索引として構築できるようにします。

use crate::axiom::NormalizedAxiom;
use crate::entity::{EntityManager, PropertyId};
use crate::Result;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

/// Role-hierarchy saturator.
///
/// Closes the normalized axioms under:
/// - SR0 `r ⊑ r` for every property
/// - SR1 `r ⊑ s ⟹ r⁻ ⊑ s⁻` (also mirrors `ε ⊑ r` onto `r⁻`)
/// - SR2 `r ⊑ s, s ⊑ t ⟹ r ⊑ t`
/// - SR3 `r ∘ s ⊑ t ⟹ s⁻ ∘ r⁻ ⊑ t⁻`
/// - SR4 `r ⊑ s, f(s) ⟹ f(r)`
pub struct RoleSaturator<'a> {
    manager: &'a mut EntityManager,
}

impl<'a> RoleSaturator<'a> {
    pub fn new(manager: &'a mut EntityManager) -> Self {
        Self { manager }
    }

    /// Saturate `axioms`, returning a superset of the input
    pub fn saturate(&mut self, axioms: &BTreeSet<NormalizedAxiom>) -> Result<BTreeSet<NormalizedAxiom>> {
        let mut properties: BTreeSet<PropertyId> = axioms.iter().flat_map(|axiom| axiom.properties()).collect();

        // SR1 の前提: すべてのプロパティに逆を用意する
        let mut inverses = Vec::with_capacity(properties.len());
        for property in &properties {
            inverses.push(self.manager.inverse_or_create(*property)?);
        }
        properties.extend(inverses);

        let mut saturated = axioms.clone();
        let hierarchy = self.close_hierarchy(axioms, &properties)?;
        for (sub, supers) in &hierarchy {
            for sup in supers {
                saturated.insert(NormalizedAxiom::ri2(*sub, *sup));
            }
        }

        for axiom in axioms {
            match *axiom {
                NormalizedAxiom::Ri3 { left_sub_property, right_sub_property, super_property } => {
                    // SR3
                    saturated.insert(NormalizedAxiom::ri3(
                        self.inverse(right_sub_property)?,
                        self.inverse(left_sub_property)?,
                        self.inverse(super_property)?,
                    ));
                }
                NormalizedAxiom::Ri1 { property } => {
                    saturated.insert(NormalizedAxiom::ri1(self.inverse(property)?));
                }
                NormalizedAxiom::Functional { property: functional } => {
                    // SR4
                    for (sub, supers) in &hierarchy {
                        if supers.contains(&functional) {
                            saturated.insert(NormalizedAxiom::functional(*sub));
                        }
                    }
                }
                _ => {}
            }
        }

        debug!(
            "Saturated role hierarchy: {} properties, {} -> {} axioms",
            properties.len(),
            axioms.len(),
            saturated.len()
        );
        Ok(saturated)
    }

    /// Reflexive-transitive, inverse-closed property hierarchy (SR0-SR2)
    fn close_hierarchy(
        &mut self,
        axioms: &BTreeSet<NormalizedAxiom>,
        properties: &BTreeSet<PropertyId>,
    ) -> Result<BTreeMap<PropertyId, BTreeSet<PropertyId>>> {
        let mut supers: BTreeMap<PropertyId, BTreeSet<PropertyId>> = BTreeMap::new();
        let mut subs: BTreeMap<PropertyId, BTreeSet<PropertyId>> = BTreeMap::new();
        let mut pending: VecDeque<(PropertyId, PropertyId)> = VecDeque::new();

        for property in properties {
            pending.push_back((*property, *property));
        }
        for axiom in axioms {
            if let NormalizedAxiom::Ri2 { sub_property, super_property } = *axiom {
                pending.push_back((sub_property, super_property));
            }
        }

        while let Some((sub, sup)) = pending.pop_front() {
            if !supers.entry(sub).or_default().insert(sup) {
                continue;
            }
            subs.entry(sup).or_default().insert(sub);

            pending.push_back((self.inverse(sub)?, self.inverse(sup)?));
            if let Some(above) = supers.get(&sup) {
                pending.extend(above.iter().map(|t| (sub, *t)));
            }
            if let Some(below) = subs.get(&sub) {
                pending.extend(below.iter().map(|q| (*q, sup)));
            }
        }
        Ok(supers)
    }

    fn inverse(&mut self, property: PropertyId) -> Result<PropertyId> {
        self.manager.inverse_or_create(property)
    }
}
