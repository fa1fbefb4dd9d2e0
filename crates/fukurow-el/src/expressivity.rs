//! 表現力の検出

use crate::axiom::NormalizedAxiom;
use crate::entity::{AuxiliaryKind, EntityManager, CLASS_BOTTOM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Constructs used by a normalized ontology, detected before saturation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expressivity {
    pub has_inverse: bool,
    pub has_functional: bool,
    pub has_bottom: bool,
    pub has_existentials: bool,
    pub has_chains: bool,
    pub has_reflexive: bool,
    pub has_nominals: bool,
}

impl Expressivity {
    /// Inspect normalized (not yet saturated) axioms
    pub fn detect<'a>(axioms: impl IntoIterator<Item = &'a NormalizedAxiom>, manager: &EntityManager) -> Self {
        let mut expressivity = Expressivity::default();

        for axiom in axioms {
            if axiom
                .properties()
                .iter()
                .any(|p| manager.auxiliary_kind(*p) == Some(AuxiliaryKind::InverseProperty))
            {
                expressivity.has_inverse = true;
            }
            if axiom.classes().iter().any(|c| manager.individual_of(*c).is_some()) {
                expressivity.has_nominals = true;
            }

            match *axiom {
                NormalizedAxiom::Gci0 { super_class, .. } | NormalizedAxiom::Gci1 { super_class, .. } => {
                    expressivity.has_bottom |= super_class == CLASS_BOTTOM;
                }
                NormalizedAxiom::Gci2 { filler, .. } => {
                    expressivity.has_existentials = true;
                    expressivity.has_bottom |= filler == CLASS_BOTTOM;
                }
                NormalizedAxiom::Gci3 { super_class, .. } => {
                    expressivity.has_bottom |= super_class == CLASS_BOTTOM;
                }
                NormalizedAxiom::Ri1 { .. } => expressivity.has_reflexive = true,
                NormalizedAxiom::Ri3 { .. } => expressivity.has_chains = true,
                NormalizedAxiom::Functional { .. } => expressivity.has_functional = true,
                NormalizedAxiom::Ri2 { .. } => {}
            }
        }

        expressivity
    }

    /// Inverse or functional properties need node synthesis and merging
    pub fn requires_extended_rules(&self) -> bool {
        self.has_inverse || self.has_functional
    }

    /// ⊥ can only travel backward along successors when both are present
    pub fn requires_bottom_rules(&self) -> bool {
        self.has_bottom && self.has_existentials
    }
}

impl fmt::Display for Expressivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut name = String::from("EL");
        if self.has_bottom {
            name.push('⊥');
        }
        if self.has_nominals {
            name.push('O');
        }
        if self.has_chains {
            name.push('R');
        }
        if self.has_inverse {
            name.push('I');
        }
        if self.has_functional {
            name.push('F');
        }
        if self.has_reflexive {
            name.push_str("(ε)");
        }
        write!(f, "{}", name)
    }
}
