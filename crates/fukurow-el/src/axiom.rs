//! 正規化された公理

use crate::entity::{ClassId, PropertyId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axiom in one of the normal forms the completion rules operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NormalizedAxiom {
    /// A ⊑ B
    Gci0 { sub_class: ClassId, super_class: ClassId },

    /// A₁ ⊓ A₂ ⊑ B
    Gci1 {
        left_sub_class: ClassId,
        right_sub_class: ClassId,
        super_class: ClassId,
    },

    /// A ⊑ ∃r.B
    Gci2 {
        sub_class: ClassId,
        property: PropertyId,
        filler: ClassId,
    },

    /// ∃r.A ⊑ B
    Gci3 {
        property: PropertyId,
        filler: ClassId,
        super_class: ClassId,
    },

    /// ε ⊑ r
    Ri1 { property: PropertyId },

    /// r ⊑ s
    Ri2 {
        sub_property: PropertyId,
        super_property: PropertyId,
    },

    /// r ∘ s ⊑ t
    Ri3 {
        left_sub_property: PropertyId,
        right_sub_property: PropertyId,
        super_property: PropertyId,
    },

    /// f(r)
    Functional { property: PropertyId },
}

impl NormalizedAxiom {
    pub fn gci0(sub_class: ClassId, super_class: ClassId) -> Self {
        NormalizedAxiom::Gci0 { sub_class, super_class }
    }

    /// Conjunction operands are stored in ascending order so equal axioms compare equal
    pub fn gci1(left: ClassId, right: ClassId, super_class: ClassId) -> Self {
        NormalizedAxiom::Gci1 {
            left_sub_class: left.min(right),
            right_sub_class: left.max(right),
            super_class,
        }
    }

    pub fn gci2(sub_class: ClassId, property: PropertyId, filler: ClassId) -> Self {
        NormalizedAxiom::Gci2 { sub_class, property, filler }
    }

    pub fn gci3(property: PropertyId, filler: ClassId, super_class: ClassId) -> Self {
        NormalizedAxiom::Gci3 { property, filler, super_class }
    }

    pub fn ri1(property: PropertyId) -> Self {
        NormalizedAxiom::Ri1 { property }
    }

    pub fn ri2(sub_property: PropertyId, super_property: PropertyId) -> Self {
        NormalizedAxiom::Ri2 { sub_property, super_property }
    }

    pub fn ri3(left: PropertyId, right: PropertyId, super_property: PropertyId) -> Self {
        NormalizedAxiom::Ri3 {
            left_sub_property: left,
            right_sub_property: right,
            super_property,
        }
    }

    pub fn functional(property: PropertyId) -> Self {
        NormalizedAxiom::Functional { property }
    }

    /// Classes occurring in the axiom
    pub fn classes(&self) -> Vec<ClassId> {
        match *self {
            NormalizedAxiom::Gci0 { sub_class, super_class } => vec![sub_class, super_class],
            NormalizedAxiom::Gci1 { left_sub_class, right_sub_class, super_class } => {
                vec![left_sub_class, right_sub_class, super_class]
            }
            NormalizedAxiom::Gci2 { sub_class, filler, .. } => vec![sub_class, filler],
            NormalizedAxiom::Gci3 { filler, super_class, .. } => vec![filler, super_class],
            _ => Vec::new(),
        }
    }

    /// Object properties occurring in the axiom
    pub fn properties(&self) -> Vec<PropertyId> {
        match *self {
            NormalizedAxiom::Gci2 { property, .. }
            | NormalizedAxiom::Gci3 { property, .. }
            | NormalizedAxiom::Ri1 { property }
            | NormalizedAxiom::Functional { property } => vec![property],
            NormalizedAxiom::Ri2 { sub_property, super_property } => vec![sub_property, super_property],
            NormalizedAxiom::Ri3 { left_sub_property, right_sub_property, super_property } => {
                vec![left_sub_property, right_sub_property, super_property]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for NormalizedAxiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedAxiom::Gci0 { sub_class, super_class } => write!(f, "{} ⊑ {}", sub_class, super_class),
            NormalizedAxiom::Gci1 { left_sub_class, right_sub_class, super_class } => {
                write!(f, "{} ⊓ {} ⊑ {}", left_sub_class, right_sub_class, super_class)
            }
            NormalizedAxiom::Gci2 { sub_class, property, filler } => {
                write!(f, "{} ⊑ ∃{}.{}", sub_class, property, filler)
            }
            NormalizedAxiom::Gci3 { property, filler, super_class } => {
                write!(f, "∃{}.{} ⊑ {}", property, filler, super_class)
            }
            NormalizedAxiom::Ri1 { property } => write!(f, "ε ⊑ {}", property),
            NormalizedAxiom::Ri2 { sub_property, super_property } => write!(f, "{} ⊑ {}", sub_property, super_property),
            NormalizedAxiom::Ri3 { left_sub_property, right_sub_property, super_property } => {
                write!(f, "{} ∘ {} ⊑ {}", left_sub_property, right_sub_property, super_property)
            }
            NormalizedAxiom::Functional { property } => write!(f, "f({})", property),
        }
    }
}
