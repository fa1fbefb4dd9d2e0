//! エンティティ識別子の管理

use crate::{ElError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Class identifier
pub type ClassId = usize;
/// Object property identifier
pub type PropertyId = usize;
/// Named individual identifier
pub type IndividualId = usize;
/// Identifier of a node in the V table (shares the class namespace)
pub type NodeId = usize;

/// owl:Nothing (⊥)
pub const CLASS_BOTTOM: ClassId = 0;
/// owl:Thing (⊤)
pub const CLASS_TOP: ClassId = 1;
/// owl:bottomObjectProperty
pub const PROPERTY_BOTTOM: PropertyId = 2;
/// owl:topObjectProperty
pub const PROPERTY_TOP: PropertyId = 3;
/// First identifier available to the translation layer
pub const FIRST_USER_ID: usize = 4;

/// Kind of an auxiliary entity created during classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxiliaryKind {
    /// Fresh class naming a sub-expression
    Class,
    /// Fresh property introduced by chain decomposition
    Property,
    /// Inverse of another property
    InverseProperty,
    /// Singleton class reifying an individual
    NominalClass,
}

/// Allocator for integer entity identifiers.
///
/// Original entities use ids `0..=highest_original_id`; every entity created
/// here gets a strictly greater id, so auxiliary checks are a range test.
#[derive(Debug, Clone)]
pub struct EntityManager {
    highest_original_id: usize,
    next_id: usize,
    auxiliary: BTreeMap<usize, AuxiliaryKind>,
    inverse_of: HashMap<PropertyId, PropertyId>,
    nominal_class_of: HashMap<IndividualId, ClassId>,
    individual_of: HashMap<ClassId, IndividualId>,
}

impl EntityManager {
    /// Create a manager for an input whose highest used id is `highest_used_id`
    pub fn new(highest_used_id: usize) -> Self {
        let highest_original_id = highest_used_id.max(FIRST_USER_ID - 1);
        Self {
            highest_original_id,
            next_id: highest_original_id + 1,
            auxiliary: BTreeMap::new(),
            inverse_of: HashMap::new(),
            nominal_class_of: HashMap::new(),
            individual_of: HashMap::new(),
        }
    }

    pub fn highest_original_id(&self) -> usize {
        self.highest_original_id
    }

    /// Id that the next created entity will receive
    pub fn peek_next_id(&self) -> usize {
        self.next_id
    }

    /// Whether `id` was created by this manager
    pub fn is_auxiliary(&self, id: usize) -> bool {
        id > self.highest_original_id
    }

    /// Whether `id` is an original id or one handed out by this manager
    pub fn is_known(&self, id: usize) -> bool {
        id < self.next_id
    }

    pub fn check_known(&self, id: usize) -> Result<()> {
        if self.is_known(id) {
            Ok(())
        } else {
            Err(ElError::InvalidArgument(format!(
                "entity id {} is out of range (next id is {})",
                id, self.next_id
            )))
        }
    }

    pub fn auxiliary_kind(&self, id: usize) -> Option<AuxiliaryKind> {
        self.auxiliary.get(&id).copied()
    }

    /// Create a fresh auxiliary class
    pub fn create_class(&mut self) -> ClassId {
        self.allocate(AuxiliaryKind::Class)
    }

    /// Create a fresh auxiliary object property
    pub fn create_property(&mut self) -> PropertyId {
        self.allocate(AuxiliaryKind::Property)
    }

    /// Inverse of `property` if one has been created
    pub fn inverse_of(&self, property: PropertyId) -> Option<PropertyId> {
        if is_reserved_property(property) {
            return Some(property);
        }
        self.inverse_of.get(&property).copied()
    }

    /// Inverse of `property`, creating it on first use.
    ///
    /// The reserved top and bottom properties are their own inverses.
    pub fn inverse_or_create(&mut self, property: PropertyId) -> Result<PropertyId> {
        self.check_known(property)?;
        if let Some(inverse) = self.inverse_of(property) {
            return Ok(inverse);
        }
        let inverse = self.allocate(AuxiliaryKind::InverseProperty);
        self.inverse_of.insert(property, inverse);
        self.inverse_of.insert(inverse, property);
        Ok(inverse)
    }

    /// Snapshot of the inverse map (symmetric)
    pub fn inverse_map(&self) -> &HashMap<PropertyId, PropertyId> {
        &self.inverse_of
    }

    /// Singleton class `{individual}`, creating it on first use
    pub fn nominal_class(&mut self, individual: IndividualId) -> Result<ClassId> {
        self.check_known(individual)?;
        if let Some(class) = self.nominal_class_of.get(&individual) {
            return Ok(*class);
        }
        let class = self.allocate(AuxiliaryKind::NominalClass);
        self.nominal_class_of.insert(individual, class);
        self.individual_of.insert(class, individual);
        Ok(class)
    }

    pub fn nominal_class_of(&self, individual: IndividualId) -> Option<ClassId> {
        self.nominal_class_of.get(&individual).copied()
    }

    /// Individual reified by a nominal class
    pub fn individual_of(&self, class: ClassId) -> Option<IndividualId> {
        self.individual_of.get(&class).copied()
    }

    /// All auxiliary classes, including nominal classes
    pub fn auxiliary_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.auxiliary
            .iter()
            .filter(|(_, kind)| matches!(kind, AuxiliaryKind::Class | AuxiliaryKind::NominalClass))
            .map(|(id, _)| *id)
    }

    /// All auxiliary properties, including inverses
    pub fn auxiliary_properties(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.auxiliary
            .iter()
            .filter(|(_, kind)| matches!(kind, AuxiliaryKind::Property | AuxiliaryKind::InverseProperty))
            .map(|(id, _)| *id)
    }

    fn allocate(&mut self, kind: AuxiliaryKind) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.auxiliary.insert(id, kind);
        id
    }
}

pub fn is_reserved_property(property: PropertyId) -> bool {
    property == PROPERTY_BOTTOM || property == PROPERTY_TOP
}
