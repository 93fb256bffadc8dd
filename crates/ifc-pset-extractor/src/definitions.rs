// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed views over property definitions and their records
//!
//! Each view wraps a decoded entity and reads its attributes by schema
//! position. Record kinds are closed enumerations so the flatteners can
//! `match` exhaustively; kinds that carry no single scalar end up in an
//! explicit `Unsupported` variant.

use crate::value::PropertyValue;
use ifc_pset_model::{
    AttributeValue, DecodedEntity, EntityId, EntityResolver, EntityResolverExt, IfcType,
    ModelError,
};
use std::sync::Arc;

/// Name of every `IfcRoot` subtype (psets, quantity sets, type objects)
const ROOT_NAME: usize = 2;
/// GlobalId of every `IfcRoot` subtype
const ROOT_GLOBAL_ID: usize = 0;
/// `IfcPropertySet.HasProperties`
const PSET_HAS_PROPERTIES: usize = 4;
/// `IfcElementQuantity.Quantities`
const QSET_QUANTITIES: usize = 5;
/// `IfcTypeObject.HasPropertySets`
const TYPE_HAS_PROPERTY_SETS: usize = 5;
/// `IfcProperty.Name` / `IfcPhysicalQuantity.Name`
const RECORD_NAME: usize = 0;
/// `IfcPropertySingleValue.NominalValue`
const SINGLE_NOMINAL_VALUE: usize = 2;
/// `IfcComplexProperty.HasProperties`
const COMPLEX_HAS_PROPERTIES: usize = 3;
/// `AreaValue`, `LengthValue`, `VolumeValue`, `CountValue`, `WeightValue`
const QUANTITY_VALUE: usize = 3;

/// A property definition reached through a definition relationship
#[derive(Clone, Debug)]
pub enum PropertyDefinition {
    /// IfcPropertySet
    PropertySet(PropertySetDef),
    /// IfcElementQuantity
    QuantitySet(QuantitySetDef),
    /// IfcTypeObject and subtypes
    ElementType(ElementTypeDef),
    /// Any other definition kind (templates, predefined sets, ...)
    Other(Arc<DecodedEntity>),
}

impl PropertyDefinition {
    /// Sort an entity into its definition variant
    pub fn classify(entity: Arc<DecodedEntity>) -> Self {
        if entity.is_a(&IfcType::IfcPropertySet) {
            PropertyDefinition::PropertySet(PropertySetDef::new(entity))
        } else if entity.is_a(&IfcType::IfcElementQuantity) {
            PropertyDefinition::QuantitySet(QuantitySetDef::new(entity))
        } else if entity.ifc_type.is_type_object() {
            PropertyDefinition::ElementType(ElementTypeDef::new(entity))
        } else {
            PropertyDefinition::Other(entity)
        }
    }

    /// The underlying entity
    pub fn entity(&self) -> &Arc<DecodedEntity> {
        match self {
            PropertyDefinition::PropertySet(def) => &def.entity,
            PropertyDefinition::QuantitySet(def) => &def.entity,
            PropertyDefinition::ElementType(def) => &def.entity,
            PropertyDefinition::Other(entity) => entity,
        }
    }

    /// Definition name, if set
    pub fn name(&self) -> Option<&str> {
        self.entity().get_string(ROOT_NAME)
    }
}

/// View over an `IfcPropertySet`
#[derive(Clone, Debug)]
pub struct PropertySetDef {
    entity: Arc<DecodedEntity>,
}

impl PropertySetDef {
    pub fn new(entity: Arc<DecodedEntity>) -> Self {
        Self { entity }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    /// Set name (e.g. "Pset_WallCommon")
    pub fn name(&self) -> Option<&str> {
        self.entity.get_string(ROOT_NAME)
    }

    /// Decode the set's `HasProperties` in order
    ///
    /// Dangling references are skipped.
    pub fn records(&self, resolver: &dyn EntityResolver) -> Vec<PropertyRecord> {
        resolver
            .resolve_list_at(&self.entity, PSET_HAS_PROPERTIES)
            .iter()
            .map(|prop| PropertyRecord::decode(prop, resolver))
            .collect()
    }
}

/// A record held by a property set or complex property
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyRecord {
    /// IfcPropertySingleValue; `value` is `None` when NominalValue is `$`
    SingleValue {
        name: String,
        value: Option<PropertyValue>,
    },
    /// IfcComplexProperty with its direct parts
    ///
    /// Only one level is decoded: a complex part nested inside a complex
    /// property is `Unsupported` and its own parts are never read.
    Complex {
        name: String,
        parts: Vec<PropertyRecord>,
    },
    /// Enumerated, bounded, list, table and reference values, and complex
    /// properties below the first level
    Unsupported { name: String, ifc_type: IfcType },
}

impl PropertyRecord {
    /// Decode a property entity
    ///
    /// A complex property has its direct parts decoded; nothing below them
    /// is followed.
    pub fn decode(entity: &DecodedEntity, resolver: &dyn EntityResolver) -> Self {
        match entity.ifc_type {
            IfcType::IfcComplexProperty => PropertyRecord::Complex {
                name: record_name(entity),
                parts: resolver
                    .resolve_list_at(entity, COMPLEX_HAS_PROPERTIES)
                    .iter()
                    .map(|part| Self::decode_part(part))
                    .collect(),
            },
            _ => Self::decode_part(entity),
        }
    }

    fn decode_part(entity: &DecodedEntity) -> Self {
        let name = record_name(entity);

        match entity.ifc_type {
            IfcType::IfcPropertySingleValue => PropertyRecord::SingleValue {
                name,
                value: entity
                    .get(SINGLE_NOMINAL_VALUE)
                    .and_then(PropertyValue::from_attribute),
            },
            ref ty => PropertyRecord::Unsupported {
                name,
                ifc_type: ty.clone(),
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PropertyRecord::SingleValue { name, .. }
            | PropertyRecord::Complex { name, .. }
            | PropertyRecord::Unsupported { name, .. } => name,
        }
    }
}

/// View over an `IfcElementQuantity`
#[derive(Clone, Debug)]
pub struct QuantitySetDef {
    entity: Arc<DecodedEntity>,
}

impl QuantitySetDef {
    pub fn new(entity: Arc<DecodedEntity>) -> Self {
        Self { entity }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    /// Set name (e.g. "BaseQuantities")
    pub fn name(&self) -> Option<&str> {
        self.entity.get_string(ROOT_NAME)
    }

    /// Decode the set's `Quantities` in order
    pub fn quantities(&self, resolver: &dyn EntityResolver) -> Vec<QuantityRecord> {
        resolver
            .resolve_list_at(&self.entity, QSET_QUANTITIES)
            .iter()
            .map(|qty| QuantityRecord::decode(qty))
            .collect()
    }
}

/// Simple quantity kinds with a single value field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Area,
    Length,
    Volume,
    Count,
    Weight,
}

impl QuantityKind {
    /// Determine the kind from a quantity entity's type
    pub fn from_ifc_type(ifc_type: &IfcType) -> Option<Self> {
        match ifc_type {
            IfcType::IfcQuantityArea => Some(QuantityKind::Area),
            IfcType::IfcQuantityLength => Some(QuantityKind::Length),
            IfcType::IfcQuantityVolume => Some(QuantityKind::Volume),
            IfcType::IfcQuantityCount => Some(QuantityKind::Count),
            IfcType::IfcQuantityWeight => Some(QuantityKind::Weight),
            _ => None,
        }
    }

    /// Schema name of the kind's value attribute
    pub fn value_attribute(&self) -> &'static str {
        match self {
            QuantityKind::Area => "AreaValue",
            QuantityKind::Length => "LengthValue",
            QuantityKind::Volume => "VolumeValue",
            QuantityKind::Count => "CountValue",
            QuantityKind::Weight => "WeightValue",
        }
    }
}

/// A record held by an element quantity set
#[derive(Clone, Debug, PartialEq)]
pub enum QuantityRecord {
    /// One of the five simple quantities; `value` is `None` when `$`
    Measured {
        name: String,
        kind: QuantityKind,
        value: Option<PropertyValue>,
    },
    /// Time quantities, physical complex quantities, ...
    Unsupported { name: String, ifc_type: IfcType },
}

impl QuantityRecord {
    /// Decode a quantity entity
    pub fn decode(entity: &DecodedEntity) -> Self {
        let name = record_name(entity);

        match QuantityKind::from_ifc_type(&entity.ifc_type) {
            Some(kind) => QuantityRecord::Measured {
                name,
                kind,
                value: entity
                    .get(QUANTITY_VALUE)
                    .and_then(PropertyValue::from_attribute),
            },
            None => QuantityRecord::Unsupported {
                name,
                ifc_type: entity.ifc_type.clone(),
            },
        }
    }
}

/// View over a type object (`IfcWallType`, `IfcDoorStyle`, ...)
#[derive(Clone, Debug)]
pub struct ElementTypeDef {
    entity: Arc<DecodedEntity>,
}

impl ElementTypeDef {
    pub fn new(entity: Arc<DecodedEntity>) -> Self {
        Self { entity }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    pub fn global_id(&self) -> Option<&str> {
        self.entity.get_string(ROOT_GLOBAL_ID)
    }

    /// Type name (e.g. "Basic Wall:Interior - 138mm")
    pub fn name(&self) -> Option<&str> {
        self.entity.get_string(ROOT_NAME)
    }

    /// Resolve `HasPropertySets`
    ///
    /// `$` yields an empty list. Anything other than a list of resolvable
    /// references is an error.
    pub fn property_sets(
        &self,
        resolver: &dyn EntityResolver,
    ) -> Result<Vec<Arc<DecodedEntity>>, ModelError> {
        let id = self.entity.id;

        match self.entity.get(TYPE_HAS_PROPERTY_SETS) {
            None | Some(AttributeValue::Null) => Ok(Vec::new()),
            Some(AttributeValue::List(items)) => items
                .iter()
                .map(|item| resolver.resolve_ref_or_err(id, TYPE_HAS_PROPERTY_SETS, item))
                .collect(),
            Some(other) => Err(ModelError::type_mismatch(
                id,
                TYPE_HAS_PROPERTY_SETS,
                "list",
                other.kind_name(),
            )),
        }
    }
}

/// Name of a nested property set held by a type object
pub(crate) fn definition_name(entity: &DecodedEntity) -> Option<&str> {
    entity.get_string(ROOT_NAME)
}

fn record_name(entity: &DecodedEntity) -> String {
    entity
        .get_string(RECORD_NAME)
        .unwrap_or_default()
        .to_string()
}
