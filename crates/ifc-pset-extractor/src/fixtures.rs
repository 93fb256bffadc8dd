// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory model for unit tests
//!
//! Entities are numbered from #1 in insertion order, so relationship order
//! in a test follows the order the relationships were added.

use ifc_pset_model::{AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcModel, IfcType};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct MemoryModel {
    entities: FxHashMap<u32, Arc<DecodedEntity>>,
}

impl EntityResolver for MemoryModel {
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>> {
        self.entities.get(&id.0).cloned()
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>> {
        let mut found: Vec<_> = self
            .entities
            .values()
            .filter(|e| &e.ifc_type == ifc_type)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.id);
        found
    }
}

impl IfcModel for MemoryModel {
    fn resolver(&self) -> &dyn EntityResolver {
        self
    }
}

pub(crate) struct ModelBuilder {
    model: MemoryModel,
    next_id: u32,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            model: MemoryModel::default(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, ifc_type: IfcType, attributes: Vec<AttributeValue>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.model
            .entities
            .insert(id.0, Arc::new(DecodedEntity::new(id, ifc_type, attributes)));
        id
    }

    /// Building element: (GlobalId, OwnerHistory, Name, Description, ObjectType,
    /// ObjectPlacement, Representation, Tag)
    pub fn element(&mut self, ifc_type: IfcType, name: &str) -> EntityId {
        let guid = self.guid();
        self.add(
            ifc_type,
            vec![
                guid,
                AttributeValue::Null,
                text(name),
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        )
    }

    /// IfcPropertySingleValue: (Name, Description, NominalValue, Unit)
    pub fn single_value(&mut self, name: &str, value: Option<AttributeValue>) -> EntityId {
        self.add(
            IfcType::IfcPropertySingleValue,
            vec![
                text(name),
                AttributeValue::Null,
                value.unwrap_or(AttributeValue::Null),
                AttributeValue::Null,
            ],
        )
    }

    /// IfcComplexProperty: (Name, Description, UsageName, HasProperties)
    pub fn complex(&mut self, name: &str, parts: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcComplexProperty,
            vec![text(name), AttributeValue::Null, text("Usage"), refs(parts)],
        )
    }

    /// Any other property record kind, with only its name filled in
    pub fn property(&mut self, ifc_type: IfcType, name: &str) -> EntityId {
        self.add(
            ifc_type,
            vec![
                text(name),
                AttributeValue::Null,
                AttributeValue::List(vec![label("A"), label("B")]),
                AttributeValue::Null,
            ],
        )
    }

    /// IfcPropertySet: (GlobalId, OwnerHistory, Name, Description, HasProperties)
    pub fn property_set(&mut self, name: Option<&str>, properties: &[EntityId]) -> EntityId {
        let guid = self.guid();
        self.add(
            IfcType::IfcPropertySet,
            vec![
                guid,
                AttributeValue::Null,
                optional_text(name),
                AttributeValue::Null,
                refs(properties),
            ],
        )
    }

    /// Simple quantity: (Name, Description, Unit, <Kind>Value, Formula)
    pub fn quantity(&mut self, ifc_type: IfcType, name: &str, value: AttributeValue) -> EntityId {
        self.add(
            ifc_type,
            vec![
                text(name),
                AttributeValue::Null,
                AttributeValue::Null,
                value,
                AttributeValue::Null,
            ],
        )
    }

    /// IfcElementQuantity: (GlobalId, OwnerHistory, Name, Description,
    /// MethodOfMeasurement, Quantities)
    pub fn element_quantity(&mut self, name: Option<&str>, quantities: &[EntityId]) -> EntityId {
        let guid = self.guid();
        self.add(
            IfcType::IfcElementQuantity,
            vec![
                guid,
                AttributeValue::Null,
                optional_text(name),
                AttributeValue::Null,
                AttributeValue::Null,
                refs(quantities),
            ],
        )
    }

    /// Type object: (GlobalId, OwnerHistory, Name, Description,
    /// ApplicableOccurrence, HasPropertySets, RepresentationMaps, Tag,
    /// ElementType, PredefinedType)
    pub fn element_type(
        &mut self,
        ifc_type: IfcType,
        name: Option<&str>,
        property_sets: AttributeValue,
    ) -> EntityId {
        let guid = self.guid();
        self.add(
            ifc_type,
            vec![
                guid,
                AttributeValue::Null,
                optional_text(name),
                AttributeValue::Null,
                AttributeValue::Null,
                property_sets,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Enum("NOTDEFINED".to_string()),
            ],
        )
    }

    /// IfcRelDefinesByProperties with a single relating definition
    pub fn defines_by_properties(&mut self, objects: &[EntityId], definition: EntityId) -> EntityId {
        self.relationship(
            IfcType::IfcRelDefinesByProperties,
            objects,
            AttributeValue::EntityRef(definition),
        )
    }

    /// IfcRelDefinesByType
    pub fn defines_by_type(&mut self, objects: &[EntityId], ty: EntityId) -> EntityId {
        self.relationship(
            IfcType::IfcRelDefinesByType,
            objects,
            AttributeValue::EntityRef(ty),
        )
    }

    /// Definition relationship: (GlobalId, OwnerHistory, Name, Description,
    /// RelatedObjects, Relating...)
    pub fn relationship(
        &mut self,
        ifc_type: IfcType,
        objects: &[EntityId],
        relating: AttributeValue,
    ) -> EntityId {
        let guid = self.guid();
        self.add(
            ifc_type,
            vec![
                guid,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                refs(objects),
                relating,
            ],
        )
    }

    pub fn build(self) -> MemoryModel {
        self.model
    }

    fn guid(&self) -> AttributeValue {
        text(&format!("guid-{}", self.next_id))
    }
}

pub(crate) fn text(s: &str) -> AttributeValue {
    AttributeValue::String(s.to_string())
}

pub(crate) fn optional_text(s: Option<&str>) -> AttributeValue {
    s.map(text).unwrap_or(AttributeValue::Null)
}

pub(crate) fn label(s: &str) -> AttributeValue {
    AttributeValue::TypedValue("IFCLABEL".to_string(), vec![text(s)])
}

pub(crate) fn real(measure: &str, value: f64) -> AttributeValue {
    AttributeValue::TypedValue(measure.to_string(), vec![AttributeValue::Float(value)])
}

pub(crate) fn integer(measure: &str, value: i64) -> AttributeValue {
    AttributeValue::TypedValue(measure.to_string(), vec![AttributeValue::Integer(value)])
}

pub(crate) fn refs(ids: &[EntityId]) -> AttributeValue {
    AttributeValue::List(ids.iter().map(|&id| AttributeValue::EntityRef(id)).collect())
}
