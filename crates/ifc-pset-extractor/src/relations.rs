// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relation filter: from an element to the definitions that describe it
//!
//! All functions follow the element's `IsDefinedBy` order and return an
//! empty vector for elements without matching relationships.

use crate::definitions::{ElementTypeDef, PropertyDefinition, PropertySetDef, QuantitySetDef};
use ifc_pset_model::{AttributeValue, DecodedEntity, EntityId, IfcModel, IfcType, RELATING_DEFINITION};
use std::sync::Arc;

/// Every definition reachable through `IfcRelDefinesByProperties`
///
/// Unfiltered by kind. The aggregators go through
/// [`related_property_sets`] and [`related_quantity_sets`] instead.
pub fn related_properties(model: &dyn IfcModel, element: EntityId) -> Vec<PropertyDefinition> {
    relating_definitions(model, element, &IfcType::IfcRelDefinesByProperties)
        .into_iter()
        .map(PropertyDefinition::classify)
        .collect()
}

/// Every type object reachable through `IfcRelDefinesByType`
pub fn related_type_definitions(model: &dyn IfcModel, element: EntityId) -> Vec<ElementTypeDef> {
    relating_definitions(model, element, &IfcType::IfcRelDefinesByType)
        .into_iter()
        .map(ElementTypeDef::new)
        .collect()
}

/// Property sets attached through `IfcRelDefinesByProperties`
pub fn related_property_sets(model: &dyn IfcModel, element: EntityId) -> Vec<PropertySetDef> {
    related_properties(model, element)
        .into_iter()
        .filter_map(|def| match def {
            PropertyDefinition::PropertySet(set) => Some(set),
            _ => None,
        })
        .collect()
}

/// Element quantity sets attached through `IfcRelDefinesByProperties`
pub fn related_quantity_sets(model: &dyn IfcModel, element: EntityId) -> Vec<QuantitySetDef> {
    related_properties(model, element)
        .into_iter()
        .filter_map(|def| match def {
            PropertyDefinition::QuantitySet(set) => Some(set),
            _ => None,
        })
        .collect()
}

/// Relating definitions of every `rel_type` relationship on `element`
///
/// IFC4 allows `RelatingPropertyDefinition` to be a set of definitions; each
/// member is returned in order. Dangling references are skipped.
fn relating_definitions(
    model: &dyn IfcModel,
    element: EntityId,
    rel_type: &IfcType,
) -> Vec<Arc<DecodedEntity>> {
    let resolver = model.resolver();
    let mut definitions = Vec::new();

    for rel in model.is_defined_by(element) {
        if !rel.is_a(rel_type) {
            continue;
        }

        match rel.get(RELATING_DEFINITION) {
            Some(list @ AttributeValue::List(_)) => {
                definitions.extend(resolver.resolve_ref_list(list));
            }
            Some(attr) => definitions.extend(resolver.resolve_ref(attr)),
            None => {}
        }
    }

    definitions
}
