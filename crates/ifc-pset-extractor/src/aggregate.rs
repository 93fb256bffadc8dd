// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregators: merge every container of one category into a single map
//!
//! Containers are visited in relationship order and flattened one by one;
//! a key written by a later container overwrites the value of an earlier
//! one but keeps its original position.

use crate::error::Result;
use crate::extractor::{TypeFaultPolicy, DEFAULT_TYPE_KEY_PREFIX};
use crate::flatten::{flatten_properties, flatten_quantities, flatten_type};
use crate::relations::{related_property_sets, related_quantity_sets, related_type_definitions};
use crate::value::{AttributeKey, AttributeMap, PropertyMap, PropertyValue, TypeMap};
use ifc_pset_model::{EntityId, IfcModel};
use log::warn;

/// All property-set values of an element
pub fn all_pset_data(model: &dyn IfcModel, element: EntityId) -> PropertyMap {
    let resolver = model.resolver();
    let mut data = PropertyMap::default();

    for set in related_property_sets(model, element) {
        data.extend(flatten_properties(&set, resolver));
    }

    data
}

/// All quantity values of an element
pub fn all_quantity_data(model: &dyn IfcModel, element: EntityId) -> PropertyMap {
    let resolver = model.resolver();
    let mut data = PropertyMap::default();

    for set in related_quantity_sets(model, element) {
        data.extend(flatten_quantities(&set, resolver));
    }

    data
}

/// Type-definition keys of an element
///
/// A type object that cannot be read is logged at `warn` with its GlobalId
/// and contributes nothing.
pub fn all_type_data(model: &dyn IfcModel, element: EntityId) -> TypeMap {
    collect_type_data(model, element, DEFAULT_TYPE_KEY_PREFIX, TypeFaultPolicy::Skip)
        .unwrap_or_default()
}

/// Properties, quantities and type keys merged into one map
///
/// Merged in that order; on a key collision the later category wins. Type
/// values are the property set names, as text.
pub fn all_instance_data(model: &dyn IfcModel, element: EntityId) -> AttributeMap {
    merge_instance_data(
        all_pset_data(model, element),
        all_quantity_data(model, element),
        all_type_data(model, element),
    )
}

pub(crate) fn collect_type_data(
    model: &dyn IfcModel,
    element: EntityId,
    prefix: &str,
    policy: TypeFaultPolicy,
) -> Result<TypeMap> {
    let resolver = model.resolver();
    let mut data = TypeMap::default();

    for ty in related_type_definitions(model, element) {
        match flatten_type(&ty, resolver, prefix) {
            Ok(map) => data.extend(map),
            Err(err) => match policy {
                TypeFaultPolicy::Skip => warn!(
                    "Skipping type definition {} on element {}: {}",
                    ty.global_id().unwrap_or_default(),
                    element,
                    err
                ),
                TypeFaultPolicy::Propagate => return Err(err),
            },
        }
    }

    Ok(data)
}

pub(crate) fn merge_instance_data(
    properties: PropertyMap,
    quantities: PropertyMap,
    types: TypeMap,
) -> AttributeMap {
    let mut data = AttributeMap::default();

    data.extend(properties.into_iter().map(|(k, v)| (AttributeKey::from(k), v)));
    data.extend(quantities.into_iter().map(|(k, v)| (AttributeKey::from(k), v)));
    data.extend(
        types
            .into_iter()
            .map(|(k, v)| (AttributeKey::Type(k), PropertyValue::Text(v))),
    );

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{integer, label, real, refs, ModelBuilder};
    use crate::value::PropertyKey;
    use ifc_pset_model::{AttributeValue, IfcType};

    #[test]
    fn test_element_without_relationships() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let model = builder.build();

        assert!(all_pset_data(&model, wall).is_empty());
        assert!(all_quantity_data(&model, wall).is_empty());
        assert!(all_type_data(&model, wall).is_empty());
        assert!(all_instance_data(&model, wall).is_empty());
    }

    #[test]
    fn test_pset_data_is_union_of_sets() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let external = builder.single_value("IsExternal", Some(label("T")));
        let rating = builder.single_value("FireRating", Some(label("REI60")));
        let common = builder.property_set(Some("Pset_WallCommon"), &[external, rating]);
        let note = builder.single_value("Note", Some(label("check")));
        let custom = builder.property_set(Some("Custom"), &[note]);
        builder.defines_by_properties(&[wall], common);
        builder.defines_by_properties(&[wall], custom);
        let model = builder.build();

        let data = all_pset_data(&model, wall);
        let keys: Vec<_> = data.keys().map(|k| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "Pset_WallCommon.IsExternal",
                "Pset_WallCommon.FireRating",
                "Custom.Note",
            ]
        );
    }

    #[test]
    fn test_same_set_name_on_two_sets_last_wins() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let first = builder.single_value("Width", Some(integer("IFCINTEGER", 1)));
        let other = builder.single_value("Height", Some(integer("IFCINTEGER", 7)));
        let a = builder.property_set(Some("Dims"), &[first, other]);
        let second = builder.single_value("Width", Some(integer("IFCINTEGER", 2)));
        let b = builder.property_set(Some("Dims"), &[second]);
        builder.defines_by_properties(&[wall], a);
        builder.defines_by_properties(&[wall], b);
        let model = builder.build();

        let data = all_pset_data(&model, wall);
        let entries: Vec<_> = data.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("Dims.Width".to_string(), PropertyValue::Integer(2)),
                ("Dims.Height".to_string(), PropertyValue::Integer(7)),
            ]
        );
    }

    #[test]
    fn test_quantity_data_ignores_property_sets() {
        let mut builder = ModelBuilder::new();
        let slab = builder.element(IfcType::IfcSlab, "Slab 1");
        let area = builder.quantity(IfcType::IfcQuantityArea, "NetArea", AttributeValue::Float(12.5));
        let qset = builder.element_quantity(Some("Qto_SlabBaseQuantities"), &[area]);
        let prop = builder.single_value("LoadBearing", Some(label("T")));
        let pset = builder.property_set(Some("Pset_SlabCommon"), &[prop]);
        builder.defines_by_properties(&[slab], qset);
        builder.defines_by_properties(&[slab], pset);
        let model = builder.build();

        let data = all_quantity_data(&model, slab);
        assert_eq!(data.len(), 1);
        assert_eq!(
            data.get(&PropertyKey::new("Qto_SlabBaseQuantities", "NetArea")),
            Some(&PropertyValue::Real(12.5))
        );

        let psets = all_pset_data(&model, slab);
        assert_eq!(psets.len(), 1);
        assert!(psets.contains_key(&PropertyKey::new("Pset_SlabCommon", "LoadBearing")));
    }

    #[test]
    fn test_type_data_skips_faulty_types() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let pset = builder.property_set(Some("Pset_WallType"), &[]);
        let nameless = builder.element_type(IfcType::IfcWallType, None, refs(&[pset]));
        let good = builder.element_type(IfcType::IfcWallType, Some("Basic Wall"), refs(&[pset]));
        builder.defines_by_type(&[wall], nameless);
        builder.defines_by_type(&[wall], good);
        let model = builder.build();

        let data = all_type_data(&model, wall);
        assert_eq!(data.len(), 1);
        assert_eq!(
            data.get("TypeDefinition_Basic Wall").map(String::as_str),
            Some("Pset_WallType")
        );

        let err = collect_type_data(&model, wall, "T_", TypeFaultPolicy::Propagate).unwrap_err();
        assert!(err.to_string().contains(&format!("guid-{}", nameless.0)));
    }

    #[test]
    fn test_instance_data_merge_order() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let ty_pset = builder.property_set(Some("Pset_WallType"), &[]);
        let ty = builder.element_type(IfcType::IfcWallType, Some("WallType1"), refs(&[ty_pset]));
        let width = builder.quantity(IfcType::IfcQuantityLength, "Width", AttributeValue::Float(0.3));
        let qset = builder.element_quantity(Some("Dims"), &[width]);
        let prop_width = builder.single_value("Width", Some(real("IFCLENGTHMEASURE", 0.2)));
        let rating = builder.single_value("FireRating", Some(label("REI60")));
        let pset = builder.property_set(Some("Dims"), &[prop_width, rating]);
        // Type relationship first: merge order does not follow file order
        builder.defines_by_type(&[wall], ty);
        builder.defines_by_properties(&[wall], qset);
        builder.defines_by_properties(&[wall], pset);
        let model = builder.build();

        let data = all_instance_data(&model, wall);
        let entries: Vec<_> = data.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("Dims.Width".to_string(), PropertyValue::Real(0.3)),
                ("Dims.FireRating".to_string(), PropertyValue::from("REI60")),
                (
                    "TypeDefinition_WallType1".to_string(),
                    PropertyValue::from("Pset_WallType")
                ),
            ]
        );
        assert!(matches!(data.keys().last(), Some(AttributeKey::Type(_))));
    }

    #[test]
    fn test_repeated_calls_are_equal() {
        let mut builder = ModelBuilder::new();
        let wall = builder.element(IfcType::IfcWall, "Wall 1");
        let prop = builder.single_value("IsExternal", Some(label("T")));
        let pset = builder.property_set(Some("Pset_WallCommon"), &[prop]);
        builder.defines_by_properties(&[wall], pset);
        let model = builder.build();

        assert_eq!(all_instance_data(&model, wall), all_instance_data(&model, wall));
        assert_eq!(all_pset_data(&model, wall), all_pset_data(&model, wall));
    }

    #[test]
    fn test_shared_set_reaches_every_related_element() {
        let mut builder = ModelBuilder::new();
        let a = builder.element(IfcType::IfcDoor, "Door A");
        let b = builder.element(IfcType::IfcDoor, "Door B");
        let prop = builder.single_value("HandicapAccessible", Some(label("F")));
        let pset = builder.property_set(Some("Pset_DoorCommon"), &[prop]);
        builder.defines_by_properties(&[a, b], pset);
        let model = builder.build();

        assert_eq!(all_pset_data(&model, a), all_pset_data(&model, b));
        assert_eq!(all_pset_data(&model, a).len(), 1);
    }
}
