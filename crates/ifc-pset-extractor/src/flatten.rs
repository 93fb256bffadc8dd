// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value flatteners: one property container in, one flat map out

use crate::definitions::{
    definition_name, ElementTypeDef, PropertyRecord, PropertySetDef, QuantityRecord,
    QuantitySetDef,
};
use crate::error::{ExtractError, Result};
use crate::value::{PropertyKey, PropertyMap, TypeMap};
use ifc_pset_model::{EntityResolver, ModelError};
use log::trace;

/// Attribute index of `Name` on the type object, reported when it is missing
const TYPE_NAME: usize = 2;

/// Flatten a property set into `(set name, property name) -> value`
///
/// Single values contribute when their nominal value is present. A complex
/// property contributes its direct single values under the *set* name; its
/// own name is dropped and complex parts nested in it are not followed.
/// Other record kinds are skipped. A set without a name is keyed with
/// `set: None`.
pub fn flatten_properties(set: &PropertySetDef, resolver: &dyn EntityResolver) -> PropertyMap {
    let set_name = set.name();
    let mut map = PropertyMap::default();

    for record in set.records(resolver) {
        match record {
            PropertyRecord::SingleValue { name, value } => {
                if let Some(value) = value {
                    map.insert(PropertyKey::in_set(set_name, name), value);
                }
            }
            PropertyRecord::Complex { name, parts } => {
                for part in parts {
                    match part {
                        PropertyRecord::SingleValue {
                            name: part_name,
                            value: Some(value),
                        } => {
                            map.insert(PropertyKey::in_set(set_name, part_name), value);
                        }
                        PropertyRecord::SingleValue { value: None, .. } => {}
                        other => trace!(
                            "Skipping nested property {} in complex property {} of {}",
                            other.name(),
                            name,
                            set.id()
                        ),
                    }
                }
            }
            PropertyRecord::Unsupported { name, ifc_type } => {
                trace!("Skipping {} {} in {}", ifc_type, name, set.id());
            }
        }
    }

    map
}

/// Flatten an element quantity set into `(set name, quantity name) -> value`
///
/// Each of the five simple quantity kinds contributes its own value field.
/// Unsupported kinds are skipped. A measured quantity whose value is `$`
/// is skipped too, so it has no key at all rather than a key with an empty
/// value; the value is mandatory in the schema, so this only affects
/// malformed files.
pub fn flatten_quantities(set: &QuantitySetDef, resolver: &dyn EntityResolver) -> PropertyMap {
    let set_name = set.name();
    let mut map = PropertyMap::default();

    for record in set.quantities(resolver) {
        match record {
            QuantityRecord::Measured {
                name,
                value: Some(value),
                ..
            } => {
                map.insert(PropertyKey::in_set(set_name, name), value);
            }
            QuantityRecord::Measured {
                name,
                kind,
                value: None,
            } => {
                trace!("{} {} has no {}", set.id(), name, kind.value_attribute());
            }
            QuantityRecord::Unsupported { name, ifc_type } => {
                trace!("Skipping {} {} in {}", ifc_type, name, set.id());
            }
        }
    }

    map
}

/// Flatten a type object into `prefix + type name -> property set name`
///
/// Every named property set of the type writes the same key, so the last
/// one wins. This surfaces *which* sets define the type, not their values.
///
/// # Errors
///
/// Returns [`ExtractError::TypeDefinition`] when `HasPropertySets` cannot be
/// read, or when the type has no name but at least one named set. The
/// caller decides whether to log and continue or to propagate.
pub fn flatten_type(
    ty: &ElementTypeDef,
    resolver: &dyn EntityResolver,
    prefix: &str,
) -> Result<TypeMap> {
    let sets = ty
        .property_sets(resolver)
        .map_err(|source| ExtractError::type_definition(ty, source))?;

    let mut map = TypeMap::default();

    for set in &sets {
        let Some(set_name) = definition_name(set) else {
            continue;
        };

        let type_name = ty.name().ok_or_else(|| {
            ExtractError::type_definition(
                ty,
                ModelError::MissingAttribute {
                    entity: ty.id(),
                    attribute: TYPE_NAME,
                },
            )
        })?;

        map.insert(format!("{}{}", prefix, type_name), set_name.to_string());
    }

    Ok(map)
}
