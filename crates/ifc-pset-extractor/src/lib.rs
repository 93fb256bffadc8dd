// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Pset Extractor - Flatten element properties into key/value maps
//!
//! This crate reads the property sets, element quantities and type
//! definitions attached to an IFC element and flattens them into plain maps
//! suitable for tables and JSON. It works against any model implementing
//! the traits of `ifc-pset-model`.
//!
//! # Stages
//!
//! - **Relation filter** ([`relations`]) - follow `IsDefinedBy` to the
//!   definitions of one kind
//! - **Definition views** ([`definitions`]) - decode records into closed enums
//! - **Flatteners** ([`flatten`]) - one container in, one map out
//! - **Aggregators** ([`aggregate`]) - merge all containers of a category
//!
//! # Example
//!
//! ```ignore
//! use ifc_pset_extractor::{all_instance_data, PropertyExtractor};
//!
//! // Quick path: default options, type faults are logged and skipped
//! for (key, value) in all_instance_data(&model, wall_id) {
//!     println!("{} = {}", key, value);
//! }
//!
//! // Configured path
//! let rows = PropertyExtractor::strict().records_by_type(&model, &IfcType::IfcWall)?;
//! ```

pub mod aggregate;
pub mod definitions;
pub mod error;
pub mod extractor;
pub mod flatten;
pub mod relations;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use aggregate::{all_instance_data, all_pset_data, all_quantity_data, all_type_data};
pub use definitions::{
    ElementTypeDef, PropertyDefinition, PropertyRecord, PropertySetDef, QuantityKind,
    QuantityRecord, QuantitySetDef,
};
pub use error::{ExtractError, Result};
pub use extractor::{ElementRecord, PropertyExtractor, TypeFaultPolicy, DEFAULT_TYPE_KEY_PREFIX};
pub use flatten::{flatten_properties, flatten_quantities, flatten_type};
pub use relations::{
    related_properties, related_property_sets, related_quantity_sets, related_type_definitions,
};
pub use value::{
    AttributeKey, AttributeMap, FlatMap, PropertyKey, PropertyMap, PropertyValue, TypeMap,
};
