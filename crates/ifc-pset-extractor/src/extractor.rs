// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configurable extraction entry point

use crate::aggregate::{all_pset_data, all_quantity_data, collect_type_data, merge_instance_data};
use crate::error::Result;
use crate::value::{AttributeMap, PropertyMap, TypeMap};
use ifc_pset_model::{EntityId, EntityResolverExt, IfcModel, IfcType};
use log::debug;
use serde::Serialize;

/// Prefix of the synthesized type-definition keys
pub const DEFAULT_TYPE_KEY_PREFIX: &str = "TypeDefinition_";

/// What to do when a type definition cannot be read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeFaultPolicy {
    /// Log a warning and leave the type out of the result
    #[default]
    Skip,
    /// Return the first fault to the caller
    Propagate,
}

/// Property extractor with configurable options
///
/// # Example
///
/// ```ignore
/// use ifc_pset_extractor::{PropertyExtractor, TypeFaultPolicy};
///
/// let extractor = PropertyExtractor::new()
///     .with_type_key_prefix("Type_")
///     .with_type_fault_policy(TypeFaultPolicy::Propagate);
///
/// let row = extractor.element_record(&model, wall_id)?;
/// println!("{}", serde_json::to_string(&row)?);
/// ```
#[derive(Clone, Debug)]
pub struct PropertyExtractor {
    type_key_prefix: String,
    on_type_fault: TypeFaultPolicy,
}

impl Default for PropertyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyExtractor {
    /// Create an extractor with default options
    pub fn new() -> Self {
        Self {
            type_key_prefix: DEFAULT_TYPE_KEY_PREFIX.to_string(),
            on_type_fault: TypeFaultPolicy::Skip,
        }
    }

    /// Extractor that propagates type faults instead of skipping them
    pub fn strict() -> Self {
        Self::new().with_type_fault_policy(TypeFaultPolicy::Propagate)
    }

    /// Set the prefix of type-definition keys
    pub fn with_type_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_key_prefix = prefix.into();
        self
    }

    /// Set how unreadable type definitions are handled
    pub fn with_type_fault_policy(mut self, policy: TypeFaultPolicy) -> Self {
        self.on_type_fault = policy;
        self
    }

    pub fn type_key_prefix(&self) -> &str {
        &self.type_key_prefix
    }

    pub fn type_fault_policy(&self) -> TypeFaultPolicy {
        self.on_type_fault
    }

    /// All property-set values of an element
    pub fn pset_data(&self, model: &dyn IfcModel, element: EntityId) -> PropertyMap {
        all_pset_data(model, element)
    }

    /// All quantity values of an element
    pub fn quantity_data(&self, model: &dyn IfcModel, element: EntityId) -> PropertyMap {
        all_quantity_data(model, element)
    }

    /// Type-definition keys of an element
    ///
    /// Only fails under [`TypeFaultPolicy::Propagate`].
    pub fn type_data(&self, model: &dyn IfcModel, element: EntityId) -> Result<TypeMap> {
        collect_type_data(model, element, &self.type_key_prefix, self.on_type_fault)
    }

    /// Properties, then quantities, then type keys, merged into one map
    pub fn instance_data(&self, model: &dyn IfcModel, element: EntityId) -> Result<AttributeMap> {
        let properties = self.pset_data(model, element);
        let quantities = self.quantity_data(model, element);
        let types = self.type_data(model, element)?;

        debug!(
            "Element {}: {} properties, {} quantities, {} type keys",
            element,
            properties.len(),
            quantities.len(),
            types.len()
        );

        Ok(merge_instance_data(properties, quantities, types))
    }

    /// One tabular row for an element
    ///
    /// # Errors
    ///
    /// `EntityNotFound` if the model has no entity with this id, plus any
    /// type fault under [`TypeFaultPolicy::Propagate`].
    pub fn element_record(&self, model: &dyn IfcModel, element: EntityId) -> Result<ElementRecord> {
        let entity = model.resolver().get_or_err(element)?;
        let attributes = self.instance_data(model, element)?;

        Ok(ElementRecord {
            id: element,
            ifc_type: entity.ifc_type.name().to_string(),
            global_id: model.global_id(element),
            name: model.name(element),
            attributes,
        })
    }

    /// One row per entity of `ifc_type`, in id order
    pub fn records_by_type(
        &self,
        model: &dyn IfcModel,
        ifc_type: &IfcType,
    ) -> Result<Vec<ElementRecord>> {
        let mut ids: Vec<EntityId> = model
            .resolver()
            .entities_by_type(ifc_type)
            .iter()
            .map(|entity| entity.id)
            .collect();
        ids.sort_unstable();

        ids.into_iter()
            .map(|id| self.element_record(model, id))
            .collect()
    }
}

/// Flattened data of one element
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementRecord {
    pub id: EntityId,
    pub ifc_type: String,
    pub global_id: Option<String>,
    pub name: Option<String>,
    pub attributes: AttributeMap,
}
