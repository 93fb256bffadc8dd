// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up and resolving IFC entities

use crate::{AttributeValue, DecodedEntity, EntityId, IfcType, ModelError, Result};
use std::sync::Arc;

/// Entity lookup and reference resolution
///
/// Implementations should provide O(1) lookup by entity ID. Entities are
/// handed out behind an `Arc` so callers can hold on to them without
/// borrowing the resolver.
///
/// # Example
///
/// ```ignore
/// use ifc_pset_model::{EntityResolver, EntityId};
///
/// fn property_names(resolver: &dyn EntityResolver, pset_id: EntityId) -> Vec<String> {
///     let Some(pset) = resolver.get(pset_id) else {
///         return Vec::new();
///     };
///     // HasProperties at index 4
///     pset.get(4)
///         .map(|attr| resolver.resolve_ref_list(attr))
///         .unwrap_or_default()
///         .iter()
///         .filter_map(|prop| prop.get_string(0).map(str::to_string))
///         .collect()
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>>;

    /// Resolve an entity reference from an attribute value
    ///
    /// Returns `None` if the attribute is not a reference or the referenced
    /// entity does not exist.
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references
    ///
    /// Non-reference items and dangling references are skipped; a non-list
    /// attribute yields an empty vector.
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<Arc<DecodedEntity>> {
        match attr {
            AttributeValue::List(items) => items
                .iter()
                .filter_map(|item| self.resolve_ref(item))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get all entities of a specific type
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>>;
}

/// Extension methods for EntityResolver
pub trait EntityResolverExt: EntityResolver {
    /// Get entity or return error
    fn get_or_err(&self, id: EntityId) -> Result<Arc<DecodedEntity>> {
        self.get(id).ok_or(ModelError::EntityNotFound(id))
    }

    /// Resolve the reference list held at `index` of `entity`
    ///
    /// A missing or non-list attribute yields an empty vector.
    fn resolve_list_at(&self, entity: &DecodedEntity, index: usize) -> Vec<Arc<DecodedEntity>> {
        entity
            .get(index)
            .map(|attr| self.resolve_ref_list(attr))
            .unwrap_or_default()
    }

    /// Resolve reference or return error
    fn resolve_ref_or_err(
        &self,
        entity_id: EntityId,
        attr_index: usize,
        attr: &AttributeValue,
    ) -> Result<Arc<DecodedEntity>> {
        self.resolve_ref(attr).ok_or(ModelError::InvalidReference {
            entity: entity_id,
            attribute: attr_index,
        })
    }
}

// Blanket implementation for all EntityResolver types
impl<T: EntityResolver + ?Sized> EntityResolverExt for T {}
