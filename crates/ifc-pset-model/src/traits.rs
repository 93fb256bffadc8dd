// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model trait: a loaded IFC document as seen by property extraction

use crate::{DecodedEntity, EntityId, EntityResolver, IfcType};
use std::sync::Arc;

/// Attribute index of `RelatedObjects` on `IfcRelDefines*`
pub const RELATED_OBJECTS: usize = 4;

/// Attribute index of the relating definition on `IfcRelDefines*`
///
/// `RelatingPropertyDefinition` for `IfcRelDefinesByProperties`,
/// `RelatingType` for `IfcRelDefinesByType`.
pub const RELATING_DEFINITION: usize = 5;

/// Read-only access to a loaded IFC model
///
/// The model is thread-safe (`Send + Sync`) so the same loaded document can
/// be queried from several call sites at once.
pub trait IfcModel: Send + Sync {
    /// Get entity resolver for entity lookups and reference resolution
    fn resolver(&self) -> &dyn EntityResolver;

    /// Incoming definition relationships of an entity (`IsDefinedBy`)
    ///
    /// Returns the `IfcRelDefinesByProperties` and `IfcRelDefinesByType`
    /// entities whose `RelatedObjects` contain `id`, in file order.
    ///
    /// The default implementation scans every definition relationship.
    /// Backends that keep an inverse index should override it.
    fn is_defined_by(&self, id: EntityId) -> Vec<Arc<DecodedEntity>> {
        let resolver = self.resolver();
        let mut rels: Vec<Arc<DecodedEntity>> = [
            IfcType::IfcRelDefinesByProperties,
            IfcType::IfcRelDefinesByType,
        ]
        .iter()
        .flat_map(|ty| resolver.entities_by_type(ty))
        .filter(|rel| {
            rel.get_refs(RELATED_OBJECTS)
                .is_some_and(|objects| objects.contains(&id))
        })
        .collect();

        rels.sort_by_key(|rel| rel.id);
        rels
    }

    /// Get entity's GlobalId (GUID)
    ///
    /// GlobalId is attribute 0 of every `IfcRoot` subtype.
    fn global_id(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver().get(id)?;
        entity.get_string(0).map(|s| s.to_string())
    }

    /// Get entity's Name attribute
    ///
    /// Name is attribute 2 of every `IfcRoot` subtype.
    fn name(&self, id: EntityId) -> Option<String> {
        let entity = self.resolver().get(id)?;
        entity.get_string(2).map(|s| s.to_string())
    }
}
