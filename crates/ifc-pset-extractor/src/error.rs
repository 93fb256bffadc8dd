// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for property extraction

use crate::definitions::ElementTypeDef;
use ifc_pset_model::{EntityId, ModelError};
use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting element data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// Reading the model failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A type definition's property sets could not be read
    #[error("Type definition {entity} (GlobalId {global_id}) could not be read: {source}")]
    TypeDefinition {
        entity: EntityId,
        global_id: String,
        #[source]
        source: ModelError,
    },
}

impl ExtractError {
    /// Wrap a model error raised while reading a type definition
    pub fn type_definition(ty: &ElementTypeDef, source: ModelError) -> Self {
        ExtractError::TypeDefinition {
            entity: ty.id(),
            global_id: ty.global_id().unwrap_or_default().to_string(),
            source,
        }
    }
}
