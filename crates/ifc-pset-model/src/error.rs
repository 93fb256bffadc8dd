// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for reading entities out of a loaded model

use crate::EntityId;
use thiserror::Error;

/// Result type alias for model access
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while reading entities and their attributes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// Attribute holds a reference that does not resolve
    #[error("Invalid entity reference at {entity}: attribute {attribute}")]
    InvalidReference { entity: EntityId, attribute: usize },

    /// Attribute holds a value of the wrong shape
    #[error(
        "Type mismatch at entity {entity} attribute {attribute}: expected {expected}, got {actual}"
    )]
    TypeMismatch {
        entity: EntityId,
        attribute: usize,
        expected: String,
        actual: String,
    },

    /// Missing required attribute
    #[error("Missing required attribute {attribute} on entity {entity}")]
    MissingAttribute { entity: EntityId, attribute: usize },
}

impl ModelError {
    /// Create a type mismatch error
    pub fn type_mismatch(
        entity: EntityId,
        attribute: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ModelError::TypeMismatch {
            entity,
            attribute,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
