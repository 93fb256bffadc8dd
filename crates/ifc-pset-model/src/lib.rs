// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Pset Model - Document-model boundary for IFC property extraction
//!
//! This crate describes what a loaded IFC document has to offer to the
//! property extractor: decoded entities with positional attributes, a type
//! tag per entity, reference resolution, and the inverse `IsDefinedBy`
//! relationship lookup. Parsing STEP files and building indices is left to
//! whichever backend implements these traits.
//!
//! # Architecture
//!
//! - [`EntityResolver`] - Entity lookup and reference resolution
//! - [`IfcModel`] - A loaded model: resolver plus relationship navigation
//!
//! # Example
//!
//! ```ignore
//! use ifc_pset_model::{IfcModel, EntityId};
//!
//! let model: &dyn IfcModel = load_somehow();
//! for rel in model.is_defined_by(EntityId(42)) {
//!     println!("{} {}", rel.id, rel.ifc_type);
//! }
//! ```

pub mod error;
pub mod resolver;
pub mod traits;
pub mod types;

pub use error::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
