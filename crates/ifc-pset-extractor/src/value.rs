// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flattened output values and keys

use ifc_pset_model::AttributeValue;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Serialize, Serializer};
use std::fmt;

/// Insertion-ordered map; re-inserting a key replaces the value in place
pub type FlatMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// `(set name, record name) -> value`, from property sets and quantity sets
pub type PropertyMap = FlatMap<PropertyKey, PropertyValue>;

/// `"TypeDefinition_<type name>" -> property set name`
pub type TypeMap = FlatMap<String, String>;

/// Merged view over all three categories
pub type AttributeMap = FlatMap<AttributeKey, PropertyValue>;

/// Scalar value unwrapped from an IFC measure or value select
///
/// Serializes untagged, so a JSON consumer sees plain strings, numbers
/// and booleans.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// IfcLabel, IfcText, IfcIdentifier, ...
    Text(String),
    /// IfcInteger, IfcCountMeasure written without a decimal point
    Integer(i64),
    /// IfcReal and every numeric measure
    Real(f64),
    /// IfcBoolean, or an IfcLogical that is `.T.`/`.F.`
    Boolean(bool),
    /// Enumeration literal that is not a boolean (e.g. logical `.U.`)
    Enum(String),
    /// Aggregate measures such as IfcComplexNumber
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Unwrap a decoded attribute into a scalar
    ///
    /// Returns `None` for `$`, `*` and entity references, which carry no
    /// scalar of their own.
    pub fn from_attribute(attr: &AttributeValue) -> Option<Self> {
        match attr {
            AttributeValue::Null | AttributeValue::Derived | AttributeValue::EntityRef(_) => None,
            AttributeValue::Bool(b) => Some(PropertyValue::Boolean(*b)),
            AttributeValue::Integer(i) => Some(PropertyValue::Integer(*i)),
            AttributeValue::Float(f) => Some(PropertyValue::Real(*f)),
            AttributeValue::String(s) => Some(PropertyValue::Text(s.clone())),
            AttributeValue::Enum(e) => Some(match e.to_ascii_uppercase().as_str() {
                "T" | "TRUE" => PropertyValue::Boolean(true),
                "F" | "FALSE" => PropertyValue::Boolean(false),
                _ => PropertyValue::Enum(e.clone()),
            }),
            AttributeValue::List(items) => Some(PropertyValue::List(
                items.iter().filter_map(Self::from_attribute).collect(),
            )),
            AttributeValue::TypedValue(_, args) => match args.as_slice() {
                [] => None,
                [single] => Self::from_attribute(single),
                many => Some(PropertyValue::List(
                    many.iter().filter_map(Self::from_attribute).collect(),
                )),
            },
        }
    }

    /// Numeric view of the value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Real(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) | PropertyValue::Enum(s) => f.write_str(s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Real(r) => write!(f, "{}", r),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

/// Composite key of a flattened property or quantity
///
/// A set without a name keeps `set: None`, distinct from a set whose name is
/// the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey {
    /// Name of the property set or quantity set
    pub set: Option<String>,
    /// Name of the property or quantity record
    pub name: String,
}

impl PropertyKey {
    /// Key of a record in a named set
    pub fn new(set: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            set: Some(set.into()),
            name: name.into(),
        }
    }

    /// Key of a record in a set that may have no name
    pub fn in_set(set: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            set: set.map(str::to_string),
            name: name.into(),
        }
    }
}

impl<S: Into<String>, N: Into<String>> From<(S, N)> for PropertyKey {
    fn from((set, name): (S, N)) -> Self {
        Self::new(set, name)
    }
}

// An unnamed set renders as the bare record name.
impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.set {
            Some(set) => write!(f, "{}.{}", set, self.name),
            None => f.write_str(&self.name),
        }
    }
}

// Map keys must be strings in JSON.
impl Serialize for PropertyKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Key of the merged instance map
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKey {
    /// Property or quantity, keyed by set and record name
    Property(PropertyKey),
    /// Synthesized type-definition key
    Type(String),
}

impl From<PropertyKey> for AttributeKey {
    fn from(key: PropertyKey) -> Self {
        AttributeKey::Property(key)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKey::Property(key) => write!(f, "{}", key),
            AttributeKey::Type(key) => f.write_str(key),
        }
    }
}

impl Serialize for AttributeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
