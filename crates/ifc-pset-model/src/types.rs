// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC data representation
//!
//! Entity ids, type tags and decoded attribute values shared between a model
//! backend and the property extractor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw STEP instance number (e.g., #123 becomes EntityId(123))
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

macro_rules! ifc_types {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// IFC entity type tag
        ///
        /// Covers the entity kinds property extraction cares about. Every other
        /// type is captured with its original string representation.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum IfcType {
            $($(#[$meta])* $variant,)*
            /// Unknown type - stores the original type name string
            Unknown(String),
        }

        impl IfcType {
            /// Parse a STEP type name (case-insensitive) into an IfcType
            pub fn parse(s: &str) -> Self {
                match s.to_ascii_uppercase().as_str() {
                    $($name => IfcType::$variant,)*
                    _ => IfcType::Unknown(s.to_string()),
                }
            }

            /// Get the STEP type name
            pub fn name(&self) -> &str {
                match self {
                    $(IfcType::$variant => $name,)*
                    IfcType::Unknown(s) => s,
                }
            }
        }
    };
}

ifc_types! {
    // Spatial structure
    IfcProject => "IFCPROJECT",
    IfcSite => "IFCSITE",
    IfcBuilding => "IFCBUILDING",
    IfcBuildingStorey => "IFCBUILDINGSTOREY",
    IfcSpace => "IFCSPACE",

    // Building elements
    IfcWall => "IFCWALL",
    IfcWallStandardCase => "IFCWALLSTANDARDCASE",
    IfcCurtainWall => "IFCCURTAINWALL",
    IfcSlab => "IFCSLAB",
    IfcRoof => "IFCROOF",
    IfcBeam => "IFCBEAM",
    IfcColumn => "IFCCOLUMN",
    IfcDoor => "IFCDOOR",
    IfcWindow => "IFCWINDOW",
    IfcStair => "IFCSTAIR",
    IfcRailing => "IFCRAILING",
    IfcCovering => "IFCCOVERING",
    IfcPlate => "IFCPLATE",
    IfcMember => "IFCMEMBER",
    IfcFooting => "IFCFOOTING",
    IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",
    IfcFurnishingElement => "IFCFURNISHINGELEMENT",

    // Relationships
    IfcRelDefinesByProperties => "IFCRELDEFINESBYPROPERTIES",
    IfcRelDefinesByType => "IFCRELDEFINESBYTYPE",

    // Property containers and records
    IfcPropertySet => "IFCPROPERTYSET",
    IfcPropertySingleValue => "IFCPROPERTYSINGLEVALUE",
    IfcPropertyEnumeratedValue => "IFCPROPERTYENUMERATEDVALUE",
    IfcPropertyBoundedValue => "IFCPROPERTYBOUNDEDVALUE",
    IfcPropertyListValue => "IFCPROPERTYLISTVALUE",
    IfcPropertyTableValue => "IFCPROPERTYTABLEVALUE",
    IfcPropertyReferenceValue => "IFCPROPERTYREFERENCEVALUE",
    IfcComplexProperty => "IFCCOMPLEXPROPERTY",

    // Quantity containers and records
    IfcElementQuantity => "IFCELEMENTQUANTITY",
    IfcQuantityLength => "IFCQUANTITYLENGTH",
    IfcQuantityArea => "IFCQUANTITYAREA",
    IfcQuantityVolume => "IFCQUANTITYVOLUME",
    IfcQuantityCount => "IFCQUANTITYCOUNT",
    IfcQuantityWeight => "IFCQUANTITYWEIGHT",
    IfcQuantityTime => "IFCQUANTITYTIME",
    IfcPhysicalComplexQuantity => "IFCPHYSICALCOMPLEXQUANTITY",

    // Type objects
    IfcTypeObject => "IFCTYPEOBJECT",
    IfcWallType => "IFCWALLTYPE",
    IfcSlabType => "IFCSLABTYPE",
    IfcBeamType => "IFCBEAMTYPE",
    IfcColumnType => "IFCCOLUMNTYPE",
    IfcDoorType => "IFCDOORTYPE",
    IfcWindowType => "IFCWINDOWTYPE",
    /// IFC2x3 door type object
    IfcDoorStyle => "IFCDOORSTYLE",
    /// IFC2x3 window type object
    IfcWindowStyle => "IFCWINDOWSTYLE",
    IfcCoveringType => "IFCCOVERINGTYPE",
    IfcRailingType => "IFCRAILINGTYPE",
    IfcStairType => "IFCSTAIRTYPE",
    IfcRoofType => "IFCROOFTYPE",
    IfcMemberType => "IFCMEMBERTYPE",
    IfcPlateType => "IFCPLATETYPE",
    IfcFootingType => "IFCFOOTINGTYPE",
    IfcBuildingElementProxyType => "IFCBUILDINGELEMENTPROXYTYPE",
    IfcFurnitureType => "IFCFURNITURETYPE",
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Check if this type is a type object (`IfcTypeObject` or a subtype)
    ///
    /// Type objects outside the known list are recognised by the schema's
    /// naming convention (`...TYPE`, or `...STYLE` in IFC2x3).
    pub fn is_type_object(&self) -> bool {
        match self {
            IfcType::IfcTypeObject
            | IfcType::IfcWallType
            | IfcType::IfcSlabType
            | IfcType::IfcBeamType
            | IfcType::IfcColumnType
            | IfcType::IfcDoorType
            | IfcType::IfcWindowType
            | IfcType::IfcDoorStyle
            | IfcType::IfcWindowStyle
            | IfcType::IfcCoveringType
            | IfcType::IfcRailingType
            | IfcType::IfcStairType
            | IfcType::IfcRoofType
            | IfcType::IfcMemberType
            | IfcType::IfcPlateType
            | IfcType::IfcFootingType
            | IfcType::IfcBuildingElementProxyType
            | IfcType::IfcFurnitureType => true,
            IfcType::Unknown(name) => {
                let upper = name.to_ascii_uppercase();
                upper.starts_with("IFC") && (upper.ends_with("TYPE") || upper.ends_with("STYLE"))
            }
            _ => false,
        }
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string, looking through a typed-value wrapper
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Short name of the value's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Null => "null",
            AttributeValue::Derived => "derived",
            AttributeValue::EntityRef(_) => "entity reference",
            AttributeValue::Bool(_) => "boolean",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::Enum(_) => "enumeration",
            AttributeValue::List(_) => "list",
            AttributeValue::TypedValue(_, _) => "typed value",
        }
    }
}

/// Decoded IFC entity
///
/// Represents a fully decoded IFC entity with its ID, type, and attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in schema order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Create a decoded entity
    pub fn new(id: EntityId, ifc_type: IfcType, attributes: Vec<AttributeValue>) -> Self {
        Self {
            id,
            ifc_type,
            attributes,
        }
    }

    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }

    /// Check whether the entity is one of the given types
    pub fn is_a(&self, ifc_type: &IfcType) -> bool {
        &self.ifc_type == ifc_type
    }
}
