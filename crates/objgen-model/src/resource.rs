//! Resource definitions.
//!
//! A [`ResourceDefinition`] is built from one `<Item>` of the document and
//! validated on the spot: access mode and value type are closed enums, the
//! cardinality flags accept exactly two literals each, and an executable
//! resource can never be multiple-instance.

use crate::document::{RawResource, text};
use objgen_core::{Error, Identifier, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Operations allowed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccessMode {
    /// `R`
    Read,
    /// `W`
    Write,
    /// `RW`, also the default when `<Operations>` is empty
    ReadWrite,
    /// `E`
    Execute,
    /// `BS_RW`
    BootstrapWrite,
}

impl AccessMode {
    /// Literal used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "R",
            Self::Write => "W",
            Self::ReadWrite => "RW",
            Self::Execute => "E",
            Self::BootstrapWrite => "BS_RW",
        }
    }

    /// Base of the `ANJ_DM_RES_*` kind name.
    ///
    /// Anjay Lite has no bootstrap-only kind; Bootstrap Server writes go
    /// through the `RW` handlers.
    #[must_use]
    pub const fn kind_str(self) -> &'static str {
        match self {
            Self::BootstrapWrite => "RW",
            other => other.as_str(),
        }
    }

    /// Resolves the content of `<Operations>`.
    ///
    /// Empty text means the resource is only modifiable by a Bootstrap
    /// Server, which is generated as [`AccessMode::ReadWrite`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] for anything outside the closed set.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_model::AccessMode;
    ///
    /// assert_eq!(AccessMode::from_operations("rw").unwrap(), AccessMode::ReadWrite);
    /// assert_eq!(AccessMode::from_operations("").unwrap(), AccessMode::ReadWrite);
    /// assert!(AccessMode::from_operations("RWX").is_err());
    /// ```
    pub fn from_operations(operations: &str) -> Result<Self> {
        let operations = operations.trim();
        if operations.is_empty() {
            return Ok(Self::ReadWrite);
        }
        operations.parse()
    }

    /// `R`, `RW` and `BS_RW` resources are readable.
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite | Self::BootstrapWrite)
    }

    /// `W`, `RW` and `BS_RW` resources are writable.
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite | Self::BootstrapWrite)
    }

    /// Only `E` resources are executable.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Execute)
    }
}

impl FromStr for AccessMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R" => Ok(Self::Read),
            "W" => Ok(Self::Write),
            "RW" => Ok(Self::ReadWrite),
            "E" => Ok(Self::Execute),
            "BS_RW" => Ok(Self::BootstrapWrite),
            other => Err(Error::InvalidDocument {
                context: "Operations".to_string(),
                reason: format!("unexpected operations: '{other}'"),
            }),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data type of a resource value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `float`
    Float,
    /// `boolean`
    Boolean,
    /// `opaque`
    Opaque,
    /// `time`
    Time,
    /// `objlnk`
    ObjectLink,
    /// `unsigned integer`
    UnsignedInteger,
    /// `corelnk`
    CoreLink,
    /// No value at all, executable resources only
    NotApplicable,
}

impl ValueType {
    /// Resolves the content of `<Type>` for a resource with the given access.
    ///
    /// Matching is case-insensitive. An unknown or empty type is accepted
    /// only for executable resources, which carry no payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] for an unknown type on a
    /// non-executable resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_model::{AccessMode, ValueType};
    ///
    /// assert_eq!(
    ///     ValueType::resolve("Unsigned Integer", AccessMode::Read).unwrap(),
    ///     ValueType::UnsignedInteger
    /// );
    /// assert_eq!(
    ///     ValueType::resolve("", AccessMode::Execute).unwrap(),
    ///     ValueType::NotApplicable
    /// );
    /// assert!(ValueType::resolve("", AccessMode::Read).is_err());
    /// ```
    pub fn resolve(raw: &str, access: AccessMode) -> Result<Self> {
        match Self::from_literal(raw) {
            Some(value_type) => Ok(value_type),
            None if access.is_executable() => Ok(Self::NotApplicable),
            None => Err(Error::InvalidDocument {
                context: "Type".to_string(),
                reason: format!("unknown type: '{}'", raw.trim()),
            }),
        }
    }

    fn from_literal(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            "opaque" => Some(Self::Opaque),
            "time" => Some(Self::Time),
            "objlnk" => Some(Self::ObjectLink),
            "unsigned integer" => Some(Self::UnsignedInteger),
            "corelnk" => Some(Self::CoreLink),
            _ => None,
        }
    }

    /// Literal as written in documents (`N/A` for executables).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Opaque => "opaque",
            Self::Time => "time",
            Self::ObjectLink => "objlnk",
            Self::UnsignedInteger => "unsigned integer",
            Self::CoreLink => "corelnk",
            Self::NotApplicable => "N/A",
        }
    }

    /// `anj_data_type_t` constant used in the resource table.
    #[must_use]
    pub const fn type_enum(self) -> &'static str {
        match self {
            Self::String | Self::CoreLink => "ANJ_DATA_TYPE_STRING",
            Self::Integer => "ANJ_DATA_TYPE_INT",
            Self::Float => "ANJ_DATA_TYPE_DOUBLE",
            Self::Boolean => "ANJ_DATA_TYPE_BOOL",
            Self::Opaque => "ANJ_DATA_TYPE_BYTES",
            Self::Time => "ANJ_DATA_TYPE_TIME",
            Self::ObjectLink => "ANJ_DATA_TYPE_OBJLNK",
            Self::UnsignedInteger => "ANJ_DATA_TYPE_UINT",
            Self::NotApplicable => "ANJ_DATA_TYPE_NULL",
        }
    }

    /// Field of `anj_res_value_t` holding a value of this type.
    ///
    /// `None` for [`ValueType::NotApplicable`].
    #[must_use]
    pub const fn value_field(self) -> Option<&'static str> {
        match self {
            Self::String | Self::Opaque | Self::CoreLink => Some("bytes_or_string.data"),
            Self::Integer => Some("int_value"),
            Self::Float => Some("double_value"),
            Self::Boolean => Some("bool_value"),
            Self::Time => Some("time_value"),
            Self::ObjectLink => Some("objlnk"),
            Self::UnsignedInteger => Some("uint_value"),
            Self::NotApplicable => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a two-literal flag such as `Single`/`Multiple`.
pub(crate) fn parse_flag(raw: &str, field: &str, no: &str, yes: &str) -> Result<bool> {
    match raw {
        v if v == no => Ok(false),
        v if v == yes => Ok(true),
        other => Err(Error::InvalidDocument {
            context: field.to_string(),
            reason: format!("expected '{no}' or '{yes}', got '{other}'"),
        }),
    }
}

/// One validated resource of an object.
///
/// # Examples
///
/// ```
/// use objgen_model::{AccessMode, ResourceDefinition, ValueType};
/// use objgen_model::document::RawResource;
///
/// let raw = RawResource {
///     id: Some("5850".into()),
///     name: Some("On/Off".into()),
///     operations: Some("RW".into()),
///     multiple_instances: Some("Single".into()),
///     mandatory: Some("Mandatory".into()),
///     value_type: Some("Boolean".into()),
///     ..Default::default()
/// };
///
/// let res = ResourceDefinition::from_item(&raw).unwrap();
/// assert_eq!(res.id(), 5850);
/// assert_eq!(res.access(), AccessMode::ReadWrite);
/// assert_eq!(res.value_type(), ValueType::Boolean);
/// assert_eq!(res.kind_enum(), "ANJ_DM_RES_RW");
/// assert_eq!(res.name_upper(), "ON_OFF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    id: u16,
    name: String,
    identifier: Identifier,
    access: AccessMode,
    multiple: bool,
    mandatory: bool,
    value_type: ValueType,
    range_enumeration: String,
    units: String,
    description: String,
}

impl ResourceDefinition {
    /// Builds and validates a resource from its `<Item>` element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] when the ID is missing or not a
    /// 16-bit integer, the operations or type are unknown, or a cardinality
    /// flag is not one of its two literals. Returns [`Error::Conflict`] for
    /// an executable multiple-instance resource.
    pub fn from_item(item: &RawResource) -> Result<Self> {
        let raw_id = text(item.id.as_ref());
        let id: u16 = raw_id.parse().map_err(|_| Error::InvalidDocument {
            context: "Item".to_string(),
            reason: format!("invalid resource ID '{raw_id}'"),
        })?;
        let context = |field: &str| format!("Item {id} {field}");

        let access = AccessMode::from_operations(text(item.operations.as_ref())).map_err(
            |e| match e {
                Error::InvalidDocument { reason, .. } => Error::InvalidDocument {
                    context: context("Operations"),
                    reason,
                },
                other => other,
            },
        )?;

        let multiple = parse_flag(
            text(item.multiple_instances.as_ref()),
            &context("MultipleInstances"),
            "Single",
            "Multiple",
        )?;
        let mandatory = parse_flag(
            text(item.mandatory.as_ref()),
            &context("Mandatory"),
            "Optional",
            "Mandatory",
        )?;

        if multiple && access.is_executable() {
            return Err(Error::Conflict {
                reason: format!(
                    "resource {id}: multiple-instance executable resources are not supported"
                ),
            });
        }

        let value_type = ValueType::resolve(text(item.value_type.as_ref()), access).map_err(
            |e| match e {
                Error::InvalidDocument { reason, .. } => Error::InvalidDocument {
                    context: context("Type"),
                    reason,
                },
                other => other,
            },
        )?;

        let name = text(item.name.as_ref()).to_string();
        Ok(Self {
            id,
            identifier: Identifier::sanitize(&name),
            name,
            access,
            multiple,
            mandatory,
            value_type,
            range_enumeration: text(item.range_enumeration.as_ref()).to_string(),
            units: text(item.units.as_ref()).to_string(),
            description: text(item.description.as_ref()).to_string(),
        })
    }

    /// Resource ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }

    /// Name as written in the document.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sanitized name.
    #[inline]
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Access mode.
    #[inline]
    #[must_use]
    pub const fn access(&self) -> AccessMode {
        self.access
    }

    /// Whether the resource may have several instances.
    #[inline]
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the resource is mandatory.
    #[inline]
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Value type.
    #[inline]
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Range or enumeration hint, empty when absent.
    #[must_use]
    pub fn range_enumeration(&self) -> &str {
        &self.range_enumeration
    }

    /// Units, empty when absent.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Free-text description, empty when absent.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// `true` for `R`, `RW` and `BS_RW` resources.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.access.is_readable()
    }

    /// `true` for `W`, `RW` and `BS_RW` resources.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }

    /// `true` for `E` resources.
    #[must_use]
    pub const fn is_executable(&self) -> bool {
        self.access.is_executable()
    }

    /// `anj_dm_res_kind_t` constant, e.g. `ANJ_DM_RES_RWM`.
    #[must_use]
    pub fn kind_enum(&self) -> String {
        let suffix = if self.multiple { "M" } else { "" };
        format!("ANJ_DM_RES_{}{suffix}", self.access.kind_str())
    }

    /// `anj_data_type_t` constant.
    #[must_use]
    pub const fn type_enum(&self) -> &'static str {
        self.value_type.type_enum()
    }

    /// `anj_res_value_t` field, `None` for executables.
    #[must_use]
    pub const fn value_field(&self) -> Option<&'static str> {
        self.value_type.value_field()
    }

    /// `ON_OFF` style name.
    #[must_use]
    pub fn name_upper(&self) -> String {
        self.identifier.to_upper_snake()
    }

    /// `on_off` style name.
    #[must_use]
    pub fn name_snake(&self) -> String {
        self.identifier.to_lower_snake()
    }

    /// `Mandatory` or `Optional`.
    #[must_use]
    pub const fn mandatory_str(&self) -> &'static str {
        if self.mandatory { "Mandatory" } else { "Optional" }
    }

    /// `Multiple` or `Single`.
    #[must_use]
    pub const fn multiple_str(&self) -> &'static str {
        if self.multiple { "Multiple" } else { "Single" }
    }
}
