//! Raw object definition documents.
//!
//! Mirrors the element layout of an OMA LwM2M object definition file. All
//! scalar fields are kept as optional text; interpreting them (IDs, closed
//! literal sets, defaults) is the job of [`crate::resource`] and
//! [`crate::object`].
//!
//! ```xml
//! <LWM2M>
//!   <Object ObjectType="MODefinition">
//!     <Name>Light Control</Name>
//!     <ObjectID>3311</ObjectID>
//!     <MultipleInstances>Multiple</MultipleInstances>
//!     <Mandatory>Optional</Mandatory>
//!     <Resources>
//!       <Item ID="5850">
//!         <Name>On/Off</Name>
//!         <Operations>RW</Operations>
//!         ...
//!       </Item>
//!     </Resources>
//!   </Object>
//! </LWM2M>
//! ```

use objgen_core::{Error, Result};
use serde::Deserialize;

/// Top-level `<LWM2M>` element.
#[derive(Debug, Clone, Deserialize)]
pub struct LwM2mDocument {
    /// The single `<Object>` described by the file
    #[serde(rename = "Object")]
    pub object: RawObject,
}

/// `<Object>` element as found in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObject {
    /// `<Name>`
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// `<Description1>`
    #[serde(rename = "Description1", default)]
    pub description: Option<String>,
    /// `<ObjectID>`
    #[serde(rename = "ObjectID", default)]
    pub id: Option<String>,
    /// `<ObjectURN>`
    #[serde(rename = "ObjectURN", default)]
    pub urn: Option<String>,
    /// `<ObjectVersion>`
    #[serde(rename = "ObjectVersion", default)]
    pub version: Option<String>,
    /// `<MultipleInstances>`
    #[serde(rename = "MultipleInstances", default)]
    pub multiple_instances: Option<String>,
    /// `<Mandatory>`
    #[serde(rename = "Mandatory", default)]
    pub mandatory: Option<String>,
    /// `<Resources>`
    #[serde(rename = "Resources", default)]
    pub resources: Option<RawResources>,
}

/// `<Resources>` container.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResources {
    /// `<Item>` children in document order
    #[serde(rename = "Item", default)]
    pub items: Vec<RawResource>,
}

/// `<Item>` element describing one resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResource {
    /// `ID` attribute
    #[serde(rename = "@ID", default)]
    pub id: Option<String>,
    /// `<Name>`
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// `<Operations>`
    #[serde(rename = "Operations", default)]
    pub operations: Option<String>,
    /// `<MultipleInstances>`
    #[serde(rename = "MultipleInstances", default)]
    pub multiple_instances: Option<String>,
    /// `<Mandatory>`
    #[serde(rename = "Mandatory", default)]
    pub mandatory: Option<String>,
    /// `<Type>`
    #[serde(rename = "Type", default)]
    pub value_type: Option<String>,
    /// `<RangeEnumeration>`
    #[serde(rename = "RangeEnumeration", default)]
    pub range_enumeration: Option<String>,
    /// `<Units>`
    #[serde(rename = "Units", default)]
    pub units: Option<String>,
    /// `<Description>`
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Parses an object definition document.
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] if the text is not well-formed XML or
/// has no `<Object>` element.
///
/// # Examples
///
/// ```
/// use objgen_model::parse_document;
///
/// let doc = parse_document(
///     r#"<LWM2M><Object ObjectType="MODefinition">
///          <Name>Test</Name><ObjectID>1234</ObjectID>
///          <Resources/>
///        </Object></LWM2M>"#,
/// ).unwrap();
/// assert_eq!(doc.object.id.as_deref(), Some("1234"));
/// ```
pub fn parse_document(xml: &str) -> Result<LwM2mDocument> {
    quick_xml::de::from_str(xml).map_err(|e| Error::InvalidDocument {
        context: "document".to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed text of an optional element, empty when the element is absent.
pub(crate) fn text(field: Option<&String>) -> &str {
    field.map_or("", |s| s.trim())
}
