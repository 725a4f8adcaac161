//! LwM2M object definition model.
//!
//! Turns an OMA LwM2M object definition document into a validated,
//! immutable [`ObjectDefinition`] holding [`ResourceDefinition`]s in
//! ascending ID order.
//!
//! # Examples
//!
//! ```
//! use objgen_model::{ObjectDefinition, ObjectOptions, parse_document};
//!
//! let xml = r#"
//! <LWM2M><Object ObjectType="MODefinition">
//!   <Name>Light Control</Name><ObjectID>3311</ObjectID>
//!   <MultipleInstances>Multiple</MultipleInstances><Mandatory>Optional</Mandatory>
//!   <Resources>
//!     <Item ID="5850"><Name>On/Off</Name><Operations>RW</Operations>
//!       <MultipleInstances>Single</MultipleInstances><Mandatory>Mandatory</Mandatory>
//!       <Type>Boolean</Type></Item>
//!   </Resources>
//! </Object></LWM2M>"#;
//!
//! let document = parse_document(xml)?;
//! let object = ObjectDefinition::from_document(&document, &ObjectOptions::default())?;
//! assert!(object.is_multiple());
//! assert_eq!(object.resources()[0].value_field(), Some("bool_value"));
//! # Ok::<(), objgen_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod document;
pub mod object;
pub mod resource;

pub use document::{LwM2mDocument, parse_document};
pub use object::{DuplicatePolicy, ObjectDefinition, ObjectOptions, ResourceFilter};
pub use resource::{AccessMode, ResourceDefinition, ValueType};
