//! Object definitions.
//!
//! [`ObjectDefinition`] aggregates the validated resources of one object,
//! sorted by ID, optionally narrowed to an allow-list, and exposes the
//! object-level predicates the templates branch on.

use crate::document::{LwM2mDocument, RawObject, text};
use crate::resource::{ResourceDefinition, parse_flag};
use objgen_core::{Error, Identifier, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Allow-list of resource IDs.
///
/// IDs that do not exist in the object are silently ignored.
///
/// # Examples
///
/// ```
/// use objgen_model::ResourceFilter;
///
/// let filter: ResourceFilter = [1, 5, 900].into_iter().collect();
/// assert!(filter.contains(5));
/// assert!(!filter.contains(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter(BTreeSet<u16>);

impl ResourceFilter {
    /// Whether `rid` is allowed.
    #[must_use]
    pub fn contains(&self, rid: u16) -> bool {
        self.0.contains(&rid)
    }
}

impl FromIterator<u16> for ResourceFilter {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What to do when two resources of one object share an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::Conflict`]
    #[default]
    Reject,
    /// Keep the item that appears last in the document
    KeepLast,
}

/// Options applied while building an [`ObjectDefinition`].
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    /// Resource allow-list, `None` keeps everything
    pub filter: Option<ResourceFilter>,
    /// Duplicate resource ID handling
    pub duplicates: DuplicatePolicy,
}

/// One validated object with its resources in ascending ID order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDefinition {
    id: u16,
    name: String,
    identifier: Identifier,
    version: String,
    description: String,
    urn: String,
    multiple: bool,
    mandatory: bool,
    resources: Vec<ResourceDefinition>,
}

impl ObjectDefinition {
    /// Builds an object from a whole parsed document.
    ///
    /// # Errors
    ///
    /// See [`ObjectDefinition::from_raw`].
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_model::{ObjectDefinition, ObjectOptions, parse_document};
    ///
    /// let doc = parse_document(r#"
    /// <LWM2M><Object ObjectType="MODefinition">
    ///   <Name>Demo</Name><ObjectID>32769</ObjectID>
    ///   <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>
    ///   <Resources>
    ///     <Item ID="3"><Name>C</Name><Operations>R</Operations>
    ///       <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>
    ///       <Type>Integer</Type></Item>
    ///     <Item ID="1"><Name>A</Name><Operations>E</Operations>
    ///       <MultipleInstances>Single</MultipleInstances><Mandatory>Optional</Mandatory>
    ///       <Type></Type></Item>
    ///   </Resources>
    /// </Object></LWM2M>"#).unwrap();
    ///
    /// let obj = ObjectDefinition::from_document(&doc, &ObjectOptions::default()).unwrap();
    /// let ids: Vec<u16> = obj.resources().iter().map(|r| r.id()).collect();
    /// assert_eq!(ids, [1, 3]);
    /// assert!(obj.has_any_executable_resources());
    /// ```
    pub fn from_document(document: &LwM2mDocument, options: &ObjectOptions) -> Result<Self> {
        Self::from_raw(&document.object, options)
    }

    /// Builds an object from its `<Object>` element.
    ///
    /// Every resource is validated; the first failure aborts the object.
    /// Resources are sorted by ID and narrowed to the allow-list, then the
    /// remaining duplicates are resolved per [`ObjectOptions::duplicates`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDocument`] for a missing or malformed object field,
    ///   a missing `<Resources>` element or an invalid resource
    /// - [`Error::Conflict`] for duplicate resource IDs under
    ///   [`DuplicatePolicy::Reject`] or an executable multiple resource
    pub fn from_raw(raw: &RawObject, options: &ObjectOptions) -> Result<Self> {
        let raw_id = text(raw.id.as_ref());
        let id: u16 = raw_id.parse().map_err(|_| Error::InvalidDocument {
            context: "ObjectID".to_string(),
            reason: format!("invalid object ID '{raw_id}'"),
        })?;

        let multiple = parse_flag(
            text(raw.multiple_instances.as_ref()),
            "Object MultipleInstances",
            "Single",
            "Multiple",
        )?;
        let mandatory = parse_flag(
            text(raw.mandatory.as_ref()),
            "Object Mandatory",
            "Optional",
            "Mandatory",
        )?;

        let items = raw
            .resources
            .as_ref()
            .ok_or_else(|| Error::InvalidDocument {
                context: format!("Object {id}"),
                reason: "missing Resources element".to_string(),
            })?
            .items
            .iter()
            .map(ResourceDefinition::from_item)
            .collect::<Result<Vec<_>>>()?;

        let mut resources = sort_by_id(items);
        if let Some(filter) = &options.filter {
            let before = resources.len();
            resources.retain(|res| filter.contains(res.id()));
            debug!(
                "Resource filter kept {} of {before} resources of object {id}",
                resources.len()
            );
        }
        let resources = resolve_duplicates(id, resources, options.duplicates)?;

        let name = text(raw.name.as_ref()).to_string();
        Ok(Self {
            id,
            identifier: Identifier::sanitize(&name),
            name,
            version: text(raw.version.as_ref()).to_string(),
            description: text(raw.description.as_ref()).to_string(),
            urn: text(raw.urn.as_ref()).to_string(),
            multiple,
            mandatory,
            resources,
        })
    }

    /// Object ID.
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

    /// Object version, e.g. `1.1`; empty when absent.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<Description1>` text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Object URN.
    #[must_use]
    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Whether several instances of the object may exist.
    #[inline]
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Whether the object is mandatory.
    #[inline]
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// Resources in ascending ID order.
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    /// Looks up a resource by ID.
    #[must_use]
    pub fn resource(&self, rid: u16) -> Option<&ResourceDefinition> {
        self.resources
            .binary_search_by_key(&rid, ResourceDefinition::id)
            .ok()
            .map(|idx| &self.resources[idx])
    }

    /// `light_control` style name.
    #[must_use]
    pub fn name_snake(&self) -> String {
        self.identifier.to_lower_snake()
    }

    /// `LIGHT_CONTROL` style name.
    #[must_use]
    pub fn name_upper(&self) -> String {
        self.identifier.to_upper_snake()
    }

    /// `LightControl` style name.
    #[must_use]
    pub fn name_pascal(&self) -> String {
        self.identifier.to_pascal()
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

    /// Any resource can be read.
    #[must_use]
    pub fn has_any_readable_resources(&self) -> bool {
        self.resources.iter().any(ResourceDefinition::is_readable)
    }

    /// Any resource can be written.
    #[must_use]
    pub fn has_any_writable_resources(&self) -> bool {
        self.resources.iter().any(ResourceDefinition::is_writable)
    }

    /// Any resource can be executed.
    #[must_use]
    pub fn has_any_executable_resources(&self) -> bool {
        self.resources.iter().any(ResourceDefinition::is_executable)
    }

    /// Any resource is multiple-instance.
    #[must_use]
    pub fn has_any_multiple_resources(&self) -> bool {
        self.resources.iter().any(ResourceDefinition::is_multiple)
    }

    /// Any multiple-instance resource is writable.
    #[must_use]
    pub fn has_any_multiple_writable_resources(&self) -> bool {
        self.resources
            .iter()
            .any(|res| res.is_multiple() && res.is_writable())
    }

    /// An `inst_reset` handler is needed for multi-instance objects and for
    /// objects with writable resources.
    #[must_use]
    pub fn needs_instance_reset_handler(&self) -> bool {
        self.multiple || self.has_any_writable_resources()
    }
}

fn sort_by_id(mut resources: Vec<ResourceDefinition>) -> Vec<ResourceDefinition> {
    // stable: equal IDs keep document order, KeepLast relies on it
    resources.sort_by_key(ResourceDefinition::id);
    resources
}

fn resolve_duplicates(
    oid: u16,
    sorted: Vec<ResourceDefinition>,
    policy: DuplicatePolicy,
) -> Result<Vec<ResourceDefinition>> {
    let mut out: Vec<ResourceDefinition> = Vec::with_capacity(sorted.len());
    for res in sorted {
        let duplicate = out.last().is_some_and(|prev| prev.id() == res.id());
        if !duplicate {
            out.push(res);
            continue;
        }
        match policy {
            DuplicatePolicy::Reject => {
                return Err(Error::Conflict {
                    reason: format!("object {oid} defines resource {} more than once", res.id()),
                });
            }
            DuplicatePolicy::KeepLast => {
                warn!(
                    "Object {oid}: duplicate resource {}, keeping the last definition",
                    res.id()
                );
                if let Some(prev) = out.last_mut() {
                    *prev = res;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RawResource, RawResources};

    fn raw_item(id: u16, name: &str, operations: &str, multiple: bool) -> RawResource {
        RawResource {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            operations: Some(operations.to_string()),
            multiple_instances: Some(if multiple { "Multiple" } else { "Single" }.to_string()),
            mandatory: Some("Optional".to_string()),
            value_type: Some(if operations == "E" { "" } else { "Integer" }.to_string()),
            ..Default::default()
        }
    }

    fn raw_object(multiple: bool, items: Vec<RawResource>) -> RawObject {
        RawObject {
            name: Some("Power Measurement".to_string()),
            id: Some("3305".to_string()),
            version: Some("1.0".to_string()),
            multiple_instances: Some(if multiple { "Multiple" } else { "Single" }.to_string()),
            mandatory: Some("Optional".to_string()),
            resources: Some(RawResources { items }),
            ..Default::default()
        }
    }

    fn ids(obj: &ObjectDefinition) -> Vec<u16> {
        obj.resources().iter().map(ResourceDefinition::id).collect()
    }

    #[test]
    fn test_resources_sorted_by_id() {
        let raw = raw_object(
            false,
            vec![
                raw_item(5, "E", "R", false),
                raw_item(1, "A", "R", false),
                raw_item(3, "C", "R", false),
            ],
        );
        let obj = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap();
        assert_eq!(ids(&obj), [1, 3, 5]);
    }

    #[test]
    fn test_filter_retains_listed_ids() {
        let raw = raw_object(
            false,
            vec![
                raw_item(1, "A", "R", false),
                raw_item(2, "B", "W", false),
                raw_item(3, "C", "E", false),
            ],
        );
        let options = ObjectOptions {
            filter: Some([3, 1, 42].into_iter().collect()),
            ..Default::default()
        };
        let obj = ObjectDefinition::from_raw(&raw, &options).unwrap();
        assert_eq!(ids(&obj), [1, 3]);
        assert!(!obj.has_any_writable_resources());
    }

    #[test]
    fn test_filter_without_matches_yields_empty_object() {
        let raw = raw_object(true, vec![raw_item(1, "A", "R", false)]);
        let options = ObjectOptions {
            filter: Some([100, 200].into_iter().collect()),
            ..Default::default()
        };
        let obj = ObjectDefinition::from_raw(&raw, &options).unwrap();
        assert!(obj.resources().is_empty());
        assert!(!obj.has_any_readable_resources());
        // multi-instance objects always need the reset handler
        assert!(obj.needs_instance_reset_handler());
    }

    #[test]
    fn test_one_invalid_resource_aborts_object() {
        let mut broken = raw_item(2, "B", "R", false);
        broken.value_type = Some("Decimal".to_string());
        let raw = raw_object(false, vec![raw_item(1, "A", "R", false), broken]);
        let err = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_duplicate_ids_rejected_by_default() {
        let raw = raw_object(
            false,
            vec![raw_item(4, "First", "R", false), raw_item(4, "Second", "W", false)],
        );
        let err = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("resource 4"));
    }

    #[test]
    fn test_duplicate_ids_outside_filter_ignored() {
        let raw = raw_object(
            false,
            vec![
                raw_item(4, "First", "R", false),
                raw_item(2, "Other", "R", false),
                raw_item(4, "Second", "W", false),
            ],
        );
        let options = ObjectOptions {
            filter: Some([2].into_iter().collect()),
            ..Default::default()
        };
        let obj = ObjectDefinition::from_raw(&raw, &options).unwrap();
        assert_eq!(ids(&obj), [2]);

        let options = ObjectOptions {
            filter: Some([2, 4].into_iter().collect()),
            ..Default::default()
        };
        let err = ObjectDefinition::from_raw(&raw, &options).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let raw = raw_object(
            false,
            vec![
                raw_item(4, "First", "R", false),
                raw_item(2, "Other", "R", false),
                raw_item(4, "Second", "W", false),
            ],
        );
        let options = ObjectOptions {
            duplicates: DuplicatePolicy::KeepLast,
            ..Default::default()
        };
        let obj = ObjectDefinition::from_raw(&raw, &options).unwrap();
        assert_eq!(ids(&obj), [2, 4]);
        assert_eq!(obj.resource(4).unwrap().name(), "Second");
    }

    #[test]
    fn test_derived_predicates() {
        let raw = raw_object(
            false,
            vec![
                raw_item(1, "Values", "RW", true),
                raw_item(2, "Reset", "E", false),
                raw_item(3, "Readings", "R", true),
            ],
        );
        let obj = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap();
        assert!(obj.has_any_readable_resources());
        assert!(obj.has_any_writable_resources());
        assert!(obj.has_any_executable_resources());
        assert!(obj.has_any_multiple_resources());
        assert!(obj.has_any_multiple_writable_resources());
        assert!(obj.needs_instance_reset_handler());
    }

    #[test]
    fn test_read_only_single_object_needs_no_reset() {
        let raw = raw_object(false, vec![raw_item(1, "Value", "R", true)]);
        let obj = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap();
        assert!(!obj.has_any_multiple_writable_resources());
        assert!(!obj.needs_instance_reset_handler());
    }

    #[test]
    fn test_object_names() {
        let raw = raw_object(false, vec![]);
        let obj = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap();
        assert_eq!(obj.id(), 3305);
        assert_eq!(obj.name_snake(), "power_measurement");
        assert_eq!(obj.name_upper(), "POWER_MEASUREMENT");
        assert_eq!(obj.name_pascal(), "PowerMeasurement");
        assert_eq!(obj.multiple_str(), "Single");
        assert_eq!(obj.mandatory_str(), "Optional");
        assert_eq!(obj.description(), "");
        assert_eq!(obj.urn(), "");
    }

    #[test]
    fn test_missing_resources_element() {
        let mut raw = raw_object(false, vec![]);
        raw.resources = None;
        let err = ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_object_fields() {
        let mut raw = raw_object(false, vec![]);
        raw.id = Some("x".to_string());
        assert!(ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).is_err());

        let mut raw = raw_object(false, vec![]);
        raw.multiple_instances = None;
        assert!(ObjectDefinition::from_raw(&raw, &ObjectOptions::default()).is_err());
    }
}
