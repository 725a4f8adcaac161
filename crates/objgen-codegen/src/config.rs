//! Generation configuration.
//!
//! [`GenerationConfig`] carries everything the caller decides about one
//! generation run: how many object instances to prepare, whether they are
//! managed dynamically, per-resource instance counts and whether
//! transaction handlers are emitted. It is an explicit value threaded into
//! [`crate::Generator`]; nothing is read from process-wide state.
//!
//! # Examples
//!
//! ```
//! use objgen_codegen::{GenerationConfig, InstanceCount};
//!
//! let config = GenerationConfig::builder()
//!     .instances(InstanceCount::fixed(3)?)
//!     .transactional(true)
//!     .resource_instances(4, 5)?
//!     .build();
//!
//! assert_eq!(config.instances, InstanceCount::Fixed(3));
//! assert!(config.transactional);
//! assert_eq!(config.resource_instances.get(4), Some(5));
//! # Ok::<(), objgen_core::Error>(())
//! ```

use objgen_core::{Error, Result};
use objgen_model::ObjectDefinition;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Largest instance count accepted for objects and resources.
///
/// 65535 is `ANJ_ID_INVALID`, so IDs and counts stop one below it.
pub const MAX_INSTANCES: u16 = 65534;

/// Resource instances prepared for a multiple-instance resource that has no
/// explicit count.
pub const DEFAULT_RESOURCE_INSTANCES: u16 = 2;

fn check_range(count: u32, what: &str) -> Result<u16> {
    u16::try_from(count)
        .ok()
        .filter(|c| (1..=MAX_INSTANCES).contains(c))
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{what} must be between 1 and {MAX_INSTANCES}, got {count}"
            ))
        })
}

/// Number of object instances to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstanceCount {
    /// Exactly this many statically allocated instances
    Fixed(u16),
    /// Instances are created and deleted at runtime, up to `max`
    Dynamic {
        /// Capacity of the instance array
        max: u16,
    },
}

impl InstanceCount {
    /// A validated fixed count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] outside `1..=65534`.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_codegen::InstanceCount;
    ///
    /// assert!(InstanceCount::fixed(1).is_ok());
    /// assert!(InstanceCount::fixed(0).is_err());
    /// assert!(InstanceCount::fixed(70_000).is_err());
    /// ```
    pub fn fixed(count: u32) -> Result<Self> {
        check_range(count, "instances number").map(Self::Fixed)
    }

    /// A validated dynamic count with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] outside `1..=65534`.
    pub fn dynamic(max: u32) -> Result<Self> {
        check_range(max, "maximum instances number").map(|max| Self::Dynamic { max })
    }

    /// Number of instance slots to allocate.
    #[must_use]
    pub const fn slots(self) -> u16 {
        match self {
            Self::Fixed(count) => count,
            Self::Dynamic { max } => max,
        }
    }

    /// `true` for [`InstanceCount::Dynamic`].
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

impl Default for InstanceCount {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl fmt::Display for InstanceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(count) => write!(f, "{count}"),
            Self::Dynamic { max } => write!(f, "dynamic (max {max})"),
        }
    }
}

/// Explicit per-resource instance counts.
///
/// # Examples
///
/// ```
/// use objgen_codegen::ResourceInstanceCounts;
///
/// let mut counts = ResourceInstanceCounts::default();
/// counts.insert(7, 3)?;
/// counts.insert(7, 3)?; // same value again is fine
/// assert!(counts.insert(7, 5).unwrap_err().is_conflict());
/// # Ok::<(), objgen_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInstanceCounts(BTreeMap<u16, u16>);

impl ResourceInstanceCounts {
    /// Builds the mapping from `(rid, count)` pairs.
    ///
    /// # Errors
    ///
    /// Fails like [`ResourceInstanceCounts::insert`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, u32)>,
    {
        let mut counts = Self::default();
        for (rid, count) in pairs {
            counts.insert(rid, count)?;
        }
        Ok(counts)
    }

    /// Registers a count for `rid`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `count` is outside `1..=65534`
    /// - [`Error::ConflictingResourceInstances`] if `rid` already has a
    ///   different count
    pub fn insert(&mut self, rid: u16, count: u32) -> Result<()> {
        let count = check_range(count, &format!("instance count of resource {rid}"))?;
        match self.0.get(&rid) {
            Some(&first) if first != count => Err(Error::ConflictingResourceInstances {
                rid,
                first,
                second: count,
            }),
            _ => {
                self.0.insert(rid, count);
                Ok(())
            }
        }
    }

    /// Explicit count for `rid`, if any.
    #[must_use]
    pub fn get(&self, rid: u16) -> Option<u16> {
        self.0.get(&rid).copied()
    }

    /// Counts for every multiple-instance resource of `object`.
    ///
    /// Explicit values win; every other multiple-instance resource gets
    /// [`DEFAULT_RESOURCE_INSTANCES`]. Single-instance resources are absent.
    #[must_use]
    pub fn resolve(&self, object: &ObjectDefinition) -> BTreeMap<u16, u16> {
        for rid in self.0.keys() {
            if !object.resource(*rid).is_some_and(|r| r.is_multiple()) {
                debug!("Ignoring instance count for resource {rid}: not a multiple-instance resource");
            }
        }
        object
            .resources()
            .iter()
            .filter(|res| res.is_multiple())
            .map(|res| {
                let count = self.get(res.id()).unwrap_or(DEFAULT_RESOURCE_INSTANCES);
                (res.id(), count)
            })
            .collect()
    }
}

/// Options of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Object instances to prepare
    pub instances: InstanceCount,
    /// Emit `transaction_begin`/`validate`/`end` stubs
    pub transactional: bool,
    /// Explicit resource instance counts
    pub resource_instances: ResourceInstanceCounts,
    /// Resource instance counts are maxima and the resource instance
    /// create/delete handlers are emitted
    pub dynamic_resource_instances: bool,
}

impl GenerationConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug, Default)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    /// Sets the object instance count.
    #[must_use]
    pub const fn instances(mut self, instances: InstanceCount) -> Self {
        self.config.instances = instances;
        self
    }

    /// Enables or disables transaction handler stubs.
    #[must_use]
    pub const fn transactional(mut self, enabled: bool) -> Self {
        self.config.transactional = enabled;
        self
    }

    /// Enables or disables dynamic resource instances.
    #[must_use]
    pub const fn dynamic_resource_instances(mut self, enabled: bool) -> Self {
        self.config.dynamic_resource_instances = enabled;
        self
    }

    /// Adds an explicit resource instance count.
    ///
    /// # Errors
    ///
    /// Fails like [`ResourceInstanceCounts::insert`].
    pub fn resource_instances(mut self, rid: u16, count: u32) -> Result<Self> {
        self.config.resource_instances.insert(rid, count)?;
        Ok(self)
    }

    /// Replaces all explicit resource instance counts.
    #[must_use]
    pub fn resource_instance_counts(mut self, counts: ResourceInstanceCounts) -> Self {
        self.config.resource_instances = counts;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GenerationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_count_bounds() {
        assert_eq!(InstanceCount::fixed(1).unwrap(), InstanceCount::Fixed(1));
        assert_eq!(
            InstanceCount::fixed(65534).unwrap(),
            InstanceCount::Fixed(65534)
        );
        assert!(InstanceCount::fixed(65535).unwrap_err().is_usage_error());
        assert!(InstanceCount::fixed(0).is_err());
        assert!(InstanceCount::dynamic(0).is_err());
        assert_eq!(
            InstanceCount::dynamic(8).unwrap(),
            InstanceCount::Dynamic { max: 8 }
        );
    }

    #[test]
    fn test_instance_count_slots() {
        assert_eq!(InstanceCount::Fixed(3).slots(), 3);
        assert_eq!(InstanceCount::Dynamic { max: 10 }.slots(), 10);
        assert!(InstanceCount::Dynamic { max: 1 }.is_dynamic());
        assert_eq!(InstanceCount::default(), InstanceCount::Fixed(1));
    }

    #[test]
    fn test_instance_count_display() {
        assert_eq!(InstanceCount::Fixed(4).to_string(), "4");
        assert_eq!(
            InstanceCount::Dynamic { max: 4 }.to_string(),
            "dynamic (max 4)"
        );
    }

    #[test]
    fn test_conflicting_resource_counts() {
        let err = ResourceInstanceCounts::from_pairs([(7, 3), (7, 5)]).unwrap_err();
        match err {
            Error::ConflictingResourceInstances { rid, first, second } => {
                assert_eq!((rid, first, second), (7, 3, 5));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_identical_count_accepted() {
        let counts = ResourceInstanceCounts::from_pairs([(7, 3), (7, 3), (8, 1)]).unwrap();
        assert_eq!(counts.get(7), Some(3));
        assert_eq!(counts.get(8), Some(1));
        assert_eq!(counts.get(9), None);
    }

    #[test]
    fn test_resource_count_out_of_range() {
        assert!(ResourceInstanceCounts::from_pairs([(1, 0)]).is_err());
        assert!(ResourceInstanceCounts::from_pairs([(1, 65535)]).is_err());
    }

    #[test]
    fn test_builder() {
        let config = GenerationConfig::builder()
            .instances(InstanceCount::Dynamic { max: 5 })
            .dynamic_resource_instances(true)
            .resource_instances(1, 4)
            .unwrap()
            .build();
        assert!(config.instances.is_dynamic());
        assert!(config.dynamic_resource_instances);
        assert!(!config.transactional);
        assert_eq!(config.resource_instances.get(1), Some(4));
    }

    #[test]
    fn test_builder_propagates_conflict() {
        let result = GenerationConfig::builder()
            .resource_instances(7, 3)
            .and_then(|b| b.resource_instances(7, 5));
        assert!(result.unwrap_err().is_conflict());
    }
}
