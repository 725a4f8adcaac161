//! Error types for the LwM2M object generator.
//!
//! Every failure of the generation pipeline is reported through [`Error`].
//! Variants are grouped by how the operator has to react: input-shape
//! problems, semantic conflicts, usage errors and template packaging errors.
//!
//! # Examples
//!
//! ```
//! use objgen_core::{Error, Result};
//!
//! fn parse_object_id(raw: &str) -> Result<u16> {
//!     raw.trim().parse().map_err(|_| Error::InvalidDocument {
//!         context: "ObjectID".to_string(),
//!         reason: format!("'{raw}' is not a valid object ID"),
//!     })
//! }
//!
//! let err = parse_object_id("abc").unwrap_err();
//! assert!(err.is_input_error());
//! ```

use thiserror::Error;

/// Main error type for object generation.
///
/// All crates in the workspace use this type, so the CLI can map any failure
/// to a single fatal message and an exit code.
#[derive(Error, Debug)]
pub enum Error {
    /// The object definition document is malformed.
    ///
    /// Raised when a required element is missing, an ID cannot be parsed, or
    /// a field holds a value outside its closed set of literals.
    #[error("Invalid object definition ({context}): {reason}")]
    InvalidDocument {
        /// Where in the document the problem was found
        context: String,
        /// What is wrong with it
        reason: String,
    },

    /// The document is well-formed but describes something unsupported.
    ///
    /// Examples are two resources sharing an ID or an executable resource
    /// declared as multiple-instance.
    #[error("Conflict: {reason}")]
    Conflict {
        /// Description of the conflict
        reason: String,
    },

    /// The same resource was given two different instance counts.
    #[error(
        "Resource ID {rid} specified multiple times with different instance counts ({first} and {second})"
    )]
    ConflictingResourceInstances {
        /// Resource ID
        rid: u16,
        /// Count registered first
        first: u16,
        /// Count that conflicts with it
        second: u16,
    },

    /// An argument passed to a builder or the CLI is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested instance count does not resolve to a template.
    #[error("Cannot determine instance cardinality for object '{object}'")]
    AmbiguousCardinality {
        /// Object name
        object: String,
    },

    /// A template required by the selected strategy is not registered.
    #[error("Template not found: {name}")]
    TemplateMissing {
        /// Template name
        name: String,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the failure
        message: String,
    },

    /// Reading input or writing output failed.
    #[error("I/O error while {context}")]
    Io {
        /// What was being done
        context: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if the input document is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_core::Error;
    ///
    /// let err = Error::InvalidDocument {
    ///     context: "Item 3".to_string(),
    ///     reason: "unknown operations 'X'".to_string(),
    /// };
    /// assert!(err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidDocument { .. })
    }

    /// Returns `true` for semantic conflicts in the document or configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_core::Error;
    ///
    /// let err = Error::ConflictingResourceInstances { rid: 7, first: 3, second: 5 };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::ConflictingResourceInstances { .. }
        )
    }

    /// Returns `true` if this is a usage error.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::AmbiguousCardinality { .. }
        )
    }

    /// Returns `true` if a template could not be found or rendered.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateMissing { .. } | Self::TemplateError { .. }
        )
    }
}

/// Result type alias using the generator [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
