//! Anjay Lite object skeleton generator.
//!
//! Picks the template strategy for an object, builds the template context
//! and renders one C source file.
//!
//! # Examples
//!
//! ```
//! use objgen_codegen::{GenerationConfig, Generator, InstanceCount, Strategy};
//! use objgen_model::{ObjectDefinition, ObjectOptions, parse_document};
//!
//! let xml = r#"
//! <LWM2M><Object><Name>Light Control</Name><ObjectID>3311</ObjectID>
//!   <MultipleInstances>Multiple</MultipleInstances><Mandatory>Optional</Mandatory>
//!   <Resources>
//!     <Item ID="5850"><Name>On/Off</Name><Operations>RW</Operations>
//!       <MultipleInstances>Single</MultipleInstances><Mandatory>Mandatory</Mandatory>
//!       <Type>Boolean</Type></Item>
//!   </Resources>
//! </Object></LWM2M>"#;
//! let object = ObjectDefinition::from_document(&parse_document(xml)?, &ObjectOptions::default())?;
//!
//! let config = GenerationConfig::builder()
//!     .instances(InstanceCount::fixed(3)?)
//!     .build();
//! let source = Generator::new()?.generate(&object, &config)?;
//!
//! assert_eq!(source.strategy, Strategy::MultipleInstances);
//! assert!(source.content.contains("bool_value"));
//! assert_eq!(source.file_name, "light_control.c");
//! # Ok::<(), objgen_core::Error>(())
//! ```

use crate::config::{GenerationConfig, InstanceCount};
use crate::context::ObjectContext;
use crate::template_engine::{
    MULTIPLE_INSTANCES_TEMPLATE, SINGLE_INSTANCE_TEMPLATE, TemplateEngine,
};
use chrono::{Local, NaiveDateTime};
use objgen_core::{Error, Result};
use objgen_model::ObjectDefinition;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Template family used for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One statically allocated instance
    SingleInstance,
    /// An array of instances, fixed or managed at runtime
    MultipleInstances,
}

impl Strategy {
    /// Name of the template rendered for this strategy.
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::SingleInstance => SINGLE_INSTANCE_TEMPLATE,
            Self::MultipleInstances => MULTIPLE_INSTANCES_TEMPLATE,
        }
    }

    /// Chooses the strategy for `object` given the requested instance count.
    ///
    /// Rules, in order:
    /// 1. a single-instance object, or exactly one fixed instance, selects
    ///    [`Strategy::SingleInstance`];
    /// 2. more than one fixed instance, or dynamic instances, select
    ///    [`Strategy::MultipleInstances`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousCardinality`] when no rule applies, which
    /// only happens for a zero-sized count built without validation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use objgen_codegen::{InstanceCount, Strategy};
    /// # use objgen_model::{ObjectDefinition, ObjectOptions, parse_document};
    /// # let xml = "<LWM2M><Object><Name>X</Name><ObjectID>1</ObjectID>\
    /// #   <MultipleInstances>Multiple</MultipleInstances><Mandatory>Optional</Mandatory>\
    /// #   <Resources/></Object></LWM2M>";
    /// # let object = ObjectDefinition::from_document(&parse_document(xml)?, &ObjectOptions::default())?;
    /// let selection = Strategy::select(&object, InstanceCount::Dynamic { max: 4 })?;
    /// assert_eq!(selection.strategy, Strategy::MultipleInstances);
    ///
    /// assert!(Strategy::select(&object, InstanceCount::Fixed(0)).is_err());
    /// # Ok::<(), objgen_core::Error>(())
    /// ```
    pub fn select(object: &ObjectDefinition, requested: InstanceCount) -> Result<Selection> {
        let single = InstanceCount::Fixed(1);

        if !object.is_multiple() {
            let advisories = if requested == single {
                Vec::new()
            } else {
                vec![Advisory::NotMultiInstance {
                    object: object.name().to_string(),
                    requested,
                }]
            };
            return Ok(Selection {
                strategy: Self::SingleInstance,
                instances: single,
                advisories,
            });
        }

        match requested {
            InstanceCount::Fixed(1) => Ok(Selection {
                strategy: Self::SingleInstance,
                instances: single,
                advisories: vec![Advisory::SingleInstanceRequested {
                    object: object.name().to_string(),
                }],
            }),
            InstanceCount::Fixed(n) if n > 1 => Ok(Selection {
                strategy: Self::MultipleInstances,
                instances: requested,
                advisories: Vec::new(),
            }),
            InstanceCount::Dynamic { max } if max > 0 => Ok(Selection {
                strategy: Self::MultipleInstances,
                instances: requested,
                advisories: Vec::new(),
            }),
            _ => Err(Error::AmbiguousCardinality {
                object: object.name().to_string(),
            }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleInstance => "single instance",
            Self::MultipleInstances => "multiple instances",
        })
    }
}

/// Non-fatal remark produced while selecting a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// More than one instance requested for a single-instance object; one
    /// instance is generated instead
    NotMultiInstance {
        /// Object name
        object: String,
        /// What the caller asked for
        requested: InstanceCount,
    },
    /// A multiple-instance object is generated with exactly one instance
    SingleInstanceRequested {
        /// Object name
        object: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMultiInstance { object, requested } => write!(
                f,
                "NOTE: Object {object} is not multiple instance, but instances number ({requested}) \
                 specified. Generating code for single instance object instead."
            ),
            Self::SingleInstanceRequested { object } => write!(
                f,
                "NOTE: Object {object} is multiple instance, but a single instance was requested. \
                 Generating code for single instance object."
            ),
        }
    }
}

/// Outcome of [`Strategy::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Chosen strategy
    pub strategy: Strategy,
    /// Instance count the template is rendered with
    pub instances: InstanceCount,
    /// Remarks to surface to the user
    pub advisories: Vec<Advisory>,
}

/// One rendered C source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// Strategy the source was rendered with
    pub strategy: Strategy,
    /// Suggested file name, `<object_name>.c`
    pub file_name: String,
    /// Complete C source text
    pub content: String,
    /// Remarks produced during selection
    pub advisories: Vec<Advisory>,
}

/// Generator for Anjay Lite object skeletons.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one generator can serve many threads.
#[derive(Debug)]
pub struct Generator<'a> {
    engine: TemplateEngine<'a>,
}

impl<'a> Generator<'a> {
    /// Creates a generator using the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Creates a generator using a prepared template engine.
    #[must_use]
    pub const fn with_engine(engine: TemplateEngine<'a>) -> Self {
        Self { engine }
    }

    /// Generates the skeleton stamped with the current local time.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate_at`].
    pub fn generate(
        &self,
        object: &ObjectDefinition,
        config: &GenerationConfig,
    ) -> Result<GeneratedSource> {
        self.generate_at(object, config, Local::now().naive_local())
    }

    /// Generates the skeleton stamped with `timestamp`.
    ///
    /// Output for equal inputs and timestamps is byte-identical.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the strategy cannot be determined ([`Error::AmbiguousCardinality`])
    /// - the selected template is not registered ([`Error::TemplateMissing`])
    /// - rendering fails ([`Error::TemplateError`])
    pub fn generate_at(
        &self,
        object: &ObjectDefinition,
        config: &GenerationConfig,
        timestamp: NaiveDateTime,
    ) -> Result<GeneratedSource> {
        info!(
            "Generating object {} ({}) with {} resources",
            object.id(),
            object.name(),
            object.resources().len()
        );

        let selection = Strategy::select(object, config.instances)?;
        for advisory in &selection.advisories {
            warn!("{advisory}");
        }
        debug!(
            "Selected {} template for {} instances",
            selection.strategy, selection.instances
        );

        let context = ObjectContext::new(object, config, selection.instances, timestamp);
        let mut content = self
            .engine
            .render(selection.strategy.template_name(), &context)?;
        if !content.ends_with('\n') {
            content.push('\n');
        }

        let file_name = format!("{}.c", object.name_snake());
        info!("Generated {file_name} ({} bytes)", content.len());

        Ok(GeneratedSource {
            strategy: selection.strategy,
            file_name,
            content,
            advisories: selection.advisories,
        })
    }
}
