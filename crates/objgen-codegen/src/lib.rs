//! Code generation for LwM2M objects.
//!
//! Renders Anjay Lite C skeletons from an
//! [`ObjectDefinition`](objgen_model::ObjectDefinition) using Handlebars
//! templates. [`Strategy::select`] decides between the single-instance and
//! multiple-instance templates, [`Generator`] renders the chosen one.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod context;
pub mod generator;
pub mod template_engine;

pub use config::{
    DEFAULT_RESOURCE_INSTANCES, GenerationConfig, GenerationConfigBuilder, InstanceCount,
    MAX_INSTANCES, ResourceInstanceCounts,
};
pub use context::ObjectContext;
pub use generator::{Advisory, GeneratedSource, Generator, Selection, Strategy};
pub use template_engine::TemplateEngine;
