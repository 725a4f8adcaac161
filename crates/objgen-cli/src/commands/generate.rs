//! Generate command implementation.
//!
//! Renders the Anjay Lite skeleton of one object definition and writes it
//! to the output target.

use super::common;
use anyhow::{Context, Result};
use objgen_codegen::{
    GeneratedSource, GenerationConfig, Generator, InstanceCount, ResourceInstanceCounts,
    TemplateEngine,
};
use objgen_core::Error;
use objgen_core::cli::{ExitCode, InputSource, OutputTarget};
use objgen_model::ObjectOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Document to read
    pub input: InputSource,
    /// Destination of the generated code
    pub output: OutputTarget,
    /// Resource filter and duplicate handling
    pub options: ObjectOptions,
    /// Requested object instances
    pub instances: u16,
    /// Manage object instances at runtime
    pub dynamic_instances: bool,
    /// Emit transaction handlers
    pub transactional: bool,
    /// Flat `RID COUNT` pairs
    pub resource_instances: Vec<u32>,
    /// Manage resource instances at runtime
    pub dynamic_resource_instances: bool,
    /// Directory with template overrides
    pub template_dir: Option<PathBuf>,
}

/// Builds the generation configuration from the command-line values.
///
/// Runs before the document is read so argument errors never depend on
/// the input.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] for an instance count or resource ID out of
///   range, or an odd number of `RID COUNT` values
/// - [`Error::ConflictingResourceInstances`] if one resource gets two
///   different counts
pub fn build_config(args: &GenerateArgs) -> Result<GenerationConfig, Error> {
    let instances = if args.dynamic_instances {
        InstanceCount::dynamic(u32::from(args.instances))?
    } else {
        InstanceCount::fixed(u32::from(args.instances))?
    };

    Ok(GenerationConfig::builder()
        .instances(instances)
        .transactional(args.transactional)
        .dynamic_resource_instances(args.dynamic_resource_instances)
        .resource_instance_counts(resource_instance_counts(&args.resource_instances)?)
        .build())
}

fn resource_instance_counts(values: &[u32]) -> Result<ResourceInstanceCounts, Error> {
    if values.len() % 2 != 0 {
        return Err(Error::InvalidArgument(
            "resource instance counts must be given as RID COUNT pairs".to_string(),
        ));
    }

    let pairs = values
        .chunks_exact(2)
        .map(|pair| {
            let (rid, count) = (pair[0], pair[1]);
            u16::try_from(rid)
                .ok()
                .filter(|&rid| rid < u16::MAX)
                .map(|rid| (rid, count))
                .ok_or_else(|| Error::InvalidArgument(format!("invalid resource ID {rid}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    ResourceInstanceCounts::from_pairs(pairs)
}

/// Builds the template engine, from `dir` when given.
///
/// # Errors
///
/// Returns an error if a template cannot be read or compiled.
pub fn build_engine<'a>(dir: Option<&Path>) -> Result<TemplateEngine<'a>, Error> {
    match dir {
        Some(dir) => {
            debug!("Loading templates from {}", dir.display());
            TemplateEngine::from_dir(dir)
        }
        None => TemplateEngine::new(),
    }
}

/// Generates the skeleton without writing it anywhere.
///
/// # Errors
///
/// Returns an error if the arguments are invalid, the input cannot be read,
/// the document is invalid or rendering fails.
pub fn render(args: &GenerateArgs) -> Result<GeneratedSource> {
    let config = build_config(args).context("invalid generation options")?;
    let object = common::load_object(&args.input, &args.options)?;
    let engine = build_engine(args.template_dir.as_deref()).context("cannot load templates")?;

    Generator::with_engine(engine)
        .generate(&object, &config)
        .with_context(|| format!("cannot generate code for object {}", object.id()))
}

/// Runs the generate command.
///
/// Nothing is written unless the whole skeleton rendered successfully.
///
/// # Errors
///
/// Returns an error if generation fails or the output cannot be written.
pub fn run(args: &GenerateArgs) -> Result<ExitCode> {
    let source = render(args)?;
    common::write_output(&args.output, &source.content)?;
    info!("Wrote {} to {}", source.file_name, args.output);
    Ok(ExitCode::SUCCESS)
}
