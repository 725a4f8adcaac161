//! objgen - LwM2M object skeleton generator.
//!
//! Parses an LwM2M object definition XML and generates the C skeleton of
//! that object for the Anjay Lite client.
//!
//! # Examples
//!
//! ```bash
//! # Single-instance skeleton on stdout
//! objgen -i 3311.xml
//!
//! # Five instances, only resources 1, 2 and 3
//! objgen -i some_obj.xml -o some_obj.c -r 1 2 3 -n 5
//!
//! # Three instances of resource 4, managed at runtime
//! objgen -i some_obj.xml -o some_obj.c --nri 4 3 --dri
//!
//! # Resource listing
//! objgen -i some_obj.xml --list
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, value_parser};
use objgen_cli::commands::{self, common::exit_code_for, generate::GenerateArgs};
use objgen_cli::settings::Settings;
use objgen_core::cli::{ExitCode, InputSource, OutputFormat, OutputTarget, STDIO_SENTINEL};
use objgen_model::ObjectOptions;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXAMPLES: &str = "\
Examples:
    objgen -i some_obj.xml -o some_obj.c
    objgen -i some_obj.xml -o some_obj.c -r 1 2 3 -n 5
    objgen -i some_obj.xml -o some_obj.c --nri 4 3";

/// Parses an LwM2M object definition XML and generates an Anjay Lite object
/// skeleton.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(name = "objgen")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
struct Cli {
    /// Input filename or - to read from stdin
    #[arg(short, long, value_name = "PATH|-")]
    input: InputSource,

    /// Output filename or - for stdout
    #[arg(short, long, value_name = "PATH|-", default_value = STDIO_SENTINEL)]
    output: OutputTarget,

    /// List resources and their names only
    #[arg(short, long)]
    list: bool,

    /// Generate code only for these resources; unknown IDs are ignored
    #[arg(short, long, num_args = 1.., value_name = "ID")]
    resources: Option<Vec<u16>>,

    /// Generate empty transaction handlers
    #[arg(short, long)]
    transactional: bool,

    /// Number of object instances to generate; the maximum number of
    /// instances with --dynamic-instances
    #[arg(
        short = 'n',
        long,
        visible_alias = "ni",
        value_name = "1..65534",
        default_value_t = 1,
        value_parser = value_parser!(u16).range(1..=65534)
    )]
    instances_number: u16,

    /// Handle multiple instance objects dynamically
    #[arg(short, long, visible_alias = "di")]
    dynamic_instances: bool,

    /// Number of instances of a multiple instance resource, as RID COUNT;
    /// repeat for more resources. Resources not listed get 2
    #[arg(
        long = "resources-instances-number",
        visible_alias = "nri",
        num_args = 2,
        value_names = ["RID", "COUNT"],
        action = ArgAction::Append
    )]
    resources_instances_number: Vec<u32>,

    /// Handle multiple instance resources dynamically
    #[arg(long = "dynamic-resources-instances", visible_alias = "dri")]
    dynamic_resources_instances: bool,

    /// Format of --list output (json, text, pretty)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Directory with template overrides
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Settings file
    #[arg(long, value_name = "FILE", env = "OBJGEN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let exit_code = match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr; stdout only carries generated code or listings.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}

/// Runs the list or generate command.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or the command fails.
fn execute(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref()).context("cannot load settings")?;

    let options = ObjectOptions {
        filter: cli.resources.map(|ids| ids.into_iter().collect()),
        duplicates: settings.generation.duplicate_resources,
    };

    if cli.list {
        let format = cli.format.unwrap_or(settings.output.list_format);
        return commands::list::run(&cli.input, &options, format);
    }

    let args = GenerateArgs {
        input: cli.input,
        output: cli.output,
        options,
        instances: cli.instances_number,
        dynamic_instances: cli.dynamic_instances,
        transactional: cli.transactional,
        resource_instances: cli.resources_instances_number,
        dynamic_resource_instances: cli.dynamic_resources_instances,
        template_dir: cli.template_dir.or(settings.generation.template_dir),
    };
    commands::generate::run(&args)
}
