//! CLI command implementations.
//!
//! `objgen` has no subcommands; `--list` switches between the two modes:
//! - [`list`] - print the resources of an object definition
//! - [`generate`] - render the C skeleton

pub mod common;
pub mod generate;
pub mod list;
