//! Core types and errors for the LwM2M object generator.
//!
//! This crate provides the foundational pieces shared by the model,
//! code generation and CLI crates.
//!
//! # Architecture
//!
//! The core consists of:
//! - The error taxonomy ([`Error`], [`Result`])
//! - [`Identifier`], which turns free-text names into C identifiers
//! - CLI primitives ([`cli::ExitCode`], [`cli::OutputFormat`], stream sentinels)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod identifier;

pub mod cli;

pub use error::{Error, Result};
pub use identifier::Identifier;
