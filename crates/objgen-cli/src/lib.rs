//! objgen CLI library.
//!
//! Exposes the command implementations, formatters and settings used by the
//! `objgen` binary so they can be tested without spawning a process.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod commands;
pub mod formatters;
pub mod settings;
