//! List command implementation.
//!
//! Prints the resources of an object definition instead of generating code.

use super::common;
use crate::formatters::format_output;
use anyhow::Result;
use objgen_core::cli::{ExitCode, InputSource, OutputFormat};
use objgen_model::{ObjectDefinition, ObjectOptions, ResourceDefinition};
use serde::Serialize;
use std::fmt;

/// One resource line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    /// Resource ID
    pub id: u16,
    /// Resource name as written in the document
    pub name: String,
    /// Operations literal (`R`, `W`, `RW`, `E`, `BS_RW`)
    pub operations: String,
    /// Value type literal
    #[serde(rename = "type")]
    pub value_type: String,
    /// Whether the resource has multiple instances
    pub multiple: bool,
    /// Whether the resource is mandatory
    pub mandatory: bool,
}

impl From<&ResourceDefinition> for ResourceSummary {
    fn from(res: &ResourceDefinition) -> Self {
        Self {
            id: res.id(),
            name: res.name().to_string(),
            operations: res.access().to_string(),
            value_type: res.value_type().to_string(),
            multiple: res.is_multiple(),
            mandatory: res.is_mandatory(),
        }
    }
}

impl fmt::Display for ResourceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)?;
        if self.mandatory {
            f.write_str(" (mandatory)")?;
        }
        Ok(())
    }
}

/// Resources of one object in ascending ID order.
///
/// Text output has one `ID NAME [(mandatory)]` line per resource; JSON
/// output is the plain array of summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceListing(pub Vec<ResourceSummary>);

impl From<&ObjectDefinition> for ResourceListing {
    fn from(object: &ObjectDefinition) -> Self {
        Self(object.resources().iter().map(ResourceSummary::from).collect())
    }
}

impl fmt::Display for ResourceListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, summary) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Runs the list command.
///
/// The allow-list in `options` narrows the listing just like it narrows
/// generation.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a valid object
/// definition.
pub fn run(input: &InputSource, options: &ObjectOptions, format: OutputFormat) -> Result<ExitCode> {
    let object = common::load_object(input, options)?;
    let listing = ResourceListing::from(&object);

    let mut output = format_output(&listing, format)?;
    if !output.is_empty() {
        output.push('\n');
    }
    print!("{output}");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u16, name: &str, mandatory: bool) -> ResourceSummary {
        ResourceSummary {
            id,
            name: name.to_string(),
            operations: "R".to_string(),
            value_type: "integer".to_string(),
            multiple: false,
            mandatory,
        }
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(summary(0, "Sensor Value", true).to_string(), "0 Sensor Value (mandatory)");
        assert_eq!(summary(5601, "Min Measured Value", false).to_string(), "5601 Min Measured Value");
    }

    #[test]
    fn test_listing_text_lines() {
        let listing = ResourceListing(vec![summary(1, "A", true), summary(3, "C", false)]);
        assert_eq!(listing.to_string(), "1 A (mandatory)\n3 C");
        assert_eq!(ResourceListing::default().to_string(), "");
    }

    #[test]
    fn test_listing_json_is_array() {
        let listing = ResourceListing(vec![summary(1, "A", true)]);
        let json: serde_json::Value =
            serde_json::from_str(&format_output(&listing, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["type"], "integer");
        assert_eq!(json[0]["mandatory"], true);
    }
}
