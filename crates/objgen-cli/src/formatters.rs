//! Output formatters for informational output.
//!
//! Generated C code is never formatted; these helpers only shape listings
//! such as `--list` for the JSON, text and pretty output modes.

use anyhow::Result;
use colored::Colorize;
use objgen_core::cli::OutputFormat;
use serde::Serialize;
use std::fmt::Display;

/// Format data according to the specified output format.
///
/// Text mode uses the value's [`Display`] implementation, the other modes
/// its [`Serialize`] implementation.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use objgen_cli::formatters::format_output;
/// use objgen_core::cli::OutputFormat;
/// use serde::Serialize;
/// use std::fmt;
///
/// #[derive(Serialize)]
/// struct Entry {
///     id: u16,
///     name: String,
/// }
///
/// impl fmt::Display for Entry {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{} {}", self.id, self.name)
///     }
/// }
///
/// let entry = Entry { id: 5850, name: "On/Off".to_string() };
/// assert_eq!(format_output(&entry, OutputFormat::Text)?, "5850 On/Off");
/// assert!(format_output(&entry, OutputFormat::Json)?.contains("\"name\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize + Display>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => Ok(text::format(data)),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON.
    ///
    /// Uses pretty-printing with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }

    /// Format data as compact JSON (no formatting).
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::Display;

    /// Format data as plain text.
    ///
    /// Suitable for piping to other commands or scripts.
    #[must_use]
    pub fn format<T: Display>(data: &T) -> String {
        data.to_string()
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize};

    /// Format data as colorized, human-readable output.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        Ok(format_value(&value, 0))
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        use serde_json::Value;

        let indent_str = "  ".repeat(indent);
        let next_indent_str = "  ".repeat(indent + 1);

        match value {
            Value::Null => "null".dimmed().to_string(),
            Value::Bool(b) => b.to_string().yellow().to_string(),
            Value::Number(n) => n.to_string().cyan().to_string(),
            Value::String(s) => format!("\"{}\"", s.green()),
            Value::Array(arr) => {
                if arr.is_empty() {
                    return "[]".to_string();
                }

                let items: Vec<String> = arr
                    .iter()
                    .map(|item| format!("{next_indent_str}{}", format_value(item, indent + 1)))
                    .collect();
                format!("[\n{}\n{indent_str}]", items.join(",\n"))
            }
            Value::Object(obj) => {
                if obj.is_empty() {
                    return "{}".to_string();
                }

                let entries: Vec<String> = obj
                    .iter()
                    .map(|(key, val)| {
                        format!(
                            "{next_indent_str}\"{}\": {}",
                            key.blue().bold(),
                            format_value(val, indent + 1)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{indent_str}}}", entries.join(",\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: i32,
        enabled: bool,
    }

    impl fmt::Display for TestData {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} {}", self.count, self.name)
        }
    }

    fn data() -> TestData {
        TestData {
            name: "test".to_string(),
            count: 42,
            enabled: true,
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&data()).unwrap();
        assert!(output.contains("\"name\": \"test\""));
        assert!(output.contains("\"count\": 42"));
        assert!(output.contains("\"enabled\": true"));
    }

    #[test]
    fn test_json_format_compact() {
        let output = json::format_compact(&data()).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.contains("\"name\":\"test\""));
    }

    #[test]
    fn test_text_format_uses_display() {
        assert_eq!(text::format(&data()), "42 test");
        assert_eq!(format_output(&data(), OutputFormat::Text).unwrap(), "42 test");
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = pretty::format(&data()).unwrap();
        assert!(output.starts_with("{\n"));
        assert!(output.contains("\"name\": \"test\""));
        assert!(output.contains("\"count\": 42"));
        assert!(output.ends_with('}'));
    }

    #[test]
    fn test_pretty_format_empty_collections() {
        assert_eq!(pretty::format(&Vec::<i32>::new()).unwrap(), "[]");
        assert_eq!(
            pretty::format(&serde_json::json!({})).unwrap(),
            "{}"
        );
    }
}
