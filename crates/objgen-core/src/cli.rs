//! CLI-specific types and utilities.
//!
//! Strong types for the command-line surface: output formats, exit codes,
//! and the input/output locations where `-` stands for the standard streams.
//!
//! # Examples
//!
//! ```
//! use objgen_core::cli::{ExitCode, InputSource, OutputFormat, OutputTarget};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.as_str(), "json");
//!
//! assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
//!
//! assert_eq!("-".parse::<InputSource>().unwrap(), InputSource::Stdin);
//! assert!(matches!("obj.c".parse::<OutputTarget>().unwrap(), OutputTarget::File(_)));
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Sentinel selecting a standard stream instead of a file.
pub const STDIO_SENTINEL: &str = "-";

/// Output format for listings.
///
/// Generated source code is always plain text; the format only affects
/// informational output such as `--list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text, one resource per line
    #[default]
    Text,
    /// Colored output for human reading
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_core::cli::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.as_str(), "json");
    /// assert_eq!(OutputFormat::Text.as_str(), "text");
    /// assert_eq!(OutputFormat::Pretty.as_str(), "pretty");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use objgen_core::cli::ExitCode;
/// use objgen_core::Error;
///
/// let code = ExitCode::for_error(&Error::InvalidArgument("bad".into()));
/// assert_eq!(code, ExitCode::INVALID_INPUT);
/// assert!(!code.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// Generation or I/O failure (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid document, conflicting or out-of-range arguments (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Maps a generator error to the exit code reported to the shell.
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        if error.is_input_error() || error.is_conflict() || error.is_usage_error() {
            Self::INVALID_INPUT
        } else {
            Self::ERROR
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the object definition document is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InputSource {
    /// Standard input (`-`)
    #[default]
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl FromStr for InputSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(Error::InvalidArgument(
                "input path cannot be empty".to_string(),
            )),
            STDIO_SENTINEL => Ok(Self::Stdin),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Where generated code is written to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OutputTarget {
    /// Standard output (`-`)
    #[default]
    Stdout,
    /// A file on disk, replaced as a whole
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(Error::InvalidArgument(
                "output path cannot be empty".to_string(),
            )),
            // accepted for compatibility with invocations written for /dev/stdout
            STDIO_SENTINEL | "/dev/stdout" => Ok(Self::Stdout),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
