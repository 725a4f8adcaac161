//! Settings file support.
//!
//! Settings are stored in TOML format. Without `--config` the file is
//! looked up at:
//! - Linux: `~/.config/objgen/config.toml`
//! - macOS: `~/Library/Application Support/objgen/config.toml`
//! - Windows: `%APPDATA%\objgen\config.toml`
//!
//! A missing default file is not an error; command-line flags override any
//! value read from the file.

use objgen_core::cli::OutputFormat;
use objgen_core::{Error, Result};
use objgen_model::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// CLI settings.
///
/// # Examples
///
/// ```toml
/// [generation]
/// duplicate_resources = "keep-last"
/// template_dir = "/usr/share/objgen/templates"
///
/// [output]
/// list_format = "json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Settings applied while building and rendering the object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    /// Handling of resources sharing an ID
    #[serde(default)]
    pub duplicate_resources: DuplicatePolicy,

    /// Directory with template overrides
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

/// Settings for informational output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Format of `--list`
    #[serde(default)]
    pub list_format: OutputFormat,
}

impl Settings {
    /// Loads settings from `path`, or from the default location when `path`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if an explicitly given file cannot be read
    /// - [`Error::InvalidArgument`] if the file is not valid settings TOML or
    ///   fails [`Settings::validate`]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No settings file, using defaults");
                    Self::default()
                }
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses one settings file.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            context: format!("reading settings file {}", path.display()),
            source,
        })?;
        Self::parse(&content)
            .map_err(|e| Error::InvalidArgument(format!("{}: {e}", path.display())))
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_cli::settings::Settings;
    /// use objgen_core::cli::OutputFormat;
    ///
    /// let settings = Settings::parse("[output]\nlist_format = \"json\"\n")?;
    /// assert_eq!(settings.output.list_format, OutputFormat::Json);
    /// # Ok::<(), objgen_core::Error>(())
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::InvalidArgument(format!("invalid settings: {e}")))
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `template_dir` is set but is not
    /// a directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.generation.template_dir
            && !dir.is_dir()
        {
            return Err(Error::InvalidArgument(format!(
                "template_dir '{}' is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }
}

/// Default settings file location, if the platform has a config directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("objgen").join(SETTINGS_FILE))
}
