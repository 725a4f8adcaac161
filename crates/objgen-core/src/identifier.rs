//! C identifiers derived from human-readable names.
//!
//! LwM2M object and resource names are free text ("On/Off", "3D Position",
//! "Min Measured Value"). [`Identifier`] turns them into something a C
//! compiler accepts and offers the case variants used by the templates.
//!
//! # Examples
//!
//! ```
//! use objgen_core::Identifier;
//!
//! let id = Identifier::sanitize("On/Off");
//! assert_eq!(id.as_str(), "On_Off");
//! assert_eq!(id.to_upper_snake(), "ON_OFF");
//! assert_eq!(id.to_lower_snake(), "on_off");
//! assert_eq!(id.to_pascal(), "OnOff");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex literal"));

const SEPARATOR: char = '_';

/// Fallback for names without a single alphanumeric character.
const UNNAMED: &str = "unnamed";

/// Sanitized source identifier (newtype over String).
///
/// Only ASCII letters, digits and single underscores between them, never
/// starting with a digit. Sanitizing is idempotent: feeding an identifier's
/// text back into [`Identifier::sanitize`] yields the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Builds an identifier from arbitrary text.
    ///
    /// Every run of characters outside `[A-Za-z0-9]` becomes one `_`,
    /// leading and trailing `_` are stripped, and a leading digit is spelled
    /// out in English. Text with no alphanumeric characters at all becomes
    /// `unnamed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_core::Identifier;
    ///
    /// assert_eq!(Identifier::sanitize("  Sensor  Value ").as_str(), "Sensor_Value");
    /// assert_eq!(Identifier::sanitize("3D Position").as_str(), "threeD_Position");
    /// assert_eq!(Identifier::sanitize("%%%").as_str(), "unnamed");
    /// ```
    #[must_use]
    pub fn sanitize(name: &str) -> Self {
        let replaced = NON_ALPHANUMERIC.replace_all(name, "_");
        let trimmed = replaced.trim_matches(SEPARATOR);

        let mut chars = trimmed.chars();
        let Some(first) = chars.next() else {
            return Self(UNNAMED.to_string());
        };

        let mut out = String::with_capacity(trimmed.len() + 4);
        match digit_spelling(first) {
            Some(word) => out.push_str(word),
            None => out.push(first),
        }
        out.push_str(chars.as_str());
        Self(out)
    }

    /// Returns the sanitized base string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-snake view, e.g. `MIN_MEASURED_VALUE`.
    #[must_use]
    pub fn to_upper_snake(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Lower-snake view, e.g. `min_measured_value`.
    #[must_use]
    pub fn to_lower_snake(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Pascal view, e.g. `MinMeasuredValue`.
    ///
    /// Each `_`-separated word is capitalized with the remainder lowercased.
    ///
    /// # Examples
    ///
    /// ```
    /// use objgen_core::Identifier;
    ///
    /// assert_eq!(Identifier::sanitize("LWM2M Server").to_pascal(), "Lwm2mServer");
    /// ```
    #[must_use]
    pub fn to_pascal(&self) -> String {
        self.0
            .split(SEPARATOR)
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                })
            })
            .collect()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

const fn digit_spelling(c: char) -> Option<&'static str> {
    match c {
        '0' => Some("zero"),
        '1' => Some("one"),
        '2' => Some("two"),
        '3' => Some("three"),
        '4' => Some("four"),
        '5' => Some("five"),
        '6' => Some("six"),
        '7' => Some("seven"),
        '8' => Some("eight"),
        '9' => Some("nine"),
        _ => None,
    }
}
