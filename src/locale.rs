//! Supported locale tags.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Error returned when a tag is not part of the supported locale set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale tag '{tag}'")]
pub struct UnsupportedLocale {
    /// The rejected tag.
    pub tag: String,
}

/// Language tags the platform ships base dictionaries for.
///
/// The set is closed: tenants customize values per locale through overlays,
/// they never add locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Japanese (platform default).
    #[default]
    #[serde(rename = "ja")]
    Ja,
    /// English.
    #[serde(rename = "en")]
    En,
    /// Chinese.
    #[serde(rename = "zh")]
    Zh,
}

impl Locale {
    /// All supported locales, in UI display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Ja, Self::En, Self::Zh]
    }

    /// The bare tag string (`"ja"`, `"en"`, `"zh"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
            Self::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            other => Err(UnsupportedLocale { tag: other.to_string() }),
        }
    }
}
