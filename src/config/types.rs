//! Provider settings and their validation.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "overlay.baseUrl")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Render accumulated validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What happens when a key is missing from every dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Emit a warn-level diagnostic and echo the key (default).
    #[default]
    Warn,
    /// Echo the key with no diagnostic. Test harnesses use this to mute
    /// expected misses.
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// Locale active before any explicit switch.
    pub default_locale: Locale,

    /// Separator joining nested bundle keys (e.g. "common.save").
    pub key_separator: String,

    pub missing_key: MissingKeyPolicy,

    /// Fixed string returned for missing keys instead of echoing the key.
    /// If unset, the key itself is returned.
    pub missing_fallback: Option<String>,

    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Whether tenant overlays are fetched at all. The base bundle must
    /// always be sufficient on its own.
    pub enabled: bool,

    /// Origin of the overlay endpoint (e.g. "https://app.harmonet.jp").
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enabled: false, base_url: String::new(), request_timeout_ms: 10_000 }
    }
}

impl ProviderSettings {
    /// # Errors
    /// - Empty key separator
    /// - Empty configured fallback
    /// - Overlay enabled with a missing or non-http(s) base URL
    /// - Zero request timeout
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if let Some(fallback) = &self.missing_fallback
            && fallback.is_empty()
        {
            errors.push(ValidationError::new(
                "missingFallback",
                "The fallback cannot be empty. Please specify a placeholder, or remove this field to echo the key",
            ));
        }

        if self.overlay.enabled {
            validate_base_url(&self.overlay.base_url, &mut errors);
        }

        if self.overlay.request_timeout_ms == 0 {
            errors.push(ValidationError::new(
                "overlay.requestTimeoutMs",
                "The timeout must be greater than zero",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Check that the overlay endpoint origin is a usable http(s) URL.
fn validate_base_url(base_url: &str, errors: &mut Vec<ValidationError>) {
    if base_url.is_empty() {
        errors.push(ValidationError::new(
            "overlay.baseUrl",
            "A base URL is required when overlays are enabled. Example: \"https://app.harmonet.jp\"",
        ));
        return;
    }

    match url::Url::parse(base_url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => {
            errors.push(ValidationError::new(
                "overlay.baseUrl",
                format!("Unsupported scheme '{}': only http and https are allowed", parsed.scheme()),
            ));
        }
        Err(e) => {
            errors.push(ValidationError::new(
                "overlay.baseUrl",
                format!("Invalid URL '{base_url}': {e}"),
            ));
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::Ja,
            key_separator: ".".to_string(),
            missing_key: MissingKeyPolicy::Warn,
            missing_fallback: None,
            overlay: OverlayConfig::default(),
        }
    }
}
