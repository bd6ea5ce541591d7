//! Static translation bundles shipped with the application.
//!
//! A bundle is the default dictionary set: one flat key/value map per
//! supported locale, produced by flattening nested JSON locale files
//! (`ja.json`, `en.json`, `zh.json`) into dot-separated message keys.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::locale::Locale;

/// Error loading a static bundle from disk.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The bundle file could not be read.
    #[error("failed to read bundle file: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle file is not valid JSON.
    #[error("failed to parse bundle file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file stem is not a supported locale tag.
    #[error("bundle file '{path}' is not named after a supported locale")]
    UnsupportedLocale {
        /// Path of the offending file.
        path: String,
    },
}

/// Flattened dictionary for a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBundle {
    /// Locale the messages belong to.
    pub locale: Locale,
    /// Dotted message key to translated value.
    pub messages: HashMap<String, String>,
}

/// The full static dictionary set, at most one entry per supported locale.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Per-locale flattened dictionaries.
    locales: HashMap<Locale, HashMap<String, String>>,
}

impl Bundle {
    /// Create an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the dictionary for one locale.
    pub fn insert(&mut self, bundle: LocaleBundle) {
        self.locales.insert(bundle.locale, bundle.messages);
    }

    /// Look up `key` in `locale`'s dictionary.
    #[must_use]
    pub fn get(&self, locale: Locale, key: &str) -> Option<&str> {
        self.locales.get(&locale).and_then(|messages| messages.get(key)).map(String::as_str)
    }

    /// Number of keys shipped for `locale`.
    #[must_use]
    pub fn len(&self, locale: Locale) -> usize {
        self.locales.get(&locale).map_or(0, HashMap::len)
    }

    /// Whether no dictionary has been loaded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

/// Flatten a nested JSON document into dot-separated message keys.
///
/// Objects nest with `separator`, arrays flatten to `key[0]` style entries,
/// and non-string leaves keep their JSON rendering.
#[must_use]
pub fn flatten_messages(value: &Value, separator: &str) -> HashMap<String, String> {
    let mut messages = HashMap::new();
    collect_messages(value, separator, None, &mut messages);
    messages
}

/// Recursive worker for [`flatten_messages`].
fn collect_messages(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    messages: &mut HashMap<String, String>,
) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let key = prefix.map_or_else(|| name.clone(), |p| format!("{p}{separator}{name}"));
                collect_messages(child, separator, Some(&key), messages);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let key = prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                collect_messages(child, separator, Some(&key), messages);
            }
        }
        Value::String(text) => {
            if let Some(key) = prefix {
                messages.insert(key.to_string(), text.clone());
            }
        }
        other => {
            if let Some(key) = prefix {
                messages.insert(key.to_string(), other.to_string());
            }
        }
    }
}

/// Load one locale file.
///
/// The locale is taken from the file stem, which must be a supported tag.
/// An empty file is a valid empty dictionary.
///
/// # Errors
/// Returns [`BundleError`] if the file cannot be read, is not valid JSON, or
/// is not named after a supported locale.
pub fn load_bundle_file(path: &Path, separator: &str) -> Result<LocaleBundle, BundleError> {
    let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let locale = stem
        .parse::<Locale>()
        .map_err(|_| BundleError::UnsupportedLocale { path: path.display().to_string() })?;

    let content = std::fs::read_to_string(path)?;
    let messages = if content.trim().is_empty() {
        HashMap::new()
    } else {
        let json: Value = serde_json::from_str(&content)?;
        flatten_messages(&json, separator)
    };

    tracing::debug!(locale = %locale, keys = messages.len(), path = %path.display(), "loaded bundle file");
    Ok(LocaleBundle { locale, messages })
}

/// Load every `<locale>.json` file in a directory.
///
/// Files whose stem is not a supported locale tag are skipped with a debug
/// log, so a bundle directory can carry unrelated JSON without failing.
///
/// # Errors
/// Returns [`BundleError`] if the directory cannot be listed or a locale file
/// fails to load.
pub fn load_bundle_dir(dir: &Path, separator: &str) -> Result<Bundle, BundleError> {
    let mut bundle = Bundle::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let stem = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        if stem.parse::<Locale>().is_err() {
            tracing::debug!(path = %path.display(), "skipping non-locale file in bundle directory");
            continue;
        }
        bundle.insert(load_bundle_file(&path, separator)?);
    }

    Ok(bundle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn flatten_simple_object() {
        let json = json!({
            "save": "Save",
            "cancel": "Cancel"
        });

        let messages = flatten_messages(&json, ".");

        expect_that!(messages.get("save"), some(eq(&"Save".to_string())));
        expect_that!(messages.get("cancel"), some(eq(&"Cancel".to_string())));
        expect_that!(messages.len(), eq(2));
    }

    #[googletest::test]
    fn flatten_nested_object() {
        let json = json!({
            "common": {
                "save": "Save"
            },
            "facility": {
                "reserve": "Reserve",
                "cancelReservation": "Cancel reservation"
            }
        });

        let messages = flatten_messages(&json, ".");

        expect_that!(messages.get("common.save"), some(eq(&"Save".to_string())));
        expect_that!(messages.get("facility.reserve"), some(eq(&"Reserve".to_string())));
        expect_that!(
            messages.get("facility.cancelReservation"),
            some(eq(&"Cancel reservation".to_string()))
        );
        expect_that!(messages.len(), eq(3));
    }

    #[googletest::test]
    fn flatten_with_custom_separator() {
        let json = json!({
            "board": {
                "post": "Post"
            }
        });

        let messages = flatten_messages(&json, "_");

        expect_that!(messages.get("board_post"), some(eq(&"Post".to_string())));
    }

    #[googletest::test]
    fn flatten_arrays_and_non_string_leaves() {
        let json = json!({
            "weekdays": ["Mon", "Tue"],
            "maxResidents": 200,
            "guestAllowed": true
        });

        let messages = flatten_messages(&json, ".");

        expect_that!(messages.get("weekdays[0]"), some(eq(&"Mon".to_string())));
        expect_that!(messages.get("weekdays[1]"), some(eq(&"Tue".to_string())));
        expect_that!(messages.get("maxResidents"), some(eq(&"200".to_string())));
        expect_that!(messages.get("guestAllowed"), some(eq(&"true".to_string())));
    }

    #[googletest::test]
    fn bundle_lookup_is_locale_scoped() {
        let mut bundle = Bundle::new();
        bundle.insert(LocaleBundle {
            locale: Locale::Ja,
            messages: HashMap::from([("common.save".to_string(), "保存".to_string())]),
        });
        bundle.insert(LocaleBundle {
            locale: Locale::En,
            messages: HashMap::from([("common.save".to_string(), "Save".to_string())]),
        });

        expect_that!(bundle.get(Locale::Ja, "common.save"), some(eq("保存")));
        expect_that!(bundle.get(Locale::En, "common.save"), some(eq("Save")));
        expect_that!(bundle.get(Locale::Zh, "common.save"), none());
        expect_that!(bundle.len(Locale::Ja), eq(1));
    }

    #[googletest::test]
    fn load_bundle_file_reads_locale_from_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ja.json");
        fs::write(&path, r#"{"common": {"save": "保存"}}"#).unwrap();

        let loaded = load_bundle_file(&path, ".").unwrap();

        expect_that!(loaded.locale, eq(Locale::Ja));
        expect_that!(loaded.messages.get("common.save"), some(eq(&"保存".to_string())));
    }

    #[googletest::test]
    fn load_bundle_file_rejects_unknown_stem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fr.json");
        fs::write(&path, "{}").unwrap();

        let result = load_bundle_file(&path, ".");

        assert!(matches!(result, Err(BundleError::UnsupportedLocale { .. })));
    }

    #[googletest::test]
    fn load_bundle_file_accepts_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, "").unwrap();

        let loaded = load_bundle_file(&path, ".").unwrap();

        expect_that!(loaded.messages.len(), eq(0));
    }

    #[googletest::test]
    fn load_bundle_dir_skips_non_locale_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ja.json"), r#"{"common": {"save": "保存"}}"#).unwrap();
        fs::write(dir.path().join("en.json"), r#"{"common": {"save": "Save"}}"#).unwrap();
        fs::write(dir.path().join("manifest.json"), r#"{"version": 3}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not json").unwrap();

        let bundle = load_bundle_dir(dir.path(), ".").unwrap();

        expect_that!(bundle.get(Locale::Ja, "common.save"), some(eq("保存")));
        expect_that!(bundle.get(Locale::En, "common.save"), some(eq("Save")));
        expect_that!(bundle.get(Locale::Ja, "version"), none());
        expect_that!(bundle.get(Locale::En, "version"), none());
    }

    #[googletest::test]
    fn load_bundle_dir_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zh.json"), "{ broken").unwrap();

        let result = load_bundle_dir(dir.path(), ".");

        assert!(matches!(result, Err(BundleError::Parse(_))));
    }
}
