//! Per-session translation lookup state.

use std::collections::HashMap;

use crate::bundle::Bundle;
use crate::config::{
    MissingKeyPolicy,
    ProviderSettings,
};
use crate::locale::Locale;

/// Tenant-aware translation lookup state.
///
/// Owns the static base [`Bundle`], the active [`Locale`], and the tenant
/// overlay layered on top of the current locale's dictionary. Mutation
/// happens only through the defined operations; sharing across tasks is the
/// caller's concern (see [`OverlaySync`](crate::overlay::OverlaySync)).
///
/// Lookup never fails: a key absent from both overlay and base resolves to
/// the configured fallback, or to the key itself.
#[derive(Debug, Clone)]
pub struct TranslationProvider {
    /// Static base dictionaries, one per shipped locale.
    bundle: Bundle,

    /// Currently active locale.
    locale: Locale,

    /// Tenant entries for the current locale. Overrides the base dictionary
    /// on identical keys; dropped on every locale switch.
    overlay: HashMap<String, String>,

    /// Diagnostics policy for keys missing from every dictionary.
    missing_key: MissingKeyPolicy,

    /// Fixed replacement for missing keys; `None` echoes the key.
    missing_fallback: Option<String>,

    /// Bumped on every locale switch. A fetch started under an older epoch
    /// must not merge its result.
    epoch: u64,
}

impl TranslationProvider {
    /// Create a provider over a loaded bundle.
    #[must_use]
    pub fn new(bundle: Bundle, settings: &ProviderSettings) -> Self {
        Self {
            bundle,
            locale: settings.default_locale,
            overlay: HashMap::new(),
            missing_key: settings.missing_key,
            missing_fallback: settings.missing_fallback.clone(),
            epoch: 0,
        }
    }

    /// Resolve `key` against the overlay, then the base dictionary.
    ///
    /// A miss in both emits a warn-level diagnostic (unless the policy is
    /// [`MissingKeyPolicy::Silent`]) and returns the configured fallback or
    /// the key unchanged.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        if let Some(value) = self.overlay.get(key) {
            return value.clone();
        }
        if let Some(value) = self.bundle.get(self.locale, key) {
            return value.to_string();
        }

        if self.missing_key == MissingKeyPolicy::Warn {
            tracing::warn!(locale = %self.locale, key, "translation key not found");
        }
        self.missing_fallback.clone().unwrap_or_else(|| key.to_string())
    }

    /// Switch the active locale.
    ///
    /// The overlay is dropped: tenant entries never persist across locale
    /// changes unless re-fetched. The epoch is bumped so in-flight fetches
    /// for the previous locale are recognizably stale. Re-setting the
    /// current locale is a no-op.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }

        self.locale = locale;
        self.overlay.clear();
        self.epoch = self.epoch.wrapping_add(1);
        tracing::debug!(locale = %self.locale, "locale switched");
    }

    /// Shallow-merge tenant entries into the current locale's overlay.
    ///
    /// Existing keys are overwritten; among successive merges, last resolved
    /// wins.
    pub fn merge_overlay(&mut self, entries: HashMap<String, String>) {
        if entries.is_empty() {
            return;
        }
        tracing::debug!(locale = %self.locale, entries = entries.len(), "merging tenant overlay");
        self.overlay.extend(entries);
    }

    /// Currently active locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Current locale-switch epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of tenant entries currently layered on the base dictionary.
    #[must_use]
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }
}
