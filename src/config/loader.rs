//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    ProviderSettings,
};

/// Name of the per-deployment settings file.
const SETTINGS_FILE: &str = ".harmonet-i18n.json";

/// Load settings from a deployment directory.
///
/// Looks for `.harmonet-i18n.json` in `root`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no settings file, caller falls back to defaults
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_dir(root: &Path) -> Result<Option<ProviderSettings>, ConfigError> {
    let config_path = root.join(SETTINGS_FILE);

    if !config_path.exists() {
        tracing::debug!("Settings file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading settings from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: ProviderSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
