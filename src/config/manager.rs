//! Settings management.

use std::path::PathBuf;

use super::{
    ConfigError,
    ProviderSettings,
    loader,
};

/// Owns the currently active [`ProviderSettings`].
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Currently active settings.
    current_settings: ProviderSettings,

    /// Directory the settings file was loaded from.
    config_root: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ProviderSettings::default(), config_root: None }
    }

    /// Load settings from a deployment directory.
    ///
    /// Falls back to defaults when `config_root` is `None` or carries no
    /// settings file. Loaded settings are validated before they take effect.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, config_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from: {:?}", config_root);

        let settings = if let Some(root) = &config_root {
            loader::load_from_dir(root)?.map_or_else(ProviderSettings::default, |loaded| {
                tracing::debug!("Loaded deployment settings: {:?}", loaded);
                loaded
            })
        } else {
            ProviderSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.config_root = config_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the active settings (tenant admin updates at runtime).
    ///
    /// # Errors
    /// Validation error.
    pub fn update_settings(&mut self, new_settings: ProviderSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// The currently active settings.
    #[must_use]
    pub const fn settings(&self) -> &ProviderSettings {
        &self.current_settings
    }

    /// Directory the settings file was loaded from, if any.
    #[must_use]
    pub const fn config_root(&self) -> Option<&PathBuf> {
        self.config_root.as_ref()
    }
}
