use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Engine configuration
///
/// Tunables for the wizard engine: persistence windows, retry behavior and
/// credit pricing. Loaded from a JSON file in the platform config
/// directory; a default file is created on first run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Debounce window for draft autosave, in milliseconds
    pub autosave_debounce_ms: u64,

    /// Days until a stored draft or progress record expires
    pub draft_expiry_days: u32,

    /// Maximum retries after the initial attempt of a remote operation
    pub max_retries: u32,

    /// Base delay for exponential backoff, in milliseconds
    pub retry_base_delay_ms: u64,

    /// Credit cost of one automated case analysis
    pub case_analysis_cost: u32,

    /// Credit cost of one smile simulation
    pub dsd_simulation_cost: u32,

    /// Whether arrow-key/Enter navigation is active
    #[serde(default = "default_keyboard_nav")]
    pub keyboard_nav: bool,
}

fn default_keyboard_nav() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 2000,
            draft_expiry_days: 7,
            max_retries: 2,
            retry_base_delay_ms: 2000,
            case_analysis_cost: 1,
            dsd_simulation_cost: 2,
            keyboard_nav: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the platform config directory.
    /// Creates the default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| {
                ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(e),
                }
            })?;
            let config: EngineConfig =
                serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: config_path.display().to_string(),
                    source: Box::new(e),
                })?;

            config.validate()?;
            log::debug!("Loaded engine config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = EngineConfig::default();
            config.save()?;
            log::debug!("Created default engine config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&config_path, json).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Get the config file path
    fn config_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::Invalid("could not determine user config directory".to_string())
        })?;
        Ok(base.join("CaseWizard").join("engine.json"))
    }

    /// Validate all fields are within their supported ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=60_000).contains(&self.autosave_debounce_ms) {
            return Err(ConfigError::Invalid(format!(
                "autosave debounce {}ms out of range (100-60000)",
                self.autosave_debounce_ms
            )));
        }

        if !(1..=365).contains(&self.draft_expiry_days) {
            return Err(ConfigError::Invalid(format!(
                "draft expiry {} days out of range (1-365)",
                self.draft_expiry_days
            )));
        }

        if self.max_retries > 10 {
            return Err(ConfigError::Invalid(format!(
                "max retries {} out of range (0-10)",
                self.max_retries
            )));
        }

        if !(100..=60_000).contains(&self.retry_base_delay_ms) {
            return Err(ConfigError::Invalid(format!(
                "retry base delay {}ms out of range (100-60000)",
                self.retry_base_delay_ms
            )));
        }

        Ok(())
    }

    /// Debounce window as a Duration
    pub fn autosave_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.autosave_debounce_ms)
    }

    /// Retry options derived from this config
    pub fn retry_options(&self) -> crate::retry::RetryOptions {
        crate::retry::RetryOptions {
            max_retries: self.max_retries,
            base_delay: std::time::Duration::from_millis(self.retry_base_delay_ms),
        }
    }
}
