//! Configuration Loader
//!
//! Environment-aware configuration loading. Values come from an optional
//! config file (YAML, TOML or JSON, detected by extension) and are then
//! overridden by `EVENT_BUS_*` environment variables, using `__` to separate
//! nested keys:
//!
//! ```text
//! EVENT_BUS_BUS__PRIORITY=5
//! EVENT_BUS_BUS__ACCEPTS_CANCELLED=true
//! EVENT_BUS_LOGGING__LEVEL=info
//! ```

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ::config::{Config, Environment, File};
use tracing::{debug, info};

use super::{EventBusConfig, Settings};
use crate::constants::env::{
    CONFIG_PATH, ENVIRONMENT, ENVIRONMENT_FALLBACK, NESTING_SEPARATOR, PREFIX,
};
use crate::constants::system::DEFAULT_CONFIG_FILE;
use crate::error::Result;

/// Loaded, validated settings plus where they came from
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings: Settings,
    environment: String,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default location with environment overrides
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from(Self::default_config_path())
    }

    /// Load configuration from a specific file with environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Arc<ConfigManager>> {
        Self::load_with_env(path, None)
    }

    /// Load configuration using an explicit variable map instead of the process
    /// environment. Useful for tests that must not touch global state.
    pub fn load_with_env(
        path: impl AsRef<Path>,
        variables: Option<HashMap<String, String>>,
    ) -> Result<Arc<ConfigManager>> {
        let config_path = path.as_ref().to_path_buf();
        let environment = Self::detect_environment();

        debug!(
            environment = %environment,
            config_path = %config_path.display(),
            exists = config_path.exists(),
            "Loading event bus configuration"
        );

        let settings: Settings = Config::builder()
            .add_source(File::from(config_path.as_path()).required(false))
            .add_source(
                Environment::with_prefix(PREFIX)
                    .prefix_separator("_")
                    .separator(NESTING_SEPARATOR)
                    .try_parsing(true)
                    .source(variables),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        info!(
            environment = %environment,
            priority = settings.bus.priority(),
            accepts_cancelled = settings.bus.accepts_cancelled(),
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            settings,
            environment,
            config_path,
        }))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bus_config(&self) -> EventBusConfig {
        self.settings.bus
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `EVENT_BUS_ENV`, then `APP_ENV`, then `development`
    pub fn detect_environment() -> String {
        env::var(ENVIRONMENT)
            .or_else(|_| env::var(ENVIRONMENT_FALLBACK))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_path() -> PathBuf {
        env::var(CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
