//! Runtime configuration
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `UNWIND_*` environment variables (`UNWIND_RUNTIME__MAX_DEPTH=500`).
//! A `.env` file in the working directory is read first if present.
//!
//! ```toml
//! [runtime]
//! max_depth = 1000
//!
//! [logging]
//! filter = "unwind_core=debug"
//! ```

use crate::kernel::DEFAULT_MAX_DEPTH;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "UNWIND_CONFIG_PATH";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "unwind.toml";

const ENV_PREFIX: &str = "UNWIND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for each execution context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Most frames a ledger holds before pushes fail with stack overflow
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Config {
    /// Load from `UNWIND_CONFIG_PATH` (or `unwind.toml`) plus environment
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref())
    }

    /// Load from an explicit file plus environment
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        let builder = defaults()?.add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        Self::finish(builder)
    }

    /// Parse TOML text on top of the defaults, ignoring the environment
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let builder = defaults()?.add_source(File::from_str(text, FileFormat::Toml));
        Self::finish(builder)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime.max_depth == 0 {
            return Err(ConfigError::Validation(
                "runtime.max_depth must be at least 1".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder()
        .set_default("runtime.max_depth", DEFAULT_MAX_DEPTH as u64)?
        .set_default("logging.filter", default_filter())?)
}
