//! Configuration System
//!
//! Loads the harness configuration file: the custom-defaults table that becomes the
//! custom-defaults layer of every benchmark, and the logging section. Sources are merged with the
//! `config` crate, later sources overriding earlier ones key by key:
//!
//! 1. global file (`~/.config/benchtier/config.toml` or the platform equivalent)
//! 2. workspace files (`benchtier.toml`, then `benchtier.{BENCHTIER_ENV}.toml`)
//! 3. environment (`BENCHTIER_DEFAULTS__ITERATIONS=10`)
//!
//! ```toml
//! [defaults]
//! iterations = 10000
//! time_unit = "us"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::error::SettingsError;
use crate::logging::LoggingConfig;
use crate::settings::{Layer, Registry};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_paths, WORKSPACE_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Custom defaults: setting name to value
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn raw_value(name: &str, value: &Value) -> Result<String, SettingsError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(SettingsError::ConfigError(format!(
            "defaults.{} must be a string, number or boolean",
            name
        ))),
    }
}

impl HarnessConfig {
    /// Parse the `[defaults]` table into a custom-defaults layer.
    ///
    /// Every name must be a parsable setting in `registry`. Names are unique, so the order of the
    /// resulting layer (alphabetical) does not affect resolution.
    pub fn defaults_layer(&self, registry: &Registry) -> Result<Layer, SettingsError> {
        self.defaults
            .iter()
            .map(|(name, value)| registry.parse(name, &raw_value(name, value)?))
            .collect()
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the global file, the workspace files under `workspace_root`, and environment.
    pub fn load(workspace_root: &Path) -> Result<HarnessConfig, SettingsError> {
        Self::load_from_sources(global_config_path().as_deref(), workspace_root)
    }

    /// [`ConfigLoader::load`] with an explicit global file location
    pub fn load_from_sources(
        global_file: Option<&Path>,
        workspace_root: &Path,
    ) -> Result<HarnessConfig, SettingsError> {
        let builder = Config::builder();
        let builder = sources::global_file::add_to_builder(builder, global_file)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::add_environment(builder);
        Self::finish(builder)
    }

    /// Load exactly one file, bypassing discovery and environment
    pub fn load_from_file(path: &Path) -> Result<HarnessConfig, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = Config::builder().add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<HarnessConfig, SettingsError> {
        let config: HarnessConfig = builder.build()?.try_deserialize()?;
        debug!(
            defaults = config.defaults.len(),
            "Loaded harness configuration"
        );
        Ok(config)
    }
}
