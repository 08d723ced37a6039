//! Global config file source: `<platform config dir>/benchtier/config.toml`
//! (`$XDG_CONFIG_HOME/benchtier/config.toml` on Linux).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "benchtier").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = path else {
        return Ok(builder);
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global configuration file");
        return Ok(builder);
    }

    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    debug!(config_path = %canonical.display(), "Loading global configuration");
    Ok(builder.add_source(File::from(canonical.as_path()).required(false)))
}
