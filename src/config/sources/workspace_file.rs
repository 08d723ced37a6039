//! Workspace config file source: `benchtier.toml` and `benchtier.{BENCHTIER_ENV}.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const WORKSPACE_FILE: &str = "benchtier.toml";

/// Workspace config files in precedence order (base, then environment-specific).
pub fn workspace_config_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![workspace_root.join(WORKSPACE_FILE)];
    if let Ok(env_name) = std::env::var("BENCHTIER_ENV") {
        paths.push(workspace_root.join(format!("benchtier.{}.toml", env_name)));
    }
    paths
}

/// Add workspace config files to builder.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for path in workspace_config_paths(workspace_root) {
        if path.exists() {
            debug!(config_path = %path.display(), "Loading workspace configuration");
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
    }
    Ok(builder)
}
