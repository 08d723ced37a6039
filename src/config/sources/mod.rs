//! Configuration sources, lowest precedence first: global file, workspace files, environment.

pub mod global_file;
pub mod workspace_file;

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// Environment overrides, e.g. `BENCHTIER_DEFAULTS__ITERATIONS=10` or `BENCHTIER_LOGGING__LEVEL=debug`.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("BENCHTIER")
            .prefix_separator("_")
            .separator("__"),
    )
}
