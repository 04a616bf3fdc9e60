//! Merge rules: defaults, override order, conflict handling.

use crate::naming::DEFAULT_NAME_FORMAT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("map_name_format", DEFAULT_NAME_FORMAT)?
        .set_default("validation_mode", "none")?
        .set_default("generate_default_car_variant", false)?
        .set_default("output.directory", ".")
}

/// Environment overrides, e.g. `ENVIMIX__VEHICLES__CAR_RALLY=false`.
/// Added last so they win over every file.
pub fn environment() -> Environment {
    Environment::with_prefix("ENVIMIX")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
