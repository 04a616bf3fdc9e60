//! Config loading entry point used by the CLI and library callers.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::EnvimixConfig;
use crate::error::{ApiError, StorageError};
use config::{ConfigBuilder, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads and validates [`EnvimixConfig`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then `<workspace>/envimix.toml`, then the environment.
    pub fn load(workspace_root: &Path) -> Result<EnvimixConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder)
    }

    /// Defaults, then the given file, then the environment. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<EnvimixConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(true),
        );
        Self::finish(builder)
    }

    /// Render a configuration as TOML, in the shape the loader reads back
    pub fn render(config: &EnvimixConfig) -> Result<String, ApiError> {
        toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Write the default configuration to `<workspace>/envimix.toml`.
    ///
    /// An existing file is only replaced when `force` is set.
    pub fn write_workspace_file(workspace_root: &Path, force: bool) -> Result<PathBuf, ApiError> {
        let path = workspace_file::path(workspace_root);
        if path.exists() && !force {
            return Err(ApiError::ConfigError(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        let content = Self::render(&EnvimixConfig::default())?;
        std::fs::write(&path, content).map_err(StorageError::IoError)?;
        info!(path = %path.display(), "Wrote workspace config");
        Ok(path)
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<EnvimixConfig, ApiError> {
        let config: EnvimixConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        debug!(
            validation_mode = %config.validation_mode,
            map_name_format = %config.map_name_format,
            "Configuration loaded"
        );
        Ok(config)
    }
}
