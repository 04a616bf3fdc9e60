//! Workspace config file source: <workspace>/envimix.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};

/// File name looked up in the workspace root
pub const WORKSPACE_CONFIG_FILE: &str = "envimix.toml";

/// Location of the workspace config file
pub fn path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_CONFIG_FILE)
}

/// Add the workspace config file to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = path(workspace_root);
    if !path.exists() {
        return Ok(builder);
    }
    Ok(builder.add_source(
        File::from(path.as_path())
            .format(FileFormat::Toml)
            .required(false),
    ))
}
