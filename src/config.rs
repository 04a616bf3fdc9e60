//! Configuration System
//!
//! Layered configuration for the generator: built-in defaults, the user's
//! global config file, the workspace `envimix.toml` and `ENVIMIX__*`
//! environment variables, merged with the `config` crate.

use crate::error::GenerationError;
use crate::generator::GenerationOptions;
use crate::logging::LoggingConfig;
use crate::naming::{NameTemplate, DEFAULT_NAME_FORMAT};
use crate::objective::ValidationMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvimixConfig {
    /// Variant name template: `{0}` is the original name, `{1}` the vehicle
    #[serde(default = "default_map_name_format")]
    pub map_name_format: String,

    /// What happens to the medal times of a variant
    #[serde(default)]
    pub validation_mode: ValidationMode,

    /// Also generate the vehicle the map is already made for
    #[serde(default)]
    pub generate_default_car_variant: bool,

    /// Which vehicles get a variant
    #[serde(default)]
    pub vehicles: VehicleSelection,

    /// Where variants are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_map_name_format() -> String {
    DEFAULT_NAME_FORMAT.to_string()
}

/// Inclusion flag per TM2020 vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSelection {
    #[serde(default = "default_true")]
    pub car_sport: bool,
    #[serde(default = "default_true")]
    pub car_snow: bool,
    #[serde(default = "default_true")]
    pub car_rally: bool,
    #[serde(default = "default_true")]
    pub car_desert: bool,
    #[serde(default)]
    pub character_pilot: bool,
}

fn default_true() -> bool {
    true
}

impl Default for VehicleSelection {
    fn default() -> Self {
        Self {
            car_sport: true,
            car_snow: true,
            car_rally: true,
            car_desert: true,
            character_pilot: false,
        }
    }
}

impl VehicleSelection {
    /// `(vehicle id, included)` in table order
    pub fn flags(&self) -> [(&'static str, bool); 5] {
        [
            ("CarSport", self.car_sport),
            ("CarSnow", self.car_snow),
            ("CarRally", self.car_rally),
            ("CarDesert", self.car_desert),
            ("CharacterPilot", self.character_pilot),
        ]
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root the relative variant paths are resolved against
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

impl OutputConfig {
    /// Output directory, relative paths taken from `workspace_root`
    pub fn resolve(&self, workspace_root: &Path) -> PathBuf {
        if self.directory.is_absolute() {
            self.directory.clone()
        } else {
            workspace_root.join(&self.directory)
        }
    }
}

impl Default for EnvimixConfig {
    fn default() -> Self {
        Self {
            map_name_format: default_map_name_format(),
            validation_mode: ValidationMode::default(),
            generate_default_car_variant: false,
            vehicles: VehicleSelection::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    MapNameFormat(String),
    Output(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MapNameFormat(msg) => write!(f, "map_name_format: {}", msg),
            ValidationError::Output(msg) => write!(f, "output: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EnvimixConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = NameTemplate::parse(&self.map_name_format) {
            errors.push(ValidationError::MapNameFormat(e.to_string()));
        }
        if self.output.directory.as_os_str().is_empty() {
            errors.push(ValidationError::Output(
                "directory cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Generator options described by this configuration
    pub fn generation_options(&self) -> Result<GenerationOptions, GenerationError> {
        let mut options = GenerationOptions::empty()
            .with_name_template(NameTemplate::parse(&self.map_name_format)?)
            .with_validation_mode(self.validation_mode)
            .with_default_vehicle(self.generate_default_car_variant);
        for (vehicle, include) in self.vehicles.flags() {
            options = options.with_vehicle(vehicle, include);
        }
        Ok(options)
    }
}
