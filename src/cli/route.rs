//! CLI route: single route table and run context. Dispatches to library services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_generate_json, format_generate_text, format_inspect_json, format_inspect_text,
    format_vehicles_json, format_vehicles_text, GenerateReport, InspectReport,
};
use crate::config::{ConfigLoader, EnvimixConfig};
use crate::document::Map;
use crate::error::{ApiError, StorageError};
use crate::generator::{GenerationOptions, VariantGenerator};
use crate::naming::NameTemplate;
use crate::objective::ValidationMode;
use crate::sink::{drain_into, DirectorySink, DryRunSink};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Extension of map files accepted from directories
const MAP_FILE_EXTENSION: &str = "json";

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: EnvimixConfig,
}

/// Command-line overrides for a generate run
struct GenerateOverrides<'a> {
    validation: Option<ValidationMode>,
    include_default: bool,
    name_format: Option<&'a str>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: EnvimixConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &EnvimixConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                inputs,
                out,
                dry_run,
                validation,
                include_default,
                name_format,
                format,
            } => {
                let overrides = GenerateOverrides {
                    validation: *validation,
                    include_default: *include_default,
                    name_format: name_format.as_deref(),
                };
                let reports = self.handle_generate(inputs, out.as_deref(), *dry_run, &overrides)?;
                if format == "json" {
                    format_generate_json(&reports)
                } else {
                    Ok(format_generate_text(&reports))
                }
            }
            Commands::Inspect { map, format } => {
                let generator = VariantGenerator::new(self.config.generation_options()?);
                let map = Map::load(&self.resolve(map))?;
                let report = InspectReport::build(&map, &generator);
                if format == "json" {
                    format_inspect_json(&report)
                } else {
                    Ok(format_inspect_text(&report))
                }
            }
            Commands::Vehicles { format } => {
                let generator = VariantGenerator::new(self.config.generation_options()?);
                if format == "json" {
                    format_vehicles_json(&generator)
                } else {
                    Ok(format_vehicles_text(&generator))
                }
            }
            Commands::Config { init: false, .. } => ConfigLoader::render(&self.config),
            Commands::Config { init: true, force } => {
                let path = ConfigLoader::write_workspace_file(&self.workspace_root, *force)?;
                Ok(format!("Wrote {}", path.display()))
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn generation_options(
        &self,
        overrides: &GenerateOverrides<'_>,
    ) -> Result<GenerationOptions, ApiError> {
        let mut options = self.config.generation_options()?;
        if let Some(mode) = overrides.validation {
            options = options.with_validation_mode(mode);
        }
        if overrides.include_default {
            options = options.with_default_vehicle(true);
        }
        if let Some(format) = overrides.name_format {
            options = options.with_name_template(NameTemplate::parse(format)?);
        }
        Ok(options)
    }

    /// Map files named by `inputs`; directories are searched recursively, sorted by path
    fn collect_maps(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ApiError> {
        let mut maps = Vec::new();
        for input in inputs {
            let input = self.resolve(input);
            if !input.is_dir() {
                maps.push(input);
                continue;
            }

            let mut found = Vec::new();
            for entry in WalkDir::new(&input).follow_links(false) {
                let entry = entry.map_err(|e| {
                    StorageError::IoError(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to walk directory: {}", e),
                    ))
                })?;
                let path = entry.path();
                if entry.file_type().is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(MAP_FILE_EXTENSION)
                {
                    found.push(path.to_path_buf());
                }
            }
            if found.is_empty() {
                return Err(ApiError::NoInput(input));
            }
            found.sort();
            maps.extend(found);
        }
        Ok(maps)
    }

    fn handle_generate(
        &self,
        inputs: &[PathBuf],
        out: Option<&Path>,
        dry_run: bool,
        overrides: &GenerateOverrides<'_>,
    ) -> Result<Vec<GenerateReport>, ApiError> {
        let generator = VariantGenerator::new(self.generation_options(overrides)?);
        let maps = self.collect_maps(inputs)?;

        let output_root = match out {
            Some(dir) => self.resolve(dir),
            None => self.config.output.resolve(&self.workspace_root),
        };
        let output_root = if dry_run {
            None
        } else {
            std::fs::create_dir_all(&output_root).map_err(StorageError::IoError)?;
            Some(dunce::canonicalize(&output_root).map_err(StorageError::IoError)?)
        };

        // one sink for the whole run, so maps sharing a name are noticed
        let mut sink = output_root.as_ref().map(|root| DirectorySink::new(root));
        let mut reports = Vec::with_capacity(maps.len());
        for source in maps {
            debug!(source = %source.display(), "Loading map");
            let mut map = Map::load(&source)?;
            let variants = generator.generate(&mut map)?;
            let (paths, overwritten) = match sink.as_mut() {
                Some(sink) => {
                    let seen = sink.overwritten().len();
                    let paths = drain_into(variants, sink)?;
                    (paths, sink.overwritten()[seen..].to_vec())
                }
                None => (drain_into(variants, &mut DryRunSink::default())?, Vec::new()),
            };
            info!(source = %source.display(), variants = paths.len(), "Map mixed");
            reports.push(GenerateReport {
                source,
                output_root: output_root.clone(),
                variants: paths,
                overwritten,
            });
        }
        Ok(reports)
    }
}
