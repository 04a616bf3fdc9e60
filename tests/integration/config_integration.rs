//! Workspace configuration loading

use envimix::cli::{Commands, RunContext};
use envimix::config::{ConfigLoader, WORKSPACE_CONFIG_FILE};
use envimix::objective::ValidationMode;
use tempfile::TempDir;

#[test]
fn test_workspace_file_is_loaded() {
    let workspace = TempDir::new().unwrap();
    std::fs::write(
        workspace.path().join(WORKSPACE_CONFIG_FILE),
        r#"
validation_mode = "real"
generate_default_car_variant = true

[vehicles]
car_desert = false

[output]
directory = "mixed"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(workspace.path()).unwrap();
    assert_eq!(config.validation_mode, ValidationMode::Real);
    assert!(config.generate_default_car_variant);
    assert!(!config.vehicles.car_desert);
    assert!(config.vehicles.car_snow);
    assert_eq!(config.output.directory.to_string_lossy(), "mixed");
    assert_eq!(config.logging.level, "debug");

    let context = RunContext::new(workspace.path().to_path_buf(), None).unwrap();
    let options = context.config().generation_options().unwrap();
    assert!(!options.includes("CarDesert"));
    assert!(options.include_default_vehicle);
}

#[test]
fn test_explicit_config_path() {
    let workspace = TempDir::new().unwrap();
    let path = workspace.path().join("other.toml");
    std::fs::write(&path, "map_name_format = \"{0}/{1}\"\n").unwrap();
    let context = RunContext::new(workspace.path().to_path_buf(), Some(path)).unwrap();
    assert_eq!(context.config().map_name_format, "{0}/{1}");
}

#[test]
fn test_config_command_prints_and_initializes() {
    let workspace = TempDir::new().unwrap();
    let context = RunContext::new(workspace.path().to_path_buf(), None).unwrap();

    let printed = context
        .execute(&Commands::Config {
            init: false,
            force: false,
        })
        .unwrap();
    assert!(printed.contains("validation_mode = \"none\""));
    assert!(!workspace.path().join(WORKSPACE_CONFIG_FILE).exists());

    context
        .execute(&Commands::Config {
            init: true,
            force: false,
        })
        .unwrap();
    let reloaded = ConfigLoader::load(workspace.path()).unwrap();
    assert_eq!(reloaded.map_name_format, context.config().map_name_format);
    assert!(context
        .execute(&Commands::Config {
            init: true,
            force: false,
        })
        .is_err());
}
