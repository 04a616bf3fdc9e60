//! End-to-end runs through the CLI route table

use super::test_utils::{stadium_map, write_map};
use envimix::cli::{Commands, RunContext};
use envimix::config::EnvimixConfig;
use envimix::document::{GameFamily, Map};
use envimix::error::{ApiError, GenerationError};
use envimix::objective::{ObjectiveTimes, TimeInt32, ValidationMode};
use std::path::PathBuf;
use tempfile::TempDir;

fn generate(inputs: Vec<PathBuf>, out: Option<PathBuf>, dry_run: bool) -> Commands {
    Commands::Generate {
        inputs,
        out,
        dry_run,
        validation: None,
        include_default: false,
        name_format: None,
        format: "json".to_string(),
    }
}

#[test]
fn test_generate_writes_variants_and_keeps_source() {
    let workspace = TempDir::new().unwrap();
    let source = write_map(workspace.path(), "tricross.json", &stadium_map());
    let before = std::fs::read(&source).unwrap();

    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let output = context
        .execute(&generate(vec![PathBuf::from("tricross.json")], Some(PathBuf::from("out")), false))
        .unwrap();

    let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(reports[0]["variants"].as_array().unwrap().len(), 3);

    let snow = workspace
        .path()
        .join("out/Maps/Envimix/TriCross.CarSnow.Map.Gbx");
    let variant = Map::load(&snow).unwrap();
    assert_eq!(variant.player_model.as_ref().unwrap().id, "CarSnow");
    assert_eq!(variant.blocks[3].name, "GateGameplaySnow");
    assert_eq!(variant.anchored_objects[0].item_model.id, "GateGameplaySnow32m");
    assert!(variant.password.is_none());

    let desert = Map::load(
        &workspace
            .path()
            .join("out/Maps/Envimix/TriCross.CarDesert.Map.Gbx"),
    )
    .unwrap();
    assert_eq!(desert.blocks[1].name, "GateGameplayDesert");
    assert_ne!(desert.map_uid, variant.map_uid);

    // the source file on disk is untouched
    assert_eq!(std::fs::read(&source).unwrap(), before);
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let workspace = TempDir::new().unwrap();
    write_map(workspace.path(), "tricross.json", &stadium_map());
    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let output = context
        .execute(&Commands::Generate {
            inputs: vec![PathBuf::from("tricross.json")],
            out: None,
            dry_run: true,
            validation: Some(ValidationMode::Real),
            include_default: true,
            name_format: Some("{1} - {0}".to_string()),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("Maps/Envimix/CarSport - TriCross.Map.Gbx"));
    assert!(output.contains("1 map(s), 4 variant(s)"));
    assert!(!workspace.path().join("Maps").exists());
}

#[test]
fn test_generate_walks_directories() {
    let workspace = TempDir::new().unwrap();
    let maps_dir = workspace.path().join("maps");
    write_map(&maps_dir, "a.json", &stadium_map());
    let mut other = stadium_map();
    other.map_name = "Second".to_string();
    write_map(&maps_dir.join("nested"), "b.json", &other);
    std::fs::write(maps_dir.join("notes.txt"), "not a map").unwrap();

    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let output = context
        .execute(&generate(vec![maps_dir], None, false))
        .unwrap();
    let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 2);
    assert!(workspace
        .path()
        .join("Maps/Envimix/Second.CarRally.Map.Gbx")
        .exists());
}

#[test]
fn test_generate_uses_config_validation_mode() {
    let workspace = TempDir::new().unwrap();
    write_map(workspace.path(), "tricross.json", &stadium_map());
    let config = EnvimixConfig {
        validation_mode: ValidationMode::Fake,
        ..EnvimixConfig::default()
    };
    let context = RunContext::with_config(workspace.path().to_path_buf(), config);
    context
        .execute(&generate(vec![PathBuf::from("tricross.json")], None, false))
        .unwrap();
    let variant =
        Map::load(&workspace.path().join("Maps/Envimix/TriCross.CarRally.Map.Gbx")).unwrap();
    assert_eq!(variant.objectives, ObjectiveTimes::uniform(TimeInt32::MAX));
}

#[test]
fn test_generate_rejects_unsupported_map() {
    let workspace = TempDir::new().unwrap();
    let mut map = stadium_map();
    map.game = GameFamily::ManiaPlanet;
    write_map(workspace.path(), "old.json", &map);
    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let err = context
        .execute(&generate(vec![PathBuf::from("old.json")], None, true))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Generation(GenerationError::UnsupportedDocument(_))
    ));
}

#[test]
fn test_empty_directory_is_an_error() {
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir(workspace.path().join("empty")).unwrap();
    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let err = context
        .execute(&generate(vec![PathBuf::from("empty")], None, true))
        .unwrap_err();
    assert!(matches!(err, ApiError::NoInput(_)));
}

#[test]
fn test_inspect_and_vehicles() {
    let workspace = TempDir::new().unwrap();
    write_map(workspace.path(), "tricross.json", &stadium_map());
    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());

    let output = context
        .execute(&Commands::Inspect {
            map: PathBuf::from("tricross.json"),
            format: "json".to_string(),
        })
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["plain_name"], "TriCross");
    assert_eq!(report["gates"].as_array().unwrap().len(), 4);
    assert_eq!(report["locked"], true);

    let output = context
        .execute(&Commands::Vehicles {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("CharacterPilot"));
    assert!(output.contains("Gate keyword: Gameplay"));
}

#[test]
fn test_maps_sharing_a_name_report_overwrites() {
    let workspace = TempDir::new().unwrap();
    let maps = workspace.path().join("maps");
    std::fs::create_dir_all(&maps).unwrap();
    write_map(&maps, "a.json", &stadium_map());
    write_map(&maps, "b.json", &stadium_map());

    let context = RunContext::with_config(workspace.path().to_path_buf(), EnvimixConfig::default());
    let output = context
        .execute(&generate(vec![PathBuf::from("maps")], Some(PathBuf::from("out")), false))
        .unwrap();

    let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(reports[0].get("overwritten").is_none());
    assert_eq!(reports[1]["overwritten"].as_array().unwrap().len(), 3);
}
