//! Shared map fixtures for integration tests

use envimix::document::{AnchoredObject, Block, Ident, Map};
use envimix::objective::{ObjectiveTimes, TimeInt32};
use std::path::{Path, PathBuf};

pub const SOURCE_UID: &str = "Sx4bq1Pr0TtQ7r9dJb5WfPz3Xk2";

/// Stadium map with one gate of every kind and a locked password
pub fn stadium_map() -> Map {
    let mut map = Map::new(SOURCE_UID, "$o$fa0Tri$fffCross");
    map.author_login = "xq1Nn3ZpRk2fW8a7JjYv0w".to_string();
    map.player_model = Some(Ident::new("CarSport", 10003, ""));
    map.password = Some("0e2a1c9f".to_string());
    map.objectives = ObjectiveTimes {
        author: Some(TimeInt32(38_412)),
        gold: Some(TimeInt32(41_000)),
        silver: Some(TimeInt32(47_000)),
        bronze: Some(TimeInt32(58_000)),
    };
    map.blocks = vec![
        Block::new("RoadTechStart", [20, 9, 20]),
        Block::new("GateGameplaySnow", [20, 9, 21]),
        Block::new("RoadTechStraight", [20, 9, 22]),
        Block::new("GateGameplayStadium", [20, 9, 23]),
        Block::new("RoadTechFinish", [20, 9, 24]),
    ];
    map.anchored_objects = vec![
        AnchoredObject::new(Ident::new("GateGameplayDesert32m", 26, "Nadeo"), [640.0, 72.0, 672.0]),
        AnchoredObject::new(Ident::new("Flag", 26, "Nadeo"), [600.0, 72.0, 672.0]),
        AnchoredObject::new(Ident::new("GateGameplayRally16m", 26, "Nadeo"), [700.0, 72.0, 672.0]),
    ];
    map
}

/// Write `map` as JSON at `dir/name`
pub fn write_map(dir: &Path, name: &str, map: &Map) -> PathBuf {
    let path = dir.join(name);
    map.save(&path).unwrap();
    path
}
