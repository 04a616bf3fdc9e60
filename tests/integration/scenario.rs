//! Two-vehicle table with a custom gate keyword

use envimix::document::{Block, Ident, Map, MapDocument};
use envimix::generator::{GenerationOptions, VariantGenerator};
use envimix::objective::{ObjectiveTimes, TimeInt32, ValidationMode};
use envimix::vehicle::{VehicleEntry, VehicleTable};

static ENTRIES: [VehicleEntry; 2] = [
    VehicleEntry::new("V1", Some("Alpha")),
    VehicleEntry::new("V2", Some("Beta")),
];

const TABLE: VehicleTable = VehicleTable::new("Gateway", "V1", &ENTRIES);

fn v1_map() -> Map {
    let mut map = Map::new("abcdefghijklmnopqrstuvwxyz", "Alpha Run");
    map.player_model = Some(Ident::new("V1", 10003, ""));
    map.blocks = vec![
        Block::new("GatewayAlpha_01", [0, 0, 0]),
        Block::new("Wall_02", [0, 0, 1]),
    ];
    map
}

fn options() -> GenerationOptions {
    GenerationOptions::empty()
        .with_vehicle("V1", true)
        .with_vehicle("V2", true)
}

#[test]
fn test_default_vehicle_is_skipped_and_gate_renamed() {
    let mut map = v1_map();
    let generator = VariantGenerator::with_table(TABLE, options());
    let mut variants = generator.generate(&mut map).unwrap();

    {
        let variant = variants.next_variant().unwrap().unwrap();
        assert_eq!(variant.vehicle.vehicle, "V2");
        assert_eq!(variant.document.blocks[0].name, "GatewayBeta_01");
        assert_eq!(variant.document.blocks[1].name, "Wall_02");
        assert_eq!(variant.document.player_model().unwrap().id, "V2");
        assert_eq!(variant.path, "Maps/Envimix/Alpha Run.V2.Map.Gbx");
    }
    assert!(variants.next_variant().is_none());

    assert_eq!(map.blocks[0].name, "GatewayAlpha_01");
    assert_eq!(map.player_model.as_ref().unwrap().id, "V1");
    assert_eq!(map, v1_map());
}

#[test]
fn test_include_default_emits_both_in_table_order() {
    let mut map = v1_map();
    let generator = VariantGenerator::with_table(TABLE, options().with_default_vehicle(true));
    let mut seen = Vec::new();
    let mut variants = generator.generate(&mut map).unwrap();
    while let Some(variant) = variants.next_variant() {
        let variant = variant.unwrap();
        seen.push((variant.vehicle.vehicle, variant.document.blocks[0].name.clone()));
    }
    assert_eq!(
        seen,
        vec![
            ("V1", "GatewayAlpha_01".to_string()),
            ("V2", "GatewayBeta_01".to_string())
        ]
    );
}

#[test]
fn test_policies_on_yielded_document() {
    let original = ObjectiveTimes {
        author: Some(TimeInt32(12_000)),
        gold: Some(TimeInt32(13_000)),
        silver: Some(TimeInt32(15_000)),
        bronze: Some(TimeInt32(18_000)),
    };
    let cases = [
        (ValidationMode::None, original),
        (ValidationMode::Fake, ObjectiveTimes::uniform(TimeInt32(i32::MAX))),
        (ValidationMode::Real, ObjectiveTimes::uniform(TimeInt32(-1))),
    ];

    for (mode, expected) in cases {
        let mut map = v1_map();
        map.objectives = original;
        let generator =
            VariantGenerator::with_table(TABLE, options().with_validation_mode(mode));
        let mut variants = generator.generate(&mut map).unwrap();
        {
            let variant = variants.next_variant().unwrap().unwrap();
            assert_eq!(variant.document.objectives, expected, "mode {}", mode);
        }
        assert!(variants.next_variant().is_none());
        assert_eq!(map.objectives, original, "mode {} must restore times", mode);
    }
}
