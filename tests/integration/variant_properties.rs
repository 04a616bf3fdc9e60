//! Output count, UID and gate correspondence over the TM2020 table

use super::test_utils::{stadium_map, SOURCE_UID};
use envimix::document::{GateCollection, MapDocument};
use envimix::gates::GateMatcher;
use envimix::generator::{GenerationOptions, VariantGenerator};
use envimix::sink::{drain_into, DryRunSink};
use envimix::uid::UID_SUFFIX;
use envimix::vehicle::TM2020;
use std::collections::HashSet;

#[test]
fn test_uids_are_distinct_and_traceable() {
    let mut map = stadium_map();
    let generator = VariantGenerator::new(
        GenerationOptions::default()
            .with_vehicle("CharacterPilot", true)
            .with_default_vehicle(true),
    );
    let mut uids = Vec::new();
    let mut variants = generator.generate(&mut map).unwrap();
    while let Some(variant) = variants.next_variant() {
        uids.push(variant.unwrap().document.map_uid().to_string());
    }

    assert_eq!(uids.len(), 5);
    let unique: HashSet<&String> = uids.iter().collect();
    assert_eq!(unique.len(), uids.len());
    for uid in &uids {
        assert_eq!(&uid[10..20], &SOURCE_UID[9..19]);
        assert!(uid.ends_with(UID_SUFFIX));
    }
    assert_eq!(map.map_uid, SOURCE_UID);
}

#[test]
fn test_gate_correspondence_per_vehicle() {
    let source = stadium_map();
    let gates = GateMatcher::new(&TM2020);
    let mut map = source.clone();
    let generator =
        VariantGenerator::new(GenerationOptions::default().with_vehicle("CharacterPilot", true));
    let mut variants = generator.generate(&mut map).unwrap();

    while let Some(variant) = variants.next_variant() {
        let variant = variant.unwrap();
        let doc = variant.document;
        for collection in GateCollection::ALL {
            let before: Vec<&str> = source.identifiers(collection).collect();
            let after: Vec<&str> = doc.identifiers(collection).collect();
            assert_eq!(before.len(), after.len());
            for (old, new) in before.iter().zip(after.iter()) {
                match (gates.is_gate(old), variant.vehicle.environment) {
                    (false, _) => assert_eq!(old, new),
                    (true, Some(env)) => {
                        let tag = format!("Gameplay{}", env);
                        assert!(new.contains(&tag), "{} -> {}", old, new);
                        assert_eq!(Some(new.to_string()), gates.renamed(old, env));
                    }
                    (true, None) => assert_eq!(old, new),
                }
            }
        }
    }
}

#[test]
fn test_output_count_matches_inclusion() {
    let map = stadium_map();
    let cases = [
        (GenerationOptions::default(), 3),
        (GenerationOptions::default().with_default_vehicle(true), 4),
        (GenerationOptions::default().with_vehicle("CharacterPilot", true), 4),
        (GenerationOptions::empty(), 0),
        (GenerationOptions::empty().with_vehicle("CarSport", true), 0),
    ];
    for (options, expected) in cases {
        let mut copy = map.clone();
        let generator = VariantGenerator::new(options);
        let variants = generator.generate(&mut copy).unwrap();
        let paths = drain_into(variants, &mut DryRunSink::default()).unwrap();
        assert_eq!(paths.len(), expected);
    }
}

#[test]
fn test_output_paths() {
    let mut map = stadium_map();
    let generator = VariantGenerator::new(GenerationOptions::default());
    let variants = generator.generate(&mut map).unwrap();
    let paths = drain_into(variants, &mut DryRunSink::default()).unwrap();
    assert_eq!(
        paths,
        vec![
            "Maps/Envimix/TriCross.CarSnow.Map.Gbx",
            "Maps/Envimix/TriCross.CarRally.Map.Gbx",
            "Maps/Envimix/TriCross.CarDesert.Map.Gbx",
        ]
    );
}
