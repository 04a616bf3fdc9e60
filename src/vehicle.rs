//! Vehicle/environment correspondence table
//!
//! Table order is significant: it is the iteration order of a generation
//! run and therefore the output order of variants. A vehicle without a
//! paired environment drives on the map's original gates.

use crate::document::Ident;

/// Collection id the game expects on a vehicle player model
pub const PLAYER_MODEL_COLLECTION: u32 = 10003;

/// One vehicle and the environment its gates belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleEntry {
    pub vehicle: &'static str,
    pub environment: Option<&'static str>,
}

impl VehicleEntry {
    pub const fn new(vehicle: &'static str, environment: Option<&'static str>) -> Self {
        Self {
            vehicle,
            environment,
        }
    }

    /// Player model identity a map gets when driven with this vehicle
    pub fn player_model(&self) -> Ident {
        Ident::new(self.vehicle, PLAYER_MODEL_COLLECTION, "")
    }
}

/// Ordered vehicle table plus the keyword that marks gate identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleTable {
    gate_keyword: &'static str,
    default_vehicle: &'static str,
    entries: &'static [VehicleEntry],
}

const TM2020_ENTRIES: &[VehicleEntry] = &[
    VehicleEntry::new("CarSport", Some("Stadium")),
    VehicleEntry::new("CarSnow", Some("Snow")),
    VehicleEntry::new("CarRally", Some("Rally")),
    VehicleEntry::new("CarDesert", Some("Desert")),
    VehicleEntry::new("CharacterPilot", None),
];

/// Trackmania (2020) vehicles
pub const TM2020: VehicleTable = VehicleTable::new("Gameplay", "CarSport", TM2020_ENTRIES);

impl VehicleTable {
    /// `default_vehicle` is assumed when a map has no player model set.
    pub const fn new(
        gate_keyword: &'static str,
        default_vehicle: &'static str,
        entries: &'static [VehicleEntry],
    ) -> Self {
        Self {
            gate_keyword,
            default_vehicle,
            entries,
        }
    }

    pub fn gate_keyword(&self) -> &'static str {
        self.gate_keyword
    }

    pub fn default_vehicle(&self) -> &'static str {
        self.default_vehicle
    }

    pub fn entries(&self) -> &'static [VehicleEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, vehicle: &str) -> Option<&'static VehicleEntry> {
        self.entries.iter().find(|e| e.vehicle == vehicle)
    }

    /// Known environments in table order, without duplicates
    pub fn environments(&self) -> Vec<&'static str> {
        let mut envs: Vec<&'static str> = Vec::with_capacity(self.entries.len());
        for env in self.entries.iter().filter_map(|e| e.environment) {
            if !envs.contains(&env) {
                envs.push(env);
            }
        }
        envs
    }
}

impl Default for VehicleTable {
    fn default() -> Self {
        TM2020
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tm2020_table_order() {
        let vehicles: Vec<&str> = TM2020.entries().iter().map(|e| e.vehicle).collect();
        assert_eq!(
            vehicles,
            vec!["CarSport", "CarSnow", "CarRally", "CarDesert", "CharacterPilot"]
        );
        assert_eq!(TM2020.environments(), vec!["Stadium", "Snow", "Rally", "Desert"]);
    }

    #[test]
    fn test_pilot_has_no_environment() {
        let pilot = TM2020.get("CharacterPilot").unwrap();
        assert_eq!(pilot.environment, None);
        assert!(TM2020.get("CarCanyon").is_none());
    }

    #[test]
    fn test_player_model_identity() {
        let model = TM2020.get("CarSnow").unwrap().player_model();
        assert_eq!(model.id, "CarSnow");
        assert_eq!(model.collection, 10003);
        assert!(model.author.is_empty());
    }

    #[test]
    fn test_environments_are_deduplicated() {
        static ENTRIES: [VehicleEntry; 3] = [
            VehicleEntry::new("A", Some("Alpha")),
            VehicleEntry::new("B", Some("Alpha")),
            VehicleEntry::new("C", None),
        ];
        let table = VehicleTable::new("Gateway", "A", &ENTRIES);
        assert_eq!(table.environments(), vec!["Alpha"]);
        assert_eq!(table.len(), 3);
    }
}
