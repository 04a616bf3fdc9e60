//! Pre-generation state of a map document
//!
//! A [`Snapshot`] is taken once at the start of a generation run and is
//! never modified afterwards. Its gate lists are aligned with the stored
//! order of the document's collections at capture time.

use crate::document::{GateCollection, Ident, MapDocument};
use crate::error::GenerationError;
use crate::gates::GateMatcher;
use crate::objective::ObjectiveTimes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub player_model: Option<Ident>,
    pub map_name: String,
    pub map_uid: String,
    pub objective_times: ObjectiveTimes,
    pub block_gates: Vec<String>,
    pub object_gates: Vec<String>,
}

impl Snapshot {
    pub fn capture<D: MapDocument + ?Sized>(document: &D, gates: &GateMatcher) -> Self {
        Self {
            player_model: document.player_model().cloned(),
            map_name: document.map_name().to_string(),
            map_uid: document.map_uid().to_string(),
            objective_times: document.objective_times(),
            block_gates: gates.capture(document, GateCollection::Blocks),
            object_gates: gates.capture(document, GateCollection::Objects),
        }
    }

    pub fn gates(&self, collection: GateCollection) -> &[String] {
        match collection {
            GateCollection::Blocks => &self.block_gates,
            GateCollection::Objects => &self.object_gates,
        }
    }

    /// Verify the live gate counts of every collection against the capture.
    pub fn check_gates<D: MapDocument + ?Sized>(
        &self,
        document: &D,
        gates: &GateMatcher,
    ) -> Result<(), GenerationError> {
        for collection in GateCollection::ALL {
            gates.check(document, collection, self.gates(collection))?;
        }
        Ok(())
    }

    /// Put the captured gate identifiers back, leaving everything else alone.
    ///
    /// Every collection is checked before any of them is written.
    pub fn restore_gates<D: MapDocument + ?Sized>(
        &self,
        document: &mut D,
        gates: &GateMatcher,
    ) -> Result<(), GenerationError> {
        self.check_gates(&*document, gates)?;
        for collection in GateCollection::ALL {
            gates.restore(document, collection, self.gates(collection))?;
        }
        Ok(())
    }

    /// Return the document to its captured state.
    ///
    /// On a gate count mismatch the document is left untouched.
    pub fn restore<D: MapDocument + ?Sized>(
        &self,
        document: &mut D,
        gates: &GateMatcher,
    ) -> Result<(), GenerationError> {
        self.check_gates(&*document, gates)?;
        document.set_player_model(self.player_model.clone());
        document.set_map_name(self.map_name.clone());
        document.set_map_uid(self.map_uid.clone());
        document.set_objective_times(self.objective_times);
        self.restore_gates(document, gates)
    }
}
