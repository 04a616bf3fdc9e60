//! Variant generation
//!
//! [`VariantGenerator::generate`] turns one mutable map into a lazy,
//! single-pass sequence of variants. Every variant is the *same* document,
//! rewritten in place for the next vehicle just before it is handed out:
//!
//! 1. a [`Snapshot`] of the map is captured when the sequence is created;
//! 2. each [`Variants::next_variant`] call rewrites player model, UID, name,
//!    gates and objective times for the next included vehicle, unlocks the
//!    map and lends it out together with its output path;
//! 3. the call that finds the table exhausted restores the snapshot and
//!    returns `None`.
//!
//! A variant borrows the sequence, so it has to be consumed (written out)
//! before the next one can be requested. Dropping the sequence before it is
//! exhausted leaves the map rewritten; use [`Variants::finish`] when early
//! termination must also restore, or [`Variants::into_owned`] to receive
//! independent clones through a regular [`Iterator`].

use crate::document::MapDocument;
use crate::error::GenerationError;
use crate::gates::GateMatcher;
use crate::naming::{self, NameTemplate};
use crate::objective::ValidationMode;
use crate::snapshot::Snapshot;
use crate::uid;
use crate::vehicle::{VehicleEntry, VehicleTable, TM2020};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Per-run settings of the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Variant name, from the original name and the vehicle id
    pub name_template: NameTemplate,
    /// Inclusion flag per vehicle id. Vehicles missing here are skipped.
    pub included: BTreeMap<String, bool>,
    pub validation_mode: ValidationMode,
    /// Also emit a variant for the vehicle the map already uses
    pub include_default_vehicle: bool,
}

impl GenerationOptions {
    pub fn includes(&self, vehicle: &str) -> bool {
        self.included.get(vehicle).copied().unwrap_or(false)
    }

    pub fn with_vehicle(mut self, vehicle: impl Into<String>, include: bool) -> Self {
        self.included.insert(vehicle.into(), include);
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_default_vehicle(mut self, include: bool) -> Self {
        self.include_default_vehicle = include;
        self
    }

    pub fn with_name_template(mut self, template: NameTemplate) -> Self {
        self.name_template = template;
        self
    }

    /// Options with no vehicle included
    pub fn empty() -> Self {
        Self {
            name_template: NameTemplate::default(),
            included: BTreeMap::new(),
            validation_mode: ValidationMode::None,
            include_default_vehicle: false,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::empty()
            .with_vehicle("CarSport", true)
            .with_vehicle("CarSnow", true)
            .with_vehicle("CarRally", true)
            .with_vehicle("CarDesert", true)
            .with_vehicle("CharacterPilot", false)
    }
}

/// Produces vehicle variants of maps
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    table: VehicleTable,
    gates: GateMatcher,
    options: GenerationOptions,
}

impl VariantGenerator {
    /// Generator over the TM2020 vehicle table
    pub fn new(options: GenerationOptions) -> Self {
        Self::with_table(TM2020, options)
    }

    pub fn with_table(table: VehicleTable, options: GenerationOptions) -> Self {
        Self {
            gates: GateMatcher::new(&table),
            table,
            options,
        }
    }

    pub fn table(&self) -> &VehicleTable {
        &self.table
    }

    pub fn gates(&self) -> &GateMatcher {
        &self.gates
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Vehicle the map is currently driven with, or the table's fallback
    pub fn default_vehicle<D: MapDocument + ?Sized>(&self, document: &D) -> String {
        document
            .player_model()
            .map(|model| model.id.as_str())
            .filter(|id| !id.is_empty())
            .unwrap_or(self.table.default_vehicle())
            .to_string()
    }

    fn emits(&self, entry: &VehicleEntry, default_vehicle: &str) -> bool {
        if !self.options.includes(entry.vehicle) {
            return false;
        }
        self.options.include_default_vehicle || entry.vehicle != default_vehicle
    }

    /// Vehicles a run over `document` would emit, in output order
    pub fn planned_vehicles<D: MapDocument + ?Sized>(&self, document: &D) -> Vec<&'static str> {
        let default_vehicle = self.default_vehicle(document);
        self.table
            .entries()
            .iter()
            .filter(|entry| self.emits(entry, &default_vehicle))
            .map(|entry| entry.vehicle)
            .collect()
    }

    /// Start a generation run over `document`.
    ///
    /// Fails before touching the document when it is of an unsupported
    /// family, or when its UID is too short to derive variant UIDs from.
    pub fn generate<'g, 'd, D: MapDocument + ?Sized>(
        &'g self,
        document: &'d mut D,
    ) -> Result<Variants<'g, 'd, D>, GenerationError> {
        if !document.is_supported_family() {
            return Err(GenerationError::UnsupportedDocument(
                "only TM2020 maps can be mixed".to_string(),
            ));
        }

        let default_vehicle = self.default_vehicle(&*document);
        let planned = self
            .table
            .entries()
            .iter()
            .filter(|entry| self.emits(entry, &default_vehicle))
            .count();
        if planned > 0 {
            uid::source_fragment(document.map_uid())?;
        }

        let snapshot = Snapshot::capture(&*document, &self.gates);
        debug!(
            map_uid = %snapshot.map_uid,
            default_vehicle = %default_vehicle,
            planned,
            block_gates = snapshot.block_gates.len(),
            object_gates = snapshot.object_gates.len(),
            "Captured map snapshot"
        );

        Ok(Variants {
            generator: self,
            document,
            snapshot,
            default_vehicle,
            state: State::Pending { next: 0 },
        })
    }
}

/// One generated variant, lent out until the next step
#[derive(Debug)]
pub struct Variant<'a, D: ?Sized> {
    pub document: &'a D,
    pub vehicle: &'static VehicleEntry,
    /// Output path relative to the user folder, e.g. `Maps/Envimix/Name.CarSnow.Map.Gbx`
    pub path: String,
}

/// Variant holding its own copy of the document
#[derive(Debug, Clone)]
pub struct OwnedVariant<D> {
    pub document: D,
    pub vehicle: &'static VehicleEntry,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Next table index to look at
    Pending { next: usize },
    /// Exhausted and restored
    Finished,
    /// Stopped by an error, document left as is
    Faulted,
}

/// Lazy sequence of variants over one mutably borrowed map
pub struct Variants<'g, 'd, D: MapDocument + ?Sized> {
    generator: &'g VariantGenerator,
    document: &'d mut D,
    snapshot: Snapshot,
    default_vehicle: String,
    state: State,
}

impl<'g, 'd, D: MapDocument + ?Sized> Variants<'g, 'd, D> {
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn default_vehicle(&self) -> &str {
        &self.default_vehicle
    }

    /// Whether the sequence is exhausted and the map restored
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Rewrite the map for the next included vehicle and lend it out.
    ///
    /// Returns `None` once the table is exhausted; that call restores the
    /// map. After an error the sequence is over and the map is left as the
    /// failing step found it.
    pub fn next_variant(&mut self) -> Option<Result<Variant<'_, D>, GenerationError>> {
        let State::Pending { next } = self.state else {
            return None;
        };

        let entries = self.generator.table.entries();
        let mut index = next;
        while let Some(entry) = entries.get(index) {
            index += 1;
            if !self.generator.emits(entry, &self.default_vehicle) {
                debug!(vehicle = entry.vehicle, "Skipping vehicle");
                continue;
            }

            self.state = State::Pending { next: index };
            return match self.rewrite(entry) {
                Ok(path) => {
                    info!(vehicle = entry.vehicle, path = %path, "Generated variant");
                    Some(Ok(Variant {
                        document: &*self.document,
                        vehicle: entry,
                        path,
                    }))
                }
                Err(e) => {
                    warn!(vehicle = entry.vehicle, error = %e, "Variant generation failed");
                    self.state = State::Faulted;
                    Some(Err(e))
                }
            };
        }

        match self.restore() {
            Ok(()) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn rewrite(&mut self, entry: &'static VehicleEntry) -> Result<String, GenerationError> {
        let generator = self.generator;
        let options = &generator.options;
        let document = &mut *self.document;

        document.set_player_model(Some(entry.player_model()));
        document.set_map_uid(uid::derive_uid(&self.snapshot.map_uid)?);
        document.set_map_name(
            options
                .name_template
                .render(&self.snapshot.map_name, entry.vehicle),
        );

        match entry.environment {
            Some(environment) => {
                // rename from the captured identifiers, not the previous variant's
                self.snapshot.restore_gates(document, &generator.gates)?;
                generator.gates.rename_all(document, environment);
            }
            None => self.snapshot.restore_gates(document, &generator.gates)?,
        }

        let mut times = document.objective_times();
        options.validation_mode.apply(&mut times);
        document.set_objective_times(times);

        document.unlock();

        Ok(naming::output_path(document.map_name()))
    }

    fn restore(&mut self) -> Result<(), GenerationError> {
        match self
            .snapshot
            .restore(&mut *self.document, &self.generator.gates)
        {
            Ok(()) => {
                self.state = State::Finished;
                info!(map_uid = %self.snapshot.map_uid, "Restored source map");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to restore source map");
                self.state = State::Faulted;
                Err(e)
            }
        }
    }

    /// End the run now and restore the map, whether or not it was exhausted.
    ///
    /// A faulted run is not repaired.
    pub fn finish(mut self) -> Result<(), GenerationError> {
        match self.state {
            State::Pending { .. } => self.restore(),
            State::Finished | State::Faulted => Ok(()),
        }
    }

    /// Iterate over independent clones of each variant
    pub fn into_owned(self) -> OwnedVariants<'g, 'd, D>
    where
        D: Clone + Sized,
    {
        OwnedVariants { inner: self }
    }
}

/// [`Iterator`] over cloned variants. The source map is restored once it returns `None`.
pub struct OwnedVariants<'g, 'd, D: MapDocument + Clone> {
    inner: Variants<'g, 'd, D>,
}

impl<'g, 'd, D: MapDocument + Clone> OwnedVariants<'g, 'd, D> {
    /// End the run now and restore the map
    pub fn finish(self) -> Result<(), GenerationError> {
        self.inner.finish()
    }
}

impl<'g, 'd, D: MapDocument + Clone> Iterator for OwnedVariants<'g, 'd, D> {
    type Item = Result<OwnedVariant<D>, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_variant().map(|result| {
            result.map(|variant| OwnedVariant {
                document: variant.document.clone(),
                vehicle: variant.vehicle,
                path: variant.path,
            })
        })
    }
}
