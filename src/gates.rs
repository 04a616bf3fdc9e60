//! Gate identifiers
//!
//! A gate is a block or item whose identifier contains `<keyword><Env>` for
//! one of the table's environments, e.g. `GateGameplaySnow` or
//! `GateGameplayDesert32m`. Renaming swaps only that fragment; everything
//! else in the identifier is kept byte for byte.

use crate::document::{GateCollection, MapDocument};
use crate::error::GenerationError;
use crate::vehicle::VehicleTable;
use tracing::debug;

/// Recognizes and rewrites gate identifiers for one vehicle table
#[derive(Debug, Clone)]
pub struct GateMatcher {
    keyword: &'static str,
    /// `(environment, "<keyword><environment>")` in table order
    patterns: Vec<(&'static str, String)>,
}

impl GateMatcher {
    pub fn new(table: &VehicleTable) -> Self {
        let keyword = table.gate_keyword();
        let patterns = table
            .environments()
            .into_iter()
            .map(|env| (env, format!("{}{}", keyword, env)))
            .collect();
        Self { keyword, patterns }
    }

    pub fn is_gate(&self, identifier: &str) -> bool {
        self.environment_of(identifier).is_some()
    }

    /// First environment, in table order, whose gate fragment occurs in `identifier`
    pub fn environment_of(&self, identifier: &str) -> Option<&'static str> {
        if !identifier.contains(self.keyword) {
            return None;
        }
        self.patterns
            .iter()
            .find(|(_, pattern)| identifier.contains(pattern.as_str()))
            .map(|(env, _)| *env)
    }

    /// Identifier moved to `target`, or `None` when it is not a gate.
    ///
    /// Only the fragment of the first matching environment is replaced, so an
    /// identifier never gets rewritten twice within one rename.
    pub fn renamed(&self, identifier: &str, target: &str) -> Option<String> {
        let env = self.environment_of(identifier)?;
        let from = format!("{}{}", self.keyword, env);
        let to = format!("{}{}", self.keyword, target);
        Some(identifier.replace(&from, &to))
    }

    /// Current gate identifiers of one collection, in stored order
    pub fn capture<D: MapDocument + ?Sized>(
        &self,
        document: &D,
        collection: GateCollection,
    ) -> Vec<String> {
        document
            .identifiers(collection)
            .filter(|id| self.is_gate(id))
            .map(str::to_string)
            .collect()
    }

    /// Move every gate of the document to `target`. Returns how many identifiers changed.
    pub fn rename_all<D: MapDocument + ?Sized>(&self, document: &mut D, target: &str) -> usize {
        let mut changed = 0;
        for collection in GateCollection::ALL {
            for identifier in document.identifiers_mut(collection) {
                if let Some(renamed) = self.renamed(identifier, target) {
                    if renamed != *identifier {
                        *identifier = renamed;
                        changed += 1;
                    }
                }
            }
        }
        debug!(target_env = target, changed, "Renamed gates");
        changed
    }

    /// Fails when the number of live gates of `collection` differs from `captured`
    pub fn check<D: MapDocument + ?Sized>(
        &self,
        document: &D,
        collection: GateCollection,
        captured: &[String],
    ) -> Result<(), GenerationError> {
        let live = document
            .identifiers(collection)
            .filter(|id| self.is_gate(id))
            .count();
        if live != captured.len() {
            return Err(GenerationError::InvariantViolation {
                collection,
                live,
                captured: captured.len(),
            });
        }
        Ok(())
    }

    /// Overwrite the live gates of `collection` positionally with `captured`.
    ///
    /// The number of live gates must equal `captured.len()`; otherwise nothing
    /// is written and an invariant violation is returned.
    pub fn restore<D: MapDocument + ?Sized>(
        &self,
        document: &mut D,
        collection: GateCollection,
        captured: &[String],
    ) -> Result<(), GenerationError> {
        self.check(&*document, collection, captured)?;

        let mut originals = captured.iter();
        for identifier in document.identifiers_mut(collection) {
            if !self.is_gate(identifier) {
                continue;
            }
            if let Some(original) = originals.next() {
                if *identifier != *original {
                    identifier.clone_from(original);
                }
            }
        }
        Ok(())
    }
}
