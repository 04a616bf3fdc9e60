//! Map document abstraction
//!
//! The generator never owns a map. It drives any type implementing
//! [`MapDocument`] through a narrow set of accessors: player identity, name,
//! UID, objective times and the ordered identifier collections that can
//! carry gate names.

pub mod map;

use crate::objective::ObjectiveTimes;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use map::{AnchoredObject, Block, GameFamily, Map};

/// Identifier triple used by the game for models (vehicles, items).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub id: String,
    #[serde(default)]
    pub collection: u32,
    #[serde(default)]
    pub author: String,
}

impl Ident {
    pub fn new(id: impl Into<String>, collection: u32, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            collection,
            author: author.into(),
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:?})", self.id, self.collection, self.author)
    }
}

/// Document collections whose identifiers may encode gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateCollection {
    /// Block names
    Blocks,
    /// Item model ids of anchored objects
    Objects,
}

impl GateCollection {
    pub const ALL: [GateCollection; 2] = [GateCollection::Blocks, GateCollection::Objects];
}

impl fmt::Display for GateCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateCollection::Blocks => write!(f, "blocks"),
            GateCollection::Objects => write!(f, "anchored objects"),
        }
    }
}

/// Mutable map the variant generator works on.
///
/// Identifier iterators must yield in the collection's stored order, and the
/// order must not change while a generation run is in progress.
pub trait MapDocument {
    /// Whether the document belongs to the game/version family the generator supports.
    fn is_supported_family(&self) -> bool;

    fn player_model(&self) -> Option<&Ident>;
    fn set_player_model(&mut self, model: Option<Ident>);

    fn map_name(&self) -> &str;
    fn set_map_name(&mut self, name: String);

    fn map_uid(&self) -> &str;
    fn set_map_uid(&mut self, uid: String);

    fn objective_times(&self) -> ObjectiveTimes;
    fn set_objective_times(&mut self, times: ObjectiveTimes);

    /// Identifiers of one collection, in stored order.
    fn identifiers(&self, collection: GateCollection) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Mutable identifiers of one collection, in stored order.
    fn identifiers_mut(
        &mut self,
        collection: GateCollection,
    ) -> Box<dyn Iterator<Item = &mut String> + '_>;

    /// Remove password protection. Calling it on an unlocked map is a no-op.
    fn unlock(&mut self);
}
