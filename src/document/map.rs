//! In-memory map model with a JSON interchange form

use crate::document::{GateCollection, Ident, MapDocument};
use crate::error::StorageError;
use crate::objective::ObjectiveTimes;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Game generation a map was saved by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameFamily {
    TmForever,
    ManiaPlanet,
    Tm2020,
}

/// Placed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    #[serde(default)]
    pub coord: [i32; 3],
}

impl Block {
    pub fn new(name: impl Into<String>, coord: [i32; 3]) -> Self {
        Self {
            name: name.into(),
            coord,
        }
    }
}

/// Item placed freely in the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchoredObject {
    pub item_model: Ident,
    #[serde(default)]
    pub position: [f32; 3],
}

impl AnchoredObject {
    pub fn new(item_model: Ident, position: [f32; 3]) -> Self {
        Self {
            item_model,
            position,
        }
    }
}

/// Map document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub game: GameFamily,
    pub map_uid: String,
    pub map_name: String,
    #[serde(default)]
    pub author_login: String,
    #[serde(default)]
    pub player_model: Option<Ident>,
    #[serde(default)]
    pub objectives: ObjectiveTimes,
    /// Hashed edit password, if the map is locked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub anchored_objects: Vec<AnchoredObject>,
}

impl Map {
    /// Create an empty TM2020 map
    pub fn new(map_uid: impl Into<String>, map_name: impl Into<String>) -> Self {
        Self {
            game: GameFamily::Tm2020,
            map_uid: map_uid.into(),
            map_name: map_name.into(),
            author_login: String::new(),
            player_model: None,
            objectives: ObjectiveTimes::default(),
            password: None,
            blocks: Vec::new(),
            anchored_objects: Vec::new(),
        }
    }

    /// Load a map from its JSON form
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a map in its JSON form, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self).map_err(|source| StorageError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl MapDocument for Map {
    fn is_supported_family(&self) -> bool {
        self.game == GameFamily::Tm2020
    }

    fn player_model(&self) -> Option<&Ident> {
        self.player_model.as_ref()
    }

    fn set_player_model(&mut self, model: Option<Ident>) {
        self.player_model = model;
    }

    fn map_name(&self) -> &str {
        &self.map_name
    }

    fn set_map_name(&mut self, name: String) {
        self.map_name = name;
    }

    fn map_uid(&self) -> &str {
        &self.map_uid
    }

    fn set_map_uid(&mut self, uid: String) {
        self.map_uid = uid;
    }

    fn objective_times(&self) -> ObjectiveTimes {
        self.objectives
    }

    fn set_objective_times(&mut self, times: ObjectiveTimes) {
        self.objectives = times;
    }

    fn identifiers(&self, collection: GateCollection) -> Box<dyn Iterator<Item = &str> + '_> {
        match collection {
            GateCollection::Blocks => Box::new(self.blocks.iter().map(|b| b.name.as_str())),
            GateCollection::Objects => Box::new(
                self.anchored_objects
                    .iter()
                    .map(|o| o.item_model.id.as_str()),
            ),
        }
    }

    fn identifiers_mut(
        &mut self,
        collection: GateCollection,
    ) -> Box<dyn Iterator<Item = &mut String> + '_> {
        match collection {
            GateCollection::Blocks => Box::new(self.blocks.iter_mut().map(|b| &mut b.name)),
            GateCollection::Objects => Box::new(
                self.anchored_objects
                    .iter_mut()
                    .map(|o| &mut o.item_model.id),
            ),
        }
    }

    fn unlock(&mut self) {
        self.password = None;
    }
}
