//! Save files: the whole game state as pretty-printed JSON

use crate::error::GameError;
use crate::ledger::ResourceLedger;
use raid_core::RaidLadder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use warband_core::{Equipment, Unit};

/// Everything needed to rebuild a [`crate::Game`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub day: u32,
    pub resources: ResourceLedger,
    #[serde(default)]
    pub raid_cooldown: u32,
    /// Id the next created unit receives
    #[serde(default = "default_next_unit_id")]
    pub next_unit_id: u64,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub inventory: Vec<Equipment>,
    /// Older saves have no ladder; a fresh one is rolled on restore
    #[serde(default)]
    pub ladder: Option<RaidLadder>,
}

fn default_next_unit_id() -> u64 {
    1
}

impl GameSnapshot {
    /// Reject snapshots whose units share an id
    pub fn validate(&self) -> Result<(), GameError> {
        let mut seen = HashSet::with_capacity(self.units.len());
        for unit in &self.units {
            if !seen.insert(unit.id) {
                return Err(GameError::DuplicateUnit(unit.id));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), day = self.day, "game saved");
        Ok(())
    }

    /// Read a save file; a missing file is [`GameError::SaveNotFound`]
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GameError::SaveNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot = Self::from_json(&content)?;
        info!(path = %path.display(), day = snapshot.day, "game loaded");
        Ok(snapshot)
    }
}
