use gear_core::{GearError, Slot, StatKind};
use raid_core::RaidError;
use std::path::PathBuf;
use thiserror::Error;
use warband_core::{CombatError, ResourceBundle, UnitId};

/// Broad class of a [`GameError`]
///
/// Every kind is recoverable; a failed operation leaves the game unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad request: party size, unknown ids, out-of-range tier or level
    Validation,
    /// Request is well-formed but the game state forbids it right now
    State,
    /// Missing save file; start a fresh game instead
    ResourceNotFound,
    /// Reading or writing a save failed
    Io,
}

/// Error from a game operation
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Raid on cooldown for {0} more days")]
    RaidOnCooldown(u32),
    #[error("No units selected")]
    EmptyParty,
    #[error("Units not ready: {0:?}")]
    UnitsNotReady(Vec<UnitId>),
    #[error("Units still recovering from a raid: {0:?}")]
    UnitOnCooldown(Vec<UnitId>),
    #[error("Need at least 2 fighters, got {0}")]
    InsufficientFighters(usize),
    #[error("Not enough food: need {needed}, have {available}")]
    InsufficientFood { needed: u32, available: u32 },
    #[error("Not enough resources: need {0}")]
    InsufficientResources(ResourceBundle),
    #[error("Training costs {needed} points, unit has {available}")]
    InsufficientPoints { needed: u32, available: u32 },
    #[error("{0} can't be trained")]
    UntrainableStat(StatKind),
    #[error("Unknown unit {0}")]
    UnknownUnit(UnitId),
    #[error("Unit {0} selected more than once")]
    DuplicateUnit(UnitId),
    #[error("No inventory item at index {0}")]
    InvalidInventoryIndex(usize),
    #[error("Unit {unit} has no {slot} equipped")]
    NothingEquipped { unit: UnitId, slot: Slot },
    #[error("Save file not found: {0:?}")]
    SaveNotFound(PathBuf),
    #[error(transparent)]
    Raid(#[from] RaidError),
    #[error(transparent)]
    Gear(#[from] GearError),
    #[error(transparent)]
    Combat(#[from] CombatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Save format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::EmptyParty
            | GameError::InsufficientFighters(_)
            | GameError::UntrainableStat(_)
            | GameError::UnknownUnit(_)
            | GameError::DuplicateUnit(_)
            | GameError::InvalidInventoryIndex(_)
            | GameError::NothingEquipped { .. }
            | GameError::Raid(_)
            | GameError::Gear(_)
            | GameError::Combat(_) => ErrorKind::Validation,
            GameError::RaidOnCooldown(_)
            | GameError::UnitsNotReady(_)
            | GameError::UnitOnCooldown(_)
            | GameError::InsufficientFood { .. }
            | GameError::InsufficientResources(_)
            | GameError::InsufficientPoints { .. } => ErrorKind::State,
            GameError::SaveNotFound(_) => ErrorKind::ResourceNotFound,
            GameError::Io(_) | GameError::Json(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(GameError::EmptyParty.kind(), ErrorKind::Validation);
        assert_eq!(
            GameError::Raid(RaidError::InvalidTier(9)).kind(),
            ErrorKind::Validation
        );
        assert_eq!(GameError::RaidOnCooldown(2).kind(), ErrorKind::State);
        assert_eq!(
            GameError::InsufficientFood {
                needed: 3,
                available: 2
            }
            .kind(),
            ErrorKind::State
        );
        assert_eq!(
            GameError::SaveNotFound(PathBuf::from("save.json")).kind(),
            ErrorKind::ResourceNotFound
        );
    }

    #[test]
    fn test_messages() {
        let error = GameError::InsufficientFood {
            needed: 3,
            available: 2,
        };
        assert_eq!(error.to_string(), "Not enough food: need 3, have 2");
        assert_eq!(
            GameError::Raid(RaidError::InvalidLevel { tier: 1, level: 11 }).to_string(),
            "Invalid raid level 11 for tier 1"
        );
    }
}
