//! Combat outcomes

use crate::resources::ResourceBundle;
use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// Result of a single duel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelResult {
    pub winner: UnitId,
    pub loser: UnitId,
    /// Rounds actually fought
    pub rounds: u32,
    /// Remaining health over max health for the first-listed unit
    pub first_fraction: f64,
    /// Remaining health over max health for the second-listed unit
    pub second_fraction: f64,
}

/// Result of an arena bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaResult {
    pub winner: UnitId,
    /// Every duel in the order it was fought
    pub duels: Vec<DuelResult>,
}

impl ArenaResult {
    /// Ids of every fighter that lost a duel
    pub fn losers(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.duels.iter().map(|duel| duel.loser)
    }
}

/// Result of a raid against a defender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidOutcome {
    pub success: bool,
    pub success_chance: f64,
    pub party_strength: f64,
    pub captives: u32,
    pub resources: ResourceBundle,
}
