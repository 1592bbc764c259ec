//! warband_core - Units, progression and combat for the village engine
//!
//! This library provides:
//! - Unit: base stats, equipment slots, level, status and cooldowns
//! - UnitFactory: class-rolled units with monotonic ids
//! - Progression: experience curve, level-up growth, recovery days, training
//! - Combat: duels, arena brackets and raids against a defender strength
//! - ResourceBundle: named resource amounts used for loot and costs
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use warband_core::prelude::*;
//!
//! let mut factory = UnitFactory::new();
//! let a = factory.create(CharacterClass::Warrior, &mut rng);
//! let b = factory.create(CharacterClass::Ranger, &mut rng);
//!
//! let duel = resolve_duel(&a, &b, &mut rng);
//! let raid = resolve_raid(&[&a, &b], 15, &mut rng)?;
//! println!("{} won, raid success: {}", duel.winner, raid.success);
//! ```

pub mod combat;
pub mod config;
pub mod prelude;
pub mod progression;
pub mod resources;
pub mod types;
pub mod unit;

pub use combat::{ArenaResult, DuelResult, RaidOutcome};
pub use config::{constants, init_constants, init_constants_default, GameConstants};
pub use progression::ProgressionError;
pub use resources::{Resource, ResourceBundle};
pub use types::{CharacterClass, Stats, UnitId, UnitStatus};
pub use unit::{Unit, UnitFactory};

// Re-export commonly needed gear_core types
pub use gear_core::{Equipment, Rarity, Slot, StatKind};

use thiserror::Error;

/// Error resolving combat
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("Party is empty")]
    EmptyParty,
    #[error("Invalid defender strength {0}: must be positive")]
    InvalidDefenderStrength(u32),
}
