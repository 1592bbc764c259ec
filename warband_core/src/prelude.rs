//! Prelude module for convenient imports
//!
//! ```rust
//! use warband_core::prelude::*;
//! ```

// Units
pub use crate::types::{CharacterClass, Stats, UnitId, UnitStatus};
pub use crate::unit::{Unit, UnitFactory};

// Combat
pub use crate::combat::{
    apply_arena_outcome, apply_raid_outcome, resolve_arena, resolve_duel, resolve_raid,
    ArenaResult, DuelResult, RaidOutcome,
};

// Progression
pub use crate::progression::{add_experience, recovery_days, train, training_cost};

// Resources
pub use crate::resources::{Resource, ResourceBundle};

// Config
pub use crate::config::{constants, init_constants, init_constants_default};

// Re-exports from gear_core
pub use gear_core::{Equipment, Rarity, Slot, StatKind};
