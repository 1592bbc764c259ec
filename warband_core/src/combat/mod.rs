//! Combat resolution: duels, arena brackets and raids
//!
//! Resolvers take shared references and a caller-supplied RNG and only
//! compute outcomes. Applying an outcome to the participants is a separate
//! step (`apply_*_outcome`) so a caller can validate everything first.

mod arena;
mod duel;
mod raid;
mod result;

pub use arena::{apply_arena_outcome, resolve_arena};
pub use duel::{duel_damage, resolve_duel};
pub use raid::{
    apply_raid_outcome, captives_for, effective_strength, party_strength, raid_success_chance,
    resolve_raid, roll_raid_resources,
};
pub use result::{ArenaResult, DuelResult, RaidOutcome};
