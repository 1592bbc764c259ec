//! village_core - The village itself and the game facade that drives it
//!
//! This library provides:
//! - ResourceLedger: village balances with all-or-nothing withdrawals
//! - Village: population, inventory and equipment moves
//! - Game: raids, arena brackets, tiered raids, training and day advancement
//! - GameSnapshot: JSON save files
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use village_core::{Game, VillageConfig};
//!
//! let mut game = Game::new(VillageConfig::default());
//! let party: Vec<_> = game.village().population().iter().map(|u| u.id).collect();
//!
//! let raid = game.conduct_raid(&party)?;
//! println!("raid success: {}, captives: {}", raid.success, raid.captives.len());
//!
//! let day = game.advance_day()?;
//! println!("day {} begins with {} food", day.day, day.food_remaining);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod ledger;
pub mod snapshot;
pub mod village;

pub use config::{ConfigError, GatherAmount, VillageConfig};
pub use error::{ErrorKind, GameError};
pub use game::{ArenaResult, DayResult, Game, RaidResult, TieredRaidResult};
pub use ledger::ResourceLedger;
pub use snapshot::GameSnapshot;
pub use village::Village;
