//! raid_core - Tiered raids for the village engine
//!
//! A raid tier is a named ladder of ten levels with rising difficulty and
//! rewards; the tenth level is a boss. Tiers are either built in
//! ([`RaidLadder::standard`]) or loaded from a directory of TOML files:
//!
//! ```toml
//! [tier]
//! level = 1
//! name = "Woods"
//! coin_cost = 50
//! difficulty_multiplier = 1.0
//! ```

mod config;
mod registry;
mod resolve;
mod tier;

pub use registry::RaidLadder;
pub use resolve::{resolve_tiered_raid, tiered_party_strength, MemberReport, TieredRaidOutcome};
pub use tier::{default_higher_tier_chance, RaidLevel, RaidReward, RaidTier, LEVELS_PER_TIER};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading raid tier configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read raid tiers at {path:?}: {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Malformed tier file {path:?}: {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Rejected tier file {path:?}: {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error starting a tiered raid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaidError {
    #[error("Invalid raid tier {0}")]
    InvalidTier(u32),
    #[error("Invalid raid level {level} for tier {tier}")]
    InvalidLevel { tier: u32, level: u32 },
    #[error("Raiding party is empty")]
    EmptyParty,
}
