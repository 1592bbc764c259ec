//! gear_core - Equipment catalog for the village engine
//!
//! This library provides:
//! - Rarity tiers and their stat multipliers
//! - Read-only weapon and armor templates
//! - Equipment instances, scaled once by tier then rarity
//! - A generator that picks templates and rolls rarity
//!
//! ```rust,ignore
//! use gear_core::{Generator, Rarity};
//!
//! let generator = Generator::default();
//! let sword = generator.generate_weapon(2, Some(Rarity::Rare), &mut rng)?;
//! println!("{}", sword);
//! ```

mod catalog;
mod config;
mod generator;
mod item;
pub mod types;

pub use catalog::{standard_catalog, Catalog, Template};
pub use generator::Generator;
pub use item::{tier_factor, Equipment, MAX_DURABILITY};
pub use types::{Rarity, Slot, StatKind};

use std::path::PathBuf;
use thiserror::Error;

/// Error generating equipment
#[derive(Debug, Error)]
pub enum GearError {
    #[error("Invalid tier {0}: tiers start at 1")]
    InvalidTier(u32),
    #[error("No {0} templates in catalog")]
    EmptyTemplateSet(Slot),
}

/// Error loading catalog configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
