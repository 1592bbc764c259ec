//! Village tuning: starting state, defenders, cooldowns and daily gathering

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use warband_core::{CharacterClass, Resource, ResourceBundle};

/// Error loading village configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// A gathered amount: a single value or an inclusive range [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatherAmount {
    Single(u32),
    Range([u32; 2]),
}

impl GatherAmount {
    pub fn min(&self) -> u32 {
        match self {
            GatherAmount::Single(v) => *v,
            GatherAmount::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            GatherAmount::Single(v) => *v,
            GatherAmount::Range([_, max]) => *max,
        }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> u32 {
        let (min, max) = (self.min(), self.max());
        if min >= max {
            min
        } else {
            rng.gen_range(min..=max)
        }
    }
}

/// Village configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VillageConfig {
    #[serde(default = "default_starting_resources")]
    pub starting_resources: ResourceBundle,
    /// Units the village starts with
    #[serde(default = "default_starting_units")]
    pub starting_units: u32,
    /// Starter classes are drawn uniformly from this list
    #[serde(default = "default_starter_classes")]
    pub starter_classes: Vec<CharacterClass>,
    /// Give each starter a common tier 1 weapon and armor
    #[serde(default = "default_starter_gear")]
    pub starter_gear: bool,
    /// Defender strength on day 0
    #[serde(default = "default_base_defender_strength")]
    pub base_defender_strength: u32,
    #[serde(default = "default_defender_strength_per_day")]
    pub defender_strength_per_day: u32,
    /// Village-wide raid cooldown after a successful raid
    #[serde(default = "default_raid_cooldown_days")]
    pub raid_cooldown_days: u32,
    /// A special event falls on every day divisible by this
    #[serde(default = "default_special_event_period")]
    pub special_event_period: u32,
    #[serde(default = "default_food_per_unit")]
    pub food_per_unit: u32,
    #[serde(default = "default_gathering")]
    pub gathering: Vec<(Resource, GatherAmount)>,
}

impl Default for VillageConfig {
    fn default() -> Self {
        VillageConfig {
            starting_resources: default_starting_resources(),
            starting_units: default_starting_units(),
            starter_classes: default_starter_classes(),
            starter_gear: default_starter_gear(),
            base_defender_strength: default_base_defender_strength(),
            defender_strength_per_day: default_defender_strength_per_day(),
            raid_cooldown_days: default_raid_cooldown_days(),
            special_event_period: default_special_event_period(),
            food_per_unit: default_food_per_unit(),
            gathering: default_gathering(),
        }
    }
}

impl VillageConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VillageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.special_event_period == 0 {
            return Err(ConfigError::ValidationError(
                "special_event_period must be at least 1".to_string(),
            ));
        }
        if self.starting_units > 0 && self.starter_classes.is_empty() {
            return Err(ConfigError::ValidationError(
                "starter_classes must not be empty when starting_units > 0".to_string(),
            ));
        }
        for (resource, amount) in &self.gathering {
            if amount.min() > amount.max() {
                return Err(ConfigError::ValidationError(format!(
                    "gathering range for {} is inverted",
                    resource
                )));
            }
        }
        Ok(())
    }

    /// Defender strength faced by a village raid on `day`
    pub fn defender_strength(&self, day: u32) -> u32 {
        self.base_defender_strength
            .saturating_add(self.defender_strength_per_day.saturating_mul(day))
    }

    /// Roll one day's gathering
    pub fn roll_gathering(&self, rng: &mut impl Rng) -> ResourceBundle {
        self.gathering
            .iter()
            .map(|(resource, amount)| (*resource, amount.roll(rng)))
            .collect()
    }
}

fn default_starting_resources() -> ResourceBundle {
    ResourceBundle::new()
        .with(Resource::Food, 10)
        .with(Resource::Wood, 5)
        .with(Resource::Stone, 3)
        .with(Resource::Flint, 1)
        .with(Resource::Coins, 100)
}
fn default_starting_units() -> u32 {
    3
}
fn default_starter_classes() -> Vec<CharacterClass> {
    vec![
        CharacterClass::Warrior,
        CharacterClass::Ranger,
        CharacterClass::Mage,
    ]
}
fn default_starter_gear() -> bool {
    true
}
fn default_base_defender_strength() -> u32 {
    15
}
fn default_defender_strength_per_day() -> u32 {
    2
}
fn default_raid_cooldown_days() -> u32 {
    3
}
fn default_special_event_period() -> u32 {
    30
}
fn default_food_per_unit() -> u32 {
    1
}
fn default_gathering() -> Vec<(Resource, GatherAmount)> {
    vec![
        (Resource::Wood, GatherAmount::Range([3, 6])),
        (Resource::Stone, GatherAmount::Range([2, 4])),
        (Resource::Iron, GatherAmount::Range([1, 2])),
    ]
}
