//! Per-class base-stat ranges and level-up growth

use super::ConfigError;
use crate::types::{CharacterClass, Stats};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A stat roll: a single value or an inclusive range [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatRange {
    Single(i32),
    Range([i32; 2]),
}

impl StatRange {
    pub fn min(&self) -> i32 {
        match self {
            StatRange::Single(v) => *v,
            StatRange::Range([min, _]) => *min,
        }
    }

    pub fn max(&self) -> i32 {
        match self {
            StatRange::Single(v) => *v,
            StatRange::Range([_, max]) => *max,
        }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> i32 {
        let (min, max) = (self.min(), self.max());
        if min >= max {
            min
        } else {
            rng.gen_range(min..=max)
        }
    }
}

/// Stat template and growth profile for one class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassProfile {
    pub strength: StatRange,
    pub health: StatRange,
    pub defense: StatRange,
    #[serde(default = "zero_range")]
    pub intelligence: StatRange,
    #[serde(default = "zero_range")]
    pub speed: StatRange,
    /// Fixed deltas applied on every level-up
    #[serde(default)]
    pub growth: Stats,
}

fn zero_range() -> StatRange {
    StatRange::Single(0)
}

impl ClassProfile {
    /// Roll a fresh base stat line within this class's ranges
    pub fn roll(&self, rng: &mut impl Rng) -> Stats {
        Stats {
            strength: self.strength.roll(rng),
            health: self.health.roll(rng),
            defense: self.defense.roll(rng),
            intelligence: self.intelligence.roll(rng),
            speed: self.speed.roll(rng),
        }
    }

    fn validate(&self, class: CharacterClass) -> Result<(), ConfigError> {
        let ranges = [
            ("strength", self.strength),
            ("health", self.health),
            ("defense", self.defense),
            ("intelligence", self.intelligence),
            ("speed", self.speed),
        ];
        for (name, range) in ranges {
            if range.min() > range.max() {
                return Err(ConfigError::ValidationError(format!(
                    "{} {} range is inverted",
                    class, name
                )));
            }
            if range.min() < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} {} range must not be negative",
                    class, name
                )));
            }
        }
        if self.health.min() < 1 {
            return Err(ConfigError::ValidationError(format!(
                "{} health must be at least 1",
                class
            )));
        }
        Ok(())
    }
}

/// Class profiles for every [`CharacterClass`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassTable {
    #[serde(default = "default_warrior")]
    pub warrior: ClassProfile,
    #[serde(default = "default_elite")]
    pub elite: ClassProfile,
    #[serde(default = "default_champion")]
    pub champion: ClassProfile,
    #[serde(default = "default_ranger")]
    pub ranger: ClassProfile,
    #[serde(default = "default_mage")]
    pub mage: ClassProfile,
}

impl ClassTable {
    pub fn profile(&self, class: CharacterClass) -> &ClassProfile {
        match class {
            CharacterClass::Warrior => &self.warrior,
            CharacterClass::Elite => &self.elite,
            CharacterClass::Champion => &self.champion,
            CharacterClass::Ranger => &self.ranger,
            CharacterClass::Mage => &self.mage,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for class in CharacterClass::all() {
            self.profile(*class).validate(*class)?;
        }
        Ok(())
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        ClassTable {
            warrior: default_warrior(),
            elite: default_elite(),
            champion: default_champion(),
            ranger: default_ranger(),
            mage: default_mage(),
        }
    }
}

fn growth(health: i32, strength: i32, defense: i32, intelligence: i32, speed: i32) -> Stats {
    Stats {
        strength,
        health,
        defense,
        intelligence,
        speed,
    }
}

fn default_warrior() -> ClassProfile {
    ClassProfile {
        strength: StatRange::Range([3, 6]),
        health: StatRange::Range([10, 15]),
        defense: StatRange::Single(2),
        intelligence: StatRange::Single(1),
        speed: StatRange::Single(2),
        growth: growth(3, 2, 2, 0, 0),
    }
}

fn default_elite() -> ClassProfile {
    ClassProfile {
        strength: StatRange::Range([6, 9]),
        health: StatRange::Range([15, 20]),
        defense: StatRange::Single(3),
        intelligence: StatRange::Single(1),
        speed: StatRange::Single(2),
        growth: growth(4, 2, 2, 0, 0),
    }
}

fn default_champion() -> ClassProfile {
    ClassProfile {
        strength: StatRange::Range([9, 12]),
        health: StatRange::Range([20, 25]),
        defense: StatRange::Single(4),
        intelligence: StatRange::Single(1),
        speed: StatRange::Single(3),
        growth: growth(5, 3, 2, 0, 0),
    }
}

fn default_ranger() -> ClassProfile {
    ClassProfile {
        strength: StatRange::Range([2, 4]),
        health: StatRange::Range([9, 11]),
        defense: StatRange::Single(2),
        intelligence: StatRange::Single(2),
        speed: StatRange::Range([3, 5]),
        growth: growth(2, 2, 0, 0, 2),
    }
}

fn default_mage() -> ClassProfile {
    ClassProfile {
        strength: StatRange::Single(2),
        health: StatRange::Range([7, 9]),
        defense: StatRange::Single(2),
        intelligence: StatRange::Range([4, 6]),
        speed: StatRange::Single(3),
        growth: growth(2, 0, 0, 3, 1),
    }
}
