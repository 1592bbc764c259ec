use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rarity tier of an equipment instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Cumulative roll thresholds, rarest first. The first threshold the roll is
/// strictly below wins; anything past the last one is Common.
const RARITY_THRESHOLDS: [(f64, Rarity); 4] = [
    (0.01, Rarity::Legendary),
    (0.05, Rarity::Epic),
    (0.15, Rarity::Rare),
    (0.35, Rarity::Uncommon),
];

impl Rarity {
    /// Get all rarities, most common first
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
    }

    /// Multiplier applied to every template stat at creation
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.2,
            Rarity::Rare => 1.5,
            Rarity::Epic => 2.0,
            Rarity::Legendary => 3.0,
        }
    }

    /// Display colour used by menus
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "white",
            Rarity::Uncommon => "green",
            Rarity::Rare => "blue",
            Rarity::Epic => "purple",
            Rarity::Legendary => "gold",
        }
    }

    /// Map a uniform draw in [0, 1) onto the rarity table
    pub fn from_roll(roll: f64) -> Rarity {
        RARITY_THRESHOLDS
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|(_, rarity)| *rarity)
            .unwrap_or(Rarity::Common)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Equipment slot on a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Weapon,
    Armor,
}

impl Slot {
    pub fn all() -> &'static [Slot] {
        &[Slot::Weapon, Slot::Armor]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Weapon => write!(f, "weapon"),
            Slot::Armor => write!(f, "armor"),
        }
    }
}

/// Stats an equipment template can carry
///
/// Only the first five feed into a unit's stat line; the rest are carried on
/// the item and read by specific rules (armor damage reduction in raids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Strength,
    Health,
    Defense,
    Intelligence,
    Speed,
    CriticalChance,
    Range,
    Magic,
    DefenseMultiplier,
}

impl StatKind {
    /// Stats that exist on a unit's stat line
    pub fn unit_stats() -> &'static [StatKind] {
        &[
            StatKind::Strength,
            StatKind::Health,
            StatKind::Defense,
            StatKind::Intelligence,
            StatKind::Speed,
        ]
    }

    pub fn is_unit_stat(&self) -> bool {
        matches!(
            self,
            StatKind::Strength
                | StatKind::Health
                | StatKind::Defense
                | StatKind::Intelligence
                | StatKind::Speed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Strength => "strength",
            StatKind::Health => "health",
            StatKind::Defense => "defense",
            StatKind::Intelligence => "intelligence",
            StatKind::Speed => "speed",
            StatKind::CriticalChance => "critical_chance",
            StatKind::Range => "range",
            StatKind::Magic => "magic",
            StatKind::DefenseMultiplier => "defense_multiplier",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(StatKind::Strength),
            "health" => Ok(StatKind::Health),
            "defense" => Ok(StatKind::Defense),
            "intelligence" => Ok(StatKind::Intelligence),
            "speed" => Ok(StatKind::Speed),
            "critical_chance" => Ok(StatKind::CriticalChance),
            "range" => Ok(StatKind::Range),
            "magic" => Ok(StatKind::Magic),
            "defense_multiplier" => Ok(StatKind::DefenseMultiplier),
            other => Err(format!("unknown stat '{}'", other)),
        }
    }
}
