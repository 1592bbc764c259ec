//! Core types shared across the warband

use gear_core::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique unit identifier, handed out monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u64);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unit class: picks the base-stat ranges and per-level growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Elite,
    Champion,
    Ranger,
    Mage,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Elite,
            CharacterClass::Champion,
            CharacterClass::Ranger,
            CharacterClass::Mage,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Warrior => write!(f, "Warrior"),
            CharacterClass::Elite => write!(f, "Elite"),
            CharacterClass::Champion => write!(f, "Champion"),
            CharacterClass::Ranger => write!(f, "Ranger"),
            CharacterClass::Mage => write!(f, "Mage"),
        }
    }
}

/// Eligibility state of a unit
///
/// Combat only moves units toward Tired or Injured. The daily tick is the
/// only way back: Injured -> Tired -> Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    #[default]
    Ready,
    Tired,
    Injured,
}

impl UnitStatus {
    /// Status after one end-of-day tick
    pub fn rested(self) -> UnitStatus {
        match self {
            UnitStatus::Injured => UnitStatus::Tired,
            UnitStatus::Tired | UnitStatus::Ready => UnitStatus::Ready,
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitStatus::Ready => write!(f, "ready"),
            UnitStatus::Tired => write!(f, "tired"),
            UnitStatus::Injured => write!(f, "injured"),
        }
    }
}

/// A unit's stat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub strength: i32,
    pub health: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub speed: i32,
}

impl Stats {
    /// Read a stat; item-only stats read as 0
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Health => self.health,
            StatKind::Defense => self.defense,
            StatKind::Intelligence => self.intelligence,
            StatKind::Speed => self.speed,
            _ => 0,
        }
    }

    /// Add to a stat; item-only stats are ignored
    pub fn add(&mut self, kind: StatKind, amount: i32) {
        match kind {
            StatKind::Strength => self.strength += amount,
            StatKind::Health => self.health += amount,
            StatKind::Defense => self.defense += amount,
            StatKind::Intelligence => self.intelligence += amount,
            StatKind::Speed => self.speed += amount,
            _ => {}
        }
    }

    /// Add every stat of another line
    pub fn add_all(&mut self, other: &Stats) {
        for kind in StatKind::unit_stats() {
            self.add(*kind, other.get(*kind));
        }
    }
}
