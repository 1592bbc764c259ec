//! Unit - a warrior carrying base stats, equipment, level and status

mod factory;

pub use factory::UnitFactory;

use crate::config::constants;
use crate::types::{CharacterClass, Stats, UnitId, UnitStatus};
use gear_core::{Equipment, Slot, StatKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest fraction of raid damage armor can absorb
pub const MAX_ARMOR_MITIGATION: f64 = 0.75;

/// A warrior unit
///
/// Only base stats are stored. Effective stats are recomputed from base stats
/// and equipped items on every read, so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub class: CharacterClass,
    base: Stats,
    pub level: u32,
    pub experience: u32,
    pub experience_needed: u32,
    weapon: Option<Equipment>,
    armor: Option<Equipment>,
    pub victories: u32,
    pub raids_survived: u32,
    pub status: UnitStatus,
    /// Days until the unit may join another tiered raid
    pub raid_cooldown: u32,
    /// Training points earned from raids
    pub points: u32,
}

impl Unit {
    /// Create a level 1 unit with the given base stats
    pub fn new(id: UnitId, class: CharacterClass, base: Stats) -> Self {
        Unit {
            id,
            class,
            base,
            level: 1,
            experience: 0,
            experience_needed: constants().progression.base_experience,
            weapon: None,
            armor: None,
            victories: 0,
            raids_survived: 0,
            status: UnitStatus::Ready,
            raid_cooldown: 0,
            points: 0,
        }
    }

    /// Base stats, without equipment
    pub fn base_stats(&self) -> &Stats {
        &self.base
    }

    pub(crate) fn base_stats_mut(&mut self) -> &mut Stats {
        &mut self.base
    }

    /// Effective value of a unit stat: base plus rounded equipment bonus,
    /// floored at 0 (health at 1)
    pub fn stat(&self, kind: StatKind) -> i32 {
        let total = self.base.get(kind) + self.equipment_bonus(kind).round() as i32;
        if kind == StatKind::Health {
            total.max(1)
        } else {
            total.max(0)
        }
    }

    /// Full effective stat line
    pub fn effective_stats(&self) -> Stats {
        Stats {
            strength: self.stat(StatKind::Strength),
            health: self.stat(StatKind::Health),
            defense: self.stat(StatKind::Defense),
            intelligence: self.stat(StatKind::Intelligence),
            speed: self.stat(StatKind::Speed),
        }
    }

    pub fn strength(&self) -> i32 {
        self.stat(StatKind::Strength)
    }

    pub fn health(&self) -> i32 {
        self.stat(StatKind::Health)
    }

    pub fn defense(&self) -> i32 {
        self.stat(StatKind::Defense)
    }

    /// Sum of a stat across all equipped items
    pub fn equipment_bonus(&self, kind: StatKind) -> f64 {
        self.equipped().map(|item| item.stat(kind)).sum()
    }

    /// Strength bonus of the equipped weapon only
    pub fn weapon_strength(&self) -> f64 {
        self.weapon
            .as_ref()
            .map(|w| w.stat(StatKind::Strength))
            .unwrap_or(0.0)
    }

    /// Fraction of raid damage absorbed by the equipped armor
    pub fn armor_mitigation(&self) -> f64 {
        self.armor
            .as_ref()
            .map(|a| a.stat(StatKind::DefenseMultiplier).clamp(0.0, MAX_ARMOR_MITIGATION))
            .unwrap_or(0.0)
    }

    /// All equipped items, weapon first
    pub fn equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.weapon.iter().chain(self.armor.iter())
    }

    pub fn equipment(&self, slot: Slot) -> Option<&Equipment> {
        match slot {
            Slot::Weapon => self.weapon.as_ref(),
            Slot::Armor => self.armor.as_ref(),
        }
    }

    /// Put an item in its slot, returning whatever was there before
    pub fn equip(&mut self, item: Equipment) -> Option<Equipment> {
        match item.slot {
            Slot::Weapon => self.weapon.replace(item),
            Slot::Armor => self.armor.replace(item),
        }
    }

    /// Take the item out of a slot
    pub fn unequip(&mut self, slot: Slot) -> Option<Equipment> {
        match slot {
            Slot::Weapon => self.weapon.take(),
            Slot::Armor => self.armor.take(),
        }
    }

    /// Take every equipped item out
    pub fn strip(&mut self) -> Vec<Equipment> {
        self.weapon.take().into_iter().chain(self.armor.take()).collect()
    }

    pub fn is_ready(&self) -> bool {
        self.status == UnitStatus::Ready
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.effective_stats();
        writeln!(f, "Unit {} ({}) Level {}", self.id, self.class, self.level)?;
        writeln!(
            f,
            "    STR:{}, HP:{}, DEF:{}, INT:{}, SPD:{}",
            stats.strength, stats.health, stats.defense, stats.intelligence, stats.speed
        )?;
        writeln!(
            f,
            "    Status: {} | EXP: {}/{}",
            self.status, self.experience, self.experience_needed
        )?;
        writeln!(
            f,
            "    Victories: {} | Raids: {}",
            self.victories, self.raids_survived
        )?;
        for slot in Slot::all() {
            match self.equipment(*slot) {
                Some(item) => writeln!(f, "    {}: {}", slot, item)?,
                None => writeln!(f, "    {}: None", slot)?,
            }
        }
        write!(
            f,
            "    Points: {} | Raid Cooldown: {} days",
            self.points, self.raid_cooldown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{Rarity, Template};
    use proptest::prelude::*;

    fn warrior() -> Unit {
        Unit::new(
            UnitId(1),
            CharacterClass::Warrior,
            Stats {
                strength: 5,
                health: 12,
                defense: 2,
                intelligence: 1,
                speed: 2,
            },
        )
    }

    fn axe(rarity: Rarity) -> Equipment {
        let template = Template::new(
            "Axe",
            Slot::Weapon,
            &[(StatKind::Strength, 4.0), (StatKind::Speed, -1.0)],
        );
        Equipment::from_template(&template, 1, rarity)
    }

    fn plate() -> Equipment {
        let template = Template::new(
            "Plate",
            Slot::Armor,
            &[
                (StatKind::Defense, 5.0),
                (StatKind::Speed, -1.0),
                (StatKind::DefenseMultiplier, 0.15),
            ],
        );
        Equipment::from_template(&template, 1, Rarity::Common)
    }

    #[test]
    fn test_new_unit_defaults() {
        let unit = warrior();
        assert_eq!(unit.level, 1);
        assert_eq!(unit.experience, 0);
        assert_eq!(unit.experience_needed, 100);
        assert_eq!(unit.status, UnitStatus::Ready);
        assert!(unit.equipped().next().is_none());
    }

    #[test]
    fn test_equipment_adds_to_effective_stats() {
        let mut unit = warrior();
        unit.equip(axe(Rarity::Common));
        unit.equip(plate());

        assert_eq!(unit.strength(), 9);
        assert_eq!(unit.defense(), 7);
        // Two -1 speed items
        assert_eq!(unit.stat(StatKind::Speed), 0);
        // Base is untouched
        assert_eq!(unit.base_stats().strength, 5);
    }

    #[test]
    fn test_effective_stat_floors_at_zero() {
        let mut unit = warrior();
        // Legendary axe: -3 speed against base 2
        unit.equip(axe(Rarity::Legendary));
        assert_eq!(unit.stat(StatKind::Speed), 0);
    }

    #[test]
    fn test_equip_replaces_and_returns_previous() {
        let mut unit = warrior();
        assert!(unit.equip(axe(Rarity::Common)).is_none());
        let previous = unit.equip(axe(Rarity::Rare)).unwrap();
        assert_eq!(previous.rarity, Rarity::Common);
        assert_eq!(unit.equipment(Slot::Weapon).unwrap().rarity, Rarity::Rare);
    }

    #[test]
    fn test_equip_unequip_restores_stats() {
        let mut unit = warrior();
        let before = unit.effective_stats();
        unit.equip(plate());
        assert_ne!(unit.effective_stats(), before);
        let item = unit.unequip(Slot::Armor).unwrap();
        assert_eq!(item.base_name, "Plate");
        assert_eq!(unit.effective_stats(), before);
    }

    #[test]
    fn test_weapon_strength_excludes_armor() {
        let mut unit = warrior();
        unit.equip(plate());
        assert_eq!(unit.weapon_strength(), 0.0);
        unit.equip(axe(Rarity::Uncommon));
        assert!((unit.weapon_strength() - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_armor_mitigation_clamped() {
        let mut unit = warrior();
        assert_eq!(unit.armor_mitigation(), 0.0);
        unit.equip(plate());
        assert!((unit.armor_mitigation() - 0.15).abs() < 1e-9);

        let template = Template::new("Bulwark", Slot::Armor, &[(StatKind::DefenseMultiplier, 0.5)]);
        unit.equip(Equipment::from_template(&template, 3, Rarity::Legendary));
        assert!((unit.armor_mitigation() - MAX_ARMOR_MITIGATION).abs() < 1e-9);
    }

    #[test]
    fn test_strip_returns_all_items() {
        let mut unit = warrior();
        unit.equip(axe(Rarity::Common));
        unit.equip(plate());
        let items = unit.strip();
        assert_eq!(items.len(), 2);
        assert!(unit.equipped().next().is_none());
    }

    proptest! {
        #[test]
        fn prop_equip_then_unequip_restores_stats(
            strength in 0i32..30,
            health in 1i32..40,
            defense in 0i32..10,
            speed in 0i32..6,
            tier in 1u32..5,
            rarity_index in 0usize..5,
            use_armor in any::<bool>(),
        ) {
            let mut unit = Unit::new(
                UnitId(7),
                CharacterClass::Elite,
                Stats { strength, health, defense, intelligence: 1, speed },
            );
            let rarity = Rarity::all()[rarity_index];
            let item = if use_armor {
                Equipment::from_template(&Template::new(
                    "Plate",
                    Slot::Armor,
                    &[(StatKind::Defense, 5.0), (StatKind::Speed, -1.0)],
                ), tier, rarity)
            } else {
                Equipment::from_template(&Template::new(
                    "Axe",
                    Slot::Weapon,
                    &[(StatKind::Strength, 4.0), (StatKind::Speed, -1.0)],
                ), tier, rarity)
            };
            let slot = item.slot;

            let before = unit.effective_stats();
            unit.equip(item.clone());
            let returned = unit.unequip(slot);
            prop_assert_eq!(returned, Some(item));
            prop_assert_eq!(unit.effective_stats(), before);
        }
    }

    #[test]
    fn test_display_lists_slots() {
        let mut unit = warrior();
        unit.equip(plate());
        let text = unit.to_string();
        assert!(text.starts_with("Unit #1 (Warrior) Level 1"));
        assert!(text.contains("weapon: None"));
        assert!(text.contains("armor: Common Plate"));
    }
}
