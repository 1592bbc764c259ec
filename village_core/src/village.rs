//! Village - resources, population and item inventory

use crate::error::GameError;
use crate::ledger::ResourceLedger;
use std::collections::HashSet;
use tracing::debug;
use warband_core::{Equipment, Slot, Unit, UnitId};

/// The village: a resource ledger, units in creation order and unequipped items
#[derive(Debug, Clone, Default)]
pub struct Village {
    pub resources: ResourceLedger,
    /// Days before another village raid may start
    pub raid_cooldown: u32,
    population: Vec<Unit>,
    inventory: Vec<Equipment>,
}

impl Village {
    pub fn new(resources: ResourceLedger) -> Self {
        Village {
            resources,
            ..Default::default()
        }
    }

    pub(crate) fn from_parts(
        resources: ResourceLedger,
        raid_cooldown: u32,
        population: Vec<Unit>,
        inventory: Vec<Equipment>,
    ) -> Self {
        Village {
            resources,
            raid_cooldown,
            population,
            inventory,
        }
    }

    pub fn population(&self) -> &[Unit] {
        &self.population
    }

    pub(crate) fn population_mut(&mut self) -> &mut [Unit] {
        &mut self.population
    }

    pub fn inventory(&self) -> &[Equipment] {
        &self.inventory
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.population.iter().find(|unit| unit.id == id)
    }

    fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit, GameError> {
        self.population
            .iter_mut()
            .find(|unit| unit.id == id)
            .ok_or(GameError::UnknownUnit(id))
    }

    pub(crate) fn add_unit(&mut self, unit: Unit) {
        debug!(unit = %unit.id, class = %unit.class, "unit joined village");
        self.population.push(unit);
    }

    /// Overwrite the stored unit with the same id
    pub(crate) fn replace_unit(&mut self, unit: Unit) {
        if let Some(slot) = self.population.iter_mut().find(|u| u.id == unit.id) {
            *slot = unit;
        }
    }

    /// Remove a unit; its equipment goes back to the inventory
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, GameError> {
        let index = self
            .population
            .iter()
            .position(|unit| unit.id == id)
            .ok_or(GameError::UnknownUnit(id))?;
        let mut unit = self.population.remove(index);
        self.inventory.extend(unit.strip());
        debug!(unit = %id, "unit left village");
        Ok(unit)
    }

    /// Resolve a selection of ids to units, in selection order
    ///
    /// Fails on an empty selection, a repeated id or an unknown id.
    pub fn select(&self, ids: &[UnitId]) -> Result<Vec<&Unit>, GameError> {
        if ids.is_empty() {
            return Err(GameError::EmptyParty);
        }
        let mut seen = HashSet::with_capacity(ids.len());
        ids.iter()
            .map(|id| {
                if !seen.insert(*id) {
                    return Err(GameError::DuplicateUnit(*id));
                }
                self.unit(*id).ok_or(GameError::UnknownUnit(*id))
            })
            .collect()
    }

    /// Mutable access to the selected units, in population order
    ///
    /// Call [`Village::select`] first; unknown ids are silently skipped here.
    pub(crate) fn selected_mut(&mut self, ids: &[UnitId]) -> Vec<&mut Unit> {
        self.population
            .iter_mut()
            .filter(|unit| ids.contains(&unit.id))
            .collect()
    }

    pub fn add_item(&mut self, item: Equipment) {
        self.inventory.push(item);
    }

    /// Destroy an inventory item
    pub fn discard_item(&mut self, index: usize) -> Result<Equipment, GameError> {
        if index >= self.inventory.len() {
            return Err(GameError::InvalidInventoryIndex(index));
        }
        let item = self.inventory.remove(index);
        debug!(item = %item.name, "discarded item");
        Ok(item)
    }

    /// Move an inventory item onto a unit
    ///
    /// Anything already in that slot goes back to the inventory.
    pub fn equip(&mut self, id: UnitId, index: usize) -> Result<(), GameError> {
        if self.unit(id).is_none() {
            return Err(GameError::UnknownUnit(id));
        }
        if index >= self.inventory.len() {
            return Err(GameError::InvalidInventoryIndex(index));
        }

        let item = self.inventory.remove(index);
        let name = item.name.clone();
        let previous = self.unit_mut(id)?.equip(item);
        if let Some(previous) = previous {
            self.inventory.push(previous);
        }
        debug!(unit = %id, item = %name, "equipped item");
        Ok(())
    }

    /// Move a unit's item back to the inventory
    pub fn unequip(&mut self, id: UnitId, slot: Slot) -> Result<(), GameError> {
        let item = self
            .unit_mut(id)?
            .unequip(slot)
            .ok_or(GameError::NothingEquipped { unit: id, slot })?;
        debug!(unit = %id, item = %item.name, "unequipped item");
        self.inventory.push(item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::{Rarity, Template};
    use warband_core::{CharacterClass, StatKind, Stats};

    fn village() -> Village {
        let mut village = Village::default();
        for id in 1..=3 {
            village.add_unit(Unit::new(
                UnitId(id),
                CharacterClass::Warrior,
                Stats {
                    strength: 5,
                    health: 12,
                    defense: 2,
                    intelligence: 1,
                    speed: 2,
                },
            ));
        }
        village
    }

    fn sword(rarity: Rarity) -> Equipment {
        let template = Template::new("Sword", Slot::Weapon, &[(StatKind::Strength, 3.0)]);
        Equipment::from_template(&template, 1, rarity)
    }

    #[test]
    fn test_select_validation() {
        let village = village();
        assert_eq!(village.select(&[UnitId(2), UnitId(1)]).unwrap()[0].id, UnitId(2));
        assert!(matches!(village.select(&[]), Err(GameError::EmptyParty)));
        assert!(matches!(
            village.select(&[UnitId(1), UnitId(1)]),
            Err(GameError::DuplicateUnit(UnitId(1)))
        ));
        assert!(matches!(
            village.select(&[UnitId(9)]),
            Err(GameError::UnknownUnit(UnitId(9)))
        ));
    }

    #[test]
    fn test_equip_moves_item_out_of_inventory() {
        let mut village = village();
        village.add_item(sword(Rarity::Common));

        village.equip(UnitId(1), 0).unwrap();
        assert!(village.inventory().is_empty());
        assert_eq!(village.unit(UnitId(1)).unwrap().strength(), 8);
    }

    #[test]
    fn test_equip_swaps_previous_item() {
        let mut village = village();
        village.add_item(sword(Rarity::Common));
        village.add_item(sword(Rarity::Epic));

        village.equip(UnitId(1), 0).unwrap();
        village.equip(UnitId(1), 0).unwrap();

        assert_eq!(village.inventory().len(), 1);
        assert_eq!(village.inventory()[0].rarity, Rarity::Common);
        let unit = village.unit(UnitId(1)).unwrap();
        assert_eq!(unit.equipment(Slot::Weapon).unwrap().rarity, Rarity::Epic);
    }

    #[test]
    fn test_equip_failures_change_nothing() {
        let mut village = village();
        village.add_item(sword(Rarity::Common));

        assert!(matches!(
            village.equip(UnitId(9), 0),
            Err(GameError::UnknownUnit(_))
        ));
        assert!(matches!(
            village.equip(UnitId(1), 3),
            Err(GameError::InvalidInventoryIndex(3))
        ));
        assert_eq!(village.inventory().len(), 1);
        assert!(village.unit(UnitId(1)).unwrap().equipped().next().is_none());
    }

    #[test]
    fn test_unequip_round_trip() {
        let mut village = village();
        village.add_item(sword(Rarity::Rare));
        let before = village.unit(UnitId(2)).unwrap().effective_stats();

        village.equip(UnitId(2), 0).unwrap();
        village.unequip(UnitId(2), Slot::Weapon).unwrap();

        assert_eq!(village.inventory().len(), 1);
        assert_eq!(village.unit(UnitId(2)).unwrap().effective_stats(), before);
        assert!(matches!(
            village.unequip(UnitId(2), Slot::Weapon),
            Err(GameError::NothingEquipped { .. })
        ));
    }

    #[test]
    fn test_remove_unit_returns_equipment() {
        let mut village = village();
        village.add_item(sword(Rarity::Common));
        village.equip(UnitId(3), 0).unwrap();

        let removed = village.remove_unit(UnitId(3)).unwrap();
        assert_eq!(removed.id, UnitId(3));
        assert!(removed.equipped().next().is_none());
        assert_eq!(village.population().len(), 2);
        assert_eq!(village.inventory().len(), 1);
        assert!(village.remove_unit(UnitId(3)).is_err());
    }

    #[test]
    fn test_discard_item() {
        let mut village = village();
        village.add_item(sword(Rarity::Common));
        assert!(matches!(
            village.discard_item(1),
            Err(GameError::InvalidInventoryIndex(1))
        ));
        assert_eq!(village.discard_item(0).unwrap().base_name, "Sword");
        assert!(village.inventory().is_empty());
    }
}
