//! Game - the facade a front end drives, one call per player action

use crate::config::VillageConfig;
use crate::error::GameError;
use crate::ledger::ResourceLedger;
use crate::snapshot::GameSnapshot;
use crate::village::Village;
use gear_core::{Equipment, GearError, Generator, Slot};
use raid_core::{resolve_tiered_raid, RaidLadder, TieredRaidOutcome};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use warband_core::combat::{
    apply_arena_outcome, apply_raid_outcome, resolve_arena, resolve_raid, DuelResult,
};
use warband_core::progression::{train, ProgressionError};
use warband_core::{
    CharacterClass, Resource, ResourceBundle, StatKind, Unit, UnitFactory, UnitId, UnitStatus,
};

/// Result of a village raid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidResult {
    pub success: bool,
    pub success_chance: f64,
    pub defender_strength: u32,
    pub resources_gained: ResourceBundle,
    /// Ids of the warriors created from captives
    pub captives: Vec<UnitId>,
    pub raider_statuses: Vec<(UnitId, UnitStatus)>,
}

/// Result of an arena bracket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaResult {
    pub winner: UnitId,
    pub duels: Vec<DuelResult>,
    pub fighter_statuses: Vec<(UnitId, UnitStatus)>,
}

/// Result of a tiered raid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredRaidResult {
    pub outcome: TieredRaidOutcome,
    pub coins_spent: u32,
    /// Items added to the inventory
    pub loot: Vec<Equipment>,
}

/// Result of ending a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    /// The day that just began
    pub day: u32,
    pub food_consumed: u32,
    pub food_remaining: u32,
    pub gathered: ResourceBundle,
    pub special_event: bool,
}

/// A running game: one village, its unit factory, item generator, raid
/// ladder and random source
///
/// All mutation goes through `&mut self`, so a game is single-writer by
/// construction. Every operation validates fully before touching state.
#[derive(Debug, Clone)]
pub struct Game {
    day: u32,
    village: Village,
    factory: UnitFactory,
    generator: Generator,
    ladder: RaidLadder,
    config: VillageConfig,
    rng: ChaCha8Rng,
}

impl Game {
    /// Start a fresh game seeded from OS entropy
    pub fn new(config: VillageConfig) -> Self {
        Self::start(config, ChaCha8Rng::from_entropy())
    }

    /// Start a fresh, fully reproducible game
    pub fn with_seed(config: VillageConfig, seed: u64) -> Self {
        Self::start(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn start(config: VillageConfig, mut rng: ChaCha8Rng) -> Self {
        let ladder = RaidLadder::standard(&mut rng);
        let village = Village::new(ResourceLedger::from(&config.starting_resources));
        let mut game = Game {
            day: 1,
            village,
            factory: UnitFactory::new(),
            generator: Generator::default(),
            ladder,
            config,
            rng,
        };
        game.recruit_starters();
        game
    }

    /// Starter units, each with a common tier 1 weapon and armor if configured
    fn recruit_starters(&mut self) {
        for _ in 0..self.config.starting_units {
            let class = self
                .config
                .starter_classes
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CharacterClass::Warrior);
            let mut unit = self.factory.create(class, &mut self.rng);

            if self.config.starter_gear {
                for slot in Slot::all() {
                    match self.generator.generate(
                        *slot,
                        1,
                        Some(gear_core::Rarity::Common),
                        &mut self.rng,
                    ) {
                        Ok(item) => {
                            unit.equip(item);
                        }
                        Err(e) => warn!(error = %e, "no starter gear"),
                    }
                }
            }
            self.village.add_unit(unit);
        }
    }

    /// Replace the raid ladder, e.g. with one loaded from tier files
    pub fn with_ladder(mut self, ladder: RaidLadder) -> Self {
        self.ladder = ladder;
        self
    }

    /// Replace the item generator, e.g. with a custom catalog
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn village(&self) -> &Village {
        &self.village
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.village.resources
    }

    pub fn ladder(&self) -> &RaidLadder {
        &self.ladder
    }

    pub fn config(&self) -> &VillageConfig {
        &self.config
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.village.unit(id)
    }

    /// Defender strength a village raid faces today
    pub fn defender_strength(&self) -> u32 {
        self.config.defender_strength(self.day)
    }

    /// Create a unit with rolled stats and add it to the village
    pub fn create_unit(&mut self, class: CharacterClass) -> &Unit {
        let unit = self.factory.create(class, &mut self.rng);
        let id = unit.id;
        self.village.add_unit(unit);
        info!(unit = %id, class = %class, "recruited unit");
        let population = self.village.population();
        &population[population.len() - 1]
    }

    /// Remove a unit; its equipment returns to the inventory
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, GameError> {
        self.village.remove_unit(id)
    }

    pub fn equip(&mut self, id: UnitId, inventory_index: usize) -> Result<(), GameError> {
        self.village.equip(id, inventory_index)
    }

    pub fn unequip(&mut self, id: UnitId, slot: Slot) -> Result<(), GameError> {
        self.village.unequip(id, slot)
    }

    pub fn discard_item(&mut self, inventory_index: usize) -> Result<Equipment, GameError> {
        self.village.discard_item(inventory_index)
    }

    /// Spend a unit's points to raise a base stat by one
    pub fn train_unit(&mut self, id: UnitId, stat: StatKind) -> Result<u32, GameError> {
        let unit = self
            .village
            .population_mut()
            .iter_mut()
            .find(|unit| unit.id == id)
            .ok_or(GameError::UnknownUnit(id))?;
        train(unit, stat).map_err(|e| match e {
            ProgressionError::InsufficientPoints { needed, available } => {
                GameError::InsufficientPoints { needed, available }
            }
            ProgressionError::UntrainableStat(stat) => GameError::UntrainableStat(stat),
        })
    }

    /// Every selected unit must be Ready
    fn require_ready(&self, units: &[&Unit]) -> Result<(), GameError> {
        let not_ready: Vec<UnitId> = units
            .iter()
            .filter(|unit| !unit.is_ready())
            .map(|unit| unit.id)
            .collect();
        if not_ready.is_empty() {
            Ok(())
        } else {
            warn!(units = ?not_ready, "units not ready");
            Err(GameError::UnitsNotReady(not_ready))
        }
    }

    fn statuses(&self, ids: &[UnitId]) -> Vec<(UnitId, UnitStatus)> {
        ids.iter()
            .filter_map(|id| self.village.unit(*id).map(|unit| (*id, unit.status)))
            .collect()
    }

    /// Raid a neighbour whose strength grows with the day number
    ///
    /// On success the loot goes to the ledger, each captive joins as a new
    /// Warrior and the village raid cooldown starts.
    pub fn conduct_raid(&mut self, party: &[UnitId]) -> Result<RaidResult, GameError> {
        if self.village.raid_cooldown > 0 {
            warn!(days = self.village.raid_cooldown, "raid on cooldown");
            return Err(GameError::RaidOnCooldown(self.village.raid_cooldown));
        }
        let defender_strength = self.defender_strength();
        let outcome = {
            let members = self.village.select(party)?;
            self.require_ready(&members)?;
            resolve_raid(&members, defender_strength, &mut self.rng)?
        };

        for unit in self.village.selected_mut(party) {
            apply_raid_outcome(unit, outcome.success);
        }

        let mut captives = Vec::new();
        if outcome.success {
            self.village.resources.add_resources(&outcome.resources);
            for _ in 0..outcome.captives {
                captives.push(self.create_unit(CharacterClass::Warrior).id);
            }
            self.village.raid_cooldown = self.config.raid_cooldown_days;
        }

        info!(
            day = self.day,
            success = outcome.success,
            defender_strength,
            captives = captives.len(),
            "village raid finished"
        );

        Ok(RaidResult {
            success: outcome.success,
            success_chance: outcome.success_chance,
            defender_strength,
            resources_gained: outcome.resources,
            captives,
            raider_statuses: self.statuses(party),
        })
    }

    /// Run an arena bracket; the winner gains a victory, the rest are injured
    pub fn conduct_arena(&mut self, fighters: &[UnitId]) -> Result<ArenaResult, GameError> {
        if fighters.len() < 2 {
            warn!(fighters = fighters.len(), "not enough fighters");
            return Err(GameError::InsufficientFighters(fighters.len()));
        }
        let bracket = {
            let members = self.village.select(fighters)?;
            self.require_ready(&members)?;
            resolve_arena(&members, &mut self.rng)
                .ok_or(GameError::InsufficientFighters(fighters.len()))?
        };

        for unit in self.village.selected_mut(fighters) {
            apply_arena_outcome(unit, bracket.winner);
        }

        Ok(ArenaResult {
            winner: bracket.winner,
            duels: bracket.duels,
            fighter_statuses: self.statuses(fighters),
        })
    }

    /// Raid one level of a tier
    ///
    /// The tier's coin cost is charged; members must be Ready and off raid
    /// cooldown. Successful raids credit the level's coins and resources; a
    /// boss kill or a lucky higher-tier roll adds an item to the inventory.
    ///
    /// The raid and its loot are worked out on copies of the members, so an
    /// error at any point leaves the village exactly as it was.
    pub fn conduct_tiered_raid(
        &mut self,
        party: &[UnitId],
        tier: u32,
        level: u32,
    ) -> Result<TieredRaidResult, GameError> {
        let (raid_tier, _) = self.ladder.level(tier, level)?;
        let coins_spent = raid_tier.coin_cost;
        let cost = ResourceBundle::new().with(Resource::Coins, coins_spent);

        let mut members: Vec<Unit> = {
            let members = self.village.select(party)?;
            self.require_ready(&members)?;
            let cooling: Vec<UnitId> = members
                .iter()
                .filter(|unit| unit.raid_cooldown > 0)
                .map(|unit| unit.id)
                .collect();
            if !cooling.is_empty() {
                warn!(units = ?cooling, "units on raid cooldown");
                return Err(GameError::UnitOnCooldown(cooling));
            }
            members.into_iter().cloned().collect()
        };
        if !self.village.resources.can_afford(&cost) {
            warn!(tier, cost = coins_spent, "cannot pay raid entry");
            return Err(GameError::InsufficientResources(cost));
        }

        let outcome = {
            let mut refs: Vec<&mut Unit> = members.iter_mut().collect();
            resolve_tiered_raid(&self.ladder, &mut refs, tier, level, &mut self.rng)?
        };
        let mut loot = Vec::new();
        if outcome.guaranteed_upgrade {
            loot.push(self.roll_loot(tier)?);
        }
        if outcome.higher_tier_loot {
            loot.push(self.roll_loot(tier + 1)?);
        }

        // Nothing below can fail
        let paid = self.village.resources.remove_resources(&cost);
        debug_assert!(paid, "entry cost was checked before the raid");
        for mut unit in members {
            unit.status = UnitStatus::Tired;
            self.village.replace_unit(unit);
        }
        if let Some(reward) = &outcome.reward {
            let mut credit = ResourceBundle::new().with(Resource::Coins, reward.coins);
            credit.merge(&reward.resources);
            self.village.resources.add_resources(&credit);
        }
        for item in &loot {
            self.village.add_item(item.clone());
        }

        Ok(TieredRaidResult {
            outcome,
            coins_spent,
            loot,
        })
    }

    /// An item of the given tier with a rolled rarity, in a random slot the
    /// catalog has templates for
    fn roll_loot(&mut self, tier: u32) -> Result<Equipment, GameError> {
        let stocked: Vec<Slot> = Slot::all()
            .iter()
            .copied()
            .filter(|slot| !self.generator.catalog().templates(*slot).is_empty())
            .collect();
        let slot = stocked
            .choose(&mut self.rng)
            .copied()
            .ok_or(GearError::EmptyTemplateSet(Slot::Weapon))?;
        let item = self.generator.generate(slot, tier, None, &mut self.rng)?;
        info!(item = %item.name, tier, rarity = %item.rarity, "raid loot");
        Ok(item)
    }

    /// End the day
    ///
    /// Food for every unit is checked first; without enough nothing changes.
    /// Otherwise food is eaten, cooldowns tick down, statuses recover one
    /// step, the day's gathering is credited and the day advances.
    pub fn advance_day(&mut self) -> Result<DayResult, GameError> {
        let needed = (self.village.population().len() as u32)
            .saturating_mul(self.config.food_per_unit);
        let food = ResourceBundle::new().with(Resource::Food, needed);
        if !self.village.resources.remove_resources(&food) {
            let available = self.village.resources.get(Resource::Food);
            warn!(day = self.day, needed, available, "not enough food");
            return Err(GameError::InsufficientFood { needed, available });
        }

        self.village.raid_cooldown = self.village.raid_cooldown.saturating_sub(1);
        for unit in self.village.population_mut() {
            unit.raid_cooldown = unit.raid_cooldown.saturating_sub(1);
            unit.status = unit.status.rested();
        }

        let gathered = self.config.roll_gathering(&mut self.rng);
        self.village.resources.add_resources(&gathered);

        self.day += 1;
        let special_event = self.day % self.config.special_event_period.max(1) == 0;
        let food_remaining = self.village.resources.get(Resource::Food);

        info!(
            day = self.day,
            food_remaining,
            gathered = %gathered,
            special_event,
            "day began"
        );

        Ok(DayResult {
            day: self.day,
            food_consumed: needed,
            food_remaining,
            gathered,
            special_event,
        })
    }

    /// Capture the full game state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            day: self.day,
            resources: self.village.resources.clone(),
            raid_cooldown: self.village.raid_cooldown,
            next_unit_id: self.factory.next_id().0,
            units: self.village.population().to_vec(),
            inventory: self.village.inventory().to_vec(),
            ladder: Some(self.ladder.clone()),
        }
    }

    /// Rebuild a game from a snapshot, seeding randomness from OS entropy
    pub fn restore(snapshot: GameSnapshot, config: VillageConfig) -> Result<Self, GameError> {
        Self::restore_with_rng(snapshot, config, ChaCha8Rng::from_entropy())
    }

    /// Rebuild a game from a snapshot with a fixed seed
    pub fn restore_seeded(
        snapshot: GameSnapshot,
        config: VillageConfig,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::restore_with_rng(snapshot, config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn restore_with_rng(
        snapshot: GameSnapshot,
        config: VillageConfig,
        mut rng: ChaCha8Rng,
    ) -> Result<Self, GameError> {
        snapshot.validate()?;
        // Never hand out an id that's already taken
        let next_id = snapshot
            .units
            .iter()
            .map(|unit| unit.id.0 + 1)
            .max()
            .unwrap_or(1)
            .max(snapshot.next_unit_id);
        let ladder = match snapshot.ladder {
            Some(ladder) => ladder,
            None => RaidLadder::standard(&mut rng),
        };

        Ok(Game {
            day: snapshot.day.max(1),
            village: Village::from_parts(
                snapshot.resources,
                snapshot.raid_cooldown,
                snapshot.units,
                snapshot.inventory,
            ),
            factory: UnitFactory::starting_at(next_id),
            generator: Generator::default(),
            ladder,
            config,
            rng,
        })
    }

    /// Write the game to a pretty-printed JSON save file
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        self.snapshot().save(path)
    }

    /// Load a game from a save file
    ///
    /// A missing file is [`GameError::SaveNotFound`]; callers usually start a
    /// fresh game instead.
    pub fn load(path: &Path, config: VillageConfig) -> Result<Self, GameError> {
        Self::restore(GameSnapshot::load(path)?, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_config() -> VillageConfig {
        VillageConfig {
            starting_units: 0,
            ..VillageConfig::default()
        }
    }

    #[test]
    fn test_new_game_has_starters() {
        let game = Game::with_seed(VillageConfig::default(), 1);
        assert_eq!(game.day(), 1);
        assert_eq!(game.village().population().len(), 3);
        for unit in game.village().population() {
            assert!(unit.equipment(Slot::Weapon).is_some());
            assert!(unit.equipment(Slot::Armor).is_some());
            assert_ne!(unit.class, CharacterClass::Champion);
        }
        assert_eq!(game.resources().get(Resource::Food), 10);
        assert_eq!(game.ladder().len(), 3);
    }

    #[test]
    fn test_create_unit_ids_increase() {
        let mut game = Game::with_seed(VillageConfig::default(), 2);
        let first = game.create_unit(CharacterClass::Elite).id;
        let second = game.create_unit(CharacterClass::Mage).id;
        assert_eq!(first, UnitId(4));
        assert_eq!(second, UnitId(5));
        assert_eq!(game.village().population().last().unwrap().id, second);
    }

    #[test]
    fn test_defender_strength_by_day() {
        let game = Game::with_seed(bare_config(), 3);
        assert_eq!(game.defender_strength(), 17);
    }

    #[test]
    fn test_train_unit_maps_errors() {
        let mut game = Game::with_seed(bare_config(), 4);
        let id = game.create_unit(CharacterClass::Warrior).id;
        assert!(matches!(
            game.train_unit(id, StatKind::Strength),
            Err(GameError::InsufficientPoints { available: 0, .. })
        ));
        assert!(matches!(
            game.train_unit(id, StatKind::Range),
            Err(GameError::UntrainableStat(StatKind::Range))
        ));
        assert!(matches!(
            game.train_unit(UnitId(99), StatKind::Health),
            Err(GameError::UnknownUnit(_))
        ));
    }
}
