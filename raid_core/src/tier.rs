use crate::config::TierConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};
use warband_core::{Resource, ResourceBundle};

/// Every tier has this many levels; the last one is the boss
pub const LEVELS_PER_TIER: u32 = 10;

/// Built-in chance of a higher-tier item after a successful raid
pub fn default_higher_tier_chance(tier: u32, is_boss: bool) -> f64 {
    match (tier, is_boss) {
        (1, false) => 0.05,
        (1, true) => 0.25,
        (2, false) => 0.02,
        (2, true) => 0.10,
        (3, false) => 0.01,
        (3, true) => 0.05,
        _ => 0.0,
    }
}

/// Rewards paid out by a successful raid on one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidReward {
    pub coins: u32,
    pub experience: u32,
    pub resources: ResourceBundle,
    pub higher_tier_chance: f64,
}

/// One level of a raid tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidLevel {
    /// 1-based position within the tier
    pub number: u32,
    pub enemies: u32,
    pub difficulty: f64,
    pub is_boss: bool,
    pub health_pool: u32,
    pub reward: RaidReward,
}

/// A named ladder of raid levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidTier {
    pub level: u32,
    pub name: String,
    pub coin_cost: u32,
    pub difficulty_multiplier: f64,
    levels: Vec<RaidLevel>,
}

impl RaidTier {
    /// Build a tier with the built-in higher-tier loot chances
    pub fn generate(
        level: u32,
        name: impl Into<String>,
        coin_cost: u32,
        difficulty_multiplier: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let chances = (
            default_higher_tier_chance(level, false),
            default_higher_tier_chance(level, true),
        );
        Self::build(level, name.into(), coin_cost, difficulty_multiplier, chances, rng)
    }

    /// Build a tier from file configuration
    pub(crate) fn from_config(config: TierConfig, rng: &mut impl Rng) -> Result<Self, String> {
        if config.level == 0 {
            return Err("tier level must be at least 1".to_string());
        }
        if config.name.trim().is_empty() {
            return Err("tier name must not be empty".to_string());
        }
        if config.difficulty_multiplier.is_nan() || config.difficulty_multiplier <= 0.0 {
            return Err(format!(
                "difficulty_multiplier must be positive, got {}",
                config.difficulty_multiplier
            ));
        }

        let normal = config
            .higher_tier_chance
            .unwrap_or_else(|| default_higher_tier_chance(config.level, false));
        let boss = config
            .boss_higher_tier_chance
            .unwrap_or_else(|| default_higher_tier_chance(config.level, true));
        for chance in [normal, boss] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("higher-tier chance {} is outside [0, 1]", chance));
            }
        }

        Ok(Self::build(
            config.level,
            config.name,
            config.coin_cost,
            config.difficulty_multiplier,
            (normal, boss),
            rng,
        ))
    }

    fn build(
        level: u32,
        name: String,
        coin_cost: u32,
        difficulty_multiplier: f64,
        (normal_chance, boss_chance): (f64, f64),
        rng: &mut impl Rng,
    ) -> Self {
        let levels = (1..=LEVELS_PER_TIER)
            .map(|number| {
                let is_boss = number == LEVELS_PER_TIER;
                let chance = if is_boss { boss_chance } else { normal_chance };
                RaidLevel {
                    number,
                    enemies: if is_boss { 1 } else { rng.gen_range(1..=3) },
                    difficulty: number as f64 * difficulty_multiplier,
                    is_boss,
                    health_pool: if is_boss { level.saturating_mul(100) } else { 50 * number },
                    reward: roll_reward(level, number, chance, rng),
                }
            })
            .collect();

        RaidTier {
            level,
            name,
            coin_cost,
            difficulty_multiplier,
            levels,
        }
    }

    /// Get a level by its 1-based number
    pub fn level(&self, number: u32) -> Option<&RaidLevel> {
        number
            .checked_sub(1)
            .and_then(|index| self.levels.get(index as usize))
    }

    pub fn levels(&self) -> &[RaidLevel] {
        &self.levels
    }

    pub fn boss(&self) -> Option<&RaidLevel> {
        self.levels.last()
    }
}

/// Coins and experience scale with level and tier; resources are rolled
fn roll_reward(tier: u32, number: u32, higher_tier_chance: f64, rng: &mut impl Rng) -> RaidReward {
    let resources = ResourceBundle::new()
        .with(Resource::Wood, rng.gen_range(1..=3) * number)
        .with(Resource::Stone, rng.gen_range(1..=2) * number)
        .with(Resource::Iron, rng.gen_range(0..=1) * number)
        .with(Resource::Flint, rng.gen_range(0..=1) * number);

    RaidReward {
        coins: (number * 10).saturating_mul(tier),
        experience: (number * 5).saturating_mul(tier),
        resources,
        higher_tier_chance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_ten_levels_with_boss_last() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let tier = RaidTier::generate(2, "Caves", 150, 1.5, &mut rng);

        assert_eq!(tier.levels().len(), LEVELS_PER_TIER as usize);
        for (i, level) in tier.levels().iter().enumerate() {
            assert_eq!(level.number, i as u32 + 1);
            assert_eq!(level.is_boss, level.number == 10);
        }

        let boss = tier.boss().unwrap();
        assert_eq!(boss.enemies, 1);
        assert_eq!(boss.health_pool, 200);
        assert!((boss.difficulty - 15.0).abs() < 1e-9);
        assert!((boss.reward.higher_tier_chance - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_level_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let tier = RaidTier::generate(3, "Fort", 300, 2.0, &mut rng);

        let fourth = tier.level(4).unwrap();
        assert_eq!(fourth.health_pool, 200);
        assert!((fourth.difficulty - 8.0).abs() < 1e-9);
        assert!((1..=3).contains(&fourth.enemies));
        assert_eq!(fourth.reward.coins, 120);
        assert_eq!(fourth.reward.experience, 60);
        assert!((fourth.reward.higher_tier_chance - 0.01).abs() < 1e-9);

        let wood = fourth.reward.resources.get(Resource::Wood);
        assert!(wood >= 4 && wood <= 12 && wood % 4 == 0);
        let iron = fourth.reward.resources.get(Resource::Iron);
        assert!(iron == 0 || iron == 4);
    }

    #[test]
    fn test_level_lookup_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let tier = RaidTier::generate(1, "Woods", 50, 1.0, &mut rng);
        assert!(tier.level(0).is_none());
        assert!(tier.level(1).is_some());
        assert!(tier.level(10).is_some());
        assert!(tier.level(11).is_none());
    }

    #[test]
    fn test_higher_tier_chance_table() {
        assert_eq!(default_higher_tier_chance(1, false), 0.05);
        assert_eq!(default_higher_tier_chance(1, true), 0.25);
        assert_eq!(default_higher_tier_chance(3, true), 0.05);
        assert_eq!(default_higher_tier_chance(4, true), 0.0);
    }
}
