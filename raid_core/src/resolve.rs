//! Tiered raid resolution

use crate::registry::RaidLadder;
use crate::tier::RaidReward;
use crate::RaidError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use warband_core::progression::{add_experience, recovery_days};
use warband_core::{constants, Unit, UnitId};

/// What happened to one raider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberReport {
    pub id: UnitId,
    pub health_lost: f64,
    /// Written to the unit's raid cooldown
    pub recovery_days: u32,
    pub leveled_up: bool,
}

/// Result of a tiered raid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredRaidOutcome {
    pub tier: u32,
    pub level: u32,
    pub success: bool,
    pub success_chance: f64,
    pub party_strength: f64,
    /// The level's rewards, present only on success
    pub reward: Option<RaidReward>,
    /// Set after beating a boss level
    pub guaranteed_upgrade: bool,
    /// Set when the higher-tier loot roll hits
    pub higher_tier_loot: bool,
    pub members: Vec<MemberReport>,
}

/// Offense of a tiered-raid party: base strength plus weapon strength
///
/// Armor never counts toward raid offense.
pub fn tiered_party_strength(party: &[&Unit]) -> f64 {
    party
        .iter()
        .map(|unit| unit.base_stats().strength as f64 + unit.weapon_strength())
        .sum()
}

/// Run a raid against one level of a tier
///
/// Tier, level and party are checked before anything is touched. Every raider
/// then takes damage and gets a recovery cooldown; on success each also earns
/// the level's experience and a tenth of its coins as training points. The
/// caller is responsible for paying the entry cost, crediting coins and
/// resources, and setting status.
pub fn resolve_tiered_raid(
    ladder: &RaidLadder,
    party: &mut [&mut Unit],
    tier: u32,
    level: u32,
    rng: &mut impl Rng,
) -> Result<TieredRaidOutcome, RaidError> {
    let (raid_tier, raid_level) = ladder.level(tier, level)?;
    if party.is_empty() {
        return Err(RaidError::EmptyParty);
    }

    let strength = {
        let members: Vec<&Unit> = party.iter().map(|unit| &**unit).collect();
        tiered_party_strength(&members)
    };
    let success_chance = (strength / (raid_level.difficulty * 10.0))
        .clamp(0.0, constants().combat.max_success_chance);
    let roll: f64 = rng.gen();
    let success = roll < success_chance;

    debug!(
        tier,
        level,
        party_strength = strength,
        success_chance,
        roll,
        "tiered raid roll"
    );

    let reward = &raid_level.reward;
    let mut members = Vec::with_capacity(party.len());
    for unit in party.iter_mut() {
        let raw_loss = rng.gen_range(5..=20) as f64 * raid_tier.level as f64;
        let health_lost = raw_loss * (1.0 - unit.armor_mitigation());
        let days = recovery_days(health_lost);
        unit.raid_cooldown = days;

        let leveled_up = if success {
            unit.points = unit.points.saturating_add(reward.coins / 10);
            add_experience(unit, reward.experience)
        } else {
            false
        };

        members.push(MemberReport {
            id: unit.id,
            health_lost,
            recovery_days: days,
            leveled_up,
        });
    }

    let higher_tier_loot = success && rng.gen::<f64>() < reward.higher_tier_chance;
    let guaranteed_upgrade = success && raid_level.is_boss;

    info!(
        tier = %raid_tier.name,
        level,
        success,
        guaranteed_upgrade,
        higher_tier_loot,
        "tiered raid resolved"
    );

    Ok(TieredRaidOutcome {
        tier,
        level,
        success,
        success_chance,
        party_strength: strength,
        reward: success.then(|| reward.clone()),
        guaranteed_upgrade,
        higher_tier_loot,
        members,
    })
}
