//! Raid resolution - a party against a single defender strength

use super::result::RaidOutcome;
use crate::config::constants;
use crate::resources::{Resource, ResourceBundle};
use crate::types::UnitStatus;
use crate::unit::Unit;
use crate::CombatError;
use rand::Rng;
use tracing::{debug, info};

/// Raid strength of one unit: strength scaled by its arena and raid record
pub fn effective_strength(unit: &Unit) -> f64 {
    let combat = &constants().combat;
    let bonus = 1.0
        + combat.victory_bonus * unit.victories as f64
        + combat.raid_survival_bonus * unit.raids_survived as f64;
    unit.strength() as f64 * bonus
}

/// Sum of effective strength across the party
pub fn party_strength(party: &[&Unit]) -> f64 {
    party.iter().map(|unit| effective_strength(unit)).sum()
}

/// Chance of beating `defender_strength`, capped at the configured maximum
pub fn raid_success_chance(party_strength: f64, defender_strength: u32) -> f64 {
    if defender_strength == 0 {
        return 0.0;
    }
    let combat = &constants().combat;
    let chance = (party_strength / defender_strength as f64)
        * combat.base_raid_chance
        * combat.strength_multiplier;
    chance.clamp(0.0, combat.max_success_chance)
}

/// Captives taken from a beaten defender, at least one
pub fn captives_for(defender_strength: u32) -> u32 {
    let combat = &constants().combat;
    let pool = defender_strength / combat.captive_divisor.max(1);
    ((pool as f64 * combat.capture_rate).floor() as u32).max(1)
}

/// Plunder from a beaten defender
///
/// Food in [base/4, base], wood and stone in [base/8, base/4], flint in
/// [0, base/10], where base = defender strength * resource multiplier.
pub fn roll_raid_resources(defender_strength: u32, rng: &mut impl Rng) -> ResourceBundle {
    let base = defender_strength.saturating_mul(constants().combat.resource_multiplier);
    ResourceBundle::new()
        .with(Resource::Food, rng.gen_range(base / 4..=base))
        .with(Resource::Wood, rng.gen_range(base / 8..=base / 4))
        .with(Resource::Stone, rng.gen_range(base / 8..=base / 4))
        .with(Resource::Flint, rng.gen_range(0..=base / 10))
}

/// Resolve a raid
///
/// Only computes the outcome; the caller applies it to the party with
/// [`apply_raid_outcome`] and credits resources and captives.
pub fn resolve_raid(
    party: &[&Unit],
    defender_strength: u32,
    rng: &mut impl Rng,
) -> Result<RaidOutcome, CombatError> {
    if party.is_empty() {
        return Err(CombatError::EmptyParty);
    }
    if defender_strength == 0 {
        return Err(CombatError::InvalidDefenderStrength(defender_strength));
    }

    let strength = party_strength(party);
    let success_chance = raid_success_chance(strength, defender_strength);
    let roll: f64 = rng.gen();
    let success = roll < success_chance;

    debug!(
        party_strength = strength,
        defender_strength, success_chance, roll, "raid roll"
    );

    let (captives, resources) = if success {
        (
            captives_for(defender_strength),
            roll_raid_resources(defender_strength, rng),
        )
    } else {
        (0, ResourceBundle::new())
    };

    info!(
        success,
        party = party.len(),
        captives,
        resources = %resources,
        "raid resolved"
    );

    Ok(RaidOutcome {
        success,
        success_chance,
        party_strength: strength,
        captives,
        resources,
    })
}

/// Apply a raid result to one raider
///
/// Every raider ends Tired. Only a successful raid counts as survived.
pub fn apply_raid_outcome(unit: &mut Unit, success: bool) {
    if success {
        unit.raids_survived += 1;
    }
    unit.status = UnitStatus::Tired;
}
