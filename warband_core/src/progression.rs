//! Progression - experience, level-ups, recovery time and stat training

use crate::config::constants;
use crate::unit::Unit;
use gear_core::StatKind;
use thiserror::Error;
use tracing::info;

/// Error spending training points
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("Training costs {needed} points, unit has {available}")]
    InsufficientPoints { needed: u32, available: u32 },
    #[error("{0} can't be trained")]
    UntrainableStat(StatKind),
}

/// Requirement for the level after one with requirement `current`
///
/// floor(current * multiplier), always strictly greater than `current`.
pub fn next_requirement(current: u32) -> u32 {
    let multiplier = constants().progression.level_multiplier;
    let next = (current as f64 * multiplier).floor();
    let next = if next >= u32::MAX as f64 {
        u32::MAX
    } else {
        next as u32
    };
    next.max(current.saturating_add(1))
}

/// Experience needed to advance from `level` to `level + 1`
pub fn experience_required(level: u32) -> u32 {
    let mut required = constants().progression.base_experience;
    for _ in 1..level.max(1) {
        required = next_requirement(required);
    }
    required
}

/// Add experience, applying every level-up it pays for
///
/// Returns true if the unit gained at least one level.
pub fn add_experience(unit: &mut Unit, amount: u32) -> bool {
    unit.experience = unit.experience.saturating_add(amount);
    let growth = constants().classes.profile(unit.class).growth;
    let mut leveled_up = false;

    while unit.experience >= unit.experience_needed {
        unit.experience -= unit.experience_needed;
        unit.level += 1;
        unit.base_stats_mut().add_all(&growth);
        unit.experience_needed = next_requirement(unit.experience_needed);
        leveled_up = true;

        info!(
            unit = %unit.id,
            class = %unit.class,
            level = unit.level,
            next = unit.experience_needed,
            "unit leveled up"
        );
    }

    leveled_up
}

/// Days a unit sits out after losing `health_lost` in a raid
pub fn recovery_days(health_lost: f64) -> u32 {
    let progression = &constants().progression;
    let days = (health_lost / progression.health_per_recovery_day).ceil();
    // NaN and negatives fall to the minimum
    (days.max(0.0) as u32).clamp(
        progression.min_recovery_days,
        progression.max_recovery_days,
    )
}

/// Point cost to raise `stat` by one from its current base value
pub fn training_cost(stat: StatKind, current: i32) -> Option<u32> {
    let training = &constants().progression.training;
    let base = training.base_cost(stat)?;
    let exponent = (current - 1).max(0);
    let cost = (base as f64 * training.growth.powi(exponent)).floor();
    Some(if cost >= u32::MAX as f64 {
        u32::MAX
    } else {
        cost as u32
    })
}

/// Spend points to raise a base stat by one, returning the points spent
pub fn train(unit: &mut Unit, stat: StatKind) -> Result<u32, ProgressionError> {
    let current = unit.base_stats().get(stat);
    let cost = training_cost(stat, current).ok_or(ProgressionError::UntrainableStat(stat))?;
    if unit.points < cost {
        return Err(ProgressionError::InsufficientPoints {
            needed: cost,
            available: unit.points,
        });
    }

    unit.points -= cost;
    unit.base_stats_mut().add(stat, 1);
    info!(unit = %unit.id, stat = %stat, cost, "trained stat");
    Ok(cost)
}
