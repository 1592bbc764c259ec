//! Arena - randomized single-elimination bracket

use super::duel::resolve_duel;
use super::result::ArenaResult;
use crate::types::{UnitId, UnitStatus};
use crate::unit::Unit;
use rand::Rng;
use tracing::info;

/// Run a bracket until one fighter remains
///
/// Each step draws two random fighters from the pool, duels them and puts the
/// winner back. Returns None for fewer than two fighters.
pub fn resolve_arena(fighters: &[&Unit], rng: &mut impl Rng) -> Option<ArenaResult> {
    if fighters.len() < 2 {
        return None;
    }

    let mut pool: Vec<&Unit> = fighters.to_vec();
    let mut duels = Vec::with_capacity(fighters.len() - 1);

    while pool.len() > 1 {
        let first = pool.swap_remove(rng.gen_range(0..pool.len()));
        let second = pool.swap_remove(rng.gen_range(0..pool.len()));
        let duel = resolve_duel(first, second, rng);
        pool.push(if duel.winner == first.id { first } else { second });
        duels.push(duel);
    }

    let winner = pool.first()?.id;
    info!(winner = %winner, fighters = fighters.len(), "arena resolved");
    Some(ArenaResult { winner, duels })
}

/// Apply an arena result to one participant
///
/// The winner gains a victory and ends Tired; everyone else ends Injured.
pub fn apply_arena_outcome(unit: &mut Unit, winner: UnitId) {
    if unit.id == winner {
        unit.victories += 1;
        unit.status = UnitStatus::Tired;
    } else {
        unit.status = UnitStatus::Injured;
    }
}
