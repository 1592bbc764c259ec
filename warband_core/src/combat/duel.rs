//! Duel resolution between two units

use super::result::DuelResult;
use crate::config::constants;
use crate::unit::Unit;
use rand::Rng;
use tracing::debug;

/// Ephemeral health tracked only for the length of one duel
struct Combatant<'a> {
    unit: &'a Unit,
    max_health: f64,
    health: f64,
}

impl<'a> Combatant<'a> {
    fn new(unit: &'a Unit) -> Self {
        let max_health = unit.health() as f64;
        Combatant {
            unit,
            max_health,
            health: max_health,
        }
    }

    fn fraction(&self) -> f64 {
        self.health.max(0.0) / self.max_health
    }

    fn is_down(&self) -> bool {
        self.health <= 0.0
    }
}

/// Damage dealt by `attacker` to `defender` for one round
///
/// (strength + jitter) scaled by the attacker's victory bonus, minus the
/// defender's defense, floored at zero.
pub fn duel_damage(attacker: &Unit, defender: &Unit, jitter: i32) -> f64 {
    let bonus = 1.0 + constants().combat.victory_bonus * attacker.victories as f64;
    let raw = (attacker.strength() + jitter) as f64 * bonus;
    (raw - defender.defense() as f64).max(0.0)
}

/// Fight up to the configured number of rounds
///
/// Damage lands simultaneously each round. The winner is the side with the
/// larger remaining-health fraction; on an exact tie `a` wins.
pub fn resolve_duel(a: &Unit, b: &Unit, rng: &mut impl Rng) -> DuelResult {
    let max_rounds = constants().combat.arena_rounds;
    let mut first = Combatant::new(a);
    let mut second = Combatant::new(b);
    let mut rounds = 0;

    while rounds < max_rounds {
        rounds += 1;
        let jitter_a = rng.gen_range(-1..=1);
        let jitter_b = rng.gen_range(-1..=1);
        let to_second = duel_damage(first.unit, second.unit, jitter_a);
        let to_first = duel_damage(second.unit, first.unit, jitter_b);

        second.health -= to_second;
        first.health -= to_first;

        debug!(
            round = rounds,
            a = %a.id,
            b = %b.id,
            a_health = first.health,
            b_health = second.health,
            "duel round"
        );

        if first.is_down() || second.is_down() {
            break;
        }
    }

    let first_fraction = first.fraction();
    let second_fraction = second.fraction();
    let (winner, loser) = if first_fraction >= second_fraction {
        (a.id, b.id)
    } else {
        (b.id, a.id)
    };

    debug!(winner = %winner, loser = %loser, rounds, "duel resolved");

    DuelResult {
        winner,
        loser,
        rounds,
        first_fraction,
        second_fraction,
    }
}
