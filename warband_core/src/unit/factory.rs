use super::Unit;
use crate::config::constants;
use crate::types::{CharacterClass, Stats, UnitId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Creates units with rolled stats and monotonically increasing ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitFactory {
    next_id: u64,
}

impl Default for UnitFactory {
    fn default() -> Self {
        UnitFactory { next_id: 1 }
    }
}

impl UnitFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume handing out ids from `next_id` (ids start at 1)
    pub fn starting_at(next_id: u64) -> Self {
        UnitFactory {
            next_id: next_id.max(1),
        }
    }

    /// The id the next created unit will get
    pub fn next_id(&self) -> UnitId {
        UnitId(self.next_id)
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a unit with base stats rolled from the class ranges
    pub fn create(&mut self, class: CharacterClass, rng: &mut impl Rng) -> Unit {
        let stats = constants().classes.profile(class).roll(rng);
        self.create_with_stats(class, stats)
    }

    /// Create a unit with explicit base stats
    pub fn create_with_stats(&mut self, class: CharacterClass, stats: Stats) -> Unit {
        let unit = Unit::new(self.allocate_id(), class, stats);
        tracing::debug!(id = %unit.id, class = %class, "created unit");
        unit
    }
}
