use crate::catalog::Catalog;
use crate::item::Equipment;
use crate::types::{Rarity, Slot};
use crate::GearError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Equipment generator backed by a template catalog
#[derive(Debug, Clone, Default)]
pub struct Generator {
    catalog: Catalog,
}

impl Generator {
    pub fn new(catalog: Catalog) -> Self {
        Generator { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Roll a rarity from the fixed cumulative table
    pub fn roll_rarity(rng: &mut impl Rng) -> Rarity {
        Rarity::from_roll(rng.gen::<f64>())
    }

    /// Generate a weapon of the given tier
    pub fn generate_weapon(
        &self,
        tier: u32,
        forced_rarity: Option<Rarity>,
        rng: &mut impl Rng,
    ) -> Result<Equipment, GearError> {
        self.generate(Slot::Weapon, tier, forced_rarity, rng)
    }

    /// Generate an armor piece of the given tier
    pub fn generate_armor(
        &self,
        tier: u32,
        forced_rarity: Option<Rarity>,
        rng: &mut impl Rng,
    ) -> Result<Equipment, GearError> {
        self.generate(Slot::Armor, tier, forced_rarity, rng)
    }

    /// Generate an item for a slot: uniform template pick, then rarity roll
    /// unless one is forced
    pub fn generate(
        &self,
        slot: Slot,
        tier: u32,
        forced_rarity: Option<Rarity>,
        rng: &mut impl Rng,
    ) -> Result<Equipment, GearError> {
        if tier == 0 {
            return Err(GearError::InvalidTier(tier));
        }

        let template = self
            .catalog
            .templates(slot)
            .choose(rng)
            .ok_or(GearError::EmptyTemplateSet(slot))?;

        let rarity = match forced_rarity {
            Some(rarity) => rarity,
            None => Self::roll_rarity(rng),
        };

        Ok(Equipment::from_template(template, tier, rarity))
    }
}
