use crate::catalog::Template;
use crate::types::{Rarity, Slot, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Durability of a freshly generated item
pub const MAX_DURABILITY: u32 = 100;

/// A generated equipment instance with its stats already scaled
///
/// Scaling by tier and rarity happens exactly once in [`Equipment::from_template`].
/// Deserialising an item restores the stored stats as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Display name, e.g. "Rare Sword"
    pub name: String,
    /// Template name, e.g. "Sword"
    pub base_name: String,
    pub slot: Slot,
    pub tier: u32,
    pub rarity: Rarity,
    /// Scaled stat bonuses
    pub stats: BTreeMap<StatKind, f64>,
    pub durability: u32,
    pub max_durability: u32,
}

/// Tier scaling factor: 1.0 at tier 1, +0.5 per tier above that
pub fn tier_factor(tier: u32) -> f64 {
    1.0 + 0.5 * (tier.saturating_sub(1)) as f64
}

impl Equipment {
    /// Build an item from a template, scaling by tier then by rarity
    pub fn from_template(template: &Template, tier: u32, rarity: Rarity) -> Self {
        let factor = tier_factor(tier) * rarity.multiplier();
        let stats = template
            .stats
            .iter()
            .map(|(kind, value)| (*kind, value * factor))
            .collect();

        Equipment {
            name: format!("{} {}", rarity, template.name),
            base_name: template.name.clone(),
            slot: template.slot,
            tier,
            rarity,
            stats,
            durability: MAX_DURABILITY,
            max_durability: MAX_DURABILITY,
        }
    }

    /// Get a stat bonus (0 if the item doesn't carry it)
    pub fn stat(&self, kind: StatKind) -> f64 {
        self.stats.get(&kind).copied().unwrap_or(0.0)
    }

    /// Restore durability, capped at max
    pub fn repair(&mut self, amount: u32) {
        self.durability = self.durability.saturating_add(amount).min(self.max_durability);
    }

    /// Lose durability, floored at zero
    pub fn wear(&mut self, amount: u32) {
        self.durability = self.durability.saturating_sub(amount);
    }

    pub fn is_broken(&self) -> bool {
        self.durability == 0
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats: Vec<String> = self
            .stats
            .iter()
            .map(|(kind, value)| format!("{}: {}", kind, format_stat(*value)))
            .collect();
        write!(
            f,
            "{} (Tier {}) | {} | Durability: {}/{}",
            self.name,
            self.tier,
            stats.join(", "),
            self.durability,
            self.max_durability
        )
    }
}

fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Template {
        Template::new(
            "Sword",
            Slot::Weapon,
            &[(StatKind::Strength, 3.0), (StatKind::CriticalChance, 0.05)],
        )
    }

    #[test]
    fn test_tier_factor() {
        assert!((tier_factor(1) - 1.0).abs() < f64::EPSILON);
        assert!((tier_factor(2) - 1.5).abs() < f64::EPSILON);
        assert!((tier_factor(3) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaling_tier_then_rarity() {
        // 3 * 1.5 (tier 2) * 1.5 (rare) = 6.75
        let item = Equipment::from_template(&sword(), 2, Rarity::Rare);
        assert!((item.stat(StatKind::Strength) - 6.75).abs() < 1e-9);
        assert!((item.stat(StatKind::CriticalChance) - 0.1125).abs() < 1e-9);
        assert_eq!(item.name, "Rare Sword");
        assert_eq!(item.base_name, "Sword");
        assert_eq!(item.durability, 100);
    }

    #[test]
    fn test_missing_stat_is_zero() {
        let item = Equipment::from_template(&sword(), 1, Rarity::Common);
        assert_eq!(item.stat(StatKind::Defense), 0.0);
    }

    #[test]
    fn test_repair_and_wear() {
        let mut item = Equipment::from_template(&sword(), 1, Rarity::Common);
        item.wear(30);
        assert_eq!(item.durability, 70);
        item.repair(50);
        assert_eq!(item.durability, 100);
        item.wear(500);
        assert!(item.is_broken());
    }

    #[test]
    fn test_display() {
        let item = Equipment::from_template(&sword(), 1, Rarity::Common);
        let text = item.to_string();
        assert!(text.starts_with("Common Sword (Tier 1)"));
        assert!(text.contains("strength: 3"));
        assert!(text.contains("Durability: 100/100"));
    }

    #[test]
    fn test_serde_preserves_scaled_stats() {
        let item = Equipment::from_template(&sword(), 3, Rarity::Epic);
        let json = serde_json::to_string(&item).unwrap();
        let restored: Equipment = serde_json::from_str(&json).unwrap();
        assert_eq!(item, restored);
    }
}
