use serde::Deserialize;

/// TOML configuration for a raid tier file
#[derive(Debug, Deserialize)]
pub struct TierFileConfig {
    pub tier: TierConfig,
}

/// Configuration for the tier itself
#[derive(Debug, Deserialize)]
pub struct TierConfig {
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub coin_cost: u32,
    #[serde(default = "default_difficulty_multiplier")]
    pub difficulty_multiplier: f64,
    /// Overrides the built-in higher-tier loot chance for levels 1-9
    #[serde(default)]
    pub higher_tier_chance: Option<f64>,
    /// Overrides the built-in higher-tier loot chance for the boss level
    #[serde(default)]
    pub boss_higher_tier_chance: Option<f64>,
}

fn default_difficulty_multiplier() -> f64 {
    1.0
}
