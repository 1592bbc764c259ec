//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::{ClassTable, ConfigError};
use gear_core::StatKind;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Falls back to the defaults if nothing was initialized; after the first
/// call the constants are fixed for the life of the process.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub classes: ClassTable,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.arena_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "combat.arena_rounds must be at least 1".to_string(),
            ));
        }
        if self.combat.captive_divisor == 0 {
            return Err(ConfigError::ValidationError(
                "combat.captive_divisor must be at least 1".to_string(),
            ));
        }
        if self.progression.level_multiplier <= 1.0 {
            return Err(ConfigError::ValidationError(
                "progression.level_multiplier must be greater than 1".to_string(),
            ));
        }
        if self.progression.base_experience == 0 {
            return Err(ConfigError::ValidationError(
                "progression.base_experience must be positive".to_string(),
            ));
        }
        if self.progression.min_recovery_days > self.progression.max_recovery_days {
            return Err(ConfigError::ValidationError(
                "progression.min_recovery_days exceeds max_recovery_days".to_string(),
            ));
        }
        self.classes.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Maximum rounds in a duel
    #[serde(default = "default_arena_rounds")]
    pub arena_rounds: u32,
    /// Damage and raid-strength bonus per arena victory
    #[serde(default = "default_victory_bonus")]
    pub victory_bonus: f64,
    /// Raid-strength bonus per survived raid
    #[serde(default = "default_raid_survival_bonus")]
    pub raid_survival_bonus: f64,
    /// Base raid success chance at even strength
    #[serde(default = "default_base_raid_chance")]
    pub base_raid_chance: f64,
    #[serde(default = "default_strength_multiplier")]
    pub strength_multiplier: f64,
    /// Raid success chance never exceeds this
    #[serde(default = "default_max_success_chance")]
    pub max_success_chance: f64,
    /// Fraction of (defender strength / captive_divisor) taken captive
    #[serde(default = "default_capture_rate")]
    pub capture_rate: f64,
    #[serde(default = "default_captive_divisor")]
    pub captive_divisor: u32,
    /// Loot base is defender strength times this
    #[serde(default = "default_resource_multiplier")]
    pub resource_multiplier: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            arena_rounds: default_arena_rounds(),
            victory_bonus: default_victory_bonus(),
            raid_survival_bonus: default_raid_survival_bonus(),
            base_raid_chance: default_base_raid_chance(),
            strength_multiplier: default_strength_multiplier(),
            max_success_chance: default_max_success_chance(),
            capture_rate: default_capture_rate(),
            captive_divisor: default_captive_divisor(),
            resource_multiplier: default_resource_multiplier(),
        }
    }
}

fn default_arena_rounds() -> u32 {
    3
}
fn default_victory_bonus() -> f64 {
    0.1
}
fn default_raid_survival_bonus() -> f64 {
    0.05
}
fn default_base_raid_chance() -> f64 {
    0.4
}
fn default_strength_multiplier() -> f64 {
    1.5
}
fn default_max_success_chance() -> f64 {
    0.9
}
fn default_capture_rate() -> f64 {
    0.4
}
fn default_captive_divisor() -> u32 {
    5
}
fn default_resource_multiplier() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience needed to leave level 1
    #[serde(default = "default_base_experience")]
    pub base_experience: u32,
    /// Each requirement is floor(previous * level_multiplier)
    #[serde(default = "default_level_multiplier")]
    pub level_multiplier: f64,
    /// Health lost per day of recovery
    #[serde(default = "default_health_per_recovery_day")]
    pub health_per_recovery_day: f64,
    #[serde(default = "default_min_recovery_days")]
    pub min_recovery_days: u32,
    #[serde(default = "default_max_recovery_days")]
    pub max_recovery_days: u32,
    #[serde(default)]
    pub training: TrainingCosts,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_experience: default_base_experience(),
            level_multiplier: default_level_multiplier(),
            health_per_recovery_day: default_health_per_recovery_day(),
            min_recovery_days: default_min_recovery_days(),
            max_recovery_days: default_max_recovery_days(),
            training: TrainingCosts::default(),
        }
    }
}

fn default_base_experience() -> u32 {
    100
}
fn default_level_multiplier() -> f64 {
    1.5
}
fn default_health_per_recovery_day() -> f64 {
    10.0
}
fn default_min_recovery_days() -> u32 {
    1
}
fn default_max_recovery_days() -> u32 {
    7
}

/// Point cost of training a stat: floor(base * growth^(current - 1))
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingCosts {
    #[serde(default = "default_strength_cost")]
    pub strength: u32,
    #[serde(default = "default_health_cost")]
    pub health: u32,
    #[serde(default = "default_defense_cost")]
    pub defense: u32,
    #[serde(default = "default_speed_cost")]
    pub speed: u32,
    #[serde(default = "default_intelligence_cost")]
    pub intelligence: u32,
    #[serde(default = "default_cost_growth")]
    pub growth: f64,
}

impl TrainingCosts {
    /// Base cost for a stat, None for stats that can't be trained
    pub fn base_cost(&self, stat: StatKind) -> Option<u32> {
        match stat {
            StatKind::Strength => Some(self.strength),
            StatKind::Health => Some(self.health),
            StatKind::Defense => Some(self.defense),
            StatKind::Speed => Some(self.speed),
            StatKind::Intelligence => Some(self.intelligence),
            _ => None,
        }
    }
}

impl Default for TrainingCosts {
    fn default() -> Self {
        TrainingCosts {
            strength: default_strength_cost(),
            health: default_health_cost(),
            defense: default_defense_cost(),
            speed: default_speed_cost(),
            intelligence: default_intelligence_cost(),
            growth: default_cost_growth(),
        }
    }
}

fn default_strength_cost() -> u32 {
    100
}
fn default_health_cost() -> u32 {
    80
}
fn default_defense_cost() -> u32 {
    90
}
fn default_speed_cost() -> u32 {
    85
}
fn default_intelligence_cost() -> u32 {
    95
}
fn default_cost_growth() -> f64 {
    1.2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.combat.arena_rounds, 3);
        assert!((constants.combat.max_success_chance - 0.9).abs() < f64::EPSILON);
        assert!((constants.progression.level_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(constants.progression.max_recovery_days, 7);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[combat]
arena_rounds = 5
capture_rate = 0.5

[progression]
base_experience = 120
"#;

        let constants = GameConstants::from_toml_str(toml).unwrap();
        assert_eq!(constants.combat.arena_rounds, 5);
        assert!((constants.combat.capture_rate - 0.5).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults
        assert!((constants.combat.victory_bonus - 0.1).abs() < f64::EPSILON);
        assert_eq!(constants.progression.base_experience, 120);
        assert_eq!(constants.progression.training.strength, 100);
    }

    #[test]
    fn test_validation_rejects_flat_curve() {
        let toml = r#"
[progression]
level_multiplier = 1.0
"#;
        let result = GameConstants::from_toml_str(toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("constants.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"[combat]\nresource_multiplier = 3\n").unwrap();

        let constants = GameConstants::load_from_path(&path).unwrap();
        assert_eq!(constants.combat.resource_multiplier, 3);
    }

    #[test]
    fn test_training_base_costs() {
        let costs = TrainingCosts::default();
        assert_eq!(costs.base_cost(StatKind::Health), Some(80));
        assert_eq!(costs.base_cost(StatKind::Magic), None);
    }
}
