use crate::config::{CatalogFileConfig, TemplateConfig};
use crate::types::{Slot, StatKind};
use crate::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

static STANDARD_CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The built-in catalog, built on first use and never mutated afterwards
pub fn standard_catalog() -> &'static Catalog {
    STANDARD_CATALOG.get_or_init(Catalog::default)
}

/// An equipment template: unscaled base stats for one kind of item
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub slot: Slot,
    pub stats: BTreeMap<StatKind, f64>,
}

impl Template {
    pub fn new(name: impl Into<String>, slot: Slot, stats: &[(StatKind, f64)]) -> Self {
        Template {
            name: name.into(),
            slot,
            stats: stats.iter().copied().collect(),
        }
    }

    fn from_config(config: TemplateConfig, slot: Slot) -> Result<Self, ConfigError> {
        let mut stats = BTreeMap::new();
        for (key, value) in config.stats {
            let kind: StatKind = key.parse().map_err(|e| {
                ConfigError::Validation(format!("template '{}': {}", config.name, e))
            })?;
            stats.insert(kind, value);
        }
        Ok(Template {
            name: config.name,
            slot,
            stats,
        })
    }
}

/// Read-only lookup tables of weapon and armor templates
#[derive(Debug, Clone)]
pub struct Catalog {
    weapons: Vec<Template>,
    armor: Vec<Template>,
}

impl Catalog {
    pub fn new(weapons: Vec<Template>, armor: Vec<Template>) -> Self {
        Catalog { weapons, armor }
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CatalogFileConfig = toml::from_str(content)?;

        let weapons = config
            .weapons
            .into_iter()
            .map(|t| Template::from_config(t, Slot::Weapon))
            .collect::<Result<Vec<_>, _>>()?;
        let armor = config
            .armor
            .into_iter()
            .map(|t| Template::from_config(t, Slot::Armor))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog { weapons, armor })
    }

    /// All templates for a slot, in declaration order
    pub fn templates(&self, slot: Slot) -> &[Template] {
        match slot {
            Slot::Weapon => &self.weapons,
            Slot::Armor => &self.armor,
        }
    }

    /// Find a template by name
    pub fn template(&self, slot: Slot, name: &str) -> Option<&Template> {
        self.templates(slot).iter().find(|t| t.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        use StatKind::*;

        let weapons = vec![
            Template::new("Sword", Slot::Weapon, &[(Strength, 3.0), (CriticalChance, 0.05)]),
            Template::new("Axe", Slot::Weapon, &[(Strength, 4.0), (Speed, -1.0)]),
            Template::new(
                "Spear",
                Slot::Weapon,
                &[(Strength, 2.0), (Defense, 1.0), (Range, 1.0)],
            ),
            Template::new(
                "Bow",
                Slot::Weapon,
                &[(Strength, 2.0), (Range, 2.0), (CriticalChance, 0.1)],
            ),
            Template::new("Staff", Slot::Weapon, &[(Magic, 3.0), (Intelligence, 2.0)]),
        ];

        let armor = vec![
            Template::new(
                "Leather",
                Slot::Armor,
                &[(Defense, 2.0), (Speed, 1.0), (DefenseMultiplier, 0.05)],
            ),
            Template::new(
                "Chain",
                Slot::Armor,
                &[(Defense, 3.0), (DefenseMultiplier, 0.10)],
            ),
            Template::new(
                "Plate",
                Slot::Armor,
                &[(Defense, 5.0), (Speed, -1.0), (DefenseMultiplier, 0.15)],
            ),
            Template::new(
                "Robe",
                Slot::Armor,
                &[
                    (Defense, 1.0),
                    (Magic, 2.0),
                    (Intelligence, 1.0),
                    (DefenseMultiplier, 0.02),
                ],
            ),
        ];

        Catalog { weapons, armor }
    }
}
