use serde::Deserialize;
use std::collections::BTreeMap;

/// TOML configuration for an equipment catalog file
#[derive(Debug, Deserialize)]
pub struct CatalogFileConfig {
    #[serde(default)]
    pub weapons: Vec<TemplateConfig>,
    #[serde(default)]
    pub armor: Vec<TemplateConfig>,
}

/// A single template entry
///
/// ```toml
/// [[weapons]]
/// name = "Sword"
/// stats = { strength = 3, critical_chance = 0.05 }
/// ```
#[derive(Debug, Deserialize)]
pub struct TemplateConfig {
    pub name: String,
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
}
