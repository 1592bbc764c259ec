//! Named resource counters and bundles of them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A village resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Food,
    Wood,
    Stone,
    Flint,
    Iron,
    Coins,
    MagicDust,
}

impl Resource {
    pub fn all() -> &'static [Resource] {
        &[
            Resource::Food,
            Resource::Wood,
            Resource::Stone,
            Resource::Flint,
            Resource::Iron,
            Resource::Coins,
            Resource::MagicDust,
        ]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Food => write!(f, "food"),
            Resource::Wood => write!(f, "wood"),
            Resource::Stone => write!(f, "stone"),
            Resource::Flint => write!(f, "flint"),
            Resource::Iron => write!(f, "iron"),
            Resource::Coins => write!(f, "coins"),
            Resource::MagicDust => write!(f, "magic dust"),
        }
    }
}

/// A set of resource amounts, e.g. raid loot or a cost
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBundle(BTreeMap<Resource, u32>);

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        self.add(resource, amount);
        self
    }

    /// Amount of a resource (0 if absent)
    pub fn get(&self, resource: Resource) -> u32 {
        self.0.get(&resource).copied().unwrap_or(0)
    }

    /// Add an amount of a resource
    pub fn add(&mut self, resource: Resource, amount: u32) {
        let entry = self.0.entry(resource).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Add every amount from another bundle
    pub fn merge(&mut self, other: &ResourceBundle) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount);
        }
    }

    /// True if no resource has a non-zero amount
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|amount| *amount == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        self.0.iter().map(|(r, a)| (*r, *a))
    }

    /// Sum of all amounts
    pub fn total(&self) -> u64 {
        self.0.values().map(|a| *a as u64).sum()
    }
}

impl FromIterator<(Resource, u32)> for ResourceBundle {
    fn from_iter<I: IntoIterator<Item = (Resource, u32)>>(iter: I) -> Self {
        let mut bundle = ResourceBundle::new();
        for (resource, amount) in iter {
            bundle.add(resource, amount);
        }
        bundle
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(resource, amount)| format!("{} {}", amount, resource))
            .collect();
        if parts.is_empty() {
            write!(f, "nothing")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_accumulates() {
        let mut bundle = ResourceBundle::new().with(Resource::Wood, 3);
        bundle.add(Resource::Wood, 2);
        bundle.add(Resource::Stone, 1);
        assert_eq!(bundle.get(Resource::Wood), 5);
        assert_eq!(bundle.get(Resource::Stone), 1);
        assert_eq!(bundle.get(Resource::Food), 0);
        assert_eq!(bundle.total(), 6);
    }

    #[test]
    fn test_zero_amounts_are_empty() {
        let bundle = ResourceBundle::new().with(Resource::Flint, 0);
        assert!(bundle.is_empty());
        assert_eq!(bundle.to_string(), "nothing");
    }

    #[test]
    fn test_merge() {
        let mut a: ResourceBundle = [(Resource::Food, 4), (Resource::Coins, 10)]
            .into_iter()
            .collect();
        let b = ResourceBundle::new().with(Resource::Food, 1);
        a.merge(&b);
        assert_eq!(a.get(Resource::Food), 5);
        assert_eq!(a.to_string(), "5 food, 10 coins");
    }

    #[test]
    fn test_json_keys_are_snake_case() {
        let bundle = ResourceBundle::new().with(Resource::MagicDust, 2);
        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(json, r#"{"magic_dust":2}"#);
        let back: ResourceBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
