//! Resource ledger with all-or-nothing withdrawals

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use warband_core::{Resource, ResourceBundle};

/// Village resource balances
///
/// Balances are unsigned, so they can't go negative; a withdrawal that any
/// single resource can't cover is refused before anything is deducted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLedger {
    balances: BTreeMap<Resource, u32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of one resource (0 if never credited)
    pub fn get(&self, resource: Resource) -> u32 {
        self.balances.get(&resource).copied().unwrap_or(0)
    }

    /// Credit every amount in the bundle
    pub fn add_resources(&mut self, bundle: &ResourceBundle) {
        for (resource, amount) in bundle.iter() {
            let balance = self.balances.entry(resource).or_insert(0);
            *balance = balance.saturating_add(amount);
        }
    }

    /// True if every amount in the bundle is covered
    pub fn can_afford(&self, bundle: &ResourceBundle) -> bool {
        bundle
            .iter()
            .all(|(resource, amount)| self.get(resource) >= amount)
    }

    /// Deduct the whole bundle, or nothing
    ///
    /// Returns false and leaves every balance untouched if any resource is
    /// short.
    pub fn remove_resources(&mut self, bundle: &ResourceBundle) -> bool {
        if !self.can_afford(bundle) {
            return false;
        }
        for (resource, amount) in bundle.iter() {
            if let Some(balance) = self.balances.get_mut(&resource) {
                *balance -= amount;
            }
        }
        true
    }

    /// Current balances as a bundle
    pub fn to_bundle(&self) -> ResourceBundle {
        self.balances.iter().map(|(r, a)| (*r, *a)).collect()
    }
}

impl From<&ResourceBundle> for ResourceLedger {
    fn from(bundle: &ResourceBundle) -> Self {
        let mut ledger = ResourceLedger::new();
        ledger.add_resources(bundle);
        ledger
    }
}

impl fmt::Display for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, resource) in Resource::all().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", resource, self.get(*resource))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn starting() -> ResourceLedger {
        ResourceLedger::from(
            &ResourceBundle::new()
                .with(Resource::Food, 10)
                .with(Resource::Wood, 5)
                .with(Resource::Coins, 100),
        )
    }

    #[test]
    fn test_add_and_get() {
        let mut ledger = starting();
        ledger.add_resources(
            &ResourceBundle::new()
                .with(Resource::Iron, 2)
                .with(Resource::Food, 1),
        );
        assert_eq!(ledger.get(Resource::Food), 11);
        assert_eq!(ledger.get(Resource::Iron), 2);
        assert_eq!(ledger.get(Resource::MagicDust), 0);
    }

    #[test]
    fn test_remove_is_all_or_nothing() {
        let mut ledger = starting();
        let cost = ResourceBundle::new()
            .with(Resource::Food, 4)
            .with(Resource::Wood, 6);
        assert!(!ledger.remove_resources(&cost));
        assert_eq!(ledger, starting());

        let cost = ResourceBundle::new()
            .with(Resource::Food, 4)
            .with(Resource::Wood, 5);
        assert!(ledger.remove_resources(&cost));
        assert_eq!(ledger.get(Resource::Food), 6);
        assert_eq!(ledger.get(Resource::Wood), 0);
    }

    #[test]
    fn test_remove_unknown_resource_fails() {
        let mut ledger = starting();
        assert!(!ledger.remove_resources(&ResourceBundle::new().with(Resource::Flint, 1)));
        // A zero amount of anything is always affordable
        assert!(ledger.remove_resources(&ResourceBundle::new().with(Resource::Flint, 0)));
    }

    #[test]
    fn test_bundle_view() {
        let ledger = starting();
        let bundle = ledger.to_bundle();
        assert_eq!(bundle.get(Resource::Coins), 100);
        assert_eq!(ResourceLedger::from(&bundle), ledger);
    }

    fn resource() -> impl Strategy<Value = Resource> {
        proptest::sample::select(Resource::all().to_vec())
    }

    fn bundle() -> impl Strategy<Value = ResourceBundle> {
        proptest::collection::vec((resource(), 0u32..500), 0..8)
            .prop_map(|pairs| pairs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_remove_then_add_restores(start in bundle(), cost in bundle()) {
            let mut ledger = ResourceLedger::from(&start);
            ledger.add_resources(&cost);
            let before = ledger.clone();

            prop_assert!(ledger.remove_resources(&cost));
            ledger.add_resources(&cost);
            prop_assert_eq!(ledger, before);
        }

        #[test]
        fn prop_failed_remove_leaves_ledger_unchanged(start in bundle(), cost in bundle()) {
            let mut ledger = ResourceLedger::from(&start);
            let before = ledger.clone();
            let affordable = ledger.can_afford(&cost);

            let removed = ledger.remove_resources(&cost);
            prop_assert_eq!(removed, affordable);
            if !removed {
                prop_assert_eq!(&ledger, &before);
            }
            for resource in Resource::all() {
                prop_assert!(ledger.get(*resource) <= before.get(*resource));
            }
        }
    }
}
