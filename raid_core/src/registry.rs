use crate::config::TierFileConfig;
use crate::tier::{RaidLevel, RaidTier};
use crate::{ConfigError, RaidError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// All raid tiers, keyed by tier level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaidLadder {
    tiers: BTreeMap<u32, RaidTier>,
}

impl RaidLadder {
    /// Create an empty ladder
    pub fn new() -> Self {
        Self::default()
    }

    /// The three built-in tiers: Woods, Caves and Fort
    pub fn standard(rng: &mut impl Rng) -> Self {
        let mut ladder = Self::new();
        ladder.insert(RaidTier::generate(1, "Woods", 50, 1.0, rng));
        ladder.insert(RaidTier::generate(2, "Caves", 150, 1.5, rng));
        ladder.insert(RaidTier::generate(3, "Fort", 300, 2.0, rng));
        ladder
    }

    /// Build a ladder from every `*.toml` tier file under `dir`
    ///
    /// Files are read in sorted path order across the whole tree, so the
    /// rolled rewards depend only on the seed. A missing directory gives an
    /// empty ladder. Two files claiming the same tier level are rejected.
    pub fn load(dir: &Path, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        let mut files = Vec::new();
        collect_tier_files(dir, &mut files)?;
        files.sort();

        let mut ladder = Self::new();
        for path in &files {
            let tier = read_tier_file(path, rng)?;
            if ladder.contains(tier.level) {
                return Err(ConfigError::Validation {
                    message: format!("tier {} is defined more than once", tier.level),
                    path: path.clone(),
                });
            }
            debug!(tier = tier.level, name = %tier.name, path = ?path, "loaded raid tier");
            ladder.insert(tier);
        }
        Ok(ladder)
    }

    /// Add or replace a tier
    pub fn insert(&mut self, tier: RaidTier) {
        self.tiers.insert(tier.level, tier);
    }

    /// Get a tier by level
    pub fn get(&self, tier: u32) -> Option<&RaidTier> {
        self.tiers.get(&tier)
    }

    /// Check if a tier exists
    pub fn contains(&self, tier: u32) -> bool {
        self.tiers.contains_key(&tier)
    }

    /// All tiers in ascending order
    pub fn tiers(&self) -> impl Iterator<Item = &RaidTier> {
        self.tiers.values()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Look up a tier and one of its levels
    pub fn level(&self, tier: u32, level: u32) -> Result<(&RaidTier, &RaidLevel), RaidError> {
        let raid_tier = self.get(tier).ok_or(RaidError::InvalidTier(tier))?;
        let raid_level = raid_tier
            .level(level)
            .ok_or(RaidError::InvalidLevel { tier, level })?;
        Ok((raid_tier, raid_level))
    }
}

fn unreadable(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |error| ConfigError::Io {
        error,
        path: Some(path.to_path_buf()),
    }
}

/// Gather tier file paths below `dir`
fn collect_tier_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ConfigError> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(dir).map_err(unreadable(dir))? {
        let path = entry.map_err(unreadable(dir))?.path();
        if path.is_dir() {
            collect_tier_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(())
}

fn read_tier_file(path: &Path, rng: &mut impl Rng) -> Result<RaidTier, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(unreadable(path))?;
    let file: TierFileConfig = toml::from_str(&content).map_err(|error| ConfigError::Parse {
        error,
        path: path.to_path_buf(),
    })?;
    RaidTier::from_config(file.tier, rng).map_err(|message| ConfigError::Validation {
        message,
        path: path.to_path_buf(),
    })
}
