//! Game configuration.
//!
//! Every field has a default, so a config file only lists what it changes.
//! Loaded from JSON with `serde_json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::UnitKind;

/// Errors that can occur while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the price of a farm grows with the farms a province already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FarmCost {
    /// Always the catalog cost.
    #[default]
    Flat,
    /// Catalog cost plus `step` per farm already in the province.
    PerFarm { step: i64 },
}

impl FarmCost {
    /// Never negative, so a purchase cannot credit the buyer.
    pub fn cost(&self, existing_farms: usize) -> i64 {
        let base = UnitKind::Farm.cost();
        match *self {
            FarmCost::Flat => base,
            FarmCost::PerFarm { step } => (base + step * existing_farms as i64).max(0),
        }
    }
}

/// Tunable rules for one game instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Treasury of each player's starting province.
    pub starting_money: i64,
    pub min_players: usize,
    pub max_players: usize,
    /// Money credited when a soldier clears a tree or grave.
    pub clearing_bonus: i64,
    pub farm_cost: FarmCost,
    /// Pines spread to empty owned neighbors at the start of each round.
    pub tree_spread: bool,
    /// Seed for start-territory placement. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Start tiles are sampled within this fraction of the map's extent
    /// around its center, falling back to the whole map.
    pub start_radius_scale: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_money: 10,
            min_players: 2,
            max_players: 4,
            clearing_bonus: 3,
            farm_cost: FarmCost::Flat,
            tree_spread: false,
            seed: None,
            start_radius_scale: 0.75,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::Invalid(format!(
                "min_players must be at least 2, got {}",
                self.min_players
            )));
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::Invalid(format!(
                "max_players ({}) is below min_players ({})",
                self.max_players, self.min_players
            )));
        }
        if !(0.0..=1.0).contains(&self.start_radius_scale) {
            return Err(ConfigError::Invalid(format!(
                "start_radius_scale must be within 0..=1, got {}",
                self.start_radius_scale
            )));
        }
        if let FarmCost::PerFarm { step } = self.farm_cost {
            if step < 0 {
                return Err(ConfigError::Invalid(format!(
                    "farm_cost step must not be negative, got {step}"
                )));
            }
        }
        Ok(())
    }
}
