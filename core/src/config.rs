//! Typed game configuration.
//!
//! RULE: Every knob is a named field with a documented default, loaded
//! once and validated at construction. Engines never probe loose
//! key/value maps at call time.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// One slice of the multiplier-selection probability space: multipliers
/// in [low, high] are drawn with probability weight / total weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RewardBand {
    pub low:    f64,
    pub high:   f64,
    pub weight: f64,
}

impl RewardBand {
    pub const fn new(low: f64, high: f64, weight: f64) -> Self {
        Self { low, high, weight }
    }
}

/// The stock band table. Five bands, total weight 100; long-run
/// expected value sits just under break-even. Changing these numbers
/// changes live payout behavior; treat them as frozen.
pub fn default_reward_bands() -> Vec<RewardBand> {
    vec![
        RewardBand::new(0.0, 0.5, 40.0),
        RewardBand::new(0.5, 0.9, 30.0),
        RewardBand::new(0.9, 1.2, 20.0),
        RewardBand::new(1.5, 3.0, 8.0),
        RewardBand::new(3.0, 5.0, 2.0),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WipeBombConfig {
    pub reward_bands: Vec<RewardBand>,
}

impl Default for WipeBombConfig {
    fn default() -> Self {
        Self { reward_bands: default_reward_bands() }
    }
}

impl WipeBombConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.reward_bands.is_empty() {
            return Err(GameError::Config(
                "wipe_bomb.reward_bands must not be empty".into(),
            ));
        }
        for (i, band) in self.reward_bands.iter().enumerate() {
            if band.low < 0.0 || band.high < band.low {
                return Err(GameError::Config(format!(
                    "wipe_bomb.reward_bands[{i}]: invalid range [{}, {}]",
                    band.low, band.high
                )));
            }
            if band.weight < 0.0 {
                return Err(GameError::Config(format!(
                    "wipe_bomb.reward_bands[{i}]: negative weight {}",
                    band.weight
                )));
            }
        }
        let total: f64 = self.reward_bands.iter().map(|b| b.weight).sum();
        if total <= 0.0 {
            return Err(GameError::Config(
                "wipe_bomb.reward_bands: total weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StealConfig {
    /// Minimum seconds between steals by the same player. Default 4 hours.
    pub cooldown_seconds: i64,
}

impl Default for StealConfig {
    fn default() -> Self {
        Self { cooldown_seconds: 14_400 }
    }
}

impl StealConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.cooldown_seconds <= 0 {
            return Err(GameError::Config(format!(
                "steal.cooldown_seconds must be positive, got {}",
                self.cooldown_seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Outcome reporting is off unless explicitly enabled.
    pub enabled: bool,
    /// Collector URL for wipe bomb outcome reports.
    pub endpoint: String,
    /// Per-request timeout for the outbound POST. Default 10 seconds.
    pub request_timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl NotifierConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.enabled && self.endpoint.is_empty() {
            return Err(GameError::Config(
                "notifier.endpoint must be set when notifier.enabled".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub wipe_bomb: WipeBombConfig,
    pub steal:     StealConfig,
    pub notifier:  NotifierConfig,
}

impl GameConfig {
    /// Load and validate a JSON config file. Missing fields fall back
    /// to the documented defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GameConfig =
            serde_json::from_str(&raw).with_context(|| format!("Malformed config {path}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        self.wipe_bomb.validate()?;
        self.steal.validate()?;
        self.notifier.validate()?;
        Ok(())
    }
}
