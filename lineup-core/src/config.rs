//! Unified configuration schema for lineup.
//!
//! The config file carries the bot token, the roster, and the two knobs
//! that shape every selection: how many characters a roll hands out and
//! how many rerolls it allows.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::MAX_SLOTS;
use crate::roster::{Character, Roster};

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Chat-platform bot token. Consumed by the (external) transport layer.
    pub token: String,
    /// Number of characters handed out per roll.
    pub characters_given: u32,
    /// Reroll budget per roll. Zero creates selections already locked.
    pub max_rerolls: u32,
    /// The full candidate roster.
    pub characters: Vec<Character>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Field-level validation, run once at startup before the feature is
    /// offered. Mirrors the selection-creation preconditions so a bad
    /// roster/slots/rerolls combination is refused up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "token must be non-empty".to_string(),
            ));
        }
        if self.characters_given < 1 || self.characters_given >= MAX_SLOTS {
            return Err(ConfigError::Invalid(format!(
                "characters_given must be >= 1 and < {} (platform component limit), got {}",
                MAX_SLOTS, self.characters_given
            )));
        }
        let n = self.characters.len();
        let given = self.characters_given as usize;
        if !(n > given || (n == given && self.max_rerolls == 0)) {
            return Err(ConfigError::Invalid(format!(
                "characters must hold more entries than characters_given \
                 (or exactly as many with max_rerolls=0): {} entries for {} slots \
                 with {} rerolls",
                n, given, self.max_rerolls
            )));
        }
        for (i, c) in self.characters.iter().enumerate() {
            if c.text.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "characters[{}].text must be non-empty",
                    i
                )));
            }
        }
        Ok(())
    }

    /// Build the shared roster from the configured characters.
    pub fn roster(&self) -> Roster {
        Roster::new(self.characters.clone())
    }
}
