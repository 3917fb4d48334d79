//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::game::{
    Chips,
    constants::{DEFAULT_MIN_BET, DEFAULT_STARTING_BANK, MAX_PLAYERS, MIN_PLAYERS},
};

/// Settings every table created by a [`super::TableManager`] shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Seats per table (default: 8)
    pub max_players: usize,

    /// Minimum bet a fresh table starts with
    pub min_bet: Chips,

    /// Bank handed to players who join without naming one
    pub starting_bank: Chips,

    /// Commands that may queue on one table before senders wait
    pub inbox_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: MAX_PLAYERS,
            min_bet: DEFAULT_MIN_BET,
            starting_bank: DEFAULT_STARTING_BANK,
            inbox_capacity: 100,
        }
    }
}

impl TableConfig {
    /// Load from `TABLE_*` environment variables, falling back to the
    /// defaults for anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the loaded values don't validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            max_players: parse_env_or("TABLE_MAX_PLAYERS", defaults.max_players),
            min_bet: parse_env_or("TABLE_MIN_BET", defaults.min_bet),
            starting_bank: parse_env_or("TABLE_STARTING_BANK", defaults.starting_bank),
            inbox_capacity: parse_env_or("TABLE_INBOX_CAPACITY", defaults.inbox_capacity),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(ConfigError::Invalid {
                var: "TABLE_MAX_PLAYERS".to_string(),
                reason: format!("Must be between {MIN_PLAYERS} and {MAX_PLAYERS}"),
            });
        }

        if self.min_bet == 0 {
            return Err(ConfigError::Invalid {
                var: "TABLE_MIN_BET".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.starting_bank < self.min_bet {
            return Err(ConfigError::Invalid {
                var: "TABLE_STARTING_BANK".to_string(),
                reason: format!("Must cover the minimum bet ({})", self.min_bet),
            });
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "TABLE_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
