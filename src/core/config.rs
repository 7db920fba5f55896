/*!
 * Arena Configuration
 * Capacity and placement strategy, loaded from defaults, environment or JSON
 */

use super::errors::{ArenaError, ArenaResult};
use super::limits::DEFAULT_ARENA_CAPACITY;
use crate::memory::Strategy;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the arena capacity in bytes
pub const ENV_CAPACITY: &str = "ARENA_CAPACITY";

/// Environment variable holding the placement strategy name
pub const ENV_STRATEGY: &str = "ARENA_STRATEGY";

/// Arena configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Requested capacity in bytes (rounded up to 4 at init)
    pub capacity: usize,
    /// Placement strategy
    pub strategy: Strategy,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ARENA_CAPACITY,
            strategy: Strategy::FirstFit,
        }
    }
}

impl ArenaConfig {
    pub const fn new(capacity: usize, strategy: Strategy) -> Self {
        Self { capacity, strategy }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Load configuration from the environment
    ///
    /// Environment variables:
    /// - ARENA_CAPACITY: capacity in bytes (default: 64KB)
    /// - ARENA_STRATEGY: first_fit | next_fit | best_fit | worst_fit (default: first_fit)
    pub fn from_env() -> ArenaResult<Self> {
        let mut config = Self::default();

        if let Some(capacity) = Self::capacity_from_env()? {
            config.capacity = capacity;
        }
        if let Some(strategy) = Self::strategy_from_env()? {
            config.strategy = strategy;
        }

        debug!(
            capacity = config.capacity,
            strategy = %config.strategy,
            "Loaded arena configuration from environment"
        );
        Ok(config)
    }

    /// `ARENA_CAPACITY`, if set
    pub fn capacity_from_env() -> ArenaResult<Option<usize>> {
        match std::env::var(ENV_CAPACITY) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ArenaError::Configuration(format!(
                    "{} is not a byte count: {:?}",
                    ENV_CAPACITY, raw
                ))
            }),
            Err(_) => Ok(None),
        }
    }

    /// `ARENA_STRATEGY`, if set
    pub fn strategy_from_env() -> ArenaResult<Option<Strategy>> {
        match std::env::var(ENV_STRATEGY) {
            Ok(raw) => raw.parse().map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Parse configuration from a JSON document
    ///
    /// Missing fields fall back to defaults; unknown fields and unknown
    /// strategy names are rejected.
    pub fn from_json(json: &str) -> ArenaResult<Self> {
        serde_json::from_str(json).map_err(|e| ArenaError::Configuration(e.to_string()))
    }
}
