//! Ledger configuration

use crate::{LedgerError, LedgerResult};
use chain_consensus::{PowConfig, DEFAULT_DIFFICULTY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `CHAIN_DIFFICULTY=3`
pub const ENV_PREFIX: &str = "CHAIN";

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Leading zero characters required of every mined block hash
    pub difficulty: usize,
    /// Bound on hashes computed per mine; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u64>,
    /// Where the chain snapshot is read from and written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: None,
            snapshot_path: None,
        }
    }
}

impl LedgerConfig {
    /// Create a new ledger configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, then an optional TOML file, then `CHAIN_*` variables
    pub fn load(path: Option<&Path>) -> LedgerResult<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    /// [`LedgerConfig::load`] with a custom environment prefix
    pub fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> LedgerResult<Self> {
        let mut builder =
            config::Config::builder().set_default("difficulty", DEFAULT_DIFFICULTY as u64)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: LedgerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> LedgerResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Set difficulty
    pub fn with_difficulty(mut self, difficulty: usize) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the proof search bound
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set snapshot path
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Engine configuration derived from this ledger configuration
    pub fn pow_config(&self) -> PowConfig {
        PowConfig {
            difficulty: self.difficulty,
            max_attempts: self.max_attempts,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> LedgerResult<()> {
        self.pow_config()
            .validate()
            .map_err(|e| LedgerError::Config(e.to_string()))
    }
}
