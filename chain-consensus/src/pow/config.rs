//! PoW consensus configuration

use crate::{ConsensusError, ConsensusResult};
use serde::{Deserialize, Serialize};

/// Leading zero characters required by default
pub const DEFAULT_DIFFICULTY: usize = 2;

/// A hex SHA-256 digest has 64 characters
pub const MAX_DIFFICULTY: usize = 64;

/// PoW consensus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowConfig {
    /// Number of leading `'0'` hex characters an accepted hash must carry
    pub difficulty: usize,
    /// Upper bound on hashes computed per seal; `None` searches until found
    pub max_attempts: Option<u64>,
}

impl Default for PowConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: None,
        }
    }
}

impl PowConfig {
    /// Create a new PoW configuration
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty,
            max_attempts: None,
        }
    }

    /// Set the search bound
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set difficulty
    pub fn with_difficulty(mut self, difficulty: usize) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConsensusResult<()> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(ConsensusError::Config(format!(
                "Difficulty {} exceeds the {} characters of a digest",
                self.difficulty, MAX_DIFFICULTY
            )));
        }

        if self.max_attempts == Some(0) {
            return Err(ConsensusError::Config(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The zero prefix an accepted hash starts with
    pub fn target_prefix(&self) -> String {
        "0".repeat(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowConfig::default();
        assert_eq!(config.difficulty, 2);
        assert!(config.max_attempts.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.target_prefix(), "00");
    }

    #[test]
    fn test_config_validation() {
        let mut config = PowConfig::new(65);
        assert!(config.validate().is_err());

        config.difficulty = 64;
        assert!(config.validate().is_ok());

        config.max_attempts = Some(0);
        assert!(matches!(config.validate(), Err(ConsensusError::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = PowConfig::default()
            .with_difficulty(3)
            .with_max_attempts(1_000);

        assert_eq!(config.difficulty, 3);
        assert_eq!(config.max_attempts, Some(1_000));
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: PowConfig = serde_json::from_str(r#"{"max_attempts": 10}"#).unwrap();
        assert_eq!(config.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(config.max_attempts, Some(10));
    }
}
