use crate::game::{MAX_DECK_SIZE, MAX_EXTRAS_SIZE, MAX_HAND_SIZE};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Run parameters. Defaults reproduce the reference setup: a 5-card
/// opening hand, 15 extras, ten million trials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub hand_size: usize,
    pub extras_capacity: usize,
    pub trials: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            hand_size: 5,
            extras_capacity: MAX_EXTRAS_SIZE,
            trials: 10_000_000,
        }
    }
}

impl SimConfig {
    /// Load overrides from a JSON file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check parameters against hard limits and the configured deck size
    pub fn validate(&self, deck_size: usize) -> Result<(), ConfigError> {
        if deck_size == 0 || deck_size > MAX_DECK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "deck size must be between 1 and {MAX_DECK_SIZE}, got {deck_size}"
            )));
        }
        if self.hand_size == 0 || self.hand_size > MAX_HAND_SIZE {
            return Err(ConfigError::Invalid(format!(
                "hand size must be between 1 and {MAX_HAND_SIZE}, got {}",
                self.hand_size
            )));
        }
        if self.hand_size > deck_size {
            return Err(ConfigError::Invalid(format!(
                "hand size {} exceeds deck size {deck_size}",
                self.hand_size
            )));
        }
        if self.extras_capacity > MAX_EXTRAS_SIZE {
            return Err(ConfigError::Invalid(format!(
                "extras capacity must be at most {MAX_EXTRAS_SIZE}, got {}",
                self.extras_capacity
            )));
        }
        if self.trials == 0 {
            return Err(ConfigError::Invalid("trial count must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = SimConfig::default();
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.extras_capacity, 15);
        assert_eq!(config.trials, 10_000_000);
        assert!(config.validate(40).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"trials": 1000}"#).unwrap();
        assert_eq!(config.trials, 1000);
        assert_eq!(config.hand_size, 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<SimConfig>(r#"{"hand": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_bad_sizes() {
        let config = SimConfig::default();
        assert!(config.validate(0).is_err());
        assert!(config.validate(MAX_DECK_SIZE + 1).is_err());
        assert!(config.validate(3).is_err(), "hand cannot exceed deck");

        let config = SimConfig {
            hand_size: MAX_HAND_SIZE + 1,
            ..SimConfig::default()
        };
        assert!(config.validate(40).is_err());

        let config = SimConfig {
            extras_capacity: MAX_EXTRAS_SIZE + 1,
            ..SimConfig::default()
        };
        assert!(config.validate(40).is_err());

        let config = SimConfig {
            trials: 0,
            ..SimConfig::default()
        };
        assert!(config.validate(40).is_err());
    }
}
