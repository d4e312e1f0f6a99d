//! Generation configuration with documented constants
//!
//! Every bound the generators fall back to when a caller does not pass
//! one explicitly lives here, together with the retry budgets that keep
//! rejection sampling finite.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Configuration for the generation engine
///
/// Values mirror the ranges used by the upper-primary question banks.
/// Widening the operand range makes exact division rarer, so raise
/// `max_synthesis_attempts` alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    // === EXPRESSION OPERANDS ===
    /// Smallest operand drawn for a synthesized expression
    pub operand_min: i64,

    /// Largest operand drawn for a synthesized expression
    ///
    /// At 20, a three-operator expression tops out around 8000 before the
    /// magnitude cap rejects it.
    pub operand_max: i64,

    /// Result cap used when the caller does not supply one
    pub default_max_magnitude: i64,

    // === RETRY BUDGETS ===
    /// Attempts allowed before synthesis gives up
    ///
    /// With division enabled and four operators roughly one candidate in
    /// forty survives, so 1000 leaves a wide margin.
    pub max_synthesis_attempts: u32,

    /// Offset draws allowed when filling up a distractor list
    pub max_filler_attempts: u32,

    /// Attempts allowed when drawing an exact division problem
    pub max_division_attempts: u32,

    // === TARGET EXPRESSIONS ===
    /// Largest factor offered when writing a target as a product
    pub max_target_factor: i64,

    /// Seed for the process-wide random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            operand_min: 1,
            operand_max: 20,
            default_max_magnitude: 1000,

            max_synthesis_attempts: 1000,
            max_filler_attempts: 50,
            max_division_attempts: 100,

            max_target_factor: 12,
            seed: None,
        }
    }
}

impl ForgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ForgeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.operand_min < 1 {
            return Err(ForgeError::Config(format!(
                "operand_min ({}) must be at least 1",
                self.operand_min
            )));
        }

        if self.operand_min > self.operand_max {
            return Err(ForgeError::Config(format!(
                "operand_min ({}) should be <= operand_max ({})",
                self.operand_min, self.operand_max
            )));
        }

        if self.default_max_magnitude < 0 {
            return Err(ForgeError::Config(
                "default_max_magnitude must be non-negative".into(),
            ));
        }

        if self.max_synthesis_attempts == 0
            || self.max_filler_attempts == 0
            || self.max_division_attempts == 0
        {
            return Err(ForgeError::Config("Attempt budgets must be positive".into()));
        }

        if self.max_target_factor < 2 {
            return Err(ForgeError::Config(format!(
                "max_target_factor ({}) must be at least 2",
                self.max_target_factor
            )));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ForgeConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static ForgeConfig {
    CONFIG.get_or_init(ForgeConfig::default)
}

/// Set the global config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ForgeConfig) -> std::result::Result<(), ForgeConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ForgeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_operand_range_rejected() {
        let config = ForgeConfig {
            operand_min: 30,
            operand_max: 20,
            ..ForgeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ForgeError::Config(_))));
    }

    #[test]
    fn test_zero_attempt_budget_rejected() {
        let config = ForgeConfig {
            max_synthesis_attempts: 0,
            ..ForgeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ForgeConfig::from_toml_str(
            r#"
            operand_max = 12
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.operand_max, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.operand_min, 1);
        assert_eq!(config.max_synthesis_attempts, 1000);
    }

    #[test]
    fn test_invalid_toml_values_rejected() {
        let result = ForgeConfig::from_toml_str("operand_min = 0");
        assert!(result.is_err());
    }
}
