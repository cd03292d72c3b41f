//! Configuration schema types for `pxf.toml`

use serde::{Deserialize, Serialize};

/// Mosaic settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicConfig {
    /// Seed for the random source that places mosaic seeds
    #[serde(default = "default_rng_seed")]
    pub seed: u64,
    /// Seed count used when a mosaic is requested without one
    #[serde(default = "default_seed_count")]
    pub default_seeds: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self { seed: default_rng_seed(), default_seeds: default_seed_count() }
    }
}

fn default_rng_seed() -> u64 {
    42
}

fn default_seed_count() -> usize {
    1000
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PxfConfig {
    #[serde(default)]
    pub mosaic: MosaicConfig,
}

/// A validation error in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "mosaic.default_seeds")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxf.toml: '{}' {}", self.field, self.message)
    }
}

impl PxfConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.mosaic.default_seeds == 0 {
            errors.push(ConfigValidationError {
                field: "mosaic.default_seeds".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PxfConfig = toml::from_str("").unwrap();
        assert_eq!(config, PxfConfig::default());
        assert_eq!(config.mosaic.seed, 42);
        assert_eq!(config.mosaic.default_seeds, 1000);
    }

    #[test]
    fn test_partial_mosaic_section() {
        let config: PxfConfig = toml::from_str("[mosaic]\nseed = 7\n").unwrap();
        assert_eq!(config.mosaic.seed, 7);
        assert_eq!(config.mosaic.default_seeds, 1000);
    }

    #[test]
    fn test_zero_default_seeds_is_invalid() {
        let config: PxfConfig = toml::from_str("[mosaic]\ndefault_seeds = 0\n").unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mosaic.default_seeds");
        assert_eq!(errors[0].to_string(), "pxf.toml: 'mosaic.default_seeds' must be a positive integer");
    }
}
