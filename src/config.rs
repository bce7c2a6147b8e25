use crate::error::{EigenfaceError, Result};
use serde::{Deserialize, Serialize};

/// Knobs consumed by the evaluation pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of basis components to retain (clamped to the data rank).
    pub n_components: usize,
    /// Fraction of each class held out for testing, in (0, 1).
    pub test_fraction: f64,
    /// Seed for the stratified split.
    pub seed: u64,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            n_components: 10,
            test_fraction: 0.2,
            seed: 42,
        }
    }

    pub fn n_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    pub fn test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_components == 0 {
            return Err(EigenfaceError::InvalidComponentCount);
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(EigenfaceError::InvalidParameter(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = EngineConfig::new().n_components(3).test_fraction(0.25).seed(1);
        assert_eq!(config.n_components, 3);
        assert_eq!(config.test_fraction, 0.25);
        assert_eq!(config.seed, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = EngineConfig::from_json(r#"{ "n_components": 5 }"#).unwrap();
        assert_eq!(config.n_components, 5);
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = EngineConfig::from_json("{ n_components: }").unwrap_err();
        assert!(matches!(err, EigenfaceError::InvalidParameter(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(
            EngineConfig::new().n_components(0).validate(),
            Err(EigenfaceError::InvalidComponentCount)
        );
        assert!(EngineConfig::new().test_fraction(0.0).validate().is_err());
        assert!(EngineConfig::new().test_fraction(1.0).validate().is_err());
        assert!(EngineConfig::new().test_fraction(f64::NAN).validate().is_err());
    }
}
