//! TOML configuration for the gate oscillator.
//!
//! The embedded `config.toml` provides every default; a user file only needs
//! the keys it wants to change.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::params::GateParams;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Settings for building and rendering a gate oscillator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Length of an offline render in seconds
    pub duration_secs: f64,
    /// Fixed seed for reproducible output; entropy when absent
    pub seed: Option<u64>,
    pub params: GateParams,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            duration_secs: 10.0,
            seed: None,
            params: GateParams::default(),
        }
    }
}

impl GateConfig {
    /// The configuration embedded in the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Examples
    ///
    /// ```
    /// use bleedgate::GateConfig;
    ///
    /// let config = GateConfig::from_toml_str("[params]\ngate_probability = 0.25\n").unwrap();
    /// assert_eq!(config.params.gate_probability, 0.25);
    /// assert_eq!(config.params.frequency, 1.0);
    /// assert_eq!(config.sample_rate, 48000);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GateConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!(target: "config", "loaded {}", path.display());
        Ok(config)
    }

    /// Checks the sample rate, duration and parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(Error::InvalidDuration(self.duration_secs));
        }
        for (range, value) in self.params.fields() {
            if !range.contains(value) {
                return Err(Error::OutOfRange {
                    name: range.name,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Number of samples covered by `duration_secs`, rounded to the nearest sample.
    pub fn total_samples(&self) -> u64 {
        (self.duration_secs * f64::from(self.sample_rate)).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_default() {
        let config = GateConfig::embedded().unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GateConfig::from_toml_str("").unwrap();
        assert_eq!(config, GateConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = GateConfig::from_toml_str(
            r#"
            sample_rate = 44100
            duration_secs = 2.5
            seed = 9

            [params]
            frequency = 4.0
            pulse_width = 0.2
            gate_probability = 0.7
            bleed = 0.3
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.duration_secs, 2.5);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.params, GateParams::new(4.0, 0.2, 0.7, 0.3));
        assert_eq!(config.total_samples(), 110250);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = GateConfig::from_toml_str("[params]\nbleed = 1.5\n").unwrap_err();
        match err {
            Error::OutOfRange { name, value, .. } => {
                assert_eq!(name, "bleed");
                assert_eq!(value, 1.5);
            }
            other => panic!("Expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = GateConfig::from_toml_str("sample_rate = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSampleRate));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let err = GateConfig::from_toml_str("duration_secs = -1.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidDuration(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = GateConfig::from_toml_str("sample_rate = \"fast\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
