//! Response configuration
//!
//! Sample rate, display sweep and the combiner constants, loadable from a
//! JSON file. Missing keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::{
    generate_log_frequencies, CombineMode, ResponseCombiner, DEFAULT_FREQUENCY_TOLERANCE_HZ,
    DEFAULT_MAGNITUDE_FLOOR,
};
use crate::error::{EqError, Result};

/// Settings for computing EQ response traces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,
    /// Lowest display frequency in Hz
    pub min_frequency: f64,
    /// Highest display frequency in Hz
    pub max_frequency: f64,
    /// Number of log-spaced points in the sweep
    pub num_points: usize,
    /// Linear magnitude floor applied before converting to dB
    pub magnitude_floor: f64,
    /// Tolerance (Hz) when matching frequency grids
    pub frequency_tolerance_hz: f64,
    /// How the combined trace is computed
    pub combine_mode: CombineMode,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            min_frequency: 20.0,
            max_frequency: 20000.0,
            num_points: 200,
            magnitude_floor: DEFAULT_MAGNITUDE_FLOOR,
            frequency_tolerance_hz: DEFAULT_FREQUENCY_TOLERANCE_HZ,
            combine_mode: CombineMode::default(),
        }
    }
}

impl ResponseConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ResponseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents).map_err(|e| EqError::ConfigError {
            reason: format!("{}: {}", path.display(), e),
        })?;
        tracing::debug!(path = %path.display(), "loaded response config");
        Ok(config)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EqError::invalid("sample_rate", self.sample_rate, "> 0 Hz"));
        }

        // Same rules as the sweep itself
        generate_log_frequencies(self.min_frequency, self.max_frequency, self.num_points)?;

        if !self.magnitude_floor.is_finite() || self.magnitude_floor <= 0.0 {
            return Err(EqError::invalid("magnitude_floor", self.magnitude_floor, "> 0"));
        }

        if !self.frequency_tolerance_hz.is_finite() || self.frequency_tolerance_hz < 0.0 {
            return Err(EqError::invalid(
                "frequency_tolerance_hz",
                self.frequency_tolerance_hz,
                ">= 0 Hz",
            ));
        }

        Ok(())
    }

    /// The configured log sweep
    pub fn frequencies(&self) -> Result<Vec<f64>> {
        generate_log_frequencies(self.min_frequency, self.max_frequency, self.num_points)
    }

    /// A combiner using the configured tolerance and floor
    pub fn combiner(&self) -> ResponseCombiner {
        ResponseCombiner::new(self.frequency_tolerance_hz, self.magnitude_floor)
    }
}
