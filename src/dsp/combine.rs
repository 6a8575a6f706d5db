//! Combining frequency responses
//!
//! Two explicit modes:
//! - [`CombineMode::Complex`]: coherent pressure summation. Every sample is
//!   turned into a complex pressure, the pressures are added and the sum is
//!   converted back. Two identical responses sum to +6.02 dB.
//! - [`CombineMode::DbSum`]: magnitudes add in dB and phases add. This is the
//!   quick trace drawn for an EQ curve. It is exact for filters in series and
//!   only an approximation of a coherent (parallel) sum.

use super::complex::{
    complex_to_magnitude_phase_with_floor, magnitude_phase_to_complex, ComplexNumber,
    DEFAULT_MAGNITUDE_FLOOR,
};
use super::phase::normalize_phase;
use super::response::FrequencyResponse;
use crate::error::{CombineError, EqError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest frequency difference (Hz) for two grids to count as the same
pub const DEFAULT_FREQUENCY_TOLERANCE_HZ: f64 = 0.1;

/// How a combined response is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Add magnitudes in dB, add phases (series cascade)
    #[default]
    DbSum,
    /// Add complex pressures (coherent parallel sum)
    Complex,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineMode::DbSum => f.write_str("db_sum"),
            CombineMode::Complex => f.write_str("complex"),
        }
    }
}

impl FromStr for CombineMode {
    type Err = EqError;

    fn from_str(s: &str) -> Result<Self, EqError> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "db_sum" | "db" | "dbsum" => Ok(CombineMode::DbSum),
            "complex" | "pressure" => Ok(CombineMode::Complex),
            other => Err(EqError::ConfigError {
                reason: format!("unknown combine mode '{}', expected db_sum or complex", other),
            }),
        }
    }
}

/// Response combiner with tunable grid tolerance and magnitude floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseCombiner {
    /// Largest per-point frequency difference (Hz) accepted between grids
    pub frequency_tolerance_hz: f64,
    /// Linear magnitude floor used when converting sums back to dB
    pub magnitude_floor: f64,
}

impl Default for ResponseCombiner {
    fn default() -> Self {
        Self {
            frequency_tolerance_hz: DEFAULT_FREQUENCY_TOLERANCE_HZ,
            magnitude_floor: DEFAULT_MAGNITUDE_FLOOR,
        }
    }
}

impl ResponseCombiner {
    pub fn new(frequency_tolerance_hz: f64, magnitude_floor: f64) -> Self {
        Self {
            frequency_tolerance_hz,
            magnitude_floor,
        }
    }

    /// Combine with the given mode
    pub fn combine(
        &self,
        mode: CombineMode,
        responses: &[FrequencyResponse],
    ) -> Result<FrequencyResponse, CombineError> {
        match mode {
            CombineMode::DbSum => self.sum_db(responses),
            CombineMode::Complex => self.sum(responses),
        }
    }

    /// Coherent (complex pressure) sum
    ///
    /// # Errors
    /// `Empty` for no responses, `IncompatibleGrids` when the frequency
    /// grids differ in length or by more than the tolerance at any point.
    pub fn sum(&self, responses: &[FrequencyResponse]) -> Result<FrequencyResponse, CombineError> {
        match responses {
            [] => Err(CombineError::Empty),
            [single] => Ok(single.clone()),
            _ => {
                let pressures = self.sum_pressures(responses)?;
                Ok(self.build_response(responses[0].frequencies(), pressures))
            }
        }
    }

    /// Complex sum of `a` and `b`, halved
    pub fn average(
        &self,
        a: &FrequencyResponse,
        b: &FrequencyResponse,
    ) -> Result<FrequencyResponse, CombineError> {
        let pair = [a.clone(), b.clone()];
        let pressures = self.sum_pressures(&pair)?;
        let halved = pressures.into_iter().map(|p| p / 2.0).collect();
        Ok(self.build_response(a.frequencies(), halved))
    }

    /// dB-domain sum: magnitudes add, phases add and are wrapped to [-180, 180]
    pub fn sum_db(&self, responses: &[FrequencyResponse]) -> Result<FrequencyResponse, CombineError> {
        let Some(first) = responses.first() else {
            return Err(CombineError::Empty);
        };
        if responses.len() == 1 {
            return Ok(first.clone());
        }
        self.check_grids(responses)?;

        let n = first.len();
        let mut magnitudes_db = vec![0.0; n];
        let mut phases_deg = vec![0.0; n];
        for response in responses {
            for (acc, m) in magnitudes_db.iter_mut().zip(response.magnitudes_db()) {
                *acc += m;
            }
            for (acc, p) in phases_deg.iter_mut().zip(response.phases_deg()) {
                *acc += p;
            }
        }
        phases_deg.iter_mut().for_each(|p| *p = normalize_phase(*p));

        Ok(FrequencyResponse::from_parts(
            first.frequencies().to_vec(),
            magnitudes_db,
            phases_deg,
        ))
    }

    /// Validate every grid against the first response's grid
    pub fn check_grids(&self, responses: &[FrequencyResponse]) -> Result<(), CombineError> {
        let Some(reference) = responses.first() else {
            return Err(CombineError::Empty);
        };

        for (index, response) in responses.iter().enumerate().skip(1) {
            if response.len() != reference.len() {
                let reason = format!("{} points, expected {}", response.len(), reference.len());
                tracing::warn!(index, %reason, "cannot combine responses");
                return Err(CombineError::IncompatibleGrids { index, reason });
            }

            let mismatch = reference
                .frequencies()
                .iter()
                .zip(response.frequencies())
                .position(|(&a, &b)| !within_tolerance(a, b, self.frequency_tolerance_hz));

            if let Some(point) = mismatch {
                let reason = format!(
                    "frequency {} Hz at point {} does not match {} Hz",
                    response.frequencies()[point],
                    point,
                    reference.frequencies()[point]
                );
                tracing::warn!(index, %reason, "cannot combine responses");
                return Err(CombineError::IncompatibleGrids { index, reason });
            }
        }

        Ok(())
    }

    fn sum_pressures(&self, responses: &[FrequencyResponse]) -> Result<Vec<ComplexNumber>, CombineError> {
        self.check_grids(responses)?;

        let mut pressures = vec![ComplexNumber::default(); responses[0].len()];
        for response in responses {
            let samples = response.magnitudes_db().iter().zip(response.phases_deg());
            for (acc, (&m, &p)) in pressures.iter_mut().zip(samples) {
                *acc += magnitude_phase_to_complex(m, p);
            }
        }
        Ok(pressures)
    }

    fn build_response(&self, frequencies: &[f64], pressures: Vec<ComplexNumber>) -> FrequencyResponse {
        let (magnitudes_db, phases_deg) = pressures
            .into_iter()
            .map(|c| complex_to_magnitude_phase_with_floor(c, self.magnitude_floor))
            .unzip();
        FrequencyResponse::from_parts(frequencies.to_vec(), magnitudes_db, phases_deg)
    }
}

/// NaN frequencies never match
fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Coherent sum with the default tolerance and floor
pub fn sum(responses: &[FrequencyResponse]) -> Result<FrequencyResponse, CombineError> {
    ResponseCombiner::default().sum(responses)
}

/// Coherent average of two responses with the default tolerance and floor
pub fn average(a: &FrequencyResponse, b: &FrequencyResponse) -> Result<FrequencyResponse, CombineError> {
    ResponseCombiner::default().average(a, b)
}

/// dB-domain sum with the default tolerance
pub fn sum_db(responses: &[FrequencyResponse]) -> Result<FrequencyResponse, CombineError> {
    ResponseCombiner::default().sum_db(responses)
}

/// Combine with an explicit mode and the default tolerance and floor
pub fn combine(mode: CombineMode, responses: &[FrequencyResponse]) -> Result<FrequencyResponse, CombineError> {
    ResponseCombiner::default().combine(mode, responses)
}
