//! Frequency response evaluation
//!
//! Evaluates `H(e^jw)` of a designed biquad on a frequency grid and carries
//! the result around as a [`FrequencyResponse`].

use super::biquad::{design, BiquadCoefficients};
use super::complex::ComplexNumber;
use super::filter::FilterSpec;
use crate::error::{EqError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// ============================================================================
// Frequency Response
// ============================================================================

/// Magnitude and phase sampled on a frequency grid
///
/// All three vectors always have the same length. `frequencies` is expected
/// to be strictly increasing but this is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResponse")]
pub struct FrequencyResponse {
    frequencies: Vec<f64>,
    magnitudes_db: Vec<f64>,
    phases_deg: Vec<f64>,
}

/// Unchecked wire form, validated on the way in
#[derive(Deserialize)]
struct RawResponse {
    frequencies: Vec<f64>,
    magnitudes_db: Vec<f64>,
    phases_deg: Vec<f64>,
}

impl TryFrom<RawResponse> for FrequencyResponse {
    type Error = EqError;

    fn try_from(raw: RawResponse) -> Result<Self> {
        Self::new(raw.frequencies, raw.magnitudes_db, raw.phases_deg)
    }
}

impl FrequencyResponse {
    /// Build a response, checking that the vectors line up
    pub fn new(frequencies: Vec<f64>, magnitudes_db: Vec<f64>, phases_deg: Vec<f64>) -> Result<Self> {
        for (what, found) in [
            ("magnitudes_db", magnitudes_db.len()),
            ("phases_deg", phases_deg.len()),
        ] {
            if found != frequencies.len() {
                return Err(EqError::LengthMismatch {
                    what: what.to_string(),
                    expected: frequencies.len(),
                    found,
                });
            }
        }

        Ok(Self {
            frequencies,
            magnitudes_db,
            phases_deg,
        })
    }

    /// 0 dB, 0 degree response (what a disabled filter contributes)
    pub fn flat(frequencies: Vec<f64>) -> Self {
        let n = frequencies.len();
        Self {
            frequencies,
            magnitudes_db: vec![0.0; n],
            phases_deg: vec![0.0; n],
        }
    }

    /// Internal constructor for callers that built equal-length vectors
    pub(crate) fn from_parts(frequencies: Vec<f64>, magnitudes_db: Vec<f64>, phases_deg: Vec<f64>) -> Self {
        debug_assert_eq!(frequencies.len(), magnitudes_db.len());
        debug_assert_eq!(frequencies.len(), phases_deg.len());
        Self {
            frequencies,
            magnitudes_db,
            phases_deg,
        }
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes_db(&self) -> &[f64] {
        &self.magnitudes_db
    }

    pub fn phases_deg(&self) -> &[f64] {
        &self.phases_deg
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Largest magnitude in dB, or `None` for an empty response
    pub fn peak_magnitude_db(&self) -> Option<f64> {
        self.magnitudes_db.iter().copied().reduce(f64::max)
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate `H(e^jw)` at a single frequency
///
/// The whole denominator, `a0` included, is divided out here.
/// A zero denominator yields `NaN`/`inf`, which only happens for invalid
/// coefficients.
pub fn evaluate_complex(coeffs: &BiquadCoefficients, sample_rate: f64, frequency: f64) -> ComplexNumber {
    let (num, den) = numerator_denominator(coeffs, sample_rate, frequency);
    num / den
}

/// Magnitude response in dB at each of `frequencies`
///
/// No floor is applied, so an exact zero (e.g. a notch evaluated on its
/// center) reports `-inf`.
pub fn evaluate(coeffs: &BiquadCoefficients, sample_rate: f64, frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&f| {
            let (num, den) = numerator_denominator(coeffs, sample_rate, f);
            let h = num.norm() / den.norm();
            20.0 * h.log10()
        })
        .collect()
}

/// Magnitude (dB) and phase (degrees) at each of `frequencies`
pub fn evaluate_response(
    coeffs: &BiquadCoefficients,
    sample_rate: f64,
    frequencies: &[f64],
) -> FrequencyResponse {
    let magnitudes_db = evaluate(coeffs, sample_rate, frequencies);
    let phases_deg = frequencies
        .iter()
        .map(|&f| {
            let (num, den) = numerator_denominator(coeffs, sample_rate, f);
            let phase = num.arg() - den.arg();
            // Difference of two atan2 values lies in (-2pi, 2pi)
            super::phase::normalize_phase(phase * 180.0 / PI)
        })
        .collect();

    FrequencyResponse::from_parts(frequencies.to_vec(), magnitudes_db, phases_deg)
}

/// `(b0 + b1 e^-jw + b2 e^-2jw, a0 + a1 e^-jw + a2 e^-2jw)`
fn numerator_denominator(
    coeffs: &BiquadCoefficients,
    sample_rate: f64,
    frequency: f64,
) -> (ComplexNumber, ComplexNumber) {
    let w = 2.0 * PI * frequency / sample_rate;
    let z_inv = ComplexNumber::from_polar(1.0, -w);
    let z_inv_2 = ComplexNumber::from_polar(1.0, -2.0 * w);

    let num = z_inv * coeffs.b1() + z_inv_2 * coeffs.b2() + coeffs.b0();
    let den = z_inv * coeffs.a1() + z_inv_2 * coeffs.a2() + coeffs.a0();
    (num, den)
}

impl FilterSpec {
    /// Design this filter and evaluate it on `frequencies`
    pub fn response(&self, frequencies: &[f64]) -> FrequencyResponse {
        evaluate_response(&design(self), self.sample_rate, frequencies)
    }
}

// ============================================================================
// Frequency Grid
// ============================================================================

/// `num_points` frequencies evenly spaced in log10, both endpoints included
///
/// # Errors
/// `InvalidSweep` when `num_points < 2`, `InvalidParameter` when a bound is
/// not positive or `max_freq < min_freq`. Equal bounds give a constant grid.
pub fn generate_log_frequencies(min_freq: f64, max_freq: f64, num_points: usize) -> Result<Vec<f64>> {
    if num_points < 2 {
        return Err(EqError::InvalidSweep { num_points });
    }
    if !min_freq.is_finite() || min_freq <= 0.0 {
        return Err(EqError::invalid("min_freq", min_freq, "> 0 Hz"));
    }
    if !max_freq.is_finite() || max_freq < min_freq {
        return Err(EqError::invalid(
            "max_freq",
            max_freq,
            format!(">= min_freq ({} Hz)", min_freq),
        ));
    }

    if max_freq == min_freq {
        return Ok(vec![min_freq; num_points]);
    }

    let log_min = min_freq.log10();
    let log_max = max_freq.log10();
    let step = (log_max - log_min) / (num_points - 1) as f64;

    let mut frequencies: Vec<f64> = (0..num_points)
        .map(|i| 10.0_f64.powf(log_min + step * i as f64))
        .collect();

    // Pin the endpoints so they are exact, not round-tripped through log10
    frequencies[0] = min_freq;
    frequencies[num_points - 1] = max_freq;

    Ok(frequencies)
}
