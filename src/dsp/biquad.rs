//! Biquad coefficient design
//!
//! Maps a [`FilterSpec`] to the six raw coefficients of
//! `H(z) = (b0 + b1*z^-1 + b2*z^-2) / (a0 + a1*z^-1 + a2*z^-2)`.
//! Reference: https://www.w3.org/2011/audio/audio-eq-cookbook.html

use super::filter::{FilterSpec, FilterType};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Unnormalized biquad coefficients
///
/// `a0` is kept as designed; evaluators divide by it. Coefficients are
/// always derived from a [`FilterSpec`] through [`design`], never edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a0: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoefficients {
    /// Unity-gain pass-through
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };

    pub fn b0(&self) -> f64 {
        self.b0
    }

    pub fn b1(&self) -> f64 {
        self.b1
    }

    pub fn b2(&self) -> f64 {
        self.b2
    }

    pub fn a0(&self) -> f64 {
        self.a0
    }

    pub fn a1(&self) -> f64 {
        self.a1
    }

    pub fn a2(&self) -> f64 {
        self.a2
    }

    /// Numerator `[b0, b1, b2]`
    pub fn numerator(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Denominator `[a0, a1, a2]`
    pub fn denominator(&self) -> [f64; 3] {
        [self.a0, self.a1, self.a2]
    }

    /// Copy with every coefficient divided by `a0`
    pub fn normalized(&self) -> Self {
        let a0 = self.a0;
        Self {
            b0: self.b0 / a0,
            b1: self.b1 / a0,
            b2: self.b2 / a0,
            a0: 1.0,
            a1: self.a1 / a0,
            a2: self.a2 / a0,
        }
    }

    /// False for designs that came from degenerate specs (e.g. `q == 0`)
    pub fn is_finite(&self) -> bool {
        self.numerator()
            .iter()
            .chain(self.denominator().iter())
            .all(|c| c.is_finite())
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for BiquadCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "b=[{:.9}, {:.9}, {:.9}] a=[{:.9}, {:.9}, {:.9}]",
            self.b0, self.b1, self.b2, self.a0, self.a1, self.a2
        )
    }
}

/// Calculate biquad coefficients using the Audio EQ Cookbook formulas
///
/// No clamping is applied: callers are expected to pass a validated spec
/// (see [`FilterSpec::new`]). With `q` at or near zero `alpha` diverges and
/// the coefficients come out as `NaN`/`inf`.
pub fn design(spec: &FilterSpec) -> BiquadCoefficients {
    let w0 = 2.0 * PI * spec.frequency / spec.sample_rate;
    let cos_w0 = w0.cos();
    let sin_w0 = w0.sin();
    let alpha = sin_w0 / (2.0 * spec.q);

    // Square root of the linear gain, only meaningful for peak/shelf types
    let a = 10.0_f64.powf(spec.gain_db / 40.0);

    let (b0, b1, b2, a0, a1, a2) = match spec.filter_type {
        FilterType::Peak => (
            1.0 + alpha * a,
            -2.0 * cos_w0,
            1.0 - alpha * a,
            1.0 + alpha / a,
            -2.0 * cos_w0,
            1.0 - alpha / a,
        ),
        FilterType::LowShelf => {
            let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
            (
                a * ((a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
                2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
                a * ((a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
                (a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
                -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
                (a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
            )
        }
        FilterType::HighShelf => {
            let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
            (
                a * ((a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
                -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
                a * ((a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
                (a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
                2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
                (a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
            )
        }
        FilterType::LowPass => (
            (1.0 - cos_w0) / 2.0,
            1.0 - cos_w0,
            (1.0 - cos_w0) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        ),
        FilterType::HighPass => (
            (1.0 + cos_w0) / 2.0,
            -(1.0 + cos_w0),
            (1.0 + cos_w0) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        ),
        FilterType::BandPass => (
            alpha,
            0.0,
            -alpha,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        ),
        FilterType::Notch => (
            1.0,
            -2.0 * cos_w0,
            1.0,
            1.0 + alpha,
            -2.0 * cos_w0,
            1.0 - alpha,
        ),
    };

    tracing::debug!(spec = %spec, "designed biquad");

    BiquadCoefficients {
        b0,
        b1,
        b2,
        a0,
        a1,
        a2,
    }
}
