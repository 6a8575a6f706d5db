//! Filter specifications
//!
//! Human-facing filter parameters (type, frequency, Q, gain) together with
//! the sample rate they are designed for.

use crate::error::{EqError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default Q for low/high/band pass filters (Butterworth)
pub const DEFAULT_Q_PASS: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Default Q for shelf filters, a bandwidth of about 1.307 octaves
pub const DEFAULT_Q_SHELF: f64 = 1.066_867_653_633_230_4;

/// Converts a bandwidth in octaves to a Q factor.
pub fn bw_to_q(bw_octaves: f64) -> f64 {
    let two_pow_bw = 2.0_f64.powf(bw_octaves);
    two_pow_bw.sqrt() / (two_pow_bw - 1.0)
}

/// Converts a Q factor to a bandwidth in octaves.
pub fn q_to_bw(q: f64) -> f64 {
    let q2 = (2.0 * q * q + 1.0) / (2.0 * q * q);
    (q2 + (q2 * q2 - 1.0).sqrt()).log2()
}

/// Filter type for EQ bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Bell curve boost/cut
    #[default]
    Peak,
    /// Boost/cut below frequency
    LowShelf,
    /// Boost/cut above frequency
    HighShelf,
    /// Remove above frequency
    LowPass,
    /// Remove below frequency
    HighPass,
    /// Pass a band around the frequency (constant 0 dB peak gain)
    BandPass,
    /// Reject a band around the frequency
    Notch,
}

impl FilterType {
    /// All filter types, in display order
    pub const ALL: [FilterType; 7] = [
        FilterType::Peak,
        FilterType::LowShelf,
        FilterType::HighShelf,
        FilterType::LowPass,
        FilterType::HighPass,
        FilterType::BandPass,
        FilterType::Notch,
    ];

    /// Two-letter code (e.g. "PK")
    pub fn short_name(&self) -> &'static str {
        match self {
            FilterType::Peak => "PK",
            FilterType::LowShelf => "LS",
            FilterType::HighShelf => "HS",
            FilterType::LowPass => "LP",
            FilterType::HighPass => "HP",
            FilterType::BandPass => "BP",
            FilterType::Notch => "NO",
        }
    }

    /// Display name (e.g. "LowShelf")
    pub fn long_name(&self) -> &'static str {
        match self {
            FilterType::Peak => "Peak",
            FilterType::LowShelf => "LowShelf",
            FilterType::HighShelf => "HighShelf",
            FilterType::LowPass => "LowPass",
            FilterType::HighPass => "HighPass",
            FilterType::BandPass => "BandPass",
            FilterType::Notch => "Notch",
        }
    }

    /// Whether `gain_db` changes the design
    pub fn uses_gain(&self) -> bool {
        matches!(
            self,
            FilterType::Peak | FilterType::LowShelf | FilterType::HighShelf
        )
    }

    /// Q to fall back on when the UI has none for this type
    pub fn default_q(&self) -> f64 {
        match self {
            FilterType::LowShelf | FilterType::HighShelf => DEFAULT_Q_SHELF,
            FilterType::LowPass | FilterType::HighPass | FilterType::BandPass => DEFAULT_Q_PASS,
            FilterType::Peak | FilterType::Notch => 1.0,
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for FilterType {
    type Err = EqError;

    /// Accepts long or short names, case-insensitively, with or without
    /// separators ("low_shelf", "Low-Shelf", "LS").
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        let filter_type = match key.as_str() {
            "peak" | "peaking" | "pk" | "bell" => FilterType::Peak,
            "lowshelf" | "ls" => FilterType::LowShelf,
            "highshelf" | "hs" => FilterType::HighShelf,
            "lowpass" | "lp" => FilterType::LowPass,
            "highpass" | "hp" => FilterType::HighPass,
            "bandpass" | "bp" => FilterType::BandPass,
            "notch" | "no" => FilterType::Notch,
            _ => {
                return Err(EqError::UnknownFilterType {
                    name: s.to_string(),
                })
            }
        };
        Ok(filter_type)
    }
}

/// Immutable description of one filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub filter_type: FilterType,
    /// Center/corner frequency in Hz, 0 < f < sample_rate / 2
    pub frequency: f64,
    /// Quality factor, > 0
    pub q: f64,
    /// Gain in dB (ignored by pass/notch types)
    pub gain_db: f64,
    /// Sample rate in Hz, > 0
    pub sample_rate: f64,
}

impl FilterSpec {
    /// Create a validated filter specification
    ///
    /// # Errors
    /// `InvalidParameter` when any value is non-finite, `q <= 0`,
    /// `sample_rate <= 0` or `frequency` lies outside (0, Nyquist).
    pub fn new(
        filter_type: FilterType,
        frequency: f64,
        q: f64,
        gain_db: f64,
        sample_rate: f64,
    ) -> Result<Self> {
        let spec = Self::new_unchecked(filter_type, frequency, q, gain_db, sample_rate);
        spec.validate()?;
        Ok(spec)
    }

    /// Create a specification without validation
    ///
    /// Degenerate values are passed straight through to the designer, which
    /// will produce `NaN`/`inf` coefficients for them.
    pub const fn new_unchecked(
        filter_type: FilterType,
        frequency: f64,
        q: f64,
        gain_db: f64,
        sample_rate: f64,
    ) -> Self {
        Self {
            filter_type,
            frequency,
            q,
            gain_db,
            sample_rate,
        }
    }

    /// Create a peak filter spec
    pub fn peak(frequency: f64, q: f64, gain_db: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::Peak, frequency, q, gain_db, sample_rate)
    }

    /// Create a low shelf filter spec
    pub fn low_shelf(frequency: f64, q: f64, gain_db: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::LowShelf, frequency, q, gain_db, sample_rate)
    }

    /// Create a high shelf filter spec
    pub fn high_shelf(frequency: f64, q: f64, gain_db: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::HighShelf, frequency, q, gain_db, sample_rate)
    }

    /// Create a low-pass filter spec
    pub fn low_pass(frequency: f64, q: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::LowPass, frequency, q, 0.0, sample_rate)
    }

    /// Create a high-pass filter spec
    pub fn high_pass(frequency: f64, q: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::HighPass, frequency, q, 0.0, sample_rate)
    }

    /// Create a band-pass filter spec
    pub fn band_pass(frequency: f64, q: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::BandPass, frequency, q, 0.0, sample_rate)
    }

    /// Create a notch filter spec
    pub fn notch(frequency: f64, q: f64, sample_rate: f64) -> Result<Self> {
        Self::new(FilterType::Notch, frequency, q, 0.0, sample_rate)
    }

    /// Nyquist frequency for this spec's sample rate
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EqError::invalid("sample_rate", self.sample_rate, "> 0 Hz"));
        }

        if !self.frequency.is_finite() || self.frequency <= 0.0 || self.frequency >= self.nyquist()
        {
            return Err(EqError::invalid(
                "frequency",
                self.frequency,
                format!("0 < f < {} Hz", self.nyquist()),
            ));
        }

        if !self.q.is_finite() || self.q <= 0.0 {
            return Err(EqError::invalid("q", self.q, "> 0"));
        }

        if !self.gain_db.is_finite() {
            return Err(EqError::invalid("gain_db", self.gain_db, "a finite dB value"));
        }

        Ok(())
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type:{},Freq:{:.1},Rate:{:.1},Q:{:.3},Gain:{:.1}",
            self.filter_type.short_name(),
            self.frequency,
            self.sample_rate,
            self.q,
            self.gain_db
        )
    }
}
