//! EQ response computation
//!
//! Turns the filter rows of a parametric EQ into per-filter traces plus a
//! combined trace. This is the entry point used by the plugin UI and by
//! off-thread backend requests, so both compute exactly the same numbers.

use serde::{Deserialize, Serialize};

use crate::dsp::{
    generate_log_frequencies, CombineMode, FilterSpec, FilterType, FrequencyResponse,
    ResponseCombiner,
};
use crate::error::Result;

/// Sweep used for preamp estimation
const PREAMP_MIN_FREQUENCY: f64 = 20.0;
const PREAMP_MAX_FREQUENCY: f64 = 20000.0;
const PREAMP_NUM_POINTS: usize = 200;
/// Clipping margin added by [`preamp_gain_max`]
const PREAMP_MARGIN_DB: f64 = 0.2;

fn default_enabled() -> bool {
    true
}

/// One EQ row as edited in the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterParam {
    /// Filter type name, e.g. "Peak", "lowshelf" or "HP"
    pub filter_type: String,
    /// Center/corner frequency in Hz
    pub frequency: f64,
    pub q: f64,
    /// Gain in dB
    pub gain: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FilterParam {
    pub fn new(filter_type: FilterType, frequency: f64, q: f64, gain: f64) -> Self {
        Self {
            filter_type: filter_type.long_name().to_string(),
            frequency,
            q,
            gain,
            enabled: true,
        }
    }

    /// Parse the type and validate the row against `sample_rate`
    pub fn to_spec(&self, sample_rate: f64) -> Result<FilterSpec> {
        let filter_type: FilterType = self.filter_type.parse()?;
        FilterSpec::new(filter_type, self.frequency, self.q, self.gain, sample_rate)
    }
}

/// Per-filter and combined traces on one frequency grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqResponseResult {
    pub frequencies: Vec<f64>,
    /// One trace per input row; disabled rows are flat
    pub individual_responses: Vec<FrequencyResponse>,
    /// Combination of the enabled rows
    pub combined: FrequencyResponse,
    /// How `combined` was computed
    pub mode: CombineMode,
}

/// Compute per-filter and combined responses with the default combiner
///
/// See [`compute_eq_response_with`].
pub fn compute_eq_response(
    filters: &[FilterParam],
    sample_rate: f64,
    frequencies: Vec<f64>,
    mode: CombineMode,
) -> Result<EqResponseResult> {
    compute_eq_response_with(&ResponseCombiner::default(), filters, sample_rate, frequencies, mode)
}

/// Compute per-filter and combined responses
///
/// Disabled rows get a flat trace and are left out of the combination; with
/// no enabled rows the combined trace is flat too.
///
/// # Errors
/// Unknown filter types and out-of-range parameters of enabled rows.
pub fn compute_eq_response_with(
    combiner: &ResponseCombiner,
    filters: &[FilterParam],
    sample_rate: f64,
    frequencies: Vec<f64>,
    mode: CombineMode,
) -> Result<EqResponseResult> {
    tracing::debug!(
        filters = filters.len(),
        points = frequencies.len(),
        sample_rate,
        %mode,
        "computing EQ response"
    );

    let mut individual_responses = Vec::with_capacity(filters.len());
    let mut enabled = Vec::new();

    for param in filters {
        if !param.enabled {
            individual_responses.push(FrequencyResponse::flat(frequencies.clone()));
            continue;
        }

        let response = param.to_spec(sample_rate)?.response(&frequencies);
        enabled.push(response.clone());
        individual_responses.push(response);
    }

    let combined = if enabled.is_empty() {
        FrequencyResponse::flat(frequencies.clone())
    } else {
        combiner.combine(mode, &enabled)?
    };

    Ok(EqResponseResult {
        frequencies,
        individual_responses,
        combined,
        mode,
    })
}

/// Preamp gain (dB, <= 0) that keeps the cascaded EQ from boosting above 0 dB
///
/// Measured on a 200 point log sweep from 20 Hz to 20 kHz.
pub fn preamp_gain(specs: &[FilterSpec]) -> Result<f64> {
    if specs.is_empty() {
        return Ok(0.0);
    }

    let responses = preamp_responses(specs)?;
    let cascade = ResponseCombiner::default().sum_db(&responses)?;
    Ok(-boost_db(&cascade))
}

/// Worst-case preamp gain (dB, < 0 for any non-empty EQ)
///
/// Takes the larger of the cascade boost and the largest single-filter
/// boost, then adds a 0.2 dB clipping margin. A cut that masks a boost in
/// the cascade still counts here.
pub fn preamp_gain_max(specs: &[FilterSpec]) -> Result<f64> {
    if specs.is_empty() {
        return Ok(0.0);
    }

    let responses = preamp_responses(specs)?;
    let cascade = ResponseCombiner::default().sum_db(&responses)?;
    let individual = responses.iter().map(boost_db).fold(0.0, f64::max);

    Ok(-(individual.max(boost_db(&cascade)) + PREAMP_MARGIN_DB))
}

fn preamp_responses(specs: &[FilterSpec]) -> Result<Vec<FrequencyResponse>> {
    let frequencies =
        generate_log_frequencies(PREAMP_MIN_FREQUENCY, PREAMP_MAX_FREQUENCY, PREAMP_NUM_POINTS)?;
    Ok(specs.iter().map(|s| s.response(&frequencies)).collect())
}

/// Peak level above 0 dB, or 0 when nothing boosts
fn boost_db(response: &FrequencyResponse) -> f64 {
    response.peak_magnitude_db().unwrap_or(0.0).max(0.0)
}
