//! CLI Command Implementations
//!
//! Each command writes its result to stdout.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::ResponseConfig;
use crate::dsp::{design, generate_log_frequencies, group_delay, FilterSpec, FilterType};
use crate::eq::{compute_eq_response_with, EqResponseResult, FilterParam};
use crate::error::Result;

/// Response output, with the optional group delay of the combined trace
#[derive(Debug, Serialize)]
pub struct ResponseOutput {
    #[serde(flatten)]
    pub result: EqResponseResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_delay_s: Option<Vec<f64>>,
}

/// Print one filter's coefficients.
pub fn design_filter(
    filter_type: FilterType,
    frequency: f64,
    q: Option<f64>,
    gain_db: f64,
    sample_rate: f64,
    normalize: bool,
) -> Result<()> {
    let q = q.unwrap_or_else(|| filter_type.default_q());
    let spec = FilterSpec::new(filter_type, frequency, q, gain_db, sample_rate)?;
    let coeffs = design(&spec);
    let coeffs = if normalize { coeffs.normalized() } else { coeffs };

    println!("{}", spec);
    println!("{}", coeffs);
    Ok(())
}

/// Print a log sweep, one frequency per line.
pub fn sweep(min: f64, max: f64, points: usize) -> Result<()> {
    for f in generate_log_frequencies(min, max, points)? {
        println!("{:.4}", f);
    }
    Ok(())
}

/// Read filter rows from a JSON file.
pub fn load_filters(path: &Path) -> Result<Vec<FilterParam>> {
    let contents = fs::read_to_string(path)?;
    let filters: Vec<FilterParam> = serde_json::from_str(&contents)?;
    Ok(filters)
}

/// Compute the response output for a set of filter rows.
pub fn build_response(
    filters: &[FilterParam],
    config: &ResponseConfig,
    with_group_delay: bool,
) -> Result<ResponseOutput> {
    let frequencies = config.frequencies()?;
    let result = compute_eq_response_with(
        &config.combiner(),
        filters,
        config.sample_rate,
        frequencies,
        config.combine_mode,
    )?;

    let group_delay_s = with_group_delay
        .then(|| group_delay(result.combined.frequencies(), result.combined.phases_deg()));

    Ok(ResponseOutput {
        result,
        group_delay_s,
    })
}

/// Compute and print the EQ response as JSON.
pub fn response(
    filters_path: &Path,
    config: ResponseConfig,
    with_group_delay: bool,
    pretty: bool,
) -> Result<()> {
    let filters = load_filters(filters_path)?;
    tracing::info!(
        filters = filters.len(),
        path = %filters_path.display(),
        "computing response"
    );

    let output = build_response(&filters, &config, with_group_delay)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
