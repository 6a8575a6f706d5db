//! Butterworth and Linkwitz-Riley crossovers as cascades of biquad sections
//!
//! Only the section specs are built here. Plot them with
//! [`sum_db`](super::sum_db), which is exact for a series cascade.

use super::filter::{FilterSpec, FilterType};
use crate::error::{EqError, Result};
use std::f64::consts::PI;

/// Q of each second-order section of a Butterworth filter of `order`
///
/// An odd order has one real pole that no biquad covers; it contributes no
/// entry, so the result always has `order / 2` values.
pub fn butterworth_q(order: usize) -> Vec<f64> {
    (0..order / 2)
        .map(|i| 1.0 / (2.0 * (PI / order as f64 * (i as f64 + 0.5)).sin()))
        .collect()
}

/// Q of each section of a Linkwitz-Riley filter of `order`
///
/// Two Butterworth filters of half the order in series. When the half order
/// is odd, the two first-order poles merge into one Q = 0.5 section.
///
/// # Errors
/// `InvalidParameter` unless `order` is even and non-zero.
pub fn linkwitz_riley_q(order: usize) -> Result<Vec<f64>> {
    check_even_order(order)?;

    let half = butterworth_q(order / 2);
    let mut q_values = Vec::with_capacity(order / 2);
    q_values.extend_from_slice(&half);
    q_values.extend_from_slice(&half);
    if !(order / 2).is_multiple_of(2) {
        q_values.push(0.5);
    }
    Ok(q_values)
}

pub fn butterworth_low_pass(order: usize, frequency: f64, sample_rate: f64) -> Result<Vec<FilterSpec>> {
    check_even_order(order)?;
    sections(FilterType::LowPass, &butterworth_q(order), frequency, sample_rate)
}

pub fn butterworth_high_pass(order: usize, frequency: f64, sample_rate: f64) -> Result<Vec<FilterSpec>> {
    check_even_order(order)?;
    sections(FilterType::HighPass, &butterworth_q(order), frequency, sample_rate)
}

pub fn linkwitz_riley_low_pass(order: usize, frequency: f64, sample_rate: f64) -> Result<Vec<FilterSpec>> {
    sections(FilterType::LowPass, &linkwitz_riley_q(order)?, frequency, sample_rate)
}

pub fn linkwitz_riley_high_pass(order: usize, frequency: f64, sample_rate: f64) -> Result<Vec<FilterSpec>> {
    sections(FilterType::HighPass, &linkwitz_riley_q(order)?, frequency, sample_rate)
}

/// There is no first-order filter type, so every cascade needs whole biquads
fn check_even_order(order: usize) -> Result<()> {
    if order == 0 || !order.is_multiple_of(2) {
        return Err(EqError::invalid("order", order as f64, "an even, non-zero filter order"));
    }
    Ok(())
}

fn sections(filter_type: FilterType, q_values: &[f64], frequency: f64, sample_rate: f64) -> Result<Vec<FilterSpec>> {
    q_values
        .iter()
        .map(|&q| FilterSpec::new(filter_type, frequency, q, 0.0, sample_rate))
        .collect()
}
