//! eqcurve - EQ Curve Mathematics
//!
//! Derives biquad coefficients from parametric EQ settings and evaluates
//! their frequency responses for display.
//!
//! # Architecture
//!
//! Data flows leaf-first through the `dsp` module:
//! - `FilterSpec` -> `design` -> `BiquadCoefficients`
//! - `BiquadCoefficients` -> `evaluate_response` -> `FrequencyResponse`
//! - `FrequencyResponse`s -> `ResponseCombiner` -> combined trace
//! - phase -> `unwrap_phase` / `group_delay`
//! - crossover orders -> `butterworth_*` / `linkwitz_riley_*` section specs
//!
//! The `eq` module wraps this for whole EQs, `config` holds the tunable
//! constants and `cli` is the command-line front end.

pub mod cli;
pub mod config;
pub mod dsp;
pub mod eq;
pub mod error;

pub use config::ResponseConfig;
pub use eq::{compute_eq_response, EqResponseResult, FilterParam};
pub use error::{CombineError, EqError, Result};
