//! EQ mathematics
//!
//! Biquad design, frequency response evaluation and the response
//! post-processing used by EQ curve displays. Everything here is a pure
//! function of its inputs and safe to call from any thread.

mod biquad;
mod combine;
mod complex;
mod crossover;
mod filter;
mod group_delay;
mod phase;
mod response;

pub use biquad::{design, BiquadCoefficients};
pub use combine::{
    average, combine, sum, sum_db, CombineMode, ResponseCombiner, DEFAULT_FREQUENCY_TOLERANCE_HZ,
};
pub use complex::{
    complex_add, complex_to_magnitude_phase, complex_to_magnitude_phase_with_floor, db_to_linear,
    magnitude_phase_to_complex, ComplexNumber, DEFAULT_MAGNITUDE_FLOOR,
};
pub use crossover::{
    butterworth_high_pass, butterworth_low_pass, butterworth_q, linkwitz_riley_high_pass,
    linkwitz_riley_low_pass, linkwitz_riley_q,
};
pub use filter::{bw_to_q, q_to_bw, FilterSpec, FilterType, DEFAULT_Q_PASS, DEFAULT_Q_SHELF};
pub use group_delay::group_delay;
pub use phase::{normalize_phase, unwrap_phase};
pub use response::{
    evaluate, evaluate_complex, evaluate_response, generate_log_frequencies, FrequencyResponse,
};
