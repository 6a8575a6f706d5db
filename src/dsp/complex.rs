//! Complex-number primitives and magnitude/phase conversions.
//!
//! Responses are stored as (dB, degrees) pairs; the combiner round-trips them
//! through rectangular form to add them as pressures.

use num_complex::Complex64;

// ============================================================================
// Constants
// ============================================================================

/// Lowest linear magnitude accepted before taking `log10`.
///
/// Anything quieter reports as -200 dB. This is a precision floor of the
/// conversion, not an exact value.
pub const DEFAULT_MAGNITUDE_FLOOR: f64 = 1e-10;

/// Rectangular complex value (`re`, `im`)
pub type ComplexNumber = Complex64;

// ============================================================================
// Conversions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert a (dB, degrees) pair to rectangular form
///
/// Defined for all real inputs.
pub fn magnitude_phase_to_complex(magnitude_db: f64, phase_deg: f64) -> ComplexNumber {
    ComplexNumber::from_polar(db_to_linear(magnitude_db), phase_deg.to_radians())
}

/// Convert a complex value to (dB, degrees) using [`DEFAULT_MAGNITUDE_FLOOR`]
pub fn complex_to_magnitude_phase(c: ComplexNumber) -> (f64, f64) {
    complex_to_magnitude_phase_with_floor(c, DEFAULT_MAGNITUDE_FLOOR)
}

/// Convert a complex value to (dB, degrees), clamping the magnitude to `floor`
///
/// The phase is `arg(c)` in degrees, so it lies in [-180, 180].
pub fn complex_to_magnitude_phase_with_floor(c: ComplexNumber, floor: f64) -> (f64, f64) {
    let magnitude_db = 20.0 * c.norm().max(floor).log10();
    (magnitude_db, c.arg().to_degrees())
}

/// Componentwise addition
#[inline]
pub fn complex_add(a: ComplexNumber, b: ComplexNumber) -> ComplexNumber {
    a + b
}
