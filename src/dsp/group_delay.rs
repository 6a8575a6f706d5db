//! Group delay from phase by finite differences

use super::phase::unwrap_phase;
use std::f64::consts::PI;

/// Group delay in seconds, `-dphi/domega`, at each frequency
///
/// Phase is unwrapped first. Forward differences give `len - 1` values; the
/// last one is repeated so the output lines up with `frequencies`. Returns an
/// empty vector when there are fewer than 2 frequencies or when the two
/// slices differ in length.
pub fn group_delay(frequencies: &[f64], phases_deg: &[f64]) -> Vec<f64> {
    if frequencies.len() < 2 || frequencies.len() != phases_deg.len() {
        return Vec::new();
    }

    let unwrapped = unwrap_phase(phases_deg);

    let mut delays: Vec<f64> = frequencies
        .windows(2)
        .zip(unwrapped.windows(2))
        .map(|(f, p)| {
            let d_phase_rad = (p[1] - p[0]) * PI / 180.0;
            let d_omega = 2.0 * PI * (f[1] - f[0]);
            -d_phase_rad / d_omega
        })
        .collect();

    if let Some(&last) = delays.last() {
        delays.push(last);
    }
    delays
}
