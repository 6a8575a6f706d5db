//! Phase normalization and unwrapping (degrees)

/// Wrap `deg` into [-180, 180] by whole turns
///
/// Uses repeated +/-360 correction, so values already in range (including
/// exactly +/-180) come back unchanged. Beyond four turns an exact `fmod`
/// first brings the value near range; it only bounds the loop and gives the
/// same result. Non-finite input is returned as is.
pub fn normalize_phase(deg: f64) -> f64 {
    if !deg.is_finite() {
        return deg;
    }

    let mut phase = deg;
    if phase.abs() > 360.0 * 4.0 {
        phase %= 360.0;
    }
    while phase > 180.0 {
        phase -= 360.0;
    }
    while phase < -180.0 {
        phase += 360.0;
    }
    phase
}

/// Remove 360 degree jumps from a phase trajectory
///
/// The first sample is kept; every later step is folded into [-180, 180]
/// and accumulated, so the output only differs from the input by whole
/// turns.
pub fn unwrap_phase(phases: &[f64]) -> Vec<f64> {
    let Some((&first, rest)) = phases.split_first() else {
        return Vec::new();
    };

    let mut unwrapped = Vec::with_capacity(phases.len());
    unwrapped.push(first);

    let mut previous_raw = first;
    let mut current = first;
    for &raw in rest {
        let mut diff = raw - previous_raw;
        while diff > 180.0 {
            diff -= 360.0;
        }
        while diff < -180.0 {
            diff += 360.0;
        }
        current += diff;
        unwrapped.push(current);
        previous_raw = raw;
    }

    unwrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_in_range_is_unchanged() {
        for deg in [-180.0, -90.0, 0.0, 45.5, 180.0] {
            assert_eq!(normalize_phase(deg), deg);
        }
    }

    #[test]
    fn test_normalize_wraps() {
        assert_abs_diff_eq!(normalize_phase(190.0), -170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(-190.0), 170.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(720.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(540.0), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_large_inputs_match_whole_turns() {
        assert_eq!(normalize_phase(1441.5), 1.5);
        assert_eq!(normalize_phase(-1441.5), -1.5);
        // 1e18 = 280 (mod 360)
        assert_eq!(normalize_phase(1e18), -80.0);
    }

    #[test]
    fn test_normalize_bounds() {
        let mut x = -100_000.0;
        while x < 100_000.0 {
            let p = normalize_phase(x);
            assert!((-180.0..=180.0).contains(&p), "{} -> {}", x, p);
            x += 137.77;
        }
    }

    #[test]
    fn test_unwrap_empty_and_single() {
        assert!(unwrap_phase(&[]).is_empty());
        assert_eq!(unwrap_phase(&[42.0]), vec![42.0]);
    }

    #[test]
    fn test_unwrap_removes_jump() {
        let unwrapped = unwrap_phase(&[170.0, 179.0, -175.0, -165.0]);
        assert_abs_diff_eq!(unwrapped[2], 185.0, epsilon = 1e-12);
        assert_abs_diff_eq!(unwrapped[3], 195.0, epsilon = 1e-12);

        let unwrapped = unwrap_phase(&[-170.0, 175.0, 160.0]);
        assert_abs_diff_eq!(unwrapped[1], -185.0, epsilon = 1e-12);
        assert_abs_diff_eq!(unwrapped[2], -200.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unwrap_continuity_and_congruence() {
        let wrapped: Vec<f64> = (0..200)
            .map(|i| normalize_phase(-7.3 * i as f64 + 3.0 * (i as f64 * 0.37).sin()))
            .chain([900.0, -1000.0, 15.0])
            .collect();
        let unwrapped = unwrap_phase(&wrapped);

        assert_eq!(unwrapped.len(), wrapped.len());
        assert_eq!(unwrapped[0], wrapped[0]);
        for pair in unwrapped.windows(2) {
            assert!((pair[1] - pair[0]).abs() <= 180.0 + 1e-9);
        }
        for (u, w) in unwrapped.iter().zip(&wrapped) {
            let turns = (u - w) / 360.0;
            assert_abs_diff_eq!(turns, turns.round(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unwrap_linear_phase() {
        // A pure delay wraps many times; unwrapping recovers the straight line
        let wrapped: Vec<f64> = (0..50).map(|i| normalize_phase(-40.0 * i as f64)).collect();
        let unwrapped = unwrap_phase(&wrapped);
        for (i, u) in unwrapped.iter().enumerate() {
            assert_abs_diff_eq!(*u, -40.0 * i as f64, epsilon = 1e-9);
        }
    }
}
