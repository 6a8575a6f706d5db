//! Integration Tests
//!
//! End-to-end tests from EQ rows to the traces handed to the renderer.

use approx::assert_abs_diff_eq;
use eqcurve::dsp::{
    average, design, evaluate, generate_log_frequencies, group_delay, linkwitz_riley_high_pass,
    linkwitz_riley_low_pass, normalize_phase, sum, sum_db, unwrap_phase, CombineMode, FilterSpec,
    FilterType, FrequencyResponse, ResponseCombiner,
};
use eqcurve::eq::{compute_eq_response, compute_eq_response_with, preamp_gain, preamp_gain_max};
use eqcurve::{CombineError, FilterParam, ResponseConfig};

const SR: f64 = 48000.0;

fn sweep() -> Vec<f64> {
    generate_log_frequencies(20.0, 20000.0, 200).unwrap()
}

fn typical_eq() -> Vec<FilterParam> {
    vec![
        FilterParam::new(FilterType::HighPass, 80.0, 0.707, 0.0),
        FilterParam::new(FilterType::Peak, 250.0, 2.0, -3.0),
        FilterParam::new(FilterType::Peak, 3000.0, 1.5, 2.0),
        FilterParam::new(FilterType::HighShelf, 8000.0, 0.707, 3.0),
    ]
}

// === Full Pipeline Tests ===

#[test]
fn test_full_pipeline_traces() {
    let frequencies = sweep();
    let result = compute_eq_response(&typical_eq(), SR, frequencies.clone(), CombineMode::DbSum).unwrap();

    assert_eq!(result.frequencies, frequencies);
    assert_eq!(result.individual_responses.len(), 4);
    for trace in &result.individual_responses {
        assert_eq!(trace.len(), frequencies.len());
        assert!(trace.magnitudes_db().iter().all(|m| m.is_finite()));
        assert!(trace.phases_deg().iter().all(|p| (-180.0..=180.0).contains(p)));
    }

    // The dB cascade is the pointwise sum of the individual traces
    for i in 0..frequencies.len() {
        let expected: f64 = result
            .individual_responses
            .iter()
            .map(|r| r.magnitudes_db()[i])
            .sum();
        assert_abs_diff_eq!(result.combined.magnitudes_db()[i], expected, epsilon = 1e-9);
    }
}

#[test]
fn test_cascade_matches_product_of_transfer_functions() {
    // Two filters in series: |H1 * H2| in dB equals the dB sum
    let a = FilterSpec::peak(500.0, 1.0, 4.0, SR).unwrap();
    let b = FilterSpec::low_shelf(120.0, 0.707, -6.0, SR).unwrap();
    let freqs = sweep();

    let cascade = sum_db(&[a.response(&freqs), b.response(&freqs)]).unwrap();
    let da = evaluate(&design(&a), SR, &freqs);
    let db = evaluate(&design(&b), SR, &freqs);

    for i in 0..freqs.len() {
        assert_abs_diff_eq!(cascade.magnitudes_db()[i], da[i] + db[i], epsilon = 1e-9);
    }
}

#[test]
fn test_exact_and_fast_modes_are_explicit() {
    let frequencies = sweep();
    let filters = typical_eq();

    let fast = compute_eq_response(&filters, SR, frequencies.clone(), CombineMode::DbSum).unwrap();
    let exact = compute_eq_response(&filters, SR, frequencies, CombineMode::Complex).unwrap();

    assert_eq!(fast.mode, CombineMode::DbSum);
    assert_eq!(exact.mode, CombineMode::Complex);
    assert_ne!(fast.combined, exact.combined);
}

#[test]
fn test_config_drives_combiner() {
    let config = ResponseConfig::from_json_str(
        r#"{ "num_points": 64, "combine_mode": "complex", "frequency_tolerance_hz": 0.5 }"#,
    )
    .unwrap();

    let result = compute_eq_response_with(
        &config.combiner(),
        &typical_eq(),
        config.sample_rate,
        config.frequencies().unwrap(),
        config.combine_mode,
    )
    .unwrap();

    assert_eq!(result.combined.len(), 64);
}

#[test]
fn test_result_serializes_for_the_ui() {
    let result = compute_eq_response(&typical_eq(), SR, vec![100.0, 1000.0], CombineMode::DbSum).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["frequencies"].as_array().unwrap().len(), 2);
    assert_eq!(json["individual_responses"].as_array().unwrap().len(), 4);
    assert_eq!(json["combined"]["magnitudes_db"].as_array().unwrap().len(), 2);
    assert_eq!(json["mode"], "db_sum");

    let back: eqcurve::EqResponseResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.individual_responses.len(), result.individual_responses.len());
    assert_eq!(back.combined.len(), 2);
}

// === Combination Properties ===

#[test]
fn test_stereo_doubling_and_average() {
    let response = FilterSpec::high_shelf(4000.0, 0.707, 5.0, SR).unwrap().response(&sweep());

    let doubled = sum(&[response.clone(), response.clone()]).unwrap();
    let averaged = average(&response, &response).unwrap();

    for i in 0..response.len() {
        assert_abs_diff_eq!(
            doubled.magnitudes_db()[i],
            response.magnitudes_db()[i] + 6.0206,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(averaged.magnitudes_db()[i], response.magnitudes_db()[i], epsilon = 1e-9);
        assert_abs_diff_eq!(
            normalize_phase(averaged.phases_deg()[i] - response.phases_deg()[i]),
            0.0,
            epsilon = 1e-6
        );
    }
}

#[test]
fn test_mismatched_grids_are_reported_not_panicked() {
    let a = FilterSpec::peak(1000.0, 1.0, 3.0, SR).unwrap().response(&sweep());
    let b = FilterSpec::peak(1000.0, 1.0, 3.0, SR)
        .unwrap()
        .response(&generate_log_frequencies(20.0, 20000.0, 100).unwrap());

    assert!(matches!(sum(&[]), Err(CombineError::Empty)));
    assert!(matches!(
        sum(&[a.clone(), b.clone()]),
        Err(CombineError::IncompatibleGrids { .. })
    ));
    assert!(average(&a, &b).is_err());
    assert!(ResponseCombiner::new(1e3, 1e-10).sum(&[a, b]).is_err());
}

#[test]
fn test_partial_cancellation_between_opposite_filters() {
    // A flat path plus a polarity-inverted flat path cancel completely
    let freqs = vec![100.0, 1000.0];
    let direct = FrequencyResponse::flat(freqs.clone());
    let inverted = FrequencyResponse::new(freqs, vec![0.0, 0.0], vec![180.0, 180.0]).unwrap();

    let combined = sum(&[direct, inverted]).unwrap();
    assert!(combined.magnitudes_db().iter().all(|m| *m <= -199.0));
}

// === Phase and Group Delay ===

#[test]
fn test_group_delay_of_low_pass() {
    let spec = FilterSpec::low_pass(1000.0, 0.707, SR).unwrap();
    let freqs = sweep();
    let response = spec.response(&freqs);

    let unwrapped = unwrap_phase(response.phases_deg());
    assert!(unwrapped.windows(2).all(|w| (w[1] - w[0]).abs() <= 180.0));

    let delays = group_delay(response.frequencies(), response.phases_deg());
    assert_eq!(delays.len(), freqs.len());

    // A second-order low-pass delays low frequencies by about 1/(Q*2*pi*fc)
    let expected_dc_delay = 1.0 / (0.707 * 2.0 * std::f64::consts::PI * 1000.0);
    assert_abs_diff_eq!(delays[0], expected_dc_delay, epsilon = expected_dc_delay * 0.1);
    assert!(delays.iter().all(|d| d.is_finite()));
}

#[test]
fn test_preamp_for_boosting_eq() {
    let specs: Vec<FilterSpec> = typical_eq().iter().map(|f| f.to_spec(SR).unwrap()).collect();
    let gain = preamp_gain(&specs).unwrap();
    assert!(gain < 0.0 && gain > -6.0, "unexpected preamp {}", gain);
}

#[test]
fn test_worst_case_preamp_is_below_cascade_preamp() {
    let specs: Vec<FilterSpec> = typical_eq().iter().map(|f| f.to_spec(SR).unwrap()).collect();
    assert!(preamp_gain_max(&specs).unwrap() <= preamp_gain(&specs).unwrap() - 0.2);
}

// === Crossovers ===

#[test]
fn test_linkwitz_riley_branches_sum_flat() {
    let freqs = sweep();
    let branch = |specs: Vec<FilterSpec>| {
        let sections: Vec<FrequencyResponse> = specs.iter().map(|s| s.response(&freqs)).collect();
        sum_db(&sections).unwrap()
    };

    let low = branch(linkwitz_riley_low_pass(4, 2000.0, SR).unwrap());
    let high = branch(linkwitz_riley_high_pass(4, 2000.0, SR).unwrap());

    // The two LR4 branches are in phase, so their pressure sum is all-pass
    let total = sum(&[low, high]).unwrap();
    for m in total.magnitudes_db() {
        assert_abs_diff_eq!(*m, 0.0, epsilon = 0.01);
    }
}
