mod common;

use common::assert_consistent_results;
use lagstat::{Accumulator, AccumulatorBuilder, LightCurve};
use std::collections::HashMap;

fn simple_curve() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        vec![0.0, 1.0, 2.0],
        vec![0.0, 2.0, 0.0],
        vec![0.0, 0.0, 0.0],
    )
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_builder_requires_bin_edges() {
        let err = AccumulatorBuilder::new().build().unwrap_err();
        assert!(err.is_invalid_bins());
    }

    #[test]
    fn test_builder_rejects_bad_edges() {
        // too few edges
        assert!(
            AccumulatorBuilder::new()
                .lag_bin_edges(&[1.0])
                .build()
                .unwrap_err()
                .is_invalid_bins()
        );

        // unsorted edges
        assert!(
            AccumulatorBuilder::new()
                .lag_bin_edges(&[2.0, 1.0])
                .build()
                .unwrap_err()
                .is_invalid_bins()
        );

        // non-finite edges
        assert!(
            AccumulatorBuilder::new()
                .lag_bin_edges(&[0.0, f64::NAN])
                .build()
                .unwrap_err()
                .is_invalid_bins()
        );

        // degenerate regular edges
        assert!(
            AccumulatorBuilder::new()
                .regular_lag_bin_edges(0.0, 0.0, 5)
                .build()
                .unwrap_err()
                .is_invalid_bins()
        );
        assert!(
            AccumulatorBuilder::new()
                .regular_lag_bin_edges(0.0, 1.0, 0)
                .build()
                .unwrap_err()
                .is_invalid_bins()
        );
    }

    #[test]
    fn test_lag_bin_centers() {
        let accum = AccumulatorBuilder::new()
            .regular_lag_bin_edges(0.0, 4.0, 4)
            .build()
            .unwrap();
        assert_eq!(accum.n_bins(), 4);
        assert_eq!(accum.lag_bin_centers(), vec![0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_process_accumulates_across_calls() {
        let (times, values, errors) = simple_curve();
        let curve = LightCurve::new(&times, &values, &errors).unwrap();
        let mut accum = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 1.5, 2.5])
            .build()
            .unwrap();

        accum.process(&curve).unwrap();
        let expected = HashMap::from([("mean", vec![4.0, 0.0]), ("weight", vec![2.0, 1.0])]);
        let rtol_atol_vals = HashMap::from([("mean", [0.0, 0.0]), ("weight", [0.0, 0.0])]);
        assert_consistent_results(&accum.get_output(), &expected, &rtol_atol_vals);

        // a second call folds in the same pairs again: the weights double
        // while the means are unchanged
        accum.process(&curve).unwrap();
        let expected = HashMap::from([("mean", vec![4.0, 0.0]), ("weight", vec![4.0, 2.0])]);
        assert_consistent_results(&accum.get_output(), &expected, &rtol_atol_vals);
    }

    #[test]
    fn test_failed_process_leaves_state_untouched() {
        let (times, values, errors) = simple_curve();
        let curve = LightCurve::new(&times, &values, &errors).unwrap();
        let mut accum = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 1.5, 2.5])
            .build()
            .unwrap();
        accum.process(&curve).unwrap();
        let before = accum.get_output();

        // this curve has a pair with a lag of 10, which isn't covered
        let bad_times = [0.0, 1.0, 10.0];
        let bad_curve = LightCurve::new(&bad_times, &values, &errors).unwrap();
        assert!(accum.process(&bad_curve).is_err());

        let rtol_atol_vals = HashMap::from([("mean", [0.0, 0.0]), ("weight", [0.0, 0.0])]);
        assert_consistent_results(&accum.get_output(), &before, &rtol_atol_vals);
    }

    #[test]
    fn test_merge_matches_single_accumulator() {
        // processing 2 lightcurves into a single accumulator must give the
        // same answer as processing them separately and merging. The inputs
        // are integer-valued so the results are bitwise identical
        let times_a = [0.0, 1.0, 2.0];
        let values_a = [0.0, 2.0, 0.0];
        let times_b = [0.0, 1.0, 3.0];
        let values_b = [1.0, 3.0, 1.0];
        let errors = [0.0, 0.0, 0.0];
        let edges = [0.0, 2.0, 4.0];

        let curve_a = LightCurve::new(&times_a, &values_a, &errors).unwrap();
        let curve_b = LightCurve::new(&times_b, &values_b, &errors).unwrap();

        let mk_accum = || -> Accumulator {
            AccumulatorBuilder::new()
                .lag_bin_edges(&edges)
                .build()
                .unwrap()
        };

        let mut combined = mk_accum();
        combined.process(&curve_a).unwrap();
        combined.process(&curve_b).unwrap();

        let mut part_a = mk_accum();
        part_a.process(&curve_a).unwrap();
        let mut part_b = mk_accum();
        part_b.process(&curve_b).unwrap();
        part_a.merge(&part_b).unwrap();

        let rtol_atol_vals = HashMap::from([("mean", [0.0, 0.0]), ("weight", [0.0, 0.0])]);
        assert_consistent_results(&part_a.get_output(), &combined.get_output(), &rtol_atol_vals);
    }

    #[test]
    fn test_merge_rejects_mismatched_configs() {
        let mut accum_a = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 1.0, 2.0])
            .build()
            .unwrap();
        let accum_b = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 1.0, 3.0])
            .build()
            .unwrap();

        let err = accum_a.merge(&accum_b).unwrap_err();
        assert!(!err.is_invalid_bins());
        assert!(!err.is_shape_mismatch());
    }

    #[test]
    fn test_reset() {
        let (times, values, errors) = simple_curve();
        let curve = LightCurve::new(&times, &values, &errors).unwrap();
        let mut accum = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 1.5, 2.5])
            .build()
            .unwrap();
        accum.process(&curve).unwrap();
        accum.reset();

        let expected = HashMap::from([
            ("mean", vec![f64::NAN, f64::NAN]),
            ("weight", vec![0.0, 0.0]),
        ]);
        let rtol_atol_vals = HashMap::from([("mean", [0.0, 0.0]), ("weight", [0.0, 0.0])]);
        assert_consistent_results(&accum.get_output(), &expected, &rtol_atol_vals);
    }

    #[test]
    fn test_regular_and_irregular_edges_agree() {
        // some integer lags land exactly on interior bin boundaries: both
        // edge representations must agree on the assignment
        let times = [0.0, 1.0, 3.0, 4.0, 8.0];
        let values = [2.0, -1.0, 0.0, 3.0, 1.0];
        let errors = [1.0, 0.0, 2.0, 0.0, 1.0];
        let curve = LightCurve::new(&times, &values, &errors).unwrap();

        let mut regular = AccumulatorBuilder::new()
            .regular_lag_bin_edges(0.0, 8.0, 4)
            .build()
            .unwrap();
        regular.process(&curve).unwrap();

        let mut irregular = AccumulatorBuilder::new()
            .lag_bin_edges(&[0.0, 2.0, 4.0, 6.0, 8.0])
            .build()
            .unwrap();
        irregular.process(&curve).unwrap();

        let rtol_atol_vals = HashMap::from([("mean", [0.0, 0.0]), ("weight", [0.0, 0.0])]);
        assert_consistent_results(
            &regular.get_output(),
            &irregular.get_output(),
            &rtol_atol_vals,
        );
    }
}
