use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};
use rstest::rstest;

use knnmi::estimators::approaches::binning::AdaptiveBinningMutualInformation;
use knnmi::estimators::mutual_information::{estimate_binning, MutualInformation};
use knnmi::{GlobalValue, LocalValues, MiError};

use crate::test_helpers::{generate_bivariate_gaussian, generate_independent_uniform};

fn identical_columns(size: usize, seed: u64) -> Array2<f64> {
    let u = generate_independent_uniform(size, seed);
    let mut data = Array2::zeros((size, 2));
    data.column_mut(0).assign(&u.column(0));
    data.column_mut(1).assign(&u.column(0));
    data
}

#[test]
fn independent_uniform_near_zero() {
    let data = generate_independent_uniform(1000, 2024);
    let est = estimate_binning(data.view(), 10).unwrap();
    println!("binning independent MI: {}", est.mi);
    assert!(!est.degenerate);
    assert_eq!(est.bins, 10);
    assert_eq!(est.total_cells, 100);
    assert!(est.mi.abs() < 0.07, "MI of independent data: {}", est.mi);
}

#[test]
fn identical_columns_give_log_bins() {
    let data = identical_columns(1000, 3);
    let est = estimate_binning(data.view(), 10).unwrap();
    // Equal-frequency bins put exactly 100 samples on each diagonal cell.
    assert_eq!(est.non_empty_cells, 10);
    for b in 0..10 {
        assert_eq!(est.histogram[(b, b)], 100);
    }
    assert_abs_diff_eq!(est.mi, 10.0_f64.ln(), epsilon = 1e-5);
}

#[test]
fn base_two_and_local_values() {
    let data = identical_columns(1000, 4);
    let est = MutualInformation::new_binning(data.view(), 10)
        .unwrap()
        .with_base(2.0);
    assert_abs_diff_eq!(est.global_value(), 10.0_f64.log2(), epsilon = 1e-5);
    let locals = est.local_values();
    assert_eq!(locals.len(), 1000);
    // Without empty-cell floor terms the pointwise mean is exact.
    assert_abs_diff_eq!(locals.mean().unwrap(), 10.0_f64.log2(), epsilon = 1e-12);
}

#[test]
fn diagnostics_consistent() {
    let data = generate_bivariate_gaussian(500, 0.7, 12);
    let est = estimate_binning(data.view(), 8).unwrap();
    assert_eq!(est.total_cells, est.bins * est.bins);
    assert!(est.non_empty_cells <= est.total_cells);
    assert_eq!(est.histogram.dim(), (8, 8));
    assert_eq!(est.histogram.sum(), 500);
    assert_eq!(est.x_edges.len(), 9);
    assert_eq!(est.y_edges.len(), 9);
    assert!(est.x_edges.to_vec().windows(2).all(|w| w[0] <= w[1]));
    assert!(est.mi > 0.1);
}

#[rstest]
#[case::single_bin(generate_independent_uniform(100, 1), 1)]
#[case::constant_column(array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]], 4)]
#[case::two_samples(array![[0.0, 1.0], [1.0, 0.0]], 5)]
#[case::one_sample(array![[0.0, 1.0]], 3)]
fn degenerate_inputs_return_zero(#[case] data: Array2<f64>, #[case] num_bins: usize) {
    let est = estimate_binning(data.view(), num_bins).unwrap();
    assert_eq!(est.mi, 0.0);
    assert!(est.degenerate);
    assert!(est.bins < 2);
    assert_eq!(est.total_cells, est.bins * est.bins);
    assert!(est.non_empty_cells <= est.total_cells);
    assert_eq!(est.histogram.dim(), (est.bins, est.bins));
    assert!(est.x_edges.is_empty() && est.y_edges.is_empty());
}

#[test]
fn bins_reduced_to_distinct_values() {
    let data = Array2::from_shape_fn((100, 2), |(i, j)| ((i * (j + 1)) % 5) as f64);
    let est = AdaptiveBinningMutualInformation::new(data.view(), 10).unwrap();
    assert_eq!(est.max_bins(), 5);
    let res = est.estimate();
    assert_eq!(res.requested_bins, 10);
    assert_eq!(res.bins, 5);
    assert_eq!(res.total_cells, 25);
    assert!(!res.degenerate);
}

#[test]
fn bins_reduced_to_sample_count() {
    let data = array![[0.0, 3.0], [1.0, 1.0], [2.0, 0.0], [3.0, 2.0]];
    let est = estimate_binning(data.view(), 10).unwrap();
    assert_eq!(est.bins, 3);
    assert_eq!(est.total_cells, 9);
}

#[test]
fn non_finite_values_absorbed() {
    let mut data = generate_independent_uniform(50, 8);
    data[(10, 0)] = f64::NAN;
    let est = estimate_binning(data.view(), 5).unwrap();
    assert_eq!(est.mi, 0.0);
    assert!(est.degenerate);
    // Diagnostics stay self-consistent on the absorbed-failure path.
    assert_eq!(est.bins, 5);
    assert_eq!(est.total_cells, 25);
    assert_eq!(est.histogram.dim(), (5, 5));
    assert_eq!(est.histogram.len(), est.total_cells);
    assert_eq!(est.histogram.sum(), 0);
    assert_eq!(est.non_empty_cells, 0);
    assert!(est.x_edges.is_empty() && est.y_edges.is_empty());
}

#[test]
fn parameter_errors_propagate() {
    let data = generate_independent_uniform(50, 8);
    assert!(matches!(
        estimate_binning(data.view(), 0),
        Err(MiError::InvalidParameter { name: "num_bins", .. })
    ));
    let three = Array2::<f64>::zeros((10, 3));
    assert!(matches!(
        estimate_binning(three.view(), 4),
        Err(MiError::DimensionMismatch { expected: 2, got: 3 })
    ));
}

#[test]
fn repeated_calls_identical() {
    let data = generate_bivariate_gaussian(300, 0.4, 6);
    let a = estimate_binning(data.view(), 6).unwrap();
    let b = estimate_binning(data.view(), 6).unwrap();
    assert_eq!(a, b);
}
