use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

use knnmi::estimators::approaches::common_nd::{Metric, NdDataset};
use knnmi::MiError;

use crate::test_helpers::{brute_force_kth, chebyshev, euclidean, generate_random_nd_data};

#[test]
fn nd_dataset_from_view_construction() {
    let data: Array2<f64> = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();
    assert_eq!(ds.n, 4);
    assert_eq!(ds.points.len(), 4);
    assert_abs_diff_eq!(ds.points[2][1], 1.0, epsilon = 1e-12);

    // Non-contiguous view (transposed) takes the element-wise path.
    let t = array![[0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
    let ds_t = NdDataset::<2>::from_view(t.t()).unwrap();
    assert_eq!(ds_t.points, ds.points);
}

#[test]
fn nd_dataset_rejects_wrong_column_count() {
    let data: Array2<f64> = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    assert!(matches!(
        NdDataset::<2>::from_view(data.view()),
        Err(MiError::DimensionMismatch { expected: 2, got: 3 })
    ));
}

#[test]
fn chebyshev_radii_match_brute_force() {
    let data = generate_random_nd_data(300, 3, 7);
    let ds = NdDataset::<3>::from_view(data.view()).unwrap();
    for &k in &[1usize, 4, 17] {
        let res = ds.kth_neighbors(k, Metric::Chebyshev).unwrap();
        assert_eq!(res.len(), 300);
        for i in 0..data.nrows() {
            let expected = brute_force_kth(&data, i, k, chebyshev);
            assert_eq!(res.distances[i], expected, "i={i}, k={k}");
            let j = res.indices[i];
            assert_ne!(j, i);
            assert_eq!(
                chebyshev(&data.row(i).to_vec(), &data.row(j).to_vec()),
                expected
            );
        }
    }
}

#[test]
fn euclidean_radii_match_brute_force() {
    let data = generate_random_nd_data(200, 2, 11);
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();
    for &k in &[1usize, 3, 10] {
        let r = ds.kth_neighbor_radii_euclidean(k).unwrap();
        for i in 0..data.nrows() {
            assert_abs_diff_eq!(r[i], brute_force_kth(&data, i, k, euclidean), epsilon = 1e-9);
        }
    }
}

#[test]
fn grid_distances_simple_cases() {
    let data: Array2<f64> = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();

    let r1 = ds.kth_neighbor_radii_chebyshev(1).unwrap();
    assert!(r1.iter().all(|&v| v == 1.0));
    // The diagonal corner is at L∞ distance 1 as well.
    let r3 = ds.kth_neighbor_radii_chebyshev(3).unwrap();
    assert!(r3.iter().all(|&v| v == 1.0));
    let e3 = ds.kth_neighbor_radii_euclidean(3).unwrap();
    for v in e3 {
        assert_abs_diff_eq!(v, 2.0_f64.sqrt(), epsilon = 1e-12);
    }
}

#[test]
fn duplicate_points_give_zero_distance() {
    let data: Array2<f64> = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [4.0, 2.0]];
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();
    let res = ds.kth_neighbors(2, Metric::Chebyshev).unwrap();
    assert_eq!(&res.distances[..3], &[0.0, 0.0, 0.0]);
    assert_eq!(res.distances[3], 3.0);
    for i in 0..3 {
        assert_ne!(res.indices[i], i);
    }
}

#[test]
fn k_bounds_enforced() {
    let data: Array2<f64> = array![[0.0, 0.0], [1.0, 0.0], [3.0, 1.0]];
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();
    // k = N - 1 is the largest valid order.
    let r = ds.kth_neighbor_radii_chebyshev(2).unwrap();
    assert_eq!(r, vec![3.0, 2.0, 3.0]);
    assert!(matches!(
        ds.kth_neighbors(3, Metric::Chebyshev),
        Err(MiError::InvalidParameter { name: "k", .. })
    ));
    assert!(matches!(
        ds.kth_neighbors(0, Metric::Euclidean),
        Err(MiError::InvalidParameter { name: "k", .. })
    ));
}

#[test]
fn repeated_queries_are_reproducible() {
    // Many ties on an integer lattice.
    let data = Array2::from_shape_fn((64, 2), |(i, j)| if j == 0 { (i % 8) as f64 } else { (i / 8) as f64 });
    let ds = NdDataset::<2>::from_view(data.view()).unwrap();
    let a = ds.kth_neighbors(3, Metric::Chebyshev).unwrap();
    let b = ds.kth_neighbors(3, Metric::Chebyshev).unwrap();
    assert_eq!(a, b);
}
