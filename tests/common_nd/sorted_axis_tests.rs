use ndarray::{array, Array1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use knnmi::estimators::approaches::common_nd::{NdDataset, SortedAxis, RADIUS_TOLERANCE};
use knnmi::MiError;

fn random_column(size: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    // Coarse values so that ties and exact boundary hits occur.
    Array1::from_shape_fn(size, |_| (rng.gen_range(0..50) as f64) * 0.25)
}

#[test]
fn count_within_matches_brute_force() {
    let x = random_column(400, 3);
    let axis = SortedAxis::new(x.view());
    for &radius in &[0.0, 0.25, 0.5, 1.3, 4.0] {
        for i in 0..x.len() {
            let closed = (0..x.len())
                .filter(|&j| j != i && (x[j] - x[i]).abs() <= radius)
                .count();
            assert_eq!(axis.count_within(i, radius), closed, "i={i}, r={radius}");
            let strict = (0..x.len())
                .filter(|&j| j != i && (x[j] - x[i]).abs() < radius)
                .count();
            assert_eq!(axis.count_strictly_within(i, radius), strict, "i={i}, r={radius}");
        }
    }
}

#[test]
fn kth_neighbors_match_kd_tree_in_one_dimension() {
    let x = random_column(300, 5);
    let axis = SortedAxis::new(x.view());
    let column = x.clone().into_shape_with_order((300, 1)).unwrap();
    let tree = NdDataset::<1>::from_view(column.view()).unwrap();
    for &k in &[1usize, 2, 7, 299] {
        let sorted = axis.kth_neighbors(k).unwrap();
        let reference = tree.kth_neighbor_radii_euclidean(k).unwrap();
        assert_eq!(sorted.distances, reference, "k={k}");
    }
}

#[test]
fn tolerance_scales_with_large_radii() {
    let x = array![0.0, 1.0e6, 2.0e6];
    let axis = SortedAxis::new(x.view());
    // A neighbour exactly on the boundary is excluded at every scale.
    assert_eq!(axis.count_strictly_within(1, 1.0e6), 0);
    assert_eq!(axis.count_within(1, 1.0e6), 2);
    assert!(RADIUS_TOLERANCE > 0.0 && RADIUS_TOLERANCE < 1e-9);
}

#[test]
fn kth_neighbors_validate_k() {
    let x = array![0.0, 1.0, 2.0];
    let axis = SortedAxis::new(x.view());
    assert!(axis.kth_neighbors(2).is_ok());
    assert!(matches!(
        axis.kth_neighbors(3),
        Err(MiError::InvalidParameter { name: "k", .. })
    ));
}
