// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use kiddo::traits::DistanceMetric;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use ndarray::ArrayView2;
use std::cmp::Ordering;
use std::num::NonZeroUsize;
use tracing::debug;

use crate::estimators::error::{MiError, Result};
use crate::estimators::utils::validation::check_neighbour_count;

/// Relative widening of the circumscribed search radius used to collect
/// Chebyshev candidates, so the Euclidean radius query stays inclusive.
const CANDIDATE_SLACK: f64 = 1e-9;

/// Chebyshev distance metric (L-infinity norm) for kiddo.
pub struct Chebyshev;

impl<const K: usize> DistanceMetric<f64, K> for Chebyshev {
    fn dist(a: &[f64; K], b: &[f64; K]) -> f64 {
        let mut max = 0.0;
        for i in 0..K {
            let diff = (a[i] - b[i]).abs();
            if diff > max {
                max = diff;
            }
        }
        max
    }

    fn dist1(a: f64, b: f64) -> f64 {
        (a - b).abs()
    }
}

/// Metric used for k-th neighbour queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Maximum coordinate-wise absolute difference.
    Chebyshev,
    /// Ordinary L2 distance.
    Euclidean,
}

/// Distance to (and index of) the k-th nearest neighbour of every point, self excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborQueryResult {
    pub k: usize,
    pub metric: Metric,
    pub distances: Vec<f64>,
    pub indices: Vec<usize>,
}

impl NeighborQueryResult {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Orders `(distance, index)` pairs by distance, then by index, so equidistant
/// neighbours always resolve the same way.
pub(crate) fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Shared N-D dataset container with KD-tree for fast neighbor queries.
pub struct NdDataset<const K: usize> {
    pub points: Vec<[f64; K]>,
    pub n: usize,
    pub tree: ImmutableKdTree<f64, K>,
}

impl<const K: usize> NdDataset<K> {
    pub fn from_points(points: Vec<[f64; K]>) -> Self {
        let n = points.len();
        let tree = ImmutableKdTree::new_from_slice(&points);
        debug!(n, dims = K, "built kd-tree");
        Self { points, n, tree }
    }

    /// Build from a sample matrix view with exactly `K` columns.
    pub fn from_view(data: ArrayView2<'_, f64>) -> Result<Self> {
        if data.ncols() != K {
            return Err(MiError::DimensionMismatch {
                expected: K,
                got: data.ncols(),
            });
        }
        Ok(Self::from_points(Self::to_points(data)))
    }

    fn to_points(data: ArrayView2<'_, f64>) -> Vec<[f64; K]> {
        let n = data.nrows();
        let mut points: Vec<[f64; K]> = Vec::with_capacity(n);
        if let Some(slice) = data.as_slice() {
            for chunk in slice.chunks_exact(K) {
                let mut p = [0.0; K];
                p.copy_from_slice(&chunk[..K]);
                points.push(p);
            }
        } else {
            for r in 0..n {
                let mut p = [0.0; K];
                for (c, v) in p.iter_mut().enumerate() {
                    *v = data[(r, c)];
                }
                points.push(p);
            }
        }
        points
    }

    /// Distance to the k-th neighbour of every point under `metric`, self excluded.
    ///
    /// Requires `0 < k < n`.
    pub fn kth_neighbors(&self, k: usize, metric: Metric) -> Result<NeighborQueryResult> {
        check_neighbour_count(k, self.n)?;

        let mut distances = Vec::with_capacity(self.n);
        let mut indices = Vec::with_capacity(self.n);
        for i in 0..self.n {
            let (d, j) = match metric {
                Metric::Euclidean => {
                    let (d2, j) = self.kth_squared_euclidean(i, k);
                    (d2.sqrt(), j)
                }
                Metric::Chebyshev => self.kth_chebyshev(i, k),
            };
            distances.push(d);
            indices.push(j);
        }
        Ok(NeighborQueryResult {
            k,
            metric,
            distances,
            indices,
        })
    }

    /// Euclidean metric (p=2): distance to k-th neighbor per point (self-excluded)
    pub fn kth_neighbor_radii_euclidean(&self, k: usize) -> Result<Vec<f64>> {
        Ok(self.kth_neighbors(k, Metric::Euclidean)?.distances)
    }

    /// Chebyshev metric (p=∞): distance to k-th neighbor per point (self-excluded)
    pub fn kth_neighbor_radii_chebyshev(&self, k: usize) -> Result<Vec<f64>> {
        Ok(self.kth_neighbors(k, Metric::Chebyshev)?.distances)
    }

    /// Squared Euclidean distance and index of the k-th neighbour of point `i`.
    fn kth_squared_euclidean(&self, i: usize, k: usize) -> (f64, usize) {
        // k + 1 nearest always hold k non-self entries: either self is among them,
        // or every returned point sits at distance 0 like self does.
        let Some(qty) = NonZeroUsize::new(k + 1) else {
            return (0.0, i);
        };
        let mut neigh: Vec<(f64, usize)> = self
            .tree
            .nearest_n::<SquaredEuclidean>(&self.points[i], qty)
            .into_iter()
            .map(|nn| (nn.distance, nn.item as usize))
            .collect();
        neigh.sort_by(by_distance_then_index);
        match neigh.iter().position(|&(_, j)| j == i) {
            Some(pos) => {
                neigh.remove(pos);
            }
            None => {
                neigh.pop();
            }
        }
        neigh[k - 1]
    }

    /// Chebyshev distance and index of the k-th neighbour of point `i`.
    ///
    /// The L∞ k-th distance never exceeds the Euclidean one `r`, so every candidate
    /// lies inside the L2 ball of radius `sqrt(K) * r`. Those candidates are collected
    /// from the tree and ranked exactly under the Chebyshev metric.
    fn kth_chebyshev(&self, i: usize, k: usize) -> (f64, usize) {
        let (r2, j_euclid) = self.kth_squared_euclidean(i, k);
        if r2 == 0.0 {
            return (0.0, j_euclid);
        }
        let query = &self.points[i];
        let circumscribed_radius_sq = (K as f64) * r2 * (1.0 + CANDIDATE_SLACK);
        let mut candidates: Vec<(f64, usize)> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(query, circumscribed_radius_sq)
            .into_iter()
            .map(|nn| nn.item as usize)
            .filter(|&j| j != i)
            .map(|j| (<Chebyshev as DistanceMetric<f64, K>>::dist(query, &self.points[j]), j))
            .collect();
        candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
        candidates[k - 1]
    }
}
