// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView1;

use super::dataset::{by_distance_then_index, Metric, NeighborQueryResult};
use crate::estimators::error::Result;
use crate::estimators::utils::validation::check_neighbour_count;

/// Relative tolerance subtracted from marginal radii before counting.
///
/// A neighbour sitting exactly on the radius is not counted at any data scale.
pub const RADIUS_TOLERANCE: f64 = 1e-12;

/// Radius actually used for counting, `radius * (1 - RADIUS_TOLERANCE)`.
///
/// Non-positive radii map to -1 so that nothing, not even a duplicate, is counted.
pub fn effective_radius(radius: f64) -> f64 {
    if radius <= 0.0 {
        return -1.0;
    }
    radius * (1.0 - RADIUS_TOLERANCE)
}

/// One-dimensional sample stored in sorted order for binary-search queries.
///
/// Scalar marginals do not need a KD-tree: both radius counts and k-th neighbour
/// distances reduce to searches over a sorted array.
pub struct SortedAxis {
    /// Values in ascending order.
    sorted: Vec<f64>,
    /// Original index of each sorted entry.
    order: Vec<usize>,
    /// Sorted position of each original index.
    rank: Vec<usize>,
}

impl SortedAxis {
    pub fn new(values: ArrayView1<'_, f64>) -> Self {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));
        let sorted: Vec<f64> = order.iter().map(|&i| values[i]).collect();
        let mut rank = vec![0usize; order.len()];
        for (pos, &i) in order.iter().enumerate() {
            rank[i] = pos;
        }
        Self {
            sorted,
            order,
            rank,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Value of original sample `i`.
    pub fn value(&self, i: usize) -> f64 {
        self.sorted[self.rank[i]]
    }

    /// Number of other samples `j` with `|x_j - x_i| <= radius` (closed interval).
    ///
    /// A negative radius yields 0.
    pub fn count_within(&self, i: usize, radius: f64) -> usize {
        if radius < 0.0 {
            return 0;
        }
        let x = self.value(i);
        // Differences are formed the same way on both sides so the bounds agree
        // exactly with |x_j - x_i|.
        let lo = self.sorted.partition_point(|&v| x - v > radius);
        let hi = self.sorted.partition_point(|&v| v - x <= radius);
        (hi - lo).saturating_sub(1)
    }

    /// [`count_within`](Self::count_within) on the [`effective_radius`]; zero radii count 0.
    pub fn count_strictly_within(&self, i: usize, radius: f64) -> usize {
        self.count_within(i, effective_radius(radius))
    }

    /// Distance and original index of the k-th nearest neighbour of sample `i`.
    ///
    /// The k nearest neighbours of a scalar form a window of `k + 1` consecutive
    /// sorted values containing it; the best window is found by binary search.
    fn kth_neighbor_of(&self, i: usize, k: usize) -> (f64, usize) {
        let n = self.sorted.len();
        let p = self.rank[i];
        let x = self.sorted[p];
        let left = |j: usize| x - self.sorted[j];
        let right = |j: usize| self.sorted[j + k] - x;

        let j_lo = p.saturating_sub(k);
        let j_hi = p.min(n - 1 - k);
        // First window start whose right reach is at least its left reach.
        let mut lo = j_lo;
        let mut hi = j_hi + 1;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if right(mid) >= left(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        let mut best: Option<(f64, usize)> = None;
        if lo <= j_hi {
            // On a tie both window ends are equally far; never report the query itself.
            let far = if lo + k == p { lo } else { lo + k };
            best = Some((right(lo), self.order[far]));
        }
        if lo > j_lo {
            let cand = (left(lo - 1), self.order[lo - 1]);
            best = match best {
                Some(b) if by_distance_then_index(&b, &cand).is_le() => Some(b),
                _ => Some(cand),
            };
        }
        best.unwrap_or((0.0, i))
    }

    /// Distance to the k-th neighbour of every sample (original order), self excluded.
    ///
    /// Requires `0 < k < n`.
    pub fn kth_neighbors(&self, k: usize) -> Result<NeighborQueryResult> {
        check_neighbour_count(k, self.len())?;
        let (distances, indices) = (0..self.len()).map(|i| self.kth_neighbor_of(i, k)).unzip();
        Ok(NeighborQueryResult {
            k,
            metric: Metric::Euclidean,
            distances,
            indices,
        })
    }
}
