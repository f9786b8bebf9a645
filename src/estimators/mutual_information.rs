// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView2;

use crate::estimators::approaches::binning::{AdaptiveBinningMutualInformation, BinningEstimate};
use crate::estimators::approaches::knn::{
    EntropySumMutualInformation, KsgMutualInformation, MarginalRadius, MAX_VARIABLES,
};
use crate::estimators::error::{MiError, Result};
use crate::estimators::traits::GlobalValue;

/// Calls `$f::<D>(args..)` with `D` equal to the column count of `$data`.
///
/// The joint space dimension is a const generic on the k-NN estimators; this covers
/// 2 through `MAX_VARIABLES` variables.
macro_rules! by_variable_count {
    ($data:expr, $f:ident ( $($arg:expr),* )) => {
        match $data.ncols() {
            2 => $f::<2>($data, $($arg),*),
            3 => $f::<3>($data, $($arg),*),
            4 => $f::<4>($data, $($arg),*),
            5 => $f::<5>($data, $($arg),*),
            6 => $f::<6>($data, $($arg),*),
            got => Err(MiError::UnsupportedDimension {
                got,
                min: 2,
                max: MAX_VARIABLES,
            }),
        }
    };
}

fn ksg_value<const D: usize>(
    data: ArrayView2<'_, f64>,
    k: usize,
    radius_rule: MarginalRadius,
) -> Result<f64> {
    let est = KsgMutualInformation::<D>::new(data, k)?.with_radius_rule(radius_rule);
    Ok(est.global_value())
}

fn entropy_sum_value<const D: usize>(data: ArrayView2<'_, f64>, k: usize) -> Result<f64> {
    Ok(EntropySumMutualInformation::<D>::new(data, k)?.global_value())
}

/// KSG estimate (nats) for a sample matrix with 2 to 6 columns.
///
/// Fails with [`MiError::InvalidParameter`] unless `0 < k < N`.
pub fn estimate_knn(data: ArrayView2<'_, f64>, k: usize) -> Result<f64> {
    by_variable_count!(data, ksg_value(k, MarginalRadius::HalfEpsilon))
}

/// KSG estimate counting marginal neighbours within the full joint radius.
pub fn estimate_knn_full_radius(data: ArrayView2<'_, f64>, k: usize) -> Result<f64> {
    by_variable_count!(data, ksg_value(k, MarginalRadius::FullEpsilon))
}

/// Entropy-sum k-NN estimate (nats) for a sample matrix with 2 to 6 columns.
pub fn estimate_entropy_sum(data: ArrayView2<'_, f64>, k: usize) -> Result<f64> {
    by_variable_count!(data, entropy_sum_value(k))
}

/// Adaptive-binning estimate (nats) with diagnostics for an `(N, 2)` sample matrix.
///
/// Only shape and `num_bins == 0` are errors; degenerate data returns MI = 0.
pub fn estimate_binning(data: ArrayView2<'_, f64>, num_bins: usize) -> Result<BinningEstimate> {
    Ok(AdaptiveBinningMutualInformation::new(data, num_bins)?.estimate())
}

/// Mutual information estimation methods for continuous data
///
/// This struct provides static methods for creating mutual information estimators
/// over a sample matrix (rows = samples, columns = variables).
pub struct MutualInformation;

impl MutualInformation {
    /// Creates a KSG (count-based) estimator over `D` variables.
    ///
    /// # Arguments
    ///
    /// * `data` - Sample matrix with `D` columns
    /// * `k` - Neighbour order, `0 < k < N`
    pub fn new_ksg<const D: usize>(
        data: ArrayView2<'_, f64>,
        k: usize,
    ) -> Result<KsgMutualInformation<D>> {
        KsgMutualInformation::new(data, k)
    }

    /// Creates a KSG estimator that counts marginal neighbours within the full joint radius.
    pub fn new_ksg_full_radius<const D: usize>(
        data: ArrayView2<'_, f64>,
        k: usize,
    ) -> Result<KsgMutualInformation<D>> {
        Ok(KsgMutualInformation::new(data, k)?.with_radius_rule(MarginalRadius::FullEpsilon))
    }

    /// Creates an entropy-sum k-NN estimator over `D` variables.
    pub fn new_entropy_sum<const D: usize>(
        data: ArrayView2<'_, f64>,
        k: usize,
    ) -> Result<EntropySumMutualInformation<D>> {
        EntropySumMutualInformation::new(data, k)
    }

    /// Creates an adaptive-binning estimator for two variables.
    ///
    /// # Arguments
    ///
    /// * `data` - Sample matrix with 2 columns
    /// * `num_bins` - Requested bins per axis, reduced if the data cannot support them
    pub fn new_binning(
        data: ArrayView2<'_, f64>,
        num_bins: usize,
    ) -> Result<AdaptiveBinningMutualInformation> {
        AdaptiveBinningMutualInformation::new(data, num_bins)
    }
}
