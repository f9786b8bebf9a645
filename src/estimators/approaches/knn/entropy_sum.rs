// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};
use statrs::function::gamma::digamma;
use tracing::{debug, warn};

use super::ksg::MAX_VARIABLES;
use crate::estimators::approaches::common_nd::{Metric, NdDataset, SortedAxis};
use crate::estimators::error::{MiError, Result};
use crate::estimators::traits::{GlobalValue, MutualInformationEstimator, OptionalLocalValues};
use crate::estimators::utils::validation::{check_columns, check_finite, check_neighbour_count};

/// Mutual information as a sum of Kozachenko–Leonenko entropies (max-norm form).
///
/// I_hat = (d-1) (psi(N) - psi(k)) + sum_v <ln eps_v,i> - d <ln eps_i>
///
/// eps_i is twice the Chebyshev distance to the k-th joint neighbour; eps_v,i is twice
/// the distance to the k-th neighbour found by an independent query on variable v alone.
/// Unlike [`KsgMutualInformation`](super::ksg::KsgMutualInformation), the marginal
/// neighbourhoods are not tied to the joint radius.
pub struct EntropySumMutualInformation<const D: usize> {
    pub n: usize,
    pub k: usize,
    pub base: f64,
    /// <ln eps_i> over samples with a positive joint radius.
    pub mean_log_joint: f64,
    /// <ln eps_v,i> per variable, over samples with a positive marginal radius.
    pub mean_log_marginals: Vec<f64>,
}

/// Mean of `ln(x)` over the positive entries, and how many entries were skipped.
///
/// Zero radii come from duplicate samples; their log term is dropped. Returns 0 for
/// the mean when nothing is positive.
fn mean_log_positive(values: impl IntoIterator<Item = f64>) -> (f64, usize) {
    let mut sum_ln = 0.0f64;
    let mut cnt = 0usize;
    let mut dropped = 0usize;
    for r in values {
        if r > 0.0 {
            sum_ln += r.ln();
            cnt += 1;
        } else {
            dropped += 1;
        }
    }
    if cnt == 0 {
        return (0.0, dropped);
    }
    (sum_ln / cnt as f64, dropped)
}

impl<const D: usize> EntropySumMutualInformation<D> {
    /// Construct from a sample matrix (rows = samples, cols = variables).
    pub fn new(data: ArrayView2<'_, f64>, k: usize) -> Result<Self> {
        if D < 2 {
            return Err(MiError::UnsupportedDimension {
                got: D,
                min: 2,
                max: MAX_VARIABLES,
            });
        }
        check_columns(data, D)?;
        check_finite(data)?;
        check_neighbour_count(k, data.nrows())?;
        let joint = NdDataset::<D>::from_view(data)?;
        debug!(n = joint.n, k, dims = D, "entropy-sum: querying joint neighbours");

        let joint_radii = joint.kth_neighbors(k, Metric::Chebyshev)?;
        let (mean_log_joint, dropped) =
            mean_log_positive(joint_radii.distances.iter().map(|&d| 2.0 * d));
        if dropped > 0 {
            warn!(dropped, n = joint.n, "entropy-sum: zero joint radii dropped");
        }

        let mut mean_log_marginals = Vec::with_capacity(D);
        for (v, column) in data.columns().into_iter().enumerate() {
            let radii = SortedAxis::new(column).kth_neighbors(k)?;
            let (mean_log, dropped) = mean_log_positive(radii.distances.iter().map(|&d| 2.0 * d));
            if dropped > 0 {
                warn!(variable = v, dropped, "entropy-sum: zero marginal radii dropped");
            }
            mean_log_marginals.push(mean_log);
        }

        Ok(Self {
            n: joint.n,
            k,
            base: std::f64::consts::E,
            mean_log_joint,
            mean_log_marginals,
        })
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }
}

impl<const D: usize> GlobalValue for EntropySumMutualInformation<D> {
    fn global_value(&self) -> f64 {
        let d = D as f64;
        let term_digamma = (d - 1.0) * (digamma(self.n as f64) - digamma(self.k as f64));
        let term_marginals: f64 = self.mean_log_marginals.iter().sum();
        let term_joint = d * self.mean_log_joint;
        (term_digamma + term_marginals - term_joint) / self.base.ln()
    }
}

impl<const D: usize> OptionalLocalValues for EntropySumMutualInformation<D> {
    fn supports_local(&self) -> bool {
        false
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        Err("Entropy-sum estimator averages log radii per group and has no per-sample decomposition.")
    }
}

impl<const D: usize> MutualInformationEstimator for EntropySumMutualInformation<D> {}
