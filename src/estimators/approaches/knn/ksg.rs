// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView2};
use statrs::function::gamma::digamma;
use tracing::debug;

use crate::estimators::approaches::common_nd::{Metric, NdDataset, SortedAxis};
use crate::estimators::error::{MiError, Result};
use crate::estimators::traits::{
    GlobalValue, LocalValues, MutualInformationEstimator, OptionalLocalValues,
};
use crate::estimators::utils::validation::{check_columns, check_finite, check_neighbour_count};

/// Largest joint dimension reachable through runtime dispatch.
pub const MAX_VARIABLES: usize = 6;

/// Radius used when counting marginal neighbours around each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginalRadius {
    /// `epsilon_i / 2`, i.e. the joint k-th neighbour distance itself.
    #[default]
    HalfEpsilon,
    /// The full `epsilon_i`. Overcounts marginal neighbours; kept as a separate
    /// variant for comparison runs.
    FullEpsilon,
}

/// Kraskov–Stögbauer–Grassberger mutual information estimator (count-based form).
///
/// I_hat = psi(k) + (d-1) psi(N) - < sum_v psi(n_v,i + 1) >
///
/// where epsilon_i is twice the Chebyshev distance from sample i to its k-th joint
/// neighbour and n_v,i counts the other samples whose v-th coordinate lies strictly
/// within epsilon_i / 2 of sample i's.
///
/// # Const Generics
/// - `D`: number of scalar variables (columns of the sample matrix), at least 2.
pub struct KsgMutualInformation<const D: usize> {
    pub n: usize,
    pub k: usize,
    pub base: f64,
    pub radius_rule: MarginalRadius,
    epsilon: Vec<f64>,
    axes: Vec<SortedAxis>,
}

impl<const D: usize> KsgMutualInformation<D> {
    /// Construct from a sample matrix (rows = samples, cols = variables).
    ///
    /// Fails if the matrix does not have `D` columns, contains non-finite values,
    /// or `k` is not in `1..N`.
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
        debug!(n = joint.n, k, dims = D, "ksg: querying joint neighbours");

        let neighbours = joint.kth_neighbors(k, Metric::Chebyshev)?;
        let epsilon = neighbours.distances.iter().map(|&d| 2.0 * d).collect();
        let axes = data.columns().into_iter().map(SortedAxis::new).collect();
        Ok(Self {
            n: joint.n,
            k,
            base: std::f64::consts::E,
            radius_rule: MarginalRadius::default(),
            epsilon,
            axes,
        })
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Choose the marginal counting radius (default [`MarginalRadius::HalfEpsilon`]).
    pub fn with_radius_rule(mut self, radius_rule: MarginalRadius) -> Self {
        self.radius_rule = radius_rule;
        self
    }

    /// Per-sample joint radius `epsilon_i = 2 * d_k(i)`.
    pub fn epsilon(&self) -> &[f64] {
        &self.epsilon
    }

    /// Marginal neighbour counts, shape `(N, D)`, self excluded.
    pub fn marginal_counts(&self) -> Array2<usize> {
        let scale = match self.radius_rule {
            MarginalRadius::HalfEpsilon => 0.5,
            MarginalRadius::FullEpsilon => 1.0,
        };
        let mut counts = Array2::<usize>::zeros((self.n, D));
        for (v, axis) in self.axes.iter().enumerate() {
            for (i, &eps) in self.epsilon.iter().enumerate() {
                counts[(i, v)] = axis.count_strictly_within(i, scale * eps);
            }
        }
        counts
    }
}

impl<const D: usize> LocalValues for KsgMutualInformation<D> {
    fn local_values(&self) -> Array1<f64> {
        let ln_base = self.base.ln();
        let constant = digamma(self.k as f64) + (D as f64 - 1.0) * digamma(self.n as f64);
        let counts = self.marginal_counts();
        counts
            .rows()
            .into_iter()
            .map(|row| {
                // n_v,i + 1 keeps the argument at >= 1 where digamma is finite.
                let marginal: f64 = row.iter().map(|&c| digamma(c as f64 + 1.0)).sum();
                (constant - marginal) / ln_base
            })
            .collect()
    }
}

impl<const D: usize> GlobalValue for KsgMutualInformation<D> {
    fn global_value(&self) -> f64 {
        self.global_from_local()
    }
}

impl<const D: usize> OptionalLocalValues for KsgMutualInformation<D> {
    fn supports_local(&self) -> bool {
        true
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        Ok(self.local_values())
    }
}

impl<const D: usize> MutualInformationEstimator for KsgMutualInformation<D> {}
