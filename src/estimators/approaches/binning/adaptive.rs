// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView2, Axis};
use tracing::{debug, error, warn};

use super::quantile::{digitize, distinct_count, quantile_edges};
use crate::estimators::error::{MiError, Result};
use crate::estimators::traits::{
    GlobalValue, LocalValues, MutualInformationEstimator, OptionalLocalValues,
};
use crate::estimators::utils::validation::{check_columns, check_finite};

/// Stand-in for probabilities that are exactly zero before dividing or taking logs.
/// Non-zero probabilities are never floored.
pub const PROBABILITY_FLOOR: f64 = 1e-10;

/// Result of one adaptive-binning estimate together with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct BinningEstimate {
    /// Mutual information (0 for degenerate or failed estimates).
    pub mi: f64,
    /// Bins per axis asked for by the caller.
    pub requested_bins: usize,
    /// Bins per axis actually used: `min(requested, distinct x, distinct y, N - 1)`.
    pub bins: usize,
    /// Always `bins * bins`.
    pub total_cells: usize,
    pub non_empty_cells: usize,
    /// Joint occupancy counts, always shape `(bins, bins)`; all zero when `degenerate`.
    pub histogram: Array2<usize>,
    /// `bins + 1` quantile edges of the first variable; empty when `degenerate`.
    pub x_edges: Array1<f64>,
    /// `bins + 1` quantile edges of the second variable; empty when `degenerate`.
    pub y_edges: Array1<f64>,
    /// Set when the sentinel value 0 was returned instead of a computed estimate.
    pub degenerate: bool,
}

impl BinningEstimate {
    fn sentinel(requested_bins: usize, bins: usize) -> Self {
        Self {
            mi: 0.0,
            requested_bins,
            bins,
            total_cells: bins * bins,
            non_empty_cells: 0,
            histogram: Array2::zeros((bins, bins)),
            x_edges: Array1::zeros(0),
            y_edges: Array1::zeros(0),
            degenerate: true,
        }
    }
}

/// Mutual information of two continuous variables from an equal-frequency 2D histogram.
///
/// Each axis is cut at its own empirical quantiles, the joint occupancy is normalised to
/// p(x, y), and
///
/// I_hat = sum_{x,y} p(x, y) ln( p(x, y) / (p(x) p(y)) )
///
/// is summed over all cells, with exactly-zero probabilities replaced by
/// [`PROBABILITY_FLOOR`]. Too few distinct values or samples reduce the bin count; fewer
/// than two usable bins give a defined MI of 0. Failures while binning are logged and
/// also give 0 rather than an error.
pub struct AdaptiveBinningMutualInformation {
    data: Array2<f64>,
    pub num_bins: usize,
    pub base: f64,
}

impl AdaptiveBinningMutualInformation {
    /// Construct from an `(N, 2)` sample matrix.
    pub fn new(data: ArrayView2<'_, f64>, num_bins: usize) -> Result<Self> {
        check_columns(data, 2)?;
        if num_bins == 0 {
            return Err(MiError::invalid("num_bins", num_bins, "at least one bin is required"));
        }
        Ok(Self {
            data: data.to_owned(),
            num_bins,
            base: std::f64::consts::E,
        })
    }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Bins per axis after clipping to the distinct values and sample count.
    pub fn max_bins(&self) -> usize {
        let n = self.data.nrows();
        let distinct_x = distinct_count(self.data.column(0));
        let distinct_y = distinct_count(self.data.column(1));
        self.num_bins
            .min(distinct_x)
            .min(distinct_y)
            .min(n.saturating_sub(1))
    }

    /// Run the estimate. Never fails: degenerate inputs and internal failures return
    /// a sentinel with `mi == 0` and `degenerate == true`.
    pub fn estimate(&self) -> BinningEstimate {
        let bins = self.max_bins();
        if bins < self.num_bins {
            warn!(
                requested = self.num_bins,
                used = bins,
                n = self.data.nrows(),
                "binning: bin count reduced"
            );
        }
        if bins < 2 {
            warn!(bins, "binning: fewer than two usable bins, returning MI = 0");
            return BinningEstimate::sentinel(self.num_bins, bins);
        }
        match self.histogram_estimate(bins) {
            Ok(est) => est,
            Err(e) => {
                error!(error = %e, bins, "binning: estimate failed, returning MI = 0");
                BinningEstimate::sentinel(self.num_bins, bins)
            }
        }
    }

    /// Joint cell of every sample.
    fn cells(&self, x_edges: &[f64], y_edges: &[f64]) -> Vec<(usize, usize)> {
        self.data
            .rows()
            .into_iter()
            .map(|row| (digitize(row[0], x_edges), digitize(row[1], y_edges)))
            .collect()
    }

    fn histogram_estimate(&self, bins: usize) -> Result<BinningEstimate> {
        check_finite(self.data.view())?;
        let x_edges = quantile_edges(self.data.column(0), bins)?;
        let y_edges = quantile_edges(self.data.column(1), bins)?;
        let (Some(xe), Some(ye)) = (x_edges.as_slice(), y_edges.as_slice()) else {
            return Err(MiError::invalid("bins", bins, "bin edges are not contiguous"));
        };

        let mut histogram = Array2::<usize>::zeros((bins, bins));
        for (bx, by) in self.cells(xe, ye) {
            histogram[(bx, by)] += 1;
        }

        let n = self.data.nrows() as f64;
        let p_joint = histogram.mapv(|c| c as f64 / n);
        let p_x = p_joint.sum_axis(Axis(1));
        let p_y = p_joint.sum_axis(Axis(0));
        let floor = |p: f64| if p == 0.0 { PROBABILITY_FLOOR } else { p };

        let mut mi = 0.0f64;
        for ((bx, by), &p) in p_joint.indexed_iter() {
            let pj = floor(p);
            mi += pj * (pj / (floor(p_x[bx]) * floor(p_y[by]))).ln();
        }
        let non_empty_cells = histogram.iter().filter(|&&c| c > 0).count();
        debug!(bins, non_empty_cells, mi, "binning: histogram estimate");

        Ok(BinningEstimate {
            mi: mi / self.base.ln(),
            requested_bins: self.num_bins,
            bins,
            total_cells: bins * bins,
            non_empty_cells,
            histogram,
            x_edges,
            y_edges,
            degenerate: false,
        })
    }
}

impl GlobalValue for AdaptiveBinningMutualInformation {
    fn global_value(&self) -> f64 {
        self.estimate().mi
    }
}

impl LocalValues for AdaptiveBinningMutualInformation {
    /// Pointwise MI `ln(p(x, y) / (p(x) p(y)))` of each sample's cell.
    ///
    /// The mean equals the plug-in MI without the floor contributions of empty cells.
    /// Degenerate or failed estimates give zeros.
    fn local_values(&self) -> Array1<f64> {
        let n_rows = self.data.nrows();
        let est = self.estimate();
        if est.degenerate {
            return Array1::zeros(n_rows);
        }
        let (Some(xe), Some(ye)) = (est.x_edges.as_slice(), est.y_edges.as_slice()) else {
            return Array1::zeros(n_rows);
        };
        let n = n_rows as f64;
        let counts_x = est.histogram.sum_axis(Axis(1));
        let counts_y = est.histogram.sum_axis(Axis(0));
        let ln_base = self.base.ln();
        self.cells(xe, ye)
            .into_iter()
            .map(|(bx, by)| {
                let c_xy = est.histogram[(bx, by)] as f64;
                let c_x = counts_x[bx] as f64;
                let c_y = counts_y[by] as f64;
                (c_xy * n / (c_x * c_y)).ln() / ln_base
            })
            .collect()
    }
}

impl OptionalLocalValues for AdaptiveBinningMutualInformation {
    fn supports_local(&self) -> bool {
        true
    }

    fn local_values_opt(&self) -> std::result::Result<Array1<f64>, &'static str> {
        Ok(self.local_values())
    }
}

impl MutualInformationEstimator for AdaptiveBinningMutualInformation {}
