// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1};

use crate::estimators::error::{MiError, Result};

fn sorted_copy(values: ArrayView1<'_, f64>) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Number of distinct values (exact equality).
pub fn distinct_count(values: ArrayView1<'_, f64>) -> usize {
    let mut sorted = sorted_copy(values);
    sorted.dedup();
    sorted.len()
}

/// Equal-frequency bin edges: the `i / bins` quantiles for `i = 0..=bins`, with
/// linear interpolation between order statistics.
///
/// Returns `bins + 1` non-decreasing edges. Fails on empty or non-finite input.
pub fn quantile_edges(values: ArrayView1<'_, f64>, bins: usize) -> Result<Array1<f64>> {
    if bins == 0 {
        return Err(MiError::invalid("bins", bins, "at least one bin is required"));
    }
    if values.is_empty() {
        return Err(MiError::invalid("n_samples", 0, "cannot take quantiles of no samples"));
    }
    if let Some(row) = values.iter().position(|v| !v.is_finite()) {
        return Err(MiError::NonFiniteInput { row, col: 0 });
    }
    let sorted = sorted_copy(values);
    let last = sorted.len() - 1;
    let edges = (0..=bins)
        .map(|i| {
            let pos = (i as f64 / bins as f64) * last as f64;
            let lo = (pos.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            let frac = pos - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        })
        .collect();
    Ok(edges)
}

/// Bin index of `value` for the given edges, in `0..edges.len() - 1`.
///
/// Interior edges are inclusive on the left: a value equal to an edge goes to the
/// bin above it. Values outside the outer edges are clamped into the first or last bin.
pub fn digitize(value: f64, edges: &[f64]) -> usize {
    let bins = edges.len().saturating_sub(1);
    if bins <= 1 {
        return 0;
    }
    let interior = &edges[1..bins];
    interior.partition_point(|&e| e <= value)
}
