// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{s, ArrayView2};
use std::ops::Range;
use tracing::debug;

use crate::estimators::error::{MiError, Result};

/// Row ranges of consecutive windows of length `window`, starting every `step` rows.
///
/// Only complete windows are returned; a window longer than the data gives none.
pub fn sliding_windows(n_rows: usize, window: usize, step: usize) -> Result<Vec<Range<usize>>> {
    if window == 0 {
        return Err(MiError::invalid("window", window, "window length must be >= 1"));
    }
    if step == 0 {
        return Err(MiError::invalid("step", step, "window step must be >= 1"));
    }
    if window > n_rows {
        return Ok(Vec::new());
    }
    Ok((0..=n_rows - window)
        .step_by(step)
        .map(|start| start..start + window)
        .collect())
}

/// Evaluate `estimate` on every sliding window of `data`, in window order.
///
/// Each window is an independent call; the first error aborts the sweep.
///
/// ```rust
/// use knnmi::estimators::mutual_information::estimate_knn;
/// use knnmi::estimators::utils::windows::windowed_estimates;
/// use ndarray::Array2;
///
/// let data = Array2::from_shape_fn((40, 2), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
/// let values = windowed_estimates(data.view(), 20, 10, |w| estimate_knn(w, 3)).unwrap();
/// assert_eq!(values.len(), 3);
/// ```
pub fn windowed_estimates<F>(
    data: ArrayView2<'_, f64>,
    window: usize,
    step: usize,
    mut estimate: F,
) -> Result<Vec<f64>>
where
    F: FnMut(ArrayView2<'_, f64>) -> Result<f64>,
{
    let ranges = sliding_windows(data.nrows(), window, step)?;
    debug!(windows = ranges.len(), window, step, "evaluating sliding windows");
    ranges
        .into_iter()
        .map(|r| estimate(data.slice(s![r, ..])))
        .collect()
}
