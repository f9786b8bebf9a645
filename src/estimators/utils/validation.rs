// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::ArrayView2;

use crate::estimators::error::{MiError, Result};

/// Fail on the first NaN or infinite entry, scanning row by row.
pub fn check_finite(data: ArrayView2<'_, f64>) -> Result<()> {
    for ((row, col), &v) in data.indexed_iter() {
        if !v.is_finite() {
            return Err(MiError::NonFiniteInput { row, col });
        }
    }
    Ok(())
}

/// Require exactly `expected` columns.
pub fn check_columns(data: ArrayView2<'_, f64>, expected: usize) -> Result<()> {
    if data.ncols() != expected {
        return Err(MiError::DimensionMismatch {
            expected,
            got: data.ncols(),
        });
    }
    Ok(())
}

/// Neighbour count for self-queries must satisfy `0 < k < n`.
pub fn check_neighbour_count(k: usize, n: usize) -> Result<()> {
    if k == 0 {
        return Err(MiError::invalid("k", k, "k must be >= 1"));
    }
    if k >= n {
        return Err(MiError::invalid(
            "k",
            k,
            format!("k must be <= N-1 for self-queries (N = {n})"),
        ));
    }
    Ok(())
}
