// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;
use std::io::BufRead;

use crate::estimators::error::{MiError, Result};

/// Read a sample matrix from whitespace-delimited text, one sample per line.
///
/// Blank lines and lines starting with `#` are skipped. All rows must have the same
/// number of columns.
pub fn read_samples<R: BufRead>(reader: R) -> Result<Array2<f64>> {
    let mut values: Vec<f64> = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let before = values.len();
        for token in trimmed.split_whitespace() {
            let v: f64 = token.parse().map_err(|_| MiError::Parse {
                line: idx + 1,
                token: token.to_owned(),
            })?;
            values.push(v);
        }
        let width = values.len() - before;
        match ncols {
            None => ncols = Some(width),
            Some(expected) if expected != width => {
                return Err(MiError::DimensionMismatch {
                    expected,
                    got: width,
                });
            }
            Some(_) => {}
        }
        nrows += 1;
    }
    let ncols = ncols.unwrap_or(0);
    Array2::from_shape_vec((nrows, ncols), values).map_err(|_| MiError::DimensionMismatch {
        expected: ncols,
        got: 0,
    })
}
