// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by all estimators.

use thiserror::Error;

/// Errors that can occur while validating inputs or building an estimator.
#[derive(Debug, Error)]
pub enum MiError {
    /// A scalar parameter is outside its valid range relative to the data.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        reason: String,
    },

    /// The sample matrix has the wrong number of columns.
    #[error("dimension mismatch: expected {expected} columns, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The number of variables is outside the range supported by runtime dispatch.
    #[error("unsupported number of variables {got}: must be in {min}..={max}")]
    UnsupportedDimension { got: usize, min: usize, max: usize },

    /// A NaN or infinite value was found in the sample matrix.
    #[error("non-finite value at row {row}, column {col}")]
    NonFiniteInput { row: usize, col: usize },

    /// Reading sample data failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A token in a sample file could not be parsed as a number.
    #[error("cannot parse {token:?} on line {line}")]
    Parse { line: usize, token: String },
}

pub type Result<T> = std::result::Result<T, MiError>;

impl MiError {
    pub(crate) fn invalid(name: &'static str, value: usize, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }
}
