// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Adaptive (equal-frequency) histogram estimator and its quantile helpers.

pub mod adaptive;
pub mod quantile;

pub use adaptive::{AdaptiveBinningMutualInformation, BinningEstimate, PROBABILITY_FLOOR};
