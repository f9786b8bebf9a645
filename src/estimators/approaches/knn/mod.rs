// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// k-nearest-neighbour mutual information estimators (Kraskov family).

pub mod entropy_sum;
pub mod ksg;

pub use entropy_sum::EntropySumMutualInformation;
pub use ksg::{KsgMutualInformation, MarginalRadius, MAX_VARIABLES};
