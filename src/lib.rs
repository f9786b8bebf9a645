// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # knnmi
//!
//! Non-parametric mutual information (MI) estimation for continuous random variables
//! from finite samples.
//!
//! ## Quick Start
//!
//! ```rust
//! use knnmi::estimators::mutual_information::{estimate_binning, estimate_knn};
//! use ndarray::array;
//!
//! let data = array![
//!     [1.0, 2.0, 3.0],
//!     [2.0, 3.0, 4.0],
//!     [3.0, 4.0, 5.0],
//!     [5.0, 6.0, 7.0],
//!     [1.5, 2.5, 3.5],
//! ];
//! let mi = estimate_knn(data.view(), 2).unwrap();
//! assert!(mi.is_finite());
//!
//! let pairs = array![[0.1, 0.4], [0.7, 0.2], [0.3, 0.9], [0.5, 0.5]];
//! let binned = estimate_binning(pairs.view(), 2).unwrap();
//! assert!(binned.non_empty_cells <= binned.total_cells);
//! ```
//!
//! ## Estimators
//!
//! | Estimator | Approach | Local values |
//! |-----------|----------|--------------|
//! | [`KsgMutualInformation`] | joint k-NN distance, marginal neighbour counts | ✅ |
//! | [`EntropySumMutualInformation`] | sum of Kozachenko-Leonenko entropies | ❌ |
//! | [`AdaptiveBinningMutualInformation`] | equal-frequency 2D histogram | ✅ |
//!
//! ### k-NN Estimation
//! The joint space is searched under the Chebyshev (L∞) metric with a KD-tree;
//! one-dimensional marginal queries run on sorted arrays with binary search.
//!
//! ### Adaptive Binning
//! Each axis is cut at its empirical quantiles, the joint occupancy histogram is
//! normalised and the plug-in MI is returned together with cell diagnostics.
//! Degenerate inputs return MI = 0 with a warning instead of an error.
//!
//! ## Logging
//!
//! Diagnostics are emitted through [`tracing`]; install any subscriber to see them.
//!
//! [`KsgMutualInformation`]: estimators::approaches::knn::KsgMutualInformation
//! [`EntropySumMutualInformation`]: estimators::approaches::knn::EntropySumMutualInformation
//! [`AdaptiveBinningMutualInformation`]: estimators::approaches::binning::AdaptiveBinningMutualInformation

pub mod estimators;

pub use estimators::error::{MiError, Result};
pub use estimators::mutual_information::{
    estimate_binning, estimate_entropy_sum, estimate_knn, estimate_knn_full_radius,
    MutualInformation,
};
pub use estimators::traits::{GlobalValue, LocalValues, OptionalLocalValues};
