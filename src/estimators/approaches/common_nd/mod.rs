// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Neighbour-query infrastructure shared by the k-NN estimators: a KD-tree over the
// joint space and sorted arrays for scalar marginals.

pub mod dataset;
pub mod sorted_axis;

pub use dataset::{Chebyshev, Metric, NdDataset, NeighborQueryResult};
pub use sorted_axis::{SortedAxis, RADIUS_TOLERANCE};
