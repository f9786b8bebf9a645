pub mod binning;
pub mod common_nd;
pub mod knn;

// Unified re-exports for the estimators so tests and users can import
// knnmi::estimators::approaches::* ergonomically.
pub use binning::{AdaptiveBinningMutualInformation, BinningEstimate};
pub use knn::{EntropySumMutualInformation, KsgMutualInformation, MarginalRadius};
