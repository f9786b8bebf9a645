pub mod approaches;
pub mod error;
pub mod mutual_information;
pub mod traits;
pub mod utils;

pub use traits::{GlobalValue, LocalValues, OptionalLocalValues};
