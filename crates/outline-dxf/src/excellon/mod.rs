//! Excellon drill extraction.

pub mod extractor;
pub mod types;

pub use extractor::extract;
pub use types::*;
