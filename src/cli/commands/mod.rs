//! Command implementations

mod analyze;

pub use analyze::{analyze, validate};
