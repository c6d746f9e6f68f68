//! Preflop tables, combo expansion, action filters and the range history
//! that ties them together.

pub mod analyzer;
pub mod combos;
pub mod history;
pub mod tables;

pub use analyzer::{Bucket, RangeSummary};
pub use combos::{Combo, ComboRange, ComboTable};
