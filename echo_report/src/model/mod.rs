//! Domain models for report generation.
//!
//! - `series` — synthetic daily price series and the random walk that produces them.

pub mod series;

pub use series::{PricePoint, SyntheticDaySeries};
