//! Numerical utilities
mod percentile;
mod quad;
mod root;

pub use percentile::{percentile, percentiles, PercentileError};
pub use quad::{quad, quad2, quad_eps};
pub use root::{bisection, RootError};
