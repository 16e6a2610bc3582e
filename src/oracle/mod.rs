//! Manipulation-resistant time-weighted average price oracle.
//!
//! - [`Oracle`]: the accumulator owned by each pool.
//! - [`window`]: price-cap band arithmetic shared by every accrual step.

mod twap;
pub mod window;

pub use twap::Oracle;
