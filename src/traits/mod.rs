//! Core trait abstractions for pool construction and swapping.
//!
//! - [`SwapPool`]: execute and quote swaps against a pool.
//! - [`FromConfig`]: build a pool or oracle from a validated config.

mod from_config;
mod swap_pool;

pub use from_config::FromConfig;
pub use swap_pool::SwapPool;
