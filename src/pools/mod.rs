//! Constant-product outcome pools.
//!
//! One [`LiquidityPool`] per conditional outcome. Each pool is the sole
//! price source of its embedded [`Oracle`](crate::oracle::Oracle).

mod liquidity_pool;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use liquidity_pool::LiquidityPool;
