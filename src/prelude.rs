//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use futarchy_amm::prelude::*;
//! ```

pub use crate::config::{OracleConfig, PoolConfig};
pub use crate::domain::{
    Amount, BasisPoints, FeeTier, Price, ProtocolFees, SwapDirection, SwapResult,
};
pub use crate::error::{AmmError, Result};
pub use crate::market::{MarketPhase, MarketState};
pub use crate::math::CheckedArithmetic;
pub use crate::oracle::Oracle;
pub use crate::pools::LiquidityPool;
pub use crate::traits::{FromConfig, SwapPool};
