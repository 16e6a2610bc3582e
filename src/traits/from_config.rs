//! Generic construction trait for building components from configuration.
//!
//! [`FromConfig`] gives pools and oracles a uniform constructor driven by
//! their config structs. There is no blanket implementation: every
//! component-config pairing is explicit.
//!
//! ```text
//! Oracle::from_config(&OracleConfig)
//! LiquidityPool::from_config(&PoolConfig)
//! ```

use crate::error::AmmError;

/// Builds `Self` from a configuration of type `C`.
///
/// # Implementors
///
/// - `impl FromConfig<OracleConfig> for Oracle`
/// - `impl FromConfig<PoolConfig> for LiquidityPool`
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// The configuration is re-validated; a returned value is always in
    /// a valid initial state.
    ///
    /// # Errors
    ///
    /// Any validation error of the configuration type, typically
    /// [`AmmError::InvalidConfiguration`], [`AmmError::InvalidFee`] or
    /// [`AmmError::LowLiquidity`].
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
