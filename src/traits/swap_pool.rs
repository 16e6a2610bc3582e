//! Swap abstraction shared by every outcome pool.
//!
//! [`SwapPool`] is what the market layer needs from a pool: execute a
//! swap at a timestamp, quote it without side effects, and report the
//! current spot price.
//!
//! # Fee Deduction Invariant
//!
//! Implementations deduct the fee from the input before the pricing
//! formula is applied, and the fee never enters the reserves:
//!
//! ```text
//! fee        = max(1, amount_in × fee_bps / 10_000)   (0 if fee_bps == 0)
//! net_input  = amount_in − fee
//! amount_out = curve(net_input)
//! ```

use crate::domain::{Amount, FeeTier, Price, SwapDirection, SwapResult};
use crate::error::AmmError;

/// Core trait for conditional-outcome pools.
pub trait SwapPool {
    /// Executes a swap, updating reserves and the price oracle atomically.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if the input (or its net of fee) is zero.
    /// - [`AmmError::ExcessiveSlippage`] if the output is below `min_out`.
    /// - [`AmmError::LowLiquidity`] if the output reserve would fall below
    ///   the floor.
    /// - Any oracle error for the observation at `now`.
    fn swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        min_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError>;

    /// Simulates a swap without mutating the pool.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`swap`](Self::swap), minus slippage and
    /// oracle checks.
    fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapResult, AmmError>;

    /// Current spot price, stable per asset scaled by `BASIS_POINTS`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolEmpty`] if the asset reserve is zero.
    fn spot_price(&self) -> Result<Price, AmmError>;

    /// Fee tier applied to swaps.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;

    /// Index of the outcome this pool trades.
    #[must_use]
    fn outcome_idx(&self) -> u8;
}
