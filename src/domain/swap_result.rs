//! Outcome of a swap operation.

use core::fmt;

use super::{Amount, Price, SwapDirection};
use crate::error::AmmError;

/// The outcome of an executed swap.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use futarchy_amm::domain::{Amount, Price, SwapDirection, SwapResult};
///
/// let result = SwapResult::new(
///     SwapDirection::AssetToStable,
///     Amount::new(1_000),
///     Amount::new(990),
///     Amount::new(3),
///     Price::ONE,
/// );
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
    price_after: Price,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `amount_out` is zero.
    /// - [`AmmError::InvalidFee`] if `fee >= amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
        price_after: Price,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::InvalidFee("fee must be less than amount_in"));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
            price_after,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the gross input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained as protocol revenue.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Returns the input that entered the reserves (`amount_in − fee`).
    pub const fn net_input(&self) -> Amount {
        Amount::new(self.amount_in.get() - self.fee.get())
    }

    /// Returns the spot price after the swap.
    pub const fn price_after(&self) -> Price {
        self.price_after
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}, in={}, out={}, fee={}, price={})",
            self.direction, self.amount_in, self.amount_out, self.fee, self.price_after
        )
    }
}
