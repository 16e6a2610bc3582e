//! Protocol fee balances retained outside the pool reserves.

use super::{Amount, SwapDirection};
use crate::error::AmmError;

/// Fees retained by a pool, split by the token they were paid in.
///
/// Fees never enter the reserves; they are held here until the
/// surrounding fee layer collects them with
/// [`LiquidityPool::reset_protocol_fees`](crate::pools::LiquidityPool::reset_protocol_fees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolFees {
    asset: Amount,
    stable: Amount,
}

impl ProtocolFees {
    /// No fees accrued.
    pub const ZERO: Self = Self {
        asset: Amount::ZERO,
        stable: Amount::ZERO,
    };

    /// Fees paid in the asset token.
    pub const fn asset(&self) -> Amount {
        self.asset
    }

    /// Fees paid in the stable token.
    pub const fn stable(&self) -> Amount {
        self.stable
    }

    /// Sum of both sides, in raw units of mixed tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum does not fit.
    pub fn total(&self) -> crate::error::Result<Amount> {
        self.asset
            .checked_add(&self.stable)
            .ok_or(AmmError::Overflow("protocol fee total overflow"))
    }

    /// Returns the balances with `fee` credited to the input side of
    /// `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would overflow.
    pub fn credited(&self, direction: SwapDirection, fee: Amount) -> crate::error::Result<Self> {
        let mut next = *self;
        let slot = if direction.sells_asset() {
            &mut next.asset
        } else {
            &mut next.stable
        };
        *slot = slot
            .checked_add(&fee)
            .ok_or(AmmError::Overflow("protocol fee overflow"))?;
        Ok(next)
    }
}
