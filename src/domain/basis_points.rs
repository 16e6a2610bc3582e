//! Basis-point representation for fee and cap rates.

use core::fmt;

use super::Amount;
use crate::constants::FEE_SCALE;
use crate::error::AmmError;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Used both for swap fees (denominator [`FEE_SCALE`]) and for the oracle
/// cap rate (denominator [`BASIS_POINTS`](crate::constants::BASIS_POINTS)).
///
/// # Examples
///
/// ```
/// use futarchy_amm::domain::{Amount, BasisPoints};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert_eq!(bp.apply(Amount::new(1_000_000)).ok(), Some(Amount::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u64);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(FEE_SCALE);

    /// Creates a new `BasisPoints` from a raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the value is below 100%.
    #[must_use]
    pub const fn is_below_full(&self) -> bool {
        self.0 < FEE_SCALE
    }

    /// Computes `floor(amount × self / FEE_SCALE)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit in an
    /// [`Amount`], which can only happen for rates above 100%.
    pub const fn apply(&self, amount: Amount) -> crate::error::Result<Amount> {
        // u64 × u64 always fits in u128.
        let product = amount.widen() * self.0 as u128;
        match Amount::from_wide(product / FEE_SCALE as u128) {
            Some(v) => Ok(v),
            None => Err(AmmError::Overflow("basis points apply overflow")),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
