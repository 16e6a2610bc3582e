//! Fixed-point price of the asset in stable units.

use core::fmt;

use super::Amount;
use crate::constants::{BASIS_POINTS, MAX_PRICE};
use crate::error::AmmError;

/// Stable units per asset unit, scaled by [`BASIS_POINTS`].
///
/// `Price::ONE` (= `BASIS_POINTS`) means one stable unit per asset unit.
/// All arithmetic truncates toward zero.
///
/// # Examples
///
/// ```
/// use futarchy_amm::domain::{Amount, Price};
///
/// let p = Price::from_reserves(Amount::new(2_000), Amount::new(1_000));
/// assert_eq!(p.ok(), Some(Price::new(5_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Price(u128);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(0);

    /// One stable unit per asset unit.
    pub const ONE: Self = Self(BASIS_POINTS);

    /// Largest price accepted at pool or oracle creation.
    pub const MAX: Self = Self(MAX_PRICE);

    /// Creates a price from a raw scaled value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Spot price implied by a pair of reserves:
    /// `stable × BASIS_POINTS / asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolEmpty`] if `asset_reserve` is zero.
    pub const fn from_reserves(
        asset_reserve: Amount,
        stable_reserve: Amount,
    ) -> crate::error::Result<Self> {
        if asset_reserve.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        // u64 × 10^4 fits comfortably in u128.
        Ok(Self(
            stable_reserve.widen() * BASIS_POINTS / asset_reserve.widen(),
        ))
    }

    /// Clamps `self` into `[center − delta, center + delta]`.
    ///
    /// The lower bound saturates at zero and the upper bound at
    /// `u128::MAX`.
    pub const fn clamp_around(self, center: Self, delta: u128) -> Self {
        let lower = center.0.saturating_sub(delta);
        let upper = center.0.saturating_add(delta);
        if self.0 < lower {
            Self(lower)
        } else if self.0 > upper {
            Self(upper)
        } else {
            self
        }
    }

    /// Absolute distance between two prices.
    #[must_use]
    pub const fn abs_diff(&self, other: &Self) -> u128 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / BASIS_POINTS;
        let frac = self.0 % BASIS_POINTS;
        write!(f, "{whole}.{frac:04}")
    }
}
