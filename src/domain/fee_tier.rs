//! Swap fee rate built on [`BasisPoints`].

use core::fmt;

use super::{Amount, BasisPoints};

/// A pool's swap fee rate.
///
/// The fee is charged on the input amount, truncated toward zero, and
/// never less than one unit on a non-zero input while the rate itself is
/// non-zero:
///
/// ```text
/// fee = max(1, floor(amount_in × fee_bps / FEE_SCALE))
/// ```
///
/// A zero rate charges nothing.
///
/// # Examples
///
/// ```
/// use futarchy_amm::domain::{Amount, BasisPoints, FeeTier};
///
/// let tier = FeeTier::new(BasisPoints::new(30));
/// assert_eq!(tier.compute_fee(Amount::new(100_000_000)).ok(), Some(Amount::new(300_000)));
/// assert_eq!(tier.compute_fee(Amount::new(10)).ok(), Some(Amount::new(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const FREE: Self = Self(BasisPoints::ZERO);

    /// 0.30% fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if the rate is strictly below 100%.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.is_below_full()
    }

    /// Computes the fee retained from `amount_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if
    /// the rate exceeds 100% and the fee cannot be represented.
    pub fn compute_fee(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        if self.0.get() == 0 || amount_in.is_zero() {
            return Ok(Amount::ZERO);
        }
        let fee = self.0.apply(amount_in)?;
        Ok(fee.max(Amount::new(1)))
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
