//! Protocol-wide fixed-point scales and limits.

/// Fixed-point scale for prices and for the oracle cap rate.
///
/// A price of `1.0` stable per asset is represented as `BASIS_POINTS`.
pub const BASIS_POINTS: u128 = 10_000;

/// Denominator for swap fee rates (`fee_bps / FEE_SCALE`).
pub const FEE_SCALE: u64 = 10_000;

/// Smallest reserve a funded pool may hold on either side.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Duration of one price-cap window, in milliseconds.
pub const TWAP_PRICE_CAP_WINDOW: u64 = 60_000;

/// Sanity ceiling for prices expressed on the [`BASIS_POINTS`] scale.
pub const MAX_PRICE: u128 = u64::MAX as u128;
