//! Price-cap band arithmetic for the windowed oracle.
//!
//! Within one window an observation may deviate from the window baseline
//! by at most `baseline × max_bps_per_step / BASIS_POINTS`. When several
//! whole windows elapse between observations the band widens by one step
//! per extra window:
//!
//! ```text
//! allowed_delta(steps) = baseline × max_bps_per_step × steps / BASIS_POINTS
//! capped               = clamp(observed, baseline − delta, baseline + delta)
//! ```

use crate::constants::BASIS_POINTS;
use crate::domain::Price;
use crate::error::AmmError;
use crate::math::{floor_sum, saturating_mul_div};

/// Half-width of the band around `baseline` after `steps` cap steps.
///
/// Saturates instead of failing: a saturated delta already exceeds any
/// price the band is compared against.
#[must_use]
pub fn allowed_delta(baseline: Price, max_bps_per_step: u64, steps: u64) -> u128 {
    let per_step = baseline.get().saturating_mul(u128::from(max_bps_per_step));
    saturating_mul_div(per_step, u128::from(steps), BASIS_POINTS)
}

/// Clamps `observed` into the band of `steps` cap steps around `baseline`.
pub fn cap_price(observed: Price, baseline: Price, max_bps_per_step: u64, steps: u64) -> Price {
    observed.clamp_around(baseline, allowed_delta(baseline, max_bps_per_step, steps))
}

/// Smallest step count whose band around `baseline` contains `observed`.
///
/// `None` if the band never widens (zero baseline).
///
/// # Errors
///
/// [`AmmError::Overflow`] if the band arithmetic does not fit in `u128`.
pub fn steps_to_cover(
    observed: Price,
    baseline: Price,
    max_bps_per_step: u64,
) -> crate::error::Result<Option<u128>> {
    let gap = observed.abs_diff(&baseline);
    if gap == 0 {
        return Ok(Some(0));
    }
    let per_step = per_step(baseline, max_bps_per_step)?;
    if per_step == 0 {
        return Ok(None);
    }
    let scaled = gap
        .checked_mul(BASIS_POINTS)
        .ok_or(AmmError::Overflow("cap gap overflow"))?;
    Ok(Some(scaled.div_ceil(per_step)))
}

/// `Σ allowed_delta(baseline, max_bps_per_step, s)` for `s` in `1..=steps`.
///
/// # Errors
///
/// [`AmmError::Overflow`] if the sum does not fit in `u128`.
pub fn cumulative_delta(
    baseline: Price,
    max_bps_per_step: u64,
    steps: u64,
) -> crate::error::Result<u128> {
    let per_step = per_step(baseline, max_bps_per_step)?;
    floor_sum(u128::from(steps), BASIS_POINTS, per_step, per_step)
}

fn per_step(baseline: Price, max_bps_per_step: u64) -> crate::error::Result<u128> {
    baseline
        .get()
        .checked_mul(u128::from(max_bps_per_step))
        .ok_or(AmmError::Overflow("cap step overflow"))
}

/// A constant capped price held for `duration` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualSegment {
    /// Capped price over the segment.
    pub price: Price,
    /// Segment length.
    pub duration: u64,
}

impl AccrualSegment {
    /// Price × time contribution of the segment to the cumulative integral.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product does not fit in `u128`.
    pub fn contribution(&self) -> crate::error::Result<u128> {
        self.price
            .get()
            .checked_mul(u128::from(self.duration))
            .ok_or(AmmError::Overflow("twap segment contribution overflow"))
    }
}
