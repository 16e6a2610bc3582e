//! Window-capped TWAP oracle.
//!
//! The oracle turns a stream of instantaneous pool prices into
//!
//! 1. a capped `last_price` that can only drift a bounded percentage away
//!    from the current window baseline, and
//! 2. a cumulative price × time integral from which the average over the
//!    market's life is derived.
//!
//! # Accrual
//!
//! Every observation accrues the interval since the previous accrual
//! point. Time is bucketed into fixed price-cap windows starting at
//! `market_start_time + twap_start_delay`:
//!
//! ```text
//!  last_timestamp      boundary           boundary        timestamp
//!        |---- head ----|---- window 0 ----|--- ... ---|-- tail --|
//!   cap: 1 step vs         1 step vs          j+1 steps   extra+1 steps
//!        current baseline  new baseline       vs new      vs new baseline
//! ```
//!
//! At every boundary the baseline becomes the average capped price of the
//! window just closed. Baselines never move between boundaries.

use tracing::{debug, trace};

use super::window::{cap_price, cumulative_delta, steps_to_cover, AccrualSegment};
use crate::config::OracleConfig;
use crate::domain::Price;
use crate::error::AmmError;
use crate::traits::FromConfig;

/// Manipulation-resistant TWAP accumulator.
///
/// Owned by value by its [`LiquidityPool`](crate::pools::LiquidityPool);
/// every mutation goes through [`write_observation`](Self::write_observation)
/// and is applied atomically.
///
/// # Example
///
/// ```rust
/// use futarchy_amm::domain::Price;
/// use futarchy_amm::oracle::Oracle;
///
/// let mut oracle = Oracle::new(Price::new(10_000), 0, 1_000).expect("valid params");
/// oracle.set_start_time(0).expect("first start");
///
/// oracle.write_observation(1_000, Price::new(11_200)).expect("accepted");
/// assert_eq!(oracle.get_last_price(), Price::new(11_000));
///
/// oracle.write_observation(2_000, Price::new(8_800)).expect("accepted");
/// assert_eq!(oracle.get_last_price(), Price::new(9_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oracle {
    market_start_time: Option<u64>,
    twap_start_delay: u64,
    max_bps_per_step: u64,
    window_duration: u64,
    last_price: Price,
    last_timestamp: u64,
    total_cumulative_price: u128,
    last_window_end: u64,
    last_window_end_cumulative_price: u128,
    last_window_twap: Price,
    twap_initialization_price: Price,
}

impl Oracle {
    /// Creates an oracle with the default price-cap window.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`OracleConfig::new`].
    pub fn new(
        initial_price: Price,
        start_delay: u64,
        max_bps_per_step: u64,
    ) -> Result<Self, AmmError> {
        let config = OracleConfig::new(initial_price, start_delay, max_bps_per_step)?;
        Self::from_config(&config)
    }

    /// Records the market start. Allowed exactly once.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MarketAlreadyStarted`] if a start time is already set.
    /// - [`AmmError::Overflow`] if `start + twap_start_delay` overflows.
    pub fn set_start_time(&mut self, start: u64) -> Result<(), AmmError> {
        if self.market_start_time.is_some() {
            return Err(AmmError::MarketAlreadyStarted);
        }
        let threshold = start
            .checked_add(self.twap_start_delay)
            .ok_or(AmmError::Overflow("twap start threshold overflow"))?;
        self.market_start_time = Some(start);
        self.last_timestamp = start;
        self.last_window_end = threshold;
        debug!(start, threshold, "oracle started");
        Ok(())
    }

    /// Feeds an instantaneous price observed at `timestamp`.
    ///
    /// Observations at or before `market_start_time + twap_start_delay`
    /// do not accrue. An observation at the current `last_timestamp` is a
    /// no-op. On error the oracle is left untouched.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MarketNotStarted`] if no start time is set.
    /// - [`AmmError::TimestampRegression`] if `timestamp < last_timestamp`.
    /// - [`AmmError::Overflow`] if the cumulative integral overflows.
    pub fn write_observation(&mut self, timestamp: u64, observed: Price) -> Result<(), AmmError> {
        let threshold = self.accrual_threshold()?;
        if timestamp < self.last_timestamp {
            return Err(AmmError::TimestampRegression {
                last: self.last_timestamp,
                attempted: timestamp,
            });
        }
        if timestamp == self.last_timestamp {
            return Ok(());
        }
        if timestamp <= threshold {
            if timestamp == threshold {
                self.last_timestamp = threshold;
                self.last_window_end = threshold;
            }
            return Ok(());
        }

        let mut next = *self;
        if next.last_timestamp < threshold {
            next.last_timestamp = threshold;
            next.last_window_end = threshold;
        }
        next.accumulate(timestamp, observed)?;
        *self = next;
        Ok(())
    }

    /// Average capped price from the accrual threshold to `current_time`.
    ///
    /// Exact only if the oracle was synchronized with an observation at
    /// `current_time`; otherwise the integral stops at the last
    /// observation.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MarketNotStarted`] if no start time is set.
    /// - [`AmmError::ZeroPeriod`] if `current_time` is not after the
    ///   accrual threshold.
    /// - [`AmmError::TimestampRegression`] if `current_time` precedes the
    ///   last observation.
    pub fn get_twap(&self, current_time: u64) -> Result<Price, AmmError> {
        let threshold = self.accrual_threshold()?;
        let period = current_time.saturating_sub(threshold);
        if period == 0 {
            return Err(AmmError::ZeroPeriod);
        }
        if current_time < self.last_timestamp {
            return Err(AmmError::TimestampRegression {
                last: self.last_timestamp,
                attempted: current_time,
            });
        }
        Ok(Price::new(self.total_cumulative_price / u128::from(period)))
    }

    /// Returns `true` once `min_period` has elapsed since the last
    /// observation.
    #[must_use]
    pub fn is_twap_valid(&self, min_period: u64, now: u64) -> bool {
        now >= self.last_timestamp.saturating_add(min_period)
    }

    /// Last capped price.
    pub const fn get_last_price(&self) -> Price {
        self.last_price
    }

    /// Timestamp of the last accepted observation.
    #[must_use]
    pub const fn get_last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    /// Market start time, if set.
    #[must_use]
    pub const fn market_start_time(&self) -> Option<u64> {
        self.market_start_time
    }

    /// Delay after market start before prices accrue.
    #[must_use]
    pub const fn twap_start_delay(&self) -> u64 {
        self.twap_start_delay
    }

    /// Per-window cap rate in basis points.
    #[must_use]
    pub const fn max_bps_per_step(&self) -> u64 {
        self.max_bps_per_step
    }

    /// Price-cap window duration.
    #[must_use]
    pub const fn window_duration(&self) -> u64 {
        self.window_duration
    }

    /// Cumulative capped price × time.
    #[must_use]
    pub const fn total_cumulative_price(&self) -> u128 {
        self.total_cumulative_price
    }

    /// End of the last closed window.
    #[must_use]
    pub const fn last_window_end(&self) -> u64 {
        self.last_window_end
    }

    /// Cumulative integral snapshot at [`last_window_end`](Self::last_window_end).
    #[must_use]
    pub const fn last_window_end_cumulative_price(&self) -> u128 {
        self.last_window_end_cumulative_price
    }

    /// Baseline of the current window.
    pub const fn last_window_twap(&self) -> Price {
        self.last_window_twap
    }

    /// Price the oracle was initialized with.
    pub const fn twap_initialization_price(&self) -> Price {
        self.twap_initialization_price
    }

    fn accrual_threshold(&self) -> Result<u64, AmmError> {
        let start = self.market_start_time.ok_or(AmmError::MarketNotStarted)?;
        start
            .checked_add(self.twap_start_delay)
            .ok_or(AmmError::Overflow("twap start threshold overflow"))
    }

    /// Accrues `(last_timestamp, timestamp]`. Requires
    /// `last_window_end <= last_timestamp < timestamp`.
    fn accumulate(&mut self, timestamp: u64, observed: Price) -> Result<(), AmmError> {
        let window = self.window_duration;
        let full_windows = (timestamp - self.last_window_end) / window;

        if full_windows == 0 {
            let capped = cap_price(observed, self.last_window_twap, self.max_bps_per_step, 1);
            self.fold(AccrualSegment {
                price: capped,
                duration: timestamp - self.last_timestamp,
            })?;
            self.last_price = capped;
            self.last_timestamp = timestamp;
            return Ok(());
        }

        // Head: finish the open window against its own baseline.
        let boundary = self.last_window_end + window;
        let head = cap_price(observed, self.last_window_twap, self.max_bps_per_step, 1);
        self.fold(AccrualSegment {
            price: head,
            duration: boundary - self.last_timestamp,
        })?;
        self.roll_window(boundary)?;

        let baseline = self.last_window_twap;
        let extra = full_windows - 1;
        let mut last = head;
        if extra > 0 {
            last = self.close_extra_windows(observed, baseline, extra)?;
        }

        let tail = timestamp - self.last_window_end;
        if tail > 0 {
            let capped = cap_price(observed, baseline, self.max_bps_per_step, extra + 1);
            self.fold(AccrualSegment {
                price: capped,
                duration: tail,
            })?;
            last = capped;
        }

        self.last_price = last;
        self.last_timestamp = timestamp;
        Ok(())
    }

    fn fold(&mut self, segment: AccrualSegment) -> Result<(), AmmError> {
        self.accrue(segment.contribution()?)?;
        trace!(
            price = segment.price.get(),
            duration = segment.duration,
            total = self.total_cumulative_price,
            "twap accrual"
        );
        Ok(())
    }

    fn accrue(&mut self, contribution: u128) -> Result<(), AmmError> {
        self.total_cumulative_price = self
            .total_cumulative_price
            .checked_add(contribution)
            .ok_or(AmmError::Overflow("cumulative price overflow"))?;
        Ok(())
    }

    /// Closes the open window at `boundary`, re-baselining to its average.
    fn roll_window(&mut self, boundary: u64) -> Result<(), AmmError> {
        let in_window = self
            .total_cumulative_price
            .checked_sub(self.last_window_end_cumulative_price)
            .ok_or(AmmError::Underflow("in-window cumulative price underflow"))?;
        self.last_window_twap = Price::new(in_window / u128::from(self.window_duration));
        self.last_window_end = boundary;
        self.last_window_end_cumulative_price = self.total_cumulative_price;
        trace!(
            boundary,
            baseline = self.last_window_twap.get(),
            "twap window rolled"
        );
        Ok(())
    }

    /// Closes `extra` whole windows after the first boundary and returns
    /// the capped price of the last one.
    ///
    /// Window `j` (from 1) is capped with `j` steps around `anchor`. While
    /// the band lags `observed` the windows form an arithmetic ramp, summed
    /// in closed form; once it covers `observed` the rest accrue at
    /// `observed`.
    fn close_extra_windows(
        &mut self,
        observed: Price,
        anchor: Price,
        extra: u64,
    ) -> Result<Price, AmmError> {
        let bps = self.max_bps_per_step;
        let ramp = match steps_to_cover(observed, anchor, bps)? {
            Some(steps) => u64::try_from(steps.saturating_sub(1)).map_or(extra, |s| s.min(extra)),
            None => extra,
        };

        let mut last = observed;
        if ramp > 0 {
            let spread = cumulative_delta(anchor, bps, ramp)?;
            let level = anchor
                .get()
                .checked_mul(u128::from(ramp))
                .ok_or(AmmError::Overflow("twap ramp overflow"))?;
            let price_sum = if observed > anchor {
                level
                    .checked_add(spread)
                    .ok_or(AmmError::Overflow("twap ramp overflow"))?
            } else {
                level
                    .checked_sub(spread)
                    .ok_or(AmmError::Underflow("twap ramp underflow"))?
            };
            last = cap_price(observed, anchor, bps, ramp);
            let contribution = price_sum
                .checked_mul(u128::from(self.window_duration))
                .ok_or(AmmError::Overflow("twap ramp overflow"))?;
            self.close_windows(contribution, ramp, last)?;
        }
        if ramp < extra {
            let count = extra - ramp;
            let span = count
                .checked_mul(self.window_duration)
                .ok_or(AmmError::Overflow("window span overflow"))?;
            let contribution = AccrualSegment {
                price: observed,
                duration: span,
            }
            .contribution()?;
            self.close_windows(contribution, count, observed)?;
            last = observed;
        }
        Ok(last)
    }

    /// Accrues `contribution` over `count` whole windows and closes them
    /// with `baseline` as the new window baseline.
    fn close_windows(
        &mut self,
        contribution: u128,
        count: u64,
        baseline: Price,
    ) -> Result<(), AmmError> {
        let span = count
            .checked_mul(self.window_duration)
            .ok_or(AmmError::Overflow("window span overflow"))?;
        self.accrue(contribution)?;
        self.last_window_end = self
            .last_window_end
            .checked_add(span)
            .ok_or(AmmError::Overflow("window end overflow"))?;
        self.last_window_end_cumulative_price = self.total_cumulative_price;
        self.last_window_twap = baseline;
        trace!(
            windows = count,
            baseline = baseline.get(),
            total = self.total_cumulative_price,
            "twap full windows closed"
        );
        Ok(())
    }
}

impl FromConfig<OracleConfig> for Oracle {
    /// Creates an unstarted oracle from a validated config.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`OracleConfig::validate`].
    fn from_config(config: &OracleConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let price = config.initial_price();
        Ok(Self {
            market_start_time: None,
            twap_start_delay: config.start_delay(),
            max_bps_per_step: config.max_bps_per_step(),
            window_duration: config.window_duration(),
            last_price: price,
            last_timestamp: 0,
            total_cumulative_price: 0,
            last_window_end: 0,
            last_window_end_cumulative_price: 0,
            last_window_twap: price,
            twap_initialization_price: price,
        })
    }
}
