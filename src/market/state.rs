//! Phase gate and time anchor for a market's outcome pools.

use tracing::debug;

use super::MarketPhase;
use crate::domain::{Amount, Price, SwapDirection, SwapResult};
use crate::error::AmmError;
use crate::oracle::Oracle;
use crate::pools::LiquidityPool;
use crate::traits::SwapPool;

/// Trading phase and canonical timestamps of one conditional market.
///
/// Pools are passed in by the caller on every operation; the outcome pool
/// for index `i` must sit at `pools[i]`.
///
/// # Example
///
/// ```rust
/// use futarchy_amm::domain::{Amount, FeeTier, Price, SwapDirection};
/// use futarchy_amm::market::MarketState;
/// use futarchy_amm::pools::LiquidityPool;
///
/// let pool = |idx| {
///     LiquidityPool::new_pool(
///         Amount::new(1_000_000),
///         Amount::new(1_000_000),
///         Price::ONE,
///         0,
///         1_000,
///         FeeTier::TIER_0_30_PERCENT,
///         idx,
///     )
///     .expect("valid pool")
/// };
/// let mut pools = vec![pool(0), pool(1)];
/// let mut market = MarketState::new(2).expect("two outcomes");
///
/// market.start_trading(100, &mut pools).expect("started");
/// market
///     .swap(&mut pools[1], SwapDirection::StableToAsset, Amount::new(1_000), Amount::ZERO, 200)
///     .expect("swap accepted");
/// market.end_trading(300).expect("ended");
/// let drained = market.drain_pools(&mut pools).expect("drained");
/// assert_eq!(drained.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketState {
    outcome_count: u8,
    phase: MarketPhase,
    trading_start: Option<u64>,
    trading_end: Option<u64>,
}

impl MarketState {
    /// Creates a market in [`MarketPhase::PreTrading`].
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if fewer than two outcomes.
    pub fn new(outcome_count: u8) -> Result<Self, AmmError> {
        if outcome_count < 2 {
            return Err(AmmError::InvalidConfiguration(
                "a market needs at least two outcomes",
            ));
        }
        Ok(Self {
            outcome_count,
            phase: MarketPhase::PreTrading,
            trading_start: None,
            trading_end: None,
        })
    }

    /// Opens trading at `now` and starts every pool oracle at `now`.
    ///
    /// Either all oracles start or none do.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPhase`] unless in [`MarketPhase::PreTrading`].
    /// - [`AmmError::InvalidOutcome`] if `pools` does not hold exactly one
    ///   pool per outcome, in outcome order.
    /// - Any [`Oracle::set_start_time`] error.
    pub fn start_trading(&mut self, now: u64, pools: &mut [LiquidityPool]) -> Result<(), AmmError> {
        self.transition(MarketPhase::Trading)?;
        self.check_pools(pools)?;

        let staged = pools
            .iter()
            .map(|pool| {
                let mut oracle = *pool.oracle();
                oracle.set_start_time(now)?;
                Ok::<Oracle, AmmError>(oracle)
            })
            .collect::<Result<Vec<Oracle>, AmmError>>()?;
        for (pool, oracle) in pools.iter_mut().zip(staged) {
            *pool.oracle_mut() = oracle;
        }

        self.phase = MarketPhase::Trading;
        self.trading_start = Some(now);
        debug!(now, outcomes = self.outcome_count, "market trading started");
        Ok(())
    }

    /// Fails unless the market is in [`MarketPhase::Trading`].
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidPhase`] outside the trading phase.
    pub fn assert_trading_active(&self) -> Result<(), AmmError> {
        if self.phase.allows_trading() {
            Ok(())
        } else {
            Err(AmmError::InvalidPhase)
        }
    }

    /// Routes a swap to `pool` if trading is active.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPhase`] outside the trading phase.
    /// - [`AmmError::InvalidOutcome`] if the pool's outcome index is out of
    ///   range.
    /// - Any [`SwapPool::swap`] error.
    pub fn swap<P: SwapPool>(
        &self,
        pool: &mut P,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError> {
        self.assert_trading_active()?;
        if pool.outcome_idx() >= self.outcome_count {
            return Err(AmmError::InvalidOutcome);
        }
        pool.swap(direction, amount_in, min_amount_out, now)
    }

    /// Closes trading at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPhase`] unless in [`MarketPhase::Trading`].
    /// - [`AmmError::TimestampRegression`] if `now` precedes the start.
    pub fn end_trading(&mut self, now: u64) -> Result<(), AmmError> {
        self.transition(MarketPhase::Finalized)?;
        let start = self.trading_start.ok_or(AmmError::MarketNotStarted)?;
        if now < start {
            return Err(AmmError::TimestampRegression {
                last: start,
                attempted: now,
            });
        }
        self.phase = MarketPhase::Finalized;
        self.trading_end = Some(now);
        debug!(now, "market trading ended");
        Ok(())
    }

    /// TWAP of every outcome pool at `now`, in outcome order.
    ///
    /// Each pool's oracle is synchronized at `now` first. Either every
    /// oracle is updated or none is.
    ///
    /// # Errors
    ///
    /// - [`AmmError::MarketNotStarted`] before trading has started.
    /// - [`AmmError::InvalidOutcome`] for a mismatched pool slice.
    /// - Any [`LiquidityPool::get_twap`] error.
    pub fn twaps(&self, pools: &mut [LiquidityPool], now: u64) -> Result<Vec<Price>, AmmError> {
        if self.trading_start.is_none() {
            return Err(AmmError::MarketNotStarted);
        }
        self.check_pools(pools)?;

        let mut staged = pools.to_vec();
        let prices = staged
            .iter_mut()
            .map(|pool| pool.get_twap(now))
            .collect::<Result<Vec<Price>, AmmError>>()?;
        pools.clone_from_slice(&staged);
        Ok(prices)
    }

    /// Drains every pool once the market is finalized, returning
    /// `(asset, stable)` per outcome.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPhase`] unless in [`MarketPhase::Finalized`].
    /// - [`AmmError::InvalidOutcome`] for a mismatched pool slice.
    pub fn drain_pools(
        &self,
        pools: &mut [LiquidityPool],
    ) -> Result<Vec<(Amount, Amount)>, AmmError> {
        if self.phase != MarketPhase::Finalized {
            return Err(AmmError::InvalidPhase);
        }
        self.check_pools(pools)?;
        Ok(pools
            .iter_mut()
            .map(LiquidityPool::empty_all_amm_liquidity)
            .collect())
    }

    /// Number of outcomes.
    #[must_use]
    pub const fn outcome_count(&self) -> u8 {
        self.outcome_count
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> MarketPhase {
        self.phase
    }

    /// Canonical trading-start timestamp.
    #[must_use]
    pub const fn trading_start(&self) -> Option<u64> {
        self.trading_start
    }

    /// Trading-end timestamp.
    #[must_use]
    pub const fn trading_end(&self) -> Option<u64> {
        self.trading_end
    }

    fn transition(&self, next: MarketPhase) -> Result<(), AmmError> {
        if self.phase.can_transition_to(next) {
            Ok(())
        } else {
            Err(AmmError::InvalidPhase)
        }
    }

    fn check_pools(&self, pools: &[LiquidityPool]) -> Result<(), AmmError> {
        if pools.len() != usize::from(self.outcome_count) {
            return Err(AmmError::InvalidOutcome);
        }
        let in_order = pools
            .iter()
            .enumerate()
            .all(|(i, pool)| usize::from(SwapPool::outcome_idx(pool)) == i);
        if in_order {
            Ok(())
        } else {
            Err(AmmError::InvalidOutcome)
        }
    }
}
