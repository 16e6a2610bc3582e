//! Constant-product outcome pool with an embedded TWAP oracle.
//!
//! The swap invariant is `asset × stable = k`. The fee is taken from the
//! input **before** the pricing formula and is held outside the reserves
//! as protocol revenue.
//!
//! # Swap Algorithm (asset → stable)
//!
//! 1. `fee = max(1, amount_in × fee_bps / FEE_SCALE)` (0 if `fee_bps == 0`)
//! 2. `net_input = amount_in − fee`
//! 3. `amount_out = net_input × stable / (asset + net_input)`
//! 4. `asset += net_input`, `stable −= amount_out`
//! 5. `protocol_fees.asset += fee`
//! 6. `oracle.write_observation(now, stable × BASIS_POINTS / asset)`
//!
//! # Invariant
//!
//! Rounding the output down keeps `k_after ≥ k_before`. The product is
//! re-checked before any state is committed.

use tracing::{debug, warn};

use crate::config::{OracleConfig, PoolConfig};
use crate::constants::MINIMUM_LIQUIDITY;
use crate::domain::{Amount, FeeTier, Price, ProtocolFees, SwapDirection, SwapResult};
use crate::error::AmmError;
use crate::math::{mul_div, CheckedArithmetic};
use crate::oracle::Oracle;
use crate::traits::{FromConfig, SwapPool};

/// Reserves and fee produced by a swap, before anything is committed.
#[derive(Debug, Clone, Copy)]
struct SwapStep {
    fee: Amount,
    amount_out: Amount,
    asset_after: Amount,
    stable_after: Amount,
}

/// A constant-product pool trading one conditional outcome.
///
/// Owns its [`Oracle`] by value. Every mutating operation either commits
/// all of its effects or none of them.
///
/// # Example
///
/// ```rust
/// use futarchy_amm::domain::{Amount, BasisPoints, FeeTier, Price};
/// use futarchy_amm::pools::LiquidityPool;
///
/// let mut pool = LiquidityPool::new_pool(
///     Amount::new(1_000_000_000),
///     Amount::new(1_000_000_000),
///     Price::ONE,
///     0,
///     1_000,
///     FeeTier::new(BasisPoints::new(30)),
///     0,
/// )
/// .expect("valid pool");
/// pool.start_oracle(0).expect("first start");
///
/// let quoted = pool
///     .quote_swap_asset_to_stable(Amount::new(100_000_000))
///     .expect("quote");
/// let result = pool
///     .swap_asset_to_stable(Amount::new(100_000_000), Amount::ZERO, 1_000)
///     .expect("swap");
/// assert_eq!(quoted.amount_out(), result.amount_out());
/// assert_eq!(result.fee(), Amount::new(300_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityPool {
    outcome_idx: u8,
    asset_reserve: Amount,
    stable_reserve: Amount,
    fee_tier: FeeTier,
    protocol_fees: ProtocolFees,
    oracle: Oracle,
}

impl LiquidityPool {
    /// Creates a pool seeded with both reserves and an unstarted oracle.
    ///
    /// # Errors
    ///
    /// - [`AmmError::LowLiquidity`] if either reserve is below
    ///   [`MINIMUM_LIQUIDITY`].
    /// - [`AmmError::PriceTooHigh`] if the implied price exceeds
    ///   [`Price::MAX`].
    /// - Any oracle or fee validation error.
    pub fn new_pool(
        initial_asset: Amount,
        initial_stable: Amount,
        twap_initial_price: Price,
        twap_start_delay: u64,
        twap_step_max_bps: u64,
        fee_tier: FeeTier,
        outcome_idx: u8,
    ) -> Result<Self, AmmError> {
        if initial_asset.get() < MINIMUM_LIQUIDITY || initial_stable.get() < MINIMUM_LIQUIDITY {
            return Err(AmmError::LowLiquidity);
        }
        let oracle = OracleConfig::new(twap_initial_price, twap_start_delay, twap_step_max_bps)?;
        let config = PoolConfig::new(outcome_idx, initial_asset, initial_stable, fee_tier, oracle)?;
        Self::from_config(&config)
    }

    /// Starts the embedded oracle at the market's trading-start time.
    ///
    /// # Errors
    ///
    /// Propagates [`Oracle::set_start_time`] errors.
    pub fn start_oracle(&mut self, now: u64) -> Result<(), AmmError> {
        self.oracle.set_start_time(now)
    }

    /// Sells `amount_in` asset for stable.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::swap`].
    pub fn swap_asset_to_stable(
        &mut self,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError> {
        self.execute(SwapDirection::AssetToStable, amount_in, min_amount_out, now)
    }

    /// Buys asset with `amount_in` stable.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::swap`].
    pub fn swap_stable_to_asset(
        &mut self,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError> {
        self.execute(SwapDirection::StableToAsset, amount_in, min_amount_out, now)
    }

    /// Quotes an asset → stable swap against the current state.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::quote`].
    pub fn quote_swap_asset_to_stable(&self, amount_in: Amount) -> Result<SwapResult, AmmError> {
        self.preview(SwapDirection::AssetToStable, amount_in)
    }

    /// Quotes a stable → asset swap against the current state.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::quote`].
    pub fn quote_swap_stable_to_asset(&self, amount_in: Amount) -> Result<SwapResult, AmmError> {
        self.preview(SwapDirection::StableToAsset, amount_in)
    }

    /// Returns `(asset_reserve, stable_reserve)`.
    pub const fn get_reserves(&self) -> (Amount, Amount) {
        (self.asset_reserve, self.stable_reserve)
    }

    /// Spot price `stable × BASIS_POINTS / asset`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolEmpty`] if the asset reserve is zero.
    pub fn get_current_price(&self) -> Result<Price, AmmError> {
        Price::from_reserves(self.asset_reserve, self.stable_reserve)
    }

    /// Synchronizes the oracle with the spot price at `now`, then reads
    /// the TWAP.
    ///
    /// A drained pool has no spot price; its oracle is read as-is.
    ///
    /// # Errors
    ///
    /// Any [`Oracle::write_observation`] or [`Oracle::get_twap`] error.
    /// On error the oracle is left untouched.
    pub fn get_twap(&mut self, now: u64) -> Result<Price, AmmError> {
        let mut oracle = self.oracle;
        if !self.is_drained() {
            oracle.write_observation(now, self.get_current_price()?)?;
        }
        let twap = oracle.get_twap(now)?;
        self.oracle = oracle;
        Ok(twap)
    }

    /// Constant-product invariant `asset × stable`.
    #[must_use]
    pub const fn k(&self) -> u128 {
        self.asset_reserve.widen() * self.stable_reserve.widen()
    }

    /// Raw count of protocol fee units accrued on both sides.
    ///
    /// Adds asset units to stable units, so the result is a counter and
    /// not a value in either token. Use
    /// [`protocol_fees`](Self::protocol_fees) for the per-token balances.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if the sum does not fit in an [`Amount`].
    pub fn get_protocol_fees(&self) -> Result<Amount, AmmError> {
        self.protocol_fees.total()
    }

    /// Per-side protocol fee balances.
    pub const fn protocol_fees(&self) -> ProtocolFees {
        self.protocol_fees
    }

    /// Hands accrued protocol fees to the caller and zeroes them.
    pub fn reset_protocol_fees(&mut self) -> ProtocolFees {
        core::mem::replace(&mut self.protocol_fees, ProtocolFees::ZERO)
    }

    /// Deposits liquidity at the current reserve ratio.
    ///
    /// Absorbs the largest amounts not exceeding `max_asset` and
    /// `max_stable` that keep `stable / asset` unchanged (up to
    /// truncation) and returns `(asset_used, stable_used)`. A drained pool
    /// is re-seeded with both amounts as given.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if either side would be zero.
    /// - [`AmmError::LowLiquidity`] if re-seeding below the floor.
    /// - [`AmmError::Overflow`] if a reserve would overflow.
    pub fn add_liquidity(
        &mut self,
        max_asset: Amount,
        max_stable: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        let (asset_in, stable_in) = if self.is_drained() {
            if max_asset.get() < MINIMUM_LIQUIDITY || max_stable.get() < MINIMUM_LIQUIDITY {
                return Err(AmmError::LowLiquidity);
            }
            (max_asset, max_stable)
        } else {
            self.proportional_deposit(max_asset, max_stable)?
        };
        if asset_in.is_zero() || stable_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }

        let asset_after = self.asset_reserve.safe_add(&asset_in)?;
        let stable_after = self.stable_reserve.safe_add(&stable_in)?;
        if Price::from_reserves(asset_after, stable_after)? > Price::MAX {
            return Err(AmmError::PriceTooHigh);
        }

        self.asset_reserve = asset_after;
        self.stable_reserve = stable_after;
        debug!(
            outcome = self.outcome_idx,
            asset = asset_in.get(),
            stable = stable_in.get(),
            "liquidity added"
        );
        Ok((asset_in, stable_in))
    }

    /// Pro-rata share of both reserves held by `lp_tokens` out of
    /// `lp_total_supply`, as `(asset, stable)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `lp_total_supply` is zero.
    /// - [`AmmError::InsufficientLiquidity`] if `lp_tokens` exceeds it.
    pub fn withdrawable(
        &self,
        lp_tokens: Amount,
        lp_total_supply: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        if lp_total_supply.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        if lp_tokens > lp_total_supply {
            return Err(AmmError::InsufficientLiquidity);
        }
        let share = |reserve: Amount| -> Result<Amount, AmmError> {
            let wide = mul_div(lp_tokens.widen(), reserve.widen(), lp_total_supply.widen())?;
            Amount::from_wide(wide).ok_or(AmmError::Overflow("withdrawable share overflow"))
        };
        Ok((share(self.asset_reserve)?, share(self.stable_reserve)?))
    }

    /// Drains both reserves to zero and returns `(asset, stable)`.
    ///
    /// Protocol fees and the oracle are left as they are.
    pub fn empty_all_amm_liquidity(&mut self) -> (Amount, Amount) {
        let drained = (self.asset_reserve, self.stable_reserve);
        self.asset_reserve = Amount::ZERO;
        self.stable_reserve = Amount::ZERO;
        debug!(
            outcome = self.outcome_idx,
            asset = drained.0.get(),
            stable = drained.1.get(),
            "pool drained"
        );
        drained
    }

    /// Embedded price oracle.
    pub const fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    pub(crate) fn oracle_mut(&mut self) -> &mut Oracle {
        &mut self.oracle
    }

    /// Returns `true` once both reserves have been drained.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.asset_reserve.is_zero() && self.stable_reserve.is_zero()
    }

    fn proportional_deposit(
        &self,
        max_asset: Amount,
        max_stable: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        if self.asset_reserve.is_zero() || self.stable_reserve.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        let stable_needed = mul_div(
            max_asset.widen(),
            self.stable_reserve.widen(),
            self.asset_reserve.widen(),
        )?;
        if stable_needed <= max_stable.widen() {
            let stable = Amount::from_wide(stable_needed)
                .ok_or(AmmError::Overflow("deposit amount overflow"))?;
            return Ok((max_asset, stable));
        }
        let asset_needed = mul_div(
            max_stable.widen(),
            self.asset_reserve.widen(),
            self.stable_reserve.widen(),
        )?;
        let asset =
            Amount::from_wide(asset_needed).ok_or(AmmError::Overflow("deposit amount overflow"))?;
        Ok((asset, max_stable))
    }

    /// Computes the swap outcome without touching any state.
    fn compute_swap(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapStep, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        if self.asset_reserve.is_zero() || self.stable_reserve.is_zero() {
            return Err(AmmError::PoolEmpty);
        }

        let (reserve_in, reserve_out) = if direction.sells_asset() {
            (self.asset_reserve, self.stable_reserve)
        } else {
            (self.stable_reserve, self.asset_reserve)
        };

        let fee = self.fee_tier.compute_fee(amount_in)?;
        let net_input = amount_in.safe_sub(&fee)?;
        if net_input.is_zero() {
            return Err(AmmError::ZeroAmount);
        }

        // u64 + u64 cannot overflow u128.
        let denominator = reserve_in.widen() + net_input.widen();
        let out = mul_div(net_input.widen(), reserve_out.widen(), denominator)?;
        let amount_out = Amount::from_wide(out).ok_or(AmmError::Overflow("swap output overflow"))?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let in_after = reserve_in.safe_add(&net_input)?;
        let out_after = reserve_out.safe_sub(&amount_out)?;
        if out_after.get() < MINIMUM_LIQUIDITY {
            return Err(AmmError::LowLiquidity);
        }

        let (asset_after, stable_after) = if direction.sells_asset() {
            (in_after, out_after)
        } else {
            (out_after, in_after)
        };
        Ok(SwapStep {
            fee,
            amount_out,
            asset_after,
            stable_after,
        })
    }

    fn preview(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapResult, AmmError> {
        let step = self.compute_swap(direction, amount_in)?;
        let price_after = Price::from_reserves(step.asset_after, step.stable_after)?;
        SwapResult::new(direction, amount_in, step.amount_out, step.fee, price_after)
    }

    fn execute(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError> {
        let step = self.compute_swap(direction, amount_in)?;
        if step.amount_out < min_amount_out {
            warn!(
                outcome = self.outcome_idx,
                %direction,
                minimum = min_amount_out.get(),
                actual = step.amount_out.get(),
                "swap rejected: slippage"
            );
            return Err(AmmError::ExcessiveSlippage {
                minimum: min_amount_out.get(),
                actual: step.amount_out.get(),
            });
        }

        let k_after = step.asset_after.widen() * step.stable_after.widen();
        if k_after < self.k() {
            warn!(
                outcome = self.outcome_idx,
                k_before = self.k(),
                k_after,
                "swap rejected: invariant decreased"
            );
            return Err(AmmError::KInvariantViolated);
        }

        let price_after = Price::from_reserves(step.asset_after, step.stable_after)?;
        let mut oracle = self.oracle;
        oracle.write_observation(now, price_after)?;
        let protocol_fees = self.protocol_fees.credited(direction, step.fee)?;
        let result = SwapResult::new(direction, amount_in, step.amount_out, step.fee, price_after)?;

        self.asset_reserve = step.asset_after;
        self.stable_reserve = step.stable_after;
        self.protocol_fees = protocol_fees;
        self.oracle = oracle;

        debug!(
            outcome = self.outcome_idx,
            %direction,
            amount_in = amount_in.get(),
            amount_out = step.amount_out.get(),
            fee = step.fee.get(),
            price = %price_after,
            capped = %self.oracle.get_last_price(),
            "swap executed"
        );
        Ok(result)
    }
}

impl FromConfig<PoolConfig> for LiquidityPool {
    /// Creates a pool from a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`PoolConfig::validate`].
    fn from_config(config: &PoolConfig) -> Result<Self, AmmError> {
        config.validate()?;
        let oracle = Oracle::from_config(config.oracle())?;
        Ok(Self {
            outcome_idx: config.outcome_idx(),
            asset_reserve: config.initial_asset(),
            stable_reserve: config.initial_stable(),
            fee_tier: config.fee_tier(),
            protocol_fees: ProtocolFees::ZERO,
            oracle,
        })
    }
}

impl SwapPool for LiquidityPool {
    fn swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        min_out: Amount,
        now: u64,
    ) -> Result<SwapResult, AmmError> {
        self.execute(direction, amount_in, min_out, now)
    }

    fn quote(&self, direction: SwapDirection, amount_in: Amount) -> Result<SwapResult, AmmError> {
        self.preview(direction, amount_in)
    }

    fn spot_price(&self) -> Result<Price, AmmError> {
        self.get_current_price()
    }

    fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    fn outcome_idx(&self) -> u8 {
        self.outcome_idx
    }
}
