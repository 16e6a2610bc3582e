//! Configuration for a conditional-outcome liquidity pool.

use super::OracleConfig;
use crate::constants::MINIMUM_LIQUIDITY;
use crate::domain::{Amount, FeeTier, Price};
use crate::error::AmmError;

/// Configuration for a [`LiquidityPool`](crate::pools::LiquidityPool).
///
/// # Derived Values
///
/// - Initial invariant: `k = initial_asset × initial_stable`
/// - Initial spot price: `initial_stable × BASIS_POINTS / initial_asset`
///
/// # Validation
///
/// - Both reserves must be at least [`MINIMUM_LIQUIDITY`].
/// - The initial spot price must not exceed [`Price::MAX`].
/// - The fee must be strictly below 100%.
/// - The embedded [`OracleConfig`] is validated at its own construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    outcome_idx: u8,
    initial_asset: Amount,
    initial_stable: Amount,
    fee_tier: FeeTier,
    oracle: OracleConfig,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        outcome_idx: u8,
        initial_asset: Amount,
        initial_stable: Amount,
        fee_tier: FeeTier,
        oracle: OracleConfig,
    ) -> Result<Self, AmmError> {
        let config = Self {
            outcome_idx,
            initial_asset,
            initial_stable,
            fee_tier,
            oracle,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::LowLiquidity`] if either reserve is below the floor.
    /// - [`AmmError::PriceTooHigh`] if the implied price exceeds the ceiling.
    /// - [`AmmError::InvalidFee`] if the fee is 100% or more.
    /// - Any error from [`OracleConfig::validate`].
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.initial_asset.get() < MINIMUM_LIQUIDITY
            || self.initial_stable.get() < MINIMUM_LIQUIDITY
        {
            return Err(AmmError::LowLiquidity);
        }
        let price = Price::from_reserves(self.initial_asset, self.initial_stable)?;
        if price > Price::MAX {
            return Err(AmmError::PriceTooHigh);
        }
        if !self.fee_tier.is_valid() {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        self.oracle.validate()
    }

    /// Index of the outcome this pool trades.
    #[must_use]
    pub const fn outcome_idx(&self) -> u8 {
        self.outcome_idx
    }

    /// Initial asset reserve.
    pub const fn initial_asset(&self) -> Amount {
        self.initial_asset
    }

    /// Initial stable reserve.
    pub const fn initial_stable(&self) -> Amount {
        self.initial_stable
    }

    /// Swap fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Oracle parameters.
    #[must_use]
    pub const fn oracle(&self) -> &OracleConfig {
        &self.oracle
    }
}
