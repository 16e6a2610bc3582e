//! Configuration for the window-capped TWAP oracle.

use crate::constants::{BASIS_POINTS, TWAP_PRICE_CAP_WINDOW};
use crate::domain::Price;
use crate::error::AmmError;

/// Immutable parameters of an [`Oracle`](crate::oracle::Oracle).
///
/// # Validation
///
/// - `initial_price` must be in `1..=Price::MAX`.
/// - `max_bps_per_step` must be in `1..BASIS_POINTS`; a zero rate would pin
///   the oracle forever and a full rate would let the baseline reach zero.
/// - `window_duration` must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OracleConfig {
    initial_price: Price,
    start_delay: u64,
    max_bps_per_step: u64,
    window_duration: u64,
}

impl OracleConfig {
    /// Creates a config using the default [`TWAP_PRICE_CAP_WINDOW`].
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        initial_price: Price,
        start_delay: u64,
        max_bps_per_step: u64,
    ) -> Result<Self, AmmError> {
        Self::with_window(
            initial_price,
            start_delay,
            max_bps_per_step,
            TWAP_PRICE_CAP_WINDOW,
        )
    }

    /// Creates a config with an explicit window duration (milliseconds).
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_window(
        initial_price: Price,
        start_delay: u64,
        max_bps_per_step: u64,
        window_duration: u64,
    ) -> Result<Self, AmmError> {
        let config = Self {
            initial_price,
            start_delay,
            max_bps_per_step,
            window_duration,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if the initial price is zero.
    /// - [`AmmError::PriceTooHigh`] if it exceeds [`Price::MAX`].
    /// - [`AmmError::InvalidConfiguration`] for a bad cap rate or window.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.initial_price.is_zero() {
            return Err(AmmError::InvalidPrice("initial twap price must be positive"));
        }
        if self.initial_price > Price::MAX {
            return Err(AmmError::PriceTooHigh);
        }
        if self.max_bps_per_step == 0 || u128::from(self.max_bps_per_step) >= BASIS_POINTS {
            return Err(AmmError::InvalidConfiguration(
                "max_bps_per_step must be in 1..BASIS_POINTS",
            ));
        }
        if self.window_duration == 0 {
            return Err(AmmError::InvalidConfiguration(
                "window duration must be non-zero",
            ));
        }
        Ok(())
    }

    /// Price the oracle reports before any observation.
    pub const fn initial_price(&self) -> Price {
        self.initial_price
    }

    /// Delay after market start before prices accrue.
    #[must_use]
    pub const fn start_delay(&self) -> u64 {
        self.start_delay
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
}
