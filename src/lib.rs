//! # Futarchy AMM
//!
//! Pricing engine for conditional prediction markets: a constant-product
//! AMM pool per outcome, each feeding a manipulation-resistant TWAP oracle.
//!
//! Every swap moves the pool's spot price and records it with the pool's
//! [`Oracle`](oracle::Oracle). The oracle clamps each observation to a band
//! around the current window baseline, so a single large trade cannot drag
//! the average far; only a move sustained across several windows does.
//!
//! # Fixed-Point Conventions
//!
//! | Quantity | Representation |
//! |----------|----------------|
//! | Token amounts | `u64` raw units ([`Amount`](domain::Amount)) |
//! | Prices | `u128` stable per asset × [`BASIS_POINTS`](constants::BASIS_POINTS) ([`Price`](domain::Price)) |
//! | Fees | basis points over [`FEE_SCALE`](constants::FEE_SCALE) |
//! | Time | `u64` milliseconds |
//!
//! Every division truncates toward zero. Overflow is an error, never a wrap.
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use futarchy_amm::domain::{Amount, BasisPoints, FeeTier, Price};
//! use futarchy_amm::pools::LiquidityPool;
//!
//! let mut pool = LiquidityPool::new_pool(
//!     Amount::new(1_000_000_000),
//!     Amount::new(1_000_000_000),
//!     Price::ONE,
//!     0,
//!     1_000,
//!     FeeTier::new(BasisPoints::new(30)),
//!     0,
//! )
//! .expect("valid pool");
//! pool.start_oracle(0).expect("first start");
//!
//! let result = pool
//!     .swap_asset_to_stable(Amount::new(100_000_000), Amount::ZERO, 1_000)
//!     .expect("swap succeeded");
//! assert!(result.price_after() < Price::ONE);
//! assert_eq!(pool.get_protocol_fees(), Ok(Amount::new(300_000)));
//!
//! // The oracle only moved one step (10%) toward the new spot price.
//! assert_eq!(pool.oracle().get_last_price(), Price::new(9_000));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ MarketState │  phase gate, trading-start anchor
//! └──────┬──────┘
//!        │ SwapPool
//!        ▼
//! ┌───────────────┐
//! │ LiquidityPool │  reserves, fees, slippage, k-invariant
//! └──────┬────────┘
//!        │ write_observation(now, spot)
//!        ▼
//! ┌─────────────┐
//! │   Oracle    │  capped price, cumulative integral, window baselines
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`FeeTier`](domain::FeeTier), etc. |
//! | [`oracle`] | Window-capped TWAP [`Oracle`](oracle::Oracle) |
//! | [`pools`] | Constant-product [`LiquidityPool`](pools::LiquidityPool) |
//! | [`market`] | [`MarketState`](market::MarketState) phase gate |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Validated [`PoolConfig`](config::PoolConfig) and [`OracleConfig`](config::OracleConfig) |
//! | [`math`] | Checked arithmetic and wide `mul_div` |
//! | [`constants`] | Fixed-point scales and limits |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for config, domain and state types |

pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod market;
pub mod math;
pub mod oracle;
pub mod pools;
pub mod prelude;
pub mod traits;
