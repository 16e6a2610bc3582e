//! Fundamental domain value types used throughout the library.
//!
//! This module contains the value types that model the pool and oracle
//! domain: amounts, fee and cap rates, fixed-point prices, swap directions
//! and swap outcomes. All types are newtypes or small records with
//! validated constructors.

mod amount;
mod basis_points;
mod fee_tier;
mod price;
mod protocol_fees;
mod swap_direction;
mod swap_result;

pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use price::Price;
pub use protocol_fees::ProtocolFees;
pub use swap_direction::SwapDirection;
pub use swap_result::SwapResult;
