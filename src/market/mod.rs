//! Trading-phase collaborator for a set of outcome pools.
//!
//! [`MarketState`] owns the canonical trading-start timestamp that anchors
//! every pool oracle, and gates swaps to the [`MarketPhase::Trading`]
//! phase.

mod phase;
mod state;

pub use phase::MarketPhase;
pub use state::MarketState;
