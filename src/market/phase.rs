//! Market lifecycle phases.

use core::fmt;

/// Lifecycle phase of a conditional market.
///
/// ```text
/// PreTrading ──start_trading──▶ Trading ──end_trading──▶ Finalized
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketPhase {
    /// Pools are funded but the oracles have not started.
    #[default]
    PreTrading,
    /// Swaps are accepted.
    Trading,
    /// Trading has ended; pools may be drained.
    Finalized,
}

impl MarketPhase {
    /// Returns `true` if swaps are accepted in this phase.
    #[must_use]
    pub const fn allows_trading(&self) -> bool {
        matches!(self, Self::Trading)
    }

    /// Returns `true` if `self → next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::PreTrading, Self::Trading) | (Self::Trading, Self::Finalized)
        )
    }
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreTrading => write!(f, "pre-trading"),
            Self::Trading => write!(f, "trading"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}
