//! Unified error types for the futarchy AMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Variants fall into four groups:
//!
//! - **Preconditions**: zero-amount swaps, empty pools, timestamp
//!   regressions, oracle start-time misuse, zero-length TWAP periods,
//!   trading-phase violations.
//! - **Invariants**: arithmetic overflow of the cumulative integral or a
//!   reserve, a decreasing constant-product invariant.
//! - **Caller bounds**: swap output below the caller's minimum.
//! - **Configuration**: out-of-range fees, prices or cap rates.
//!
//! Every error aborts the whole operation; no state is partially applied.

use thiserror::Error;

/// Errors produced by pool, oracle and market operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// The swap input (or the input left after the fee) is zero.
    #[error("amount must be non-zero")]
    ZeroAmount,

    /// A reserve is zero; the pool has been drained or was never funded.
    #[error("pool reserves are empty")]
    PoolEmpty,

    /// A reserve is, or would end up, below the minimum-liquidity floor.
    #[error("reserve below the minimum liquidity floor")]
    LowLiquidity,

    /// The implied initial price exceeds the sanity ceiling.
    #[error("implied price exceeds the maximum allowed price")]
    PriceTooHigh,

    /// The swap output rounds down to zero.
    #[error("insufficient liquidity for swap output")]
    InsufficientLiquidity,

    /// The swap output is below the caller-supplied minimum.
    #[error("excessive slippage: output {actual} below minimum {minimum}")]
    ExcessiveSlippage {
        /// Minimum output the caller accepted.
        minimum: u64,
        /// Output the swap would have produced.
        actual: u64,
    },

    /// The oracle has no market start time yet.
    #[error("market has not started")]
    MarketNotStarted,

    /// The oracle start time was already set.
    #[error("market has already started")]
    MarketAlreadyStarted,

    /// An observation is older than the last recorded one.
    #[error("timestamp regression: {attempted} is before last observation {last}")]
    TimestampRegression {
        /// Timestamp of the last accepted observation.
        last: u64,
        /// Timestamp that was rejected.
        attempted: u64,
    },

    /// The TWAP averaging period is zero.
    #[error("twap period is zero")]
    ZeroPeriod,

    /// The market is not in the phase required by the operation.
    #[error("operation not allowed in the current market phase")]
    InvalidPhase,

    /// The pool's outcome index is not part of the market.
    #[error("outcome index out of range")]
    InvalidOutcome,

    /// Reserve product decreased across a swap.
    #[error("constant-product invariant violated")]
    KInvariantViolated,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Invalid fee parameter.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Invalid price parameter.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
