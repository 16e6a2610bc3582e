//! Arithmetic utilities shared by the pool and the oracle.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on domain amounts and the [`mul_div`] family for wide fixed-point
//! products. Every division truncates toward zero.

mod checked;
mod mul_div;

pub use checked::CheckedArithmetic;
pub use mul_div::{floor_sum, mul_div, saturating_mul_div};
