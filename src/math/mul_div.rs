//! Wide multiply-then-divide helpers on `u128`.
//!
//! All quotients truncate toward zero, which is the rounding used for
//! every price, fee and swap output in the crate.

use crate::error::AmmError;

/// Computes `a × b / denominator` with a checked `u128` intermediate.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if `a × b` does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use futarchy_amm::math::mul_div;
///
/// assert_eq!(mul_div(10_000, 1_000, 10_000), Ok(1_000));
/// assert_eq!(mul_div(7, 3, 2), Ok(10));
/// assert!(mul_div(1, 1, 0).is_err());
/// ```
pub const fn mul_div(a: u128, b: u128, denominator: u128) -> crate::error::Result<u128> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    match a.checked_mul(b) {
        Some(product) => Ok(product / denominator),
        None => Err(AmmError::Overflow("mul_div intermediate overflow")),
    }
}

/// Computes `a × b / denominator`, saturating the product at `u128::MAX`.
///
/// Used only where an oversized result is harmless because it is later
/// clamped against a value that is always smaller.
///
/// Returns `u128::MAX` when `denominator` is zero.
#[must_use]
pub const fn saturating_mul_div(a: u128, b: u128, denominator: u128) -> u128 {
    if denominator == 0 {
        return u128::MAX;
    }
    a.saturating_mul(b) / denominator
}

/// Computes `Σ floor((a × i + b) / m)` for `i` in `0..n` in logarithmic
/// time.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `m` is zero.
/// - [`AmmError::Overflow`] if the sum or an intermediate does not fit in
///   `u128`.
///
/// # Examples
///
/// ```
/// use futarchy_amm::math::floor_sum;
///
/// // 3/2 + 6/2 + 9/2 + 12/2 = 1 + 3 + 4 + 6
/// assert_eq!(floor_sum(4, 2, 3, 3), Ok(14));
/// ```
pub fn floor_sum(n: u128, m: u128, a: u128, b: u128) -> crate::error::Result<u128> {
    const OVERFLOW: AmmError = AmmError::Overflow("floor_sum overflow");
    if m == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let (mut n, mut m, mut a, mut b) = (n, m, a, b);
    let mut sum = 0u128;
    loop {
        if a >= m {
            // n × (n − 1) / 2 without a wider intermediate
            let pairs = if n % 2 == 0 {
                (n / 2).checked_mul(n.saturating_sub(1))
            } else {
                n.checked_mul(n.saturating_sub(1) / 2)
            }
            .ok_or(OVERFLOW)?;
            let term = pairs.checked_mul(a / m).ok_or(OVERFLOW)?;
            sum = sum.checked_add(term).ok_or(OVERFLOW)?;
            a %= m;
        }
        if b >= m {
            let term = n.checked_mul(b / m).ok_or(OVERFLOW)?;
            sum = sum.checked_add(term).ok_or(OVERFLOW)?;
            b %= m;
        }
        let y_max = a
            .checked_mul(n)
            .and_then(|y| y.checked_add(b))
            .ok_or(OVERFLOW)?;
        if y_max < m {
            return Ok(sum);
        }
        n = y_max / m;
        b = y_max % m;
        core::mem::swap(&mut m, &mut a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates() {
        assert_eq!(mul_div(10, 10, 3), Ok(33));
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(mul_div(1, 1, 0), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn overflow() {
        assert!(matches!(
            mul_div(u128::MAX, 2, 2),
            Err(AmmError::Overflow(_))
        ));
    }

    #[test]
    fn floor_sum_matches_direct_sum() {
        let cases = [
            (0, 7, 3, 3),
            (1, 10_000, 11_000, 11_000),
            (25, 10_000, 7_001, 7_001),
            (300, 13, 0, 5),
            (97, 4, 9, 2),
        ];
        for (n, m, a, b) in cases {
            let direct: u128 = (0..n).map(|i| (a * i + b) / m).sum();
            assert_eq!(floor_sum(n, m, a, b), Ok(direct), "n={n} m={m} a={a} b={b}");
        }
    }

    #[test]
    fn floor_sum_large_n() {
        // Σ floor(i / 2) over 0..2k = k × (k − 1)
        let k = 1u128 << 40;
        assert_eq!(floor_sum(2 * k, 2, 1, 0), Ok(k * (k - 1)));
    }

    #[test]
    fn floor_sum_errors() {
        assert_eq!(floor_sum(3, 0, 1, 1), Err(AmmError::DivisionByZero));
        assert!(matches!(
            floor_sum(u128::MAX, 1, u128::MAX, 0),
            Err(AmmError::Overflow(_))
        ));
    }

    #[test]
    fn saturating_caps_product() {
        assert_eq!(saturating_mul_div(u128::MAX, 2, 1), u128::MAX);
        assert_eq!(saturating_mul_div(u128::MAX, 2, 2), u128::MAX / 2);
        assert_eq!(saturating_mul_div(6, 7, 4), 10);
        assert_eq!(saturating_mul_div(1, 1, 0), u128::MAX);
    }
}
