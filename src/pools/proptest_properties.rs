//! Property-based tests using `proptest` for pool and oracle invariants.
//!
//! 1. **Invariant preservation**: `asset × stable` never decreases.
//! 2. **Quote/execute equivalence**: a quote equals the executed swap.
//! 3. **Fee correctness**: `Δfees == max(1, floor(a × bps / FEE_SCALE))`.
//! 4. **Fee monotonicity**: larger input ⇒ larger or equal fee.
//! 5. **Price movement direction**: selling asset lowers the spot price.
//! 6. **Oracle capping bound**: one in-window observation stays in band.
//! 7. **Timestamp monotonicity**: regressions fail, repeats are no-ops.
//! 8. **Multi-window closing**: a long gap accrues exactly what capping
//!    each elapsed window in turn would.

use proptest::prelude::*;

use crate::constants::{BASIS_POINTS, FEE_SCALE, TWAP_PRICE_CAP_WINDOW};
use crate::domain::{Amount, BasisPoints, FeeTier, Price, SwapDirection};
use crate::error::AmmError;
use crate::oracle::window::cap_price;
use crate::oracle::Oracle;
use crate::pools::LiquidityPool;
use crate::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(asset: u64, stable: u64, fee_bps: u64) -> LiquidityPool {
    let Ok(mut pool) = LiquidityPool::new_pool(
        Amount::new(asset),
        Amount::new(stable),
        Price::ONE,
        0,
        1_000,
        FeeTier::new(BasisPoints::new(fee_bps)),
        0,
    ) else {
        panic!("valid pool");
    };
    let Ok(()) = pool.start_oracle(0) else {
        panic!("first start");
    };
    pool
}

fn started_oracle(initial: u128, bps: u64) -> Oracle {
    let Ok(mut oracle) = Oracle::new(Price::new(initial), 0, bps) else {
        panic!("valid oracle");
    };
    let Ok(()) = oracle.set_start_time(0) else {
        panic!("first start");
    };
    oracle
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    10_000u64..=10_000_000_000u64
}

/// Swap sizes small enough that the output reserve stays above the floor.
fn swap_strategy() -> impl Strategy<Value = u64> {
    1u64..=5_000u64
}

fn fee_strategy() -> impl Strategy<Value = u64> {
    0u64..=1_000u64
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![
        Just(SwapDirection::AssetToStable),
        Just(SwapDirection::StableToAsset),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_never_decreases(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        fee in fee_strategy(),
        swaps in prop::collection::vec((direction_strategy(), swap_strategy()), 1..12),
    ) {
        let mut pool = make_pool(asset, stable, fee);
        for (i, (direction, amount)) in swaps.into_iter().enumerate() {
            let k_before = pool.k();
            let now = 1 + i as u64;
            let Ok(_) = pool.swap(direction, Amount::new(amount), Amount::ZERO, now) else {
                continue;
            };
            prop_assert!(
                pool.k() >= k_before,
                "k decreased: before={} after={}",
                k_before, pool.k()
            );
        }
    }

    #[test]
    fn prop_k_strictly_grows_with_fee(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        amount in 100u64..=5_000u64,
    ) {
        let mut pool = make_pool(asset, stable, 30);
        let k_before = pool.k();
        let Ok(result) = pool.swap_asset_to_stable(Amount::new(amount), Amount::ZERO, 1) else {
            return Ok(());
        };
        prop_assert!(!result.fee().is_zero());
        prop_assert!(pool.k() > k_before);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Quote / Execute Equivalence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_matches_execution(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        fee in fee_strategy(),
        direction in direction_strategy(),
        amount in swap_strategy(),
    ) {
        let mut pool = make_pool(asset, stable, fee);
        let quote = pool.quote(direction, Amount::new(amount));
        let executed = pool.swap(direction, Amount::new(amount), Amount::ZERO, 1);
        prop_assert_eq!(quote, executed);
    }
}

// ---------------------------------------------------------------------------
// Property 3 & 4: Fee Correctness and Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_is_floor_with_minimum_one(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        fee in 1u64..=1_000u64,
        amount in swap_strategy(),
    ) {
        let mut pool = make_pool(asset, stable, fee);
        let Ok(before) = pool.get_protocol_fees() else {
            panic!("fee total fits");
        };
        let Ok(_) = pool.swap_stable_to_asset(Amount::new(amount), Amount::ZERO, 1) else {
            return Ok(());
        };
        let Ok(after) = pool.get_protocol_fees() else {
            panic!("fee total fits");
        };
        let expected = (amount * fee / FEE_SCALE).max(1);
        prop_assert_eq!(after.get() - before.get(), expected);
    }

    #[test]
    fn prop_fee_monotonicity(
        fee in fee_strategy(),
        a in 1u64..=u64::MAX / 2,
        b in 1u64..=u64::MAX / 2,
    ) {
        let tier = FeeTier::new(BasisPoints::new(fee));
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        let Ok(fee_small) = tier.compute_fee(Amount::new(small)) else {
            panic!("fee fits");
        };
        let Ok(fee_large) = tier.compute_fee(Amount::new(large)) else {
            panic!("fee fits");
        };
        prop_assert!(fee_small <= fee_large);
    }

    #[test]
    fn prop_protocol_fees_non_decreasing(
        fee in fee_strategy(),
        swaps in prop::collection::vec((direction_strategy(), swap_strategy()), 1..12),
    ) {
        let mut pool = make_pool(1_000_000_000, 1_000_000_000, fee);
        let mut last = Amount::ZERO;
        for (i, (direction, amount)) in swaps.into_iter().enumerate() {
            let _ = pool.swap(direction, Amount::new(amount), Amount::ZERO, 1 + i as u64);
            let Ok(total) = pool.get_protocol_fees() else {
                panic!("fee total fits");
            };
            prop_assert!(total >= last);
            last = total;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Price Movement Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selling_asset_lowers_price(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        amount in swap_strategy(),
    ) {
        let mut pool = make_pool(asset, stable, 30);
        let Ok(before) = pool.get_current_price() else {
            panic!("non-empty pool");
        };
        let Ok(result) = pool.swap_asset_to_stable(Amount::new(amount), Amount::ZERO, 1) else {
            return Ok(());
        };
        prop_assert!(result.price_after() <= before);
    }

    #[test]
    fn prop_buying_asset_raises_price(
        asset in reserve_strategy(),
        stable in reserve_strategy(),
        amount in swap_strategy(),
    ) {
        let mut pool = make_pool(asset, stable, 30);
        let Ok(before) = pool.get_current_price() else {
            panic!("non-empty pool");
        };
        let Ok(result) = pool.swap_stable_to_asset(Amount::new(amount), Amount::ZERO, 1) else {
            return Ok(());
        };
        prop_assert!(result.price_after() >= before);
    }
}

// ---------------------------------------------------------------------------
// Property 6 & 7: Oracle Capping and Timestamp Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_in_window_observation_within_band(
        initial in 1u128..=1_000_000_000u128,
        bps in 1u64..10_000u64,
        observed in 0u128..=10_000_000_000u128,
        t in 1u64..TWAP_PRICE_CAP_WINDOW,
    ) {
        let mut oracle = started_oracle(initial, bps);
        let Ok(()) = oracle.write_observation(t, Price::new(observed)) else {
            panic!("in-window observation accepted");
        };
        let bound = initial * u128::from(bps) / BASIS_POINTS;
        prop_assert!(oracle.get_last_price().abs_diff(&Price::new(initial)) <= bound);
    }

    #[test]
    fn prop_regression_always_fails(
        first in 1u64..1_000_000u64,
        back in 1u64..1_000_000u64,
        price in 1u128..=100_000u128,
    ) {
        let mut oracle = started_oracle(10_000, 1_000);
        let Ok(()) = oracle.write_observation(first, Price::new(price)) else {
            panic!("forward observation accepted");
        };
        let before = oracle;
        let earlier = first.saturating_sub(back);
        if earlier < first {
            let regressed = matches!(
                oracle.write_observation(earlier, Price::new(price)),
                Err(AmmError::TimestampRegression { .. })
            );
            prop_assert!(regressed);
        }
        let Ok(()) = oracle.write_observation(first, Price::new(price / 2 + 1)) else {
            panic!("repeat observation accepted");
        };
        prop_assert_eq!(oracle, before);
    }

    #[test]
    fn prop_cumulative_non_decreasing(
        steps in prop::collection::vec((1u64..200_000u64, 0u128..=50_000u128), 1..16),
    ) {
        let mut oracle = started_oracle(10_000, 1_000);
        let mut now = 0u64;
        let mut total = 0u128;
        for (dt, price) in steps {
            now += dt;
            let Ok(()) = oracle.write_observation(now, Price::new(price)) else {
                panic!("monotone observation accepted");
            };
            prop_assert!(oracle.total_cumulative_price() >= total);
            prop_assert_eq!(oracle.get_last_timestamp(), now);
            total = oracle.total_cumulative_price();
        }
    }

    #[test]
    fn prop_multi_window_matches_per_window_capping(
        initial in 1u128..=100_000u128,
        target in 0u128..=200_000u128,
        bps in 1u64..10_000u64,
        extra in 1u64..2_000u64,
    ) {
        let mut oracle = started_oracle(initial, bps);
        let end = (extra + 1) * TWAP_PRICE_CAP_WINDOW;
        let Ok(()) = oracle.write_observation(end, Price::new(target)) else {
            panic!("long gap accepted");
        };

        let observed = Price::new(target);
        let anchor = cap_price(observed, Price::new(initial), bps, 1);
        let mut total = anchor.get();
        let mut last = anchor;
        for step in 1..=extra {
            last = cap_price(observed, anchor, bps, step);
            total += last.get();
        }
        prop_assert_eq!(
            oracle.total_cumulative_price(),
            total * u128::from(TWAP_PRICE_CAP_WINDOW)
        );
        prop_assert_eq!(oracle.get_last_price(), last);
        prop_assert_eq!(oracle.last_window_twap(), last);
    }
}
