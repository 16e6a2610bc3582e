//! Integration tests exercising the full system from config to market close.
//!
//! These tests verify end-to-end flows through the public API: the
//! reference pool and oracle scenarios, TWAP drift convergence, resistance
//! to a single manipulating trade, and the full market lifecycle.

#![allow(clippy::panic)]

use futarchy_amm::config::{OracleConfig, PoolConfig};
use futarchy_amm::constants::{BASIS_POINTS, TWAP_PRICE_CAP_WINDOW};
use futarchy_amm::domain::{Amount, BasisPoints, FeeTier, Price, SwapDirection};
use futarchy_amm::error::AmmError;
use futarchy_amm::market::{MarketPhase, MarketState};
use futarchy_amm::oracle::Oracle;
use futarchy_amm::pools::LiquidityPool;
use futarchy_amm::traits::{FromConfig, SwapPool};

const W: u64 = TWAP_PRICE_CAP_WINDOW;
const BILLION: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fee_30bp() -> FeeTier {
    FeeTier::new(BasisPoints::new(30))
}

fn pool(asset: u64, stable: u64, delay: u64, outcome_idx: u8) -> LiquidityPool {
    let Ok(pool) = LiquidityPool::new_pool(
        Amount::new(asset),
        Amount::new(stable),
        Price::ONE,
        delay,
        1_000,
        fee_30bp(),
        outcome_idx,
    ) else {
        panic!("valid pool");
    };
    pool
}

fn started_pool(asset: u64, stable: u64) -> LiquidityPool {
    let mut p = pool(asset, stable, 0, 0);
    let Ok(()) = p.start_oracle(0) else {
        panic!("first start");
    };
    p
}

fn started_oracle(initial: u128, delay: u64, bps: u64) -> Oracle {
    let Ok(mut oracle) = Oracle::new(Price::new(initial), delay, bps) else {
        panic!("valid oracle");
    };
    let Ok(()) = oracle.set_start_time(0) else {
        panic!("first start");
    };
    oracle
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_sell_asset_lowers_price_and_takes_fee() {
    let mut p = started_pool(BILLION, BILLION);
    let Ok(result) = p.swap_asset_to_stable(Amount::new(100_000_000), Amount::ZERO, 1_000) else {
        panic!("swap ok");
    };
    let Ok(spot) = p.get_current_price() else {
        panic!("funded pool");
    };
    assert!(spot < Price::new(BASIS_POINTS));
    assert_eq!(spot, result.price_after());
    assert_eq!(result.fee(), Amount::new(300_000));
    assert_eq!(p.get_protocol_fees(), Ok(Amount::new(300_000)));
}

#[test]
fn scenario_oracle_caps_both_directions() {
    let mut oracle = started_oracle(10_000, 0, 1_000);
    let Ok(()) = oracle.write_observation(1_000, Price::new(11_200)) else {
        panic!("observation accepted");
    };
    assert_eq!(oracle.get_last_price(), Price::new(11_000));
    let Ok(()) = oracle.write_observation(2_000, Price::new(8_800)) else {
        panic!("observation accepted");
    };
    assert_eq!(oracle.get_last_price(), Price::new(9_000));
}

#[test]
fn scenario_pool_below_liquidity_floor() {
    let result = LiquidityPool::new_pool(
        Amount::new(10),
        Amount::new(10),
        Price::ONE,
        0,
        1_000,
        fee_30bp(),
        0,
    );
    assert_eq!(result, Err(AmmError::LowLiquidity));
}

#[test]
fn scenario_twap_at_threshold_is_zero_period() {
    let mut p = pool(BILLION, BILLION, 1_000, 0);
    let Ok(()) = p.start_oracle(500) else {
        panic!("first start");
    };
    assert_eq!(p.get_twap(1_500), Err(AmmError::ZeroPeriod));
    assert_eq!(p.oracle().get_twap(1_500), Err(AmmError::ZeroPeriod));
}

// ---------------------------------------------------------------------------
// Oracle behaviour over many windows
// ---------------------------------------------------------------------------

#[test]
fn twap_drift_converges_to_sustained_price() {
    let mut oracle = started_oracle(10_000, 0, 1_000);
    let mut last = oracle.get_last_price();
    for k in 1..=5 {
        let Ok(()) = oracle.write_observation(k * W, Price::new(20_000)) else {
            panic!("observation accepted");
        };
        assert!(oracle.get_last_price() > last, "window {k} did not move");
        assert!(oracle.get_last_price() <= Price::new(20_000));
        last = oracle.get_last_price();
    }
    // 10% compounding per window
    assert_eq!(last, Price::new(16_105));

    let end = 1_005 * W;
    let Ok(()) = oracle.write_observation(end, Price::new(20_000)) else {
        panic!("observation accepted");
    };
    assert_eq!(oracle.get_last_price(), Price::new(20_000));
    let Ok(twap) = oracle.get_twap(end) else {
        panic!("twap available");
    };
    assert!(twap > Price::new(19_000), "twap {twap} did not converge");
    assert_eq!(twap, Price::new(19_964));
}

#[test]
fn single_trade_spike_barely_moves_twap() {
    let mut p = started_pool(BILLION, BILLION);
    let Ok(spike) = p.swap_stable_to_asset(Amount::new(BILLION), Amount::ZERO, 30_000) else {
        panic!("spike accepted");
    };
    assert!(spike.price_after() > Price::new(30_000));
    assert_eq!(p.oracle().get_last_price(), Price::new(11_000));

    let Ok(_) = p.swap_asset_to_stable(spike.amount_out(), Amount::ZERO, 30_001) else {
        panic!("unwind accepted");
    };
    let Ok(twap) = p.get_twap(10 * W) else {
        panic!("twap available");
    };
    assert!(twap < Price::new(10_100), "twap {twap} moved too far");
}

#[test]
fn start_delay_excludes_early_trades() {
    let mut p = pool(BILLION, BILLION, 2 * W, 0);
    let Ok(()) = p.start_oracle(0) else {
        panic!("first start");
    };
    let Ok(_) = p.swap_stable_to_asset(Amount::new(BILLION), Amount::ZERO, W) else {
        panic!("early swap accepted");
    };
    assert_eq!(p.oracle().total_cumulative_price(), 0);
    assert_eq!(p.oracle().get_last_price(), Price::ONE);
}

#[test]
fn config_driven_construction() {
    let Ok(oracle_cfg) = OracleConfig::with_window(Price::ONE, 0, 500, 1_000) else {
        panic!("valid oracle config");
    };
    let Ok(cfg) = PoolConfig::new(
        1,
        Amount::new(BILLION),
        Amount::new(BILLION),
        fee_30bp(),
        oracle_cfg,
    ) else {
        panic!("valid pool config");
    };
    let Ok(mut p) = LiquidityPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(()) = p.start_oracle(0) else {
        panic!("first start");
    };
    let Ok(_) = p.swap(
        SwapDirection::StableToAsset,
        Amount::new(500_000_000),
        Amount::ZERO,
        500,
    ) else {
        panic!("swap accepted");
    };
    // 5% band on a 1-second window
    assert_eq!(p.oracle().get_last_price(), Price::new(10_500));
    assert_eq!(p.oracle().window_duration(), 1_000);
}

// ---------------------------------------------------------------------------
// Full market lifecycle
// ---------------------------------------------------------------------------

#[test]
fn market_lifecycle() {
    let mut pools = vec![pool(BILLION, BILLION, 0, 0), pool(BILLION, BILLION, 0, 1)];
    let Ok(mut market) = MarketState::new(2) else {
        panic!("valid market");
    };

    // no trading before the market opens
    assert_eq!(
        market.swap(
            &mut pools[0],
            SwapDirection::StableToAsset,
            Amount::new(1_000_000),
            Amount::ZERO,
            1
        ),
        Err(AmmError::InvalidPhase)
    );

    let Ok(()) = market.start_trading(1_000, &mut pools) else {
        panic!("trading started");
    };

    // sustained buying of outcome 1 over ten windows
    for k in 1..=10u64 {
        let Ok(_) = market.swap(
            &mut pools[1],
            SwapDirection::StableToAsset,
            Amount::new(20_000_000),
            Amount::ZERO,
            1_000 + k * W,
        ) else {
            panic!("buy {k} accepted");
        };
    }
    // quote and execute agree on outcome 0
    let Ok(quote) = pools[0].quote_swap_asset_to_stable(Amount::new(5_000_000)) else {
        panic!("quote ok");
    };
    let Ok(sold) = market.swap(
        &mut pools[0],
        SwapDirection::AssetToStable,
        Amount::new(5_000_000),
        Amount::ZERO,
        1_000 + 10 * W,
    ) else {
        panic!("sell accepted");
    };
    assert_eq!(quote, sold);

    let end = 1_000 + 20 * W;
    let Ok(()) = market.end_trading(end) else {
        panic!("trading ended");
    };
    assert_eq!(market.phase(), MarketPhase::Finalized);

    let Ok(twaps) = market.twaps(&mut pools, end) else {
        panic!("twaps available");
    };
    assert!(twaps[1] > twaps[0]);
    assert!(twaps[0] <= Price::ONE);

    let fees: Vec<_> = pools.iter_mut().map(LiquidityPool::reset_protocol_fees).collect();
    assert_eq!(fees[0].asset(), Amount::new(15_000));
    assert_eq!(fees[1].stable(), Amount::new(600_000));

    let Ok(drained) = market.drain_pools(&mut pools) else {
        panic!("drained");
    };
    assert_eq!(drained.len(), 2);
    assert!(pools.iter().all(LiquidityPool::is_drained));
    assert_eq!(
        pools[0].swap_asset_to_stable(Amount::new(1_000), Amount::ZERO, end + 1),
        Err(AmmError::PoolEmpty)
    );
}
