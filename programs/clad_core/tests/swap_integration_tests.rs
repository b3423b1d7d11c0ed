//! Integration tests for the swap engine
//!
//! Pools are built through position deposits rather than hand-written tick arrays, so
//! these tests cover the liquidity manager, the tick array sequence and the swap
//! manager working together.

mod common;

use clad_core::constants::*;
use clad_core::math::tick_index_to_sqrt_price_x64;
use clad_core::ErrorCode;
use common::*;

#[test]
fn test_swap_through_deposited_liquidity() {
    let mut fixture = TestFixture::with_reference_positions();
    assert_eq!(fixture.pool.liquidity_available, 5_000_000_000);

    let update = fixture
        .swap(50_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();

    assert_eq!(update.amount_a, 49421912);
    assert_eq!(update.amount_b, 50_000_000);
    assert_eq!(fixture.pool.tick_current_index, 160);
    assert_eq!(fixture.pool.sqrt_price, 18595003003304920670);
    assert_eq!(fixture.pool.liquidity_available, 7_000_000_000);
    assert_eq!(fixture.pool.protocol_fee_owed_b, 4499);
    assert_eq!(
        fixture.pool.liquidity_available,
        fixture.expected_active_liquidity()
    );
}

#[test]
fn test_round_trip_restores_liquidity() {
    let mut fixture = TestFixture::with_reference_positions();

    fixture
        .swap(50_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();
    let back = fixture
        .swap(50_000_000, MIN_SQRT_PRICE_X64, true, true)
        .unwrap();

    assert_eq!(back.amount_a, 50_000_000);
    assert!(fixture.pool.tick_current_index < 64, "Price fell back below tick 64");
    assert_eq!(fixture.pool.liquidity_available, 5_000_000_000);
    assert_eq!(
        fixture.pool.liquidity_available,
        fixture.expected_active_liquidity()
    );
    assert!(fixture.pool.fee_growth_global_a > 0 && fixture.pool.fee_growth_global_b > 0);
}

#[test]
fn test_liquidity_tracks_active_positions_across_swaps() {
    let mut fixture = TestFixture::with_reference_positions();
    fixture.open_position(-1280, -64, 1_000_000_000);
    assert_eq!(fixture.pool.liquidity_available, 5_000_000_000);

    let swaps = [
        (30_000_000, false),
        (80_000_000, true),
        (10_000_000, true),
        (60_000_000, false),
    ];
    for (amount, a_to_b) in swaps {
        let limit = if a_to_b {
            MIN_SQRT_PRICE_X64
        } else {
            MAX_SQRT_PRICE_X64
        };
        fixture.swap(amount, limit, true, a_to_b).unwrap();
        assert_eq!(
            fixture.pool.liquidity_available,
            fixture.expected_active_liquidity(),
            "Active liquidity diverged at tick {}",
            fixture.pool.tick_current_index
        );
    }
}

#[test]
fn test_exact_output_swap() {
    let mut fixture = TestFixture::with_reference_positions();

    let update = fixture
        .swap(30_000_000, MAX_SQRT_PRICE_X64, false, false)
        .unwrap();

    assert_eq!(update.amount_a, 30_000_000);
    assert_eq!(update.amount_b, 30260465);
    assert_eq!(fixture.pool.tick_current_index, 104);
}

#[test]
fn test_swap_stops_at_limit_price() {
    let mut fixture = TestFixture::with_reference_positions();
    let limit = tick_index_to_sqrt_price_x64(-64).unwrap();

    let update = fixture.swap(50_000_000, limit, true, true).unwrap();

    assert_eq!(update.amount_a, 16073045);
    assert_eq!(fixture.pool.sqrt_price, limit);
    assert_eq!(fixture.pool.tick_current_index, -64);
}

#[test]
fn test_swap_past_all_liquidity_fails_without_side_effects() {
    let mut fixture = TestFixture::with_reference_positions();
    let pool_before = fixture.pool;

    assert_eq!(
        fixture
            .swap(1_000_000_000_000_000, MAX_SQRT_PRICE_X64, true, false)
            .err(),
        Some(ErrorCode::InsufficientLiquidity)
    );
    assert_eq!(fixture.pool, pool_before);
}

#[test]
fn test_quote_does_not_mutate() {
    let fixture = TestFixture::with_reference_positions();

    let first = fixture
        .quote_swap(1_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();
    let second = fixture
        .quote_swap(1_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();

    assert_eq!(first, second);
}
