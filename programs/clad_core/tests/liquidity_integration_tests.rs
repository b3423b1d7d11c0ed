//! Integration tests for liquidity provision, fee accounting and trade positions.

mod common;

use clad_core::constants::*;
use clad_core::manager::{
    calculate_fee_growths, calculate_liquidity_token_deltas, calculate_modify_loan,
    sync_modify_loan_values,
};
use clad_core::math::tick_index_to_sqrt_price_x64;
use clad_core::quote::{
    close_trade_position_quote, increase_liquidity_quote_by_input_token, Percentage,
};
use clad_core::state::TradePosition;
use clad_core::ErrorCode;
use common::*;

fn owed_fees(fixture: &TestFixture, position_index: usize) -> (u64, u64) {
    let position = &fixture.positions[position_index];
    let update = calculate_fee_growths(
        &fixture.pool,
        position,
        fixture.array(position.tick_lower_index),
        fixture.array(position.tick_upper_index),
    )
    .unwrap();
    (update.fee_owed_a, update.fee_owed_b)
}

#[test]
fn test_quote_then_deposit() {
    let mut fixture = TestFixture::new();
    let quote = increase_liquidity_quote_by_input_token(
        &fixture.pool,
        &mint_a(),
        1_000_000,
        -640,
        640,
        &Percentage::from_fraction(1, 100),
    )
    .unwrap();

    let index = fixture.open_position(-640, 640, quote.liquidity_amount as i128);
    let deposited = calculate_liquidity_token_deltas(
        fixture.pool.tick_current_index,
        fixture.pool.sqrt_price,
        &fixture.positions[index],
        quote.liquidity_amount as i128,
    )
    .unwrap();

    assert_eq!(deposited, (quote.token_est_a, quote.token_est_b));
    assert!(deposited.0 <= quote.token_max_a && deposited.1 <= quote.token_max_b);
    assert_eq!(fixture.pool.liquidity_available, 31754228);
}

#[test]
fn test_swap_fees_are_shared_by_active_liquidity() {
    let mut fixture = TestFixture::with_reference_positions();

    let update = fixture
        .swap(50_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();
    let lp_fees = update.total_fee_amount - update.next_protocol_fee;

    let (_, wide_fees) = owed_fees(&fixture, 0);
    let (_, narrow_fees) = owed_fees(&fixture, 1);

    assert!(wide_fees > narrow_fees, "The wider position was active for the whole swap");
    assert!(narrow_fees > 0, "The narrow position became active after tick 64");
    assert!(wide_fees + narrow_fees <= lp_fees);
    assert!(wide_fees + narrow_fees + 2 >= lp_fees, "Only rounding dust stays in the pool");
}

#[test]
fn test_out_of_range_position_earns_nothing() {
    let mut fixture = TestFixture::with_reference_positions();
    let idle = fixture.open_position(-5632, -1280, 1_000_000_000);

    fixture
        .swap(50_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();

    assert_eq!(owed_fees(&fixture, idle), (0, 0));
}

#[test]
fn test_full_withdrawal_after_swap() {
    let mut fixture = TestFixture::with_reference_positions();
    fixture
        .swap(50_000_000, MAX_SQRT_PRICE_X64, true, false)
        .unwrap();
    let expected_fees = owed_fees(&fixture, 0);

    fixture.modify_liquidity(0, -5_000_000_000).unwrap();

    let position = fixture.positions[0];
    assert_eq!(position.liquidity, 0);
    assert_eq!((position.fee_owed_a, position.fee_owed_b), expected_fees);
    assert_eq!(fixture.pool.liquidity_available, 2_000_000_000);
    assert!(!fixture.array(-640).get_tick(-640).unwrap().initialized);
    assert!(!fixture.array(640).get_tick(640).unwrap().initialized);

    fixture.positions[0].reset_fees_owed();
    assert!(fixture.positions[0].is_position_empty());
    assert_eq!(
        fixture.modify_liquidity(0, 0),
        Err(ErrorCode::LiquidityZero)
    );
}

#[test]
fn test_borrow_swap_and_repay() {
    let mut fixture = TestFixture::new();
    fixture.open_position(640, 1280, 2_000_000_000);

    let mut trade = TradePosition::default();
    trade
        .open_position(&fixture.pool, 640, 1280, mint_a(), mint_b(), 5_000_000, 1, 1_000)
        .unwrap();

    let borrow = calculate_modify_loan(
        &fixture.pool,
        &trade,
        fixture.array(640),
        fixture.array(1280),
        -1_000_000_000,
    )
    .unwrap();
    sync_modify_loan_values(&mut trade, &mut fixture.tick_arrays, &borrow).unwrap();
    assert_eq!(trade.loan_token_available, 30500130);
    assert_eq!(
        fixture.array(640).get_tick(640).unwrap().liquidity_gross,
        1_000_000_000,
        "Lent liquidity leaves the tick"
    );

    trade.record_swap(1_000_000, 990_000).unwrap();
    assert!(trade.is_trade_open);

    let quote = close_trade_position_quote(&fixture.pool, &trade, fixture.pool.sqrt_price).unwrap();
    assert_eq!(quote.loan_token_owed, 30500131);
    assert_eq!(quote.loan_swap_needed, 1_000_001);
    assert_eq!(quote.other_swap_needed, 0);

    let moved = close_trade_position_quote(
        &fixture.pool,
        &trade,
        tick_index_to_sqrt_price_x64(1280).unwrap(),
    )
    .unwrap();
    assert_eq!(moved.loan_token_owed, 0);
    assert_eq!(moved.other_token_owed, 33573135);
    assert_eq!(
        moved.other_swap_needed, 27583135,
        "Swap proceeds and collateral both count toward token B"
    );

    let repay = calculate_modify_loan(
        &fixture.pool,
        &trade,
        fixture.array(640),
        fixture.array(1280),
        1_000_000_000,
    )
    .unwrap();
    sync_modify_loan_values(&mut trade, &mut fixture.tick_arrays, &repay).unwrap();

    assert!(trade.is_position_empty());
    assert!(!trade.is_trade_open);
    assert_eq!(
        close_trade_position_quote(&fixture.pool, &trade, fixture.pool.sqrt_price),
        Err(ErrorCode::TradePositionNotOpen)
    );
    let lower = fixture.array(640).get_tick(640).unwrap();
    assert_eq!(lower.liquidity_gross, 2_000_000_000);
    assert_eq!(lower.liquidity_borrowed, 0);
}
