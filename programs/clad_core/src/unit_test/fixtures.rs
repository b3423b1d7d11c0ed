use crate::constants::{Q64, TICK_ARRAY_SIZE};
use crate::state::{InitializePoolParams, Pool, TickArray, TickUpdate};
use anchor_lang::prelude::Pubkey;

pub const TEST_TICK_SPACING: u16 = 64;
pub const TEST_FEE_RATE: u16 = 3000;
pub const TEST_PROTOCOL_FEE_RATE: u16 = 300;

/// Ticks of the reference pool: two overlapping positions,
/// 5e9 over [-640, 640) and 2e9 over [64, 1280).
pub const REFERENCE_TICKS: [(i32, i128); 4] = [
    (-640, 5_000_000_000),
    (640, -5_000_000_000),
    (64, 2_000_000_000),
    (1280, -2_000_000_000),
];

pub fn mint_a() -> Pubkey {
    Pubkey::new_from_array([1u8; 32])
}

pub fn mint_b() -> Pubkey {
    Pubkey::new_from_array([2u8; 32])
}

pub fn create_pool(
    sqrt_price: u128,
    tick_spacing: u16,
    fee_rate: u16,
    protocol_fee_rate: u16,
    liquidity: u128,
) -> Pool {
    let mut pool = Pool::default();
    pool.initialize(InitializePoolParams {
        token_mint_a: mint_a(),
        token_mint_b: mint_b(),
        tick_spacing,
        fee_rate,
        protocol_fee_rate,
        initial_sqrt_price: sqrt_price,
    })
    .expect("fixture pool parameters are valid");
    pool.liquidity_available = liquidity;
    pool
}

/// Pool at tick 0 with the liquidity active there under `REFERENCE_TICKS`.
pub fn reference_pool() -> Pool {
    create_pool(
        Q64,
        TEST_TICK_SPACING,
        TEST_FEE_RATE,
        TEST_PROTOCOL_FEE_RATE,
        5_000_000_000,
    )
}

pub fn initialized_tick(liquidity_net: i128) -> TickUpdate {
    TickUpdate {
        initialized: true,
        liquidity_net,
        liquidity_gross: liquidity_net.unsigned_abs(),
        ..TickUpdate::default()
    }
}

/// Builds an array at `start_tick_index`, initializing each of `ticks` that falls inside it.
pub fn create_tick_array(start_tick_index: i32, tick_spacing: u16, ticks: &[(i32, i128)]) -> TickArray {
    let mut array = TickArray::new(start_tick_index, tick_spacing).expect("aligned start index");
    let end = start_tick_index + TICK_ARRAY_SIZE * tick_spacing as i32;
    for (tick_index, liquidity_net) in ticks {
        if *tick_index >= start_tick_index && *tick_index < end {
            array
                .update_tick(*tick_index, &initialized_tick(*liquidity_net))
                .expect("tick inside array");
        }
    }
    array
}

/// Arrays starting at 0, -5632 and 5632 populated with `REFERENCE_TICKS`.
pub fn reference_tick_arrays() -> (TickArray, TickArray, TickArray) {
    (
        create_tick_array(0, TEST_TICK_SPACING, &REFERENCE_TICKS),
        create_tick_array(-5632, TEST_TICK_SPACING, &REFERENCE_TICKS),
        create_tick_array(5632, TEST_TICK_SPACING, &REFERENCE_TICKS),
    )
}
