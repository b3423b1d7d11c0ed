//! Shared fixture for the integration tests: a pool built only through the public
//! position and swap APIs.
#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use clad_core::constants::Q64;
use clad_core::manager::{
    apply_swap, calculate_modify_liquidity, compute_swap, sync_modify_liquidity_values,
    PostSwapUpdate,
};
use clad_core::state::{
    get_tick_array_start_index, get_tick_array_start_indices_for_swap, InitializePoolParams,
    LiquidityPosition, Pool, TickArray,
};
use clad_core::tick_sequence::TickArraySequence;
use clad_core::ErrorCode;

pub const TICK_SPACING: u16 = 64;
pub const FEE_RATE: u16 = 3000;
pub const PROTOCOL_FEE_RATE: u16 = 300;

pub struct TestFixture {
    pub pool: Pool,
    pub tick_arrays: Vec<TickArray>,
    pub positions: Vec<LiquidityPosition>,
}

impl TestFixture {
    /// Pool at a price of one with empty tick arrays from -11264 to 11264.
    pub fn new() -> Self {
        let mut pool = Pool::default();
        pool.initialize(InitializePoolParams {
            token_mint_a: mint_a(),
            token_mint_b: mint_b(),
            tick_spacing: TICK_SPACING,
            fee_rate: FEE_RATE,
            protocol_fee_rate: PROTOCOL_FEE_RATE,
            initial_sqrt_price: Q64,
        })
        .unwrap();

        let tick_arrays = [-11264, -5632, 0, 5632, 11264]
            .into_iter()
            .map(|start| TickArray::new(start, TICK_SPACING).unwrap())
            .collect();

        TestFixture {
            pool,
            tick_arrays,
            positions: Vec::new(),
        }
    }

    /// The two overlapping positions used throughout: 5e9 over [-640, 640) and 2e9
    /// over [64, 1280).
    pub fn with_reference_positions() -> Self {
        let mut fixture = Self::new();
        fixture.open_position(-640, 640, 5_000_000_000);
        fixture.open_position(64, 1280, 2_000_000_000);
        fixture
    }

    pub fn array(&self, tick_index: i32) -> &TickArray {
        let start = get_tick_array_start_index(tick_index, TICK_SPACING).unwrap();
        self.tick_arrays
            .iter()
            .find(|array| array.start_tick_index == start)
            .unwrap()
    }

    /// Opens a position and deposits `liquidity`, returning its index.
    pub fn open_position(&mut self, tick_lower_index: i32, tick_upper_index: i32, liquidity: i128) -> usize {
        let mut position = LiquidityPosition::default();
        position
            .open_position(&self.pool, tick_lower_index, tick_upper_index)
            .unwrap();
        self.positions.push(position);
        let index = self.positions.len() - 1;
        self.modify_liquidity(index, liquidity).unwrap();
        index
    }

    pub fn modify_liquidity(&mut self, position_index: usize, liquidity_delta: i128) -> Result<(), ErrorCode> {
        let position = self.positions[position_index];
        let update = calculate_modify_liquidity(
            &self.pool,
            &position,
            self.array(position.tick_lower_index),
            self.array(position.tick_upper_index),
            liquidity_delta,
        )?;
        sync_modify_liquidity_values(
            &mut self.pool,
            &mut self.positions[position_index],
            &mut self.tick_arrays,
            &update,
        )
    }

    pub fn quote_swap(
        &self,
        amount: u64,
        sqrt_price_limit: u128,
        amount_specified_is_input: bool,
        a_to_b: bool,
    ) -> Result<PostSwapUpdate, ErrorCode> {
        let starts =
            get_tick_array_start_indices_for_swap(self.pool.tick_current_index, TICK_SPACING, a_to_b);
        let arrays = starts
            .iter()
            .filter_map(|start| {
                self.tick_arrays
                    .iter()
                    .find(|array| array.start_tick_index == *start)
            })
            .collect();
        let sequence = TickArraySequence::new(arrays, TICK_SPACING, a_to_b)?;
        compute_swap(
            &self.pool,
            &sequence,
            amount,
            sqrt_price_limit,
            amount_specified_is_input,
            a_to_b,
        )
    }

    pub fn swap(
        &mut self,
        amount: u64,
        sqrt_price_limit: u128,
        amount_specified_is_input: bool,
        a_to_b: bool,
    ) -> Result<PostSwapUpdate, ErrorCode> {
        let update = self.quote_swap(amount, sqrt_price_limit, amount_specified_is_input, a_to_b)?;
        apply_swap(&mut self.pool, &mut self.tick_arrays, &update, a_to_b)?;
        Ok(update)
    }

    /// Liquidity of every position whose range contains the current tick.
    pub fn expected_active_liquidity(&self) -> u128 {
        self.positions
            .iter()
            .filter(|position| {
                position.tick_lower_index <= self.pool.tick_current_index
                    && self.pool.tick_current_index < position.tick_upper_index
            })
            .map(|position| position.liquidity)
            .sum()
    }
}

pub fn mint_a() -> Pubkey {
    Pubkey::new_from_array([1u8; 32])
}

pub fn mint_b() -> Pubkey {
    Pubkey::new_from_array([2u8; 32])
}
