use crate::constants::{MAX_FEE_RATE, MAX_PROTOCOL_FEE_RATE, MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64};
use crate::errors::ErrorCode;
use crate::math::sqrt_price_x64_to_tick_index;
use anchor_lang::prelude::borsh;
use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize, Pubkey};

/// Pricing state of a single concentrated liquidity pool.
///
/// The pool and its tick arrays are the source of truth for tradeable state. Swaps and
/// liquidity changes compute their effects against a borrowed `Pool` and hand back an
/// update; only the explicit `update_*` methods below write to it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Pool {
    /// The mint address of token A.
    pub token_mint_a: Pubkey,
    /// The mint address of token B.
    pub token_mint_b: Pubkey,
    /// The spacing between initializable ticks.
    pub tick_spacing: u16,
    /// Swap fee, in hundredths of a basis point (3000 is 0.3%).
    pub fee_rate: u16,
    /// Share of swap fees routed to the protocol, in basis points of the fee.
    pub protocol_fee_rate: u16,
    /// Liquidity active at the current price.
    pub liquidity_available: u128,
    /// The current square root of the price of token A in token B, Q64.64.
    pub sqrt_price: u128,
    /// The tick at or below the current sqrt price.
    pub tick_current_index: i32,
    /// Cumulative token A fees per unit of liquidity, Q64.64.
    pub fee_growth_global_a: u128,
    /// Cumulative token B fees per unit of liquidity, Q64.64.
    pub fee_growth_global_b: u128,
    /// Token A fees owed to the protocol.
    pub protocol_fee_owed_a: u64,
    /// Token B fees owed to the protocol.
    pub protocol_fee_owed_b: u64,
}

/// Parameters for initializing a new pool.
#[derive(Clone, Copy, Debug)]
pub struct InitializePoolParams {
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub tick_spacing: u16,
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub initial_sqrt_price: u128,
}

impl Pool {
    /// Initializes the state of a new pool.
    ///
    /// # Arguments
    /// * `params` - Mints, tick spacing, fee rates and the initial sqrt price
    ///
    /// # Errors
    /// * `InvalidTickSpacing` if the spacing is zero
    /// * `InvalidFeeRate` / `InvalidProtocolFeeRate` if a rate exceeds its maximum
    /// * `InvalidSqrtPrice` if the initial price is outside the supported range
    pub fn initialize(&mut self, params: InitializePoolParams) -> Result<(), ErrorCode> {
        if params.tick_spacing == 0 {
            return Err(ErrorCode::InvalidTickSpacing);
        }
        if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&params.initial_sqrt_price) {
            return Err(ErrorCode::InvalidSqrtPrice);
        }

        self.token_mint_a = params.token_mint_a;
        self.token_mint_b = params.token_mint_b;
        self.tick_spacing = params.tick_spacing;
        self.update_fee_rate(params.fee_rate)?;
        self.update_protocol_fee_rate(params.protocol_fee_rate)?;

        self.sqrt_price = params.initial_sqrt_price;
        self.tick_current_index = sqrt_price_x64_to_tick_index(params.initial_sqrt_price)?;
        self.liquidity_available = 0;
        self.fee_growth_global_a = 0;
        self.fee_growth_global_b = 0;
        self.protocol_fee_owed_a = 0;
        self.protocol_fee_owed_b = 0;

        Ok(())
    }

    /// Commits the price, liquidity and fee state produced by a swap.
    ///
    /// Fee growth and protocol fees only accrue to the input token, which is token A
    /// when `is_token_fee_in_a` is set.
    pub fn update_after_swap(
        &mut self,
        liquidity: u128,
        tick_index: i32,
        sqrt_price: u128,
        fee_growth_global: u128,
        protocol_fee: u64,
        is_token_fee_in_a: bool,
    ) -> Result<(), ErrorCode> {
        if is_token_fee_in_a {
            self.protocol_fee_owed_a = self
                .protocol_fee_owed_a
                .checked_add(protocol_fee)
                .ok_or(ErrorCode::AmountOverflow)?;
            self.fee_growth_global_a = fee_growth_global;
        } else {
            self.protocol_fee_owed_b = self
                .protocol_fee_owed_b
                .checked_add(protocol_fee)
                .ok_or(ErrorCode::AmountOverflow)?;
            self.fee_growth_global_b = fee_growth_global;
        }

        self.liquidity_available = liquidity;
        self.tick_current_index = tick_index;
        self.sqrt_price = sqrt_price;

        Ok(())
    }

    pub fn update_liquidity(&mut self, liquidity: u128) {
        self.liquidity_available = liquidity;
    }

    pub fn update_fee_rate(&mut self, fee_rate: u16) -> Result<(), ErrorCode> {
        if fee_rate > MAX_FEE_RATE {
            return Err(ErrorCode::InvalidFeeRate);
        }
        self.fee_rate = fee_rate;
        Ok(())
    }

    pub fn update_protocol_fee_rate(&mut self, protocol_fee_rate: u16) -> Result<(), ErrorCode> {
        if protocol_fee_rate > MAX_PROTOCOL_FEE_RATE {
            return Err(ErrorCode::InvalidProtocolFeeRate);
        }
        self.protocol_fee_rate = protocol_fee_rate;
        Ok(())
    }

    /// Zeroes the protocol fees owed and returns the collected `(a, b)` amounts.
    pub fn reset_protocol_fees_owed(&mut self) -> (u64, u64) {
        let collected = (self.protocol_fee_owed_a, self.protocol_fee_owed_b);
        self.protocol_fee_owed_a = 0;
        self.protocol_fee_owed_b = 0;
        collected
    }

    /// Returns `Some(true)` for token A, `Some(false)` for token B and `None` otherwise.
    pub fn is_token_a(&self, mint: &Pubkey) -> Option<bool> {
        if *mint == self.token_mint_a {
            Some(true)
        } else if *mint == self.token_mint_b {
            Some(false)
        } else {
            None
        }
    }
}
