use crate::errors::ErrorCode;
use crate::state::liquidity_position::validate_position_ticks;
use crate::state::Pool;
use anchor_lang::prelude::borsh;
use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize, Pubkey};

/// A leveraged position funded by liquidity borrowed from a tick range.
///
/// Borrowing removes liquidity that sits entirely on one side of the current price, so
/// the loan is paid out in a single token (`token_mint_loan`). The trader then swaps
/// some or all of it; closing requires returning the borrowed liquidity.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct TradePosition {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    pub liquidity_borrowed: u128,
    pub collateral_amount: u64,
    pub collateral_mint: Pubkey,
    pub token_mint_loan: Pubkey,
    /// Loan tokens held by the position and not yet swapped.
    pub loan_token_available: u64,
    /// Loan tokens already spent on the leveraged swap.
    pub loan_token_swapped: u64,
    /// Other-token proceeds of the leveraged swap.
    pub trade_token_amount: u64,
    pub is_trade_open: bool,
    pub open_slot: u64,
    pub duration: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TradePositionUpdate {
    pub liquidity_borrowed: u128,
    pub loan_token_available: u64,
    pub loan_token_swapped: u64,
    pub trade_token_amount: u64,
}

impl TradePosition {
    /// Opens an empty trade position over `[tick_lower_index, tick_upper_index)`.
    ///
    /// # Errors
    /// * `InvalidTickIndex` if the range is not usable with the pool's spacing
    /// * `InvalidInputTokenMint` if `token_mint_loan` is not one of the pool's mints
    #[allow(clippy::too_many_arguments)]
    pub fn open_position(
        &mut self,
        pool: &Pool,
        tick_lower_index: i32,
        tick_upper_index: i32,
        token_mint_loan: Pubkey,
        collateral_mint: Pubkey,
        collateral_amount: u64,
        open_slot: u64,
        duration: u64,
    ) -> Result<(), ErrorCode> {
        validate_position_ticks(pool.tick_spacing, tick_lower_index, tick_upper_index)?;
        if pool.is_token_a(&token_mint_loan).is_none() {
            return Err(ErrorCode::InvalidInputTokenMint);
        }

        self.tick_lower_index = tick_lower_index;
        self.tick_upper_index = tick_upper_index;
        self.token_mint_loan = token_mint_loan;
        self.collateral_mint = collateral_mint;
        self.collateral_amount = collateral_amount;
        self.open_slot = open_slot;
        self.duration = duration;
        self.liquidity_borrowed = 0;
        self.loan_token_available = 0;
        self.loan_token_swapped = 0;
        self.trade_token_amount = 0;
        self.is_trade_open = false;
        Ok(())
    }

    pub fn update(&mut self, update: &TradePositionUpdate) {
        self.liquidity_borrowed = update.liquidity_borrowed;
        self.loan_token_available = update.loan_token_available;
        self.loan_token_swapped = update.loan_token_swapped;
        self.trade_token_amount = update.trade_token_amount;
        self.is_trade_open = update.loan_token_swapped > 0;
    }

    /// Moves `amount_in` loan tokens from available to swapped and credits the
    /// `amount_out` received in the other pool token.
    pub fn record_swap(&mut self, amount_in: u64, amount_out: u64) -> Result<(), ErrorCode> {
        let loan_token_available = self
            .loan_token_available
            .checked_sub(amount_in)
            .ok_or(ErrorCode::AmountOverflow)?;
        let loan_token_swapped = self
            .loan_token_swapped
            .checked_add(amount_in)
            .ok_or(ErrorCode::AmountOverflow)?;
        let trade_token_amount = self
            .trade_token_amount
            .checked_add(amount_out)
            .ok_or(ErrorCode::AmountOverflow)?;

        self.update(&TradePositionUpdate {
            liquidity_borrowed: self.liquidity_borrowed,
            loan_token_available,
            loan_token_swapped,
            trade_token_amount,
        });
        Ok(())
    }

    pub fn is_position_empty(&self) -> bool {
        self.liquidity_borrowed == 0
    }
}
