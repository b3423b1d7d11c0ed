use crate::errors::ErrorCode;
use crate::manager::liquidity_manager::find_tick_array;
use crate::manager::tick_manager::next_tick_modify_liquidity_update_from_loan;
use crate::math::{get_amount_delta_a, get_amount_delta_b, tick_index_to_sqrt_price_x64};
use crate::state::{Pool, TickArray, TickUpdate, TradePosition, TradePositionUpdate};
use anchor_lang::prelude::msg;

/// Single-token amount moved by a loan.
///
/// A loan range never contains the current price, so all of its liquidity is held in
/// one token: A when the range sits above the price, B when it sits below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTokenDelta {
    pub amount: u64,
    pub is_borrow_a: bool,
    pub sqrt_price_lower: u128,
    pub sqrt_price_upper: u128,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifyLoanUpdate {
    pub tick_lower_update: TickUpdate,
    pub tick_upper_update: TickUpdate,
    pub position_update: TradePositionUpdate,
    pub token_delta: LoanTokenDelta,
}

/// Token amount represented by a loan liquidity change over `[tick_lower_index, tick_upper_index)`.
///
/// Borrowing (negative delta) rounds down, repaying (positive delta) rounds up.
///
/// # Errors
/// * `LiquidityZero` if the delta is zero
/// * `InvalidLoanRange` if the range contains the current tick
pub fn calculate_loan_liquidity_token_delta(
    tick_current_index: i32,
    tick_lower_index: i32,
    tick_upper_index: i32,
    liquidity_delta: i128,
) -> Result<LoanTokenDelta, ErrorCode> {
    if liquidity_delta == 0 {
        return Err(ErrorCode::LiquidityZero);
    }

    let round_up = liquidity_delta > 0;
    let liquidity = liquidity_delta.unsigned_abs();
    let sqrt_price_lower = tick_index_to_sqrt_price_x64(tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price_x64(tick_upper_index)?;

    let (amount, is_borrow_a) = if tick_current_index < tick_lower_index {
        (
            get_amount_delta_a(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?,
            true,
        )
    } else if tick_current_index >= tick_upper_index {
        (
            get_amount_delta_b(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?,
            false,
        )
    } else {
        return Err(ErrorCode::InvalidLoanRange);
    };

    Ok(LoanTokenDelta {
        amount,
        is_borrow_a,
        sqrt_price_lower,
        sqrt_price_upper,
    })
}

/// Computes the effects of borrowing (negative delta) or repaying (positive delta)
/// liquidity for a trade position.
///
/// Pool liquidity is unaffected because a loan range never contains the current tick.
///
/// # Errors
/// * `InvalidInputTokenMint` if the position's loan mint does not belong to `pool`
/// * `LoanTokenMismatch` if the range pays out the other pool token
/// * `InsufficientLiquidityToBorrow` if either bounding tick holds less gross liquidity
///   than requested
/// * `ZeroBorrowableAmount` if the borrowed liquidity is worth zero tokens
/// * `LiquidityUnderflow` if more is repaid than was borrowed
pub fn calculate_modify_loan(
    pool: &Pool,
    position: &TradePosition,
    tick_array_lower: &TickArray,
    tick_array_upper: &TickArray,
    liquidity_delta: i128,
) -> Result<ModifyLoanUpdate, ErrorCode> {
    let token_delta = calculate_loan_liquidity_token_delta(
        pool.tick_current_index,
        position.tick_lower_index,
        position.tick_upper_index,
        liquidity_delta,
    )?;

    let is_loan_a = pool
        .is_token_a(&position.token_mint_loan)
        .ok_or(ErrorCode::InvalidInputTokenMint)?;
    if token_delta.is_borrow_a != is_loan_a {
        return Err(ErrorCode::LoanTokenMismatch);
    }

    let tick_lower = tick_array_lower.get_tick(position.tick_lower_index)?;
    let tick_upper = tick_array_upper.get_tick(position.tick_upper_index)?;

    let liquidity = liquidity_delta.unsigned_abs();
    let is_borrow = liquidity_delta < 0;
    if is_borrow {
        if liquidity > tick_lower.liquidity_gross || liquidity > tick_upper.liquidity_gross {
            return Err(ErrorCode::InsufficientLiquidityToBorrow);
        }
        if token_delta.amount == 0 {
            return Err(ErrorCode::ZeroBorrowableAmount);
        }
    }

    let tick_lower_update = next_tick_modify_liquidity_update_from_loan(
        tick_lower,
        position.tick_lower_index,
        pool.tick_current_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
        liquidity_delta,
        false,
    )?;
    let tick_upper_update = next_tick_modify_liquidity_update_from_loan(
        tick_upper,
        position.tick_upper_index,
        pool.tick_current_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
        liquidity_delta,
        true,
    )?;

    let (liquidity_borrowed, mut loan_token_available) = if is_borrow {
        (
            position
                .liquidity_borrowed
                .checked_add(liquidity)
                .ok_or(ErrorCode::LiquidityOverflow)?,
            position
                .loan_token_available
                .checked_add(token_delta.amount)
                .ok_or(ErrorCode::AmountOverflow)?,
        )
    } else {
        (
            position
                .liquidity_borrowed
                .checked_sub(liquidity)
                .ok_or(ErrorCode::LiquidityUnderflow)?,
            position.loan_token_available.saturating_sub(token_delta.amount),
        )
    };

    // A fully repaid loan closes the trade
    let (loan_token_swapped, trade_token_amount) = if liquidity_borrowed == 0 {
        loan_token_available = 0;
        (0, 0)
    } else {
        (position.loan_token_swapped, position.trade_token_amount)
    };

    msg!(
        "Loan on [{}, {}] modified by {}: {} token {} moved, liquidity borrowed now {}",
        position.tick_lower_index,
        position.tick_upper_index,
        liquidity_delta,
        if token_delta.is_borrow_a { "A" } else { "B" },
        token_delta.amount,
        liquidity_borrowed
    );

    Ok(ModifyLoanUpdate {
        tick_lower_update,
        tick_upper_update,
        position_update: TradePositionUpdate {
            liquidity_borrowed,
            loan_token_available,
            loan_token_swapped,
            trade_token_amount,
        },
        token_delta,
    })
}

/// Commits a [`ModifyLoanUpdate`] to the trade position and the tick arrays holding its
/// bounding ticks.
pub fn sync_modify_loan_values(
    position: &mut TradePosition,
    tick_arrays: &mut [TickArray],
    update: &ModifyLoanUpdate,
) -> Result<(), ErrorCode> {
    let lower_array_index = find_tick_array(tick_arrays, position.tick_lower_index)?;
    let upper_array_index = find_tick_array(tick_arrays, position.tick_upper_index)?;

    tick_arrays[lower_array_index]
        .update_tick(position.tick_lower_index, &update.tick_lower_update)?;
    tick_arrays[upper_array_index]
        .update_tick(position.tick_upper_index, &update.tick_upper_update)?;
    position.update(&update.position_update);

    Ok(())
}
