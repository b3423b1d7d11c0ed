use crate::errors::ErrorCode;
use crate::math::add_liquidity_delta;
use crate::state::{Tick, TickUpdate};
use anchor_lang::prelude::msg;

/// Flips a tick's fee growth outside when the price crosses it.
pub fn next_tick_cross_update(
    tick: &Tick,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
) -> TickUpdate {
    let mut update = TickUpdate::from(*tick);

    update.fee_growth_outside_a = fee_growth_global_a.wrapping_sub(tick.fee_growth_outside_a);
    update.fee_growth_outside_b = fee_growth_global_b.wrapping_sub(tick.fee_growth_outside_b);

    update
}

/// Computes the new state of a range-boundary tick after a position's liquidity changes.
///
/// # Arguments
/// * `tick` - Current state of the tick
/// * `tick_index` - Index of the tick
/// * `tick_current_index` - The pool's current tick
/// * `fee_growth_global_a` / `fee_growth_global_b` - The pool's fee growth accumulators
/// * `liquidity_delta` - Liquidity added (positive) or removed (negative)
/// * `is_upper_tick` - True if the tick is the position's upper bound
///
/// # Returns
/// * `Result<TickUpdate, ErrorCode>` - The tick update, or a liquidity error
pub fn next_tick_modify_liquidity_update(
    tick: &Tick,
    tick_index: i32,
    tick_current_index: i32,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
    liquidity_delta: i128,
    is_upper_tick: bool,
) -> Result<TickUpdate, ErrorCode> {
    if liquidity_delta == 0 {
        msg!("Tick {} unchanged: zero liquidity delta", tick_index);
        return Ok(TickUpdate::from(*tick));
    }

    let liquidity_gross = add_liquidity_delta(tick.liquidity_gross, liquidity_delta)?;

    // Nothing references the tick anymore
    if liquidity_gross == 0 {
        msg!("Tick {} has no gross liquidity left, resetting", tick_index);
        return Ok(TickUpdate {
            liquidity_borrowed: tick.liquidity_borrowed,
            ..TickUpdate::default()
        });
    }

    let (fee_growth_outside_a, fee_growth_outside_b) = if tick.liquidity_gross == 0 {
        // By convention, all fee growth before initialization happened below the tick
        if tick_current_index >= tick_index {
            (fee_growth_global_a, fee_growth_global_b)
        } else {
            (0, 0)
        }
    } else {
        (tick.fee_growth_outside_a, tick.fee_growth_outside_b)
    };

    let liquidity_net = if is_upper_tick {
        tick.liquidity_net
            .checked_sub(liquidity_delta)
            .ok_or(ErrorCode::LiquidityNetError)?
    } else {
        tick.liquidity_net
            .checked_add(liquidity_delta)
            .ok_or(ErrorCode::LiquidityNetError)?
    };

    Ok(TickUpdate {
        initialized: true,
        liquidity_net,
        liquidity_gross,
        liquidity_borrowed: tick.liquidity_borrowed,
        fee_growth_outside_a,
        fee_growth_outside_b,
    })
}

/// Same as [`next_tick_modify_liquidity_update`], additionally tracking liquidity lent
/// out from the tick.
///
/// A negative delta borrows from the tick and a positive delta repays it.
pub fn next_tick_modify_liquidity_update_from_loan(
    tick: &Tick,
    tick_index: i32,
    tick_current_index: i32,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
    liquidity_delta: i128,
    is_upper_tick: bool,
) -> Result<TickUpdate, ErrorCode> {
    let liquidity_borrowed = if liquidity_delta < 0 {
        tick.liquidity_borrowed
            .checked_add(liquidity_delta.unsigned_abs())
            .ok_or(ErrorCode::LiquidityOverflow)?
    } else {
        tick.liquidity_borrowed
            .checked_sub(liquidity_delta as u128)
            .ok_or(ErrorCode::LiquidityUnderflow)?
    };

    let mut update = next_tick_modify_liquidity_update(
        tick,
        tick_index,
        tick_current_index,
        fee_growth_global_a,
        fee_growth_global_b,
        liquidity_delta,
        is_upper_tick,
    )?;
    update.liquidity_borrowed = liquidity_borrowed;

    Ok(update)
}

/// Computes the fee growth accrued strictly inside `[tick_lower_index, tick_upper_index)`.
///
/// Fee growth below the lower tick and above the upper tick is derived from each tick's
/// fee growth outside, then subtracted from the global growth. All arithmetic wraps,
/// only differences between two readings are meaningful.
pub fn next_fee_growths_inside(
    tick_current_index: i32,
    tick_lower: &Tick,
    tick_lower_index: i32,
    tick_upper: &Tick,
    tick_upper_index: i32,
    fee_growth_global_a: u128,
    fee_growth_global_b: u128,
) -> (u128, u128) {
    let (fee_growth_below_a, fee_growth_below_b) = if !tick_lower.initialized {
        (fee_growth_global_a, fee_growth_global_b)
    } else if tick_current_index < tick_lower_index {
        (
            fee_growth_global_a.wrapping_sub(tick_lower.fee_growth_outside_a),
            fee_growth_global_b.wrapping_sub(tick_lower.fee_growth_outside_b),
        )
    } else {
        (tick_lower.fee_growth_outside_a, tick_lower.fee_growth_outside_b)
    };

    let (fee_growth_above_a, fee_growth_above_b) = if !tick_upper.initialized {
        (0, 0)
    } else if tick_current_index < tick_upper_index {
        (tick_upper.fee_growth_outside_a, tick_upper.fee_growth_outside_b)
    } else {
        (
            fee_growth_global_a.wrapping_sub(tick_upper.fee_growth_outside_a),
            fee_growth_global_b.wrapping_sub(tick_upper.fee_growth_outside_b),
        )
    };

    (
        fee_growth_global_a
            .wrapping_sub(fee_growth_below_a)
            .wrapping_sub(fee_growth_above_a),
        fee_growth_global_b
            .wrapping_sub(fee_growth_below_b)
            .wrapping_sub(fee_growth_above_b),
    )
}
