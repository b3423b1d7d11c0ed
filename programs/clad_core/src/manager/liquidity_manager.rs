use crate::errors::ErrorCode;
use crate::manager::tick_manager::{next_fee_growths_inside, next_tick_modify_liquidity_update};
use crate::math::{
    add_liquidity_delta, checked_mul_shift_right, get_amount_delta_a, get_amount_delta_b,
    tick_index_to_sqrt_price_x64,
};
use crate::state::{
    LiquidityPosition, LiquidityPositionUpdate, Pool, TickArray, TickUpdate,
};
use anchor_lang::prelude::msg;

/// Changes produced by adding liquidity to, or removing it from, a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifyLiquidityUpdate {
    pub pool_liquidity: u128,
    pub tick_lower_update: TickUpdate,
    pub tick_upper_update: TickUpdate,
    pub position_update: LiquidityPositionUpdate,
}

/// Computes the effects of changing a position's liquidity by `liquidity_delta`.
///
/// The position's bounding ticks are read from `tick_array_lower` and
/// `tick_array_upper`, which may be the same array. Pending fees are settled into the
/// position before its liquidity changes.
///
/// # Errors
/// * `LiquidityZero` if the delta is zero and the position holds no liquidity
/// * `TickNotInArray` if a bounding tick is missing from its array
/// * `LiquidityOverflow` / `LiquidityUnderflow` / `LiquidityNetError` on invalid deltas
pub fn calculate_modify_liquidity(
    pool: &Pool,
    position: &LiquidityPosition,
    tick_array_lower: &TickArray,
    tick_array_upper: &TickArray,
    liquidity_delta: i128,
) -> Result<ModifyLiquidityUpdate, ErrorCode> {
    if liquidity_delta == 0 && position.liquidity == 0 {
        return Err(ErrorCode::LiquidityZero);
    }

    let tick_lower = tick_array_lower.get_tick(position.tick_lower_index)?;
    let tick_upper = tick_array_upper.get_tick(position.tick_upper_index)?;

    let pool_liquidity = next_pool_liquidity(
        pool,
        position.tick_lower_index,
        position.tick_upper_index,
        liquidity_delta,
    )?;

    let tick_lower_update = next_tick_modify_liquidity_update(
        tick_lower,
        position.tick_lower_index,
        pool.tick_current_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
        liquidity_delta,
        false,
    )?;

    let tick_upper_update = next_tick_modify_liquidity_update(
        tick_upper,
        position.tick_upper_index,
        pool.tick_current_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
        liquidity_delta,
        true,
    )?;

    let (fee_growth_inside_a, fee_growth_inside_b) = next_fee_growths_inside(
        pool.tick_current_index,
        tick_lower,
        position.tick_lower_index,
        tick_upper,
        position.tick_upper_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
    );

    let position_update = next_position_modify_liquidity_update(
        position,
        liquidity_delta,
        fee_growth_inside_a,
        fee_growth_inside_b,
    )?;

    Ok(ModifyLiquidityUpdate {
        pool_liquidity,
        tick_lower_update,
        tick_upper_update,
        position_update,
    })
}

/// Settles the fees accrued by a position without changing its liquidity.
pub fn calculate_fee_growths(
    pool: &Pool,
    position: &LiquidityPosition,
    tick_array_lower: &TickArray,
    tick_array_upper: &TickArray,
) -> Result<LiquidityPositionUpdate, ErrorCode> {
    let tick_lower = tick_array_lower.get_tick(position.tick_lower_index)?;
    let tick_upper = tick_array_upper.get_tick(position.tick_upper_index)?;

    let (fee_growth_inside_a, fee_growth_inside_b) = next_fee_growths_inside(
        pool.tick_current_index,
        tick_lower,
        position.tick_lower_index,
        tick_upper,
        position.tick_upper_index,
        pool.fee_growth_global_a,
        pool.fee_growth_global_b,
    );

    next_position_modify_liquidity_update(position, 0, fee_growth_inside_a, fee_growth_inside_b)
}

/// Active liquidity after a position over `[tick_lower_index, tick_upper_index)`
/// changes by `liquidity_delta`. Only positions containing the current tick count.
pub fn next_pool_liquidity(
    pool: &Pool,
    tick_lower_index: i32,
    tick_upper_index: i32,
    liquidity_delta: i128,
) -> Result<u128, ErrorCode> {
    if pool.tick_current_index >= tick_lower_index && pool.tick_current_index < tick_upper_index {
        add_liquidity_delta(pool.liquidity_available, liquidity_delta)
    } else {
        Ok(pool.liquidity_available)
    }
}

/// Settles fees owed since the last checkpoint and applies the liquidity delta.
pub fn next_position_modify_liquidity_update(
    position: &LiquidityPosition,
    liquidity_delta: i128,
    fee_growth_inside_a: u128,
    fee_growth_inside_b: u128,
) -> Result<LiquidityPositionUpdate, ErrorCode> {
    let fee_growth_delta_a = fee_growth_inside_a.wrapping_sub(position.fee_growth_checkpoint_a);
    let fee_delta_a = checked_mul_shift_right(position.liquidity, fee_growth_delta_a)?;

    let fee_growth_delta_b = fee_growth_inside_b.wrapping_sub(position.fee_growth_checkpoint_b);
    let fee_delta_b = checked_mul_shift_right(position.liquidity, fee_growth_delta_b)?;

    let liquidity = add_liquidity_delta(position.liquidity, liquidity_delta)?;

    Ok(LiquidityPositionUpdate {
        liquidity,
        fee_growth_checkpoint_a: fee_growth_inside_a,
        fee_growth_checkpoint_b: fee_growth_inside_b,
        fee_owed_a: position
            .fee_owed_a
            .checked_add(fee_delta_a)
            .ok_or(ErrorCode::AmountOverflow)?,
        fee_owed_b: position
            .fee_owed_b
            .checked_add(fee_delta_b)
            .ok_or(ErrorCode::AmountOverflow)?,
    })
}

/// Token amounts that must be deposited (positive delta, rounded up) or will be
/// withdrawn (negative delta, rounded down) for a liquidity change.
///
/// # Returns
/// * `Result<(u64, u64), ErrorCode>` - `(amount_a, amount_b)`
pub fn calculate_liquidity_token_deltas(
    tick_current_index: i32,
    sqrt_price: u128,
    position: &LiquidityPosition,
    liquidity_delta: i128,
) -> Result<(u64, u64), ErrorCode> {
    if liquidity_delta == 0 {
        return Err(ErrorCode::LiquidityZero);
    }

    let round_up = liquidity_delta > 0;
    let liquidity = liquidity_delta.unsigned_abs();
    let lower_price = tick_index_to_sqrt_price_x64(position.tick_lower_index)?;
    let upper_price = tick_index_to_sqrt_price_x64(position.tick_upper_index)?;

    let mut delta_a: u64 = 0;
    let mut delta_b: u64 = 0;
    if tick_current_index < position.tick_lower_index {
        // Current price is below the range, the position holds only token A
        delta_a = get_amount_delta_a(lower_price, upper_price, liquidity, round_up)?;
    } else if tick_current_index < position.tick_upper_index {
        delta_a = get_amount_delta_a(sqrt_price, upper_price, liquidity, round_up)?;
        delta_b = get_amount_delta_b(lower_price, sqrt_price, liquidity, round_up)?;
    } else {
        delta_b = get_amount_delta_b(lower_price, upper_price, liquidity, round_up)?;
    }

    Ok((delta_a, delta_b))
}

/// Commits a [`ModifyLiquidityUpdate`] to the pool, the position and the tick arrays
/// holding its bounding ticks.
///
/// Both ticks are located before anything is written.
pub fn sync_modify_liquidity_values(
    pool: &mut Pool,
    position: &mut LiquidityPosition,
    tick_arrays: &mut [TickArray],
    update: &ModifyLiquidityUpdate,
) -> Result<(), ErrorCode> {
    let lower_array_index = find_tick_array(tick_arrays, position.tick_lower_index)?;
    let upper_array_index = find_tick_array(tick_arrays, position.tick_upper_index)?;

    tick_arrays[lower_array_index]
        .update_tick(position.tick_lower_index, &update.tick_lower_update)?;
    tick_arrays[upper_array_index]
        .update_tick(position.tick_upper_index, &update.tick_upper_update)?;

    position.update(&update.position_update);
    pool.update_liquidity(update.pool_liquidity);

    msg!(
        "Position [{}, {}] liquidity now {}. Pool liquidity: {}",
        position.tick_lower_index,
        position.tick_upper_index,
        position.liquidity,
        pool.liquidity_available
    );

    Ok(())
}

pub(crate) fn find_tick_array(tick_arrays: &[TickArray], tick_index: i32) -> Result<usize, ErrorCode> {
    tick_arrays
        .iter()
        .position(|array| array.get_tick(tick_index).is_ok())
        .ok_or(ErrorCode::TickNotInArray)
}
