use crate::constants::{
    MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64, MIN_TICK_INDEX, PROTOCOL_FEE_RATE_MUL_VALUE,
    Q64_RESOLUTION,
};
use crate::errors::ErrorCode;
use crate::manager::liquidity_manager::find_tick_array;
use crate::manager::tick_manager::next_tick_cross_update;
use crate::math::{
    add_liquidity_delta, checked_mul_div, compute_swap_step, sqrt_price_x64_to_tick_index,
    tick_index_to_sqrt_price_x64, to_u64,
};
use crate::state::{Pool, TickArray, TickUpdate};
use crate::tick_sequence::TickArraySequence;
use anchor_lang::prelude::msg;

/// Everything a swap changes, computed without mutating the pool or its tick arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostSwapUpdate {
    pub amount_a: u64,
    pub amount_b: u64,
    pub total_fee_amount: u64,
    pub next_liquidity: u128,
    pub next_tick_index: i32,
    pub next_sqrt_price: u128,
    /// Fee growth of the input token after the swap.
    pub next_fee_growth_global: u128,
    /// Protocol fee collected by this swap, in the input token.
    pub next_protocol_fee: u64,
    /// Ticks crossed during the swap, with their fee growth outside flipped.
    pub tick_updates: Vec<(i32, TickUpdate)>,
}

/// Simulates a swap against the pool across the tick arrays in `tick_sequence`.
///
/// # Arguments
/// * `pool` - The pool being traded against
/// * `tick_sequence` - Tick arrays covering the price range the swap may reach
/// * `amount` - Amount of the specified token
/// * `sqrt_price_limit` - The swap stops once this sqrt price is reached
/// * `amount_specified_is_input` - Whether `amount` is the input (true) or output amount
/// * `a_to_b` - True when token A is sold for token B (price moves down)
///
/// # Returns
/// * `Result<PostSwapUpdate, ErrorCode>` - Token amounts exchanged and the new pool state
///
/// # Errors
/// * `ZeroTradableAmount` if `amount` is zero
/// * `PriceLimitExceeded` if the limit lies outside the supported price range
/// * `InvalidSqrtPriceLimitDirection` if the limit lies on the wrong side of the price
/// * `InsufficientLiquidity` if the loaded tick arrays run out before the swap completes
/// * `CorruptedTickData` if crossing a tick would make active liquidity negative
pub fn compute_swap(
    pool: &Pool,
    tick_sequence: &TickArraySequence,
    amount: u64,
    sqrt_price_limit: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<PostSwapUpdate, ErrorCode> {
    if amount == 0 {
        return Err(ErrorCode::ZeroTradableAmount);
    }
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_limit) {
        return Err(ErrorCode::PriceLimitExceeded);
    }
    if (a_to_b && sqrt_price_limit > pool.sqrt_price)
        || (!a_to_b && sqrt_price_limit < pool.sqrt_price)
    {
        return Err(ErrorCode::InvalidSqrtPriceLimitDirection);
    }
    if tick_sequence.a_to_b() != a_to_b {
        return Err(ErrorCode::InvalidTickArraySequence);
    }

    let mut amount_remaining = amount;
    let mut amount_calculated: u64 = 0;
    let mut curr_sqrt_price = pool.sqrt_price;
    let mut curr_tick_index = pool.tick_current_index;
    let mut curr_liquidity = pool.liquidity_available;
    let mut curr_protocol_fee: u64 = 0;
    let mut curr_array_index: usize = 0;
    let mut curr_fee_growth_global_input = if a_to_b {
        pool.fee_growth_global_a
    } else {
        pool.fee_growth_global_b
    };
    let mut total_fee_amount: u64 = 0;
    let mut tick_updates = Vec::new();

    while amount_remaining > 0 && curr_sqrt_price != sqrt_price_limit {
        let (next_array_index, next_tick_index) =
            tick_sequence.get_next_initialized_tick_index(curr_tick_index, curr_array_index)?;

        let next_tick_sqrt_price = tick_index_to_sqrt_price_x64(next_tick_index)?;
        let sqrt_price_target = if a_to_b {
            next_tick_sqrt_price.max(sqrt_price_limit)
        } else {
            next_tick_sqrt_price.min(sqrt_price_limit)
        };

        let step = compute_swap_step(
            amount_remaining,
            pool.fee_rate,
            curr_liquidity,
            curr_sqrt_price,
            sqrt_price_target,
            amount_specified_is_input,
            a_to_b,
        )?;

        if amount_specified_is_input {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_in)
                .and_then(|remaining| remaining.checked_sub(step.fee_amount))
                .ok_or(ErrorCode::AmountOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_out)
                .ok_or(ErrorCode::AmountOverflow)?;
        } else {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_out)
                .ok_or(ErrorCode::AmountOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_in)
                .and_then(|calculated| calculated.checked_add(step.fee_amount))
                .ok_or(ErrorCode::AmountOverflow)?;
        }

        total_fee_amount = total_fee_amount
            .checked_add(step.fee_amount)
            .ok_or(ErrorCode::AmountOverflow)?;

        let (next_protocol_fee, next_fee_growth_global_input) = calculate_fees(
            step.fee_amount,
            pool.protocol_fee_rate,
            curr_liquidity,
            curr_protocol_fee,
            curr_fee_growth_global_input,
        )?;
        curr_protocol_fee = next_protocol_fee;
        curr_fee_growth_global_input = next_fee_growth_global_input;

        if step.next_sqrt_price == next_tick_sqrt_price {
            if let Some(tick) = tick_sequence.get_initialized_tick(next_array_index, next_tick_index)
            {
                let (fee_growth_global_a, fee_growth_global_b) = if a_to_b {
                    (curr_fee_growth_global_input, pool.fee_growth_global_b)
                } else {
                    (pool.fee_growth_global_a, curr_fee_growth_global_input)
                };

                curr_liquidity = next_liquidity_after_cross(
                    curr_liquidity,
                    tick.liquidity_net,
                    a_to_b,
                )?;
                msg!(
                    "Crossed tick {}, liquidity_net: {}. Current pool liquidity: {}",
                    next_tick_index,
                    tick.liquidity_net,
                    curr_liquidity
                );

                tick_updates.push((
                    next_tick_index,
                    next_tick_cross_update(tick, fee_growth_global_a, fee_growth_global_b),
                ));
            }

            // The price now sits on the lower edge of the crossed tick's interval
            curr_tick_index = if a_to_b {
                (next_tick_index - 1).max(MIN_TICK_INDEX)
            } else {
                next_tick_index
            };
        } else if step.next_sqrt_price != curr_sqrt_price {
            curr_tick_index = sqrt_price_x64_to_tick_index(step.next_sqrt_price)?;
        }

        curr_sqrt_price = step.next_sqrt_price;
        curr_array_index = next_array_index;
    }

    let amount_swapped = amount - amount_remaining;
    let (amount_a, amount_b) = if a_to_b == amount_specified_is_input {
        (amount_swapped, amount_calculated)
    } else {
        (amount_calculated, amount_swapped)
    };

    Ok(PostSwapUpdate {
        amount_a,
        amount_b,
        total_fee_amount,
        next_liquidity: curr_liquidity,
        next_tick_index: curr_tick_index,
        next_sqrt_price: curr_sqrt_price,
        next_fee_growth_global: curr_fee_growth_global_input,
        next_protocol_fee: curr_protocol_fee,
        tick_updates,
    })
}

/// Splits a step's fee between the protocol and liquidity providers.
///
/// Returns the accumulated protocol fee and the input token's fee growth after the
/// step. Fee growth only accrues while there is active liquidity to attribute it to.
fn calculate_fees(
    fee_amount: u64,
    protocol_fee_rate: u16,
    curr_liquidity: u128,
    curr_protocol_fee: u64,
    curr_fee_growth_global_input: u128,
) -> Result<(u64, u128), ErrorCode> {
    let mut next_protocol_fee = curr_protocol_fee;
    let mut next_fee_growth_global_input = curr_fee_growth_global_input;
    let mut global_fee = fee_amount;

    if protocol_fee_rate > 0 {
        let delta = calculate_protocol_fee(global_fee, protocol_fee_rate)?;
        global_fee = global_fee
            .checked_sub(delta)
            .ok_or(ErrorCode::Overflow)?;
        next_protocol_fee = next_protocol_fee
            .checked_add(delta)
            .ok_or(ErrorCode::AmountOverflow)?;
    }

    if curr_liquidity > 0 {
        let fee_growth_delta = ((global_fee as u128) << Q64_RESOLUTION) / curr_liquidity;
        next_fee_growth_global_input = next_fee_growth_global_input.wrapping_add(fee_growth_delta);
    }

    Ok((next_protocol_fee, next_fee_growth_global_input))
}

/// `global_fee * protocol_fee_rate / PROTOCOL_FEE_RATE_MUL_VALUE`, rounded down.
pub fn calculate_protocol_fee(global_fee: u64, protocol_fee_rate: u16) -> Result<u64, ErrorCode> {
    let protocol_fee = checked_mul_div(
        global_fee as u128,
        protocol_fee_rate as u128,
        PROTOCOL_FEE_RATE_MUL_VALUE,
    )?;
    to_u64(protocol_fee)
}

fn next_liquidity_after_cross(
    liquidity: u128,
    liquidity_net: i128,
    a_to_b: bool,
) -> Result<u128, ErrorCode> {
    let signed_liquidity_net = if a_to_b {
        liquidity_net
            .checked_neg()
            .ok_or(ErrorCode::CorruptedTickData)?
    } else {
        liquidity_net
    };

    add_liquidity_delta(liquidity, signed_liquidity_net).map_err(|err| match err {
        ErrorCode::LiquidityUnderflow => ErrorCode::CorruptedTickData,
        other => other,
    })
}

/// Commits a [`PostSwapUpdate`] to the pool and the tick arrays it was computed against.
///
/// Every crossed tick is located before anything is written, so a failure leaves both
/// the pool and the arrays untouched.
///
/// # Errors
/// * `TickNotInArray` if a crossed tick is not covered by `tick_arrays`
pub fn apply_swap(
    pool: &mut Pool,
    tick_arrays: &mut [TickArray],
    update: &PostSwapUpdate,
    a_to_b: bool,
) -> Result<(), ErrorCode> {
    let mut targets = Vec::with_capacity(update.tick_updates.len());
    for (tick_index, _) in update.tick_updates.iter() {
        targets.push(find_tick_array(tick_arrays, *tick_index)?);
    }

    let mut next_pool = *pool;
    next_pool.update_after_swap(
        update.next_liquidity,
        update.next_tick_index,
        update.next_sqrt_price,
        update.next_fee_growth_global,
        update.next_protocol_fee,
        a_to_b,
    )?;

    for (array_index, (tick_index, tick_update)) in targets.into_iter().zip(update.tick_updates.iter()) {
        tick_arrays[array_index].update_tick(*tick_index, tick_update)?;
    }
    *pool = next_pool;

    Ok(())
}
