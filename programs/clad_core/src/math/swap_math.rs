use crate::constants::FEE_RATE_MUL_VALUE;
use crate::errors::ErrorCode;
use crate::math::bit_math::{checked_mul_div, checked_mul_div_round_up, to_u64};
use crate::math::token_math::{get_amount_delta_a, get_amount_delta_b, get_next_sqrt_price};

/// Result of a single swap step confined to one initialized-tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapStepComputation {
    pub amount_in: u64,
    pub amount_out: u64,
    pub next_sqrt_price: u128,
    pub fee_amount: u64,
}

/// Computes one swap step between the current sqrt price and a target sqrt price
///
/// The "fixed" token is the one whose amount the caller specified: token A when
/// `amount_specified_is_input == a_to_b`, token B otherwise. The step first checks
/// whether the remaining amount (net of fees, for inputs) covers the whole move to
/// `target_sqrt_price`; if not, it solves for the price the amount does reach.
///
/// # Arguments
/// * `amount_remaining` - Amount of the specified token still to be swapped
/// * `fee_rate` - Pool fee rate, in hundredths of a basis point
/// * `liquidity` - Active liquidity over the interval
/// * `sqrt_price_current` - Sqrt price at the start of the step
/// * `sqrt_price_target` - Sqrt price at the interval boundary or the caller's limit
/// * `amount_specified_is_input` - Whether `amount_remaining` is an input amount
/// * `a_to_b` - Swap direction
///
/// # Returns
/// * `Result<SwapStepComputation, ErrorCode>` - Amounts moved, fee taken and the sqrt
///   price the step ends at
pub fn compute_swap_step(
    amount_remaining: u64,
    fee_rate: u16,
    liquidity: u128,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapStepComputation, ErrorCode> {
    let mut amount_fixed_delta = get_amount_fixed_delta(
        sqrt_price_current,
        sqrt_price_target,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    let mut amount_calc = amount_remaining;
    if amount_specified_is_input {
        let amount_net_of_fee = checked_mul_div(
            amount_remaining as u128,
            FEE_RATE_MUL_VALUE - fee_rate as u128,
            FEE_RATE_MUL_VALUE,
        )?;
        amount_calc = to_u64(amount_net_of_fee)?;
    }

    let next_sqrt_price = if amount_calc >= amount_fixed_delta {
        sqrt_price_target
    } else {
        get_next_sqrt_price(
            sqrt_price_current,
            liquidity,
            amount_calc,
            amount_specified_is_input,
            a_to_b,
        )?
    };

    let is_max_swap = next_sqrt_price == sqrt_price_target;

    let amount_unfixed_delta = get_amount_unfixed_delta(
        sqrt_price_current,
        next_sqrt_price,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    // Reuse the fixed delta when the full interval was consumed
    if !is_max_swap {
        amount_fixed_delta = get_amount_fixed_delta(
            sqrt_price_current,
            next_sqrt_price,
            liquidity,
            amount_specified_is_input,
            a_to_b,
        )?;
    }

    let (amount_in, mut amount_out) = if amount_specified_is_input {
        (amount_fixed_delta, amount_unfixed_delta)
    } else {
        (amount_unfixed_delta, amount_fixed_delta)
    };

    // Output can exceed the remaining amount by rounding when the target is reached
    if !amount_specified_is_input && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if amount_specified_is_input && !is_max_swap {
        amount_remaining
            .checked_sub(amount_in)
            .ok_or(ErrorCode::AmountOverflow)?
    } else {
        let fee = checked_mul_div_round_up(
            amount_in as u128,
            fee_rate as u128,
            FEE_RATE_MUL_VALUE - fee_rate as u128,
        )?;
        to_u64(fee)?
    };

    Ok(SwapStepComputation {
        amount_in,
        amount_out,
        next_sqrt_price,
        fee_amount,
    })
}

fn get_amount_fixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u64, ErrorCode> {
    if a_to_b == amount_specified_is_input {
        get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    } else {
        get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    }
}

fn get_amount_unfixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u64, ErrorCode> {
    if a_to_b == amount_specified_is_input {
        get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    } else {
        get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )
    }
}
