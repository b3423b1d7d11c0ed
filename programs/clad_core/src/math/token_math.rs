use crate::constants::{MAX_SQRT_PRICE_X64, MIN_SQRT_PRICE_X64, Q64_MASK, Q64_RESOLUTION};
use crate::errors::ErrorCode;
use crate::math::bit_math::div_u256_round_up_if;
use primitive_types::U256;

/// Calculates the amount of token A held by `liquidity` between two sqrt prices
///
/// `amount_a = liquidity * (upper - lower) / (lower * upper)`, with the numerator
/// pre-shifted by 64 bits so that the Q64.64 denominator cancels out.
///
/// # Arguments
/// * `sqrt_price_0` - One sqrt price bound in Q64.64 format (order does not matter)
/// * `sqrt_price_1` - The other sqrt price bound in Q64.64 format
/// * `liquidity` - The amount of liquidity
/// * `round_up` - Whether to round the result up
///
/// # Returns
/// * `Result<u64, ErrorCode>` - The token A amount, or `AmountOverflow` if it exceeds u64
pub fn get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, ErrorCode> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let numerator = U256::from(liquidity)
        .checked_mul(U256::from(sqrt_price_diff))
        .ok_or(ErrorCode::Overflow)?;
    if numerator.leading_zeros() < Q64_RESOLUTION as u32 {
        return Err(ErrorCode::Overflow);
    }
    let numerator = numerator << Q64_RESOLUTION as usize;

    let denominator = U256::from(sqrt_price_lower)
        .checked_mul(U256::from(sqrt_price_upper))
        .ok_or(ErrorCode::Overflow)?;

    let quotient = div_u256_round_up_if(numerator, denominator, round_up)?;
    u64::try_from(quotient).map_err(|_| ErrorCode::AmountOverflow)
}

/// Calculates the amount of token B held by `liquidity` between two sqrt prices
///
/// `amount_b = liquidity * (upper - lower) >> 64`
///
/// # Arguments
/// * `sqrt_price_0` - One sqrt price bound in Q64.64 format (order does not matter)
/// * `sqrt_price_1` - The other sqrt price bound in Q64.64 format
/// * `liquidity` - The amount of liquidity
/// * `round_up` - Whether to round the result up
///
/// # Returns
/// * `Result<u64, ErrorCode>` - The token B amount, or `AmountOverflow` if it exceeds u64
pub fn get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, ErrorCode> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let product = U256::from(liquidity)
        .checked_mul(U256::from(sqrt_price_diff))
        .ok_or(ErrorCode::Overflow)?;

    let mut result = product >> Q64_RESOLUTION as usize;
    if round_up && !(product & U256::from(Q64_MASK)).is_zero() {
        result = result
            .checked_add(U256::one())
            .ok_or(ErrorCode::Overflow)?;
    }

    if result > U256::from(u64::MAX) {
        return Err(ErrorCode::AmountOverflow);
    }
    Ok(result.low_u64())
}

#[inline(always)]
pub(crate) fn increasing_price_order(sqrt_price_0: u128, sqrt_price_1: u128) -> (u128, u128) {
    if sqrt_price_0 > sqrt_price_1 {
        (sqrt_price_1, sqrt_price_0)
    } else {
        (sqrt_price_0, sqrt_price_1)
    }
}

/// Solves for the sqrt price reached after moving `amount` of the step's fixed token
///
/// Token A is the fixed token when `amount_specified_is_input == a_to_b`: A flows in on
/// an input-specified A to B swap and out on an output-specified B to A swap.
pub fn get_next_sqrt_price(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128, ErrorCode> {
    if amount_specified_is_input == a_to_b {
        get_next_sqrt_price_from_a_round_up(sqrt_price, liquidity, amount, amount_specified_is_input)
    } else {
        get_next_sqrt_price_from_b_round_down(
            sqrt_price,
            liquidity,
            amount,
            amount_specified_is_input,
        )
    }
}

/// Solves `amount_a = L * (p - p') / (p * p')` for `p'`, rounding up
///
/// `p' = (L * p << 64) / ((L << 64) ± p * amount)`; adding token A lowers the price and
/// removing it raises the price. Rounding up keeps the price on the pool's side.
///
/// # Arguments
/// * `sqrt_price` - The current sqrt price in Q64.64 format
/// * `liquidity` - The active liquidity
/// * `amount` - Amount of token A added (input) or removed (output)
/// * `amount_specified_is_input` - True when token A is added to the pool
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The next sqrt price, or `PriceLimitExceeded` if the
///   result leaves the valid price range
pub fn get_next_sqrt_price_from_a_round_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128, ErrorCode> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let product = U256::from(sqrt_price)
        .checked_mul(U256::from(amount))
        .ok_or(ErrorCode::Overflow)?;

    let numerator = U256::from(liquidity)
        .checked_mul(U256::from(sqrt_price))
        .ok_or(ErrorCode::Overflow)?;
    if numerator.leading_zeros() < Q64_RESOLUTION as u32 {
        return Err(ErrorCode::Overflow);
    }
    let numerator = numerator << Q64_RESOLUTION as usize;

    let liquidity_shift_left = U256::from(liquidity) << Q64_RESOLUTION as usize;

    if !amount_specified_is_input && liquidity_shift_left <= product {
        return Err(ErrorCode::PriceLimitExceeded);
    }

    let denominator = if amount_specified_is_input {
        liquidity_shift_left
            .checked_add(product)
            .ok_or(ErrorCode::Overflow)?
    } else {
        liquidity_shift_left - product
    };

    let price = div_u256_round_up_if(numerator, denominator, true)?;
    check_sqrt_price_bounds(price)?;
    Ok(price)
}

/// Solves `amount_b = L * (p' - p) >> 64` for `p'`, rounding down
///
/// `p' = p ± (amount << 64) / L`; adding token B raises the price and removing it
/// lowers the price. For outputs the quotient rounds up so that the price moves at
/// least as far as the amount removed requires.
///
/// # Arguments
/// * `sqrt_price` - The current sqrt price in Q64.64 format
/// * `liquidity` - The active liquidity, must be non-zero
/// * `amount` - Amount of token B added (input) or removed (output)
/// * `amount_specified_is_input` - True when token B is added to the pool
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The next sqrt price, or `PriceLimitExceeded` if the
///   result leaves the valid price range
pub fn get_next_sqrt_price_from_b_round_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128, ErrorCode> {
    if liquidity == 0 {
        return Err(ErrorCode::DivideByZero);
    }

    let amount_x64 = (amount as u128) << Q64_RESOLUTION;
    let quotient = amount_x64 / liquidity;
    let remainder = amount_x64 % liquidity;
    let delta = if !amount_specified_is_input && remainder != 0 {
        quotient + 1
    } else {
        quotient
    };

    let price = if amount_specified_is_input {
        sqrt_price.checked_add(delta).ok_or(ErrorCode::PriceLimitExceeded)?
    } else {
        sqrt_price.checked_sub(delta).ok_or(ErrorCode::PriceLimitExceeded)?
    };

    check_sqrt_price_bounds(price)?;
    Ok(price)
}

#[inline(always)]
fn check_sqrt_price_bounds(sqrt_price: u128) -> Result<(), ErrorCode> {
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price) {
        return Err(ErrorCode::PriceLimitExceeded);
    }
    Ok(())
}
