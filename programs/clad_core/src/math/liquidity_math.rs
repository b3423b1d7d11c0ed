use crate::constants::Q64_RESOLUTION;
use crate::errors::ErrorCode;
use crate::math::bit_math::{div_round_up_if, div_u256_round_up_if};
use crate::math::token_math::increasing_price_order;
use primitive_types::U256;

/// Applies a signed liquidity delta to an unsigned liquidity amount.
///
/// # Errors
/// * `LiquidityUnderflow` if the result would be negative
/// * `LiquidityOverflow` if the result would exceed u128
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128, ErrorCode> {
    if delta == 0 {
        return Ok(liquidity);
    }
    if delta > 0 {
        liquidity
            .checked_add(delta as u128)
            .ok_or(ErrorCode::LiquidityOverflow)
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(ErrorCode::LiquidityUnderflow)
    }
}

/// Converts an unsigned liquidity amount into a signed delta.
pub fn convert_to_liquidity_delta(
    liquidity_amount: u128,
    positive: bool,
) -> Result<i128, ErrorCode> {
    if liquidity_amount > i128::MAX as u128 {
        return Err(ErrorCode::LiquidityOverflow);
    }
    let delta = liquidity_amount as i128;
    Ok(if positive { delta } else { -delta })
}

/// Calculates the liquidity that `amount` of token A provides between two sqrt prices
///
/// `liquidity = amount * lower * upper / (upper - lower) >> 64`
///
/// # Arguments
/// * `amount` - Amount of token A
/// * `sqrt_price_0` - One sqrt price bound in Q64.64 format
/// * `sqrt_price_1` - The other sqrt price bound in Q64.64 format
/// * `round_up` - Whether to round the result up
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The liquidity, or `DivideByZero` for equal prices
pub fn get_liquidity_from_token_a(
    amount: u64,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u128, ErrorCode> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;
    if sqrt_price_diff == 0 {
        return Err(ErrorCode::DivideByZero);
    }

    let numerator = U256::from(amount)
        .checked_mul(U256::from(sqrt_price_lower))
        .and_then(|n| n.checked_mul(U256::from(sqrt_price_upper)))
        .ok_or(ErrorCode::Overflow)?;
    let denominator = U256::from(sqrt_price_diff) << Q64_RESOLUTION as usize;

    div_u256_round_up_if(numerator, denominator, round_up)
        .map_err(|_| ErrorCode::LiquidityOverflow)
}

/// Calculates the liquidity that `amount` of token B provides between two sqrt prices
///
/// `liquidity = (amount << 64) / (upper - lower)`
pub fn get_liquidity_from_token_b(
    amount: u64,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u128, ErrorCode> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    div_round_up_if((amount as u128) << Q64_RESOLUTION, sqrt_price_diff, round_up)
}
