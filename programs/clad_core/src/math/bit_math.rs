//! Wide multiply/divide primitives.
//!
//! Intermediates are carried in a 256-bit integer so that the product of two u128
//! values never overflows; only the narrowing of the final quotient can fail.

use crate::constants::{Q64_MASK, Q64_RESOLUTION};
use crate::errors::ErrorCode;
// Use primitive type U256 for intermediary calculations to avoid overflow and keep precision
use primitive_types::U256;

/// Computes `floor(n0 * n1 / d)` with a 256-bit intermediate.
///
/// # Arguments
/// * `n0` - First multiplicand
/// * `n1` - Second multiplicand
/// * `d` - Divisor
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The quotient, or `DivideByZero` / `Overflow`
pub fn checked_mul_div(n0: u128, n1: u128, d: u128) -> Result<u128, ErrorCode> {
    checked_mul_div_round_up_if(n0, n1, d, false)
}

/// Computes `ceil(n0 * n1 / d)` with a 256-bit intermediate.
pub fn checked_mul_div_round_up(n0: u128, n1: u128, d: u128) -> Result<u128, ErrorCode> {
    checked_mul_div_round_up_if(n0, n1, d, true)
}

/// Computes `n0 * n1 / d`, rounding the quotient up when `round_up` is set and the
/// division leaves a remainder.
///
/// # Arguments
/// * `n0` - First multiplicand
/// * `n1` - Second multiplicand
/// * `d` - Divisor, must be non-zero
/// * `round_up` - Whether a non-zero remainder bumps the quotient by one
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The quotient if it fits in 128 bits
pub fn checked_mul_div_round_up_if(
    n0: u128,
    n1: u128,
    d: u128,
    round_up: bool,
) -> Result<u128, ErrorCode> {
    if d == 0 {
        return Err(ErrorCode::DivideByZero);
    }

    let product = U256::from(n0)
        .checked_mul(U256::from(n1))
        .ok_or(ErrorCode::Overflow)?;

    div_u256_round_up_if(product, U256::from(d), round_up)
}

/// Divides two 256-bit values and narrows the quotient to u128.
pub(crate) fn div_u256_round_up_if(
    numerator: U256,
    denominator: U256,
    round_up: bool,
) -> Result<u128, ErrorCode> {
    if denominator.is_zero() {
        return Err(ErrorCode::DivideByZero);
    }

    let (quotient, remainder) = numerator.div_mod(denominator);
    let quotient = if round_up && !remainder.is_zero() {
        quotient
            .checked_add(U256::one())
            .ok_or(ErrorCode::Overflow)?
    } else {
        quotient
    };

    u256_to_u128(quotient)
}

/// Narrows a 256-bit value to u128.
pub(crate) fn u256_to_u128(value: U256) -> Result<u128, ErrorCode> {
    if value > U256::from(u128::MAX) {
        return Err(ErrorCode::Overflow);
    }
    Ok(value.as_u128())
}

/// Computes `n / d`, rounding up when `round_up` is set and there is a remainder.
pub fn div_round_up_if(n: u128, d: u128, round_up: bool) -> Result<u128, ErrorCode> {
    if d == 0 {
        return Err(ErrorCode::DivideByZero);
    }

    let quotient = n / d;
    let remainder = n % d;
    if round_up && remainder > 0 {
        quotient.checked_add(1).ok_or(ErrorCode::Overflow)
    } else {
        Ok(quotient)
    }
}

/// Computes `ceil(n / d)`.
pub fn div_round_up(n: u128, d: u128) -> Result<u128, ErrorCode> {
    div_round_up_if(n, d, true)
}

/// Computes `(n0 * n1) >> 64`, optionally rounding up, and narrows the result to a
/// token amount.
///
/// Used wherever a Q64.64 rate is applied to a liquidity amount, e.g. fee growth
/// multiplied by position liquidity.
pub fn checked_mul_shift_right_round_up_if(
    n0: u128,
    n1: u128,
    round_up: bool,
) -> Result<u64, ErrorCode> {
    let product = U256::from(n0)
        .checked_mul(U256::from(n1))
        .ok_or(ErrorCode::Overflow)?;

    let shifted = product >> Q64_RESOLUTION as usize;
    let has_fraction = !(product & U256::from(Q64_MASK)).is_zero();

    let result = if round_up && has_fraction {
        shifted
            .checked_add(U256::one())
            .ok_or(ErrorCode::Overflow)?
    } else {
        shifted
    };

    if result > U256::from(u64::MAX) {
        return Err(ErrorCode::AmountOverflow);
    }
    Ok(result.low_u64())
}

/// Computes `floor((n0 * n1) >> 64)` as a token amount.
pub fn checked_mul_shift_right(n0: u128, n1: u128) -> Result<u64, ErrorCode> {
    checked_mul_shift_right_round_up_if(n0, n1, false)
}

/// Narrows a u128 value to a u64 token amount.
#[inline(always)]
pub fn to_u64(value: u128) -> Result<u64, ErrorCode> {
    u64::try_from(value).map_err(|_| ErrorCode::AmountOverflow)
}
