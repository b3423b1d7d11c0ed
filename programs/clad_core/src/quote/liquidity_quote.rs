/// Liquidity Quoting Module
///
/// Conversions between liquidity and token amounts used to preview opening, growing and
/// closing a liquidity position before anything is committed to the pool. Amounts the
/// depositor must supply are rounded up; liquidity derived from a deposit is rounded
/// down.
use crate::errors::ErrorCode;
use crate::math::{
    checked_mul_div, get_amount_delta_a, get_amount_delta_b, get_initializable_tick_index,
    get_liquidity_from_token_a, get_liquidity_from_token_b, tick_index_to_sqrt_price_x64, to_u64,
};
use crate::state::{Pool, Tick};
use anchor_lang::prelude::borsh;
use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize, Pubkey};

/// Where a position's range sits relative to the current tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum PositionStatus {
    /// The current tick is below the range: the position holds only token A
    BelowRange,
    /// The current tick is inside the range: the position holds both tokens
    InRange,
    /// The current tick is at or above the upper tick: the position holds only token B
    AboveRange,
}

impl PositionStatus {
    pub fn from_ticks(tick_current_index: i32, tick_lower_index: i32, tick_upper_index: i32) -> Self {
        if tick_current_index < tick_lower_index {
            PositionStatus::BelowRange
        } else if tick_current_index < tick_upper_index {
            PositionStatus::InRange
        } else {
            PositionStatus::AboveRange
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenAmounts {
    pub token_a: u64,
    pub token_b: u64,
}

/// A fraction `numerator / denominator`, used for slippage tolerances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct Percentage {
    pub numerator: u64,
    pub denominator: u64,
}

impl Percentage {
    pub fn from_fraction(numerator: u64, denominator: u64) -> Self {
        Percentage {
            numerator,
            denominator,
        }
    }
}

/// Widens (`adjust_up`) or narrows an amount by a slippage tolerance.
///
/// Up: `n * (den + num) / den`. Down: `n * den / (den + num)`. Both round down.
///
/// # Errors
/// * `InvalidSlippage` if the denominator is zero
/// * `AmountOverflow` if the widened amount exceeds u64
pub fn adjust_for_slippage(
    amount: u64,
    slippage: &Percentage,
    adjust_up: bool,
) -> Result<u64, ErrorCode> {
    if slippage.denominator == 0 {
        return Err(ErrorCode::InvalidSlippage);
    }

    let denominator = slippage.denominator as u128;
    let widened = denominator + slippage.numerator as u128;
    let adjusted = if adjust_up {
        checked_mul_div(amount as u128, widened, denominator)?
    } else {
        checked_mul_div(amount as u128, denominator, widened)?
    };
    to_u64(adjusted)
}

/// Token amounts represented by `liquidity` over a price range at a reference price.
///
/// # Arguments
/// * `liquidity` - The liquidity amount
/// * `sqrt_price_ref` - The sqrt price at which to value the position
/// * `sqrt_price_lower` - The range's lower sqrt price
/// * `sqrt_price_upper` - The range's upper sqrt price
/// * `round_up` - Whether to round both amounts up
pub fn get_token_amounts_from_liquidity(
    liquidity: u128,
    sqrt_price_ref: u128,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
    round_up: bool,
) -> Result<TokenAmounts, ErrorCode> {
    if sqrt_price_ref < sqrt_price_lower {
        Ok(TokenAmounts {
            token_a: get_amount_delta_a(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?,
            token_b: 0,
        })
    } else if sqrt_price_ref < sqrt_price_upper {
        Ok(TokenAmounts {
            token_a: get_amount_delta_a(sqrt_price_ref, sqrt_price_upper, liquidity, round_up)?,
            token_b: get_amount_delta_b(sqrt_price_lower, sqrt_price_ref, liquidity, round_up)?,
        })
    } else {
        Ok(TokenAmounts {
            token_a: 0,
            token_b: get_amount_delta_b(sqrt_price_lower, sqrt_price_upper, liquidity, round_up)?,
        })
    }
}

/// Estimates the liquidity that `token_amounts` could mint over a tick range.
///
/// When the range contains the current tick, both tokens are required and the smaller
/// of the two implied liquidities wins.
///
/// # Errors
/// * `InvalidTickRange` if `tick_upper_index < tick_lower_index`
pub fn estimate_liquidity_from_token_amounts(
    tick_current_index: i32,
    tick_lower_index: i32,
    tick_upper_index: i32,
    token_amounts: &TokenAmounts,
) -> Result<u128, ErrorCode> {
    if tick_upper_index < tick_lower_index {
        return Err(ErrorCode::InvalidTickRange);
    }

    let sqrt_price_lower = tick_index_to_sqrt_price_x64(tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price_x64(tick_upper_index)?;

    match PositionStatus::from_ticks(tick_current_index, tick_lower_index, tick_upper_index) {
        PositionStatus::BelowRange => get_liquidity_from_token_a(
            token_amounts.token_a,
            sqrt_price_lower,
            sqrt_price_upper,
            false,
        ),
        PositionStatus::AboveRange => get_liquidity_from_token_b(
            token_amounts.token_b,
            sqrt_price_lower,
            sqrt_price_upper,
            false,
        ),
        PositionStatus::InRange => {
            let sqrt_price_current = tick_index_to_sqrt_price_x64(tick_current_index)?;
            let liquidity_a = get_liquidity_from_token_a(
                token_amounts.token_a,
                sqrt_price_current,
                sqrt_price_upper,
                false,
            )?;
            // At the lower tick itself no token B is needed
            if tick_current_index == tick_lower_index {
                return Ok(liquidity_a);
            }
            let liquidity_b = get_liquidity_from_token_b(
                token_amounts.token_b,
                sqrt_price_lower,
                sqrt_price_current,
                false,
            )?;
            Ok(liquidity_a.min(liquidity_b))
        }
    }
}

/// Result of [`increase_liquidity_quote_by_input_token`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncreaseLiquidityQuote {
    pub liquidity_amount: u128,
    /// Most of token A the deposit may take once slippage is allowed for.
    pub token_max_a: u64,
    /// Most of token B the deposit may take once slippage is allowed for.
    pub token_max_b: u64,
    pub token_est_a: u64,
    pub token_est_b: u64,
}

/// Quotes the liquidity and maximum token amounts for depositing `input_token_amount` of
/// one pool token into `[tick_lower, tick_upper)`.
///
/// Both ticks are first snapped to initializable indices. If the range only accepts the
/// other token (below range with token B, above range with token A) the quote is empty.
///
/// # Arguments
/// * `pool` - The pool the position belongs to
/// * `input_token_mint` - Mint of the token being deposited
/// * `input_token_amount` - Amount of that token
/// * `tick_lower` - Desired lower tick
/// * `tick_upper` - Desired upper tick
/// * `slippage` - Tolerance applied to the estimated token amounts
///
/// # Errors
/// * `InvalidTickSpacing` if the pool's tick spacing is zero
/// * `InvalidTickIndex` if a snapped tick is out of bounds
/// * `InvalidInputTokenMint` if the mint is not one of the pool's tokens
pub fn increase_liquidity_quote_by_input_token(
    pool: &Pool,
    input_token_mint: &Pubkey,
    input_token_amount: u64,
    tick_lower: i32,
    tick_upper: i32,
    slippage: &Percentage,
) -> Result<IncreaseLiquidityQuote, ErrorCode> {
    if pool.tick_spacing == 0 {
        return Err(ErrorCode::InvalidTickSpacing);
    }
    let tick_lower_index = get_initializable_tick_index(tick_lower, pool.tick_spacing)?;
    let tick_upper_index = get_initializable_tick_index(tick_upper, pool.tick_spacing)?;
    if Tick::check_is_out_of_bounds(tick_lower_index) || Tick::check_is_out_of_bounds(tick_upper_index)
    {
        return Err(ErrorCode::InvalidTickIndex);
    }

    let is_input_a = pool
        .is_token_a(input_token_mint)
        .ok_or(ErrorCode::InvalidInputTokenMint)?;

    let sqrt_price_lower = tick_index_to_sqrt_price_x64(tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price_x64(tick_upper_index)?;

    let status = PositionStatus::from_ticks(pool.tick_current_index, tick_lower_index, tick_upper_index);
    let (liquidity_amount, token_est_a, token_est_b) = match status {
        PositionStatus::BelowRange => {
            if !is_input_a {
                return Ok(IncreaseLiquidityQuote::default());
            }
            let liquidity = get_liquidity_from_token_a(
                input_token_amount,
                sqrt_price_lower,
                sqrt_price_upper,
                false,
            )?;
            let token_est_a = get_amount_delta_a(sqrt_price_lower, sqrt_price_upper, liquidity, true)?;
            (liquidity, token_est_a, 0)
        }
        PositionStatus::InRange => {
            let liquidity = if is_input_a {
                get_liquidity_from_token_a(input_token_amount, pool.sqrt_price, sqrt_price_upper, false)?
            } else {
                get_liquidity_from_token_b(input_token_amount, sqrt_price_lower, pool.sqrt_price, false)?
            };
            let token_est_a = get_amount_delta_a(pool.sqrt_price, sqrt_price_upper, liquidity, true)?;
            let token_est_b = get_amount_delta_b(sqrt_price_lower, pool.sqrt_price, liquidity, true)?;
            (liquidity, token_est_a, token_est_b)
        }
        PositionStatus::AboveRange => {
            if is_input_a {
                return Ok(IncreaseLiquidityQuote::default());
            }
            let liquidity = get_liquidity_from_token_b(
                input_token_amount,
                sqrt_price_lower,
                sqrt_price_upper,
                false,
            )?;
            let token_est_b = get_amount_delta_b(sqrt_price_lower, sqrt_price_upper, liquidity, true)?;
            (liquidity, 0, token_est_b)
        }
    };

    Ok(IncreaseLiquidityQuote {
        liquidity_amount,
        token_max_a: adjust_for_slippage(token_est_a, slippage, true)?,
        token_max_b: adjust_for_slippage(token_est_b, slippage, true)?,
        token_est_a,
        token_est_b,
    })
}
