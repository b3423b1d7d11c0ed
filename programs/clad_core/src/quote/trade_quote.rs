use crate::errors::ErrorCode;
use crate::math::tick_index_to_sqrt_price_x64;
use crate::quote::liquidity_quote::get_token_amounts_from_liquidity;
use crate::state::{Pool, TradePosition};

/// Repayment preview for closing a trade position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CloseTradePositionQuote {
    /// Token A needed to restore the borrowed liquidity at the reference price.
    pub token_a_owed: u64,
    /// Token B needed to restore the borrowed liquidity at the reference price.
    pub token_b_owed: u64,
    /// The owed amount denominated in the loan token.
    pub loan_token_owed: u64,
    /// The owed amount denominated in the other pool token.
    pub other_token_owed: u64,
    /// Loan tokens the trader must buy on top of the unswapped loan tokens.
    pub loan_swap_needed: u64,
    /// Other tokens the trader must buy on top of the swap proceeds and collateral.
    pub other_swap_needed: u64,
}

/// Previews what closing `position` would cost if the pool traded at `sqrt_price_ref`.
///
/// The borrowed liquidity is valued with the same three-regime split used for
/// liquidity positions, rounded up since the trader is the one paying. Unswapped loan
/// tokens count toward the loan-token side; swap proceeds count toward the other side.
/// Collateral counts toward whichever side its mint belongs to.
///
/// # Errors
/// * `TradePositionNotOpen` if the position has no open trade
/// * `InvalidInputTokenMint` if the loan mint does not belong to `pool`
/// * `InvalidRepaymentAmount` if both tokens fall short, so one swap cannot close it
pub fn close_trade_position_quote(
    pool: &Pool,
    position: &TradePosition,
    sqrt_price_ref: u128,
) -> Result<CloseTradePositionQuote, ErrorCode> {
    if !position.is_trade_open {
        return Err(ErrorCode::TradePositionNotOpen);
    }

    let is_loan_a = pool
        .is_token_a(&position.token_mint_loan)
        .ok_or(ErrorCode::InvalidInputTokenMint)?;

    let sqrt_price_lower = tick_index_to_sqrt_price_x64(position.tick_lower_index)?;
    let sqrt_price_upper = tick_index_to_sqrt_price_x64(position.tick_upper_index)?;
    let owed = get_token_amounts_from_liquidity(
        position.liquidity_borrowed,
        sqrt_price_ref,
        sqrt_price_lower,
        sqrt_price_upper,
        true,
    )?;

    let (loan_token_owed, other_token_owed) = if is_loan_a {
        (owed.token_a, owed.token_b)
    } else {
        (owed.token_b, owed.token_a)
    };

    let mut loan_token_held = position.loan_token_available;
    let mut other_token_held = position.trade_token_amount;
    match pool.is_token_a(&position.collateral_mint) {
        Some(is_collateral_a) if is_collateral_a == is_loan_a => {
            loan_token_held = loan_token_held.saturating_add(position.collateral_amount);
        }
        Some(_) => {
            other_token_held = other_token_held.saturating_add(position.collateral_amount);
        }
        None => {}
    }

    let loan_swap_needed = loan_token_owed.saturating_sub(loan_token_held);
    let other_swap_needed = other_token_owed.saturating_sub(other_token_held);
    if loan_swap_needed > 0 && other_swap_needed > 0 {
        return Err(ErrorCode::InvalidRepaymentAmount);
    }

    Ok(CloseTradePositionQuote {
        token_a_owed: owed.token_a,
        token_b_owed: owed.token_b,
        loan_token_owed,
        other_token_owed,
        loan_swap_needed,
        other_swap_needed,
    })
}
