use crate::errors::ErrorCode;
use crate::state::{Pool, Tick};
use anchor_lang::prelude::borsh;
use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize};

/// A liquidity provider's stake in a tick range.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct LiquidityPosition {
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    pub liquidity: u128,
    /// Fee growth inside the range when fees were last settled, Q64.64.
    pub fee_growth_checkpoint_a: u128,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LiquidityPositionUpdate {
    pub liquidity: u128,
    pub fee_growth_checkpoint_a: u128,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

impl LiquidityPosition {
    /// Opens an empty position over `[tick_lower_index, tick_upper_index)`.
    ///
    /// # Errors
    /// * `InvalidTickIndex` if either tick is not usable with the pool's spacing or the
    ///   range is empty
    pub fn open_position(
        &mut self,
        pool: &Pool,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<(), ErrorCode> {
        validate_position_ticks(pool.tick_spacing, tick_lower_index, tick_upper_index)?;

        self.tick_lower_index = tick_lower_index;
        self.tick_upper_index = tick_upper_index;
        Ok(())
    }

    pub fn update(&mut self, update: &LiquidityPositionUpdate) {
        self.liquidity = update.liquidity;
        self.fee_growth_checkpoint_a = update.fee_growth_checkpoint_a;
        self.fee_growth_checkpoint_b = update.fee_growth_checkpoint_b;
        self.fee_owed_a = update.fee_owed_a;
        self.fee_owed_b = update.fee_owed_b;
    }

    pub fn is_position_empty(&self) -> bool {
        self.liquidity == 0 && self.fee_owed_a == 0 && self.fee_owed_b == 0
    }

    pub fn reset_fees_owed(&mut self) {
        self.fee_owed_a = 0;
        self.fee_owed_b = 0;
    }
}

pub(crate) fn validate_position_ticks(
    tick_spacing: u16,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<(), ErrorCode> {
    if !Tick::check_is_usable_tick(tick_lower_index, tick_spacing)
        || !Tick::check_is_usable_tick(tick_upper_index, tick_spacing)
        || tick_lower_index >= tick_upper_index
    {
        return Err(ErrorCode::InvalidTickIndex);
    }
    Ok(())
}
