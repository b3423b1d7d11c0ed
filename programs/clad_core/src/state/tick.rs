use crate::constants::{MAX_TICK_INDEX, MAX_SWAP_TICK_ARRAYS, MIN_TICK_INDEX, TICK_ARRAY_SIZE, TICK_ARRAY_SIZE_USIZE};
use crate::errors::ErrorCode;
use anchor_lang::prelude::borsh;
use anchor_lang::prelude::{AnchorDeserialize, AnchorSerialize};

/// Liquidity and fee bookkeeping for one initializable tick.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Tick {
    /// Whether any position references this tick.
    pub initialized: bool,
    /// Liquidity added to the pool when the price crosses this tick upward.
    pub liquidity_net: i128,
    /// Total liquidity referencing this tick, regardless of side.
    pub liquidity_gross: u128,
    /// Liquidity currently lent out from this tick to open trade positions.
    pub liquidity_borrowed: u128,
    /// Token A fee growth on the side of this tick away from the current price, Q64.64.
    pub fee_growth_outside_a: u128,
    /// Token B fee growth on the side of this tick away from the current price, Q64.64.
    pub fee_growth_outside_b: u128,
}

/// New values for the mutable fields of a [`Tick`].
///
/// Managers compute these without touching the tick arrays; callers commit them with
/// [`TickArray::update_tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickUpdate {
    pub initialized: bool,
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
    pub liquidity_borrowed: u128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
}

impl From<Tick> for TickUpdate {
    fn from(tick: Tick) -> Self {
        TickUpdate {
            initialized: tick.initialized,
            liquidity_net: tick.liquidity_net,
            liquidity_gross: tick.liquidity_gross,
            liquidity_borrowed: tick.liquidity_borrowed,
            fee_growth_outside_a: tick.fee_growth_outside_a,
            fee_growth_outside_b: tick.fee_growth_outside_b,
        }
    }
}

impl Tick {
    pub fn update(&mut self, update: &TickUpdate) {
        self.initialized = update.initialized;
        self.liquidity_net = update.liquidity_net;
        self.liquidity_gross = update.liquidity_gross;
        self.liquidity_borrowed = update.liquidity_borrowed;
        self.fee_growth_outside_a = update.fee_growth_outside_a;
        self.fee_growth_outside_b = update.fee_growth_outside_b;
    }

    /// Checks that `tick_index` lies within the tick bounds and is a multiple of
    /// `tick_spacing`.
    pub fn check_is_usable_tick(tick_index: i32, tick_spacing: u16) -> bool {
        if tick_spacing == 0 || Tick::check_is_out_of_bounds(tick_index) {
            return false;
        }
        tick_index % tick_spacing as i32 == 0
    }

    pub fn check_is_out_of_bounds(tick_index: i32) -> bool {
        !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick_index)
    }
}

/// A contiguous run of `TICK_ARRAY_SIZE` tick slots.
///
/// Slot `i` holds the tick at `start_tick_index + i * tick_spacing`, so an array covers
/// `[start_tick_index, start_tick_index + TICK_ARRAY_SIZE * tick_spacing)`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct TickArray {
    pub start_tick_index: i32,
    pub tick_spacing: u16,
    pub ticks: [Tick; TICK_ARRAY_SIZE_USIZE],
}

impl TickArray {
    /// Creates an array with every tick uninitialized.
    ///
    /// # Errors
    /// * `InvalidTickSpacing` if `tick_spacing` is zero
    /// * `InvalidTickArrayStart` if the start is not aligned to the array width or the
    ///   array lies entirely outside the tick bounds
    pub fn new(start_tick_index: i32, tick_spacing: u16) -> Result<Self, ErrorCode> {
        if tick_spacing == 0 {
            return Err(ErrorCode::InvalidTickSpacing);
        }

        let ticks_in_array = TICK_ARRAY_SIZE * tick_spacing as i32;
        if start_tick_index % ticks_in_array != 0 {
            return Err(ErrorCode::InvalidTickArrayStart);
        }
        if start_tick_index > MAX_TICK_INDEX || start_tick_index + ticks_in_array <= MIN_TICK_INDEX
        {
            return Err(ErrorCode::InvalidTickArrayStart);
        }

        Ok(TickArray {
            start_tick_index,
            tick_spacing,
            ticks: [Tick::default(); TICK_ARRAY_SIZE_USIZE],
        })
    }

    /// Number of tick indices covered by the array.
    pub fn ticks_in_array(&self) -> i32 {
        TICK_ARRAY_SIZE * self.tick_spacing as i32
    }

    /// Exclusive upper end of the covered range.
    pub fn end_tick_index(&self) -> i32 {
        self.start_tick_index + self.ticks_in_array()
    }

    pub fn is_min_tick_array(&self) -> bool {
        self.start_tick_index <= MIN_TICK_INDEX
    }

    pub fn is_max_tick_array(&self) -> bool {
        self.end_tick_index() > MAX_TICK_INDEX
    }

    /// Whether a search may start from `tick_index` in this array.
    ///
    /// An upward search begins at the slot after the current tick, so the range is
    /// shifted down by one spacing when `shifted` is set.
    pub fn in_search_range(&self, tick_index: i32, shifted: bool) -> bool {
        let mut lower = self.start_tick_index;
        let mut upper = self.end_tick_index();
        if shifted {
            lower -= self.tick_spacing as i32;
            upper -= self.tick_spacing as i32;
        }
        tick_index >= lower && tick_index < upper
    }

    fn tick_offset(&self, tick_index: i32) -> Result<usize, ErrorCode> {
        if tick_index < self.start_tick_index
            || tick_index >= self.end_tick_index()
            || tick_index % self.tick_spacing as i32 != 0
        {
            return Err(ErrorCode::TickNotInArray);
        }
        Ok(((tick_index - self.start_tick_index) / self.tick_spacing as i32) as usize)
    }

    /// Returns the tick at `tick_index`.
    ///
    /// # Errors
    /// * `TickNotInArray` if the index is outside the array or not a multiple of the
    ///   tick spacing
    pub fn get_tick(&self, tick_index: i32) -> Result<&Tick, ErrorCode> {
        let offset = self.tick_offset(tick_index)?;
        Ok(&self.ticks[offset])
    }

    /// Returns the tick at `tick_index` only if it lives in this array and is initialized.
    pub fn get_initialized_tick(&self, tick_index: i32) -> Option<&Tick> {
        self.tick_offset(tick_index)
            .ok()
            .map(|offset| &self.ticks[offset])
            .filter(|tick| tick.initialized)
    }

    pub fn update_tick(&mut self, tick_index: i32, update: &TickUpdate) -> Result<(), ErrorCode> {
        let offset = self.tick_offset(tick_index)?;
        self.ticks[offset].update(update);
        Ok(())
    }

    /// Finds the nearest initialized tick in the scan direction within this array.
    ///
    /// Moving down (`a_to_b`) the tick at `tick_index` itself is a candidate; moving up
    /// the scan starts at the following slot.
    ///
    /// # Returns
    /// * `Ok(Some(index))` for the first initialized tick found
    /// * `Ok(None)` if the array holds no initialized tick in that direction
    /// * `Err(TickNotInArray)` if `tick_index` is outside the array's search range
    pub fn get_next_init_tick_index(
        &self,
        tick_index: i32,
        a_to_b: bool,
    ) -> Result<Option<i32>, ErrorCode> {
        if !self.in_search_range(tick_index, !a_to_b) {
            return Err(ErrorCode::TickNotInArray);
        }

        let spacing = self.tick_spacing as i32;
        let mut offset = (tick_index - self.start_tick_index).div_euclid(spacing);
        if !a_to_b {
            offset += 1;
        }

        while (0..TICK_ARRAY_SIZE).contains(&offset) {
            if self.ticks[offset as usize].initialized {
                return Ok(Some(self.start_tick_index + offset * spacing));
            }
            offset = if a_to_b { offset - 1 } else { offset + 1 };
        }

        Ok(None)
    }
}

/// Start index of the tick array containing `tick_index`.
///
/// # Errors
/// * `InvalidTickSpacing` if `tick_spacing` is zero
pub fn get_tick_array_start_index(tick_index: i32, tick_spacing: u16) -> Result<i32, ErrorCode> {
    if tick_spacing == 0 {
        return Err(ErrorCode::InvalidTickSpacing);
    }
    let ticks_in_array = TICK_ARRAY_SIZE * tick_spacing as i32;
    Ok(tick_index.div_euclid(ticks_in_array) * ticks_in_array)
}

/// Start indices of the tick arrays a swap from `tick_current_index` would traverse,
/// in traversal order.
///
/// Stops early at the tick bounds, so fewer than `MAX_SWAP_TICK_ARRAYS` indices are
/// returned near the ends of the price range.
pub fn get_tick_array_start_indices_for_swap(
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> Vec<i32> {
    let shift = if a_to_b { 0 } else { tick_spacing as i32 };
    let Ok(mut start_index) = get_tick_array_start_index(tick_current_index + shift, tick_spacing)
    else {
        return Vec::new();
    };
    let ticks_in_array = TICK_ARRAY_SIZE * tick_spacing as i32;

    let mut indices = Vec::with_capacity(MAX_SWAP_TICK_ARRAYS);
    while indices.len() < MAX_SWAP_TICK_ARRAYS
        && start_index <= MAX_TICK_INDEX
        && start_index + ticks_in_array > MIN_TICK_INDEX
    {
        indices.push(start_index);
        start_index = if a_to_b {
            start_index - ticks_in_array
        } else {
            start_index + ticks_in_array
        };
    }
    indices
}
