use crate::constants::{MAX_SWAP_TICK_ARRAYS, MAX_TICK_INDEX, MIN_TICK_INDEX};
use crate::errors::ErrorCode;
use crate::state::{Tick, TickArray};

/// The window of tick arrays a swap is allowed to traverse.
///
/// Arrays are held in traversal order: descending start index for A to B swaps,
/// ascending for B to A. The window is bounded, so a swap that would move past the last
/// loaded array stops with `InsufficientLiquidity` instead of trading through ticks it
/// cannot see.
pub struct TickArraySequence<'a> {
    arrays: Vec<&'a TickArray>,
    tick_spacing: u16,
    a_to_b: bool,
}

impl<'a> TickArraySequence<'a> {
    /// # Errors
    /// * `InvalidTickArraySequence` if no arrays or more than `MAX_SWAP_TICK_ARRAYS` are
    ///   given, an array's spacing differs from `tick_spacing`, or the arrays are not
    ///   strictly ordered in the swap direction
    pub fn new(
        arrays: Vec<&'a TickArray>,
        tick_spacing: u16,
        a_to_b: bool,
    ) -> Result<Self, ErrorCode> {
        if arrays.is_empty() || arrays.len() > MAX_SWAP_TICK_ARRAYS {
            return Err(ErrorCode::InvalidTickArraySequence);
        }
        if arrays.iter().any(|array| array.tick_spacing != tick_spacing) {
            return Err(ErrorCode::InvalidTickArraySequence);
        }

        let ordered = arrays.windows(2).all(|pair| {
            if a_to_b {
                pair[0].start_tick_index > pair[1].start_tick_index
            } else {
                pair[0].start_tick_index < pair[1].start_tick_index
            }
        });
        if !ordered {
            return Err(ErrorCode::InvalidTickArraySequence);
        }

        Ok(Self {
            arrays,
            tick_spacing,
            a_to_b,
        })
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn a_to_b(&self) -> bool {
        self.a_to_b
    }

    /// Returns the tick at `tick_index` in the array at `array_index`, if that tick is
    /// initialized.
    pub fn get_initialized_tick(&self, array_index: usize, tick_index: i32) -> Option<&Tick> {
        self.arrays
            .get(array_index)
            .and_then(|array| array.get_initialized_tick(tick_index))
    }

    /// Finds the next tick the swap must stop at, searching from `tick_index` in the
    /// array at `array_index` onward.
    ///
    /// Returns the index of the array holding the result and the tick index. The result
    /// is the nearest initialized tick in the swap direction; failing that, the price
    /// bound on the array that contains it, or the outer edge of the last loaded array.
    ///
    /// # Errors
    /// * `TickNotInArray` if `tick_index` lies behind the array at `array_index`
    /// * `InsufficientLiquidity` if the search runs past the last loaded array
    pub fn get_next_initialized_tick_index(
        &self,
        tick_index: i32,
        start_array_index: usize,
    ) -> Result<(usize, i32), ErrorCode> {
        let spacing = self.tick_spacing as i32;
        let mut search_index = tick_index;
        let mut array_index = start_array_index;

        loop {
            let array = self
                .arrays
                .get(array_index)
                .ok_or(ErrorCode::InsufficientLiquidity)?;

            if !array.in_search_range(search_index, !self.a_to_b) {
                let is_beyond = if self.a_to_b {
                    search_index < array.start_tick_index
                } else {
                    search_index >= array.end_tick_index() - spacing
                };
                if is_beyond {
                    array_index += 1;
                    continue;
                }
                return Err(ErrorCode::TickNotInArray);
            }

            if let Some(next_index) = array.get_next_init_tick_index(search_index, self.a_to_b)? {
                return Ok((array_index, next_index));
            }

            if self.a_to_b && array.is_min_tick_array() {
                return Ok((array_index, MIN_TICK_INDEX));
            }
            if !self.a_to_b && array.is_max_tick_array() {
                return Ok((array_index, MAX_TICK_INDEX));
            }

            if array_index + 1 == self.arrays.len() {
                let boundary = if self.a_to_b {
                    array.start_tick_index
                } else {
                    array.end_tick_index() - 1
                };
                return Ok((array_index, boundary));
            }

            search_index = if self.a_to_b {
                array.start_tick_index - 1
            } else {
                array.end_tick_index() - 1
            };
            array_index += 1;
        }
    }
}
