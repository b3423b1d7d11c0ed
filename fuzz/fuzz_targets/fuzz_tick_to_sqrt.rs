#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use clad_core::constants::{MAX_SQRT_PRICE_X64, MAX_TICK_INDEX, MIN_SQRT_PRICE_X64, MIN_TICK_INDEX};
use clad_core::math::{sqrt_price_x64_to_tick_index, tick_index_to_sqrt_price_x64};
use clad_core::ErrorCode;
use honggfuzz::fuzz;

#[derive(Debug, Clone)]
struct TickInput {
    tick: i32,
}

impl<'a> Arbitrary<'a> for TickInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let tick = match u.int_in_range(0..=100)? {
            0..=80 => u.int_in_range(MIN_TICK_INDEX..=MAX_TICK_INDEX)?,
            81..=90 => *u.choose(&[MIN_TICK_INDEX, MAX_TICK_INDEX, 0, -1, 1])?,
            _ => u.arbitrary::<i32>()?,
        };

        Ok(TickInput { tick })
    }
}

fn fuzz_tick_to_sqrt(input: TickInput) {
    match tick_index_to_sqrt_price_x64(input.tick) {
        Ok(sqrt_price) => {
            assert!((MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&input.tick));
            assert!((MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price));

            // Conversion back lands on the same tick
            assert_eq!(sqrt_price_x64_to_tick_index(sqrt_price), Ok(input.tick));

            if input.tick < MAX_TICK_INDEX {
                let next = tick_index_to_sqrt_price_x64(input.tick + 1).unwrap();
                assert!(next > sqrt_price);
                assert_eq!(sqrt_price_x64_to_tick_index(next - 1), Ok(input.tick));
            }
        }
        Err(error) => {
            assert_eq!(error, ErrorCode::InvalidTickIndex);
            assert!(input.tick < MIN_TICK_INDEX || input.tick > MAX_TICK_INDEX);
        }
    }
}

fn main() {
    loop {
        fuzz!(|data: TickInput| {
            fuzz_tick_to_sqrt(data);
        });
    }
}
