#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use clad_core::constants::{MAX_TICK_INDEX, MIN_TICK_INDEX};
use clad_core::math::tick_index_to_sqrt_price_x64;
use clad_core::quote::get_token_amounts_from_liquidity;
use honggfuzz::fuzz;

#[derive(Debug, Clone)]
struct TokenAmountsInput {
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
    tick_ref: i32,
}

impl<'a> Arbitrary<'a> for TokenAmountsInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let tick_lower = u.int_in_range(MIN_TICK_INDEX..=MAX_TICK_INDEX - 1)?;
        let tick_upper = u.int_in_range(tick_lower + 1..=MAX_TICK_INDEX)?;

        Ok(TokenAmountsInput {
            liquidity: u.arbitrary()?,
            tick_lower,
            tick_upper,
            tick_ref: u.int_in_range(MIN_TICK_INDEX..=MAX_TICK_INDEX)?,
        })
    }
}

fn fuzz_token_amounts(input: TokenAmountsInput) {
    let lower = tick_index_to_sqrt_price_x64(input.tick_lower).unwrap();
    let upper = tick_index_to_sqrt_price_x64(input.tick_upper).unwrap();
    let reference = tick_index_to_sqrt_price_x64(input.tick_ref).unwrap();

    let (Ok(floor), Ok(ceil)) = (
        get_token_amounts_from_liquidity(input.liquidity, reference, lower, upper, false),
        get_token_amounts_from_liquidity(input.liquidity, reference, lower, upper, true),
    ) else {
        return;
    };

    assert!(ceil.token_a >= floor.token_a && ceil.token_a - floor.token_a <= 1);
    assert!(ceil.token_b >= floor.token_b && ceil.token_b - floor.token_b <= 1);

    if input.tick_ref < input.tick_lower {
        assert_eq!(floor.token_b, 0);
    }
    if input.tick_ref >= input.tick_upper {
        assert_eq!(floor.token_a, 0);
    }
}

fn main() {
    loop {
        fuzz!(|data: TokenAmountsInput| {
            fuzz_token_amounts(data);
        });
    }
}
