#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use clad_core::constants::{MAX_FEE_RATE, MAX_TICK_INDEX, MIN_TICK_INDEX};
use clad_core::math::{compute_swap_step, tick_index_to_sqrt_price_x64};
use honggfuzz::fuzz;

#[derive(Debug, Clone)]
struct SwapStepInput {
    amount_remaining: u64,
    fee_rate: u16,
    liquidity: u128,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
}

impl<'a> Arbitrary<'a> for SwapStepInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let a_to_b = u.arbitrary::<bool>()?;
        let tick_current = u.int_in_range(MIN_TICK_INDEX + 1..=MAX_TICK_INDEX - 1)?;
        let tick_target = if a_to_b {
            u.int_in_range(MIN_TICK_INDEX..=tick_current)?
        } else {
            u.int_in_range(tick_current..=MAX_TICK_INDEX)?
        };

        Ok(SwapStepInput {
            amount_remaining: u.arbitrary()?,
            fee_rate: u.int_in_range(0..=MAX_FEE_RATE)?,
            liquidity: u.int_in_range(0..=u64::MAX as u128)?,
            sqrt_price_current: tick_index_to_sqrt_price_x64(tick_current).unwrap(),
            sqrt_price_target: tick_index_to_sqrt_price_x64(tick_target).unwrap(),
            amount_specified_is_input: u.arbitrary()?,
            a_to_b,
        })
    }
}

fn fuzz_swap_step(input: SwapStepInput) {
    let result = compute_swap_step(
        input.amount_remaining,
        input.fee_rate,
        input.liquidity,
        input.sqrt_price_current,
        input.sqrt_price_target,
        input.amount_specified_is_input,
        input.a_to_b,
    );

    // Overflowing amounts are rejected rather than wrapped
    let Ok(step) = result else {
        return;
    };

    if input.amount_specified_is_input {
        assert!(step.amount_in as u128 + step.fee_amount as u128 <= input.amount_remaining as u128);
    } else {
        assert!(step.amount_out <= input.amount_remaining);
    }

    if input.a_to_b {
        assert!(step.next_sqrt_price <= input.sqrt_price_current);
        assert!(step.next_sqrt_price >= input.sqrt_price_target);
    } else {
        assert!(step.next_sqrt_price >= input.sqrt_price_current);
        assert!(step.next_sqrt_price <= input.sqrt_price_target);
    }

    if step.next_sqrt_price == input.sqrt_price_current {
        assert_eq!(step.amount_out, 0);
    }
}

fn main() {
    loop {
        fuzz!(|data: SwapStepInput| {
            fuzz_swap_step(data);
        });
    }
}
