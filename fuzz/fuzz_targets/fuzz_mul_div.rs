#![no_main]

use arbitrary::Arbitrary;
use clad_core::math::{checked_mul_div, checked_mul_div_round_up};
use clad_core::ErrorCode;
use honggfuzz::fuzz;

#[derive(Debug, Clone, Arbitrary)]
struct MulDivInput {
    a: u128,
    b: u128,
    c: u128,
}

#[derive(Debug, Clone, Arbitrary)]
enum MulDivOp {
    Normal,
    RoundUp,
}

#[derive(Debug, Clone, Arbitrary)]
struct MulDivTest {
    input: MulDivInput,
    operation: MulDivOp,
}

fn check_error(error: ErrorCode, c: u128) {
    match error {
        ErrorCode::DivideByZero => assert_eq!(c, 0),
        ErrorCode::Overflow => assert!(c != 0),
        other => panic!("unexpected error {:?}", other),
    }
}

fn fuzz_mul_div_operations(test: MulDivTest) {
    let MulDivTest { input, operation } = test;
    let MulDivInput { a, b, c } = input;

    match operation {
        MulDivOp::Normal => match checked_mul_div(a, b, c) {
            Ok(value) => {
                assert!(c != 0);
                if a == 0 || b == 0 {
                    assert_eq!(value, 0);
                }
                if c == 1 {
                    if let Some(expected) = a.checked_mul(b) {
                        assert_eq!(value, expected);
                    }
                }
            }
            Err(error) => check_error(error, c),
        },

        MulDivOp::RoundUp => match checked_mul_div_round_up(a, b, c) {
            Ok(value) => {
                assert!(c != 0);
                if let Ok(floor) = checked_mul_div(a, b, c) {
                    assert!(value >= floor);
                    assert!(value - floor <= 1);
                }
                if a == 0 || b == 0 {
                    assert_eq!(value, 0);
                }
            }
            Err(error) => check_error(error, c),
        },
    }
}

fn main() {
    loop {
        fuzz!(|data: MulDivTest| {
            fuzz_mul_div_operations(data);
        });
    }
}
