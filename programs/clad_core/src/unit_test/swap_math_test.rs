use crate::constants::*;
use crate::math::*;

const SQRT_PRICE_TICK_64: u128 = 18505865242158250041;
const SQRT_PRICE_TICK_NEG_64: u128 = 18387811781193591352;

mod swap_math_tests {
    use super::*;

    mod exact_input_tests {
        use super::*;

        #[test]
        fn test_a_to_b_reaches_target() {
            let step = compute_swap_step(
                1_000_000_000,
                3000,
                1_000_000_000,
                Q64,
                SQRT_PRICE_TICK_NEG_64,
                true,
                true,
            )
            .unwrap();

            assert_eq!(
                step,
                SwapStepComputation {
                    amount_in: 3204965,
                    amount_out: 3194725,
                    next_sqrt_price: SQRT_PRICE_TICK_NEG_64,
                    fee_amount: 9644,
                }
            );
        }

        #[test]
        fn test_b_to_a_partial_without_fee() {
            let step = compute_swap_step(500, 0, 1_000_000_000, Q64, SQRT_PRICE_TICK_64, true, false)
                .unwrap();

            assert_eq!(step.amount_in, 500);
            assert_eq!(step.amount_out, 499, "Output rounds against the trader");
            assert_eq!(step.next_sqrt_price, 18446753297081588470);
            assert_eq!(step.fee_amount, 0);
        }

        #[test]
        fn test_b_to_a_partial_fee_is_remainder() {
            let step = compute_swap_step(
                1_000_000,
                3000,
                1_000_000_000_000,
                Q64,
                SQRT_PRICE_TICK_64,
                true,
                false,
            )
            .unwrap();

            assert_eq!(step.amount_in, 997000);
            assert_eq!(step.amount_out, 996999);
            assert_eq!(step.next_sqrt_price, 18446762465113393104);
            assert_eq!(
                step.amount_in + step.fee_amount,
                1_000_000,
                "A partial step consumes the whole remaining input"
            );
        }

        #[test]
        fn test_zero_liquidity_jumps_to_target() {
            let step = compute_swap_step(1000, 3000, 0, Q64, SQRT_PRICE_TICK_64, true, false).unwrap();

            assert_eq!(step.next_sqrt_price, SQRT_PRICE_TICK_64);
            assert_eq!(step.amount_in, 0);
            assert_eq!(step.amount_out, 0);
            assert_eq!(step.fee_amount, 0);
        }
    }

    mod exact_output_tests {
        use super::*;

        #[test]
        fn test_a_to_b_partial_output() {
            let step = compute_swap_step(
                1000,
                3000,
                1_000_000_000_000,
                Q64,
                SQRT_PRICE_TICK_NEG_64,
                false,
                true,
            )
            .unwrap();

            assert_eq!(
                step,
                SwapStepComputation {
                    amount_in: 1001,
                    amount_out: 1000,
                    next_sqrt_price: 18446744055262807542,
                    fee_amount: 4,
                }
            );
        }

        #[test]
        fn test_output_capped_at_remaining() {
            let step = compute_swap_step(
                3194725,
                3000,
                1_000_000_000,
                Q64,
                SQRT_PRICE_TICK_64,
                false,
                false,
            )
            .unwrap();

            assert!(step.amount_out <= 3194725);
            assert!(step.next_sqrt_price <= SQRT_PRICE_TICK_64);
        }
    }

    mod direction_tests {
        use super::*;

        #[test]
        fn test_price_moves_toward_target() {
            for (target, a_to_b) in [(SQRT_PRICE_TICK_NEG_64, true), (SQRT_PRICE_TICK_64, false)] {
                for is_input in [true, false] {
                    let step =
                        compute_swap_step(10_000, 3000, 1_000_000_000, Q64, target, is_input, a_to_b)
                            .unwrap();
                    if a_to_b {
                        assert!(step.next_sqrt_price < Q64 && step.next_sqrt_price >= target);
                    } else {
                        assert!(step.next_sqrt_price > Q64 && step.next_sqrt_price <= target);
                    }
                }
            }
        }
    }
}
