use crate::constants::*;
use crate::errors::ErrorCode;
use crate::manager::*;
use crate::math::tick_index_to_sqrt_price_x64;
use crate::tick_sequence::TickArraySequence;
use crate::unit_test::fixtures::*;

mod swap_manager_tests {
    use super::*;

    mod compute_swap_tests {
        use super::*;

        #[test]
        fn test_b_to_a_exact_input_crosses_tick() {
            let pool = reference_pool();
            let (array_0, _, array_pos) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_pos], TEST_TICK_SPACING, false)
                    .unwrap();

            let update =
                compute_swap(&pool, &sequence, 50_000_000, MAX_SQRT_PRICE_X64, true, false)
                    .unwrap();

            assert_eq!(update.amount_a, 49421912);
            assert_eq!(update.amount_b, 50_000_000);
            assert_eq!(update.next_tick_index, 160);
            assert_eq!(update.next_sqrt_price, 18595003003304920670);
            assert_eq!(
                update.next_liquidity, 7_000_000_000,
                "Crossing tick 64 upward activates the second position"
            );
            assert_eq!(update.next_fee_growth_global, 432738479876337);
            assert_eq!(update.next_protocol_fee, 4499);
            assert_eq!(update.total_fee_amount, 150001);
            assert_eq!(
                update.tick_updates.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
                vec![64]
            );
        }

        #[test]
        fn test_a_to_b_exact_input_within_interval() {
            let pool = reference_pool();
            let (array_0, array_neg, _) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_neg], TEST_TICK_SPACING, true)
                    .unwrap();

            let update =
                compute_swap(&pool, &sequence, 50_000_000, MIN_SQRT_PRICE_X64, true, true)
                    .unwrap();

            assert_eq!(update.amount_a, 50_000_000);
            assert_eq!(update.amount_b, 49357901);
            assert_eq!(update.next_tick_index, -199);
            assert_eq!(update.next_sqrt_price, 18264645557501264014);
            assert_eq!(update.next_liquidity, 5_000_000_000);
            assert_eq!(update.next_fee_growth_global, 536800252544947);
            assert_eq!(update.next_protocol_fee, 4500);
            assert_eq!(update.total_fee_amount, 150000);
            assert!(update.tick_updates.is_empty());
        }

        #[test]
        fn test_b_to_a_exact_output() {
            let pool = reference_pool();
            let (array_0, _, array_pos) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_pos], TEST_TICK_SPACING, false)
                    .unwrap();

            let update =
                compute_swap(&pool, &sequence, 30_000_000, MAX_SQRT_PRICE_X64, false, false)
                    .unwrap();

            assert_eq!(update.amount_a, 30_000_000, "The requested output is delivered exactly");
            assert_eq!(update.amount_b, 30260465, "Input includes the fee");
            assert_eq!(update.next_tick_index, 104);
            assert_eq!(update.next_sqrt_price, 18543140464516686222);
            assert_eq!(update.next_liquidity, 7_000_000_000);
            assert_eq!(update.next_fee_growth_global, 281367133256630);
            assert_eq!(update.next_protocol_fee, 2722);
            assert_eq!(update.total_fee_amount, 90783);
        }

        #[test]
        fn test_stops_at_price_limit() {
            let pool = reference_pool();
            let (array_0, array_neg, _) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_neg], TEST_TICK_SPACING, true)
                    .unwrap();
            let limit = tick_index_to_sqrt_price_x64(-64).unwrap();

            let update = compute_swap(&pool, &sequence, 50_000_000, limit, true, true).unwrap();

            assert_eq!(update.amount_a, 16073045, "Only the input needed to reach the limit is used");
            assert_eq!(update.amount_b, 15973629);
            assert_eq!(update.next_sqrt_price, limit);
            assert_eq!(update.next_tick_index, -64);
            assert_eq!(update.next_fee_growth_global, 172565601460738);
            assert_eq!(update.next_protocol_fee, 1446);
            assert_eq!(update.total_fee_amount, 48220);
        }

        #[test]
        fn test_limit_at_current_price_is_noop() {
            let pool = reference_pool();
            let (array_0, array_neg, _) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_neg], TEST_TICK_SPACING, true)
                    .unwrap();

            let update = compute_swap(&pool, &sequence, 1000, pool.sqrt_price, true, true).unwrap();

            assert_eq!(update.amount_a, 0);
            assert_eq!(update.amount_b, 0);
            assert_eq!(update.next_sqrt_price, pool.sqrt_price);
            assert_eq!(update.next_tick_index, pool.tick_current_index);
        }

        #[test]
        fn test_invalid_parameters() {
            let pool = reference_pool();
            let (array_0, array_neg, _) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_neg], TEST_TICK_SPACING, true)
                    .unwrap();

            assert_eq!(
                compute_swap(&pool, &sequence, 0, MIN_SQRT_PRICE_X64, true, true),
                Err(ErrorCode::ZeroTradableAmount)
            );
            assert_eq!(
                compute_swap(&pool, &sequence, 1000, MIN_SQRT_PRICE_X64 - 1, true, true),
                Err(ErrorCode::PriceLimitExceeded)
            );
            assert_eq!(
                compute_swap(&pool, &sequence, 1000, MAX_SQRT_PRICE_X64, true, true),
                Err(ErrorCode::InvalidSqrtPriceLimitDirection)
            );
            assert_eq!(
                compute_swap(&pool, &sequence, 1000, MAX_SQRT_PRICE_X64, true, false),
                Err(ErrorCode::InvalidTickArraySequence),
                "A downward sequence cannot serve an upward swap"
            );
        }

        #[test]
        fn test_runs_out_of_tick_arrays() {
            let pool = reference_pool();
            let (array_0, _, _) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0], TEST_TICK_SPACING, false).unwrap();

            assert_eq!(
                compute_swap(&pool, &sequence, 1_000_000_000_000_000, MAX_SQRT_PRICE_X64, true, false),
                Err(ErrorCode::InsufficientLiquidity)
            );
        }

        #[test]
        fn test_corrupted_tick_data() {
            let sqrt_price = tick_index_to_sqrt_price_x64(100).unwrap();
            let pool = create_pool(
                sqrt_price,
                TEST_TICK_SPACING,
                TEST_FEE_RATE,
                TEST_PROTOCOL_FEE_RATE,
                100,
            );
            let array = create_tick_array(0, TEST_TICK_SPACING, &[(64, 1000)]);
            let sequence = TickArraySequence::new(vec![&array], TEST_TICK_SPACING, true).unwrap();

            assert_eq!(
                compute_swap(&pool, &sequence, 1_000_000, MIN_SQRT_PRICE_X64, true, true),
                Err(ErrorCode::CorruptedTickData),
                "Crossing down removes more liquidity than is active"
            );
        }
    }

    mod protocol_fee_tests {
        use super::*;

        #[test]
        fn test_calculate_protocol_fee() {
            assert_eq!(calculate_protocol_fee(150001, 300), Ok(4500));
            assert_eq!(calculate_protocol_fee(33, 300), Ok(0), "Rounds down");
            assert_eq!(calculate_protocol_fee(10_000, 0), Ok(0));
        }

        #[test]
        fn test_protocol_fee_rate_above_denominator_fails() {
            // Snapshots bypass the rate checks in `Pool::initialize`
            let mut pool = reference_pool();
            pool.protocol_fee_rate = 20_000;
            let (array_0, _, array_pos) = reference_tick_arrays();
            let sequence =
                TickArraySequence::new(vec![&array_0, &array_pos], TEST_TICK_SPACING, false)
                    .unwrap();

            assert_eq!(
                compute_swap(&pool, &sequence, 1_000_000, MAX_SQRT_PRICE_X64, true, false),
                Err(ErrorCode::Overflow)
            );
        }
    }

    mod apply_swap_tests {
        use super::*;

        #[test]
        fn test_apply_swap_commits_state() {
            let mut pool = reference_pool();
            let (array_0, _, array_pos) = reference_tick_arrays();
            let update = {
                let sequence =
                    TickArraySequence::new(vec![&array_0, &array_pos], TEST_TICK_SPACING, false)
                        .unwrap();
                compute_swap(&pool, &sequence, 50_000_000, MAX_SQRT_PRICE_X64, true, false)
                    .unwrap()
            };
            let mut arrays = vec![array_0, array_pos];

            apply_swap(&mut pool, &mut arrays, &update, false).unwrap();

            assert_eq!(pool.sqrt_price, update.next_sqrt_price);
            assert_eq!(pool.tick_current_index, 160);
            assert_eq!(pool.liquidity_available, 7_000_000_000);
            assert_eq!(pool.fee_growth_global_b, 432738479876337);
            assert_eq!(pool.fee_growth_global_a, 0);
            assert_eq!(pool.protocol_fee_owed_b, 4499);
            assert_eq!(pool.protocol_fee_owed_a, 0);

            let crossed = arrays[0].get_tick(64).unwrap();
            assert!(crossed.fee_growth_outside_b > 0);
            assert!(crossed.fee_growth_outside_b < pool.fee_growth_global_b);
            assert_eq!(crossed.fee_growth_outside_a, 0);
            assert_eq!(crossed.liquidity_net, 2_000_000_000, "Crossing leaves liquidity untouched");
        }

        #[test]
        fn test_apply_swap_missing_tick_array() {
            let mut pool = reference_pool();
            let (array_0, _, array_pos) = reference_tick_arrays();
            let update = {
                let sequence =
                    TickArraySequence::new(vec![&array_0, &array_pos], TEST_TICK_SPACING, false)
                        .unwrap();
                compute_swap(&pool, &sequence, 50_000_000, MAX_SQRT_PRICE_X64, true, false)
                    .unwrap()
            };
            let original = pool;
            let mut arrays = vec![array_pos];

            assert_eq!(
                apply_swap(&mut pool, &mut arrays, &update, false),
                Err(ErrorCode::TickNotInArray)
            );
            assert_eq!(pool, original, "A failed apply leaves the pool untouched");
        }
    }
}
