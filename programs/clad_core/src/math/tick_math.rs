use crate::constants::{MAX_SQRT_PRICE_X64, MAX_TICK_INDEX, MIN_SQRT_PRICE_X64, MIN_TICK_INDEX};
use crate::errors::ErrorCode;
use primitive_types::U256;

/// `floor(2^96 * sqrt(1.0001)^(2^i))` for i in 0..19, used for non-negative ticks.
///
/// Positive factors are kept at 96 fractional bits so the product of the largest ones
/// still carries enough precision to land exactly on `MAX_SQRT_PRICE_X64`.
const POSITIVE_TICK_FACTORS_X96: [u128; 19] = [
    79232123823359799118286999567,
    79236085330515764027303304731,
    79244008939048815603706035061,
    79259858533276714757314932305,
    79291567232598584799939703904,
    79355022692464371645785046466,
    79482085999252804386437311141,
    79736823300114093921829183326,
    80248749790819932309965073892,
    81282483887344747381513967011,
    83390072131320151908154831281,
    87770609709833776024991924138,
    97234110755111693312479820773,
    119332217159966728226237229890,
    179736315981702064433883588727,
    407748233172238350107850275304,
    2098478828474011932436660412517,
    55581415166113811149459800483533,
    38992368544603139932233054999993551,
];

/// `floor(2^64 / sqrt(1.0001)^(2^i))` for i in 0..19, used for negative ticks.
const NEGATIVE_TICK_FACTORS_X64: [u128; 19] = [
    18445821805675392311,
    18444899583751176498,
    18443055278223354162,
    18439367220385604838,
    18431993317065449817,
    18417254355718160513,
    18387811781193591352,
    18329067761203520168,
    18212142134806087854,
    17980523815641551639,
    17526086738831147013,
    16651378430235024244,
    15030750278693429944,
    12247334978882834399,
    8131365268884726200,
    3584323654723342297,
    696457651847595233,
    26294789957452057,
    37481735321082,
];

/// `log_{sqrt(1.0001)}(2)` scaled by 2^32.
const LOG_B_2_X32: i128 = 59543866431248;

/// Error margins applied to the log estimate before truncating to a tick.
const LOG_B_P_ERR_MARGIN_LOWER_X64: i128 = 184467440737095516;
const LOG_B_P_ERR_MARGIN_UPPER_X64: i128 = 15793534762490258745;

/// Number of fractional bits resolved by the iterative log2.
const BIT_PRECISION: u32 = 14;

/// Converts a tick index to its sqrt price in Q64.64 format
///
/// Evaluates `sqrt(1.0001)^tick` by binary exponentiation over the bits of `|tick|`,
/// multiplying in one precomputed factor per set bit.
///
/// # Arguments
/// * `tick` - The tick index, within `[MIN_TICK_INDEX, MAX_TICK_INDEX]`
///
/// # Returns
/// * `Result<u128, ErrorCode>` - The sqrt price, or `InvalidTickIndex` if out of bounds
pub fn tick_index_to_sqrt_price_x64(tick: i32) -> Result<u128, ErrorCode> {
    if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick) {
        return Err(ErrorCode::InvalidTickIndex);
    }

    if tick >= 0 {
        Ok(sqrt_price_for_positive_tick(tick as u32))
    } else {
        Ok(sqrt_price_for_negative_tick(tick.unsigned_abs()))
    }
}

fn sqrt_price_for_positive_tick(tick: u32) -> u128 {
    let mut ratio = if tick & 1 != 0 {
        U256::from(POSITIVE_TICK_FACTORS_X96[0])
    } else {
        U256::one() << 96
    };

    for (i, factor) in POSITIVE_TICK_FACTORS_X96.iter().enumerate().skip(1) {
        if tick & (1 << i) != 0 {
            ratio = (ratio * U256::from(*factor)) >> 96;
        }
    }

    // Bounded by MAX_SQRT_PRICE_X64 << 32, so the shifted value fits in 128 bits
    (ratio >> 32).as_u128()
}

fn sqrt_price_for_negative_tick(abs_tick: u32) -> u128 {
    let mut ratio: u128 = if abs_tick & 1 != 0 {
        NEGATIVE_TICK_FACTORS_X64[0]
    } else {
        1u128 << 64
    };

    for (i, factor) in NEGATIVE_TICK_FACTORS_X64.iter().enumerate().skip(1) {
        if abs_tick & (1 << i) != 0 {
            // Both operands are below 2^64
            ratio = (ratio * factor) >> 64;
        }
    }

    ratio
}

/// Converts a sqrt price in Q64.64 format to the tick index at or below it
///
/// Estimates `log_{sqrt(1.0001)}(sqrt_price)` from an iterative base-2 logarithm, then
/// resolves the two candidate ticks left by the estimate's error margin with a single
/// forward conversion. The result is the largest tick whose sqrt price is less than or
/// equal to `sqrt_price_x64`.
///
/// # Arguments
/// * `sqrt_price_x64` - The sqrt price, within `[MIN_SQRT_PRICE_X64, MAX_SQRT_PRICE_X64]`
///
/// # Returns
/// * `Result<i32, ErrorCode>` - The tick index, or `PriceLimitExceeded` if out of bounds
pub fn sqrt_price_x64_to_tick_index(sqrt_price_x64: u128) -> Result<i32, ErrorCode> {
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(ErrorCode::PriceLimitExceeded);
    }

    let msb: u32 = 127 - sqrt_price_x64.leading_zeros();
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    // Normalize into [2^63, 2^64) so that squaring stays within 128 bits
    let mut r: u128 = if msb >= 64 {
        sqrt_price_x64 >> (msb - 63)
    } else {
        sqrt_price_x64 << (63 - msb)
    };

    let mut bit: i128 = 0x8000_0000_0000_0000;
    let mut log2p_fraction_x64: i128 = 0;
    for _ in 0..BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = (r >> 127) as u32;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
    }

    let log2p_x32 = log2p_integer_x32 + (log2p_fraction_x64 >> 32);
    let logbp_x64 = log2p_x32 * LOG_B_2_X32;

    let tick_low = ((logbp_x64 - LOG_B_P_ERR_MARGIN_LOWER_X64) >> 64) as i32;
    let tick_high = ((logbp_x64 + LOG_B_P_ERR_MARGIN_UPPER_X64) >> 64) as i32;

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    // tick_high never exceeds MAX_TICK_INDEX for an in-range price
    if tick_index_to_sqrt_price_x64(tick_high)? <= sqrt_price_x64 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Rounds a tick index toward zero to the nearest multiple of `tick_spacing`.
///
/// # Errors
/// * `InvalidTickSpacing` if `tick_spacing` is zero
pub fn get_initializable_tick_index(tick_index: i32, tick_spacing: u16) -> Result<i32, ErrorCode> {
    if tick_spacing == 0 {
        return Err(ErrorCode::InvalidTickSpacing);
    }
    let spacing = tick_spacing as i32;
    Ok(tick_index - tick_index % spacing)
}

