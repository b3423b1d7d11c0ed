/// Clad Core Protocol Constants
///
/// This module defines the protocol parameters and boundaries shared by the math
/// kernel, the swap engine and the quoting helpers. Every value here is part of the
/// deterministic pricing contract: changing one changes swap results bit for bit.

/// The minimum tick index supported in the protocol
///
/// At this tick the sqrt price equals `MIN_SQRT_PRICE_X64`.
pub const MIN_TICK_INDEX: i32 = -443636;

/// The maximum tick index supported in the protocol
///
/// At this tick the sqrt price equals `MAX_SQRT_PRICE_X64`.
pub const MAX_TICK_INDEX: i32 = 443636;

/// The minimum sqrt price, in Q64.64, reachable by any pool.
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;

/// The maximum sqrt price, in Q64.64, reachable by any pool.
pub const MAX_SQRT_PRICE_X64: u128 = 79226673515401279992447579055;

/// Number of fractional bits of a Q64.64 value.
pub const Q64_RESOLUTION: u8 = 64;

/// 1.0 in Q64.64.
pub const Q64: u128 = 1u128 << Q64_RESOLUTION;

/// Mask selecting the fractional bits of a Q64.64 value.
pub const Q64_MASK: u128 = 0xFFFF_FFFF_FFFF_FFFF;

/// Number of tick slots held by one tick array
pub const TICK_ARRAY_SIZE: i32 = 88;
pub const TICK_ARRAY_SIZE_USIZE: usize = 88;

/// Maximum number of tick arrays a single swap may traverse
pub const MAX_SWAP_TICK_ARRAYS: usize = 3;

/// Fee rate denominator
///
/// Pool fee rates are expressed in hundredths of a basis point, so a fee rate of
/// 3000 charges 3000/1_000_000 (0.3%) of every swap input.
pub const FEE_RATE_MUL_VALUE: u128 = 1_000_000;

/// Highest fee rate a pool may be configured with (6%).
pub const MAX_FEE_RATE: u16 = 60_000;

/// Protocol fee denominator
///
/// The protocol takes `protocol_fee_rate / 10_000` of every collected swap fee.
/// For example, a protocol fee rate of 300 routes 3% of fees to the protocol.
pub const PROTOCOL_FEE_RATE_MUL_VALUE: u128 = 10_000;

/// Highest protocol fee rate (25% of fees).
pub const MAX_PROTOCOL_FEE_RATE: u16 = 2_500;
