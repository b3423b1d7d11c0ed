/// Clad Core Math Library
///
/// Fixed-point kernel for the pricing engine. Prices are square roots stored in Q64.64,
/// liquidity is an unsigned 128-bit quantity and token amounts are u64. Every
/// operation is checked: results that do not fit their declared width fail instead of
/// wrapping, and rounding direction is always explicit.
pub mod bit_math;
pub mod liquidity_math;
pub mod swap_math;
pub mod tick_math;
pub mod token_math;

pub use bit_math::*;
pub use liquidity_math::*;
pub use swap_math::*;
pub use tick_math::*;
pub use token_math::*;
