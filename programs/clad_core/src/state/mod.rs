pub mod liquidity_position;
pub mod pool;
pub mod tick;
pub mod trade_position;

pub use liquidity_position::*;
pub use pool::*;
pub use tick::*;
pub use trade_position::*;
