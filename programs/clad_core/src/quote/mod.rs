pub mod liquidity_quote;
pub mod trade_quote;

pub use liquidity_quote::*;
pub use trade_quote::*;
