//! Clad concentrated liquidity pricing engine.
//!
//! Pure, deterministic fixed-point computations for a CLMM pool: tick and price
//! conversion, swap simulation across pre-loaded tick arrays, liquidity quoting and
//! the bookkeeping for liquidity and leveraged trade positions. Nothing here touches
//! accounts or performs I/O; every operation takes state by reference and returns the
//! update the caller should commit.

// Modules for constants, errors, core math, and state definitions
pub mod constants;
pub mod errors;
pub mod math;
pub mod state;
pub mod tick_sequence;

// Stateful calculations built on top of the math kernel
pub mod manager;
pub mod quote;

pub use errors::ErrorCode;

#[cfg(test)]
pub mod unit_test;
