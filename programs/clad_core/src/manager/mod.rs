//! Stateful calculations over a pool and its tick arrays.
//!
//! Each manager computes an update value from borrowed state; the matching `apply_*` or
//! `sync_*` function commits it.
pub mod liquidity_manager;
pub mod loan_manager;
pub mod swap_manager;
pub mod tick_manager;

pub use liquidity_manager::*;
pub use loan_manager::*;
pub use swap_manager::*;
pub use tick_manager::*;
