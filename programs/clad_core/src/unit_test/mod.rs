pub mod fixtures;

mod swap_manager_test;
mod swap_math_test;
