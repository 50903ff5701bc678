//! Advent of Code 2024 solutions with automatic registration
//!
//! Solutions register themselves through `#[derive(AutoRegisterSolver)]`;
//! linking this crate is enough for
//! [`aoc_solver::SolverRegistryBuilder::register_all_plugins`] to find them.

pub mod utils;

#[cfg(feature = "year-2024")]
pub mod year_2024;
