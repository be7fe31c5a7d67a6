//! Advent of Code 2022 solutions on top of reusable engines
//!
//! [`engines`] holds the generic algorithms: grid relaxation, the cycle
//! simulator and the resource-allocation search. The `solutions` feature adds
//! [`year_2022`], whose day solvers register themselves with the solver
//! framework through `AutoRegisterSolver`.

pub mod engines;

#[cfg(feature = "solutions")]
pub mod year_2022;
