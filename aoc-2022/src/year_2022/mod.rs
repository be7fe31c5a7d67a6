//! Puzzle solvers for Advent of Code 2022

pub mod day_10;
pub mod day_12;
pub mod day_16;
pub mod day_19;
