//! Reusable search and simulation engines behind the puzzle solutions
//!
//! - [`grid_relax`]: reverse breadth-first relaxation from a sink to the nearest goal cell
//! - [`cycle_sim`]: tick-by-tick instruction replay with render and sample callbacks
//! - [`resource_search`]: build-order search under accumulating resources, plus
//!   the memoized two-agent valve-route search
//! - [`memo`]: per-query memo cache used by the two-agent search

pub mod cycle_sim;
pub mod grid_relax;
pub mod memo;
pub mod resource_search;
