//! Memoization for sub-problems of a single query
//!
//! [`DpCache`] evaluates a [`DpProblem`] lazily and stores each answer by key,
//! so every key is computed once per cache. The two-agent route search uses it
//! to remember the best second-agent route per set of already-claimed valves.
//!
//! # Example
//!
//! ```rust
//! use aoc_2022::engines::memo::{DpCache, DpProblem};
//! use aoc_2022::engines::resource_search::ClaimSet;
//!
//! /// Total weight of the items not yet claimed
//! struct Unclaimed(Vec<u32>);
//!
//! impl DpProblem<ClaimSet, u32> for Unclaimed {
//!     fn compute(&self, claimed: &ClaimSet) -> u32 {
//!         (0..self.0.len())
//!             .filter(|&id| !claimed.contains(id))
//!             .map(|id| self.0[id])
//!             .sum()
//!     }
//! }
//!
//! let cache = DpCache::new(Unclaimed(vec![5, 7, 11]));
//! let claimed: ClaimSet = [1].into_iter().collect();
//! assert_eq!(cache.get(&claimed), 16);
//! assert_eq!(cache.get(&claimed), 16);
//! assert_eq!(cache.stats(), (1, 1));
//! ```

mod cache;
mod problem;

pub use cache::DpCache;
pub use problem::DpProblem;
