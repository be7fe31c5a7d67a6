//! Depth-first search over build orders under accumulating resources
//!
//! A [`BuildPlan`] lists actions that trade held resources for extra
//! production rate. [`BuildPlan::search`] explores one action (or a wait) per
//! tick and maximises the amount of the target resource held at the horizon.
//! Which branches are cut is chosen with [`PruningConfig`]:
//!
//! - [`PruningConfig::default`]: fast, heuristic rate-lag pruning included
//! - [`PruningConfig::exact`]: only cuts that cannot lose the optimum
//! - [`PruningConfig::exhaustive`]: nothing cut, for cross-checking
//!
//! The valve-route variant in [`route`] shares the explicit-stack search
//! shape and adds a two-agent mode memoized on a [`ClaimSet`].
//!
//! ```
//! use aoc_2022::engines::resource_search::{ActionCost, BuildPlan, PruningConfig, Resources};
//!
//! // Resource 0 is currency, resource 1 is the target.
//! let plan = BuildPlan::new(
//!     vec![
//!         ActionCost::new(Resources::new([2, 0]), Resources::new([0, 1])),
//!         ActionCost::new(Resources::new([1, 0]), Resources::new([1, 0])),
//!     ],
//!     1,
//! )
//! .unwrap();
//!
//! let outcome = plan.search(5, Resources::ZERO, Resources::new([1, 0]), &PruningConfig::exact());
//! assert_eq!(outcome.best, 2);
//! ```

pub mod blueprint;
pub mod build_order;
pub mod claim_set;
pub mod route;
pub mod vector;

pub use blueprint::{Blueprint, BlueprintError};
pub use build_order::{ActionCost, BuildPlan, PlanError, SearchState};
pub use claim_set::ClaimSet;
pub use route::{RouteError, RouteNetwork};
pub use vector::Resources;

/// Which branch cuts [`BuildPlan::search`] applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruningConfig {
    /// Abandon a branch once its target rate trails the best rate seen at the
    /// same tick by at least this much. Heuristic: may lose the optimum.
    pub rate_lag_limit: Option<u32>,
    /// Skip actions that only raise rates already at the largest single-action cost.
    pub saturation: bool,
    /// When a target-producing action is affordable, take only that.
    /// Heuristic.
    pub target_first: bool,
    /// After waiting, skip actions that were already affordable before the wait.
    pub idle_skip: bool,
    /// Abandon a branch whose optimistic bound cannot beat the best found.
    pub upper_bound: bool,
}

impl PruningConfig {
    pub const fn exact() -> Self {
        Self {
            rate_lag_limit: None,
            saturation: true,
            target_first: false,
            idle_skip: true,
            upper_bound: true,
        }
    }

    pub const fn exhaustive() -> Self {
        Self {
            rate_lag_limit: None,
            saturation: false,
            target_first: false,
            idle_skip: false,
            upper_bound: false,
        }
    }

    /// Whether every enabled cut preserves the optimum
    pub fn is_exact(&self) -> bool {
        self.rate_lag_limit.is_none() && !self.target_first
    }
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self {
            rate_lag_limit: Some(2),
            saturation: true,
            target_first: true,
            idle_skip: true,
            upper_bound: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States popped from the stack
    pub expanded: u64,
    /// States that reached the horizon
    pub terminals: u64,
    pub pruned_by_lag: u64,
    pub pruned_by_bound: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Most target resource held at the horizon
    pub best: u32,
    pub stats: SearchStats,
}
