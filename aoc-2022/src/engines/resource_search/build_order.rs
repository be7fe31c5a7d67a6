//! Explicit-stack build-order search.

use thiserror::Error;
use tracing::{debug, trace};

use super::vector::Resources;
use super::{PruningConfig, SearchOutcome, SearchStats};

/// Actions are tracked in a `u64` bitmask
pub const MAX_ACTIONS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("target resource {target} does not exist among {kinds} kinds")]
    TargetOutOfRange { target: usize, kinds: usize },
    #[error("{0} actions exceed the limit of {MAX_ACTIONS}")]
    TooManyActions(usize),
}

/// Price of one action and the production rate it adds from the next tick on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCost<const N: usize> {
    pub cost: Resources<N>,
    pub yields: Resources<N>,
}

impl<const N: usize> ActionCost<N> {
    pub const fn new(cost: Resources<N>, yields: Resources<N>) -> Self {
        Self { cost, yields }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState<const N: usize> {
    pub tick: u32,
    pub held: Resources<N>,
    pub rates: Resources<N>,
    /// Actions that were affordable when this branch last waited
    pub idle_mask: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan<const N: usize> {
    actions: Vec<ActionCost<N>>,
    target: usize,
    max_cost: Resources<N>,
    max_target_yield: u32,
}

impl<const N: usize> BuildPlan<N> {
    /// `actions` are in priority order, most valuable first.
    pub fn new(actions: Vec<ActionCost<N>>, target: usize) -> Result<Self, PlanError> {
        if target >= N {
            return Err(PlanError::TargetOutOfRange { target, kinds: N });
        }
        if actions.len() > MAX_ACTIONS {
            return Err(PlanError::TooManyActions(actions.len()));
        }

        let mut max_cost = [0; N];
        for action in &actions {
            for (slot, cost) in max_cost.iter_mut().zip(action.cost.iter()) {
                *slot = (*slot).max(cost);
            }
        }
        let max_target_yield = actions
            .iter()
            .map(|a| a.yields[target])
            .max()
            .unwrap_or(0);

        Ok(Self {
            actions,
            target,
            max_cost: Resources::new(max_cost),
            max_target_yield,
        })
    }

    pub fn actions(&self) -> &[ActionCost<N>] {
        &self.actions
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Largest amount of each resource any single action costs
    pub fn max_cost(&self) -> &Resources<N> {
        &self.max_cost
    }

    /// True when the action only feeds non-target rates that can already pay
    /// for the most expensive action every tick.
    fn saturated(&self, action: &ActionCost<N>, rates: &Resources<N>) -> bool {
        action.yields[self.target] == 0
            && (0..N)
                .filter(|&kind| action.yields[kind] > 0)
                .all(|kind| rates[kind] >= self.max_cost[kind])
    }

    /// Best target amount reachable from `state` if a fresh producer were
    /// bought on every remaining tick.
    fn optimistic_bound(&self, state: &SearchState<N>, remaining: u32) -> u64 {
        let remaining = u64::from(remaining);
        let fresh = u64::from(self.max_target_yield)
            .saturating_mul(remaining)
            .saturating_mul(remaining.saturating_sub(1))
            / 2;
        u64::from(state.held[self.target])
            .saturating_add(u64::from(state.rates[self.target]).saturating_mul(remaining))
            .saturating_add(fresh)
    }

    /// Maximise the target resource held after `horizon` ticks.
    ///
    /// Each tick takes at most one affordable action: its cost is paid, the
    /// current rates are collected, then the action's yields join the rates.
    pub fn search(
        &self,
        horizon: u32,
        held: Resources<N>,
        rates: Resources<N>,
        config: &PruningConfig,
    ) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let mut best = 0;
        let mut best_rate = vec![0u32; horizon as usize + 1];
        let mut candidates: Vec<(usize, Resources<N>)> = Vec::with_capacity(self.actions.len());

        let mut stack = vec![SearchState {
            tick: 0,
            held,
            rates,
            idle_mask: 0,
        }];

        while let Some(state) = stack.pop() {
            stats.expanded += 1;

            if state.tick >= horizon {
                stats.terminals += 1;
                let value = state.held[self.target];
                if value > best {
                    trace!(value, held = %state.held, rates = %state.rates, "new best");
                    best = value;
                }
                continue;
            }

            let rate = state.rates[self.target];
            if let Some(limit) = config.rate_lag_limit {
                let seen = &mut best_rate[state.tick as usize];
                if rate > *seen {
                    *seen = rate;
                } else if *seen - rate >= limit {
                    stats.pruned_by_lag += 1;
                    continue;
                }
            }

            let remaining = horizon - state.tick;
            if config.upper_bound && self.optimistic_bound(&state, remaining) <= u64::from(best) {
                stats.pruned_by_bound += 1;
                continue;
            }

            candidates.clear();
            let mut affordable = 0u64;
            let mut forced = false;
            for (index, action) in self.actions.iter().enumerate() {
                let Some(paid) = state.held.checked_sub(&action.cost) else {
                    continue;
                };
                affordable |= 1 << index;

                if config.idle_skip && state.idle_mask & (1 << index) != 0 {
                    continue;
                }
                if config.saturation && self.saturated(action, &state.rates) {
                    continue;
                }
                if config.target_first && action.yields[self.target] > 0 {
                    candidates.clear();
                    candidates.push((index, paid));
                    forced = true;
                    break;
                }
                candidates.push((index, paid));
            }

            let tick = state.tick + 1;

            // Popped last, so explored after every action
            if !forced {
                stack.push(SearchState {
                    tick,
                    held: state.held + state.rates,
                    rates: state.rates,
                    idle_mask: affordable,
                });
            }
            for &(index, paid) in candidates.iter().rev() {
                stack.push(SearchState {
                    tick,
                    held: paid + state.rates,
                    rates: state.rates + self.actions[index].yields,
                    idle_mask: 0,
                });
            }
        }

        debug!(
            horizon,
            best,
            expanded = stats.expanded,
            terminals = stats.terminals,
            pruned_by_lag = stats.pruned_by_lag,
            pruned_by_bound = stats.pruned_by_bound,
            "build order search finished"
        );
        SearchOutcome { best, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Currency (0) buys currency producers or target (1) producers
    fn two_kind_plan() -> BuildPlan<2> {
        BuildPlan::new(
            vec![
                ActionCost::new(Resources::new([2, 0]), Resources::new([0, 1])),
                ActionCost::new(Resources::new([1, 0]), Resources::new([1, 0])),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_plan_validation() {
        assert_eq!(
            BuildPlan::<2>::new(vec![], 2),
            Err(PlanError::TargetOutOfRange { target: 2, kinds: 2 })
        );
        let many = vec![ActionCost::new(Resources::ZERO, Resources::unit(0)); 65];
        assert_eq!(
            BuildPlan::<2>::new(many, 0),
            Err(PlanError::TooManyActions(65))
        );
    }

    #[test]
    fn test_max_cost() {
        assert_eq!(*two_kind_plan().max_cost(), Resources::new([2, 0]));
    }

    #[test]
    fn test_zero_horizon_returns_held() {
        let plan = two_kind_plan();
        let outcome = plan.search(
            0,
            Resources::new([0, 7]),
            Resources::ZERO,
            &PruningConfig::exact(),
        );
        assert_eq!(outcome.best, 7);
        assert_eq!(outcome.stats.terminals, 1);
    }

    #[test]
    fn test_no_affordable_action_just_accumulates() {
        let plan = two_kind_plan();
        // Only waiting is possible, the target rate keeps paying out
        let outcome = plan.search(
            4,
            Resources::ZERO,
            Resources::new([0, 3]),
            &PruningConfig::exhaustive(),
        );
        assert_eq!(outcome.best, 12);
    }

    /// Target producers priced in a currency nobody earns
    fn unaffordable_plan() -> BuildPlan<2> {
        BuildPlan::new(
            vec![ActionCost::new(Resources::new([1, 0]), Resources::unit(1))],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_long_horizon_bound_does_not_overflow() {
        // 70_000 * 69_999 / 2 is past u32::MAX
        let outcome = unaffordable_plan().search(
            70_000,
            Resources::ZERO,
            Resources::new([0, 1]),
            &PruningConfig::exact(),
        );
        assert_eq!(outcome.best, 70_000);
    }

    #[test]
    fn test_held_amount_saturates() {
        let outcome = unaffordable_plan().search(
            3,
            Resources::new([0, u32::MAX - 1]),
            Resources::new([0, 1]),
            &PruningConfig::exact(),
        );
        assert_eq!(outcome.best, u32::MAX);
    }

    #[test]
    fn test_presets_agree_on_small_plan() {
        let plan = two_kind_plan();
        let start = Resources::new([1, 0]);
        let exhaustive = plan.search(7, Resources::ZERO, start, &PruningConfig::exhaustive());
        let exact = plan.search(7, Resources::ZERO, start, &PruningConfig::exact());
        let heuristic = plan.search(7, Resources::ZERO, start, &PruningConfig::default());

        assert_eq!(exact.best, exhaustive.best);
        assert!(heuristic.best <= exhaustive.best);
        assert!(exact.stats.expanded < exhaustive.stats.expanded);
    }

    #[test]
    fn test_search_is_deterministic() {
        let plan = two_kind_plan();
        let start = Resources::new([1, 0]);
        let first = plan.search(9, Resources::ZERO, start, &PruningConfig::default());
        let second = plan.search(9, Resources::ZERO, start, &PruningConfig::default());
        assert_eq!(first, second);
    }
}
