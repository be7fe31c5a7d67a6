//! Single-threaded memo cache.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;

use super::problem::DpProblem;

/// A memo cache with lazy evaluation.
///
/// Each key is computed at most once per cache; the cache is meant to live
/// for one top-level query and be dropped with it.
pub struct DpCache<I, K, P>
where
    P: DpProblem<I, K>,
{
    values: RefCell<HashMap<I, K>>,
    problem: P,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<I, K, P> DpCache<I, K, P>
where
    I: Hash + Eq + Clone,
    K: Clone,
    P: DpProblem<I, K>,
{
    pub fn new(problem: P) -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            problem,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Retrieves the value for `index`, computing it on first use.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.values.borrow().get(index) {
            self.hits.set(self.hits.get() + 1);
            return value.clone();
        }
        self.misses.set(self.misses.get() + 1);

        // No borrow is held while the problem runs
        let value = self.problem.compute(index);
        self.values
            .borrow_mut()
            .entry(index.clone())
            .or_insert(value)
            .clone()
    }

    /// `(hits, misses)` of `get` calls so far.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.get(), self.misses.get())
    }
}
