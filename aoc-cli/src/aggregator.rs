//! Result aggregator for ordering parallel solver results
//!
//! Results arrive in whatever order the workers finish. Each one is held
//! back until every key sorting before it has been emitted.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not emitted yet
    outstanding: BTreeSet<ResultKey>,
    /// Received results waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            outstanding: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(&next) = self.outstanding.first() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.outstanding.remove(&next);
            ready.push(result);
        }
        ready
    }

    /// Remaining buffered results in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        for key in self.pending.keys() {
            self.outstanding.remove(key);
        }
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.outstanding.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            check: None,
        }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(2022, 10, 1), key(2022, 10, 2)]);

        let ready = agg.add(make_result(key(2022, 10, 1)));
        assert_eq!(keys_of(&ready), [key(2022, 10, 1)]);

        let ready = agg.add(make_result(key(2022, 10, 2)));
        assert_eq!(keys_of(&ready), [key(2022, 10, 2)]);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new([key(2022, 12, 1), key(2022, 12, 2), key(2022, 16, 1)]);

        assert!(agg.add(make_result(key(2022, 12, 2))).is_empty());
        assert!(agg.add(make_result(key(2022, 16, 1))).is_empty());

        let ready = agg.add(make_result(key(2022, 12, 1)));
        assert_eq!(
            keys_of(&ready),
            [key(2022, 12, 1), key(2022, 12, 2), key(2022, 16, 1)]
        );
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new([key(2022, 19, 1), key(2022, 19, 2)]);
        agg.add(make_result(key(2022, 19, 2)));

        let remaining = agg.drain();
        assert_eq!(keys_of(&remaining), [key(2022, 19, 2)]);
        assert!(!agg.is_complete());
        assert!(agg.drain().is_empty());
    }

    proptest! {
        #[test]
        fn emits_every_permutation_sorted(
            keys in prop::collection::btree_set((2015u16..2026, 1u8..=25, 1u8..=2), 1..40)
                .prop_map(|set| set.into_iter().map(|(y, d, p)| key(y, d, p)).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(keys.iter().copied());
            let mut emitted = Vec::new();
            for &k in &keys {
                emitted.extend(agg.add(make_result(k)));
            }

            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys_of(&emitted), sorted);
            prop_assert!(agg.is_complete());
        }
    }
}
