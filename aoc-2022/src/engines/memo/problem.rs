//! Memo problem definition.

/// A keyed sub-problem whose answers are memoized by [`DpCache`](super::DpCache).
///
/// `compute` must be a pure function of the key.
pub trait DpProblem<I, K> {
    fn compute(&self, index: &I) -> K;
}
