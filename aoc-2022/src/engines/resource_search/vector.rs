//! Fixed-arity resource counts.

use std::fmt;
use std::ops::{Add, AddAssign, Index};

/// One non-negative count per resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resources<const N: usize>([u32; N]);

impl<const N: usize> Resources<N> {
    pub const ZERO: Self = Self([0; N]);

    pub const fn new(counts: [u32; N]) -> Self {
        Self(counts)
    }

    /// One unit of `kind` and nothing else
    pub fn unit(kind: usize) -> Self {
        let mut counts = [0; N];
        counts[kind] = 1;
        Self(counts)
    }

    /// Componentwise `self - other`, or `None` if any component would go negative
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut out = [0; N];
        for (slot, (a, b)) in out.iter_mut().zip(self.0.iter().zip(&other.0)) {
            *slot = a.checked_sub(*b)?;
        }
        Some(Self(out))
    }

    pub fn covers(&self, other: &Self) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn as_array(&self) -> &[u32; N] {
        &self.0
    }
}

impl<const N: usize> Default for Resources<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[u32; N]> for Resources<N> {
    fn from(counts: [u32; N]) -> Self {
        Self(counts)
    }
}

impl<const N: usize> Index<usize> for Resources<N> {
    type Output = u32;

    fn index(&self, kind: usize) -> &u32 {
        &self.0[kind]
    }
}

impl<const N: usize> Add for Resources<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

/// Saturates at `u32::MAX` per component
impl<const N: usize> AddAssign for Resources<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a = a.saturating_add(b);
        }
    }
}

impl<const N: usize> fmt::Display for Resources<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_sub_never_negative() {
        let held = Resources::new([4, 0, 2]);
        assert_eq!(
            held.checked_sub(&Resources::new([3, 0, 2])),
            Some(Resources::new([1, 0, 0]))
        );
        assert_eq!(held.checked_sub(&Resources::new([0, 1, 0])), None);
    }

    #[test]
    fn test_add_and_unit() {
        let rates = Resources::<3>::unit(0) + Resources::unit(2) + Resources::unit(2);
        assert_eq!(rates, Resources::new([1, 0, 2]));
        assert_eq!(rates[2], 2);
        assert!(rates.covers(&Resources::new([1, 0, 1])));
        assert!(!rates.covers(&Resources::new([0, 1, 0])));
        assert_eq!(rates.to_string(), "[1, 0, 2]");
    }

    #[test]
    fn test_add_saturates() {
        let mut held = Resources::new([u32::MAX - 1, 5]);
        held += Resources::new([3, 1]);
        assert_eq!(held, Resources::new([u32::MAX, 6]));
    }
}
