use std::fmt;

/// Set of claimed resource ids below [`ClaimSet::CAPACITY`], packed into a `u64`
///
/// Used as the memo key of the two-agent route search, so it is `Copy + Hash`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ClaimSet(u64);

impl ClaimSet {
    pub const CAPACITY: usize = 64;
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, id: usize) -> bool {
        self.0 & (1 << id) != 0
    }

    /// Copy of `self` with `id` added
    #[must_use]
    pub const fn with(self, id: usize) -> Self {
        Self(self.0 | 1 << id)
    }

    pub fn insert(&mut self, id: usize) {
        self.0 |= 1 << id;
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ids in ascending order
    pub fn iter(self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let id = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(id)
        })
    }
}

impl FromIterator<usize> for ClaimSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl fmt::Debug for ClaimSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
