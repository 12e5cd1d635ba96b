use core::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{BitOr, BitOrAssign},
};

/// A value drawn from a small, closed, ordered universe.
///
/// Every member maps to a fixed bit position below `LIMIT`, which must not exceed 64.
pub trait Member: Copy {
    /// One past the highest bit position a member may occupy.
    const LIMIT: usize;

    fn index(self) -> usize;

    fn from_index(idx: usize) -> Option<Self>;
}

/// Fixed-size bitset over the universe of `M`.
///
/// Iteration is always in ascending bit order, which is also the candidate probing order.
pub struct IndexSet<M> {
    mask: u64,
    _member: PhantomData<M>,
}

impl<M: Member> IndexSet<M> {
    pub const fn empty() -> Self {
        Self {
            mask: 0,
            _member: PhantomData,
        }
    }

    pub fn single(member: M) -> Self {
        let mut set = Self::empty();
        set.insert(member);
        set
    }

    pub fn insert(&mut self, member: M) {
        debug_assert!(member.index() < M::LIMIT);
        self.mask |= 1u64 << member.index();
    }

    pub fn remove(&mut self, member: M) {
        self.mask &= !(1u64 << member.index());
    }

    pub fn contains(&self, member: M) -> bool {
        self.mask & (1u64 << member.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Members present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            mask: self.mask & other.mask,
            _member: PhantomData,
        }
    }

    /// Raw bit representation, bit `n` being the member with index `n`.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn iter(&self) -> IndexSetIter<M> {
        IndexSetIter {
            remaining: self.mask,
            _member: PhantomData,
        }
    }
}

pub struct IndexSetIter<M> {
    remaining: u64,
    _member: PhantomData<M>,
}

impl<M: Member> Iterator for IndexSetIter<M> {
    type Item = M;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining != 0 {
            let idx = self.remaining.trailing_zeros() as usize;
            self.remaining &= self.remaining - 1;
            if let Some(member) = M::from_index(idx) {
                return Some(member);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining.count_ones() as usize))
    }
}

impl<M: Member> IntoIterator for IndexSet<M> {
    type Item = M;
    type IntoIter = IndexSetIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<M: Member> FromIterator<M> for IndexSet<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut set = Self::empty();
        for member in iter {
            set.insert(member);
        }
        set
    }
}

impl<M: Member> BitOr for IndexSet<M> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            mask: self.mask | rhs.mask,
            _member: PhantomData,
        }
    }
}

impl<M: Member> BitOrAssign for IndexSet<M> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.mask |= rhs.mask;
    }
}

// Manual impls so that `M` itself needs none of these traits.

impl<M> Clone for IndexSet<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for IndexSet<M> {}

impl<M> PartialEq for IndexSet<M> {
    fn eq(&self, other: &Self) -> bool {
        self.mask == other.mask
    }
}

impl<M> Eq for IndexSet<M> {}

impl<M> PartialOrd for IndexSet<M> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for IndexSet<M> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.mask.cmp(&other.mask)
    }
}

impl<M> Hash for IndexSet<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mask.hash(state);
    }
}

impl<M> Default for IndexSet<M> {
    fn default() -> Self {
        Self {
            mask: 0,
            _member: PhantomData,
        }
    }
}

impl<M: Member + fmt::Display> fmt::Debug for IndexSet<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, member) in self.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member}")?;
        }
        f.write_str("}")
    }
}
