//! Fixed-capacity bit sets over vertex and full-set index domains.

use serde::{Deserialize, Serialize};

const WORD_BITS: usize = u64::BITS as usize;

/// Dense set of integers in `0..capacity`.
///
/// The capacity is fixed at construction; indices at or beyond it are never
/// members. Out-of-range `set` calls are ignored and `test` reports `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet {
    capacity: usize,
    words: Vec<u64>,
}

impl BitSet {
    /// Creates an empty set able to hold indices `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: vec![0; capacity.div_ceil(WORD_BITS)],
        }
    }

    /// Creates a set containing every index in `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        set.words.fill(u64::MAX);
        set.mask_tail();
        set
    }

    /// Creates a set holding the provided indices.
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        for index in indices {
            set.set(index);
        }
        set
    }

    /// Returns the size of the index domain.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether `index` is a member.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & bit(index) != 0
    }

    /// Adds `index` to the set.
    #[inline]
    pub fn set(&mut self, index: usize) {
        if index < self.capacity {
            self.words[index / WORD_BITS] |= bit(index);
        }
    }

    /// Removes `index` from the set.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        if index < self.capacity {
            self.words[index / WORD_BITS] &= !bit(index);
        }
    }

    /// Removes every member.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Intersects the set with `other` in place.
    ///
    /// Indices beyond the capacity of `other` are removed.
    pub fn and_with(&mut self, other: &BitSet) {
        for (idx, word) in self.words.iter_mut().enumerate() {
            *word &= other.words.get(idx).copied().unwrap_or(0);
        }
    }

    /// Returns the number of members.
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Returns the lowest member at or after `start`.
    pub fn next_set(&self, start: usize) -> Option<usize> {
        if start >= self.capacity {
            return None;
        }
        let mut word_idx = start / WORD_BITS;
        let mut word = self.words[word_idx] & (u64::MAX << (start % WORD_BITS));
        loop {
            if word != 0 {
                return Some(word_idx * WORD_BITS + word.trailing_zeros() as usize);
            }
            word_idx += 1;
            if word_idx >= self.words.len() {
                return None;
            }
            word = self.words[word_idx];
        }
    }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = 0;
        std::iter::from_fn(move || {
            let found = self.next_set(cursor)?;
            cursor = found + 1;
            Some(found)
        })
    }

    /// Returns a copy re-sized to `capacity`, dropping members beyond it.
    pub fn resized(&self, capacity: usize) -> BitSet {
        let mut out = BitSet::new(capacity);
        let shared = out.words.len().min(self.words.len());
        out.words[..shared].copy_from_slice(&self.words[..shared]);
        out.mask_tail();
        out
    }

    fn mask_tail(&mut self) {
        let tail = self.capacity % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}

#[inline]
const fn bit(index: usize) -> u64 {
    1u64 << (index % WORD_BITS)
}
