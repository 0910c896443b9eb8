//! Fixed-size bit set over the input space.
//!
//! Bit `k` stands for the concrete input `Pattern::from_index(k, n)`. The completion
//! engine uses it to record which inputs are covered by some explicit row.

/// A bit set of fixed capacity backed by `u64` words.
#[derive(Debug, Clone)]
pub struct BitSet {
    words: Vec<u64>,
    capacity: usize,
    count: usize,
}

impl BitSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty set able to hold indices `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            capacity,
            count: 0,
        }
    }

    /// Number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if every index in `0..capacity` is set.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let (word, bit) = Self::word_and_bit(index);
        self.words[word] & (1u64 << bit) != 0
    }

    /// Sets the bit at `index`. Returns `true` if it was not previously set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.capacity, "Index {} out of range 0..{}", index, self.capacity);
        let (word, bit) = Self::word_and_bit(index);
        let mask = 1u64 << bit;
        let was_clear = self.words[word] & mask == 0;
        if was_clear {
            self.words[word] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Iterates over the indices in `0..capacity` that are *not* set, in increasing order.
    pub fn iter_unset(&self) -> UnsetIter<'_> {
        UnsetIter {
            bitset: self,
            word_idx: 0,
            current_word: self.words.first().map_or(0, |w| !w),
        }
    }
}

/// Iterator over clear bits in a [`BitSet`].
pub struct UnsetIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for UnsetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1;
                let index = self.word_idx * BitSet::BITS_PER_WORD + bit;
                // Padding bits of the last word are clear but outside the set.
                if index >= self.bitset.capacity {
                    return None;
                }
                return Some(index);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = !self.bitset.words[self.word_idx];
        }
    }
}
