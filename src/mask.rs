//! Dense bit sets over component slots.
//!
//! Inclusion-exclusion and absorption spend their time on set unions and
//! subset tests. Components are first mapped to dense slots `0..n` with a
//! [`SlotIndex`], then every path or cut becomes a [`ComponentMask`] and those
//! operations reduce to word-wise `|` and `&`.

use std::collections::HashMap;

use crate::types::ComponentId;

/// A bit set backed by a vector of u64 words.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct ComponentMask {
    words: Vec<u64>,
}

impl ComponentMask {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty mask able to hold `capacity` slots without growing.
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
        }
    }

    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    /// Number of set bits.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        match self.words.get(word_idx) {
            Some(word) => word & (1u64 << bit_idx) != 0,
            None => false,
        }
    }

    /// Sets the bit at `index`. Returns true if it was not set before.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }
        let mask = 1u64 << bit_idx;
        let was_clear = self.words[word_idx] & mask == 0;
        self.words[word_idx] |= mask;
        was_clear
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &ComponentMask) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// Returns the union of two masks.
    pub fn union(&self, other: &ComponentMask) -> ComponentMask {
        let mut res = self.clone();
        res.union_with(other);
        res
    }

    /// Returns true if every bit of `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &ComponentMask) -> bool {
        self.words.iter().enumerate().all(|(i, &w)| {
            let o = other.words.get(i).copied().unwrap_or(0);
            w & !o == 0
        })
    }

    /// Iterates over set bit indices in ascending order.
    pub fn iter(&self) -> ComponentMaskIter<'_> {
        ComponentMaskIter {
            mask: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits in a [`ComponentMask`].
pub struct ComponentMaskIter<'a> {
    mask: &'a ComponentMask,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for ComponentMaskIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * ComponentMask::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.mask.words.len() {
                return None;
            }
            self.current_word = self.mask.words[self.word_idx];
        }
    }
}

/// Assigns dense slots to components in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    slots: HashMap<ComponentId, usize>,
    components: Vec<ComponentId>,
}

impl SlotIndex {
    /// Indexes every component appearing in `sets`.
    pub fn build<S: AsRef<[ComponentId]>>(sets: &[S]) -> Self {
        let mut index = SlotIndex::default();
        for set in sets {
            for &c in set.as_ref() {
                index.slot_or_insert(c);
            }
        }
        index
    }

    fn slot_or_insert(&mut self, component: ComponentId) -> usize {
        if let Some(&slot) = self.slots.get(&component) {
            return slot;
        }
        let slot = self.components.len();
        self.slots.insert(component, slot);
        self.components.push(component);
        slot
    }

    /// Number of distinct components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn slot(&self, component: ComponentId) -> Option<usize> {
        self.slots.get(&component).copied()
    }

    /// Components in slot order.
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Mask of the given components. Components not indexed are ignored.
    pub fn mask(&self, set: &[ComponentId]) -> ComponentMask {
        let mut mask = ComponentMask::new(self.len());
        for &c in set {
            if let Some(slot) = self.slot(c) {
                mask.insert(slot);
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_of(capacity: usize, bits: impl IntoIterator<Item = usize>) -> ComponentMask {
        let mut m = ComponentMask::new(capacity);
        for i in bits {
            m.insert(i);
        }
        m
    }

    #[test]
    fn test_empty() {
        let m = ComponentMask::new(10);
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
        assert!(!m.contains(0));
        assert!(!m.contains(100));
    }

    #[test]
    fn test_insert_contains() {
        let mut m = ComponentMask::new(100);
        assert!(m.insert(42));
        assert!(!m.insert(42));
        assert!(m.contains(42));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_auto_grow() {
        let mut m = ComponentMask::default();
        m.insert(1000);
        assert!(m.contains(1000));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_union_across_words() {
        let mut a = ComponentMask::new(10);
        a.insert(3);
        let mut b = ComponentMask::default();
        b.insert(70);
        b.insert(3);
        let u = a.union(&b);
        assert_eq!(u.iter().collect::<Vec<_>>(), vec![3, 70]);
        // `a` was not touched by `union`.
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_subset() {
        let a = mask_of(128, [1, 65]);
        let b = mask_of(10, [1]);
        assert!(b.is_subset_of(&a));
        assert!(!a.is_subset_of(&b));
        assert!(ComponentMask::default().is_subset_of(&b));
        assert!(a.is_subset_of(&a));
    }

    #[test]
    fn test_iter() {
        let m = mask_of(130, [5, 10, 3, 64, 65, 129]);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![3, 5, 10, 64, 65, 129]);
    }

    #[test]
    fn test_slot_index() {
        let index = SlotIndex::build(&[vec![7, 3], vec![3, -1]]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.components(), &[7, 3, -1]);
        assert_eq!(index.slot(-1), Some(2));
        assert_eq!(index.slot(4), None);

        let m = index.mask(&[-1, 7, 4]);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![0, 2]);
    }

}
