//! Iterators over the set bits of a `BitSet`.
//!
//! Only the stored prefix is enumerated. The infinite run of ones above a
//! negative value is not.

use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    iter::{FromIterator, FusedIterator},
};

use crate::{
    BitSet,
    macros::bitpos,
    storage::{WORD_BITS, low_mask, rtrim},
};

/// A borrowing iterator over the indices of set bits in a [`BitSet`].
///
/// Created by [`BitSet::iter`].
pub type Iter<'a> = BitIter<&'a [u64]>;

/// An owning iterator over the indices of set bits in a [`BitSet`].
///
/// Created by the [`IntoIterator`] implementation for [`BitSet`].
pub type IntoIter = BitIter<Vec<u64>>;

/// An iterator over the indices of set bits in a word slice.
///
/// Double-ended and exact-size. `S` is either a borrowed slice or an owned
/// vector of words.
///
/// # Examples
///
/// ```
/// use signed_bitset::BitSet;
///
/// // ...1111_0110
/// let bits = BitSet::from(-10);
/// let low: Vec<_> = bits.iter().take(3).collect();
/// assert_eq!(low, vec![1, 2, 4]);
///
/// let mut iter = bits.iter();
/// assert_eq!(iter.len(), 62);
/// assert_eq!(iter.next_back(), Some(63));
/// ```
#[derive(Clone, Debug)]
pub struct BitIter<S: Borrow<[u64]>> {
    pub(crate) words: S,
    /// Next bit to look at from the front.
    pub(crate) pos: usize,
    /// One past the next bit to look at from the back.
    pub(crate) rpos: usize,
}

impl<S: Borrow<[u64]>> BitIter<S> {
    pub(crate) fn new(words: S) -> Self {
        let rpos = words.borrow().len() * WORD_BITS;
        Self { words, pos: 0, rpos }
    }
}

impl<S: Borrow<[u64]>> Iterator for BitIter<S> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let slice = self.words.borrow();

        while self.pos < self.rpos {
            let (mut wi, bi) = bitpos!(self.pos);
            let word = slice[wi] >> bi;
            if word == 0 {
                wi += 1;
                while wi < slice.len() && slice[wi] == 0 {
                    wi += 1;
                }
                self.pos = wi * WORD_BITS;
                continue;
            }

            let result = self.pos + word.trailing_zeros() as usize;
            if result >= self.rpos {
                self.pos = self.rpos;
                return None;
            }
            self.pos = result + 1;
            return Some(result);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<S: Borrow<[u64]>> ExactSizeIterator for BitIter<S> {
    fn len(&self) -> usize {
        if self.pos >= self.rpos {
            return 0;
        }

        let slice = self.words.borrow();
        let (wmin, bmin) = bitpos!(self.pos);
        let (wmax, bmax) = bitpos!(self.rpos - 1);

        (wmin..=wmax)
            .map(|wi| {
                let lo = if wi == wmin { bmin } else { 0 };
                let hi = if wi == wmax { bmax + 1 } else { WORD_BITS };
                (slice[wi] & low_mask(hi) & !low_mask(lo)).count_ones() as usize
            })
            .sum()
    }
}

impl<S: Borrow<[u64]>> FusedIterator for BitIter<S> {}

impl<S: Borrow<[u64]>> DoubleEndedIterator for BitIter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let slice = self.words.borrow();

        while self.rpos > self.pos {
            let (wi, bi) = bitpos!(self.rpos - 1);
            let word = slice[wi] & low_mask(bi + 1);
            if word == 0 {
                self.rpos = wi * WORD_BITS;
                continue;
            }

            let result = wi * WORD_BITS + (WORD_BITS - 1 - word.leading_zeros() as usize);
            if result < self.pos {
                self.rpos = self.pos;
                return None;
            }
            self.rpos = result;
            return Some(result);
        }

        None
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type IntoIter = Iter<'a>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for BitSet {
    type IntoIter = IntoIter;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        let mut words = self.words;
        words.truncate(rtrim(&words, self.sign).len());
        BitIter::new(words)
    }
}

impl FromIterator<usize> for BitSet {
    /// Builds a non-negative bitset with the given bits set.
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// let bits: BitSet = [4, 0, 33].into_iter().collect();
    /// assert_eq!(bits.to_string_radix(16), "200000011");
    /// ```
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<usize> for BitSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for bit in iter {
            self.insert(bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BitSet;
    use alloc::{vec, vec::Vec};

    #[test]
    fn meets_in_the_middle() {
        let bits: BitSet = [1, 5, 64, 70, 200].into_iter().collect();
        let mut iter = bits.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(200));
        assert_eq!(iter.next_back(), Some(70));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(5));
        assert_eq!(iter.next(), Some(64));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn owned_iteration_skips_tail() {
        let mut bits = BitSet::from(-1);
        bits.ensure_capacity(300);
        bits.clear_bit(0);
        assert_eq!(bits.clone().into_iter().count(), 63);
        assert_eq!(bits.into_iter().next(), Some(1));
        assert_eq!(BitSet::new().into_iter().collect::<Vec<_>>(), vec![]);
    }
}
