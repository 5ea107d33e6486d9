//! Rkyv support for `BitSet`.
//!
//! The archive mirrors the in-memory layout: a vector of little-endian
//! words plus the sign flag, so bits can be read without deserializing.

pub use crate::bitset::{ArchivedBitSet, BitSetResolver};
use crate::macros::bitpos;

impl ArchivedBitSet {
    /// Returns the value of bit `i` in the archived bitset.
    ///
    /// Indices past the stored words read as the sign, as with
    /// [`BitSet::get`](crate::BitSet::get).
    #[must_use]
    pub fn get(&self, i: usize) -> bool {
        let (idx, bp) = bitpos!(i);
        match self.words.get(idx) {
            Some(word) => ((word.to_native() >> bp) & 1) != 0,
            None => self.sign,
        }
    }

    /// Returns `true` if the archived value is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.sign
    }

    /// Number of archived words.
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.words.len()
    }
}
