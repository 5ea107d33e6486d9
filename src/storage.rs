//! Word storage helpers and the public builder.

use alloc::vec::Vec;

use crate::{
    BitSet,
    macros::{bitpos, fill},
};

/// Number of bits in a storage word.
pub const WORD_BITS: usize = 64;

/// Removes trailing words equal to the sign fill, keeping at least one word.
///
/// Trailing fill words carry no information: the implicit tail beyond the
/// prefix already reads as the fill.
#[inline(always)]
pub(crate) const fn rtrim(mut slice: &[u64], sign: bool) -> &[u64] {
    let fill = fill!(sign);
    while let [rest @ .., last] = slice {
        if rest.is_empty() || *last != fill {
            break;
        }
        slice = rest;
    }
    slice
}

/// Mask with the low `bits` bits set. `bits >= 64` yields all ones.
#[inline(always)]
pub(crate) const fn low_mask(bits: usize) -> u64 {
    if bits >= WORD_BITS {
        !0
    } else {
        (1u64 << bits) - 1
    }
}

/// Reads 64 bits starting at bit `beg`, sign-extending past the prefix.
#[inline]
pub(crate) fn extract_word(words: &[u64], sign: bool, beg: usize) -> u64 {
    let (wi, bi) = bitpos!(beg);
    let fill = fill!(sign);
    let lo = words.get(wi).copied().unwrap_or(fill);
    if bi == 0 {
        return lo;
    }
    let hi = words.get(wi + 1).copied().unwrap_or(fill);
    (lo >> bi) | (hi << (WORD_BITS - bi))
}

/// A builder for constructing bitsets from raw word data.
///
/// Words are pushed least-significant first. The sign decides what every bit
/// above the pushed words reads as; [`finalize`](Self::finalize) trims the
/// result into canonical form.
///
/// # Examples
///
/// ```
/// use signed_bitset::BitSetBuilder;
///
/// let mut builder = BitSetBuilder::with_capacity(2);
/// builder.push(0b1010);
/// builder.push(0);
/// let bitset = builder.finalize();
///
/// assert!(bitset.get(1));
/// assert!(!bitset.get(0));
/// assert_eq!(bitset.word_len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitSetBuilder {
    words: Vec<u64>,
    sign: bool,
}

impl BitSetBuilder {
    /// Creates an empty builder for a non-negative value.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            sign: false,
        }
    }

    /// Creates a builder with room for `words` 64-bit words.
    #[must_use]
    pub fn with_capacity(words: usize) -> Self {
        Self {
            words: Vec::with_capacity(words),
            sign: false,
        }
    }

    /// Appends a 64-bit word above the words pushed so far.
    pub fn push(&mut self, word: u64) {
        self.words.push(word);
    }

    /// Appends a slice of words, least-significant first.
    pub fn extend_from_slice(&mut self, slice: &[u64]) {
        self.words.extend_from_slice(slice);
    }

    /// Returns the words pushed so far.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Number of words pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no word has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Sets whether the bits above the pushed words are all ones.
    ///
    /// ```
    /// use signed_bitset::BitSetBuilder;
    ///
    /// let mut builder = BitSetBuilder::new();
    /// builder.push(!0b100);
    /// builder.set_negative(true);
    /// assert_eq!(builder.finalize().to_string(), "...1111011");
    /// ```
    pub fn set_negative(&mut self, sign: bool) {
        self.sign = sign;
    }

    /// Consumes the builder and returns the canonical bitset.
    #[must_use]
    pub fn finalize(self) -> BitSet {
        BitSet::from_parts(self.words, self.sign)
    }
}

impl Extend<u64> for BitSetBuilder {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        self.words.extend(iter);
    }
}

impl From<BitSetBuilder> for BitSet {
    fn from(builder: BitSetBuilder) -> Self {
        builder.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtrim_keeps_one_word() {
        assert_eq!(rtrim(&[0, 0, 0], false), &[0]);
        assert_eq!(rtrim(&[!0, !0], true), &[!0]);
        assert_eq!(rtrim(&[5, 0, 0], false), &[5]);
        assert_eq!(rtrim(&[5, !0], true), &[5]);
        // A zero word is significant for a negative value.
        assert_eq!(rtrim(&[5, 0, !0], true), &[5, 0]);
    }

    #[test]
    fn low_mask_edges() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(3), 0b111);
        assert_eq!(low_mask(64), !0);
        assert_eq!(low_mask(100), !0);
    }

    #[test]
    fn extract_word_straddles_words() {
        let words = [0xffff_0000_0000_0000, 0x1234];
        assert_eq!(extract_word(&words, false, 48), 0x1234_ffff);
        assert_eq!(extract_word(&words, false, 128), 0);
        assert_eq!(extract_word(&words, true, 128), !0);
        // Upper half of the window comes from the one-filled tail.
        assert_eq!(extract_word(&words, true, 96), 0xffff_ffff_0000_0000);
    }

    #[test]
    fn builder_finalize_trims() {
        let mut builder = BitSetBuilder::with_capacity(3);
        builder.extend_from_slice(&[7, 0]);
        builder.push(0);
        assert_eq!(builder.len(), 3);
        let bitset = builder.finalize();
        assert_eq!(bitset.as_slice(), &[7]);
        assert!(!bitset.is_negative());
    }
}
