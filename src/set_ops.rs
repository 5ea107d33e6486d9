//! Bitwise algebra for `BitSet`.
//!
//! Every operation treats both operands as infinitely wide: the shorter
//! operand is extended with its own sign fill, and the result sign is the
//! operation applied to the two signs.

use crate::{BitSet, macros::fill};

impl BitSet {
    /// Combines `other` into `self` word by word with `op`.
    #[inline(always)]
    fn zip_with(&mut self, other: &Self, op: impl Fn(u64, u64) -> u64) {
        let fill = fill!(self.sign);
        let other_fill = fill!(other.sign);

        if self.words.len() < other.words.len() {
            self.words.resize(other.words.len(), fill);
        }

        let mut iter = other.words.iter();
        for dst in self.words.iter_mut() {
            let src = iter.next().copied().unwrap_or(other_fill);
            *dst = op(*dst, src);
        }

        self.sign = op(fill, other_fill) != 0;
        self.normalize();
    }

    /// Performs a bitwise AND with `other` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut a = BitSet::from(-1);
    /// a.and_with(&BitSet::from(0xff));
    /// assert_eq!(a.to_string(), "11111111");
    /// ```
    pub fn and_with(&mut self, other: &Self) {
        self.zip_with(other, |a, b| a & b);
    }

    /// Returns the bitwise AND of `self` and `other`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let a = BitSet::from_str_radix("0xff05", 16)?;
    /// let b = BitSet::from_str_radix("0xfe00", 16)?;
    /// assert_eq!(a.and(&b).to_string_radix(16), "fe00");
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.and_with(other);
        result
    }

    /// Performs a bitwise OR with `other` in place.
    pub fn or_with(&mut self, other: &Self) {
        self.zip_with(other, |a, b| a | b);
    }

    /// Returns the bitwise OR of `self` and `other`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from(256).or(&BitSet::from(512));
    /// assert_eq!(bits.to_string_radix(16), "300");
    /// ```
    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.or_with(other);
        result
    }

    /// Performs a bitwise XOR with `other` in place.
    pub fn xor_with(&mut self, other: &Self) {
        self.zip_with(other, |a, b| a ^ b);
    }

    /// Returns the bitwise XOR of `self` and `other`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let a: BitSet = "1010".parse()?;
    /// let b: BitSet = "0011".parse()?;
    /// assert_eq!(a.xor(&b).to_string(), "1001");
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    #[must_use]
    pub fn xor(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.xor_with(other);
        result
    }

    /// Clears in `self` every bit set in `other`.
    pub fn and_not_with(&mut self, other: &Self) {
        self.zip_with(other, |a, b| a & !b);
    }

    /// Returns `self & !other`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from(0b1111).and_not(&BitSet::from(0b0101));
    /// assert_eq!(bits, BitSet::from(0b1010));
    ///
    /// // Removing a finite set from an infinite one stays infinite.
    /// assert!(BitSet::from(-1).and_not(&BitSet::from(1)).is_negative());
    /// ```
    #[must_use]
    pub fn and_not(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.and_not_with(other);
        result
    }

    /// Complements every bit in place, including the infinite tail.
    ///
    /// This is a one's complement: `x` becomes `-x - 1`.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.sign = !self.sign;
    }

    /// Returns the one's complement of `self`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let zero = BitSet::new();
    /// assert_eq!(zero.complement().to_string(), "...1111");
    /// assert_eq!(zero.complement().complement(), zero);
    /// assert_eq!(BitSet::from(41).complement(), BitSet::from(-42));
    /// ```
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut result = self.clone();
        result.invert();
        result
    }
}
