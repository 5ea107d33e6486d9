//! `BitSet` struct and core implementation.

use alloc::{vec, vec::Vec};
use core::ops::Index;

use crate::{
    iter::{BitIter, Iter},
    macros::{bitpos, fill},
    storage::{BitSetBuilder, WORD_BITS, extract_word, low_mask, rtrim},
};

/// A growable bitset that is also an infinite-precision two's-complement
/// integer.
///
/// # Overview
///
/// The value is a finite prefix of 64-bit words plus a sign flag. Every bit
/// above the prefix reads as the sign: `0` for non-negative values, `1` for
/// negative ones. A negative value therefore has infinitely many set bits,
/// exactly like `-1` in two's complement.
///
/// Accessors grow the prefix lazily; mutators keep it trimmed so that no
/// trailing word merely repeats the sign.
///
/// # Examples
///
/// ```
/// use signed_bitset::BitSet;
///
/// let mut bits = BitSet::new();
/// bits.insert(4).insert(0).insert(33);
///
/// assert!(bits.get(33));
/// assert_eq!(bits.msb(), Some(33));
/// assert_eq!(bits.to_string(), "1000000000000000000000000000010001");
///
/// // One's complement flips the infinite tail too.
/// let inverted = BitSet::from(4u8).complement();
/// assert_eq!(inverted.to_string(), "...1111011");
/// assert!(inverted.get(2000));
/// ```
#[derive(Clone)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct BitSet {
    pub(crate) words: Vec<u64>,
    pub(crate) sign: bool,
}

impl BitSet {
    /// Creates the zero value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::new();
    /// assert!(bits.is_empty());
    /// assert_eq!(bits.to_string_radix(32), "0");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            words: vec![0],
            sign: false,
        }
    }

    /// Creates the zero value with room for at least `bits` bits before the
    /// storage reallocates.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        let mut words = Vec::with_capacity(bits.div_ceil(WORD_BITS).max(1));
        words.push(0);
        Self { words, sign: false }
    }

    /// Builds a bitset from its raw parts: little-endian words and the
    /// tail sign.
    ///
    /// The words need not be trimmed; an empty vector yields `0` or `-1`
    /// depending on `negative`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from_parts(vec![0b1011, 0, 0], false);
    /// assert_eq!(bits.word_len(), 1);
    ///
    /// let minus_one = BitSet::from_parts(vec![], true);
    /// assert_eq!(minus_one, BitSet::from(-1));
    /// ```
    #[must_use]
    pub fn from_parts(mut words: Vec<u64>, negative: bool) -> Self {
        if words.is_empty() {
            words.push(fill!(negative));
        }
        let mut bits = Self {
            words,
            sign: negative,
        };
        bits.normalize();
        bits
    }

    /// Drops trailing words that repeat the sign fill.
    #[inline]
    pub(crate) fn normalize(&mut self) {
        let n = rtrim(&self.words, self.sign).len();
        self.words.truncate(n);
    }

    /// Returns the stored word prefix, least-significant word first.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.words
    }

    /// Number of words in the stored prefix.
    #[must_use]
    #[inline]
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if every bit above the stored prefix is set, i.e. the
    /// value is negative in two's complement.
    #[must_use]
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.sign
    }

    /// Releases storage not needed to represent the value.
    pub fn shrink_to_fit(&mut self) {
        self.normalize();
        self.words.shrink_to_fit();
    }

    /// Grows the stored prefix so that bit `bit` lies inside it.
    ///
    /// New words repeat the sign fill, so the logical value is unchanged.
    /// Never truncates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::from(-1);
    /// bits.ensure_capacity(200);
    /// assert_eq!(bits.word_len(), 4);
    /// assert_eq!(bits, BitSet::from(-1));
    /// ```
    pub fn ensure_capacity(&mut self, bit: usize) {
        let (idx, _) = bitpos!(bit);
        if idx >= self.words.len() {
            let fill = fill!(self.sign);
            self.words.resize(idx + 1, fill);
        }
    }

    /// Returns the value of the bit at index `i`.
    ///
    /// Indices past the stored prefix read as the sign.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from(0b101);
    /// assert!(bits.get(2));
    /// assert!(!bits.get(1));
    /// assert!(!bits.get(1000));
    /// assert!(BitSet::from(-8).get(1000));
    /// ```
    #[must_use]
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        let (idx, bp) = bitpos!(i);
        match self.words.get(idx) {
            Some(word) => ((word >> bp) & 1) != 0,
            None => self.sign,
        }
    }

    /// Sets bit `i` to `v` and returns its previous value.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::new();
    /// assert!(!bits.replace(10, true));
    /// assert!(bits.replace(10, false));
    /// ```
    pub fn replace(&mut self, i: usize, v: bool) -> bool {
        let (idx, bp) = bitpos!(i);
        if idx >= self.words.len() {
            // The tail already holds `v`.
            if v == self.sign {
                return v;
            }
            self.ensure_capacity(i);
        }

        let mask = 1u64 << bp;
        let word = &mut self.words[idx];
        let prev = *word;
        if v {
            *word = prev | mask;
        } else {
            *word = prev & !mask;
        }

        if idx + 1 == self.words.len() {
            self.normalize();
        }
        (prev & mask) != 0
    }

    /// Sets bit `i` to `v`, growing the storage as needed.
    ///
    /// Returns `self` for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::new();
    /// bits.set(4, true).set(0, true).set(22, true);
    /// assert_eq!(bits.to_string(), "10000000000000000010001");
    /// ```
    #[inline]
    pub fn set(&mut self, i: usize, v: bool) -> &mut Self {
        self.replace(i, v);
        self
    }

    /// Sets bit `i` to one. Returns `self` for chaining.
    #[inline]
    pub fn insert(&mut self, i: usize) -> &mut Self {
        self.set(i, true)
    }

    /// Sets bit `i` to zero. Returns `self` for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits: BitSet = "111".parse()?;
    /// bits.clear_bit(1);
    /// assert_eq!(bits, "101".parse::<BitSet>()?);
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    #[inline]
    pub fn clear_bit(&mut self, i: usize) -> &mut Self {
        self.set(i, false)
    }

    /// Complements bit `i`. Returns `self` for chaining.
    pub fn flip(&mut self, i: usize) -> &mut Self {
        self.ensure_capacity(i);
        let (idx, bp) = bitpos!(i);
        self.words[idx] ^= 1u64 << bp;
        if idx + 1 == self.words.len() {
            self.normalize();
        }
        self
    }

    /// Resets the bitset to the zero value, discarding its storage.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::from(-1);
    /// bits.clear();
    /// assert!(bits.is_empty());
    /// ```
    pub fn clear(&mut self) -> &mut Self {
        self.words.clear();
        self.words.push(0);
        self.sign = false;
        self
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.sign && self.words.iter().all(|w| *w == 0)
    }

    /// Index of the highest set bit.
    ///
    /// Returns [`None`] for zero and for negative values, which have no
    /// highest set bit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::new();
    /// assert_eq!(bits.msb(), None);
    /// bits.insert(100).insert(333);
    /// assert_eq!(bits.msb(), Some(333));
    /// assert_eq!(bits.complement().msb(), None);
    /// ```
    #[must_use]
    pub fn msb(&self) -> Option<usize> {
        if self.sign {
            return None;
        }
        for (wi, &word) in self.words.iter().enumerate().rev() {
            if word != 0 {
                let bi = WORD_BITS - 1 - word.leading_zeros() as usize;
                return Some(wi * WORD_BITS + bi);
            }
        }
        None
    }

    /// Index of the lowest set bit, i.e. the number of trailing zeros.
    ///
    /// Returns [`None`] only for zero. Negative values always have a lowest
    /// set bit, possibly in the implicit tail.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from_str_radix("10000000000110001000000000", 2)?;
    /// assert_eq!(bits.ntz(), Some(9));
    /// assert_eq!(BitSet::new().ntz(), None);
    /// assert_eq!(BitSet::from(-256).ntz(), Some(8));
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    #[must_use]
    pub fn ntz(&self) -> Option<usize> {
        for (wi, &word) in self.words.iter().enumerate() {
            if word != 0 {
                return Some(wi * WORD_BITS + word.trailing_zeros() as usize);
            }
        }
        self.sign.then_some(self.words.len() * WORD_BITS)
    }

    /// Number of set bits.
    ///
    /// Returns [`None`] for negative values, which have infinitely many.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// assert_eq!(BitSet::from(0b1_0000_1101u32).cardinality(), Some(4));
    /// assert_eq!(BitSet::from(-1).cardinality(), None);
    /// ```
    #[must_use]
    pub fn cardinality(&self) -> Option<usize> {
        if self.sign {
            return None;
        }
        Some(self.words.iter().map(|w| w.count_ones() as usize).sum())
    }

    /// Number of unset bits.
    ///
    /// Only negative values have finitely many; non-negative values return
    /// [`None`].
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// assert_eq!(BitSet::from(-5).count_zeros(), Some(1));
    /// assert_eq!(BitSet::from(5).count_zeros(), None);
    /// ```
    #[must_use]
    pub fn count_zeros(&self) -> Option<usize> {
        if !self.sign {
            return None;
        }
        Some(self.words.iter().map(|w| w.count_zeros() as usize).sum())
    }

    /// Returns an iterator over the indices of set bits in the stored
    /// prefix, in ascending order.
    ///
    /// The infinite tail of a negative value is not enumerated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits: BitSet = [0, 32].into_iter().collect();
    /// assert_eq!(bits.iter().collect::<Vec<_>>(), vec![0, 32]);
    /// assert_eq!(bits.iter().rev().collect::<Vec<_>>(), vec![32, 0]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        BitIter::new(rtrim(&self.words, self.sign))
    }

    /// Collects the indices of set bits in the stored prefix.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::new();
    /// bits.insert(4).insert(32);
    /// bits.invert();
    /// bits.clear_bit(65);
    /// bits.invert();
    /// bits.insert(8);
    /// assert_eq!(bits.to_vec(), vec![4, 8, 32, 65]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Extracts bits `[beg, end)` as a new non-negative bitset, with bit
    /// `beg` becoming bit 0.
    ///
    /// Bits past the stored prefix are taken from the sign, so slicing the
    /// tail of a negative value yields ones. An empty range yields zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let bits = BitSet::from_str_radix("0xff900018283821283", 16)?;
    /// assert_eq!(bits.slice(16, 32).to_string_radix(16), "8382");
    /// assert_eq!(bits.slice(130, 160).to_string_radix(8), "0");
    ///
    /// let negated = BitSet::from(4).complement();
    /// assert_eq!(negated.slice(1, 4).to_string(), "101");
    /// assert_eq!(negated.slice(60, 200).cardinality(), Some(140));
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    #[must_use]
    pub fn slice(&self, beg: usize, end: usize) -> Self {
        // Zeros past the prefix of a non-negative value need no copying.
        let end = if self.sign {
            end
        } else {
            end.min(self.words.len() * WORD_BITS)
        };
        let bits = match end.checked_sub(beg) {
            None | Some(0) => return Self::new(),
            Some(bits) => bits,
        };

        let n = bits.div_ceil(WORD_BITS);
        let mut buf = BitSetBuilder::with_capacity(n);
        for k in 0..n {
            buf.push(extract_word(&self.words, self.sign, beg + k * WORD_BITS));
        }

        // Mask the final partial word to the exact bit-width of the range.
        let rem = bits & (WORD_BITS - 1);
        if rem != 0
            && let Some(last) = buf.as_mut_slice().last_mut()
        {
            *last &= low_mask(rem);
        }

        buf.finalize()
    }

    /// Extracts every bit from `beg` upwards, keeping the sign.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let negated = BitSet::from(4).complement();
    /// assert_eq!(negated.slice_from(1).to_string(), "...111101");
    /// ```
    #[must_use]
    pub fn slice_from(&self, beg: usize) -> Self {
        self.shr(beg)
    }

    /// Shifts the value right by `n` bits, filling from the sign.
    ///
    /// Equivalent to an arithmetic shift: `-5 >> 1 == -3`.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// assert_eq!(BitSet::from(-5).shr(1), BitSet::from(-3));
    /// assert_eq!(BitSet::from(0b1100).shr(2), BitSet::from(0b11));
    /// ```
    #[must_use]
    pub fn shr(&self, n: usize) -> Self {
        let total = self.words.len() * WORD_BITS;
        let Some(bits) = total.checked_sub(n).filter(|&bits| bits > 0) else {
            return Self::from_parts(Vec::new(), self.sign);
        };

        let count = bits.div_ceil(WORD_BITS);
        let mut buf = BitSetBuilder::with_capacity(count);
        for k in 0..count {
            buf.push(extract_word(&self.words, self.sign, n + k * WORD_BITS));
        }
        buf.set_negative(self.sign);
        buf.finalize()
    }

    /// Shifts the value left by `n` bits, filling with zeros from below.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// assert_eq!(BitSet::from(3).shl(64).to_string_radix(16), "30000000000000000");
    /// assert_eq!(BitSet::from(-1).shl(4).to_string(), "...11110000");
    /// ```
    #[must_use]
    pub fn shl(&self, n: usize) -> Self {
        let (wshift, bshift) = bitpos!(n);
        let mut words = Vec::with_capacity(self.words.len() + wshift + 1);
        words.resize(wshift, 0);

        if bshift == 0 {
            words.extend_from_slice(&self.words);
        } else {
            let ishift = WORD_BITS - bshift;
            let mut carry = 0;
            for &word in &self.words {
                words.push((word << bshift) | carry);
                carry = word >> ishift;
            }
            words.push(carry | (fill!(self.sign) << bshift));
        }

        Self::from_parts(words, self.sign)
    }

    /// Applies `f(word, mask)` to every word overlapping `[beg, end)`.
    ///
    /// The caller must have grown the storage to cover `end - 1`.
    fn update_range(&mut self, beg: usize, end: usize, f: impl Fn(u64, u64) -> u64) {
        let (bw, bb) = bitpos!(beg);
        let (ew, eb) = bitpos!(end - 1);
        for wi in bw..=ew {
            let lo = if wi == bw { bb } else { 0 };
            let hi = if wi == ew { eb + 1 } else { WORD_BITS };
            let mask = low_mask(hi) & !low_mask(lo);
            self.words[wi] = f(self.words[wi], mask);
        }
        self.normalize();
    }

    /// Sets every bit in `[beg, end)` to `value`. Returns `self` for
    /// chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::new();
    /// bits.set_range(4, 8, true);
    /// assert_eq!(bits.to_string(), "11110000");
    ///
    /// let mut bits = BitSet::from(-1);
    /// bits.set_range(0, 3, false);
    /// assert_eq!(bits, BitSet::from(-8));
    /// ```
    pub fn set_range(&mut self, beg: usize, end: usize, value: bool) -> &mut Self {
        // Past the prefix the tail already reads as the sign.
        let end = if value == self.sign {
            end.min(self.words.len() * WORD_BITS)
        } else {
            end
        };
        if beg >= end {
            return self;
        }

        self.ensure_capacity(end - 1);
        if value {
            self.update_range(beg, end, |w, m| w | m);
        } else {
            self.update_range(beg, end, |w, m| w & !m);
        }
        self
    }

    /// Sets every bit in `[beg, end)` to zero. Returns `self` for chaining.
    #[inline]
    pub fn clear_range(&mut self, beg: usize, end: usize) -> &mut Self {
        self.set_range(beg, end, false)
    }

    /// Complements every bit in `[beg, end)`. Returns `self` for chaining.
    ///
    /// ```
    /// # use signed_bitset::BitSet;
    /// let mut bits = BitSet::from(0b1010);
    /// bits.flip_range(0, 4);
    /// assert_eq!(bits, BitSet::from(0b0101));
    /// ```
    pub fn flip_range(&mut self, beg: usize, end: usize) -> &mut Self {
        if beg >= end {
            return self;
        }
        self.ensure_capacity(end - 1);
        self.update_range(beg, end, |w, m| w ^ m);
        self
    }

    /// Lowest 128 bits, sign-extended, as an unsigned integer.
    pub(crate) fn low_u128(&self) -> u128 {
        let lo = extract_word(&self.words, self.sign, 0);
        let hi = extract_word(&self.words, self.sign, WORD_BITS);
        u128::from(lo) | (u128::from(hi) << WORD_BITS)
    }
}

impl Index<usize> for BitSet {
    type Output = bool;

    /// Returns a reference to a static `bool` matching [`BitSet::get`].
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// let bits = BitSet::from(-2);
    /// assert!(!bits[0]);
    /// assert!(bits[1000]);
    /// ```
    fn index(&self, index: usize) -> &Self::Output {
        if self.get(index) { &true } else { &false }
    }
}
