//! Trait implementations for `BitSet`.

use crate::{
    BitSet,
    radix,
    storage::{WORD_BITS, extract_word, rtrim},
};
use alloc::{vec, vec::Vec};
use core::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign,
    },
    str::FromStr,
};

/// Errors that can occur when parsing a digit string into a [`BitSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBitSetError {
    /// A character that is not a digit of the radix.
    InvalidDigit {
        /// The invalid character found
        ch: char,
        /// Byte offset of the character in the input
        pos: usize,
    },

    /// No digits after removing prefixes and separators.
    Empty,
}

impl fmt::Display for ParseBitSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDigit { ch, pos } => {
                write!(f, "invalid digit '{ch}' at position {pos}")
            }
            Self::Empty => write!(f, "cannot parse bitset from string without digits"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBitSetError {}

/// Error type for converting a [`BitSet`] to a primitive integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryFromBitSetError {
    /// The value does not fit in the target type.
    OutOfRange {
        /// Width of the target type in bits
        bits: u32,
        /// Whether the target type is signed
        signed: bool,
    },
}

impl fmt::Display for TryFromBitSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { bits, signed } => {
                let kind = if *signed { 'i' } else { 'u' };
                write!(f, "bitset value out of range for {kind}{bits}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TryFromBitSetError {}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BitSet> for Vec<u64> {
    /// Returns the trimmed word prefix; the sign is dropped.
    fn from(bits: BitSet) -> Self {
        let mut words = bits.words;
        words.truncate(rtrim(&words, bits.sign).len());
        words
    }
}

impl From<Vec<u64>> for BitSet {
    /// Interprets `words` as a non-negative value.
    fn from(words: Vec<u64>) -> Self {
        Self::from_parts(words, false)
    }
}

impl From<&[u64]> for BitSet {
    fn from(slice: &[u64]) -> Self {
        Self::from_parts(slice.to_vec(), false)
    }
}

impl<const N: usize> From<&[u64; N]> for BitSet {
    fn from(slice: &[u64; N]) -> Self {
        Self::from_parts(slice.to_vec(), false)
    }
}

impl AsRef<[u64]> for BitSet {
    fn as_ref(&self) -> &[u64] {
        self.as_slice()
    }
}

impl fmt::Display for BitSet {
    /// Formats the value in binary, like [`BitSet::to_string_radix`] with
    /// radix 2.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(self, f)
    }
}

macro_rules! impl_radix_fmt {
    ($($trait:ident => $radix:literal, $prefix:literal;)*) => {$(
        impl fmt::$trait for BitSet {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad_integral(true, $prefix, &self.to_string_radix($radix))
            }
        }
    )*};
}

impl_radix_fmt! {
    Binary => 2, "0b";
    Octal => 8, "0o";
    LowerHex => 16, "0x";
}

impl fmt::UpperHex for BitSet {
    /// Formats the value as uppercase hexadecimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// let bits = BitSet::from(0xDEADBEEFu32);
    /// assert_eq!(format!("{bits:X}"), "DEADBEEF");
    /// assert_eq!(format!("{bits:#x}"), "0xdeadbeef");
    /// assert_eq!(format!("{:X}", BitSet::from(-0x100)), "...FFFF00");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.to_string_radix(16).to_ascii_uppercase();
        f.pad_integral(true, "0x", &digits)
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("words", &rtrim(&self.words, self.sign))
            .field("negative", &self.sign)
            .finish()
    }
}

impl FromStr for BitSet {
    type Err = ParseBitSetError;

    /// Parses a digit string, choosing the radix from its prefix: `0x` for
    /// hexadecimal, `0o` for octal, and binary otherwise.
    ///
    /// # Errors
    ///
    /// See [`BitSet::from_str_radix`].
    ///
    /// # Examples
    ///
    /// ```
    /// use core::str::FromStr;
    /// use signed_bitset::BitSet;
    ///
    /// let bits = BitSet::from_str("0b101")?;
    /// assert!(bits.get(0));
    /// assert!(!bits.get(1));
    /// assert!(bits.get(2));
    ///
    /// assert_eq!(BitSet::from_str("0xff")?, BitSet::from(255));
    /// assert_eq!(BitSet::from_str("...1110")?, BitSet::from(-2));
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let radix = match s.get(..2) {
            Some("0x" | "0X") => 16,
            Some("0o" | "0O") => 8,
            _ => 2,
        };
        radix::parse(s, radix, 0)
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign
            && rtrim(&self.words, self.sign) == rtrim(&other.words, other.sign)
    }
}

impl Eq for BitSet {}

impl PartialOrd for BitSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BitSet {
    /// Orders by two's-complement value.
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// assert!(BitSet::from(-1) < BitSet::new());
    /// assert!(BitSet::from(i128::MIN) < BitSet::from(-1));
    /// assert!(BitSet::from(u64::MAX) < BitSet::from(1u128 << 64));
    /// ```
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        // Same sign: compare sign-extended words from the top down.
        let n = self.words.len().max(other.words.len());
        for wi in (0..n).rev() {
            let beg = wi * WORD_BITS;
            let a = extract_word(&self.words, self.sign, beg);
            let b = extract_word(&other.words, other.sign, beg);
            match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        rtrim(&self.words, self.sign).hash(state);
    }
}

// ============================================================================
// Bitwise Operator Implementations
// ============================================================================

macro_rules! impl_bit_op {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident => $with:ident;)*) => {$(
        impl $op for BitSet {
            type Output = Self;

            #[inline]
            fn $method(mut self, rhs: Self) -> Self::Output {
                self.$with(&rhs);
                self
            }
        }

        impl $op<&BitSet> for BitSet {
            type Output = Self;

            #[inline]
            fn $method(mut self, rhs: &BitSet) -> Self::Output {
                self.$with(rhs);
                self
            }
        }

        impl $op for &BitSet {
            type Output = BitSet;

            #[inline]
            fn $method(self, rhs: Self) -> Self::Output {
                let mut result = self.clone();
                result.$with(rhs);
                result
            }
        }

        impl $assign for BitSet {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                self.$with(&rhs);
            }
        }

        impl $assign<&Self> for BitSet {
            #[inline]
            fn $assign_method(&mut self, rhs: &Self) {
                self.$with(rhs);
            }
        }
    )*};
}

impl_bit_op! {
    BitAnd::bitand, BitAndAssign::bitand_assign => and_with;
    BitOr::bitor, BitOrAssign::bitor_assign => or_with;
    BitXor::bitxor, BitXorAssign::bitxor_assign => xor_with;
}

impl Not for BitSet {
    type Output = Self;

    /// Returns the one's complement, flipping the infinite tail too.
    ///
    /// # Examples
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// let a = BitSet::from(0b101);
    /// let b = !a.clone();
    /// assert!(!b.get(0));
    /// assert!(b.get(1));
    /// assert!(b.get(2000));
    /// assert_eq!(!b, a);
    /// ```
    #[inline]
    fn not(mut self) -> Self::Output {
        self.invert();
        self
    }
}

impl Not for &BitSet {
    type Output = BitSet;

    #[inline]
    fn not(self) -> Self::Output {
        self.complement()
    }
}

impl Shl<usize> for BitSet {
    type Output = Self;

    #[inline]
    fn shl(self, rhs: usize) -> Self::Output {
        BitSet::shl(&self, rhs)
    }
}

impl Shl<usize> for &BitSet {
    type Output = BitSet;

    #[inline]
    fn shl(self, rhs: usize) -> Self::Output {
        BitSet::shl(self, rhs)
    }
}

impl ShlAssign<usize> for BitSet {
    #[inline]
    fn shl_assign(&mut self, rhs: usize) {
        *self = BitSet::shl(self, rhs);
    }
}

impl Shr<usize> for BitSet {
    type Output = Self;

    /// Arithmetic shift right.
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// assert_eq!(BitSet::from(-16) >> 2, BitSet::from(-4));
    /// assert_eq!(BitSet::from(-1) >> 1000, BitSet::from(-1));
    /// assert_eq!(BitSet::from(3) << 1 >> 1, BitSet::from(3));
    /// ```
    #[inline]
    fn shr(self, rhs: usize) -> Self::Output {
        BitSet::shr(&self, rhs)
    }
}

impl Shr<usize> for &BitSet {
    type Output = BitSet;

    #[inline]
    fn shr(self, rhs: usize) -> Self::Output {
        BitSet::shr(self, rhs)
    }
}

impl ShrAssign<usize> for BitSet {
    #[inline]
    fn shr_assign(&mut self, rhs: usize) {
        *self = BitSet::shr(self, rhs);
    }
}

// ============================================================================
// Primitive Integer Conversions
// ============================================================================

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BitSet {
            #[inline]
            fn from(value: $t) -> Self {
                let wide = value as i128 as u128;
                Self::from_parts(vec![wide as u64, (wide >> 64) as u64], value < 0)
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BitSet {
            #[inline]
            fn from(value: $t) -> Self {
                let wide = value as u128;
                Self::from_parts(vec![wide as u64, (wide >> 64) as u64], false)
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_try_from {
    ($($t:ty => $signed:literal),*) => {$(
        impl TryFrom<&BitSet> for $t {
            type Error = TryFromBitSetError;

            /// Converts the value if it is representable in the target
            /// type.
            ///
            /// # Errors
            ///
            /// Returns [`TryFromBitSetError::OutOfRange`] otherwise,
            /// including for negative values and unsigned targets.
            fn try_from(bits: &BitSet) -> Result<Self, Self::Error> {
                // Truncate, then check that nothing was lost.
                let value = bits.low_u128() as $t;
                if BitSet::from(value) == *bits {
                    Ok(value)
                } else {
                    Err(TryFromBitSetError::OutOfRange {
                        bits: <$t>::BITS,
                        signed: $signed,
                    })
                }
            }
        }

        impl TryFrom<BitSet> for $t {
            type Error = TryFromBitSetError;

            #[inline]
            fn try_from(bits: BitSet) -> Result<Self, Self::Error> {
                Self::try_from(&bits)
            }
        }
    )*};
}

impl_try_from!(
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, u128 => false, usize => false
);
