//! Conversion between `BitSet` and digit strings in any radix.
//!
//! Power-of-two radices map digits straight onto bit groups. Other radices
//! go through schoolbook multiply-add (parsing) and long division
//! (formatting) over the word vector, one machine-word chunk of digits at a
//! time.
//!
//! Negative values have infinitely many leading ones, which are written as a
//! `...` marker in front of the finite digits.

use alloc::{string::String, vec::Vec};

use crate::{
    BitSet,
    macros::bitpos,
    storage::{WORD_BITS, extract_word, rtrim},
    traits::ParseBitSetError,
};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Marker for the infinite run of leading ones.
const ELLIPSIS: &str = "...";

/// All-ones digits written after the marker.
const TAIL_DIGITS: usize = 4;

#[inline]
fn check_radix(radix: u32) {
    assert!(
        (2..=36).contains(&radix),
        "radix must be in 2..=36, got {radix}"
    );
}

/// Largest power of `radix` that fits a word, and its exponent.
fn big_base(radix: u32) -> (u64, usize) {
    let radix = u64::from(radix);
    let mut base = radix;
    let mut n = 1;
    while let Some(next) = base.checked_mul(radix) {
        base = next;
        n += 1;
    }
    (base, n)
}

/// `words = words * mul + add`
fn mul_add(words: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = u128::from(add);
    for word in words.iter_mut() {
        let t = u128::from(*word) * u128::from(mul) + carry;
        *word = t as u64;
        carry = t >> WORD_BITS;
    }
    if carry != 0 {
        words.push(carry as u64);
    }
}

/// `words = words / div`, returning the remainder.
fn div_rem(words: &mut [u64], div: u64) -> u64 {
    let div = u128::from(div);
    let mut rem = 0u128;
    for word in words.iter_mut().rev() {
        let t = (rem << WORD_BITS) | u128::from(*word);
        *word = (t / div) as u64;
        rem = t % div;
    }
    rem as u64
}

/// Strips the conventional prefix of `radix`, if present.
fn strip_radix_prefix(s: &str, radix: u32) -> &str {
    let prefixes = match radix {
        2 => ["0b", "0B"],
        8 => ["0o", "0O"],
        16 => ["0x", "0X"],
        _ => return s,
    };
    prefixes
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .unwrap_or(s)
}

/// Packs digits of a power-of-two radix, least-significant digit first.
///
/// Returns the words and the number of bits the digits span.
fn parse_pow2(digits: &str, radix: u32, offset: usize) -> Result<(Vec<u64>, usize), ParseBitSetError> {
    let shift = radix.trailing_zeros();
    let mut words = Vec::with_capacity((digits.len() * shift as usize).div_ceil(WORD_BITS));
    let mut acc = 0u128;
    let mut width = 0u32;
    let mut total = 0usize;

    for (pos, ch) in digits.char_indices().rev() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(radix).ok_or(ParseBitSetError::InvalidDigit {
            ch,
            pos: offset + pos,
        })?;
        acc |= u128::from(digit) << width;
        width += shift;
        total += shift as usize;
        if width >= WORD_BITS as u32 {
            words.push(acc as u64);
            acc >>= WORD_BITS;
            width -= WORD_BITS as u32;
        }
    }

    if total == 0 {
        return Err(ParseBitSetError::Empty);
    }
    if width > 0 {
        words.push(acc as u64);
    }
    Ok((words, total))
}

/// Converts digits of any radix by chunked multiply-add.
fn parse_general(digits: &str, radix: u32, offset: usize) -> Result<Vec<u64>, ParseBitSetError> {
    let (base, chunk) = big_base(radix);
    let mut words = Vec::with_capacity(digits.len() / chunk + 1);
    let mut value = 0u64;
    let mut scale = 1u64;
    let mut count = 0usize;
    let mut seen = false;

    for (pos, ch) in digits.char_indices() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(radix).ok_or(ParseBitSetError::InvalidDigit {
            ch,
            pos: offset + pos,
        })?;
        seen = true;
        value = value * u64::from(radix) + u64::from(digit);
        scale *= u64::from(radix);
        count += 1;
        if count == chunk {
            debug_assert_eq!(scale, base);
            mul_add(&mut words, base, value);
            value = 0;
            scale = 1;
            count = 0;
        }
    }

    if !seen {
        return Err(ParseBitSetError::Empty);
    }
    if count > 0 {
        mul_add(&mut words, scale, value);
    }
    Ok(words)
}

/// Parses `s` in `radix`; `offset` is the byte position of `s` within the
/// caller's input, used for error positions.
pub(crate) fn parse(s: &str, radix: u32, offset: usize) -> Result<BitSet, ParseBitSetError> {
    check_radix(radix);

    let rest = strip_radix_prefix(s, radix);
    let mut offset = offset + (s.len() - rest.len());
    let (digits, negative) = match rest.strip_prefix(ELLIPSIS) {
        Some(digits) => (digits, true),
        None => (rest, false),
    };

    if !negative {
        let words = if radix.is_power_of_two() {
            parse_pow2(digits, radix, offset)?.0
        } else {
            parse_general(digits, radix, offset)?
        };
        return Ok(BitSet::from_parts(words, false));
    }

    // `2^N + value` has no fixed width in other radices, so the marker is
    // only meaningful when digits align with bits.
    if !radix.is_power_of_two() {
        return Err(ParseBitSetError::InvalidDigit { ch: '.', pos: offset });
    }
    offset += ELLIPSIS.len();

    // Everything above the written digits is one.
    let (mut words, total) = parse_pow2(digits, radix, offset)?;
    let (wi, bi) = bitpos!(total);
    if bi != 0 {
        words[wi] |= !0u64 << bi;
    }
    Ok(BitSet::from_parts(words, true))
}

fn format_pow2(words: &[u64], sign: bool, radix: u32) -> String {
    let shift = radix.trailing_zeros() as usize;
    let mask = u64::from(radix - 1);
    let ndigits = (words.len() * WORD_BITS).div_ceil(shift);

    // Least-significant digit first; digits straddling the end of the
    // prefix pick up sign bits.
    let mut digits: Vec<u8> = (0..ndigits)
        .map(|j| (extract_word(words, sign, j * shift) & mask) as u8)
        .collect();

    let top = if sign { mask as u8 } else { 0 };
    while digits.last() == Some(&top) {
        digits.pop();
    }

    let mut out = String::with_capacity(digits.len() + ELLIPSIS.len() + TAIL_DIGITS);
    if sign {
        out.push_str(ELLIPSIS);
        for _ in 0..TAIL_DIGITS {
            out.push(char::from(DIGITS[mask as usize]));
        }
    } else if digits.is_empty() {
        out.push('0');
    }
    out.extend(digits.iter().rev().map(|&d| char::from(DIGITS[usize::from(d)])));
    out
}

fn format_general(words: &[u64], sign: bool, radix: u32) -> String {
    let (base, chunk) = big_base(radix);

    // Negative values print the unsigned prefix, i.e. 2^N + value.
    let mut scratch = words.to_vec();
    let mut digits: Vec<u8> = Vec::new();
    loop {
        while scratch.last() == Some(&0) {
            scratch.pop();
        }
        if scratch.is_empty() {
            break;
        }
        let mut rem = div_rem(&mut scratch, base);
        for _ in 0..chunk {
            digits.push((rem % u64::from(radix)) as u8);
            rem /= u64::from(radix);
        }
    }

    while digits.last() == Some(&0) {
        digits.pop();
    }

    let mut out = String::with_capacity(digits.len() + ELLIPSIS.len() + 1);
    if sign {
        out.push_str(ELLIPSIS);
    }
    if digits.is_empty() {
        out.push('0');
    }
    out.extend(digits.iter().rev().map(|&d| char::from(DIGITS[usize::from(d)])));
    out
}

impl BitSet {
    /// Parses a bitset from a digit string in the given radix.
    ///
    /// - A prefix matching the radix (`0x` for 16, `0o` for 8, `0b` for 2)
    ///   is skipped.
    /// - `_` separators between digits are ignored; digits are
    ///   case-insensitive.
    /// - For power-of-two radices a leading `...` means every bit above the
    ///   written digits is one, the form produced by
    ///   [`to_string_radix`](Self::to_string_radix) for negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBitSetError::Empty`] if there are no digits and
    /// [`ParseBitSetError::InvalidDigit`] for a character that is not a
    /// digit of `radix`.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    ///
    /// # Examples
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// let bits = BitSet::from_str_radix("0xD00000005", 16)?;
    /// assert_eq!(bits.to_string_radix(16), "d00000005");
    ///
    /// let bits = BitSet::from_str_radix("19219", 10)?;
    /// assert_eq!(bits, BitSet::from(19219));
    ///
    /// let bits = BitSet::from_str_radix("...1111011", 2)?;
    /// assert_eq!(bits, BitSet::from(-5));
    ///
    /// assert!(BitSet::from_str_radix("12", 2).is_err());
    /// # Ok::<(), signed_bitset::ParseBitSetError>(())
    /// ```
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, ParseBitSetError> {
        parse(s, radix, 0)
    }

    /// Renders the value as lowercase digits in the given radix.
    ///
    /// Non-negative values print without leading zeros (`"0"` for zero).
    /// Negative values print a `...` marker for the infinite leading ones:
    ///
    /// - power-of-two radices: the marker, four all-ones digits, then the
    ///   digits below the topmost run of all-ones digits (`-5` in binary is
    ///   `...1111011`);
    /// - other radices: the marker followed by the digits of `2^N + value`,
    ///   where `N` is the stored width in bits.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is not in `2..=36`.
    ///
    /// # Examples
    ///
    /// ```
    /// use signed_bitset::BitSet;
    ///
    /// assert_eq!(BitSet::from(19219).to_string_radix(10), "19219");
    /// assert_eq!(BitSet::from(255).to_string_radix(16), "ff");
    /// assert_eq!(BitSet::from(-1).to_string_radix(2), "...1111");
    /// assert_eq!(BitSet::from(-256).to_string_radix(16), "...ffff00");
    /// assert_eq!(BitSet::from(-1).to_string_radix(10), "...18446744073709551615");
    /// ```
    #[must_use]
    pub fn to_string_radix(&self, radix: u32) -> String {
        check_radix(radix);
        let words = rtrim(&self.words, self.sign);
        if radix.is_power_of_two() {
            format_pow2(words, self.sign, radix)
        } else {
            format_general(words, self.sign, radix)
        }
    }
}
