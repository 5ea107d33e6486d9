//! Serde implementations for `BitSet`.
//!
//! The default representation depends on the format: human-readable
//! formats get the hexadecimal string from
//! [`BitSet::to_string_radix`], binary formats get a `(negative, words)`
//! tuple. The submodules provide alternative representations for use with
//! `#[serde(with = "...")]`.

use alloc::vec::Vec;
use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::{self, SerializeSeq, SerializeTuple},
};

use crate::{BitSet, BitSetBuilder, storage::rtrim};

/// Writes `(negative, words)` with the trimmed prefix.
fn serialize_parts<S>(b: &BitSet, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut tup = serializer.serialize_tuple(2)?;
    tup.serialize_element(&b.sign)?;
    tup.serialize_element(rtrim(&b.words, b.sign))?;
    tup.end()
}

fn deserialize_parts<'de, D>(deserializer: D) -> Result<BitSet, D::Error>
where
    D: Deserializer<'de>,
{
    struct PartsVisitor;

    impl<'de> Visitor<'de> for PartsVisitor {
        type Value = BitSet;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sign flag followed by a sequence of u64 words")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let negative: bool = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            let words: Vec<u64> = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;

            let mut builder = BitSetBuilder::with_capacity(words.len());
            builder.extend(words);
            builder.set_negative(negative);
            Ok(builder.finalize())
        }
    }

    deserializer.deserialize_tuple(2, PartsVisitor)
}

impl Serialize for BitSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string_radix(16))
        } else {
            serialize_parts(self, serializer)
        }
    }
}

impl<'de> Deserialize<'de> for BitSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = BitSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hexadecimal string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                BitSet::from_str_radix(v, 16).map_err(E::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(HexVisitor)
        } else {
            deserialize_parts(deserializer)
        }
    }
}

/// Serializes the bitset as a `(negative, words)` tuple in every format.
pub mod words {
    use super::*;

    /// Serialize the bitset as its sign and trimmed word prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(b: &BitSet, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_parts(b, serializer)
    }

    /// Deserialize the bitset from its sign and word prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a `(bool, [u64])` pair.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitSet, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_parts(deserializer)
    }
}

/// Serializes a non-negative bitset as the sorted sequence of its set bits.
pub mod sorted_set {
    use super::*;

    /// Serialize the bitset as a sorted sequence of set-bit indices.
    ///
    /// # Errors
    ///
    /// Returns an error for negative values, whose set bits cannot be
    /// listed, or if the serializer fails.
    pub fn serialize<S>(b: &BitSet, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Some(n) = b.cardinality() else {
            return Err(ser::Error::custom(
                "negative bitset has infinitely many set bits",
            ));
        };
        let mut seq = serializer.serialize_seq(Some(n))?;
        for i in b.iter() {
            seq.serialize_element(&i)?;
        }
        seq.end()
    }

    /// Deserialize a bitset from a strictly increasing sequence of indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is not strictly increasing or if
    /// deserialization fails.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<BitSet, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SortedSetVisitor;

        impl<'de> Visitor<'de> for SortedSetVisitor {
            type Value = BitSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sorted sequence of integers")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut b = BitSet::new();
                let mut last = None;
                while let Some(bit) = seq.next_element::<usize>()? {
                    if let Some(last) = last
                        && last >= bit
                    {
                        return Err(de::Error::invalid_value(
                            de::Unexpected::Unsigned(bit as u64),
                            &"sorted sequence",
                        ));
                    }
                    last = Some(bit);
                    b.insert(bit);
                }
                Ok(b)
            }
        }

        deserializer.deserialize_seq(SortedSetVisitor)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use ::serde::{Deserialize, Serialize};
    use alloc::{format, string::ToString, vec};
    use serde_test::{Configure, Token, assert_tokens};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct WordsWrapper {
        #[serde(with = "words")]
        bits: BitSet,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct SortedSetWrapper {
        #[serde(with = "sorted_set")]
        bits: BitSet,
    }

    #[test]
    fn test_default_json_is_hex() {
        let bits = BitSet::from(0xff00u32);
        assert_eq!(serde_json::to_string(&bits).unwrap(), r#""ff00""#);

        let neg = BitSet::from(-16);
        assert_eq!(serde_json::to_string(&neg).unwrap(), r#""...ffff0""#);

        let back: BitSet = serde_json::from_str(r#""...ffff0""#).unwrap();
        assert_eq!(back, neg);
        let back: BitSet = serde_json::from_str(r#""0xFF00""#).unwrap();
        assert_eq!(back, bits);
    }

    #[test]
    fn test_default_json_rejects_bad_digits() {
        let err = serde_json::from_str::<BitSet>(r#""12g""#).unwrap_err();
        assert!(err.to_string().contains("invalid digit 'g'"));
    }

    #[test]
    fn test_default_tokens() {
        assert_tokens(&BitSet::from(-2).readable(), &[Token::Str("...ffffe")]);
        assert_tokens(
            &BitSet::from(5).compact(),
            &[
                Token::Tuple { len: 2 },
                Token::Bool(false),
                Token::Seq { len: Some(1) },
                Token::U64(5),
                Token::SeqEnd,
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_default_postcard_roundtrip() {
        let mut bits = BitSet::from(i128::MIN);
        bits.insert(300);
        let bytes = postcard::to_allocvec(&bits).unwrap();
        let back: BitSet = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, bits);
        assert!(back.is_negative());
    }

    #[test]
    fn test_words_json() {
        let mut bits = BitSet::from(-1);
        bits.ensure_capacity(200);
        bits.clear_bit(64);
        let wrapper = WordsWrapper { bits };

        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"bits":[true,[{},{}]]}}"#, u64::MAX, u64::MAX - 1)
        );
        let back: WordsWrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapper);
    }

    #[test]
    fn test_words_trims_input() {
        let back: WordsWrapper = serde_json::from_str(r#"{"bits":[false,[7,0,0]]}"#).unwrap();
        assert_eq!(back.bits.word_len(), 1);
        assert_eq!(back.bits, BitSet::from(7));

        let empty: WordsWrapper = serde_json::from_str(r#"{"bits":[true,[]]}"#).unwrap();
        assert_eq!(empty.bits, BitSet::from(-1));
    }

    #[test]
    fn test_sorted_set_roundtrip() {
        let bits: BitSet = [1, 5, 10, 63, 64, 100].into_iter().collect();
        let wrapper = SortedSetWrapper { bits };

        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"bits":[1,5,10,63,64,100]}"#);
        let back: SortedSetWrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapper);
    }

    #[test]
    fn test_sorted_set_rejects_negative() {
        let wrapper = SortedSetWrapper {
            bits: BitSet::from(-1),
        };
        assert!(serde_json::to_string(&wrapper).is_err());
    }

    #[test]
    fn test_sorted_set_deserialize_unsorted_fails() {
        let result: Result<SortedSetWrapper, _> = serde_json::from_str(r#"{"bits":[10,5,15]}"#);
        assert!(result.is_err());
        let result: Result<SortedSetWrapper, _> = serde_json::from_str(r#"{"bits":[5,5]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sorted_set_postcard() {
        let wrapper = SortedSetWrapper {
            bits: vec![0, 7, 1000].into_iter().collect(),
        };
        let bytes = postcard::to_allocvec(&wrapper).unwrap();
        let back: SortedSetWrapper = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back.bits.to_vec(), vec![0, 7, 1000]);
    }
}
