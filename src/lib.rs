//! A growable bitset that is also an infinite-precision two's-complement
//! integer.
//!
//! [`BitSet`] stores a finite prefix of 64-bit words plus a sign flag. Every
//! bit above the prefix reads as the sign, so `-1` is "all bits set
//! forever" and the one's complement of a finite set is well defined.
//!
//! # Features
//!
//! - **Lazy growth**: writing past the end extends the storage with the sign
//!   fill; reads past the end never allocate
//! - **Canonical form**: trailing words that repeat the sign are trimmed, so
//!   equality and hashing are by value
//! - **Bitwise algebra** (and, or, xor, and-not, complement) over operands
//!   of different widths and signs
//! - **Radix conversion** to and from strings in any radix from 2 to 36,
//!   with a `...` marker for the infinite run of ones
//! - **Serialization support** via serde and rkyv (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use signed_bitset::BitSet;
//!
//! let mut bits = BitSet::new();
//! bits.insert(10).insert(42);
//!
//! assert!(bits.get(10));
//! assert!(!bits.get(11));
//! assert_eq!(bits.msb(), Some(42));
//!
//! // Complement: every bit except 10 and 42 is set, forever.
//! let rest = !&bits;
//! assert!(rest.get(1_000_000));
//! assert_eq!(rest.cardinality(), None);
//! assert_eq!(rest.count_zeros(), Some(2));
//!
//! // Slices read the tail from the sign.
//! assert_eq!(rest.slice(40, 45).to_string(), "11011");
//!
//! // Integers convert both ways.
//! assert_eq!(BitSet::from(-5).to_string(), "...1111011");
//! assert_eq!(i64::try_from(&BitSet::from(-5)), Ok(-5));
//! ```
//!
//! # Radix strings
//!
//! ```
//! use signed_bitset::BitSet;
//!
//! let bits = BitSet::from_str_radix("0xff900018283821283", 16)?;
//! assert_eq!(bits.slice(16, 32).to_string_radix(16), "8382");
//! assert_eq!(BitSet::from(19219).to_string_radix(10), "19219");
//! assert_eq!(format!("{:#x}", BitSet::from(-16)), "0x...ffff0");
//! # Ok::<(), signed_bitset::ParseBitSetError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bitset;
mod iter;
mod macros;
mod radix;
mod set_ops;
pub mod storage;
pub mod traits;

#[cfg(feature = "rkyv")]
pub mod rkyv;

#[cfg(feature = "rkyv")]
pub use crate::rkyv::{ArchivedBitSet, BitSetResolver};

#[cfg(feature = "serde")]
pub mod serde;

pub use bitset::BitSet;
pub use iter::{BitIter, IntoIter, Iter};
pub use storage::{BitSetBuilder, WORD_BITS};
pub use traits::{ParseBitSetError, TryFromBitSetError};
