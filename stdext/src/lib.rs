//! # stdext
//!
//! Extensions to the standard library:
//!
//! * [`tree::AaTree`], an arena-backed AA-tree ordered set with lookup by a separate key type;
//! * [`encoding::BaseEncoding`], bit-exact base16/base32/base64 codecs with custom alphabets,
//!   lookup tables and optional padding;
//! * [`value128::Value128`], a 128-bit unsigned value made of two 64-bit halves, plus
//!   conversions to GUIDs, IP addresses, bytes and fixed-width text.
//!
//! ```rust
//! use stdext::encoding::base32;
//! use stdext::tree::AaTree;
//! use stdext::value128::{Value128, convert};
//!
//! let mut ids = AaTree::<Value128>::new();
//! ids.add(Value128::new(1, 2));
//! ids.add(Value128::new(0, u64::MAX) + Value128::ONE);
//! assert!(ids.contains(&Value128::new(1, 0)));
//!
//! let text = convert::try_to_base32_string(Value128::new(1, 0), &base32::CROCKFORD).unwrap();
//! assert_eq!(text.len(), 26);
//! ```

use std::cmp::Ordering;

pub mod encoding;
pub mod error;
pub mod iter;
mod node;
pub mod stats;
pub mod tree;
pub mod utils;
pub mod value128;

pub use error::{Error, InvariantViolation, Result};

/// Ability to compare `self` against a `K`.
///
/// A tree of `V` needs `V: OrderedBy<V>` to place values and `V: OrderedBy<K>` to find them by
/// key. Every `Ord` type is ordered by itself through the blanket impl; implement the trait for
/// your own record types to look them up by one of their fields.
pub trait OrderedBy<K: ?Sized> {
    fn cmp_to(&self, key: &K) -> Ordering;
}

impl<T: Ord> OrderedBy<T> for T {
    #[inline]
    fn cmp_to(&self, key: &T) -> Ordering {
        self.cmp(key)
    }
}

impl OrderedBy<str> for String {
    #[inline]
    fn cmp_to(&self, key: &str) -> Ordering {
        self.as_str().cmp(key)
    }
}

impl OrderedBy<[u8]> for Vec<u8> {
    #[inline]
    fn cmp_to(&self, key: &[u8]) -> Ordering {
        self.as_slice().cmp(key)
    }
}
