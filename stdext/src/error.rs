//! Error types for stdext.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the codecs and the value converters.
///
/// Argument errors (bad ranges, bad encoding configuration) and data-format errors
/// (malformed encoded text, wrong byte counts) are separate variants so callers can
/// tell a programming mistake from bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Alphabet length does not match the radix of the encoding.
    #[error("alphabet has {actual} symbols, base{expected} needs exactly {expected}")]
    AlphabetLength { expected: usize, actual: usize },

    /// Alphabet symbols must be 7-bit ASCII so they can index the lookup table.
    #[error("alphabet symbol {symbol:?} is not 7-bit ASCII")]
    NonAsciiSymbol { symbol: char },

    /// The same symbol occurs twice in an alphabet.
    #[error("alphabet symbol {symbol:?} appears more than once")]
    DuplicateSymbol { symbol: char },

    /// A supplied lookup table does not cover the 7-bit ASCII range.
    #[error("lookup table has {actual} entries, expected 128")]
    LookupTableLength { actual: usize },

    /// A supplied lookup table disagrees with the alphabet.
    #[error("lookup table maps {symbol:?} to {actual:#04x}, alphabet says {expected}")]
    LookupTableMismatch { symbol: char, expected: u8, actual: u8 },

    /// A lookup table entry is neither a symbol value of this base nor the invalid marker.
    #[error("lookup table entry {index} is {value:#04x}, not a symbol value or 0xff")]
    LookupTableValue { index: usize, value: u8 },

    /// Padding character is non-ASCII, part of the alphabet, or not allowed for this base.
    #[error("padding character {0:?} cannot be used with this encoding")]
    InvalidPadding(char),

    /// `offset + count` runs past the end of the input.
    #[error("range {offset}+{count} out of bounds for length {length}")]
    OutOfRange {
        offset: usize,
        count: usize,
        length: usize,
    },

    /// Encoded text has a length no encoder of this base can produce.
    #[error("encoded length {length} is not valid for base{base}")]
    InvalidLength { length: usize, base: u8 },

    /// Encoded text contains a symbol outside the alphabet.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// A fixed-size conversion received the wrong number of bytes.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidByteLength { expected: usize, actual: usize },
}

impl Error {
    /// True for errors caused by malformed input data rather than bad arguments.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidLength { .. }
                | Error::InvalidSymbol { .. }
                | Error::InvalidByteLength { .. }
        )
    }
}

/// A broken structural invariant found by [`crate::tree::AaTree::check_invariants`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("leaf at in-order position {position} has level {level}, expected 1")]
    LeafLevel { position: usize, level: u32 },

    #[error("left child at in-order position {position} has level {child} >= parent level {parent}")]
    HorizontalLeft {
        position: usize,
        parent: u32,
        child: u32,
    },

    #[error("right child at in-order position {position} has level {child} > parent level {parent}")]
    RightLevel {
        position: usize,
        parent: u32,
        child: u32,
    },

    #[error("two consecutive horizontal right links below in-order position {position}")]
    DoubleHorizontalRight { position: usize },

    #[error("node at in-order position {position} has level {level} but is missing a child")]
    MissingChild { position: usize, level: u32 },

    #[error("parent link broken at in-order position {position}")]
    ParentLink { position: usize },

    #[error("values out of order at in-order position {position}")]
    Order { position: usize },

    #[error("tree reports {reported} items but holds {actual}")]
    Count { reported: usize, actual: usize },
}
