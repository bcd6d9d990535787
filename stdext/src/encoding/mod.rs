//! Base16, base32 and base64 binary-to-text encodings.
//!
//! A [`BaseEncoding`] is an immutable configuration: the radix, an alphabet with exactly
//! that many ASCII symbols, a 128-entry [`LookupTable`] for decoding and an optional
//! padding character. Bits are packed big-endian within each group (1 byte to 2 symbols
//! for base16, 5 to 8 for base32, 3 to 4 for base64). A short final group is zero-filled
//! up to the next symbol boundary and, when padding is configured, filled out to a whole
//! group with the padding character.
//!
//! Ready-made encodings live in [`base16`], [`base32`] and [`base64`].
//!
//! ```rust
//! use stdext::encoding::{base32, base64};
//!
//! let data = [160, 234, 189, 168, 131, 204];
//! assert_eq!(base32::HEX.encode(&data[..3]), "K3LBQ");
//! assert_eq!(base64::URL.encode(&data[..1]), "oA");
//! assert_eq!(base64::MIME.encode(&data[..1]), "oA==");
//!
//! assert_eq!(base64::MIME.decode("oA==").unwrap(), vec![160]);
//! assert!(base32::HEX.decode("012+").is_err());
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

pub mod base16;
pub mod base32;
pub mod base64;
pub mod lookup;

pub use lookup::{INVALID, LookupTable, TABLE_SIZE};

/// Radix of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    Base16,
    Base32,
    Base64,
}

impl Base {
    /// Number of symbols in the alphabet.
    pub const fn radix(self) -> usize {
        match self {
            Base::Base16 => 16,
            Base::Base32 => 32,
            Base::Base64 => 64,
        }
    }

    pub const fn bits_per_symbol(self) -> usize {
        match self {
            Base::Base16 => 4,
            Base::Base32 => 5,
            Base::Base64 => 6,
        }
    }

    /// Bytes in one full group.
    pub const fn group_bytes(self) -> usize {
        match self {
            Base::Base16 => 1,
            Base::Base32 => 5,
            Base::Base64 => 3,
        }
    }

    /// Symbols in one full group.
    pub const fn group_symbols(self) -> usize {
        match self {
            Base::Base16 => 2,
            Base::Base32 => 8,
            Base::Base64 => 4,
        }
    }

    /// Symbols needed for `bytes` bytes, before padding.
    pub const fn unpadded_len(self, bytes: usize) -> usize {
        (bytes * 8).div_ceil(self.bits_per_symbol())
    }

    /// Whether an encoder can emit exactly `symbols` data symbols. The leftover bits of the
    /// final symbol must be fewer than a whole symbol, so e.g. a single trailing base64
    /// symbol is never valid.
    pub const fn is_valid_symbol_count(self, symbols: usize) -> bool {
        let bits = self.bits_per_symbol();
        (symbols * bits) % 8 < bits
    }

    /// Bytes carried by `symbols` data symbols.
    pub const fn decoded_len(self, symbols: usize) -> usize {
        symbols * self.bits_per_symbol() / 8
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base{}", self.radix())
    }
}

/// An immutable base-N codec configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct BaseEncoding {
    base: Base,
    alphabet: Cow<'static, str>,
    lookup: LookupTable,
    padding: Option<u8>,
}

impl BaseEncoding {
    /// Encoding over `alphabet`, decoding with the exact inverse table.
    pub fn new(base: Base, alphabet: &str, padding: Option<char>) -> Result<Self> {
        let lookup = LookupTable::from_alphabet(alphabet).inspect_err(log_rejection)?;
        Self::validated(base, alphabet, lookup, padding)
    }

    /// Encoding over `alphabet` with a caller-built decode table, e.g. one that also accepts
    /// lower case or look-alike characters. The table must have 128 entries and map every
    /// alphabet symbol to its index.
    pub fn with_lookup_table(
        base: Base,
        alphabet: &str,
        table: &[u8],
        padding: Option<char>,
    ) -> Result<Self> {
        let lookup = LookupTable::from_slice(table).inspect_err(log_rejection)?;
        Self::validated(base, alphabet, lookup, padding)
    }

    /// The same encoding with a different padding character (or none).
    pub fn with_padding(&self, padding: Option<char>) -> Result<Self> {
        let padding = check_padding(self.base, &self.lookup, padding).inspect_err(log_rejection)?;
        Ok(Self {
            padding,
            ..self.clone()
        })
    }

    pub(crate) const fn from_static(
        base: Base,
        alphabet: &'static str,
        lookup: LookupTable,
        padding: Option<u8>,
    ) -> Self {
        Self {
            base,
            alphabet: Cow::Borrowed(alphabet),
            lookup,
            padding,
        }
    }

    fn validated(
        base: Base,
        alphabet: &str,
        lookup: LookupTable,
        padding: Option<char>,
    ) -> Result<Self> {
        check_alphabet(base, alphabet, &lookup)
            .and_then(|_| check_table_values(base, &lookup))
            .and_then(|_| check_padding(base, &lookup, padding))
            .map(|padding| Self {
                base,
                alphabet: Cow::Owned(alphabet.to_owned()),
                lookup,
                padding,
            })
            .inspect_err(log_rejection)
    }

    #[inline]
    pub fn base(&self) -> Base {
        self.base
    }

    #[inline]
    pub fn alphabet(&self) -> &str {
        &self.alphabet
    }

    #[inline]
    pub fn lookup_table(&self) -> &[u8; TABLE_SIZE] {
        self.lookup.as_array()
    }

    #[inline]
    pub fn padding(&self) -> Option<char> {
        self.padding.map(char::from)
    }

    #[inline]
    pub(crate) fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    #[inline]
    pub(crate) fn symbols(&self) -> &[u8] {
        self.alphabet.as_bytes()
    }

    /// Length of `encode` output for `bytes` input bytes, padding included.
    pub fn encoded_len(&self, bytes: usize) -> usize {
        let len = self.base.unpadded_len(bytes);
        match self.padding {
            Some(_) => len.next_multiple_of(self.base.group_symbols()),
            None => len,
        }
    }

    /// Upper bound on the bytes decoded from `symbols` characters of text.
    pub fn decoded_len(&self, symbols: usize) -> usize {
        self.base.decoded_len(symbols)
    }

    /// Encode `data`. Never fails; empty input gives an empty string.
    pub fn encode(&self, data: &[u8]) -> String {
        let mut out = String::with_capacity(self.encoded_len(data.len()));
        self.encode_into(data, &mut out);
        out
    }

    /// Encode `data`, appending to `out`.
    pub fn encode_into(&self, data: &[u8], out: &mut String) {
        let start = out.len();
        match self.base {
            Base::Base16 => base16::encode(self.symbols(), data, out),
            Base::Base32 => base32::encode(self.symbols(), data, out),
            Base::Base64 => base64::encode(self.symbols(), data, out),
        }
        self.push_padding(out.len() - start, out);
    }

    pub(crate) fn push_padding(&self, written: usize, out: &mut String) {
        if let Some(p) = self.padding {
            let group = self.base.group_symbols();
            let missing = (group - written % group) % group;
            out.extend(std::iter::repeat_n(char::from(p), missing));
        }
    }

    /// Encode `count` bytes of `data` starting at `offset`.
    pub fn encode_range(&self, data: &[u8], offset: usize, count: usize) -> Result<String> {
        check_range(data.len(), offset, count)?;
        if count == 0 {
            return Ok(String::new());
        }
        Ok(self.encode(&data[offset..offset + count]))
    }

    /// [`BaseEncoding::encode_range`] reporting a bad range as `None`.
    pub fn try_encode_range(&self, data: &[u8], offset: usize, count: usize) -> Option<String> {
        self.encode_range(data, offset, count).ok()
    }

    /// Decode `text`.
    ///
    /// Trailing padding characters are ignored when the encoding has padding. Fails with
    /// [`Error::InvalidLength`] if no encoder could have produced that many symbols and with
    /// [`Error::InvalidSymbol`] on the first character outside the alphabet.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        self.decode_bytes(text.as_bytes())
    }

    /// Decode `text`, appending to `out`. On error `out` is left as it was.
    pub fn decode_into(&self, text: &str, out: &mut Vec<u8>) -> Result<()> {
        self.decode_bytes_into(text.as_bytes(), out)
    }

    /// Decode `count` bytes of `text` starting at byte `offset`.
    pub fn decode_range(&self, text: &str, offset: usize, count: usize) -> Result<Vec<u8>> {
        check_range(text.len(), offset, count)?;
        if count == 0 {
            return Ok(Vec::new());
        }
        self.decode_bytes(&text.as_bytes()[offset..offset + count])
    }

    /// [`BaseEncoding::decode`] reporting failure as `None`.
    pub fn try_decode(&self, text: &str) -> Option<Vec<u8>> {
        self.decode(text).ok()
    }

    /// [`BaseEncoding::decode_range`] reporting failure as `None`.
    pub fn try_decode_range(&self, text: &str, offset: usize, count: usize) -> Option<Vec<u8>> {
        self.decode_range(text, offset, count).ok()
    }

    /// Decode ASCII text held in a byte buffer.
    pub fn decode_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.decoded_len(input.len()));
        self.decode_bytes_into(input, &mut out)?;
        Ok(out)
    }

    fn decode_bytes_into(&self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let symbols = self.strip_padding(input);
        if !self.base.is_valid_symbol_count(symbols.len()) {
            let err = Error::InvalidLength {
                length: input.len(),
                base: self.base.radix() as u8,
            };
            tracing::debug!(%err, "rejected encoded text");
            return Err(err);
        }
        let start = out.len();
        out.reserve(self.decoded_len(symbols.len()));
        let decoded = match self.base {
            Base::Base16 => base16::decode(&self.lookup, symbols, out),
            Base::Base32 => base32::decode(&self.lookup, symbols, out),
            Base::Base64 => base64::decode(&self.lookup, symbols, out),
        };
        decoded.map_err(|position| {
            out.truncate(start);
            let err = invalid_symbol(input, position);
            tracing::debug!(%err, "rejected encoded text");
            err
        })
    }

    /// `input` without its trailing padding characters.
    pub(crate) fn strip_padding<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        match self.padding {
            Some(p) => {
                let end = input.iter().rposition(|b| *b != p).map_or(0, |i| i + 1);
                &input[..end]
            }
            None => input,
        }
    }
}

impl fmt::Debug for BaseEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseEncoding")
            .field("base", &self.base)
            .field("alphabet", &self.alphabet)
            .field("padding", &self.padding())
            .finish()
    }
}

pub(crate) fn invalid_symbol(input: &[u8], position: usize) -> Error {
    let symbol = String::from_utf8_lossy(&input[position..])
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Error::InvalidSymbol { symbol, position }
}

fn check_range(length: usize, offset: usize, count: usize) -> Result<()> {
    match offset.checked_add(count) {
        Some(end) if end <= length => Ok(()),
        _ => Err(Error::OutOfRange {
            offset,
            count,
            length,
        }),
    }
}

fn check_alphabet(base: Base, alphabet: &str, lookup: &LookupTable) -> Result<()> {
    let mut len = 0;
    for (i, symbol) in alphabet.chars().enumerate() {
        if !symbol.is_ascii() {
            return Err(Error::NonAsciiSymbol { symbol });
        }
        let actual = lookup.get(symbol as u8);
        if actual as usize != i {
            return Err(Error::LookupTableMismatch {
                symbol,
                expected: i as u8,
                actual,
            });
        }
        len += 1;
    }
    if len != base.radix() {
        return Err(Error::AlphabetLength {
            expected: base.radix(),
            actual: len,
        });
    }
    Ok(())
}

// Decode ORs table values straight into the bit group, so anything at or above the radix
// would corrupt output.
fn check_table_values(base: Base, lookup: &LookupTable) -> Result<()> {
    match lookup
        .as_array()
        .iter()
        .enumerate()
        .find(|(_, v)| **v != INVALID && **v as usize >= base.radix())
    {
        Some((index, value)) => Err(Error::LookupTableValue {
            index,
            value: *value,
        }),
        None => Ok(()),
    }
}

fn check_padding(base: Base, lookup: &LookupTable, padding: Option<char>) -> Result<Option<u8>> {
    let Some(p) = padding else {
        return Ok(None);
    };
    if base == Base::Base16 || !p.is_ascii() || lookup.get(p as u8) != INVALID {
        return Err(Error::InvalidPadding(p));
    }
    Ok(Some(p as u8))
}

fn log_rejection(err: &Error) {
    tracing::debug!(%err, "rejected base encoding configuration");
}

#[cfg(test)]
mod tests {
    use crate::encoding::{Base, BaseEncoding, INVALID, LookupTable, base16, base32, base64};
    use crate::error::Error;

    const SAMPLE: [u8; 6] = [160, 234, 189, 168, 131, 204];

    #[test]
    fn test_valid_symbol_counts() {
        let valid = |b: Base| (0..17).filter(|n| b.is_valid_symbol_count(*n)).collect::<Vec<_>>();
        assert_eq!(valid(Base::Base16), vec![0, 2, 4, 6, 8, 10, 12, 14, 16]);
        assert_eq!(valid(Base::Base32), vec![0, 2, 4, 5, 7, 8, 10, 12, 13, 15, 16]);
        assert_eq!(valid(Base::Base64), vec![0, 2, 3, 4, 6, 7, 8, 10, 11, 12, 14, 15, 16]);
    }

    #[test]
    fn test_encoded_len_matches_output() {
        for enc in [&base32::HEX, &base64::MIME, &base64::URL] {
            for n in 0..=SAMPLE.len() {
                assert_eq!(enc.encode(&SAMPLE[..n]).len(), enc.encoded_len(n));
            }
        }
    }

    #[test]
    fn test_custom_alphabet() {
        let enc = BaseEncoding::new(Base::Base32, "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567", Some('='))
            .unwrap();
        // RFC 4648 test vectors.
        assert_eq!(enc.encode(b""), "");
        assert_eq!(enc.encode(b"f"), "MY======");
        assert_eq!(enc.encode(b"fo"), "MZXQ====");
        assert_eq!(enc.encode(b"foo"), "MZXW6===");
        assert_eq!(enc.encode(b"foob"), "MZXW6YQ=");
        assert_eq!(enc.encode(b"fooba"), "MZXW6YTB");
        assert_eq!(enc.encode(b"foobar"), "MZXW6YTBOI======");
        assert_eq!(enc.decode("MZXW6YTBOI======").unwrap(), b"foobar");
        assert_eq!(enc.decode("MZXW6YTBOI").unwrap(), b"foobar");
        assert_eq!(enc.padding(), Some('='));
        assert_eq!(enc.lookup_table()[b'7' as usize], 31);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            BaseEncoding::new(Base::Base16, "0123456789ABCDE", None),
            Err(Error::AlphabetLength {
                expected: 16,
                actual: 15
            })
        );
        assert_eq!(
            BaseEncoding::new(Base::Base16, "0123456789ABCDEF", Some('=')),
            Err(Error::InvalidPadding('='))
        );
        assert_eq!(
            base64::MIME.with_padding(Some('A')),
            Err(Error::InvalidPadding('A'))
        );
        assert_eq!(
            BaseEncoding::with_lookup_table(Base::Base16, "0123456789ABCDEF", &[INVALID; 64], None),
            Err(Error::LookupTableLength { actual: 64 })
        );
        let table = LookupTable::from_alphabet("0123456789ABCDEF").unwrap();
        assert_eq!(
            BaseEncoding::with_lookup_table(Base::Base16, "0123456789abcdef", table.as_array(), None),
            Err(Error::LookupTableMismatch {
                symbol: 'a',
                expected: 10,
                actual: INVALID
            })
        );
    }

    #[test]
    fn test_lookup_table_values_must_fit_radix() {
        let mut table = *base16::HEX.lookup_table();
        table[b'G' as usize] = 0x20;
        assert_eq!(
            BaseEncoding::with_lookup_table(Base::Base16, base16::HEX_ALPHABET, &table, None),
            Err(Error::LookupTableValue {
                index: b'G' as usize,
                value: 0x20
            })
        );

        // An alias onto a real symbol value is fine.
        table[b'G' as usize] = 0x0F;
        let enc =
            BaseEncoding::with_lookup_table(Base::Base16, base16::HEX_ALPHABET, &table, None)
                .unwrap();
        assert_eq!(enc.decode("GG").unwrap(), vec![0xFF]);
        assert_eq!(enc.decode("0G").unwrap(), vec![0x0F]);
    }

    #[test]
    fn test_with_lookup_table_accepts_aliases() {
        let table = LookupTable::from_alphabet("0123456789ABCDEF")
            .unwrap()
            .case_insensitive();
        let enc =
            BaseEncoding::with_lookup_table(Base::Base16, "0123456789ABCDEF", table.as_array(), None)
                .unwrap();
        assert_eq!(enc.decode("ff0a").unwrap(), vec![0xFF, 0x0A]);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(base32::HEX.encode_range(&SAMPLE, 0, 3).unwrap(), "K3LBQ");
        assert_eq!(base64::URL.encode_range(&SAMPLE, 0, 1).unwrap(), "oA");
        assert_eq!(base64::URL.encode_range(&SAMPLE, 6, 0).unwrap(), "");
        assert_eq!(
            base64::URL.encode_range(&SAMPLE, 4, 3),
            Err(Error::OutOfRange {
                offset: 4,
                count: 3,
                length: 6
            })
        );
        assert!(base64::URL.try_encode_range(&SAMPLE, usize::MAX, 2).is_none());

        assert_eq!(base64::URL.decode_range("xxoAxx", 2, 2).unwrap(), vec![160]);
        assert_eq!(base64::URL.decode_range("oA", 1, 0).unwrap(), Vec::<u8>::new());
        assert!(base64::URL.try_decode_range("oA", 1, 2).is_none());
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            base32::HEX.decode("012+"),
            Err(Error::InvalidSymbol {
                symbol: '+',
                position: 3
            })
        );
        assert_eq!(
            base64::MIME.decode("A"),
            Err(Error::InvalidLength {
                length: 1,
                base: 64
            })
        );
        assert_eq!(
            base64::URL.decode("oA=="),
            Err(Error::InvalidSymbol {
                symbol: '=',
                position: 2
            })
        );
        // Positions are byte offsets; "é" is two bytes of text.
        assert_eq!(
            base64::URL.decode("oé"),
            Err(Error::InvalidSymbol {
                symbol: 'é',
                position: 1
            })
        );
        assert_eq!(
            base64::URL.decode("ééAA"),
            Err(Error::InvalidSymbol {
                symbol: 'é',
                position: 0
            })
        );
        assert!(base64::URL.try_decode("ééAA").is_none());
        assert!(Error::InvalidLength { length: 1, base: 64 }.is_format_error());
    }

    #[test]
    fn test_decode_into_keeps_buffer_on_error() {
        let mut out = vec![1, 2, 3];
        assert!(base32::HEX.decode_into("K3L+", &mut out).is_err());
        assert_eq!(out, vec![1, 2, 3]);
        base32::HEX.decode_into("K3LBQ", &mut out).unwrap();
        assert_eq!(out, vec![1, 2, 3, 160, 234, 189]);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = String::from("id=");
        base64::MIME.encode_into(&SAMPLE[..2], &mut out);
        assert_eq!(out, "id=oOo=");
    }

    #[test]
    fn test_padding_only_text() {
        assert_eq!(base64::MIME.decode("====").unwrap(), Vec::<u8>::new());
        assert_eq!(base64::MIME.decode("").unwrap(), Vec::<u8>::new());
    }
}
