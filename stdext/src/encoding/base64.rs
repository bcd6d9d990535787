//! Base64: three bytes per four symbols, most significant bits first.

use crate::encoding::lookup::LookupTable;
use crate::encoding::{Base, BaseEncoding};

pub const MIME_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
pub const URL_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
pub const LEX_ALPHABET: &str = "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// RFC 4648 standard alphabet with `=` padding.
pub static MIME: BaseEncoding = BaseEncoding::from_static(
    Base::Base64,
    MIME_ALPHABET,
    LookupTable::from_ascii_alphabet(MIME_ALPHABET.as_bytes()),
    Some(b'='),
);

/// RFC 4648 URL- and filename-safe alphabet, unpadded.
pub static URL: BaseEncoding = BaseEncoding::from_static(
    Base::Base64,
    URL_ALPHABET,
    LookupTable::from_ascii_alphabet(URL_ALPHABET.as_bytes()),
    None,
);

/// Alphabet in ASCII order, unpadded: encodings of equal-length inputs sort like the inputs.
pub static LEX: BaseEncoding = BaseEncoding::from_static(
    Base::Base64,
    LEX_ALPHABET,
    LookupTable::from_ascii_alphabet(LEX_ALPHABET.as_bytes()),
    None,
);

#[inline]
fn push_symbols(symbols: &[u8], group: u32, count: usize, out: &mut String) {
    for i in 0..count {
        out.push(char::from(symbols[((group >> (18 - 6 * i)) & 0x3F) as usize]));
    }
}

pub(super) fn encode(symbols: &[u8], data: &[u8], out: &mut String) {
    let mut chunks = data.chunks_exact(3);
    for c in &mut chunks {
        let group = (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32;
        push_symbols(symbols, group, 4, out);
    }
    match *chunks.remainder() {
        [a] => push_symbols(symbols, (a as u32) << 16, 2, out),
        [a, b] => push_symbols(symbols, (a as u32) << 16 | (b as u32) << 8, 3, out),
        _ => {}
    }
}

// `input` holds a valid symbol count; the caller checked.
pub(super) fn decode(lookup: &LookupTable, input: &[u8], out: &mut Vec<u8>) -> Result<(), usize> {
    let mut pos = 0;
    while pos + 4 <= input.len() {
        let group = lookup.resolve(input, pos)? << 18
            | lookup.resolve(input, pos + 1)? << 12
            | lookup.resolve(input, pos + 2)? << 6
            | lookup.resolve(input, pos + 3)?;
        out.extend_from_slice(&[(group >> 16) as u8, (group >> 8) as u8, group as u8]);
        pos += 4;
    }
    match input.len() - pos {
        2 => {
            let group = lookup.resolve(input, pos)? << 18 | lookup.resolve(input, pos + 1)? << 12;
            out.push((group >> 16) as u8);
        }
        3 => {
            let group = lookup.resolve(input, pos)? << 18
                | lookup.resolve(input, pos + 1)? << 12
                | lookup.resolve(input, pos + 2)? << 6;
            out.extend_from_slice(&[(group >> 16) as u8, (group >> 8) as u8]);
        }
        _ => {}
    }
    Ok(())
}
