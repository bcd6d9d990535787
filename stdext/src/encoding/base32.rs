//! Base32: five bytes per eight symbols, most significant bits first.

use crate::encoding::lookup::LookupTable;
use crate::encoding::{Base, BaseEncoding};

pub const HEX_ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUV";
pub const CROCKFORD_ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// "Extended hex" alphabet: encoded strings sort in the same order as the bytes. No padding.
pub static HEX: BaseEncoding = BaseEncoding::from_static(
    Base::Base32,
    HEX_ALPHABET,
    LookupTable::from_ascii_alphabet(HEX_ALPHABET.as_bytes()),
    None,
);

/// Crockford's alphabet. Decoding ignores case and reads `O` as `0` and `I`/`L` as `1`.
/// No padding.
pub static CROCKFORD: BaseEncoding = BaseEncoding::from_static(
    Base::Base32,
    CROCKFORD_ALPHABET,
    LookupTable::from_ascii_alphabet(CROCKFORD_ALPHABET.as_bytes())
        .with_alias(b'O', b'0')
        .with_alias(b'I', b'1')
        .with_alias(b'L', b'1')
        .case_insensitive(),
    None,
);

const GROUP_BYTES: usize = 5;
const GROUP_SYMBOLS: usize = 8;

// Symbol `i` of a 40-bit group.
#[inline]
fn symbol_at(group: u64, i: usize) -> usize {
    ((group >> (35 - 5 * i)) & 0x1F) as usize
}

pub(super) fn encode(symbols: &[u8], data: &[u8], out: &mut String) {
    let mut chunks = data.chunks_exact(GROUP_BYTES);
    for chunk in &mut chunks {
        let group = chunk.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64);
        for i in 0..GROUP_SYMBOLS {
            out.push(char::from(symbols[symbol_at(group, i)]));
        }
    }

    let tail = chunks.remainder();
    if tail.is_empty() {
        return;
    }
    // Left-align the partial group in 40 bits; the low bits stay zero.
    let group = tail
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | (*b as u64) << (32 - 8 * i));
    for i in 0..Base::Base32.unpadded_len(tail.len()) {
        out.push(char::from(symbols[symbol_at(group, i)]));
    }
}

// `input` holds a valid symbol count; the caller checked.
pub(super) fn decode(lookup: &LookupTable, input: &[u8], out: &mut Vec<u8>) -> Result<(), usize> {
    for (g, chunk) in input.chunks(GROUP_SYMBOLS).enumerate() {
        let base = g * GROUP_SYMBOLS;
        let mut group = 0u64;
        for i in 0..chunk.len() {
            group |= (lookup.resolve(input, base + i)? as u64) << (35 - 5 * i);
        }
        for j in 0..Base::Base32.decoded_len(chunk.len()) {
            out.push((group >> (32 - 8 * j)) as u8);
        }
    }
    Ok(())
}
