//! Base16 (hex): one byte per two symbols, high nibble first.

use crate::encoding::lookup::LookupTable;
use crate::encoding::{Base, BaseEncoding};

pub const HEX_ALPHABET: &str = "0123456789ABCDEF";

/// Upper-case hex digits; decoding accepts either case.
pub static HEX: BaseEncoding = BaseEncoding::from_static(
    Base::Base16,
    HEX_ALPHABET,
    LookupTable::from_ascii_alphabet(HEX_ALPHABET.as_bytes()).case_insensitive(),
    None,
);

pub(super) fn encode(symbols: &[u8], data: &[u8], out: &mut String) {
    for &b in data {
        out.push(char::from(symbols[(b >> 4) as usize]));
        out.push(char::from(symbols[(b & 0x0F) as usize]));
    }
}

// `input` has an even length; the caller checked.
pub(super) fn decode(lookup: &LookupTable, input: &[u8], out: &mut Vec<u8>) -> Result<(), usize> {
    for pos in (0..input.len()).step_by(2) {
        let hi = lookup.resolve(input, pos)?;
        let lo = lookup.resolve(input, pos + 1)?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(())
}
