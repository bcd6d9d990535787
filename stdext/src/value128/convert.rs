//! Conversions between [`Value128`] and GUIDs, IP addresses, raw bytes and text.
//!
//! All byte forms are big-endian: bytes `0..8` hold the higher half and `8..16` the lower
//! half. The base32 and base64 functions are unrolled for exactly 128 bits and produce the
//! same text as the generic [`BaseEncoding`] codec over [`to_byte_array`].
//!
//! ```rust
//! use stdext::encoding::base64;
//! use stdext::value128::{Value128, convert};
//!
//! let v = Value128::new(0x0123_4567_89AB_CDEF, 42);
//! let text = convert::try_to_base64_string(v, &base64::URL).unwrap();
//! assert_eq!(text, base64::URL.encode(&convert::to_byte_array(v)));
//! assert_eq!(convert::try_from_base64_string(&text, &base64::URL), Some(v));
//! ```

use std::net::{IpAddr, Ipv6Addr};

use uuid::Uuid;

use crate::encoding::{Base, BaseEncoding, LookupTable};
use crate::error::Error;
use crate::value128::Value128;

/// Bytes in the binary form.
pub const BYTE_LEN: usize = 16;

const BASE32_SYMBOLS: usize = 26;
const BASE64_SYMBOLS: usize = 22;

pub fn from_guid(guid: Uuid) -> Value128 {
    from_byte_array(*guid.as_bytes())
}

pub fn to_guid(value: Value128) -> Uuid {
    Uuid::from_bytes(to_byte_array(value))
}

pub fn to_byte_array(value: Value128) -> [u8; BYTE_LEN] {
    let mut bytes = [0; BYTE_LEN];
    bytes[..8].copy_from_slice(&value.higher().to_be_bytes());
    bytes[8..].copy_from_slice(&value.lower().to_be_bytes());
    bytes
}

pub fn from_byte_array(bytes: [u8; BYTE_LEN]) -> Value128 {
    let (higher, lower) = bytes.split_at(8);
    let mut h = [0; 8];
    let mut l = [0; 8];
    h.copy_from_slice(higher);
    l.copy_from_slice(lower);
    Value128::new(u64::from_be_bytes(h), u64::from_be_bytes(l))
}

/// `None` unless `bytes` holds exactly 16 bytes.
pub fn try_from_byte_array(bytes: &[u8]) -> Option<Value128> {
    Value128::try_from(bytes).ok()
}

/// IPv4 addresses are stored in their IPv4-mapped IPv6 form, `::ffff:a.b.c.d`.
pub fn from_ip_address(addr: IpAddr) -> Value128 {
    let v6 = match addr {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    };
    Value128::from(v6)
}

/// Parse an IPv4 or IPv6 address in text form.
pub fn try_from_ip_address(text: &str) -> Option<Value128> {
    match text.parse::<IpAddr>() {
        Ok(addr) => Some(from_ip_address(addr)),
        Err(err) => {
            tracing::debug!(%err, text, "rejected ip address");
            None
        }
    }
}

/// IPv4-mapped values come back as [`IpAddr::V4`], everything else as [`IpAddr::V6`].
pub fn to_ip_address(value: Value128) -> IpAddr {
    Ipv6Addr::from(value).to_canonical()
}

/// Fixed-width base32 text: 26 symbols, then padding if `encoding` has it.
/// `None` if `encoding` is not a base32 encoding.
pub fn try_to_base32_string(value: Value128, encoding: &BaseEncoding) -> Option<String> {
    if encoding.base() != Base::Base32 {
        return None;
    }
    let symbols = encoding.symbols();
    let (h, l) = (value.higher(), value.lower());
    let mut out = String::with_capacity(encoding.encoded_len(BYTE_LEN));
    let mut push = |index: u64| out.push(char::from(symbols[(index & 0x1F) as usize]));

    for i in 0..12 {
        push(h >> (59 - 5 * i));
    }
    push((h & 0xF) << 1 | l >> 63);
    for i in 0..12 {
        push(l >> (58 - 5 * i));
    }
    push((l & 0x7) << 2);

    encoding.push_padding(BASE32_SYMBOLS, &mut out);
    Some(out)
}

/// Inverse of [`try_to_base32_string`]. Padding is optional; the 26 data symbols are not.
pub fn try_from_base32_string(text: &str, encoding: &BaseEncoding) -> Option<Value128> {
    if encoding.base() != Base::Base32 {
        return None;
    }
    let v: [u64; BASE32_SYMBOLS] = fixed_symbols(text, encoding)?;

    let mut h = 0;
    for (i, s) in v[..12].iter().enumerate() {
        h |= s << (59 - 5 * i);
    }
    h |= v[12] >> 1;

    let mut l = (v[12] & 1) << 63;
    for (i, s) in v[13..25].iter().enumerate() {
        l |= s << (58 - 5 * i);
    }
    l |= v[25] >> 2;

    Some(Value128::new(h, l))
}

/// Fixed-width base64 text: 22 symbols, then padding if `encoding` has it.
/// `None` if `encoding` is not a base64 encoding.
pub fn try_to_base64_string(value: Value128, encoding: &BaseEncoding) -> Option<String> {
    if encoding.base() != Base::Base64 {
        return None;
    }
    let symbols = encoding.symbols();
    let (h, l) = (value.higher(), value.lower());
    let mut out = String::with_capacity(encoding.encoded_len(BYTE_LEN));
    let mut push = |index: u64| out.push(char::from(symbols[(index & 0x3F) as usize]));

    for i in 0..10 {
        push(h >> (58 - 6 * i));
    }
    push((h & 0xF) << 2 | l >> 62);
    for i in 0..10 {
        push(l >> (56 - 6 * i));
    }
    push((l & 0x3) << 4);

    encoding.push_padding(BASE64_SYMBOLS, &mut out);
    Some(out)
}

/// Inverse of [`try_to_base64_string`]. Padding is optional; the 22 data symbols are not.
pub fn try_from_base64_string(text: &str, encoding: &BaseEncoding) -> Option<Value128> {
    if encoding.base() != Base::Base64 {
        return None;
    }
    let v: [u64; BASE64_SYMBOLS] = fixed_symbols(text, encoding)?;

    let mut h = 0;
    for (i, s) in v[..10].iter().enumerate() {
        h |= s << (58 - 6 * i);
    }
    h |= v[10] >> 2;

    let mut l = (v[10] & 0x3) << 62;
    for (i, s) in v[11..21].iter().enumerate() {
        l |= s << (56 - 6 * i);
    }
    l |= v[21] >> 4;

    Some(Value128::new(h, l))
}

// Symbol values of exactly `N` data symbols, trailing padding removed.
fn fixed_symbols<const N: usize>(text: &str, encoding: &BaseEncoding) -> Option<[u64; N]> {
    let input = encoding.strip_padding(text.as_bytes());
    if input.len() != N {
        tracing::debug!(length = text.len(), base = %encoding.base(), "rejected fixed-width text");
        return None;
    }
    let lookup: &LookupTable = encoding.lookup();
    let mut values = [0u64; N];
    for (pos, value) in values.iter_mut().enumerate() {
        match lookup.resolve(input, pos) {
            Ok(v) => *value = v as u64,
            Err(pos) => {
                let err = crate::encoding::invalid_symbol(input, pos);
                tracing::debug!(%err, "rejected fixed-width text");
                return None;
            }
        }
    }
    Some(values)
}

impl From<Uuid> for Value128 {
    fn from(guid: Uuid) -> Self {
        from_guid(guid)
    }
}

impl From<Value128> for Uuid {
    fn from(value: Value128) -> Self {
        to_guid(value)
    }
}

impl From<[u8; BYTE_LEN]> for Value128 {
    fn from(bytes: [u8; BYTE_LEN]) -> Self {
        from_byte_array(bytes)
    }
}

impl From<Value128> for [u8; BYTE_LEN] {
    fn from(value: Value128) -> Self {
        to_byte_array(value)
    }
}

impl TryFrom<&[u8]> for Value128 {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; BYTE_LEN] = bytes.try_into().map_err(|_| Error::InvalidByteLength {
            expected: BYTE_LEN,
            actual: bytes.len(),
        })?;
        Ok(from_byte_array(bytes))
    }
}

impl From<Ipv6Addr> for Value128 {
    fn from(addr: Ipv6Addr) -> Self {
        from_byte_array(addr.octets())
    }
}

impl From<Value128> for Ipv6Addr {
    fn from(value: Value128) -> Self {
        Ipv6Addr::from(to_byte_array(value))
    }
}
