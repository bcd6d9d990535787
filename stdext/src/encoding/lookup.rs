use std::fmt;

use crate::error::{Error, Result};

/// Lookup-table entry for a code point that is not a symbol.
pub const INVALID: u8 = 0xFF;

/// Lookup tables are indexed by 7-bit ASCII code points.
pub const TABLE_SIZE: usize = 128;

/// Maps an ASCII code point to its symbol value, or [`INVALID`].
///
/// The hot decode loops index straight into this table and branch on the sentinel, so it
/// stays a plain byte array rather than an array of `Option`s.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LookupTable([u8; TABLE_SIZE]);

impl LookupTable {
    pub const EMPTY: LookupTable = LookupTable([INVALID; TABLE_SIZE]);

    /// Build the table for `alphabet`, checking that every symbol is ASCII and unique.
    pub fn from_alphabet(alphabet: &str) -> Result<Self> {
        let mut table = [INVALID; TABLE_SIZE];
        for (i, symbol) in alphabet.chars().enumerate() {
            if !symbol.is_ascii() {
                return Err(Error::NonAsciiSymbol { symbol });
            }
            let slot = &mut table[symbol as usize];
            if *slot != INVALID {
                return Err(Error::DuplicateSymbol { symbol });
            }
            *slot = i as u8;
        }
        Ok(Self(table))
    }

    /// Adopt a caller-supplied table. It must have exactly [`TABLE_SIZE`] entries.
    pub fn from_slice(table: &[u8]) -> Result<Self> {
        let table: [u8; TABLE_SIZE] = table
            .try_into()
            .map_err(|_| Error::LookupTableLength {
                actual: table.len(),
            })?;
        Ok(Self(table))
    }

    /// Compile-time table construction for alphabets known to be valid.
    pub(crate) const fn from_ascii_alphabet(alphabet: &[u8]) -> Self {
        let mut table = [INVALID; TABLE_SIZE];
        let mut i = 0;
        while i < alphabet.len() {
            table[alphabet[i] as usize] = i as u8;
            i += 1;
        }
        Self(table)
    }

    /// Make `alias` decode to the same value as `target`.
    pub const fn with_alias(self, alias: u8, target: u8) -> Self {
        let mut table = self.0;
        if (alias as usize) < TABLE_SIZE && (target as usize) < TABLE_SIZE {
            table[alias as usize] = table[target as usize];
        }
        Self(table)
    }

    /// Give every mapped letter's other case the same value, unless that case is already mapped.
    pub const fn case_insensitive(self) -> Self {
        let mut table = self.0;
        let mut c = b'A';
        while c <= b'Z' {
            let upper = c as usize;
            let lower = c.to_ascii_lowercase() as usize;
            if table[upper] != INVALID && table[lower] == INVALID {
                table[lower] = table[upper];
            } else if table[lower] != INVALID && table[upper] == INVALID {
                table[upper] = table[lower];
            }
            c += 1;
        }
        Self(table)
    }

    /// Symbol value of `symbol`, [`INVALID`] for anything outside the table.
    #[inline]
    pub fn get(&self, symbol: u8) -> u8 {
        match self.0.get(symbol as usize) {
            Some(v) => *v,
            None => INVALID,
        }
    }

    // Symbol value at `input[pos]`, or the position back as the error.
    #[inline]
    pub(crate) fn resolve(&self, input: &[u8], pos: usize) -> std::result::Result<u32, usize> {
        match self.get(input[pos]) {
            INVALID => Err(pos),
            v => Ok(v as u32),
        }
    }

    pub fn as_array(&self) -> &[u8; TABLE_SIZE] {
        &self.0
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.0
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| **v != INVALID)
                    .map(|(c, v)| (c as u8 as char, *v)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::encoding::lookup::{INVALID, LookupTable, TABLE_SIZE};
    use crate::error::Error;

    #[test]
    fn table_inverts_alphabet() {
        let alphabet = "0123456789abcdef";
        let table = LookupTable::from_alphabet(alphabet).unwrap();
        for (i, c) in alphabet.bytes().enumerate() {
            assert_eq!(table.get(c), i as u8);
        }
        let mapped = table.as_array().iter().filter(|v| **v != INVALID).count();
        assert_eq!(mapped, 16);
        assert_eq!(table.get(b'A'), INVALID);
        assert_eq!(table.get(0xC3), INVALID);
    }

    #[test]
    fn const_and_checked_builders_agree() {
        let alphabet = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
        assert_eq!(
            LookupTable::from_ascii_alphabet(alphabet.as_bytes()),
            LookupTable::from_alphabet(alphabet).unwrap()
        );
    }

    #[test]
    fn rejects_bad_alphabets() {
        assert_eq!(
            LookupTable::from_alphabet("abca"),
            Err(Error::DuplicateSymbol { symbol: 'a' })
        );
        assert_eq!(
            LookupTable::from_alphabet("abcé"),
            Err(Error::NonAsciiSymbol { symbol: 'é' })
        );
    }

    #[test]
    fn from_slice_requires_128_entries() {
        assert_eq!(
            LookupTable::from_slice(&[INVALID; 127]),
            Err(Error::LookupTableLength { actual: 127 })
        );
        assert!(LookupTable::from_slice(&[INVALID; TABLE_SIZE]).is_ok());
    }

    #[test]
    fn case_folding_and_aliases() {
        let table = LookupTable::from_ascii_alphabet(b"01AB")
            .with_alias(b'O', b'0')
            .case_insensitive();
        assert_eq!(table.get(b'a'), 2);
        assert_eq!(table.get(b'b'), 3);
        assert_eq!(table.get(b'O'), 0);
        assert_eq!(table.get(b'o'), 0);
        assert_eq!(table.get(b'c'), INVALID);
    }
}
