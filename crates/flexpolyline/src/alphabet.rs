//! The 64-symbol URL-safe alphabet.
//!
//! Every symbol carries 6 bits. Decoding goes through a lookup table indexed by
//! `byte - 45`, since `-` (45) is the lowest and `z` (122) the highest code point
//! in the alphabet.

/// Symbols in index order: `A-Z`, `a-z`, `0-9`, `-`, `_`.
pub const ENCODING_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Code point of the first entry in [`DECODING_TABLE`].
pub const DECODING_OFFSET: u8 = b'-';

/// Marks table slots that do not correspond to an alphabet symbol.
const INVALID: u8 = 0xFF;

/// Inverse of [`ENCODING_TABLE`], indexed by `byte - DECODING_OFFSET`.
pub const DECODING_TABLE: [u8; 78] = build_decoding_table();

#[allow(clippy::cast_possible_truncation)]
const fn build_decoding_table() -> [u8; 78] {
    let mut table = [INVALID; 78];
    let mut i = 0;
    while i < ENCODING_TABLE.len() {
        table[(ENCODING_TABLE[i] - DECODING_OFFSET) as usize] = i as u8;
        i += 1;
    }
    table
}

/// Map a 6-bit value to its symbol.
///
/// Only the low 6 bits of `value` are used.
#[must_use]
#[inline]
pub fn encode_char(value: u8) -> char {
    debug_assert!(value < 64, "value {value} does not fit in 6 bits");
    char::from(ENCODING_TABLE[usize::from(value & 0x3F)])
}

/// Map a symbol back to its 6-bit value.
///
/// Returns `None` for bytes outside the alphabet.
#[must_use]
#[inline]
pub fn decode_char(byte: u8) -> Option<u8> {
    let pos = byte.checked_sub(DECODING_OFFSET)?;
    match DECODING_TABLE.get(usize::from(pos)) {
        Some(&value) if value != INVALID => Some(value),
        _ => None,
    }
}
