//! Variable-length unsigned integers over the 64-symbol alphabet.

use crate::alphabet::{decode_char, encode_char};
use crate::error::{PolylineError, PolylineResult};

/// Data bits carried by each symbol.
const DATA_MASK: u64 = 0x1F;
/// Set on every symbol except the last one of a varint.
const CONTINUATION_BIT: u8 = 0x20;

/// Append `value` to `out` as a varint.
///
/// Each symbol contributes 5 bits to the value, least-significant group first,
/// with bit 5 set on every symbol that is followed by another.
pub fn write_unsigned_varint(mut value: u64, out: &mut String) {
    while value > DATA_MASK {
        // Both operands fit in 6 bits.
        #[allow(clippy::cast_possible_truncation)]
        let symbol = (value & DATA_MASK) as u8 | CONTINUATION_BIT;
        out.push(encode_char(symbol));
        value >>= 5;
    }
    #[allow(clippy::cast_possible_truncation)]
    let last = value as u8;
    out.push(encode_char(last));
}

/// Read a varint from `encoded`, starting at `offset`.
///
/// `offset` is advanced past every symbol consumed.
///
/// # Returns
///
/// `Ok(None)` if `offset` is already at the end of the input. This is how callers
/// tell "no more values" apart from a real value.
///
/// # Errors
///
/// Returns [`PolylineError::InvalidEncoding`] if a byte is not part of the
/// alphabet, if the input ends while a continuation was promised, or if the value
/// does not fit in 64 bits.
pub fn read_unsigned_varint(encoded: &[u8], offset: &mut usize) -> PolylineResult<Option<u64>> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    while let Some(&byte) = encoded.get(*offset) {
        let Some(symbol) = decode_char(byte) else {
            return Err(PolylineError::invalid_encoding(
                "varint",
                format!(
                    "invalid character '{}' at position {}",
                    byte.escape_ascii(),
                    *offset
                ),
            ));
        };
        *offset += 1;

        let group = u64::from(symbol) & DATA_MASK;
        if shift == 60 && group > 0xF {
            return Err(overflow());
        }
        result |= group << shift;

        if symbol & CONTINUATION_BIT == 0 {
            return Ok(Some(result));
        }

        shift += 5;
        if shift >= u64::BITS {
            return Err(overflow());
        }
    }

    if shift > 0 {
        return Err(PolylineError::invalid_encoding(
            "varint",
            "input ended in the middle of a value",
        ));
    }
    Ok(None)
}

fn overflow() -> PolylineError {
    PolylineError::invalid_encoding("varint", "value does not fit in 64 bits")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u64) -> String {
        let mut out = String::new();
        write_unsigned_varint(value, &mut out);
        out
    }

    #[test]
    fn test_single_symbol_varint() {
        assert_eq!(encode(0), "A");
        assert_eq!(encode(1), "B");
        assert_eq!(encode(31), "f");

        let mut offset = 0;
        assert_eq!(read_unsigned_varint(b"f", &mut offset).unwrap(), Some(31));
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_two_symbol_varint() {
        // 32 = 0b1_00000: low group 0 with continuation (0x20 = 'g'), then 1 ('B').
        assert_eq!(encode(32), "gB");
        // 37 is the packed header for precision 5 with altitude.
        assert_eq!(encode(37), "lB");

        let mut offset = 0;
        assert_eq!(read_unsigned_varint(b"lB", &mut offset).unwrap(), Some(37));
        assert_eq!(offset, 2);
    }

    #[test]
    fn test_large_varint() {
        let encoded = encode(u64::MAX);
        assert_eq!(encoded.len(), 13);

        let mut offset = 0;
        assert_eq!(
            read_unsigned_varint(encoded.as_bytes(), &mut offset).unwrap(),
            Some(u64::MAX)
        );
        assert_eq!(offset, 13);
    }

    #[test]
    fn test_end_of_stream() {
        let mut offset = 0;
        assert_eq!(read_unsigned_varint(b"", &mut offset).unwrap(), None);

        let mut offset = 1;
        assert_eq!(read_unsigned_varint(b"B", &mut offset).unwrap(), None);
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_truncated_varint() {
        // 'g' has the continuation bit set but nothing follows.
        let mut offset = 0;
        assert!(matches!(
            read_unsigned_varint(b"g", &mut offset),
            Err(PolylineError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_invalid_character() {
        let mut offset = 0;
        let err = read_unsigned_varint(b"g=", &mut offset).unwrap_err();
        assert!(matches!(err, PolylineError::InvalidEncoding { .. }));
        assert!(err.to_string().contains("position 1"), "{err}");
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_overflowing_varint() {
        // Fourteen groups cannot fit in 64 bits.
        let encoded = "_".repeat(13) + "A";
        let mut offset = 0;
        assert!(matches!(
            read_unsigned_varint(encoded.as_bytes(), &mut offset),
            Err(PolylineError::InvalidEncoding { .. })
        ));

        // Thirteenth group with more than 4 significant bits.
        let encoded = "_".repeat(12) + "Q";
        let mut offset = 0;
        assert!(matches!(
            read_unsigned_varint(encoded.as_bytes(), &mut offset),
            Err(PolylineError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_multiple_varints() {
        let data = b"BgBf";
        let mut offset = 0;

        assert_eq!(read_unsigned_varint(data, &mut offset).unwrap(), Some(1));
        assert_eq!(offset, 1);

        assert_eq!(read_unsigned_varint(data, &mut offset).unwrap(), Some(32));
        assert_eq!(offset, 3);

        assert_eq!(read_unsigned_varint(data, &mut offset).unwrap(), Some(31));
        assert_eq!(offset, 4);

        assert_eq!(read_unsigned_varint(data, &mut offset).unwrap(), None);
    }
}
