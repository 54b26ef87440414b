//! Per-axis conversion between coordinates and zigzag-packed deltas.
//!
//! Each axis keeps its own running total, so a polyline session owns one
//! [`Converter`] for latitude, one for longitude and, when present, one for the
//! third dimension.

use crate::error::{PolylineError, PolylineResult};
use crate::header::{MAX_PRECISION, check_precision};
use crate::varint::{read_unsigned_varint, write_unsigned_varint};

/// Scaled coordinates must stay strictly below 2^61 in magnitude.
///
/// Keeps both the delta between two values and its doubled zigzag form inside
/// `i64`.
const MAX_SCALED: f64 = 2_305_843_009_213_693_952.0;

/// Stateful delta converter for one coordinate axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    multiplier: i64,
    last_value: i64,
}

impl Converter {
    /// Create a converter keeping `precision` decimal digits.
    ///
    /// Fails with [`PolylineError::InvalidArgument`] if `precision` exceeds
    /// [`MAX_PRECISION`].
    pub fn new(precision: u8) -> PolylineResult<Self> {
        check_precision("precision", precision)?;
        Ok(Self {
            multiplier: 10_i64.pow(u32::from(precision)),
            last_value: 0,
        })
    }

    /// Decode the next value for this axis.
    ///
    /// Returns `Ok(None)` when the input is exhausted at `offset`.
    pub fn decode_value(
        &mut self,
        encoded: &[u8],
        offset: &mut usize,
    ) -> PolylineResult<Option<f64>> {
        let Some(raw) = read_unsigned_varint(encoded, offset)? else {
            return Ok(None);
        };

        self.last_value = self.last_value.wrapping_add(unzigzag(raw));

        #[allow(clippy::cast_precision_loss)]
        let value = self.last_value as f64 / self.multiplier as f64;
        Ok(Some(value))
    }

    /// Encode `value` as a delta from the previous value on this axis.
    pub fn encode_value(&mut self, value: f64, out: &mut String) -> PolylineResult<()> {
        if !value.is_finite() {
            return Err(PolylineError::invalid_argument(
                "coordinate",
                format!("{value} is not a finite number"),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let scaled = (value * self.multiplier as f64).round();
        if scaled.abs() >= MAX_SCALED {
            return Err(PolylineError::invalid_argument(
                "coordinate",
                format!("{value} is too large for {} decimal digits", self.digits()),
            ));
        }

        // In range, see `MAX_SCALED`.
        #[allow(clippy::cast_possible_truncation)]
        let scaled = scaled as i64;
        let delta = scaled - self.last_value;
        self.last_value = scaled;

        write_unsigned_varint(zigzag(delta), out);
        Ok(())
    }

    fn digits(&self) -> u32 {
        self.multiplier.ilog10()
    }
}

/// Map a signed delta to the unsigned wire value.
///
/// Negative deltas are doubled and then inverted, so they always come out odd.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn zigzag(delta: i64) -> u64 {
    let doubled = delta << 1;
    if delta < 0 { !doubled as u64 } else { doubled as u64 }
}

/// Inverse of [`zigzag`].
///
/// Odd values have every bit inverted before the arithmetic shift.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn unzigzag(raw: u64) -> i64 {
    let mut value = raw as i64;
    if raw & 1 != 0 {
        value = !value;
    }
    value >> 1
}
