//! Polyline header packing and unpacking.
//!
//! The header is two varints: the format version, then a packed value holding
//! the precision (bits 0-3), the third dimension code (bits 4-6) and the third
//! dimension precision (bits 7-10).

use std::fmt;

use crate::error::{PolylineError, PolylineResult};
use crate::varint::{read_unsigned_varint, write_unsigned_varint};

/// The only header version this crate reads and writes.
pub const FORMAT_VERSION: u64 = 1;

/// Largest precision that fits in the 4-bit header fields.
pub const MAX_PRECISION: u8 = 15;

/// Meaning of the optional third coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ThirdDimension {
    /// Plain 2D polyline.
    #[default]
    Absent,
    Level,
    Altitude,
    Elevation,
    Reserved1,
    Reserved2,
    Custom1,
    Custom2,
}

impl ThirdDimension {
    /// All kinds, in code order.
    pub const ALL: [Self; 8] = [
        Self::Absent,
        Self::Level,
        Self::Altitude,
        Self::Elevation,
        Self::Reserved1,
        Self::Reserved2,
        Self::Custom1,
        Self::Custom2,
    ];

    /// The 3-bit code written to the header.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Level => 1,
            Self::Altitude => 2,
            Self::Elevation => 3,
            Self::Reserved1 => 4,
            Self::Reserved2 => 5,
            Self::Custom1 => 6,
            Self::Custom2 => 7,
        }
    }

    /// Look up the kind for a header code.
    pub fn from_code(code: u64) -> PolylineResult<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(PolylineError::UnknownThirdDimensionCode { code })
    }

    /// Whether points carry a third value.
    #[must_use]
    pub fn is_present(self) -> bool {
        self != Self::Absent
    }
}

impl fmt::Display for ThirdDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Absent => "absent",
            Self::Level => "level",
            Self::Altitude => "altitude",
            Self::Elevation => "elevation",
            Self::Reserved1 => "reserved1",
            Self::Reserved2 => "reserved2",
            Self::Custom1 => "custom1",
            Self::Custom2 => "custom2",
        };
        f.write_str(name)
    }
}

/// Decoded polyline header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Decimal digits kept for latitude and longitude.
    pub precision: u8,
    /// Kind of third dimension, if any.
    pub third_dimension: ThirdDimension,
    /// Decimal digits kept for the third dimension.
    pub third_dimension_precision: u8,
}

impl Header {
    /// Create a header, checking that both precisions fit their 4-bit fields.
    pub fn new(
        precision: u8,
        third_dimension: ThirdDimension,
        third_dimension_precision: u8,
    ) -> PolylineResult<Self> {
        let header = Self {
            precision,
            third_dimension,
            third_dimension_precision,
        };
        header.validate()?;
        Ok(header)
    }

    /// Check that both precisions fit their 4-bit fields.
    ///
    /// Headers built from a struct literal skip [`Header::new`], so encoding
    /// checks them again here.
    pub fn validate(&self) -> PolylineResult<()> {
        check_precision("precision", self.precision)?;
        check_precision("third dimension precision", self.third_dimension_precision)
    }

    /// Unpack the second header varint.
    ///
    /// Bits above the third dimension precision are ignored.
    pub fn from_packed(mut packed: u64) -> PolylineResult<Self> {
        // Masked to 4 bits.
        #[allow(clippy::cast_possible_truncation)]
        let precision = (packed & 0xF) as u8;
        packed >>= 4;
        let third_dimension = ThirdDimension::from_code(packed & 0x7)?;
        packed >>= 3;
        #[allow(clippy::cast_possible_truncation)]
        let third_dimension_precision = (packed & 0xF) as u8;

        Ok(Self {
            precision,
            third_dimension,
            third_dimension_precision,
        })
    }

    /// Pack the fields into the second header varint.
    #[must_use]
    pub fn packed(&self) -> u64 {
        u64::from(self.precision)
            | (u64::from(self.third_dimension.code()) << 4)
            | (u64::from(self.third_dimension_precision) << 7)
    }
}

pub(crate) fn check_precision(name: &'static str, precision: u8) -> PolylineResult<()> {
    if precision > MAX_PRECISION {
        return Err(PolylineError::invalid_argument(
            "header",
            format!("{name} {precision} exceeds {MAX_PRECISION}"),
        ));
    }
    Ok(())
}

/// Append the version and packed header to `out`.
pub fn write_header(header: &Header, out: &mut String) {
    write_unsigned_varint(FORMAT_VERSION, out);
    write_unsigned_varint(header.packed(), out);
}

/// Read the version and packed header from the start of `encoded`.
///
/// `offset` is left at the first point symbol.
pub fn read_header(encoded: &[u8], offset: &mut usize) -> PolylineResult<Header> {
    let version = read_unsigned_varint(encoded, offset)?.ok_or_else(|| {
        PolylineError::invalid_encoding("header", "missing format version")
    })?;
    if version != FORMAT_VERSION {
        return Err(PolylineError::UnsupportedFormatVersion { version });
    }

    let packed = read_unsigned_varint(encoded, offset)?
        .ok_or_else(|| PolylineError::invalid_encoding("header", "missing packed header"))?;

    let header = Header::from_packed(packed)?;
    tracing::trace!(
        precision = header.precision,
        third_dimension = %header.third_dimension,
        third_dimension_precision = header.third_dimension_precision,
        "read polyline header"
    );
    Ok(header)
}
