//! Encode and decode coordinate sequences in the flexible polyline format.
//!
//! A flexible polyline is a lossy, URL-safe text encoding of 2D or 3D
//! coordinates. Each value is scaled to a fixed number of decimal digits,
//! stored as a delta from the previous point, zigzag-packed and written as a
//! variable-length integer over a 64-symbol alphabet.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **Per-call state**: Every decode or encode owns its cursors and accumulators
//! - **No panics on input**: Malformed strings come back as [`PolylineError`]
//!
//! # Example
//!
//! ```
//! use flexpolyline::{LatLngZ, ThirdDimension, decode, encode};
//!
//! let points = [LatLngZ::new(50.10228, 8.69821), LatLngZ::new(50.10201, 8.69567)];
//! let encoded = encode(&points, 5, ThirdDimension::Absent, 0)?;
//! assert_eq!(encoded, "BFoz5xJ67i1B1B7P");
//! assert_eq!(decode(&encoded)?, points);
//! # Ok::<(), flexpolyline::PolylineError>(())
//! ```

use std::fmt;

pub mod alphabet;
pub mod converter;
mod decoder;
mod encoder;
mod error;
pub mod header;
pub mod varint;

pub use converter::Converter;
pub use decoder::{Decoder, decode, decode_header, get_third_dimension};
pub use encoder::{Encoder, encode, encode_with_header};
pub use error::{PolylineError, PolylineResult};
pub use header::{FORMAT_VERSION, Header, MAX_PRECISION, ThirdDimension};

/// A latitude/longitude pair with an optional third value.
///
/// `z` is zero for polylines without a third dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLngZ {
    pub lat: f64,
    pub lng: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub z: f64,
}

impl LatLngZ {
    /// Create a 2D point.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, z: 0.0 }
    }

    /// Create a point with a third value.
    #[must_use]
    pub fn with_z(lat: f64, lng: f64, z: f64) -> Self {
        Self { lat, lng, z }
    }
}

impl From<(f64, f64)> for LatLngZ {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<(f64, f64, f64)> for LatLngZ {
    fn from((lat, lng, z): (f64, f64, f64)) -> Self {
        Self::with_z(lat, lng, z)
    }
}

impl fmt::Display for LatLngZ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.lat, self.lng, self.z)
    }
}
