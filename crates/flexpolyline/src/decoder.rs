//! Polyline decoding.

use crate::LatLngZ;
use crate::converter::Converter;
use crate::error::{PolylineError, PolylineResult};
use crate::header::{Header, ThirdDimension, read_header};

/// Streaming decoder over one encoded polyline.
///
/// The header is read by [`Decoder::new`]; each call to [`Iterator::next`] then
/// yields one point. After the first error the iterator is exhausted.
///
/// # Example
///
/// ```
/// use flexpolyline::{Decoder, LatLngZ};
///
/// let points = Decoder::new("BACE")?.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(points, [LatLngZ::new(1.0, 2.0)]);
/// # Ok::<(), flexpolyline::PolylineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    encoded: &'a [u8],
    offset: usize,
    header: Header,
    lat: Converter,
    lng: Converter,
    z: Option<Converter>,
    finished: bool,
}

impl<'a> Decoder<'a> {
    /// Read the header of `encoded` and prepare to decode its points.
    pub fn new(encoded: &'a str) -> PolylineResult<Self> {
        check_not_blank("decode", encoded)?;

        let encoded = encoded.as_bytes();
        let mut offset = 0;
        let header = read_header(encoded, &mut offset)?;

        Ok(Self {
            encoded,
            offset,
            header,
            lat: Converter::new(header.precision)?,
            lng: Converter::new(header.precision)?,
            z: header
                .third_dimension
                .is_present()
                .then(|| Converter::new(header.third_dimension_precision))
                .transpose()?,
            finished: false,
        })
    }

    /// The header read from the encoded string.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    fn decode_point(&mut self) -> PolylineResult<Option<LatLngZ>> {
        let Some(lat) = self.lat.decode_value(self.encoded, &mut self.offset)? else {
            return Ok(None);
        };
        let lng = self
            .lng
            .decode_value(self.encoded, &mut self.offset)?
            .ok_or_else(|| truncated_point("longitude"))?;
        let z = match &mut self.z {
            Some(converter) => converter
                .decode_value(self.encoded, &mut self.offset)?
                .ok_or_else(|| truncated_point("third dimension"))?,
            None => 0.0,
        };
        Ok(Some(LatLngZ { lat, lng, z }))
    }
}

impl Iterator for Decoder<'_> {
    type Item = PolylineResult<LatLngZ>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let point = self.decode_point().transpose();
        if !matches!(point, Some(Ok(_))) {
            self.finished = true;
        }
        point
    }
}

impl std::iter::FusedIterator for Decoder<'_> {}

fn truncated_point(axis: &str) -> PolylineError {
    PolylineError::invalid_encoding("point", format!("input ended before the {axis} value"))
}

fn check_not_blank(context: &'static str, encoded: &str) -> PolylineResult<()> {
    if encoded.trim().is_empty() {
        return Err(PolylineError::invalid_argument(
            context,
            "encoded polyline is empty",
        ));
    }
    Ok(())
}

/// Decode every point of `encoded`.
///
/// Points come back in the order they were encoded. When the polyline has no
/// third dimension, `z` is zero for every point.
///
/// # Errors
///
/// - [`PolylineError::InvalidArgument`] if `encoded` is empty or whitespace.
/// - [`PolylineError::UnsupportedFormatVersion`] if the header version is not 1.
/// - [`PolylineError::InvalidEncoding`] for invalid characters, truncated values or
///   a point cut short.
pub fn decode(encoded: &str) -> PolylineResult<Vec<LatLngZ>> {
    let decoder = Decoder::new(encoded)?;
    let header = *decoder.header();
    let points = decoder.collect::<PolylineResult<Vec<_>>>()?;
    tracing::debug!(
        points = points.len(),
        precision = header.precision,
        third_dimension = %header.third_dimension,
        "decoded polyline"
    );
    Ok(points)
}

/// Read only the header of `encoded`.
///
/// The point data after the header is not looked at.
pub fn decode_header(encoded: &str) -> PolylineResult<Header> {
    check_not_blank("decode_header", encoded)?;
    let mut offset = 0;
    read_header(encoded.as_bytes(), &mut offset)
}

/// Kind of third dimension stored in `encoded`.
///
/// Only the header is read.
pub fn get_third_dimension(encoded: &str) -> PolylineResult<ThirdDimension> {
    decode_header(encoded).map(|header| header.third_dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_point() {
        // Header 1 ('B'), packed 0 ('A'); then +1 ('C') and +2 ('E').
        let points = decode("BACE").unwrap();
        assert_eq!(points, [LatLngZ::new(1.0, 2.0)]);
        assert_eq!(points[0].z, 0.0);
    }

    #[test]
    fn test_decode_blank_input() {
        for encoded in ["", " ", "\t\n"] {
            assert!(matches!(
                decode(encoded),
                Err(PolylineError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_decode_unsupported_version() {
        assert_eq!(
            decode("CA").unwrap_err(),
            PolylineError::UnsupportedFormatVersion { version: 2 }
        );
        // The rest of the string is never looked at.
        assert_eq!(
            decode("C===").unwrap_err(),
            PolylineError::UnsupportedFormatVersion { version: 2 }
        );
    }

    #[test]
    fn test_decode_header_only() {
        assert!(decode("BF").unwrap().is_empty());
        assert!(decode("BlB").unwrap().is_empty());
    }

    #[test]
    fn test_decode_truncated_varint() {
        // Continuation bit set on the last character.
        assert!(matches!(
            decode("BACg"),
            Err(PolylineError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_decode_incomplete_point() {
        // Latitude present, longitude missing.
        assert!(matches!(
            decode("BAC"),
            Err(PolylineError::InvalidEncoding { .. })
        ));
        // Altitude header: latitude and longitude present, altitude missing.
        assert!(matches!(
            decode("BlBCE"),
            Err(PolylineError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_decode_invalid_character() {
        assert!(matches!(
            decode("BACE*"),
            Err(PolylineError::InvalidEncoding { .. })
        ));
        // Whitespace is only rejected as blank input when there is nothing else.
        assert!(matches!(
            decode(" BACE"),
            Err(PolylineError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_decoder_stops_after_error() {
        let mut decoder = Decoder::new("BACEC").unwrap();
        assert_eq!(decoder.next(), Some(Ok(LatLngZ::new(1.0, 2.0))));
        assert!(matches!(
            decoder.next(),
            Some(Err(PolylineError::InvalidEncoding { .. }))
        ));
        assert_eq!(decoder.next(), None);
    }

    #[test]
    fn test_decoder_header() {
        let decoder = Decoder::new("BlBCEC").unwrap();
        assert_eq!(
            *decoder.header(),
            Header::new(5, ThirdDimension::Altitude, 0).unwrap()
        );
    }

    #[test]
    fn test_decode_third_dimension() {
        // Precision 0, level with precision 0: packed = 1 << 4 = 16 ('Q').
        let points = decode("BQCEG").unwrap();
        assert_eq!(points, [LatLngZ::with_z(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_get_third_dimension() {
        // Point data is not validated.
        assert_eq!(
            get_third_dimension("BlB=not*points").unwrap(),
            ThirdDimension::Altitude
        );
        assert_eq!(get_third_dimension("BF").unwrap(), ThirdDimension::Absent);
        assert!(matches!(
            get_third_dimension(""),
            Err(PolylineError::InvalidArgument { .. })
        ));
        assert_eq!(
            get_third_dimension("DF").unwrap_err(),
            PolylineError::UnsupportedFormatVersion { version: 3 }
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        let encoded = "BFoz5xJ67i1B1B7PzIhaxL7Y";
        assert_eq!(decode(encoded).unwrap(), decode(encoded).unwrap());
    }
}
