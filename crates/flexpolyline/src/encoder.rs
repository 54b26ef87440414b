//! Polyline encoding.

use crate::LatLngZ;
use crate::converter::Converter;
use crate::error::PolylineResult;
use crate::header::{Header, ThirdDimension, write_header};

/// Incremental polyline builder.
///
/// The header is checked and written on construction; points are appended with
/// [`Encoder::push`]. A point that fails to encode leaves the output unchanged.
#[derive(Debug, Clone)]
pub struct Encoder {
    header: Header,
    lat: Converter,
    lng: Converter,
    z: Option<Converter>,
    output: String,
    len: usize,
}

impl Encoder {
    pub fn new(header: Header) -> PolylineResult<Self> {
        header.validate()?;

        let mut output = String::new();
        write_header(&header, &mut output);

        Ok(Self {
            header,
            lat: Converter::new(header.precision)?,
            lng: Converter::new(header.precision)?,
            z: header
                .third_dimension
                .is_present()
                .then(|| Converter::new(header.third_dimension_precision))
                .transpose()?,
            output,
            len: 0,
        })
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of points pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one point.
    ///
    /// `point.z` is ignored when the header has no third dimension.
    pub fn push(&mut self, point: LatLngZ) -> PolylineResult<()> {
        // Work on copies so a rejected point leaves no partial output behind.
        let mut lat = self.lat.clone();
        let mut lng = self.lng.clone();
        let mut z = self.z.clone();
        let mut encoded = String::new();

        lat.encode_value(point.lat, &mut encoded)?;
        lng.encode_value(point.lng, &mut encoded)?;
        if let Some(converter) = &mut z {
            converter.encode_value(point.z, &mut encoded)?;
        }

        self.lat = lat;
        self.lng = lng;
        self.z = z;
        self.output.push_str(&encoded);
        self.len += 1;
        Ok(())
    }

    /// Append every point of `points`, stopping at the first failure.
    pub fn extend<'p>(
        &mut self,
        points: impl IntoIterator<Item = &'p LatLngZ>,
    ) -> PolylineResult<()> {
        points.into_iter().try_for_each(|point| self.push(*point))
    }

    /// The encoded polyline.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

/// Encode `points` with the given precisions.
///
/// # Errors
///
/// [`crate::PolylineError::InvalidArgument`] if a precision exceeds 15, or if a
/// coordinate is not finite or too large to scale.
pub fn encode(
    points: &[LatLngZ],
    precision: u8,
    third_dimension: ThirdDimension,
    third_dimension_precision: u8,
) -> PolylineResult<String> {
    let header = Header::new(precision, third_dimension, third_dimension_precision)?;
    encode_with_header(points, &header)
}

/// Encode `points` using `header`.
///
/// The header's precisions are checked the same way as in [`encode`].
pub fn encode_with_header(points: &[LatLngZ], header: &Header) -> PolylineResult<String> {
    let mut encoder = Encoder::new(*header)?;
    encoder.extend(points)?;
    tracing::debug!(
        points = encoder.len(),
        precision = header.precision,
        third_dimension = %header.third_dimension,
        "encoded polyline"
    );
    Ok(encoder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolylineError;

    #[test]
    fn test_encode_single_point() {
        let encoded = encode(&[LatLngZ::new(1.0, 2.0)], 0, ThirdDimension::Absent, 0).unwrap();
        assert_eq!(encoded, "BACE");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[], 5, ThirdDimension::Absent, 0).unwrap(), "BF");
        assert_eq!(encode(&[], 5, ThirdDimension::Altitude, 0).unwrap(), "BlB");
    }

    #[test]
    fn test_encode_ignores_z_without_third_dimension() {
        let with_z = encode(
            &[LatLngZ::with_z(1.0, 2.0, 99.0)],
            0,
            ThirdDimension::Absent,
            0,
        )
        .unwrap();
        assert_eq!(with_z, "BACE");
    }

    #[test]
    fn test_encode_third_dimension() {
        let encoded = encode(
            &[LatLngZ::with_z(1.0, 2.0, 3.0)],
            0,
            ThirdDimension::Level,
            0,
        )
        .unwrap();
        assert_eq!(encoded, "BQCEG");
    }

    #[test]
    fn test_encode_invalid_precision() {
        assert!(matches!(
            encode(&[], 16, ThirdDimension::Absent, 0),
            Err(PolylineError::InvalidArgument { .. })
        ));
        assert!(matches!(
            encode(&[], 5, ThirdDimension::Altitude, 200),
            Err(PolylineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_encode_with_literal_header_out_of_range() {
        let header = Header {
            precision: 16,
            third_dimension: ThirdDimension::Absent,
            third_dimension_precision: 0,
        };
        assert!(matches!(
            encode_with_header(&[LatLngZ::new(0.1, 0.2)], &header),
            Err(PolylineError::InvalidArgument { .. })
        ));

        let header = Header {
            precision: 200,
            third_dimension: ThirdDimension::Altitude,
            third_dimension_precision: 0,
        };
        assert!(matches!(
            encode_with_header(&[], &header),
            Err(PolylineError::InvalidArgument { .. })
        ));

        let header = Header {
            precision: 5,
            third_dimension: ThirdDimension::Altitude,
            third_dimension_precision: 19,
        };
        assert!(matches!(
            Encoder::new(header),
            Err(PolylineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_rejected_point_leaves_output_untouched() {
        let mut encoder = Encoder::new(Header::new(0, ThirdDimension::Level, 0).unwrap()).unwrap();
        encoder.push(LatLngZ::with_z(1.0, 2.0, 3.0)).unwrap();
        assert!(encoder.push(LatLngZ::with_z(1.0, 2.0, f64::NAN)).is_err());
        assert_eq!(encoder.len(), 1);
        // Deltas continue from the last accepted point.
        encoder.push(LatLngZ::with_z(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(encoder.finish(), "BQCEGAAA");
    }
}
