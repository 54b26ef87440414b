//! Error types for polyline encoding and decoding.

use std::fmt;

/// Errors that can occur while encoding or decoding a polyline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolylineError {
    /// The caller passed something the codec cannot work with.
    InvalidArgument {
        context: &'static str,
        detail: String,
    },
    /// The header announced a format version other than the supported one.
    UnsupportedFormatVersion { version: u64 },
    /// The encoded string is malformed.
    InvalidEncoding {
        context: &'static str,
        detail: String,
    },
    /// A third dimension code outside the known range.
    UnknownThirdDimensionCode { code: u64 },
}

impl PolylineError {
    pub(crate) fn invalid_encoding(context: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            context,
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_argument(context: &'static str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PolylineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { context, detail } => {
                write!(f, "invalid argument to {context}: {detail}")
            }
            Self::UnsupportedFormatVersion { version } => {
                write!(f, "unsupported format version {version}")
            }
            Self::InvalidEncoding { context, detail } => {
                write!(f, "invalid encoding in {context}: {detail}")
            }
            Self::UnknownThirdDimensionCode { code } => {
                write!(f, "unknown third dimension code {code}")
            }
        }
    }
}

impl std::error::Error for PolylineError {}

/// Result type for polyline operations.
pub type PolylineResult<T> = Result<T, PolylineError>;
