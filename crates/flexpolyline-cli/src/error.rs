//! Error types for the command-line tool.

use std::fmt;

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum Error {
    /// Encoding or decoding failed.
    Polyline(flexpolyline::PolylineError),
    /// Reading input or writing output failed.
    Io {
        /// What was being read or written.
        context: &'static str,
        /// The underlying error.
        source: std::io::Error,
    },
    /// Input points could not be parsed, or output could not be serialized.
    Json {
        /// What was being parsed or serialized.
        context: &'static str,
        /// The underlying error.
        source: serde_json::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Polyline(e) => write!(f, "{e}"),
            Error::Io { context, source } => write!(f, "failed to {context}: {source}"),
            Error::Json { context, source } => write!(f, "invalid {context}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Polyline(e) => Some(e),
            Error::Io { source, .. } => Some(source),
            Error::Json { source, .. } => Some(source),
        }
    }
}

impl From<flexpolyline::PolylineError> for Error {
    fn from(e: flexpolyline::PolylineError) -> Self {
        Error::Polyline(e)
    }
}
