//! Custom error types for COG decoding

use std::fmt;
use std::io;

/// COG-specific error types
///
/// Decoding distinguishes two failure families: input bytes that violate
/// the TIFF/GeoTIFF structural rules, and well-formed structures that this
/// decoder does not implement. I/O failures of the underlying reader are
/// surfaced separately.
#[derive(Debug)]
pub enum CogError {
    /// I/O error from the underlying reader
    Io(io::Error),
    /// The input is not a valid TIFF/GeoTIFF structure
    Format(String),
    /// The input uses a valid but unimplemented feature
    Unsupported(String),
}

impl fmt::Display for CogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CogError::Io(e) => write!(f, "I/O error: {}", e),
            CogError::Format(msg) => write!(f, "invalid format: {}", msg),
            CogError::Unsupported(msg) => write!(f, "unsupported feature: {}", msg),
        }
    }
}

impl std::error::Error for CogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CogError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CogError {
    fn from(error: io::Error) -> Self {
        CogError::Io(error)
    }
}

/// Result type for COG operations
pub type CogResult<T> = Result<T, CogError>;
