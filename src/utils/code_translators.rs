//! TIFF code translators
//!
//! Utilities for translating numeric TIFF tag values into human-readable
//! descriptions, used when displaying information about COG files.

use crate::tiff::constants::{compression, photometric, predictor, sample_format};

/// Converts a compression code to its human-readable description
pub fn compression_code_to_name(code: u16) -> &'static str {
    match code {
        0 | compression::NONE => "Uncompressed",
        compression::LZW => "LZW",
        compression::DEFLATE_OLD => "Deflate (legacy)",
        compression::DEFLATE => "Deflate",
        compression::ADOBE_DEFLATE => "Adobe Deflate (zlib)",
        compression::DEFLATE_ALT => "Deflate (alternate code)",
        compression::PACKBITS => "PackBits",
        _ => "Unknown",
    }
}

/// Converts a sample format code to its human-readable description
pub fn sample_format_code_to_name(code: u16) -> &'static str {
    match code {
        sample_format::UNSIGNED => "Unsigned integer",
        sample_format::SIGNED => "Signed integer",
        _ => "Unknown",
    }
}

/// Converts a predictor code to its human-readable description
pub fn predictor_code_to_name(code: u16) -> &'static str {
    match code {
        predictor::NONE => "No prediction scheme",
        predictor::HORIZONTAL => "Horizontal differencing",
        _ => "Unknown",
    }
}

/// Converts a photometric interpretation code to its description
pub fn photometric_code_to_name(code: u16) -> &'static str {
    match code {
        photometric::WHITE_IS_ZERO => "WhiteIsZero",
        photometric::BLACK_IS_ZERO => "BlackIsZero",
        _ => "Unknown",
    }
}
