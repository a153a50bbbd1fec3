//! Factory for creating compression handlers

use super::deflate::DeflateHandler;
use super::handler::CompressionHandler;
use super::lzw::LzwHandler;
use super::packbits::PackBitsHandler;
use super::uncompressed::UncompressedHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::{CogError, CogResult};

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Create a compression handler for the given compression code
    ///
    /// A missing Compression tag has no defined default in TIFF, but in
    /// practice a value of 0 is treated as uncompressed, so both 0 and 1
    /// map to the identity handler.
    pub fn create_handler(code: u16) -> CogResult<Box<dyn CompressionHandler>> {
        match code {
            0 | compression::NONE => Ok(Box::new(UncompressedHandler)),
            compression::LZW => Ok(Box::new(LzwHandler)),
            compression::DEFLATE_OLD
            | compression::DEFLATE
            | compression::ADOBE_DEFLATE
            | compression::DEFLATE_ALT => Ok(Box::new(DeflateHandler)),
            compression::PACKBITS => Ok(Box::new(PackBitsHandler)),
            other => Err(CogError::Unsupported(format!(
                "compression value {}",
                other
            ))),
        }
    }

    /// Whether a code denotes the identity codec
    pub fn is_uncompressed(code: u16) -> bool {
        matches!(code, 0 | compression::NONE)
    }
}
