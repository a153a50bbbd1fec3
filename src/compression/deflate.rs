//! Handler for Deflate (zlib) compressed data

use flate2::read::ZlibDecoder;
use std::io::Read;

use super::handler::CompressionHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::{CogError, CogResult};

/// Deflate handler covering the zlib-stream compression codes
/// (7, the legacy 6 variant, 8 and 32946)
pub struct DeflateHandler;

impl CompressionHandler for DeflateHandler {
    fn decompress(&self, data: &[u8]) -> CogResult<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| CogError::Format(format!("deflate stream: {}", e)))?;
        Ok(decompressed)
    }

    fn name(&self) -> &'static str {
        "Deflate"
    }

    fn code(&self) -> u16 {
        compression::ADOBE_DEFLATE
    }
}
