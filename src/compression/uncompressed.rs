//! Handler for uncompressed data

use super::handler::CompressionHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::CogResult;

/// Identity handler for uncompressed tiles (code 1, and a missing
/// Compression tag treated the same way)
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> CogResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }

    fn code(&self) -> u16 {
        compression::NONE
    }
}
