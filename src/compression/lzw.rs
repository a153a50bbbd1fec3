//! Handler for LZW compressed data

use super::handler::CompressionHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::{CogError, CogResult};

/// LZW handler (code 5)
///
/// TIFF LZW streams are MSB-first with an 8-bit initial code width and
/// the early code-size switch, which `weezl` implements directly.
pub struct LzwHandler;

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8]) -> CogResult<Vec<u8>> {
        let mut decoder = weezl::decode::Decoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8);
        decoder
            .decode(data)
            .map_err(|e| CogError::Format(format!("LZW stream: {}", e)))
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u16 {
        compression::LZW
    }
}
