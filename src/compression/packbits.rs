//! Handler for PackBits compressed data

use super::handler::CompressionHandler;
use crate::tiff::constants::compression;
use crate::tiff::errors::{CogError, CogResult};

/// PackBits byte-run RLE handler (code 32773)
///
/// Each run starts with a signed header byte: `n >= 0` copies the next
/// `n + 1` literal bytes, `n in -127..=-1` repeats the next byte `-n + 1`
/// times, and -128 is a no-op.
pub struct PackBitsHandler;

impl CompressionHandler for PackBitsHandler {
    fn decompress(&self, data: &[u8]) -> CogResult<Vec<u8>> {
        let mut output = Vec::new();
        let mut i = 0;

        while i < data.len() {
            let header = data[i] as i8;
            i += 1;

            if header >= 0 {
                let count = header as usize + 1;
                let literals = data.get(i..i + count).ok_or_else(truncated)?;
                output.extend_from_slice(literals);
                i += count;
            } else if header != -128 {
                let count = (-(header as i16)) as usize + 1;
                let value = *data.get(i).ok_or_else(truncated)?;
                i += 1;
                output.resize(output.len() + count, value);
            }
        }

        Ok(output)
    }

    fn name(&self) -> &'static str {
        "PackBits"
    }

    fn code(&self) -> u16 {
        compression::PACKBITS
    }
}

fn truncated() -> CogError {
    CogError::Format("PackBits stream ends inside a run".to_string())
}
