//! Horizontal predictor reversal
//!
//! A tile written with predictor 2 stores each sample as its difference
//! from the previous sample in the row; decoding replaces every sample by
//! the running sum along the row. The predictor operates on the tile's
//! intrinsic layout, not on the clipped output rectangle.

use crate::io::byte_order::ByteOrderHandler;
use crate::tiff::errors::{CogError, CogResult};

/// Reverses horizontal differencing in place over a tile buffer
///
/// `width` and `height` are the tile's intrinsic dimensions. 16-bit
/// samples are read and written back in the file byte order. Rows that the
/// buffer only partially covers stop at the buffer end; the unpacker
/// raises the missing-data error when it actually needs those samples.
pub fn undo_horizontal(
    buf: &mut [u8],
    width: usize,
    height: usize,
    bits: u16,
    handler: &dyn ByteOrderHandler,
) -> CogResult<()> {
    match bits {
        8 => {
            for row in 0..height {
                let start = row * width;
                let end = (start + width).min(buf.len());
                for i in (start + 1)..end {
                    buf[i] = buf[i].wrapping_add(buf[i - 1]);
                }
            }
            Ok(())
        }
        16 => {
            let stride = width * 2;
            for row in 0..height {
                let start = row * stride;
                for col in 1..width {
                    let off = start + col * 2;
                    if off + 2 > buf.len() {
                        break;
                    }
                    let prev = handler.read_u16(&buf[off - 2..off]);
                    let cur = handler.read_u16(&buf[off..off + 2]);
                    handler.put_u16(&mut buf[off..off + 2], cur.wrapping_add(prev));
                }
            }
            Ok(())
        }
        other => Err(CogError::Unsupported(format!(
            "horizontal predictor with {} BitsPerSample",
            other
        ))),
    }
}
