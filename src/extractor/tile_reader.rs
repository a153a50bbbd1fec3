//! Tile pipeline for one resolution level
//!
//! For a requested sub-rectangle the reader enumerates the tiles that
//! intersect it, fetches each tile's raw bytes, decompresses them, undoes
//! the horizontal predictor when the level uses one, and unpacks samples
//! into the destination buffer. Tiles are visited in row-major order and
//! only intersecting tiles are ever fetched.

use log::{debug, info};
use std::borrow::Cow;

use crate::compression::CompressionFactory;
use crate::extractor::predictor;
use crate::extractor::region::Region;
use crate::io::byte_order::ByteOrderHandler;
use crate::io::source::ByteSource;
use crate::raster::GrayImage;
use crate::tiff::constants::predictor as predictor_codes;
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::ifd::ImgDesc;

/// Reads the tiles of one level into a pixel buffer
pub struct TileReader<'a> {
    /// Byte source of the COG file
    source: &'a mut ByteSource,
    /// Handler for the file's byte order
    handler: &'a dyn ByteOrderHandler,
    /// Descriptor of the level being decoded
    desc: &'a ImgDesc,
}

impl<'a> TileReader<'a> {
    /// Create a new tile reader over one level
    pub fn new(
        source: &'a mut ByteSource,
        handler: &'a dyn ByteOrderHandler,
        desc: &'a ImgDesc,
    ) -> Self {
        TileReader {
            source,
            handler,
            desc,
        }
    }

    /// Extracts `rect` into `image`
    ///
    /// `rect` must already be clipped to the image bounds, and `image`
    /// must have `rect`'s dimensions; pixel (x, y) of the image lands at
    /// (x - rect.x, y - rect.y) in the buffer.
    pub fn extract(&mut self, image: &mut GrayImage, rect: Region) -> CogResult<()> {
        let desc = self.desc;
        let codec = CompressionFactory::create_handler(desc.compression)?;
        info!(
            "extracting {}x{} at ({},{}) using {} compression",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            codec.name()
        );

        let tile_width = desc.tile_width;
        let tile_height = desc.tile_height;
        let blocks_across = desc.blocks_across();

        let first_tile_x = rect.x / tile_width;
        let last_tile_x = (rect.end_x() - 1) / tile_width;
        let first_tile_y = rect.y / tile_height;
        let last_tile_y = (rect.end_y() - 1) / tile_height;

        for tile_y in first_tile_y..=last_tile_y {
            for tile_x in first_tile_x..=last_tile_x {
                let index = (tile_y * blocks_across + tile_x) as usize;
                let offset = desc.tile_offsets[index] as u64;
                let byte_count = desc.tile_byte_counts[index] as usize;

                debug!(
                    "tile ({},{}) at offset {} ({} bytes)",
                    tile_x, tile_y, offset, byte_count
                );

                // The uncompressed path keeps the buffered source's
                // zero-copy slice; every codec path allocates.
                let mut data: Cow<[u8]> =
                    if CompressionFactory::is_uncompressed(desc.compression) {
                        self.source.bytes_at(offset, byte_count)?
                    } else {
                        let raw = self.source.bytes_at(offset, byte_count)?;
                        Cow::Owned(codec.decompress(&raw)?)
                    };

                if desc.predictor == predictor_codes::HORIZONTAL {
                    predictor::undo_horizontal(
                        data.to_mut(),
                        tile_width as usize,
                        tile_height as usize,
                        desc.bits(),
                        self.handler,
                    )?;
                }

                unpack_tile(desc, self.handler, &data, image, tile_x, tile_y, rect)?;
            }
        }

        Ok(())
    }
}

fn not_enough_pixels() -> CogError {
    CogError::Format("not enough pixel data".to_string())
}

/// Unpacks the samples of one decoded tile into the destination buffer
///
/// Walks the tile row by row over `rect ∩ tile`, reading consecutive
/// samples and skipping the clipped remainder of each row. The dispatch on
/// the buffer variant happens once; each arm runs a monomorphic loop.
fn unpack_tile(
    desc: &ImgDesc,
    handler: &dyn ByteOrderHandler,
    data: &[u8],
    image: &mut GrayImage,
    tile_x: u32,
    tile_y: u32,
    rect: Region,
) -> CogResult<()> {
    let tile_width = desc.tile_width;
    let tile_height = desc.tile_height;
    let tile_min_x = tile_x * tile_width;
    let tile_min_y = tile_y * tile_height;

    let x_start = rect.x.max(tile_min_x);
    let x_end = rect.end_x().min(tile_min_x + tile_width);
    let y_start = rect.y.max(tile_min_y);
    let y_end = rect.end_y().min(tile_min_y + tile_height);

    match image {
        GrayImage::U8(buf) => {
            for y in y_start..y_end {
                let mut idx = ((y - tile_min_y) * tile_width + (x_start - tile_min_x)) as usize;
                for x in x_start..x_end {
                    let v = *data.get(idx).ok_or_else(not_enough_pixels)?;
                    buf.set(x - rect.x, y - rect.y, v);
                    idx += 1;
                }
            }
        }
        GrayImage::S8(buf) => {
            for y in y_start..y_end {
                let mut idx = ((y - tile_min_y) * tile_width + (x_start - tile_min_x)) as usize;
                for x in x_start..x_end {
                    let v = *data.get(idx).ok_or_else(not_enough_pixels)? as i8;
                    buf.set(x - rect.x, y - rect.y, v);
                    idx += 1;
                }
            }
        }
        GrayImage::U16(buf) => {
            for y in y_start..y_end {
                let mut off =
                    ((y - tile_min_y) * tile_width + (x_start - tile_min_x)) as usize * 2;
                for x in x_start..x_end {
                    let bytes = data.get(off..off + 2).ok_or_else(not_enough_pixels)?;
                    buf.set(x - rect.x, y - rect.y, handler.read_u16(bytes));
                    off += 2;
                }
            }
        }
        GrayImage::S16(buf) => {
            for y in y_start..y_end {
                let mut off =
                    ((y - tile_min_y) * tile_width + (x_start - tile_min_x)) as usize * 2;
                for x in x_start..x_end {
                    let bytes = data.get(off..off + 2).ok_or_else(not_enough_pixels)?;
                    buf.set(x - rect.x, y - rect.y, handler.read_u16(bytes) as i16);
                    off += 2;
                }
            }
        }
    }

    Ok(())
}
