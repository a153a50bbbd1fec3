//! Helpers for authoring synthetic COG buffers in memory
//!
//! Tests build complete tiled GeoTIFF files byte by byte so every decode
//! path can be exercised without fixture files. The builder is generic
//! over the byte order so the same description can be written as a
//! little-endian or big-endian file.

use byteorder::{ByteOrder, WriteBytesExt};

use crate::tiff::constants::field_types;

/// One resolution level of a synthetic COG
pub struct LevelSpec {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub compression: u16,
    pub predictor: u16,
    pub photometric: u16,
    pub sample_format: u16,
    pub bits: u16,
    /// Encoded tile payloads in row-major tile order
    pub tiles: Vec<Vec<u8>>,
    /// Additional raw entries (tag, field type, count, u32 value word)
    pub extra_entries: Vec<(u16, u16, u32, u32)>,
}

impl LevelSpec {
    /// Unsigned 8-bit BlackIsZero level, uncompressed
    pub fn gray8(width: u32, height: u32, tile_width: u32, tile_height: u32, tiles: Vec<Vec<u8>>) -> Self {
        LevelSpec {
            width,
            height,
            tile_width,
            tile_height,
            compression: 1,
            predictor: 1,
            photometric: 1,
            sample_format: 1,
            bits: 8,
            tiles,
            extra_entries: Vec::new(),
        }
    }

    /// Unsigned 16-bit BlackIsZero level, uncompressed
    pub fn gray16(width: u32, height: u32, tile_width: u32, tile_height: u32, tiles: Vec<Vec<u8>>) -> Self {
        LevelSpec {
            bits: 16,
            ..LevelSpec::gray8(width, height, tile_width, tile_height, tiles)
        }
    }
}

/// Geo tags attached to the primary level
#[derive(Default)]
pub struct GeoSpec {
    pub key_directory: Vec<u16>,
    pub double_params: Vec<f64>,
    pub ascii_params: String,
    pub pixel_scale: Option<[f64; 3]>,
    pub tie_points: Vec<f64>,
    /// Declare a ModelTransformation entry (its payload is never read)
    pub with_model_transformation: bool,
}

fn short_val<E: ByteOrder>(v: u16) -> [u8; 4] {
    let mut b = [0u8; 4];
    E::write_u16(&mut b[0..2], v);
    b
}

fn long_val<E: ByteOrder>(v: u32) -> [u8; 4] {
    let mut b = [0u8; 4];
    E::write_u32(&mut b, v);
    b
}

/// Serializes the levels and geo tags into a complete COG file buffer
pub fn build_cog<E: ByteOrder>(levels: &[LevelSpec], geo: &GeoSpec) -> Vec<u8> {
    let mut probe = [0u8; 2];
    E::write_u16(&mut probe, 1);
    let little = probe[0] == 1;

    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(if little { b"II" } else { b"MM" });
    buf.write_u16::<E>(42).unwrap();
    buf.write_u32::<E>(0).unwrap(); // patched to the first IFD offset

    // position of the pointer that names the next IFD
    let mut pointer_pos = 4usize;

    for (level_index, level) in levels.iter().enumerate() {
        // tile payloads
        let mut tile_offsets: Vec<u32> = Vec::new();
        let mut tile_counts: Vec<u32> = Vec::new();
        for tile in &level.tiles {
            tile_offsets.push(buf.len() as u32);
            tile_counts.push(tile.len() as u32);
            buf.extend_from_slice(tile);
        }
        if buf.len() % 2 == 1 {
            buf.push(0);
        }

        // external value arrays
        let n_tiles = level.tiles.len() as u32;
        let offsets_pos = if n_tiles > 1 {
            let pos = buf.len() as u32;
            for &o in &tile_offsets {
                buf.write_u32::<E>(o).unwrap();
            }
            Some(pos)
        } else {
            None
        };
        let counts_pos = if n_tiles > 1 {
            let pos = buf.len() as u32;
            for &c in &tile_counts {
                buf.write_u32::<E>(c).unwrap();
            }
            Some(pos)
        } else {
            None
        };

        let mut pixel_scale_pos = 0u32;
        let mut tie_points_pos = 0u32;
        let mut key_dir_pos = 0u32;
        let mut doubles_pos = 0u32;
        let mut ascii_pos = 0u32;
        if level_index == 0 {
            if let Some(scale) = geo.pixel_scale {
                pixel_scale_pos = buf.len() as u32;
                for v in scale {
                    buf.write_f64::<E>(v).unwrap();
                }
            }
            if !geo.tie_points.is_empty() {
                tie_points_pos = buf.len() as u32;
                for &v in &geo.tie_points {
                    buf.write_f64::<E>(v).unwrap();
                }
            }
            if !geo.key_directory.is_empty() {
                key_dir_pos = buf.len() as u32;
                for &v in &geo.key_directory {
                    buf.write_u16::<E>(v).unwrap();
                }
            }
            if !geo.double_params.is_empty() {
                doubles_pos = buf.len() as u32;
                for &v in &geo.double_params {
                    buf.write_f64::<E>(v).unwrap();
                }
            }
            if !geo.ascii_params.is_empty() {
                ascii_pos = buf.len() as u32;
                buf.extend_from_slice(geo.ascii_params.as_bytes());
                if buf.len() % 2 == 1 {
                    buf.push(0);
                }
            }
        }

        // directory entries, ascending by tag
        let mut entries: Vec<(u16, u16, u32, [u8; 4])> = Vec::new();
        let subfile = if level_index == 0 { 0 } else { 1 };
        entries.push((254, field_types::LONG, 1, long_val::<E>(subfile)));
        entries.push((256, field_types::LONG, 1, long_val::<E>(level.width)));
        entries.push((257, field_types::LONG, 1, long_val::<E>(level.height)));
        entries.push((258, field_types::SHORT, 1, short_val::<E>(level.bits)));
        entries.push((259, field_types::SHORT, 1, short_val::<E>(level.compression)));
        entries.push((262, field_types::SHORT, 1, short_val::<E>(level.photometric)));
        entries.push((277, field_types::SHORT, 1, short_val::<E>(1)));
        if level.predictor != 1 {
            entries.push((317, field_types::SHORT, 1, short_val::<E>(level.predictor)));
        }
        entries.push((322, field_types::LONG, 1, long_val::<E>(level.tile_width)));
        entries.push((323, field_types::LONG, 1, long_val::<E>(level.tile_height)));
        if !level.tiles.is_empty() {
            match offsets_pos {
                Some(pos) => entries.push((324, field_types::LONG, n_tiles, long_val::<E>(pos))),
                None => entries.push((324, field_types::LONG, 1, long_val::<E>(tile_offsets[0]))),
            }
            match counts_pos {
                Some(pos) => entries.push((325, field_types::LONG, n_tiles, long_val::<E>(pos))),
                None => entries.push((325, field_types::LONG, 1, long_val::<E>(tile_counts[0]))),
            }
        }
        entries.push((339, field_types::SHORT, 1, short_val::<E>(level.sample_format)));

        if level_index == 0 {
            if geo.pixel_scale.is_some() {
                entries.push((33550, field_types::DOUBLE, 3, long_val::<E>(pixel_scale_pos)));
            }
            if !geo.tie_points.is_empty() {
                entries.push((
                    33922,
                    field_types::DOUBLE,
                    geo.tie_points.len() as u32,
                    long_val::<E>(tie_points_pos),
                ));
            }
            if geo.with_model_transformation {
                entries.push((34264, field_types::DOUBLE, 16, long_val::<E>(0)));
            }
            if !geo.key_directory.is_empty() {
                entries.push((
                    34735,
                    field_types::SHORT,
                    geo.key_directory.len() as u32,
                    long_val::<E>(key_dir_pos),
                ));
            }
            if !geo.double_params.is_empty() {
                entries.push((
                    34736,
                    field_types::DOUBLE,
                    geo.double_params.len() as u32,
                    long_val::<E>(doubles_pos),
                ));
            }
            if !geo.ascii_params.is_empty() {
                entries.push((
                    34737,
                    field_types::ASCII,
                    geo.ascii_params.len() as u32,
                    long_val::<E>(ascii_pos),
                ));
            }
        }

        for &(tag, field_type, count, value) in &level.extra_entries {
            entries.push((tag, field_type, count, long_val::<E>(value)));
        }

        entries.sort_by_key(|e| e.0);

        // patch the pointer that leads here, then write the directory
        let ifd_pos = buf.len() as u32;
        E::write_u32(&mut buf[pointer_pos..pointer_pos + 4], ifd_pos);

        buf.write_u16::<E>(entries.len() as u16).unwrap();
        for (tag, field_type, count, value) in &entries {
            buf.write_u16::<E>(*tag).unwrap();
            buf.write_u16::<E>(*field_type).unwrap();
            buf.write_u32::<E>(*count).unwrap();
            buf.extend_from_slice(value);
        }
        pointer_pos = buf.len();
        buf.write_u32::<E>(0).unwrap();
    }

    buf
}

/// Cuts the padded `tile_width x tile_height` payload of tile (tx, ty)
/// out of a full row-major 8-bit image
pub fn tile8(
    pixels: &[u8],
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
    tx: u32,
    ty: u32,
) -> Vec<u8> {
    let mut out = Vec::with_capacity((tile_width * tile_height) as usize);
    for row in 0..tile_height {
        for col in 0..tile_width {
            let x = tx * tile_width + col;
            let y = ty * tile_height + row;
            if x < image_width && y < image_height {
                out.push(pixels[(y * image_width + x) as usize]);
            } else {
                out.push(0);
            }
        }
    }
    out
}

/// 16-bit variant of [`tile8`], writing samples in the file byte order
pub fn tile16<E: ByteOrder>(
    pixels: &[u16],
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
    tx: u32,
    ty: u32,
) -> Vec<u8> {
    let mut out = Vec::with_capacity((tile_width * tile_height * 2) as usize);
    for row in 0..tile_height {
        for col in 0..tile_width {
            let x = tx * tile_width + col;
            let y = ty * tile_height + row;
            let v = if x < image_width && y < image_height {
                pixels[(y * image_width + x) as usize]
            } else {
                0
            };
            out.write_u16::<E>(v).unwrap();
        }
    }
    out
}

/// All tiles of an 8-bit image, row-major
pub fn tiles8(
    pixels: &[u8],
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
) -> Vec<Vec<u8>> {
    let across = (image_width + tile_width - 1) / tile_width;
    let down = (image_height + tile_height - 1) / tile_height;
    let mut out = Vec::new();
    for ty in 0..down {
        for tx in 0..across {
            out.push(tile8(
                pixels,
                image_width,
                image_height,
                tile_width,
                tile_height,
                tx,
                ty,
            ));
        }
    }
    out
}

/// Compresses a payload as a zlib stream
pub fn deflate(data: &[u8]) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Compresses a payload as a TIFF LZW stream
pub fn lzw(data: &[u8]) -> Vec<u8> {
    let mut encoder = weezl::encode::Encoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8);
    encoder.encode(data).unwrap()
}

/// Encodes a payload as PackBits literal runs
pub fn packbits(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in data.chunks(128) {
        out.push((chunk.len() - 1) as u8);
        out.extend_from_slice(chunk);
    }
    out
}
