//! COG file decoder
//!
//! The decoder walks the IFD chain once at construction time, accumulating
//! one [`ImgDesc`] per resolution level plus the [`GeoCode`] of the primary
//! level. Thereafter it is queried by level index: whole-level and
//! sub-rectangle decodes go through the tile pipeline, configuration
//! queries answer from the stored descriptors without touching pixel data.

use log::{debug, info};
use std::io::{Read, Seek};

use crate::extractor::region::Region;
use crate::extractor::tile_reader::TileReader;
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::source::ByteSource;
use crate::raster::{ColorKind, GrayImage, ImageConfig};
use crate::tiff::constants::{header, tags};
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::geo_keys::GeoCode;
use crate::tiff::ifd::{self, IfdEntry, ImgDesc, ENTRY_LEN};
use crate::tiff::validation;
use crate::tiff::wkt;

/// Guard against cyclic IFD chains
const MAX_LEVELS: usize = 100;

/// Geo tags collected alongside one IFD's image description
#[derive(Debug, Default)]
struct RawGeo {
    key_directory: Vec<u16>,
    double_params: Vec<f64>,
    ascii_params: String,
    pixel_scale: Option<[f64; 3]>,
    tie_points: Vec<f64>,
}

/// Decoder for a single COG file
///
/// All state is derived from the input at construction; nothing is mutated
/// afterwards except the read position of the underlying source. Decoding
/// several files concurrently takes one decoder per file.
pub struct CogDecoder {
    source: ByteSource,
    byte_order: ByteOrder,
    handler: Box<dyn ByteOrderHandler>,
    levels: Vec<ImgDesc>,
    geo_code: GeoCode,
    pixel_scale: Option<[f64; 3]>,
    tie_points: Vec<f64>,
}

impl std::fmt::Debug for CogDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CogDecoder")
            .field("byte_order", &self.byte_order)
            .field("levels", &self.levels)
            .field("geo_code", &self.geo_code)
            .field("pixel_scale", &self.pixel_scale)
            .field("tie_points", &self.tie_points)
            .finish()
    }
}

impl CogDecoder {
    /// Parses the header and the full IFD chain of `source`
    pub fn new(mut source: ByteSource) -> CogResult<Self> {
        let mut head = [0u8; 8];
        source.read_exact_at(0, &mut head)?;

        let byte_order = ByteOrder::detect([head[0], head[1]])?;
        let handler = byte_order.create_handler();

        match handler.read_u16(&head[2..4]) {
            header::TIFF_VERSION => {}
            header::BIG_TIFF_VERSION => {
                return Err(CogError::Unsupported(
                    "BigTIFF (64-bit offsets)".to_string(),
                ));
            }
            version => {
                return Err(CogError::Format(format!("bad TIFF version {}", version)));
            }
        }

        debug!("byte order: {}", byte_order.name());

        let mut levels = Vec::new();
        let mut primary_geo: Option<RawGeo> = None;
        let mut offset = handler.read_u32(&head[4..8]) as u64;

        while offset != 0 {
            if levels.len() == MAX_LEVELS {
                return Err(CogError::Format(format!(
                    "IFD chain exceeds {} directories",
                    MAX_LEVELS
                )));
            }
            debug!("reading IFD at offset {}", offset);
            let (desc, geo, next) = parse_ifd(&mut source, handler.as_ref(), offset)?;
            validation::validate_level(&desc)?;
            if primary_geo.is_none() {
                primary_geo = Some(geo);
            }
            levels.push(desc);
            offset = next;
        }

        if levels.is_empty() {
            return Err(CogError::Format("no image directories".to_string()));
        }

        let geo = primary_geo.unwrap_or_default();
        let geo_code = if geo.key_directory.is_empty() {
            GeoCode::default()
        } else {
            GeoCode::from_directory(&geo.key_directory, &geo.double_params, &geo.ascii_params)?
        };

        info!(
            "opened COG: {} level(s), primary {}x{}",
            levels.len(),
            levels[0].image_width,
            levels[0].image_height
        );

        Ok(CogDecoder {
            source,
            byte_order,
            handler,
            levels,
            geo_code,
            pixel_scale: geo.pixel_scale,
            tie_points: geo.tie_points,
        })
    }

    /// Byte order of the file
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Descriptors of every resolution level, in chain order
    pub fn levels(&self) -> &[ImgDesc] {
        &self.levels
    }

    /// Number of resolution levels in the overview pyramid
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// CRS parameters of the primary level
    pub fn geo_code(&self) -> &GeoCode {
        &self.geo_code
    }

    /// ModelPixelScale values, when present
    pub fn pixel_scale(&self) -> Option<[f64; 3]> {
        self.pixel_scale
    }

    /// ModelTiepoint values, when present
    pub fn tie_points(&self) -> &[f64] {
        &self.tie_points
    }

    /// WKT rendering of the file's CRS
    pub fn wkt(&self) -> CogResult<String> {
        wkt::render(&self.geo_code)
    }

    fn level_desc(&self, level: usize) -> CogResult<&ImgDesc> {
        self.levels.get(level).ok_or_else(|| {
            CogError::Format(format!(
                "level {} out of range ({} levels present)",
                level,
                self.levels.len()
            ))
        })
    }

    /// Color model and dimensions of level 0, without decoding pixels
    pub fn config(&self) -> CogResult<ImageConfig> {
        self.config_level(0)
    }

    /// Color model and dimensions of an arbitrary level
    pub fn config_level(&self, level: usize) -> CogResult<ImageConfig> {
        let desc = self.level_desc(level)?;
        Ok(ImageConfig {
            color: ColorKind::select(desc.photometric, desc.sample_fmt(), desc.bits())?,
            width: desc.image_width,
            height: desc.image_height,
        })
    }

    /// Decodes level 0 in full
    pub fn decode(&mut self) -> CogResult<GrayImage> {
        self.decode_level(0)
    }

    /// Decodes an entire resolution level
    pub fn decode_level(&mut self, level: usize) -> CogResult<GrayImage> {
        let desc = self.level_desc(level)?.clone();
        let full = Region::new(0, 0, desc.image_width, desc.image_height);
        self.decode_clipped(&desc, full)
    }

    /// Decodes the part of a level covered by `rect`
    ///
    /// Only the tiles intersecting `rect` are fetched. The result has the
    /// dimensions of `rect ∩ image`; a rectangle that misses the image
    /// entirely is a format error.
    pub fn decode_level_region(&mut self, level: usize, rect: Region) -> CogResult<GrayImage> {
        let desc = self.level_desc(level)?.clone();
        let image_rect = Region::new(0, 0, desc.image_width, desc.image_height);
        let clipped = rect.intersect(&image_rect).ok_or_else(|| {
            CogError::Format(format!(
                "region {:?} does not intersect the {}x{} image",
                rect, desc.image_width, desc.image_height
            ))
        })?;
        self.decode_clipped(&desc, clipped)
    }

    fn decode_clipped(&mut self, desc: &ImgDesc, rect: Region) -> CogResult<GrayImage> {
        let kind = ColorKind::select(desc.photometric, desc.sample_fmt(), desc.bits())?;
        let mut image = GrayImage::with_kind(kind, rect.width, rect.height);
        let mut tiles = TileReader::new(&mut self.source, self.handler.as_ref(), desc);
        tiles.extract(&mut image, rect)?;
        Ok(image)
    }
}

/// Parses one IFD into a level descriptor plus its geo tags
///
/// Returns the descriptor, the geo tags found in this directory, and the
/// offset of the next directory (0 at the end of the chain).
fn parse_ifd(
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    offset: u64,
) -> CogResult<(ImgDesc, RawGeo, u64)> {
    let mut count_buf = [0u8; 2];
    source.read_exact_at(offset, &mut count_buf)?;
    let entry_count = handler.read_u16(&count_buf) as usize;
    debug!("IFD entry count: {}", entry_count);

    let records = source
        .bytes_at(offset + 2, entry_count * ENTRY_LEN)?
        .into_owned();

    let mut desc = ImgDesc::new();
    let mut geo = RawGeo::default();
    for record in records.chunks_exact(ENTRY_LEN) {
        let entry = IfdEntry::parse(record, handler);
        parse_entry(&entry, source, handler, &mut desc, &mut geo)?;
    }

    let mut next_buf = [0u8; 4];
    source.read_exact_at(offset + 2 + (entry_count * ENTRY_LEN) as u64, &mut next_buf)?;
    let next = handler.read_u32(&next_buf) as u64;

    Ok((desc, geo, next))
}

/// Dispatches one IFD entry into the descriptor or the geo record
///
/// Every recognised tag checks its announced datatype and count; a
/// mismatch is a format error naming the tag. Unknown tags are skipped.
fn parse_entry(
    entry: &IfdEntry,
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    desc: &mut ImgDesc,
    geo: &mut RawGeo,
) -> CogResult<()> {
    match entry.tag {
        tags::NEW_SUBFILE_TYPE => {
            desc.new_subfile_type = ifd::read_long_single(entry, handler, "NewSubfileType")?;
        }
        tags::IMAGE_WIDTH => {
            desc.image_width = ifd::read_dimension(entry, handler, "ImageWidth")?;
        }
        tags::IMAGE_LENGTH => {
            desc.image_height = ifd::read_dimension(entry, handler, "ImageLength")?;
        }
        tags::BITS_PER_SAMPLE => {
            desc.bits_per_sample = ifd::read_shorts(entry, source, handler, "BitsPerSample")?;
        }
        tags::COMPRESSION => {
            desc.compression = ifd::read_short_single(entry, handler, "Compression")?;
        }
        tags::PHOTOMETRIC_INTERPRETATION => {
            desc.photometric = ifd::read_short_single(entry, handler, "PhotometricInterpretation")?;
        }
        tags::SAMPLES_PER_PIXEL => {
            desc.samples_per_pixel = ifd::read_short_single(entry, handler, "SamplesPerPixel")?;
        }
        tags::PREDICTOR => {
            let values = ifd::read_shorts(entry, source, handler, "Predictor")?;
            desc.predictor = values.first().copied().ok_or_else(|| {
                CogError::Format("tag Predictor: empty value".to_string())
            })?;
        }
        tags::TILE_WIDTH => {
            desc.tile_width = ifd::read_dimension(entry, handler, "TileWidth")?;
        }
        tags::TILE_LENGTH => {
            desc.tile_height = ifd::read_dimension(entry, handler, "TileLength")?;
        }
        tags::TILE_OFFSETS => {
            desc.tile_offsets = ifd::read_longs(entry, source, handler, "TileOffsets")?;
        }
        tags::TILE_BYTE_COUNTS => {
            desc.tile_byte_counts = ifd::read_longs(entry, source, handler, "TileByteCounts")?;
        }
        tags::SAMPLE_FORMAT => {
            desc.sample_format = ifd::read_shorts(entry, source, handler, "SampleFormat")?;
        }
        tags::MODEL_PIXEL_SCALE => {
            let values = ifd::read_doubles(entry, source, handler, "ModelPixelScale")?;
            if values.len() != 3 {
                return Err(CogError::Format(format!(
                    "tag ModelPixelScale: expected 3 values, found {}",
                    values.len()
                )));
            }
            geo.pixel_scale = Some([values[0], values[1], values[2]]);
        }
        tags::MODEL_TIEPOINT => {
            geo.tie_points = ifd::read_doubles(entry, source, handler, "ModelTiepoint")?;
        }
        tags::MODEL_TRANSFORMATION => {
            return Err(CogError::Unsupported(
                "ModelTransformation matrices".to_string(),
            ));
        }
        tags::GEO_KEY_DIRECTORY => {
            let values = ifd::read_shorts(entry, source, handler, "GeoKeyDirectory")?;
            if values.len() < 4 {
                return Err(CogError::Format(format!(
                    "tag GeoKeyDirectory: {} words is shorter than its header",
                    values.len()
                )));
            }
            geo.key_directory = values;
        }
        tags::GEO_DOUBLE_PARAMS => {
            geo.double_params = ifd::read_doubles(entry, source, handler, "GeoDoubleParams")?;
        }
        tags::GEO_ASCII_PARAMS => {
            geo.ascii_params = ifd::read_ascii(entry, source, handler, "GeoAsciiParams")?;
        }
        other => {
            debug!("skipping unrecognized tag {}", other);
        }
    }
    Ok(())
}

/// Decodes level 0 of a COG read from `reader`
pub fn decode<R: Read + Seek + Send + Sync + 'static>(reader: R) -> CogResult<GrayImage> {
    CogDecoder::new(ByteSource::from_seekable(reader))?.decode()
}

/// Decodes an arbitrary resolution level of a COG read from `reader`
pub fn decode_level<R: Read + Seek + Send + Sync + 'static>(
    reader: R,
    level: usize,
) -> CogResult<GrayImage> {
    CogDecoder::new(ByteSource::from_seekable(reader))?.decode_level(level)
}

/// Decodes a sub-rectangle of a resolution level, fetching only the tiles
/// that intersect it
pub fn decode_level_region<R: Read + Seek + Send + Sync + 'static>(
    reader: R,
    level: usize,
    rect: Region,
) -> CogResult<GrayImage> {
    CogDecoder::new(ByteSource::from_seekable(reader))?.decode_level_region(level, rect)
}

/// Reports the color model and dimensions of level 0 without decoding pixels
pub fn decode_config<R: Read + Seek + Send + Sync + 'static>(reader: R) -> CogResult<ImageConfig> {
    CogDecoder::new(ByteSource::from_seekable(reader))?.config()
}

/// Reports the color model and dimensions of an arbitrary level
pub fn decode_config_level<R: Read + Seek + Send + Sync + 'static>(
    reader: R,
    level: usize,
) -> CogResult<ImageConfig> {
    CogDecoder::new(ByteSource::from_seekable(reader))?.config_level(level)
}
