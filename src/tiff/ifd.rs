//! Image File Directory (IFD) structures and entry decoding
//!
//! An IFD is one page of a TIFF file: a 16-bit entry count followed by
//! fixed 12-byte entries and a 32-bit offset to the next directory. Each
//! entry either carries its value inline in its last four bytes or points
//! at the value elsewhere in the file. This module decodes entries into
//! typed values with per-tag datatype and count checking, and accumulates
//! the tags of one page into an [`ImgDesc`].

use crate::io::byte_order::ByteOrderHandler;
use crate::io::source::ByteSource;
use crate::tiff::constants::{field_types, new_subfile_type};
use crate::tiff::errors::{CogError, CogResult};

/// Size of one IFD entry record in bytes
pub const ENTRY_LEN: usize = 12;

/// Upper bound on a single entry's payload, guarding byte-count overflow
const MAX_ENTRY_DATA: u64 = 1 << 30;

/// A raw IFD entry as stored in the file
///
/// The last four bytes of the record are kept verbatim: depending on the
/// announced datatype and count they hold either the value itself
/// (left-aligned, zero-padded) or an absolute file offset to it.
#[derive(Debug, Clone)]
pub struct IfdEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type code
    pub field_type: u16,
    /// Number of values of that type
    pub count: u32,
    /// Inline value bytes or an offset, in file byte order
    pub value: [u8; 4],
}

impl IfdEntry {
    /// Decodes one 12-byte entry record
    pub fn parse(record: &[u8], handler: &dyn ByteOrderHandler) -> Self {
        let mut value = [0u8; 4];
        value.copy_from_slice(&record[8..12]);
        IfdEntry {
            tag: handler.read_u16(&record[0..2]),
            field_type: handler.read_u16(&record[2..4]),
            count: handler.read_u32(&record[4..8]),
            value,
        }
    }

    /// Total payload size in bytes, if the field type is known
    pub fn data_len(&self) -> Option<u64> {
        field_types::size_of(self.field_type).map(|size| size as u64 * self.count as u64)
    }

    /// Whether the value fits in the four inline bytes
    pub fn is_inline(&self) -> bool {
        matches!(self.data_len(), Some(len) if len <= 4)
    }

    /// Fetches the entry's payload, resolving inline vs. indirect storage
    pub fn raw_data(
        &self,
        source: &mut ByteSource,
        handler: &dyn ByteOrderHandler,
    ) -> CogResult<Vec<u8>> {
        let len = self.data_len().ok_or_else(|| {
            CogError::Unsupported(format!("IFD entry datatype {}", self.field_type))
        })?;
        if len > MAX_ENTRY_DATA {
            return Err(CogError::Format(format!(
                "IFD entry for tag {} announces {} bytes of data",
                self.tag, len
            )));
        }
        if len <= 4 {
            Ok(self.value[..len as usize].to_vec())
        } else {
            let offset = handler.read_u32(&self.value) as u64;
            Ok(source.bytes_at(offset, len as usize)?.into_owned())
        }
    }
}

fn type_mismatch(name: &str, entry: &IfdEntry) -> CogError {
    CogError::Format(format!(
        "tag {}: unexpected datatype {} ({}) with count {}",
        name,
        entry.field_type,
        field_types::name(entry.field_type),
        entry.count
    ))
}

/// Reads a single u16 value (SHORT, count 1)
pub fn read_short_single(
    entry: &IfdEntry,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<u16> {
    if entry.field_type != field_types::SHORT || entry.count != 1 {
        return Err(type_mismatch(name, entry));
    }
    Ok(handler.read_u16(&entry.value[0..2]))
}

/// Reads a single u32 value (LONG, count 1)
pub fn read_long_single(
    entry: &IfdEntry,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<u32> {
    if entry.field_type != field_types::LONG || entry.count != 1 {
        return Err(type_mismatch(name, entry));
    }
    Ok(handler.read_u32(&entry.value))
}

/// Reads a single dimension-style value, accepting SHORT or LONG
pub fn read_dimension(
    entry: &IfdEntry,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<u32> {
    if entry.count != 1 {
        return Err(type_mismatch(name, entry));
    }
    match entry.field_type {
        field_types::SHORT => Ok(handler.read_u16(&entry.value[0..2]) as u32),
        field_types::LONG => Ok(handler.read_u32(&entry.value)),
        _ => Err(type_mismatch(name, entry)),
    }
}

/// Reads an array of u16 values (SHORT, any count)
pub fn read_shorts(
    entry: &IfdEntry,
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<Vec<u16>> {
    if entry.field_type != field_types::SHORT {
        return Err(type_mismatch(name, entry));
    }
    let raw = entry.raw_data(source, handler)?;
    Ok(raw.chunks_exact(2).map(|c| handler.read_u16(c)).collect())
}

/// Reads an array of u32 values (LONG, any count)
pub fn read_longs(
    entry: &IfdEntry,
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<Vec<u32>> {
    if entry.field_type != field_types::LONG {
        return Err(type_mismatch(name, entry));
    }
    let raw = entry.raw_data(source, handler)?;
    Ok(raw.chunks_exact(4).map(|c| handler.read_u32(c)).collect())
}

/// Reads an array of f64 values (DOUBLE, any count)
///
/// Each element is eight raw bytes reinterpreted as an IEEE-754 double in
/// the file byte order.
pub fn read_doubles(
    entry: &IfdEntry,
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<Vec<f64>> {
    if entry.field_type != field_types::DOUBLE {
        return Err(type_mismatch(name, entry));
    }
    let raw = entry.raw_data(source, handler)?;
    Ok(raw.chunks_exact(8).map(|c| handler.read_f64(c)).collect())
}

/// Reads an ASCII value into a string, trimming trailing NULs
pub fn read_ascii(
    entry: &IfdEntry,
    source: &mut ByteSource,
    handler: &dyn ByteOrderHandler,
    name: &str,
) -> CogResult<String> {
    if entry.field_type != field_types::ASCII {
        return Err(type_mismatch(name, entry));
    }
    let mut raw = entry.raw_data(source, handler)?;
    while raw.last() == Some(&0) {
        raw.pop();
    }
    String::from_utf8(raw)
        .map_err(|e| CogError::Format(format!("tag {}: invalid ASCII value: {}", name, e)))
}

/// Description of one resolution level of a COG file
///
/// Accumulated from the tags of a single IFD. The chain convention is that
/// the first directory is the full-resolution image and later directories
/// are progressively downsampled overviews.
#[derive(Debug, Clone)]
pub struct ImgDesc {
    pub new_subfile_type: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub photometric: u16,
    pub predictor: u16,
    pub compression: u16,
    pub samples_per_pixel: u16,
    pub bits_per_sample: Vec<u16>,
    pub sample_format: Vec<u16>,
    pub tile_offsets: Vec<u32>,
    pub tile_byte_counts: Vec<u32>,
}

impl ImgDesc {
    /// Creates a descriptor populated with the TIFF defaults
    pub fn new() -> Self {
        ImgDesc {
            new_subfile_type: 0,
            image_width: 0,
            image_height: 0,
            tile_width: 0,
            tile_height: 0,
            photometric: 0,
            predictor: 1,
            compression: 1,
            samples_per_pixel: 1,
            bits_per_sample: Vec::new(),
            sample_format: vec![1],
            tile_offsets: Vec::new(),
            tile_byte_counts: Vec::new(),
        }
    }

    /// Number of tile columns
    pub fn blocks_across(&self) -> u32 {
        if self.tile_width == 0 {
            return 0;
        }
        (self.image_width + self.tile_width - 1) / self.tile_width
    }

    /// Number of tile rows
    pub fn blocks_down(&self) -> u32 {
        if self.tile_height == 0 {
            return 0;
        }
        (self.image_height + self.tile_height - 1) / self.tile_height
    }

    /// Bits per sample of the first (only) band, 0 when unset
    pub fn bits(&self) -> u16 {
        self.bits_per_sample.first().copied().unwrap_or(0)
    }

    /// Sample format of the first (only) band
    pub fn sample_fmt(&self) -> u16 {
        self.sample_format.first().copied().unwrap_or(1)
    }

    /// Bytes per sample (1 or 2 once validated)
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Whether this level is flagged as a reduced-resolution overview
    pub fn is_overview(&self) -> bool {
        self.new_subfile_type & new_subfile_type::REDUCED_RESOLUTION != 0
    }
}

impl Default for ImgDesc {
    fn default() -> Self {
        ImgDesc::new()
    }
}
