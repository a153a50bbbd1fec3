//! Byte order handling for TIFF data
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian). Unlike a streaming reader,
//! COG parsing is slice-oriented: directory records and tile payloads are
//! fetched as byte buffers first and decoded in place, so the handlers
//! here decode directly from slices.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::tiff::errors::{CogError, CogResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the first two header bytes
    pub fn detect(marker: [u8; 2]) -> CogResult<Self> {
        match marker {
            [0x49, 0x49] => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            [0x4D, 0x4D] => Ok(ByteOrder::BigEndian),    // "MM" (Motorola)
            _ => Err(CogError::Format(format!(
                "bad byte order marker {:#04x}{:02x}",
                marker[0], marker[1]
            ))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Each method decodes from the leading bytes of the given slice. Callers
/// are responsible for handing in a slice of at least the decoded width.
pub trait ByteOrderHandler: Send + Sync {
    /// Decode a u16 from the first 2 bytes
    fn read_u16(&self, buf: &[u8]) -> u16;

    /// Decode a u32 from the first 4 bytes
    fn read_u32(&self, buf: &[u8]) -> u32;

    /// Decode a u64 from the first 8 bytes
    fn read_u64(&self, buf: &[u8]) -> u64;

    /// Decode an f64 from the first 8 bytes (IEEE-754 bit pattern)
    fn read_f64(&self, buf: &[u8]) -> f64;

    /// Encode a u16 into the first 2 bytes
    fn put_u16(&self, buf: &mut [u8], value: u16);

    /// Name of this byte order
    fn name(&self) -> &'static str;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 {
        LittleEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        LittleEndian::read_u32(buf)
    }

    fn read_u64(&self, buf: &[u8]) -> u64 {
        LittleEndian::read_u64(buf)
    }

    fn read_f64(&self, buf: &[u8]) -> f64 {
        LittleEndian::read_f64(buf)
    }

    fn put_u16(&self, buf: &mut [u8], value: u16) {
        LittleEndian::write_u16(buf, value)
    }

    fn name(&self) -> &'static str {
        "little endian"
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, buf: &[u8]) -> u16 {
        BigEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        BigEndian::read_u32(buf)
    }

    fn read_u64(&self, buf: &[u8]) -> u64 {
        BigEndian::read_u64(buf)
    }

    fn read_f64(&self, buf: &[u8]) -> f64 {
        BigEndian::read_f64(buf)
    }

    fn put_u16(&self, buf: &mut [u8], value: u16) {
        BigEndian::write_u16(buf, value)
    }

    fn name(&self) -> &'static str {
        "big endian"
    }
}
