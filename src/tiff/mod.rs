//! COG/GeoTIFF container parsing
//!
//! This module provides the directory traversal, per-tag extraction and
//! GeoKey interpretation for Cloud-Optimized GeoTIFF files.

pub mod constants;
pub mod errors;
pub mod geo_keys;
pub mod ifd;
pub mod reader;
pub mod validation;
pub mod wkt;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{CogError, CogResult};
pub use geo_keys::{GeoCode, GeoKeyEntry, KeyValue};
pub use ifd::{IfdEntry, ImgDesc};
pub use reader::CogDecoder;
