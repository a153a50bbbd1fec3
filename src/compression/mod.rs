//! Tile decompression for COG files
//!
//! This module implements strategies for the compression methods a COG
//! tile may use. All handlers share one contract: given the raw bytes of
//! a tile, return the decoded byte buffer.

mod deflate;
mod factory;
mod handler;
mod lzw;
mod packbits;
mod uncompressed;

pub use deflate::DeflateHandler;
pub use factory::CompressionFactory;
pub use handler::CompressionHandler;
pub use lzw::LzwHandler;
pub use packbits::PackBitsHandler;
pub use uncompressed::UncompressedHandler;
