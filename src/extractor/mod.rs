//! Tile-based pixel extraction
//!
//! This module implements the pipeline that turns the tiles of one
//! resolution level into a pixel buffer: tile enumeration, fetch,
//! decompression, predictor reversal and sample unpacking.

pub mod predictor;
pub mod region;
pub mod tile_reader;

pub use region::Region;
pub use tile_reader::TileReader;
