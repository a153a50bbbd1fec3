pub mod api;
pub mod commands;
pub mod compression;
pub mod extractor;
pub mod io;
pub mod raster;
pub mod tiff;
pub mod utils;

pub use crate::api::CogKit;

pub use extractor::Region;
pub use raster::{ColorKind, GrayImage, ImageConfig};
pub use tiff::reader::{decode, decode_config, decode_config_level, decode_level, decode_level_region};
pub use tiff::{CogDecoder, CogError, CogResult, GeoCode, ImgDesc};
