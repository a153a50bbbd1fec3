//! TIFF and GeoTIFF format constants
//!
//! This module defines constants used throughout the decoding code,
//! replacing magic numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43), recognised only to reject it
    pub const BIG_TIFF_VERSION: u16 = 43;
}

/// Field types as defined in the TIFF spec (subset used by COG files)
pub mod field_types {
    pub const BYTE: u16 = 1; // 8-bit unsigned integer
    pub const ASCII: u16 = 2; // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3; // 16-bit unsigned integer
    pub const LONG: u16 = 4; // 32-bit unsigned integer
    pub const DOUBLE: u16 = 12; // Double precision IEEE floating point

    /// Size in bytes of one element of the given field type, if known
    pub fn size_of(field_type: u16) -> Option<u32> {
        match field_type {
            BYTE | ASCII => Some(1),
            SHORT => Some(2),
            LONG => Some(4),
            DOUBLE => Some(8),
            _ => None,
        }
    }

    /// Human-readable name of the field type, for error messages
    pub fn name(field_type: u16) -> &'static str {
        match field_type {
            BYTE => "BYTE",
            ASCII => "ASCII",
            SHORT => "SHORT",
            LONG => "LONG",
            DOUBLE => "DOUBLE",
            _ => "unknown",
        }
    }
}

/// TIFF tags recognised by the decoder
pub mod tags {
    pub const NEW_SUBFILE_TYPE: u16 = 254; // Subfile data descriptor
    pub const IMAGE_WIDTH: u16 = 256; // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257; // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258; // Bits per component
    pub const COMPRESSION: u16 = 259; // Compression scheme
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262; // Color space of image data
    pub const SAMPLES_PER_PIXEL: u16 = 277; // Number of components per pixel
    pub const PREDICTOR: u16 = 317; // Prediction scheme used on image data

    pub const TILE_WIDTH: u16 = 322; // Width of a tile
    pub const TILE_LENGTH: u16 = 323; // Length of a tile
    pub const TILE_OFFSETS: u16 = 324; // Offsets to the data tiles
    pub const TILE_BYTE_COUNTS: u16 = 325; // Byte counts for tiles

    pub const SAMPLE_FORMAT: u16 = 339; // Interpretation of sample data

    // GeoTIFF tags
    pub const MODEL_PIXEL_SCALE: u16 = 33550; // Pixel size in map units
    pub const MODEL_TIEPOINT: u16 = 33922; // Links raster to world coordinates
    pub const MODEL_TRANSFORMATION: u16 = 34264; // Transformation matrix (rejected)
    pub const GEO_KEY_DIRECTORY: u16 = 34735; // GeoTIFF keys structure
    pub const GEO_DOUBLE_PARAMS: u16 = 34736; // GeoTIFF double parameters
    pub const GEO_ASCII_PARAMS: u16 = 34737; // GeoTIFF ASCII parameters
}

/// Compression codes
pub mod compression {
    pub const NONE: u16 = 1; // No compression
    pub const LZW: u16 = 5; // LZW compression (MSB-first, 8-bit)
    pub const DEFLATE_OLD: u16 = 6; // Legacy zlib variant
    pub const DEFLATE: u16 = 7; // zlib stream
    pub const ADOBE_DEFLATE: u16 = 8; // Adobe Deflate (zlib)
    pub const DEFLATE_ALT: u16 = 32946; // Deflate, alternate code
    pub const PACKBITS: u16 = 32773; // PackBits byte-run RLE
}

/// Photometric interpretation values
pub mod photometric {
    pub const WHITE_IS_ZERO: u16 = 0; // Minimum value is white
    pub const BLACK_IS_ZERO: u16 = 1; // Minimum value is black
}

/// Sample format values
pub mod sample_format {
    pub const UNSIGNED: u16 = 1; // Unsigned integer data
    pub const SIGNED: u16 = 2; // Signed integer data
}

/// Predictor values
pub mod predictor {
    pub const NONE: u16 = 1; // No prediction scheme
    pub const HORIZONTAL: u16 = 2; // Horizontal differencing
}

/// GeoTIFF Key ID constants
pub mod geo_keys {
    pub const MODEL_TYPE: u16 = 1024; // GTModelTypeGeoKey
    pub const RASTER_TYPE: u16 = 1025; // GTRasterTypeGeoKey
    pub const CITATION: u16 = 1026; // GTCitationGeoKey
    pub const GEOGRAPHIC_TYPE: u16 = 2048; // GeographicTypeGeoKey
    pub const GEOG_CITATION: u16 = 2049; // GeogCitationGeoKey
    pub const GEOG_GEODETIC_DATUM: u16 = 2050; // GeogGeodeticDatumGeoKey
    pub const GEOG_PRIME_MERIDIAN: u16 = 2051; // GeogPrimeMeridianGeoKey
    pub const GEOG_LINEAR_UNITS: u16 = 2052; // GeogLinearUnitsGeoKey
    pub const GEOG_ANGULAR_UNITS: u16 = 2054; // GeogAngularUnitsGeoKey
    pub const GEOG_ELLIPSOID: u16 = 2056; // GeogEllipsoidGeoKey
    pub const GEOG_SEMI_MAJOR_AXIS: u16 = 2057; // GeogSemiMajorAxisGeoKey
    pub const GEOG_SEMI_MINOR_AXIS: u16 = 2058; // GeogSemiMinorAxisGeoKey
    pub const GEOG_PRIME_MERIDIAN_LONG: u16 = 2061; // GeogPrimeMeridianLongGeoKey
    pub const PROJECTED_CS_TYPE: u16 = 3072; // ProjectedCSTypeGeoKey
    pub const PROJECTION: u16 = 3074; // ProjectionGeoKey
    pub const PROJ_COORD_TRANS: u16 = 3075; // ProjCoordTransGeoKey
    pub const PROJ_LINEAR_UNITS: u16 = 3076; // ProjLinearUnitsGeoKey
    pub const PROJ_FALSE_EASTING: u16 = 3082; // ProjFalseEastingGeoKey
    pub const PROJ_FALSE_NORTHING: u16 = 3083; // ProjFalseNorthingGeoKey
    pub const PROJ_CENTER_LONG: u16 = 3088; // ProjCenterLongGeoKey

    /// Sentinel for a user-defined value in any enumerated key
    pub const USER_DEFINED: u16 = 32767;
}

/// Subfile type bit flags
pub mod new_subfile_type {
    pub const REDUCED_RESOLUTION: u32 = 1; // Reduced resolution version of another image
}
