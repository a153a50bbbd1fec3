//! Main interface to the CogKit library

use std::fs::File;
use std::io::BufReader;

use log::info;

use crate::extractor::Region;
use crate::io::source::ByteSource;
use crate::raster::GrayImage;
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::reader::CogDecoder;
use crate::utils::code_translators::compression_code_to_name;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// File-path convenience facade over the decoder
pub struct CogKit {
    logger: Logger,
}

impl CogKit {
    /// Create a new CogKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "cogkit.log"
    pub fn new(log_file: Option<&str>) -> CogResult<Self> {
        let log_path = log_file.unwrap_or("cogkit.log");
        let logger = Logger::new(log_path)?;
        Ok(CogKit { logger })
    }

    /// Opens a COG file and parses its directory chain
    pub fn open(&self, input_path: &str) -> CogResult<CogDecoder> {
        info!("Opening COG file: {}", input_path);
        let file = File::open(input_path)?;
        let reader = BufReader::with_capacity(1 << 20, file);
        CogDecoder::new(ByteSource::from_seekable(reader))
    }

    /// Analyze a COG file and return a summary of its level pyramid and
    /// geospatial parameters
    pub fn analyze(&self, input_path: &str) -> CogResult<String> {
        let decoder = self.open(input_path)?;

        let mut result = format!("COG Analysis Results: {}\n", input_path);
        result.push_str(&format!("  Byte order: {}\n", decoder.byte_order().name()));
        result.push_str(&format!("  Resolution levels: {}\n", decoder.level_count()));

        for (i, desc) in decoder.levels().iter().enumerate() {
            let config = decoder.config_level(i)?;
            result.push_str(&format!(
                "\nLevel #{}{}\n",
                i,
                if desc.is_overview() { " (overview)" } else { "" }
            ));
            result.push_str(&format!(
                "  Dimensions: {}x{}\n",
                desc.image_width, desc.image_height
            ));
            result.push_str(&format!(
                "  Tiles: {}x{} pixels, {} across x {} down\n",
                desc.tile_width,
                desc.tile_height,
                desc.blocks_across(),
                desc.blocks_down()
            ));
            result.push_str(&format!(
                "  Compression: {} ({})\n",
                desc.compression,
                compression_code_to_name(desc.compression)
            ));
            let (min, max) = config.color.bounds();
            result.push_str(&format!(
                "  Pixel type: {} [{}..{}]\n",
                config.color.name(),
                min,
                max
            ));
        }

        if let Some(scale) = decoder.pixel_scale() {
            result.push_str(&format!(
                "\n  Pixel size: X={:.6} Y={:.6} (Z={:.6})\n",
                scale[0], scale[1], scale[2]
            ));
        }
        let tie = decoder.tie_points();
        if tie.len() >= 6 {
            result.push_str(&format!(
                "  Tiepoint: raster({:.1},{:.1},{:.1}) -> model({:.6},{:.6},{:.6})\n",
                tie[0], tie[1], tie[2], tie[3], tie[4], tie[5]
            ));
        }
        let geo = decoder.geo_code();
        if let Some(model) = geo.model_type {
            result.push_str(&format!("  Model type: {}\n", model.name()));
        }
        if let Some(projected) = geo.projected_cs {
            result.push_str(&format!("  Projected CS: {}\n", projected.name()));
        }
        if let Some(geographic) = geo.geographic_type {
            result.push_str(&format!("  Geographic CS: {}\n", geographic.name()));
        }
        if let Some(citation) = &geo.citation {
            result.push_str(&format!("  Citation: {}\n", citation));
        }
        if let Ok(wkt) = decoder.wkt() {
            result.push_str(&format!("  CRS (WKT): {}\n", wkt));
        }

        self.logger.log("Analysis completed successfully")?;
        Ok(result)
    }

    /// WKT rendering of a COG file's CRS
    pub fn describe_crs(&self, input_path: &str) -> CogResult<String> {
        self.open(input_path)?.wkt()
    }

    /// Decode a level (or a region of it) into memory
    pub fn decode_file(
        &self,
        input_path: &str,
        level: usize,
        region: Option<Region>,
    ) -> CogResult<GrayImage> {
        let mut decoder = self.open(input_path)?;
        match region {
            Some(rect) => decoder.decode_level_region(level, rect),
            None => decoder.decode_level(level),
        }
    }

    /// Decode a level (or a region of it) and write it to an image file
    ///
    /// The output format is inferred from the file extension by the
    /// `image` crate. Signed pixel kinds are shifted into the matching
    /// unsigned range for export.
    pub fn extract_to_file(
        &self,
        input_path: &str,
        output_path: &str,
        level: usize,
        region: Option<Region>,
    ) -> CogResult<()> {
        let progress = ProgressTracker::new_spinner(&format!("decoding level {}", level));
        let image = self.decode_file(input_path, level, region)?;
        progress.set_message("writing output");

        image
            .to_dynamic()
            .save(output_path)
            .map_err(|e| CogError::Format(format!("writing {}: {}", output_path, e)))?;
        progress.finish();

        info!(
            "Extracted {}x{} pixels to {}",
            image.width(),
            image.height(),
            output_path
        );
        self.logger
            .log(&format!("Extraction completed: {}", output_path))?;
        Ok(())
    }
}
