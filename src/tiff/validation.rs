//! Level descriptor validation
//!
//! Checks that a parsed [`ImgDesc`] satisfies the structural rules this
//! decoder relies on before any tile of the level is touched. The checks
//! separate malformed structure (format errors) from valid-but-unsupported
//! features.

use crate::tiff::constants::{photometric, predictor, sample_format};
use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::ifd::ImgDesc;

/// Validates one resolution level against the decoder's invariants
pub fn validate_level(desc: &ImgDesc) -> CogResult<()> {
    if desc.image_width == 0 || desc.image_height == 0 {
        return Err(CogError::Format("empty image dimensions".to_string()));
    }

    if desc.samples_per_pixel != 1 {
        return Err(CogError::Format(format!(
            "{} samples per pixel; only single-band grayscale is supported",
            desc.samples_per_pixel
        )));
    }

    if desc.photometric != photometric::BLACK_IS_ZERO {
        return Err(CogError::Format(format!(
            "photometric interpretation {}",
            desc.photometric
        )));
    }

    match desc.bits() {
        0 => return Err(CogError::Format("BitsPerSample must not be 0".to_string())),
        8 | 16 => {}
        bits => {
            return Err(CogError::Unsupported(format!("BitsPerSample of {}", bits)));
        }
    }

    match desc.sample_fmt() {
        sample_format::UNSIGNED | sample_format::SIGNED => {}
        fmt => {
            return Err(CogError::Format(format!("sample format {}", fmt)));
        }
    }

    if desc.tile_width == 0 || desc.tile_height == 0 {
        return Err(CogError::Unsupported(
            "striped layout; only tiled images are supported".to_string(),
        ));
    }

    match desc.predictor {
        predictor::NONE | predictor::HORIZONTAL => {}
        p => {
            return Err(CogError::Unsupported(format!("predictor {}", p)));
        }
    }

    let expected = (desc.blocks_across() * desc.blocks_down()) as usize;
    if desc.tile_offsets.len() != expected || desc.tile_byte_counts.len() != expected {
        return Err(CogError::Format(format!(
            "expected {} tiles, found {} offsets and {} byte counts",
            expected,
            desc.tile_offsets.len(),
            desc.tile_byte_counts.len()
        )));
    }

    Ok(())
}
