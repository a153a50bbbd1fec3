//! Grayscale pixel buffers
//!
//! The decoder produces one of four grayscale buffer kinds, selected by
//! the file's photometric interpretation, sample format and bit depth.
//! The kinds form a closed sum so the tile unpacker can dispatch once and
//! run a monomorphic inner loop per variant.

use image::{DynamicImage, ImageBuffer, Luma};

use crate::tiff::constants::{photometric, sample_format};
use crate::tiff::errors::{CogError, CogResult};

/// The four grayscale pixel kinds this decoder produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorKind {
    GrayU8,
    GrayU16,
    GrayS8,
    GrayS16,
}

impl ColorKind {
    /// Selects the destination kind for a level's sample description
    pub fn select(photometric_code: u16, format: u16, bits: u16) -> CogResult<Self> {
        match photometric_code {
            photometric::BLACK_IS_ZERO => match (format, bits) {
                (sample_format::UNSIGNED, 8) => Ok(ColorKind::GrayU8),
                (sample_format::UNSIGNED, 16) => Ok(ColorKind::GrayU16),
                (sample_format::SIGNED, 8) => Ok(ColorKind::GrayS8),
                (sample_format::SIGNED, 16) => Ok(ColorKind::GrayS16),
                _ => Err(CogError::Format(format!(
                    "image data type not implemented: sample format {}, {} bits",
                    format, bits
                ))),
            },
            other => Err(CogError::Format(format!(
                "color model not implemented: photometric interpretation {}",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorKind::GrayU8 => "GrayU8",
            ColorKind::GrayU16 => "GrayU16",
            ColorKind::GrayS8 => "GrayS8",
            ColorKind::GrayS16 => "GrayS16",
        }
    }

    /// Representable value range of this kind
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            ColorKind::GrayU8 => (0, 255),
            ColorKind::GrayU16 => (0, 65535),
            ColorKind::GrayS8 => (-128, 127),
            ColorKind::GrayS16 => (-32768, 32767),
        }
    }
}

/// Color model and dimensions of a level, reported without pixel decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageConfig {
    pub color: ColorKind,
    pub width: u32,
    pub height: u32,
}

/// Row-major grayscale buffer over one sample type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer<T> {
    width: u32,
    height: u32,
    pixels: Vec<T>,
}

impl<T: Copy + Default> GrayBuffer<T> {
    /// Allocates a zeroed buffer
    pub fn new(width: u32, height: u32) -> Self {
        GrayBuffer {
            width,
            height,
            pixels: vec![T::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample at (x, y); panics when out of bounds
    pub fn get(&self, x: u32, y: u32) -> T {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Stores a sample at (x, y); panics when out of bounds
    pub fn set(&mut self, x: u32, y: u32, value: T) {
        self.pixels[y as usize * self.width as usize + x as usize] = value;
    }

    /// The raw row-major samples
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    fn copy_window(&self, x: u32, y: u32, width: u32, height: u32) -> GrayBuffer<T> {
        let mut out = GrayBuffer::new(width, height);
        for row in 0..height {
            for col in 0..width {
                out.set(col, row, self.get(x + col, y + row));
            }
        }
        out
    }
}

/// Closed sum over the four grayscale buffer kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrayImage {
    U8(GrayBuffer<u8>),
    U16(GrayBuffer<u16>),
    S8(GrayBuffer<i8>),
    S16(GrayBuffer<i16>),
}

impl GrayImage {
    /// Allocates a zeroed image of the given kind
    pub fn with_kind(kind: ColorKind, width: u32, height: u32) -> Self {
        match kind {
            ColorKind::GrayU8 => GrayImage::U8(GrayBuffer::new(width, height)),
            ColorKind::GrayU16 => GrayImage::U16(GrayBuffer::new(width, height)),
            ColorKind::GrayS8 => GrayImage::S8(GrayBuffer::new(width, height)),
            ColorKind::GrayS16 => GrayImage::S16(GrayBuffer::new(width, height)),
        }
    }

    pub fn kind(&self) -> ColorKind {
        match self {
            GrayImage::U8(_) => ColorKind::GrayU8,
            GrayImage::U16(_) => ColorKind::GrayU16,
            GrayImage::S8(_) => ColorKind::GrayS8,
            GrayImage::S16(_) => ColorKind::GrayS16,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            GrayImage::U8(b) => b.width(),
            GrayImage::U16(b) => b.width(),
            GrayImage::S8(b) => b.width(),
            GrayImage::S16(b) => b.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            GrayImage::U8(b) => b.height(),
            GrayImage::U16(b) => b.height(),
            GrayImage::S8(b) => b.height(),
            GrayImage::S16(b) => b.height(),
        }
    }

    /// Copies out the window at (x, y) of the given size
    ///
    /// The window must lie inside the image; panics otherwise.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> GrayImage {
        match self {
            GrayImage::U8(b) => GrayImage::U8(b.copy_window(x, y, width, height)),
            GrayImage::U16(b) => GrayImage::U16(b.copy_window(x, y, width, height)),
            GrayImage::S8(b) => GrayImage::S8(b.copy_window(x, y, width, height)),
            GrayImage::S16(b) => GrayImage::S16(b.copy_window(x, y, width, height)),
        }
    }

    /// Converts into an exportable `image` crate buffer
    ///
    /// Signed kinds are shifted into the matching unsigned range, which
    /// preserves ordering for display purposes.
    pub fn to_dynamic(&self) -> DynamicImage {
        match self {
            GrayImage::U8(b) => DynamicImage::ImageLuma8(ImageBuffer::from_fn(
                b.width(),
                b.height(),
                |x, y| Luma([b.get(x, y)]),
            )),
            GrayImage::U16(b) => DynamicImage::ImageLuma16(ImageBuffer::from_fn(
                b.width(),
                b.height(),
                |x, y| Luma([b.get(x, y)]),
            )),
            GrayImage::S8(b) => DynamicImage::ImageLuma8(ImageBuffer::from_fn(
                b.width(),
                b.height(),
                |x, y| Luma([(b.get(x, y) as i16 + 128) as u8]),
            )),
            GrayImage::S16(b) => DynamicImage::ImageLuma16(ImageBuffer::from_fn(
                b.width(),
                b.height(),
                |x, y| Luma([(b.get(x, y) as i32 + 32768) as u16]),
            )),
        }
    }
}
