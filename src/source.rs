//! # Source Images
//!
//! A [`SourceImage`] is an already-decoded RGBA raster owned by the caller.
//! The pipeline only reads it, so one source can be re-processed any number
//! of times as options change.
//!
//! Decoding from disk formats (PNG, JPEG, BMP, GIF) is delegated to the
//! `image` crate through [`SourceImage::open`] and [`SourceImage::decode`];
//! anything that fails to decode never reaches the pipeline.

use image::{DynamicImage, RgbaImage};
use std::path::Path;
use tracing::debug;

use crate::error::{PixelpackError, Result};

/// Immutable decoded raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap a raw RGBA buffer (`width * height * 4` bytes, row-major).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PixelpackError::SourceMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let pixels = RgbaImage::from_raw(width, height, data).ok_or(
            PixelpackError::SourceMismatch {
                width,
                height,
                expected,
                actual: 0,
            },
        )?;
        Ok(Self { pixels })
    }

    /// A source where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        }
    }

    /// Convert any decoded image to RGBA.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    /// Decode an in-memory image file.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| PixelpackError::Image(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_dynamic(&image))
    }

    /// Open and decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| {
            PixelpackError::Image(format!("Failed to open {}: {}", path.display(), e))
        })?;
        debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded source image"
        );
        Ok(Self::from_dynamic(&image))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    /// Borrow the underlying RGBA raster.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}
