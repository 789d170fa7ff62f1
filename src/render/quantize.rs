//! # Color Quantizer
//!
//! Maps sampled RGBA pixels into the target color model.
//!
//! | Mode | Per-pixel value |
//! |------|-----------------|
//! | mono | 1 bit: luminance against threshold (optionally dithered) |
//! | grayscale | 8-bit luminance |
//! | rgb565 | `RRRRRGGG GGGBBBBB` |
//! | rgb888 | `R, G, B` |
//!
//! Alpha is ignored: a transparent pixel quantizes by its RGB value, so
//! transparent background counts as black rather than being skipped.
//!
//! ## Luminance
//!
//! ITU-R BT.601 weights in integer fixed point, rounded:
//!
//! ```text
//! luma = (299 R + 587 G + 114 B + 500) / 1000
//! ```
//!
//! ## Invert
//!
//! - mono without dithering: bit = `luma < threshold` instead of `luma >= threshold`,
//!   the exact complement of the non-inverted output
//! - mono with dithering: the ditherer sees `255 - luma`
//! - grayscale: `255 - luma`
//! - rgb565/rgb888: each channel becomes `255 - channel` before packing

use tracing::debug;

use super::dither;
use super::sampler::PixelBuffer;
use crate::options::{ColorMode, Dithering};

/// Per-pixel values in the target model's native representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizedPixels {
    Mono(Vec<bool>),
    Grayscale(Vec<u8>),
    Rgb565(Vec<u16>),
    Rgb888(Vec<[u8; 3]>),
}

/// Row-major quantized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: QuantizedPixels,
}

/// BT.601 luminance, rounded to the nearest integer.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Pack 8-bit channels into RGB565.
#[inline]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Mono threshold test for the non-dithered path.
#[inline]
pub fn threshold_bit(luma: u8, threshold: u8, invert: bool) -> bool {
    if invert {
        luma < threshold
    } else {
        luma >= threshold
    }
}

/// Quantize a sampled buffer into `mode`.
pub fn quantize(buffer: &PixelBuffer, mode: ColorMode, invert: bool) -> QuantizedBuffer {
    let (width, height) = (buffer.width(), buffer.height());
    debug!(width, height, mode = mode.name(), invert, "Quantizing");

    let rgb = buffer.as_rgba().pixels().map(|p| {
        let [r, g, b, _] = p.0;
        if invert {
            [255 - r, 255 - g, 255 - b]
        } else {
            [r, g, b]
        }
    });

    let pixels = match mode {
        ColorMode::Mono {
            threshold,
            dithering,
            ..
        } => {
            let lumas: Vec<u8> = buffer
                .as_rgba()
                .pixels()
                .map(|p| luma(p.0[0], p.0[1], p.0[2]))
                .collect();
            let bits = match dithering {
                Dithering::None => lumas
                    .iter()
                    .map(|&l| threshold_bit(l, threshold, invert))
                    .collect(),
                algorithm => {
                    let input: Vec<u8> = if invert {
                        lumas.iter().map(|&l| 255 - l).collect()
                    } else {
                        lumas
                    };
                    dither::dither(
                        &input,
                        width as usize,
                        height as usize,
                        threshold,
                        algorithm,
                    )
                }
            };
            QuantizedPixels::Mono(bits)
        }
        ColorMode::Grayscale => QuantizedPixels::Grayscale(
            buffer
                .as_rgba()
                .pixels()
                .map(|p| {
                    let l = luma(p.0[0], p.0[1], p.0[2]);
                    if invert { 255 - l } else { l }
                })
                .collect(),
        ),
        ColorMode::Rgb565 => QuantizedPixels::Rgb565(rgb.map(|[r, g, b]| rgb565(r, g, b)).collect()),
        ColorMode::Rgb888 => QuantizedPixels::Rgb888(rgb.collect()),
    };

    QuantizedBuffer {
        width,
        height,
        pixels,
    }
}
