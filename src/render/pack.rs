//! # Bit Packer
//!
//! Packs quantized pixels into the byte sequence a display controller expects.
//!
//! ## Bit Packing (mono)
//!
//! Each bit represents one pixel, most significant bit first:
//! - Bit 7 (MSB) = first pixel of the run
//! - Bit 0 (LSB) = eighth pixel
//! - 1 = luminance at or above threshold, 0 = below
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! | Draw mode | Run | Bytes |
//! |-----------|-----|-------|
//! | horizontal | one row, left to right | `ceil(width/8) * height` |
//! | vertical | one column, top to bottom | `ceil(height/8) * width` |
//!
//! Trailing bits of a run's last byte are zero.
//!
//! ## Multi-byte modes
//!
//! Grayscale, RGB565 and RGB888 ignore the draw mode and emit 1, 2 and 3
//! bytes per pixel in raster order. RGB565 is big-endian (high byte first).

use tracing::debug;

use super::quantize::{QuantizedBuffer, QuantizedPixels};
use crate::options::{ColorMode, DrawMode};

/// Byte layout of a packed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    MonoHorizontal,
    MonoVertical,
    Grayscale,
    Rgb565,
    Rgb888,
}

impl Layout {
    /// Layout produced for a given color mode.
    pub fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Mono {
                draw_mode: DrawMode::Horizontal,
                ..
            } => Layout::MonoHorizontal,
            ColorMode::Mono {
                draw_mode: DrawMode::Vertical,
                ..
            } => Layout::MonoVertical,
            ColorMode::Grayscale => Layout::Grayscale,
            ColorMode::Rgb565 => Layout::Rgb565,
            ColorMode::Rgb888 => Layout::Rgb888,
        }
    }

    /// Packed length in bytes for a `width` x `height` image.
    pub fn byte_len(&self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        match self {
            Layout::MonoHorizontal => w.div_ceil(8) * h,
            Layout::MonoVertical => h.div_ceil(8) * w,
            Layout::Grayscale => w * h,
            Layout::Rgb565 => w * h * 2,
            Layout::Rgb888 => w * h * 3,
        }
    }

    /// Color mode name without orientation.
    pub fn color_mode_name(&self) -> &'static str {
        match self {
            Layout::MonoHorizontal | Layout::MonoVertical => "mono",
            Layout::Grayscale => "grayscale",
            Layout::Rgb565 => "rgb565",
            Layout::Rgb888 => "rgb888",
        }
    }

    /// Orientation, only meaningful for 1-bit layouts.
    pub fn draw_mode(&self) -> Option<DrawMode> {
        match self {
            Layout::MonoHorizontal => Some(DrawMode::Horizontal),
            Layout::MonoVertical => Some(DrawMode::Vertical),
            _ => None,
        }
    }

    /// Human-readable description used in generated headers.
    pub fn describe(&self) -> &'static str {
        match self {
            Layout::MonoHorizontal => "mono, horizontal",
            Layout::MonoVertical => "mono, vertical",
            Layout::Grayscale => "grayscale",
            Layout::Rgb565 => "rgb565, big-endian",
            Layout::Rgb888 => "rgb888",
        }
    }
}

/// Packed bytes plus the metadata needed to interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteArray {
    pub width: u32,
    pub height: u32,
    pub layout: Layout,
    pub data: Vec<u8>,
}

impl ByteArray {
    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Pack a row of boolean pixel values into bytes.
///
/// Converts a slice of bool values into MSB-first bytes, zero-padding the
/// last byte on the right.
///
/// ## Example
///
/// ```
/// use pixelpack::render::pack::pack_row;
///
/// // 8 pixels pack into 1 byte
/// let row = vec![true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]); // 11110000
///
/// // 12 pixels pack into 2 bytes (4 bits padding)
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]); // 11111111 11110000
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

/// Pack a quantized buffer.
///
/// `draw_mode` only affects mono buffers.
pub fn pack(buffer: &QuantizedBuffer, draw_mode: DrawMode) -> ByteArray {
    let (width, height) = (buffer.width as usize, buffer.height as usize);

    let (layout, data) = match &buffer.pixels {
        QuantizedPixels::Mono(bits) => match draw_mode {
            DrawMode::Horizontal => {
                let data = bits.chunks(width.max(1)).flat_map(pack_row).collect();
                (Layout::MonoHorizontal, data)
            }
            DrawMode::Vertical => {
                let mut data = Vec::with_capacity(height.div_ceil(8) * width);
                let mut column = Vec::with_capacity(height);
                for x in 0..width {
                    column.clear();
                    column.extend((0..height).map(|y| bits[y * width + x]));
                    data.extend(pack_row(&column));
                }
                (Layout::MonoVertical, data)
            }
        },
        QuantizedPixels::Grayscale(levels) => (Layout::Grayscale, levels.clone()),
        QuantizedPixels::Rgb565(values) => (
            Layout::Rgb565,
            values.iter().flat_map(|v| v.to_be_bytes()).collect(),
        ),
        QuantizedPixels::Rgb888(values) => {
            (Layout::Rgb888, values.iter().flatten().copied().collect())
        }
    };

    debug!(
        width,
        height,
        layout = layout.describe(),
        bytes = data.len(),
        "Packed image"
    );

    ByteArray {
        width: buffer.width,
        height: buffer.height,
        layout,
        data,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(width: u32, height: u32, bits: Vec<bool>) -> QuantizedBuffer {
        QuantizedBuffer {
            width,
            height,
            pixels: QuantizedPixels::Mono(bits),
        }
    }

    #[test]
    fn test_pack_row_8_pixels() {
        // All set
        assert_eq!(pack_row(&[true; 8]), vec![0xFF]);
        // All clear
        assert_eq!(pack_row(&[false; 8]), vec![0x00]);
        // Alternating
        assert_eq!(
            pack_row(&[true, false, true, false, true, false, true, false]),
            vec![0xAA]
        );
        // High nibble
        assert_eq!(
            pack_row(&[true, true, true, true, false, false, false, false]),
            vec![0xF0]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        // 4 pixels should pad to 1 byte
        assert_eq!(pack_row(&[true, true, true, true]), vec![0xF0]);

        // 9 pixels should pad to 2 bytes
        let nine_set = vec![true; 9];
        let packed = pack_row(&nine_set);
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[0], 0xFF);
        assert_eq!(packed[1], 0x80); // 10000000
    }

    #[test]
    fn test_pack_row_empty() {
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_horizontal_rows_pad_independently() {
        // 10x2: row 0 all set, row 1 only the last pixel
        let mut bits = vec![true; 10];
        bits.extend(vec![false; 9]);
        bits.push(true);
        let packed = pack(&mono(10, 2, bits), DrawMode::Horizontal);
        assert_eq!(packed.layout, Layout::MonoHorizontal);
        assert_eq!(packed.data, vec![0xFF, 0xC0, 0x00, 0x40]);
    }

    #[test]
    fn test_vertical_packs_columns() {
        // 2x10: column 0 has only the top pixel, column 1 only the bottom pixel
        let mut bits = vec![false; 20];
        bits[0] = true; // (0, 0)
        bits[9 * 2 + 1] = true; // (1, 9)
        let packed = pack(&mono(2, 10, bits), DrawMode::Vertical);
        assert_eq!(packed.layout, Layout::MonoVertical);
        assert_eq!(packed.data, vec![0x80, 0x00, 0x00, 0x40]);
    }

    #[test]
    fn test_draw_mode_ignored_for_color() {
        let buffer = QuantizedBuffer {
            width: 2,
            height: 1,
            pixels: QuantizedPixels::Rgb565(vec![0xF800, 0x001F]),
        };
        let h = pack(&buffer, DrawMode::Horizontal);
        let v = pack(&buffer, DrawMode::Vertical);
        assert_eq!(h, v);
        assert_eq!(h.data, vec![0xF8, 0x00, 0x00, 0x1F]);
    }

    #[test]
    fn test_rgb888_and_grayscale() {
        let buffer = QuantizedBuffer {
            width: 2,
            height: 1,
            pixels: QuantizedPixels::Rgb888(vec![[1, 2, 3], [4, 5, 6]]),
        };
        assert_eq!(pack(&buffer, DrawMode::Horizontal).data, vec![1, 2, 3, 4, 5, 6]);

        let buffer = QuantizedBuffer {
            width: 3,
            height: 1,
            pixels: QuantizedPixels::Grayscale(vec![7, 8, 9]),
        };
        let packed = pack(&buffer, DrawMode::Vertical);
        assert_eq!(packed.layout, Layout::Grayscale);
        assert_eq!(packed.data, vec![7, 8, 9]);
    }

    #[test]
    fn test_byte_len_formula() {
        assert_eq!(Layout::MonoHorizontal.byte_len(128, 64), 1024);
        assert_eq!(Layout::MonoVertical.byte_len(128, 64), 1024);
        assert_eq!(Layout::MonoHorizontal.byte_len(10, 3), 6);
        assert_eq!(Layout::MonoVertical.byte_len(10, 3), 10);
        assert_eq!(Layout::Grayscale.byte_len(16, 16), 256);
        assert_eq!(Layout::Rgb565.byte_len(128, 64), 16384);
        assert_eq!(Layout::Rgb888.byte_len(2, 2), 12);
    }

    #[test]
    fn test_packed_length_matches_formula() {
        for (w, h) in [(1, 1), (7, 3), (9, 17), (16, 8)] {
            let bits = vec![true; (w * h) as usize];
            for (draw_mode, layout) in [
                (DrawMode::Horizontal, Layout::MonoHorizontal),
                (DrawMode::Vertical, Layout::MonoVertical),
            ] {
                let packed = pack(&mono(w, h, bits.clone()), draw_mode);
                assert_eq!(packed.total_bytes(), layout.byte_len(w, h), "{}x{}", w, h);
            }
        }
    }
}
