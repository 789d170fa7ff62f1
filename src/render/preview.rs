//! # Preview Rendering
//!
//! Decodes a [`ByteArray`] back into an RGBA image, so callers can show
//! exactly what the firmware will draw. Mono renders set bits white and
//! clear bits black, matching a lit pixel on an OLED.
//!
//! The preview is built from the packed bytes rather than the sampled
//! buffer: any packing mistake shows up on screen.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use super::pack::{ByteArray, Layout};
use crate::error::{PixelpackError, Result};

/// Expand RGB565 back to 8-bit channels, replicating high bits.
#[inline]
pub fn expand_rgb565(value: u16) -> [u8; 3] {
    let r5 = ((value >> 11) & 0x1F) as u8;
    let g6 = ((value >> 5) & 0x3F) as u8;
    let b5 = (value & 0x1F) as u8;
    [(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2)]
}

/// Read a 1-bit pixel from a mono byte array.
#[inline]
fn mono_bit(bytes: &ByteArray, x: usize, y: usize) -> bool {
    let (w, h) = (bytes.width as usize, bytes.height as usize);
    let (byte_idx, bit_idx) = match bytes.layout {
        Layout::MonoVertical => (x * h.div_ceil(8) + y / 8, 7 - (y % 8)),
        _ => (y * w.div_ceil(8) + x / 8, 7 - (x % 8)),
    };
    (bytes.data[byte_idx] >> bit_idx) & 1 == 1
}

/// Decode packed bytes into an opaque RGBA image.
///
/// Returns an error if the data is shorter than the layout requires.
pub fn unpack(bytes: &ByteArray) -> Result<RgbaImage> {
    let expected = bytes.layout.byte_len(bytes.width, bytes.height);
    if bytes.data.len() < expected {
        return Err(PixelpackError::Image(format!(
            "packed data holds {} bytes, {}x{} {} needs {}",
            bytes.data.len(),
            bytes.width,
            bytes.height,
            bytes.layout.describe(),
            expected
        )));
    }

    let width = bytes.width as usize;
    let data = &bytes.data;
    let image = RgbaImage::from_fn(bytes.width, bytes.height, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let i = y * width + x;
        let [r, g, b] = match bytes.layout {
            Layout::MonoHorizontal | Layout::MonoVertical => {
                let v = if mono_bit(bytes, x, y) { 255 } else { 0 };
                [v, v, v]
            }
            Layout::Grayscale => [data[i]; 3],
            Layout::Rgb565 => expand_rgb565(u16::from_be_bytes([data[i * 2], data[i * 2 + 1]])),
            Layout::Rgb888 => [data[i * 3], data[i * 3 + 1], data[i * 3 + 2]],
        };
        Rgba([r, g, b, 255])
    });

    Ok(image)
}

/// Encode an image as PNG bytes.
pub fn to_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PixelpackError::Image(format!("Failed to encode PNG: {}", e)))?;
    Ok(png)
}

/// Save an image as a PNG file.
pub fn save_png(path: &Path, image: &RgbaImage) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| PixelpackError::Image(format!("Failed to save PNG: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_rgb565_extremes() {
        assert_eq!(expand_rgb565(0xFFFF), [255, 255, 255]);
        assert_eq!(expand_rgb565(0x0000), [0, 0, 0]);
        assert_eq!(expand_rgb565(0xF800), [255, 0, 0]);
        assert_eq!(expand_rgb565(0x07E0), [0, 255, 0]);
    }

    #[test]
    fn test_unpack_mono_horizontal() {
        let bytes = ByteArray {
            width: 9,
            height: 1,
            layout: Layout::MonoHorizontal,
            data: vec![0x80, 0x80],
        };
        let image = unpack(&bytes).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(8, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_unpack_mono_vertical() {
        let bytes = ByteArray {
            width: 2,
            height: 10,
            layout: Layout::MonoVertical,
            data: vec![0x80, 0x00, 0x00, 0x40],
        };
        let image = unpack(&bytes).unwrap();
        assert_eq!(image.get_pixel(0, 0).0[0], 255);
        assert_eq!(image.get_pixel(1, 9).0[0], 255);
        assert_eq!(image.get_pixel(1, 8).0[0], 0);
        assert_eq!(image.get_pixel(0, 9).0[0], 0);
    }

    #[test]
    fn test_unpack_color_layouts() {
        let bytes = ByteArray {
            width: 1,
            height: 1,
            layout: Layout::Rgb565,
            data: vec![0x00, 0x1F],
        };
        assert_eq!(unpack(&bytes).unwrap().get_pixel(0, 0).0, [0, 0, 255, 255]);

        let bytes = ByteArray {
            width: 1,
            height: 1,
            layout: Layout::Rgb888,
            data: vec![1, 2, 3],
        };
        assert_eq!(unpack(&bytes).unwrap().get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_unpack_rejects_short_data() {
        let bytes = ByteArray {
            width: 4,
            height: 4,
            layout: Layout::Grayscale,
            data: vec![0; 15],
        };
        assert!(matches!(unpack(&bytes), Err(PixelpackError::Image(_))));
    }

    #[test]
    fn test_png_signature() {
        let png = to_png(&RgbaImage::new(3, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
