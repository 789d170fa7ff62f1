//! # Canvas Sampler
//!
//! Places a [`SourceImage`] onto a fixed-size canvas.
//!
//! ## Order of Operations
//!
//! ```text
//! source ──► flip H ──► rotate ──► scale ──► position ──► composite on background
//! ```
//!
//! Rotation happens before any scaling decision, so a 90°/270° turn swaps the
//! effective width and height that `fit`/`stretchH`/`stretchV` work with.
//!
//! ## Scaling
//!
//! | Mode | Target size |
//! |------|-------------|
//! | `original` | source size |
//! | `fit` | largest uniform scale that fits the canvas |
//! | `stretch` | canvas size |
//! | `stretchH` | canvas width, source height |
//! | `stretchV` | source width, canvas height |
//!
//! The scaled image is then centered on each axis whose center flag is set,
//! otherwise anchored at the origin, and clipped to the canvas.

use image::{Rgba, RgbaImage, imageops};
use std::borrow::Cow;
use tracing::debug;

use crate::options::{ProcessingOptions, Rotation, Scaling};
use crate::source::SourceImage;

/// Canvas-sized RGBA buffer produced by [`sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: RgbaImage,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGBA value at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }
}

/// Resample `source` onto a `canvas_width` x `canvas_height` canvas.
///
/// The result always has exactly the canvas dimensions. Canvas area not
/// covered by the source keeps the background color; a transparent
/// background leaves it at RGBA (0, 0, 0, 0).
pub fn sample(source: &SourceImage, options: &ProcessingOptions) -> PixelBuffer {
    let (canvas_w, canvas_h) = (options.canvas_width, options.canvas_height);
    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, Rgba(options.background.rgba()));

    if source.is_empty() {
        return PixelBuffer { pixels: canvas };
    }

    let oriented = orient(source.as_rgba(), options.flip_h, options.rotation);
    let (target_w, target_h) =
        target_size(oriented.dimensions(), (canvas_w, canvas_h), options.scaling);

    let placed = if (target_w, target_h) == oriented.dimensions() {
        oriented
    } else {
        Cow::Owned(imageops::resize(
            &*oriented,
            target_w,
            target_h,
            options.resample.filter(),
        ))
    };

    let x = offset(canvas_w, target_w, options.center_h);
    let y = offset(canvas_h, target_h, options.center_v);
    debug!(canvas_w, canvas_h, target_w, target_h, x, y, "Compositing source onto canvas");
    imageops::overlay(&mut canvas, &*placed, x, y);

    PixelBuffer { pixels: canvas }
}

/// Apply the horizontal flip, then the clockwise rotation.
fn orient(image: &RgbaImage, flip_h: bool, rotation: Rotation) -> Cow<'_, RgbaImage> {
    let flipped = if flip_h {
        Cow::Owned(imageops::flip_horizontal(image))
    } else {
        Cow::Borrowed(image)
    };

    match rotation {
        Rotation::Deg0 => flipped,
        Rotation::Deg90 => Cow::Owned(imageops::rotate90(&*flipped)),
        Rotation::Deg180 => Cow::Owned(imageops::rotate180(&*flipped)),
        Rotation::Deg270 => Cow::Owned(imageops::rotate270(&*flipped)),
    }
}

/// Size of the scaled image for a given (already rotated) source size.
pub fn target_size(source: (u32, u32), canvas: (u32, u32), scaling: Scaling) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (canvas_w, canvas_h) = canvas;

    match scaling {
        Scaling::Original => (src_w, src_h),
        Scaling::Fit => {
            let ratio = (canvas_w as f64 / src_w as f64).min(canvas_h as f64 / src_h as f64);
            (
                scale_len(src_w, ratio).min(canvas_w),
                scale_len(src_h, ratio).min(canvas_h),
            )
        }
        Scaling::Stretch => (canvas_w, canvas_h),
        Scaling::StretchH => (canvas_w, src_h),
        Scaling::StretchV => (src_w, canvas_h),
    }
}

#[inline]
fn scale_len(len: u32, ratio: f64) -> u32 {
    ((len as f64 * ratio).round() as u32).max(1)
}

/// Top/left position of an image of `len` on a canvas edge of `canvas`.
///
/// Negative when the image overflows a centered axis.
#[inline]
fn offset(canvas: u32, len: u32, center: bool) -> i64 {
    if center {
        (canvas as i64 - len as i64) / 2
    } else {
        0
    }
}
