//! # Rendering Module
//!
//! The per-image stages, in pipeline order.
//!
//! ## Modules
//!
//! - [`sampler`]: orient, scale and place the source on the canvas
//! - [`quantize`]: map RGBA pixels to the target color model
//! - [`dither`]: 1-bit conversion for mono (error diffusion or Bayer)
//! - [`pack`]: bytes in display controller order
//! - [`preview`]: decode packed bytes back to an image
//!
//! ## Usage Example
//!
//! ```
//! use pixelpack::options::{DrawMode, ProcessingOptions};
//! use pixelpack::render::{pack, quantize, sampler};
//! use pixelpack::source::SourceImage;
//!
//! let source = SourceImage::filled(16, 16, [0, 0, 0, 255]);
//! let options = ProcessingOptions::with_canvas(32, 16);
//!
//! let buffer = sampler::sample(&source, &options);
//! let quantized = quantize::quantize(&buffer, options.color_mode, options.invert);
//! let bytes = pack::pack(&quantized, DrawMode::Horizontal);
//!
//! assert_eq!(bytes.total_bytes(), 4 * 16);
//! ```

pub mod dither;
pub mod pack;
pub mod preview;
pub mod quantize;
pub mod sampler;
