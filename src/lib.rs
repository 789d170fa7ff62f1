//! # Pixelpack - Image to Embedded Byte Array Library
//!
//! Pixelpack turns raster images into C/C++ byte arrays for small displays
//! (SSD1306 OLEDs, TFTs, e-paper). It provides:
//!
//! - **Canvas sampling**: rotate, flip, scale and center onto a fixed canvas
//! - **Quantization**: mono, grayscale, RGB565 and RGB888
//! - **Dithering**: Floyd-Steinberg, Atkinson and Bayer 8x8 for mono output
//! - **Packing**: horizontal or vertical 1-bit layouts, MSB first
//! - **Code generation**: `PROGMEM` arrays, size macros, animation frame tables
//!
//! ## Quick Start
//!
//! ```
//! use pixelpack::{OutputOptions, ProcessingOptions, SourceImage, codegen, convert};
//!
//! // A 32x32 white square
//! let source = SourceImage::filled(32, 32, [255, 255, 255, 255]);
//!
//! // Fit it onto a 128x64 mono canvas
//! let options = ProcessingOptions::with_canvas(128, 64);
//! let result = convert(&source, &options)?;
//! assert_eq!(result.total_bytes(), 1024);
//!
//! // Render as a header fragment
//! let code = codegen::generate(&result.bytes, &OutputOptions::new("logo"))?;
//! assert!(code.as_str().contains("const unsigned char logo[] PROGMEM = {"));
//!
//! # Ok::<(), pixelpack::PixelpackError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`source`] | Decoded RGBA input |
//! | [`options`] | Processing and output configuration |
//! | [`presets`] | Named display canvas sizes |
//! | [`render`] | Sampling, quantization, dithering, packing, preview |
//! | [`codegen`] | C/C++ source output |
//! | [`pipeline`] | Single and batch conversion, latest-wins coalescing |
//! | [`error`] | Error types |

pub mod codegen;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod presets;
pub mod render;
pub mod source;

// Re-exports for convenience
pub use codegen::GeneratedCode;
pub use error::{PixelpackError, Result};
pub use options::{ColorMode, OutputOptions, ProcessingOptions};
pub use pipeline::{BatchOutcome, ConversionResult, convert, convert_batch};
pub use render::pack::ByteArray;
pub use source::SourceImage;
