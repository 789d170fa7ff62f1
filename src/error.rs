//! # Error Types
//!
//! This module defines error types used throughout the pixelpack library.

use thiserror::Error;

/// Main error type for pixelpack operations
#[derive(Debug, Error)]
pub enum PixelpackError {
    /// Processing or output options failed validation
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Source raster has zero width or height
    #[error("Source image is empty")]
    EmptySource,

    /// RGBA buffer length does not match the declared dimensions
    #[error("Source buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SourceMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Code generation was asked to render zero bytes
    #[error("Nothing to generate: no image data")]
    NothingToGenerate,

    /// Frames of a multi-frame table disagree on dimensions or layout
    #[error("Frame mismatch: {0}")]
    FrameMismatch(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`PixelpackError`].
pub type Result<T> = std::result::Result<T, PixelpackError>;
