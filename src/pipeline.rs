//! # Pipeline
//!
//! Runs the render stages for one image or a batch:
//!
//! ```text
//! SourceImage ─► sample ─► quantize (+ dither) ─► pack ─► ByteArray
//!                                                   └──► preview
//! ```
//!
//! Every stage is a pure function of its input and the options, so frames
//! of a batch share nothing and run on `rayon`'s pool. Results come back in
//! submission order no matter which frame finished first.
//!
//! ## Latest-Wins
//!
//! Interactive callers re-run the pipeline on every option change. A
//! [`Coalescer`] hands out tickets so only the newest request's result is
//! kept; anything that finishes after a newer request started is dropped.
//!
//! ```
//! use pixelpack::pipeline::Coalescer;
//!
//! let coalescer = Coalescer::new();
//! let slow = coalescer.begin();
//! let fast = coalescer.begin();
//! assert_eq!(coalescer.accept(fast, "new"), Some("new"));
//! assert_eq!(coalescer.accept(slow, "stale"), None);
//! ```

use image::RgbaImage;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::error::{PixelpackError, Result};
use crate::options::{ColorMode, DrawMode, ProcessingOptions};
use crate::render::pack::{self, ByteArray};
use crate::render::{preview, quantize, sampler};
use crate::source::SourceImage;

/// Output of converting one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Packed bytes ready for code generation.
    pub bytes: ByteArray,
    /// The packed bytes decoded back to RGBA.
    pub preview: RgbaImage,
}

impl ConversionResult {
    pub fn total_bytes(&self) -> usize {
        self.bytes.total_bytes()
    }

    pub fn width(&self) -> u32 {
        self.bytes.width
    }

    pub fn height(&self) -> u32 {
        self.bytes.height
    }
}

/// Convert a single image.
///
/// Options are validated first; the stages themselves never fail on
/// validated input.
pub fn convert(source: &SourceImage, options: &ProcessingOptions) -> Result<ConversionResult> {
    options.validate()?;
    if source.is_empty() {
        return Err(PixelpackError::EmptySource);
    }

    let buffer = sampler::sample(source, options);
    let quantized = quantize::quantize(&buffer, options.color_mode, options.invert);
    let draw_mode = match options.color_mode {
        ColorMode::Mono { draw_mode, .. } => draw_mode,
        _ => DrawMode::Horizontal,
    };
    let bytes = pack::pack(&quantized, draw_mode);
    let preview = preview::unpack(&bytes)?;

    debug!(
        source_width = source.width(),
        source_height = source.height(),
        total_bytes = bytes.total_bytes(),
        layout = bytes.layout.describe(),
        "Converted image"
    );

    Ok(ConversionResult { bytes, preview })
}

/// One frame's result within a batch.
#[derive(Debug)]
pub struct FrameOutcome {
    /// Position in the submitted batch.
    pub index: usize,
    pub result: Result<ConversionResult>,
}

/// Results of [`convert_batch`], in submission order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub frames: Vec<FrameOutcome>,
}

impl BatchOutcome {
    /// Successful frames with their original indices.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &ConversionResult)> {
        self.frames
            .iter()
            .filter_map(|f| f.result.as_ref().ok().map(|r| (f.index, r)))
    }

    /// Failed frames with their original indices.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &PixelpackError)> {
        self.frames
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.index, e)))
    }

    /// Byte arrays of successful frames, in order.
    pub fn byte_arrays(&self) -> Vec<ByteArray> {
        self.successes().map(|(_, r)| r.bytes.clone()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.frames.iter().all(|f| f.result.is_ok())
    }
}

/// Convert a batch of images in parallel.
///
/// A failing frame is logged and recorded; it never aborts the others.
pub fn convert_batch(sources: &[SourceImage], options: &ProcessingOptions) -> BatchOutcome {
    debug!(frames = sources.len(), "Converting batch");

    let frames: Vec<FrameOutcome> = sources
        .par_iter()
        .enumerate()
        .map(|(index, source)| {
            let result = convert(source, options);
            if let Err(e) = &result {
                warn!(index, error = %e, "Frame failed");
            }
            FrameOutcome { index, result }
        })
        .collect();

    BatchOutcome { frames }
}

/// Ticket identifying one pipeline request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Latest-wins request coalescing.
///
/// Shareable across threads; each [`begin`](Coalescer::begin) supersedes
/// every earlier ticket.
#[derive(Debug, Default)]
pub struct Coalescer {
    latest: AtomicU64,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the newest request.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Keep `value` only if `ticket` has not been superseded.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(ticket = ticket.0, "Dropping superseded result");
            None
        }
    }

    /// Convert under a fresh ticket.
    ///
    /// Returns `None` if another request began while this one was running.
    pub fn run(
        &self,
        source: &SourceImage,
        options: &ProcessingOptions,
    ) -> Option<Result<ConversionResult>> {
        let ticket = self.begin();
        let result = convert(source, options);
        self.accept(ticket, result)
    }
}
