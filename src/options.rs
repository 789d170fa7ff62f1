//! # Conversion Options
//!
//! Immutable configuration values passed into the pipeline.
//!
//! [`ProcessingOptions`] controls how a source image is placed on the canvas
//! and quantized; [`OutputOptions`] controls how the packed bytes are rendered
//! as source code. Both are plain values: the pipeline never reads ambient
//! configuration.
//!
//! ## Color Modes
//!
//! | Mode | Bytes per pixel | Carries |
//! |------|-----------------|---------|
//! | `mono` | 1/8 | threshold, dithering, draw mode |
//! | `grayscale` | 1 | - |
//! | `rgb565` | 2 (big-endian) | - |
//! | `rgb888` | 3 | - |
//!
//! ## Untyped Input
//!
//! CLI flags and JSON preset files go through [`OptionsFile`], whose fields
//! are optional strings/numbers layered over a base [`ProcessingOptions`].
//!
//! ```
//! use pixelpack::options::{ColorMode, OptionsFile, ProcessingOptions};
//!
//! let file = OptionsFile::from_json(r#"{"canvasWidth": 84, "canvasHeight": 48, "threshold": 300}"#)?;
//! let options = file.apply(ProcessingOptions::default())?;
//! assert_eq!((options.canvas_width, options.canvas_height), (84, 48));
//! assert!(matches!(options.color_mode, ColorMode::Mono { threshold: 255, .. }));
//! # Ok::<(), pixelpack::PixelpackError>(())
//! ```

use image::imageops::FilterType;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PixelpackError, Result};

/// Largest canvas edge accepted by [`ProcessingOptions::validate`].
pub const MAX_CANVAS_DIM: u32 = 4096;

/// Default mono threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

fn invalid(kind: &str, value: &str) -> PixelpackError {
    PixelpackError::InvalidOptions(format!("unknown {} '{}'", kind, value))
}

/// Normalize an option spelling: lowercase, `-` and `_` dropped.
///
/// `floydSteinberg`, `floyd-steinberg` and `floyd_steinberg` all map to
/// `floydsteinberg`.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Clamp an untyped threshold into the 0-255 range.
pub fn clamp_threshold(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

// ============================================================================
// MODE ENUMS
// ============================================================================

/// Dithering strategy for mono output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dithering {
    /// Plain per-pixel threshold
    #[default]
    None,
    /// Floyd-Steinberg error diffusion (7/16, 3/16, 5/16, 1/16)
    FloydSteinberg,
    /// Atkinson error diffusion (6 x 1/8, 2/8 discarded)
    Atkinson,
    /// Ordered dithering against the 8x8 Bayer matrix
    Bayer,
}

impl FromStr for Dithering {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "none" | "threshold" => Ok(Dithering::None),
            "floydsteinberg" | "fs" => Ok(Dithering::FloydSteinberg),
            "atkinson" => Ok(Dithering::Atkinson),
            "bayer" | "ordered" => Ok(Dithering::Bayer),
            _ => Err(invalid("dithering", s)),
        }
    }
}

impl fmt::Display for Dithering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dithering::None => "none",
            Dithering::FloydSteinberg => "floydSteinberg",
            Dithering::Atkinson => "atkinson",
            Dithering::Bayer => "bayer",
        })
    }
}

/// Byte orientation for 1-bit packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Row-major: each row packs into `ceil(width/8)` bytes
    #[default]
    Horizontal,
    /// Column-major: each column packs into `ceil(height/8)` bytes
    Vertical,
}

impl FromStr for DrawMode {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "horizontal" | "h" | "row" => Ok(DrawMode::Horizontal),
            "vertical" | "v" | "column" => Ok(DrawMode::Vertical),
            _ => Err(invalid("draw mode", s)),
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawMode::Horizontal => "horizontal",
            DrawMode::Vertical => "vertical",
        })
    }
}

/// Target color model.
///
/// Only `Mono` carries threshold, dithering and draw mode; the other modes
/// have no use for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Mono {
        threshold: u8,
        dithering: Dithering,
        draw_mode: DrawMode,
    },
    Grayscale,
    Rgb565,
    Rgb888,
}

impl ColorMode {
    /// Mono with default threshold, no dithering, horizontal packing.
    pub const fn mono() -> Self {
        ColorMode::Mono {
            threshold: DEFAULT_THRESHOLD,
            dithering: Dithering::None,
            draw_mode: DrawMode::Horizontal,
        }
    }

    /// Short name used in generated headers and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Mono { .. } => "mono",
            ColorMode::Grayscale => "grayscale",
            ColorMode::Rgb565 => "rgb565",
            ColorMode::Rgb888 => "rgb888",
        }
    }
}

impl Default for ColorMode {
    fn default() -> Self {
        Self::mono()
    }
}

impl FromStr for ColorMode {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "mono" | "monochrome" | "1bit" => Ok(ColorMode::mono()),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(ColorMode::Grayscale),
            "rgb565" | "565" => Ok(ColorMode::Rgb565),
            "rgb888" | "rgb" | "888" => Ok(ColorMode::Rgb888),
            _ => Err(invalid("color mode", s)),
        }
    }
}

/// Fill color for canvas area the source does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    White,
    Black,
    Transparent,
}

impl Background {
    /// RGBA fill value. Transparent is black with alpha 0.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Background::White => [255, 255, 255, 255],
            Background::Black => [0, 0, 0, 255],
            Background::Transparent => [0, 0, 0, 0],
        }
    }
}

impl FromStr for Background {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "white" => Ok(Background::White),
            "black" => Ok(Background::Black),
            "transparent" | "none" => Ok(Background::Transparent),
            _ => Err(invalid("background", s)),
        }
    }
}

/// How the (rotated) source is scaled onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// Native size, clipped or padded
    Original,
    /// Uniform scale so the whole image fits
    #[default]
    Fit,
    /// Both axes scaled to fill the canvas
    Stretch,
    /// Width scaled to the canvas, height kept
    StretchH,
    /// Height scaled to the canvas, width kept
    StretchV,
}

impl FromStr for Scaling {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "original" | "none" => Ok(Scaling::Original),
            "fit" => Ok(Scaling::Fit),
            "stretch" => Ok(Scaling::Stretch),
            "stretchh" | "horizontal" => Ok(Scaling::StretchH),
            "stretchv" | "vertical" => Ok(Scaling::StretchV),
            _ => Err(invalid("scaling", s)),
        }
    }
}

/// Clockwise rotation applied before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map degrees to a rotation. Negative values rotate counter-clockwise.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether this rotation swaps width and height.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Resampling filter used when the source is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    Nearest,
    #[default]
    Bilinear,
    Lanczos,
}

impl Resample {
    pub fn filter(&self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Bilinear => FilterType::Triangle,
            Resample::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl FromStr for Resample {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "nearest" | "pixel" => Ok(Resample::Nearest),
            "bilinear" | "triangle" | "linear" => Ok(Resample::Bilinear),
            "lanczos" | "lanczos3" => Ok(Resample::Lanczos),
            _ => Err(invalid("resample filter", s)),
        }
    }
}

/// Numeric base for generated array values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// `0x3F`
    #[default]
    Hex,
    /// `63`
    Decimal,
    /// `0b00111111`
    Binary,
}

impl FromStr for NumberFormat {
    type Err = PixelpackError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "hex" | "hexadecimal" => Ok(NumberFormat::Hex),
            "decimal" | "dec" => Ok(NumberFormat::Decimal),
            "binary" | "bin" => Ok(NumberFormat::Binary),
            _ => Err(invalid("number format", s)),
        }
    }
}

// ============================================================================
// PROCESSING OPTIONS
// ============================================================================

/// Everything that determines the packed bytes for one source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub color_mode: ColorMode,
    pub background: Background,
    pub scaling: Scaling,
    pub rotation: Rotation,
    pub resample: Resample,
    pub flip_h: bool,
    pub center_h: bool,
    pub center_v: bool,
    pub invert: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            canvas_width: 128,
            canvas_height: 64,
            color_mode: ColorMode::mono(),
            background: Background::White,
            scaling: Scaling::Fit,
            rotation: Rotation::Deg0,
            resample: Resample::Bilinear,
            flip_h: false,
            center_h: true,
            center_v: true,
            invert: false,
        }
    }
}

impl ProcessingOptions {
    /// Default options on a `width` x `height` canvas.
    pub fn with_canvas(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }

    /// Reject canvases the pipeline cannot produce.
    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [("width", self.canvas_width), ("height", self.canvas_height)] {
            if value == 0 {
                return Err(PixelpackError::InvalidOptions(format!(
                    "canvas {} must be positive",
                    axis
                )));
            }
            if value > MAX_CANVAS_DIM {
                return Err(PixelpackError::InvalidOptions(format!(
                    "canvas {} {} exceeds maximum {}",
                    axis, value, MAX_CANVAS_DIM
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// OUTPUT OPTIONS
// ============================================================================

/// Default number of values per generated source line.
pub const DEFAULT_BYTES_PER_LINE: usize = 16;

/// Controls how packed bytes are rendered as source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub variable_name: String,
    pub format: NumberFormat,
    pub progmem: bool,
    pub include_size: bool,
    pub bytes_per_line: usize,
}

impl OutputOptions {
    /// Output options for `name`, sanitized to a C identifier.
    pub fn new(name: &str) -> Self {
        Self {
            variable_name: sanitize_identifier(name),
            ..Self::default()
        }
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            variable_name: "image".to_string(),
            format: NumberFormat::Hex,
            progmem: true,
            include_size: true,
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
        }
    }
}

/// Reduce `name` to a valid C identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, a leading digit gets a `_`
/// prefix, and an empty name falls back to `image`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        return "image".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

// ============================================================================
// OPTIONS FILE
// ============================================================================

/// Untyped option document (JSON preset file or CLI flags).
///
/// Every field is optional; [`OptionsFile::apply`] layers the present ones
/// over a base [`ProcessingOptions`]. Field names follow the camelCase
/// spelling of the configuration table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionsFile {
    /// Named canvas preset (see [`crate::presets`]); explicit sizes win.
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub canvas_width: Option<u32>,
    #[serde(default)]
    pub canvas_height: Option<u32>,
    #[serde(default)]
    pub color_mode: Option<String>,
    #[serde(default)]
    pub threshold: Option<i64>,
    #[serde(default)]
    pub dithering: Option<String>,
    #[serde(default)]
    pub draw_mode: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub scaling: Option<String>,
    #[serde(default)]
    pub rotation: Option<i32>,
    #[serde(default)]
    pub resample: Option<String>,
    #[serde(default)]
    pub flip_h: Option<bool>,
    #[serde(default)]
    pub center_h: Option<bool>,
    #[serde(default)]
    pub center_v: Option<bool>,
    #[serde(default)]
    pub invert: Option<bool>,
    #[serde(default)]
    pub variable_name: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub progmem: Option<bool>,
    #[serde(default)]
    pub include_size: Option<bool>,
    #[serde(default)]
    pub bytes_per_line: Option<usize>,
}

impl OptionsFile {
    /// Parse an options document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| PixelpackError::Config(e.to_string()))
    }

    /// Read and parse a JSON options file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| match e {
            PixelpackError::Config(msg) => {
                PixelpackError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: OptionsFile) -> OptionsFile {
        OptionsFile {
            preset: other.preset.or(self.preset),
            canvas_width: other.canvas_width.or(self.canvas_width),
            canvas_height: other.canvas_height.or(self.canvas_height),
            color_mode: other.color_mode.or(self.color_mode),
            threshold: other.threshold.or(self.threshold),
            dithering: other.dithering.or(self.dithering),
            draw_mode: other.draw_mode.or(self.draw_mode),
            background_color: other.background_color.or(self.background_color),
            scaling: other.scaling.or(self.scaling),
            rotation: other.rotation.or(self.rotation),
            resample: other.resample.or(self.resample),
            flip_h: other.flip_h.or(self.flip_h),
            center_h: other.center_h.or(self.center_h),
            center_v: other.center_v.or(self.center_v),
            invert: other.invert.or(self.invert),
            variable_name: other.variable_name.or(self.variable_name),
            format: other.format.or(self.format),
            progmem: other.progmem.or(self.progmem),
            include_size: other.include_size.or(self.include_size),
            bytes_per_line: other.bytes_per_line.or(self.bytes_per_line),
        }
    }

    /// Layer the processing fields over `base` and validate the result.
    ///
    /// Threshold is clamped to 0-255. Mono parameters are ignored when the
    /// resulting color mode is not mono.
    pub fn apply(&self, base: ProcessingOptions) -> Result<ProcessingOptions> {
        let mut options = base;

        if let Some(key) = &self.preset {
            let preset = crate::presets::by_key(key).ok_or_else(|| {
                PixelpackError::InvalidOptions(format!("unknown canvas preset '{}'", key))
            })?;
            options.canvas_width = preset.width;
            options.canvas_height = preset.height;
        }
        if let Some(width) = self.canvas_width {
            options.canvas_width = width;
        }
        if let Some(height) = self.canvas_height {
            options.canvas_height = height;
        }

        if let Some(mode) = &self.color_mode {
            let parsed: ColorMode = mode.parse()?;
            // Keep the base's mono parameters when staying in mono.
            options.color_mode = match (parsed, base.color_mode) {
                (ColorMode::Mono { .. }, base_mono @ ColorMode::Mono { .. }) => base_mono,
                (parsed, _) => parsed,
            };
        }
        if let ColorMode::Mono {
            threshold,
            dithering,
            draw_mode,
        } = &mut options.color_mode
        {
            if let Some(value) = self.threshold {
                *threshold = clamp_threshold(value);
            }
            if let Some(value) = &self.dithering {
                *dithering = value.parse()?;
            }
            if let Some(value) = &self.draw_mode {
                *draw_mode = value.parse()?;
            }
        }

        if let Some(value) = &self.background_color {
            options.background = value.parse()?;
        }
        if let Some(value) = &self.scaling {
            options.scaling = value.parse()?;
        }
        if let Some(degrees) = self.rotation {
            options.rotation = Rotation::from_degrees(degrees).ok_or_else(|| {
                PixelpackError::InvalidOptions(format!(
                    "rotation must be a multiple of 90, got {}",
                    degrees
                ))
            })?;
        }
        if let Some(value) = &self.resample {
            options.resample = value.parse()?;
        }
        options.flip_h = self.flip_h.unwrap_or(options.flip_h);
        options.center_h = self.center_h.unwrap_or(options.center_h);
        options.center_v = self.center_v.unwrap_or(options.center_v);
        options.invert = self.invert.unwrap_or(options.invert);

        options.validate()?;
        Ok(options)
    }

    /// Layer the output fields over `base`.
    pub fn apply_output(&self, base: OutputOptions) -> Result<OutputOptions> {
        let mut output = base;
        if let Some(name) = &self.variable_name {
            output.variable_name = sanitize_identifier(name);
        }
        if let Some(format) = &self.format {
            output.format = format.parse()?;
        }
        output.progmem = self.progmem.unwrap_or(output.progmem);
        output.include_size = self.include_size.unwrap_or(output.include_size);
        if let Some(per_line) = self.bytes_per_line {
            if per_line == 0 {
                return Err(PixelpackError::InvalidOptions(
                    "bytes per line must be positive".to_string(),
                ));
            }
            output.bytes_per_line = per_line;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dithering_spellings() {
        for s in ["floydSteinberg", "floyd-steinberg", "floyd_steinberg", "FS"] {
            assert_eq!(s.parse::<Dithering>().unwrap(), Dithering::FloydSteinberg);
        }
        assert_eq!("atkinson".parse::<Dithering>().unwrap(), Dithering::Atkinson);
        assert_eq!("Bayer".parse::<Dithering>().unwrap(), Dithering::Bayer);
        assert_eq!("none".parse::<Dithering>().unwrap(), Dithering::None);
        assert!("jarvis".parse::<Dithering>().is_err());
    }

    #[test]
    fn test_parse_scaling_spellings() {
        assert_eq!("stretchH".parse::<Scaling>().unwrap(), Scaling::StretchH);
        assert_eq!("stretch-v".parse::<Scaling>().unwrap(), Scaling::StretchV);
        assert_eq!("original".parse::<Scaling>().unwrap(), Scaling::Original);
        assert!("zoom".parse::<Scaling>().is_err());
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from_degrees(0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(450), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(45), None);
        assert!(Rotation::Deg270.swaps_axes());
        assert!(!Rotation::Deg180.swaps_axes());
    }

    #[test]
    fn test_validate_rejects_zero_canvas() {
        let options = ProcessingOptions::with_canvas(0, 64);
        assert!(matches!(
            options.validate(),
            Err(PixelpackError::InvalidOptions(_))
        ));
        let options = ProcessingOptions::with_canvas(128, MAX_CANVAS_DIM + 1);
        assert!(options.validate().is_err());
        assert!(ProcessingOptions::default().validate().is_ok());
    }

    #[test]
    fn test_clamp_threshold() {
        assert_eq!(clamp_threshold(-5), 0);
        assert_eq!(clamp_threshold(128), 128);
        assert_eq!(clamp_threshold(1000), 255);
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("frog"), "frog");
        assert_eq!(sanitize_identifier("my frog.png"), "my_frog_png");
        assert_eq!(sanitize_identifier("8ball"), "_8ball");
        assert_eq!(sanitize_identifier(""), "image");
        assert_eq!(sanitize_identifier("épée"), "_p_e");
    }

    #[test]
    fn test_options_file_layers_over_base() {
        let file = OptionsFile::from_json(
            r#"{
                "canvasWidth": 32,
                "colorMode": "mono",
                "dithering": "atkinson",
                "drawMode": "vertical",
                "backgroundColor": "black",
                "rotation": 270,
                "invert": true
            }"#,
        )
        .unwrap();
        let options = file.apply(ProcessingOptions::default()).unwrap();
        assert_eq!(options.canvas_width, 32);
        assert_eq!(options.canvas_height, 64);
        assert_eq!(
            options.color_mode,
            ColorMode::Mono {
                threshold: DEFAULT_THRESHOLD,
                dithering: Dithering::Atkinson,
                draw_mode: DrawMode::Vertical,
            }
        );
        assert_eq!(options.background, Background::Black);
        assert_eq!(options.rotation, Rotation::Deg270);
        assert!(options.invert);
    }

    #[test]
    fn test_options_file_mono_fields_inert_for_color() {
        let file = OptionsFile::from_json(
            r#"{"colorMode": "rgb565", "threshold": 10, "dithering": "bayer"}"#,
        )
        .unwrap();
        let options = file.apply(ProcessingOptions::default()).unwrap();
        assert_eq!(options.color_mode, ColorMode::Rgb565);
    }

    #[test]
    fn test_options_file_preset() {
        let file = OptionsFile::from_json(r#"{"preset": "nokia5110"}"#).unwrap();
        let options = file.apply(ProcessingOptions::default()).unwrap();
        assert_eq!((options.canvas_width, options.canvas_height), (84, 48));

        let file = OptionsFile::from_json(r#"{"preset": "nope"}"#).unwrap();
        assert!(file.apply(ProcessingOptions::default()).is_err());
    }

    #[test]
    fn test_options_file_rejects_bad_values() {
        let file = OptionsFile::from_json(r#"{"canvasHeight": 0}"#).unwrap();
        assert!(file.apply(ProcessingOptions::default()).is_err());

        let file = OptionsFile::from_json(r#"{"rotation": 45}"#).unwrap();
        assert!(file.apply(ProcessingOptions::default()).is_err());

        assert!(matches!(
            OptionsFile::from_json(r#"{"colour": "red"}"#),
            Err(PixelpackError::Config(_))
        ));
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = OptionsFile {
            canvas_width: Some(10),
            threshold: Some(5),
            ..Default::default()
        };
        let flags = OptionsFile {
            canvas_width: Some(20),
            ..Default::default()
        };
        let merged = base.merge(flags);
        assert_eq!(merged.canvas_width, Some(20));
        assert_eq!(merged.threshold, Some(5));
    }

    #[test]
    fn test_apply_output() {
        let file = OptionsFile::from_json(
            r#"{"variableName": "my-logo", "format": "binary", "progmem": false}"#,
        )
        .unwrap();
        let output = file.apply_output(OutputOptions::default()).unwrap();
        assert_eq!(output.variable_name, "my_logo");
        assert_eq!(output.format, NumberFormat::Binary);
        assert!(!output.progmem);
        assert!(output.include_size);
    }
}
