//! # Pixelpack CLI
//!
//! Command-line interface for converting images to embedded byte arrays.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a logo for a 128x64 SSD1306, print the header to stdout
//! pixelpack convert logo.png
//!
//! # Floyd-Steinberg dithered photo on a Nokia 5110, written to a file
//! pixelpack convert --preset nokia5110 --dither floyd-steinberg -o photo.h photo.jpg
//!
//! # Animation frames for a TFT, with a preview of frame 0
//! pixelpack convert --mode rgb565 --width 160 --height 128 --name walk \
//!     --preview walk.png walk_0.png walk_1.png walk_2.png
//!
//! # Start from a JSON options file, override the threshold
//! pixelpack convert --config oled.json --threshold 100 icon.png
//!
//! # List canvas presets
//! pixelpack presets
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pixelpack::{
    OutputOptions, PixelpackError, ProcessingOptions, SourceImage, codegen, convert_batch,
    options::OptionsFile, presets, render::preview,
};

/// Pixelpack - Image to embedded byte array converter
#[derive(Parser, Debug)]
#[command(name = "pixelpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one or more images (several images become animation frames)
    Convert {
        /// Images to convert, in frame order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// JSON options file; flags override its values
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write generated code to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save a PNG preview of the first frame's packed output
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,

        /// Canvas preset (see `pixelpack presets`)
        #[arg(long)]
        preset: Option<String>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Color mode: mono, grayscale, rgb565, rgb888
        #[arg(long)]
        mode: Option<String>,

        /// Mono threshold (clamped to 0-255)
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<i64>,

        /// Mono dithering: none, floyd-steinberg, atkinson, bayer
        #[arg(long)]
        dither: Option<String>,

        /// Mono byte orientation: horizontal, vertical
        #[arg(long)]
        draw_mode: Option<String>,

        /// Background: white, black, transparent
        #[arg(long)]
        background: Option<String>,

        /// Scaling: original, fit, stretch, stretch-h, stretch-v
        #[arg(long)]
        scaling: Option<String>,

        /// Clockwise rotation in degrees: 0, 90, 180, 270
        #[arg(long, allow_hyphen_values = true)]
        rotate: Option<i32>,

        /// Resampling filter: nearest, bilinear, lanczos
        #[arg(long)]
        resample: Option<String>,

        /// Mirror the image horizontally
        #[arg(long)]
        flip_h: bool,

        /// Anchor to the left edge instead of centering
        #[arg(long)]
        no_center_h: bool,

        /// Anchor to the top edge instead of centering
        #[arg(long)]
        no_center_v: bool,

        /// Invert output
        #[arg(long)]
        invert: bool,

        /// Variable name (defaults to the first image's file stem)
        #[arg(long)]
        name: Option<String>,

        /// Number format: hex, decimal, binary
        #[arg(long)]
        format: Option<String>,

        /// Omit the PROGMEM qualifier
        #[arg(long)]
        no_progmem: bool,

        /// Omit the WIDTH/HEIGHT macros
        #[arg(long)]
        no_size: bool,

        /// Values per line
        #[arg(long)]
        per_line: Option<usize>,
    },

    /// List canvas presets
    Presets,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PixelpackError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Presets => {
            println!("Available presets:");
            for preset in presets::all() {
                println!(
                    "  {:<12} {:>4}x{:<4} {}",
                    preset.key, preset.width, preset.height, preset.name
                );
            }
            Ok(())
        }
        Commands::Convert {
            images,
            config,
            output,
            preview: preview_path,
            preset,
            width,
            height,
            mode,
            threshold,
            dither,
            draw_mode,
            background,
            scaling,
            rotate,
            resample,
            flip_h,
            no_center_h,
            no_center_v,
            invert,
            name,
            format,
            no_progmem,
            no_size,
            per_line,
        } => {
            let flags = OptionsFile {
                preset,
                canvas_width: width,
                canvas_height: height,
                color_mode: mode,
                threshold,
                dithering: dither,
                draw_mode,
                background_color: background,
                scaling,
                rotation: rotate,
                resample,
                flip_h: flip_h.then_some(true),
                center_h: no_center_h.then_some(false),
                center_v: no_center_v.then_some(false),
                invert: invert.then_some(true),
                variable_name: name,
                format,
                progmem: no_progmem.then_some(false),
                include_size: no_size.then_some(false),
                bytes_per_line: per_line,
            };
            let file = match &config {
                Some(path) => OptionsFile::load(path)?,
                None => OptionsFile::default(),
            };
            let merged = file.merge(flags);

            let options = merged.apply(ProcessingOptions::default())?;
            let default_output = OutputOptions::new(&default_name(&images));
            let output_options = merged.apply_output(default_output)?;

            convert_files(
                &images,
                &options,
                &output_options,
                output.as_deref(),
                preview_path.as_deref(),
            )
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Variable name derived from the first image's file stem.
fn default_name(images: &[PathBuf]) -> String {
    images
        .first()
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn convert_files(
    images: &[PathBuf],
    options: &ProcessingOptions,
    output_options: &OutputOptions,
    output: Option<&Path>,
    preview_path: Option<&Path>,
) -> Result<(), PixelpackError> {
    // Load everything up front; a file that fails to decode is a failed frame.
    let mut loaded: Vec<(usize, SourceImage)> = Vec::with_capacity(images.len());
    let mut failed = 0usize;
    for (index, path) in images.iter().enumerate() {
        match SourceImage::open(path) {
            Ok(source) => loaded.push((index, source)),
            Err(e) => {
                eprintln!("Frame {} ({}) failed: {}", index, path.display(), e);
                failed += 1;
            }
        }
    }

    let (indices, sources): (Vec<usize>, Vec<SourceImage>) = loaded.into_iter().unzip();
    let batch = convert_batch(&sources, options);
    for (batch_index, e) in batch.failures() {
        let index = indices[batch_index];
        eprintln!("Frame {} ({}) failed: {}", index, images[index].display(), e);
        failed += 1;
    }

    let frames = batch.byte_arrays();
    let code = codegen::generate_frames(&frames, output_options)?;

    match output {
        Some(path) => {
            std::fs::write(path, code.as_str())?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", code),
    }

    if let Some(path) = preview_path {
        if let Some((_, first)) = batch.successes().next() {
            preview::save_png(path, &first.preview)?;
            eprintln!("Saved preview to {}", path.display());
        }
    }

    eprintln!(
        "Converted {} of {} frame(s), {} bytes total",
        code.frames(),
        images.len(),
        code.total_bytes()
    );
    if failed > 0 {
        eprintln!("{} frame(s) skipped", failed);
    }

    Ok(())
}
