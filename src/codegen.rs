//! # Code Generation
//!
//! Renders packed bytes as a C/C++ header fragment.
//!
//! ## Single Frame
//!
//! ```text
//! // frog: 8x8, mono, horizontal, 8 bytes
//! #define FROG_WIDTH 8
//! #define FROG_HEIGHT 8
//!
//! const unsigned char frog[] PROGMEM = {
//!     0xFF, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0xFF
//! };
//! ```
//!
//! ## Multiple Frames
//!
//! A batch of more than one frame emits `<name>_frame<N>` arrays in
//! submission order followed by a `<name>_frames[]` pointer table, so the
//! firmware can step through an animation:
//!
//! ```text
//! const unsigned char* const frog_frames[] PROGMEM = {
//!     frog_frame0,
//!     frog_frame1
//! };
//! ```
//!
//! ## Number Formats
//!
//! | Format | Example |
//! |--------|---------|
//! | hex | `0x3F` |
//! | decimal | `63` |
//! | binary | `0b00111111` |

use tracing::debug;

use crate::error::{PixelpackError, Result};
use crate::options::{NumberFormat, OutputOptions, sanitize_identifier};
use crate::render::pack::ByteArray;

const INDENT: &str = "    ";

/// Generated source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    code: String,
    frames: usize,
    total_bytes: usize,
}

impl GeneratedCode {
    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn into_string(self) -> String {
        self.code
    }

    /// Number of frame arrays emitted.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Sum of all array lengths.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }
}

impl std::fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Format one byte in the requested base.
pub fn format_value(value: u8, format: NumberFormat) -> String {
    match format {
        NumberFormat::Hex => format!("0x{:02X}", value),
        NumberFormat::Decimal => value.to_string(),
        NumberFormat::Binary => format!("0b{:08b}", value),
    }
}

/// Render `frame` as a single array.
pub fn generate(frame: &ByteArray, output: &OutputOptions) -> Result<GeneratedCode> {
    generate_frames(std::slice::from_ref(frame), output)
}

/// Render one or more frames.
///
/// One frame produces a single array named after the variable. More than
/// one produces per-frame arrays plus a pointer table; all frames must share
/// dimensions and layout.
pub fn generate_frames(frames: &[ByteArray], output: &OutputOptions) -> Result<GeneratedCode> {
    let Some(first) = frames.first() else {
        return Err(PixelpackError::NothingToGenerate);
    };
    if frames.iter().any(ByteArray::is_empty) {
        return Err(PixelpackError::NothingToGenerate);
    }
    if let Some((index, frame)) = frames.iter().enumerate().find(|(_, f)| {
        (f.width, f.height, f.layout) != (first.width, first.height, first.layout)
    }) {
        return Err(PixelpackError::FrameMismatch(format!(
            "frame {} is {}x{} {}, frame 0 is {}x{} {}",
            index,
            frame.width,
            frame.height,
            frame.layout.describe(),
            first.width,
            first.height,
            first.layout.describe()
        )));
    }

    let name = sanitize_identifier(&output.variable_name);
    let macro_prefix = name.to_uppercase();
    let per_line = output.bytes_per_line.max(1);
    let progmem = if output.progmem { " PROGMEM" } else { "" };
    let total_bytes: usize = frames.iter().map(ByteArray::total_bytes).sum();
    let mut code = String::new();

    if frames.len() == 1 {
        code.push_str(&format!(
            "// {}: {}x{}, {}, {} bytes\n",
            name,
            first.width,
            first.height,
            first.layout.describe(),
            first.total_bytes()
        ));
    } else {
        code.push_str(&format!(
            "// {}: {} frames, {}x{}, {}, {} bytes each\n",
            name,
            frames.len(),
            first.width,
            first.height,
            first.layout.describe(),
            first.total_bytes()
        ));
    }

    if output.include_size {
        code.push_str(&format!("#define {}_WIDTH {}\n", macro_prefix, first.width));
        code.push_str(&format!("#define {}_HEIGHT {}\n", macro_prefix, first.height));
        if frames.len() > 1 {
            code.push_str(&format!(
                "#define {}_FRAME_COUNT {}\n",
                macro_prefix,
                frames.len()
            ));
        }
    }

    if frames.len() == 1 {
        code.push('\n');
        write_array(&mut code, &name, progmem, &first.data, output.format, per_line);
    } else {
        for (index, frame) in frames.iter().enumerate() {
            code.push_str(&format!("\n// frame {}\n", index));
            let frame_name = format!("{}_frame{}", name, index);
            write_array(&mut code, &frame_name, progmem, &frame.data, output.format, per_line);
        }

        code.push_str(&format!(
            "\nconst unsigned char* const {}_frames[]{} = {{\n",
            name, progmem
        ));
        let entries: Vec<String> = (0..frames.len())
            .map(|index| format!("{}{}_frame{}", INDENT, name, index))
            .collect();
        code.push_str(&entries.join(",\n"));
        code.push_str("\n};\n");
    }

    debug!(
        name = %name,
        frames = frames.len(),
        total_bytes,
        "Generated source"
    );

    Ok(GeneratedCode {
        code,
        frames: frames.len(),
        total_bytes,
    })
}

/// Append one `const unsigned char` array declaration.
fn write_array(
    code: &mut String,
    name: &str,
    progmem: &str,
    data: &[u8],
    format: NumberFormat,
    per_line: usize,
) {
    code.push_str(&format!("const unsigned char {}[]{} = {{\n", name, progmem));
    let lines: Vec<String> = data
        .chunks(per_line)
        .map(|chunk| {
            let values: Vec<String> = chunk.iter().map(|&b| format_value(b, format)).collect();
            format!("{}{}", INDENT, values.join(", "))
        })
        .collect();
    code.push_str(&lines.join(",\n"));
    code.push_str("\n};\n");
}
