//! # Canvas Presets
//!
//! Common display panels and their native resolutions.
//!
//! | Key | Panel | Size |
//! |-----|-------|------|
//! | `ssd1306` | SSD1306 OLED | 128x64 |
//! | `ssd1306-32` | SSD1306 OLED | 128x32 |
//! | `sh1106` | SH1106 OLED | 132x64 |
//! | `nokia5110` | PCD8544 LCD | 84x48 |
//! | `st7735` | ST7735 TFT | 160x128 |
//! | `st7789` | ST7789 TFT | 240x240 |
//! | `ili9341` | ILI9341 TFT | 320x240 |
//! | `epd-2in9` | 2.9" e-paper | 296x128 |
//! | `epd-1in54` | 1.54" e-paper | 200x200 |
//!
//! ```
//! use pixelpack::presets;
//!
//! let panel = presets::by_key("SSD1306").unwrap();
//! assert_eq!((panel.width, panel.height), (128, 64));
//! ```

/// A named canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasPreset {
    /// Lookup key (lowercase)
    pub key: &'static str,
    /// Human-readable panel name
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl CanvasPreset {
    pub const fn new(key: &'static str, name: &'static str, width: u32, height: u32) -> Self {
        Self {
            key,
            name,
            width,
            height,
        }
    }
}

/// All registered presets.
static PRESETS: &[CanvasPreset] = &[
    CanvasPreset::new("ssd1306", "SSD1306 OLED 0.96\"", 128, 64),
    CanvasPreset::new("ssd1306-32", "SSD1306 OLED 0.91\"", 128, 32),
    CanvasPreset::new("sh1106", "SH1106 OLED 1.3\"", 132, 64),
    CanvasPreset::new("nokia5110", "Nokia 5110 (PCD8544)", 84, 48),
    CanvasPreset::new("st7735", "ST7735 TFT 1.8\"", 160, 128),
    CanvasPreset::new("st7789", "ST7789 TFT 1.3\"", 240, 240),
    CanvasPreset::new("ili9341", "ILI9341 TFT 2.8\"", 320, 240),
    CanvasPreset::new("epd-2in9", "E-paper 2.9\"", 296, 128),
    CanvasPreset::new("epd-1in54", "E-paper 1.54\"", 200, 200),
];

/// Get all registered presets.
pub fn all() -> &'static [CanvasPreset] {
    PRESETS
}

/// Look up a preset by key (case-insensitive).
pub fn by_key(key: &str) -> Option<&'static CanvasPreset> {
    PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(by_key("Nokia5110").map(|p| p.width), Some(84));
        assert_eq!(by_key(" ili9341 ").map(|p| p.height), Some(240));
        assert!(by_key("vt100").is_none());
    }

    #[test]
    fn test_keys_unique_and_sizes_positive() {
        for (i, a) in PRESETS.iter().enumerate() {
            assert!(a.width > 0 && a.height > 0);
            assert_eq!(a.key, a.key.to_lowercase());
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
