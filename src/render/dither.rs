//! # Mono Dithering
//!
//! Converts 8-bit luminance into 1-bit output for monochrome displays.
//!
//! ## What is Dithering?
//!
//! A mono display can only light a pixel or leave it dark. Dithering
//! simulates intermediate tones by varying the density of lit pixels.
//!
//! ```text
//! Luminance:    Black    Dark     Medium    Light   White
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## Strategies
//!
//! | Method | Error propagated | Artifacts |
//! |--------|------------------|-----------|
//! | None | - | Banding |
//! | Floyd-Steinberg | 16/16 | Directional worms |
//! | Atkinson | 6/8 | Higher local contrast, lost shadow detail |
//! | Bayer | - | Regular cross-hatch pattern |
//!
//! Error diffusion walks the image row by row, left to right. Each pixel is
//! thresholded to 0 or 255 and the difference is pushed onto not-yet-visited
//! neighbors. Neighbors outside the image are skipped and their share of the
//! error is simply lost.
//!
//! ```text
//! Floyd-Steinberg (/16)        Atkinson (/8)
//!        *   7                        *   1   1
//!    3   5   1                    1   1   1
//!                                     1
//! ```
//!
//! ## Ordered Dithering
//!
//! Bayer dithering compares each pixel against a position-dependent threshold
//! from an 8x8 matrix:
//!
//! ```text
//! threshold' = threshold + (BAYER8[y mod 8][x mod 8] / 64 - 0.5) * 255
//! ```
//!
//! No error moves between pixels, so every pixel is independent.
//!
//! ## Bit Convention
//!
//! `true` means the pixel's (possibly inverted) luminance reached the
//! threshold, i.e. a set bit in the packed output.
//!
//! ```
//! use pixelpack::options::Dithering;
//! use pixelpack::render::dither;
//!
//! let luma = vec![0u8, 64, 128, 255];
//! let bits = dither::dither(&luma, 4, 1, 128, Dithering::None);
//! assert_eq!(bits, vec![false, false, true, true]);
//! ```

use tracing::debug;

use crate::options::Dithering;

/// Bayer 8x8 dithering matrix
///
/// Values range from 0-63. Low values activate first as luminance rises,
/// high values last.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Spread of the Bayer threshold around the base threshold.
pub const BAYER_SCALE: f32 = 255.0;

/// Floyd-Steinberg kernel as `(dx, dy, weight)`.
pub const FLOYD_STEINBERG: [(isize, isize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Atkinson kernel as `(dx, dy, weight)`. Weights sum to 6/8.
pub const ATKINSON: [(isize, isize, f32); 6] = [
    (1, 0, 1.0 / 8.0),
    (2, 0, 1.0 / 8.0),
    (-1, 1, 1.0 / 8.0),
    (0, 1, 1.0 / 8.0),
    (1, 1, 1.0 / 8.0),
    (0, 2, 1.0 / 8.0),
];

/// Dither a row-major luminance buffer to bits.
///
/// `luma.len()` must equal `width * height`.
pub fn dither(
    luma: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
    algorithm: Dithering,
) -> Vec<bool> {
    debug_assert_eq!(luma.len(), width * height);
    debug!(width, height, threshold, %algorithm, "Dithering");

    match algorithm {
        Dithering::None => luma.iter().map(|&l| l >= threshold).collect(),
        Dithering::FloydSteinberg => diffuse(luma, width, height, threshold, &FLOYD_STEINBERG),
        Dithering::Atkinson => diffuse(luma, width, height, threshold, &ATKINSON),
        Dithering::Bayer => bayer(luma, width, threshold),
    }
}

/// Position-dependent Bayer threshold.
///
/// ## Algorithm
///
/// ```text
/// matrix_value = BAYER8[y mod 8][x mod 8]
/// threshold'   = threshold + (matrix_value / 64 - 0.5) * BAYER_SCALE
/// ```
#[inline]
pub fn bayer_threshold(x: usize, y: usize, threshold: u8) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7] as f32;
    threshold as f32 + (matrix_value / 64.0 - 0.5) * BAYER_SCALE
}

/// Ordered dithering against [`BAYER8`].
pub fn bayer(luma: &[u8], width: usize, threshold: u8) -> Vec<bool> {
    luma.iter()
        .enumerate()
        .map(|(i, &l)| {
            let (x, y) = (i % width, i / width);
            l as f32 >= bayer_threshold(x, y, threshold)
        })
        .collect()
}

/// Error diffusion with an arbitrary forward kernel.
///
/// Works in an `f32` buffer so accumulated error can leave the 0-255 range
/// without clamping.
pub fn diffuse(
    luma: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
    kernel: &[(isize, isize, f32)],
) -> Vec<bool> {
    let mut buf: Vec<f32> = luma.iter().map(|&l| l as f32).collect();
    let mut bits = vec![false; luma.len()];
    let threshold = threshold as f32;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = buf[idx];
            let lit = old >= threshold;
            let error = old - if lit { 255.0 } else { 0.0 };
            bits[idx] = lit;

            for &(dx, dy, weight) in kernel {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                buf[ny as usize * width + nx as usize] += error * weight;
            }
        }
    }

    bits
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_count(bits: &[bool]) -> usize {
        bits.iter().filter(|&&b| b).count()
    }

    #[test]
    fn test_bayer_matrix_values() {
        // Check matrix contains all values 0-63 exactly once
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "Matrix value {} out of range", val);
                assert!(!seen[val as usize], "Duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "Not all values 0-63 present");
    }

    #[test]
    fn test_bayer_threshold_periodicity() {
        for y in 0..8 {
            for x in 0..8 {
                let t = bayer_threshold(x, y, 128);
                assert_eq!(t, bayer_threshold(x + 8, y, 128));
                assert_eq!(t, bayer_threshold(x, y + 8, 128));
                assert_eq!(t, bayer_threshold(x + 16, y + 24, 128));
            }
        }
    }

    #[test]
    fn test_kernel_weights() {
        let fs: f32 = FLOYD_STEINBERG.iter().map(|k| k.2).sum();
        let atkinson: f32 = ATKINSON.iter().map(|k| k.2).sum();
        assert!((fs - 1.0).abs() < 1e-6);
        assert!((atkinson - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_extremes_for_every_algorithm() {
        for algorithm in [
            Dithering::None,
            Dithering::FloydSteinberg,
            Dithering::Atkinson,
            Dithering::Bayer,
        ] {
            let white = dither(&[255; 100], 10, 10, 128, algorithm);
            assert!(white.iter().all(|&b| b), "{:?} white", algorithm);
            let black = dither(&[0; 100], 10, 10, 128, algorithm);
            assert!(black.iter().all(|&b| !b), "{:?} black", algorithm);
        }
    }

    #[test]
    fn test_bayer_gray_distribution() {
        // Mid gray lights about half of each 8x8 tile
        let lit = lit_count(&bayer(&[128; 64], 8, 128));
        assert!((31..=33).contains(&lit), "expected ~32 lit, got {}", lit);
    }

    #[test]
    fn test_bayer_is_position_independent_of_neighbors() {
        let mut luma = vec![128u8; 64];
        let base = bayer(&luma, 8, 128);
        luma[0] = 255;
        let changed = bayer(&luma, 8, 128);
        assert_eq!(base[1..], changed[1..]);
    }

    #[test]
    fn test_floyd_steinberg_gray_density() {
        let bits = dither(&[128; 256], 16, 16, 128, Dithering::FloydSteinberg);
        let lit = lit_count(&bits);
        assert!((112..=144).contains(&lit), "expected ~128 lit, got {}", lit);
    }

    #[test]
    fn test_floyd_steinberg_known_3x3() {
        let luma = [100, 150, 200, 50, 127, 250, 0, 80, 160];
        let bits = dither(&luma, 3, 3, 128, Dithering::FloydSteinberg);
        // 100 is below threshold
        assert!(!bits[0]);
        // 150 + 7/16 * 100 crosses it
        assert!(bits[1]);
        assert!(bits[2]);
    }

    #[test]
    fn test_floyd_steinberg_spreads_error_right() {
        // 100 alone stays dark, but its 7/16 pushes the 100 next to it over 128
        let bits = dither(&[100, 100], 2, 1, 128, Dithering::FloydSteinberg);
        assert_eq!(bits, vec![false, true]);
    }

    #[test]
    fn test_atkinson_reaches_two_pixels_right() {
        // Without the (x + 2) term the last pixel would only see 120 + 1.875
        let bits = dither(&[120, 0, 120], 3, 1, 128, Dithering::Atkinson);
        assert_eq!(bits, vec![false, false, true]);
    }

    #[test]
    fn test_deterministic() {
        let luma: Vec<u8> = (0..=255).collect();
        for algorithm in [Dithering::FloydSteinberg, Dithering::Atkinson, Dithering::Bayer] {
            assert_eq!(
                dither(&luma, 16, 16, 100, algorithm),
                dither(&luma, 16, 16, 100, algorithm)
            );
        }
    }
}
