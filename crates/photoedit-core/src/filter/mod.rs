//! Color filter engine.
//!
//! Each [`FilterKind`] maps to a fixed [`ColorMatrix`]. Applying a filter
//! runs that matrix over every RGBA pixel and clamps the result to [0, 255].
//!
//! ## Algorithm
//!
//! For `FilterKind::None` the bitmap is duplicated byte for byte. Otherwise
//! each output channel is a linear combination of the four input channels
//! plus a bias, rounded and saturated.

mod kind;
mod matrix;

pub use kind::{FilterKind, ParseFilterError};
pub use matrix::ColorMatrix;

use crate::decode::{Bitmap, CHANNELS};

/// Apply a filter, returning a newly allocated bitmap of the same size.
///
/// The result never aliases the input, including for `FilterKind::None`.
pub fn apply_filter(image: &Bitmap, filter: FilterKind) -> Bitmap {
    let mut output = image.clone();
    apply_filter_in_place(&mut output.pixels, filter);
    output
}

/// Apply a filter to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `filter` - The filter to run
pub fn apply_filter_in_place(pixels: &mut [u8], filter: FilterKind) {
    let matrix = filter.matrix();
    if matrix.is_identity() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let out = matrix.apply_to_pixel([chunk[0], chunk[1], chunk[2], chunk[3]]);
        chunk.copy_from_slice(&out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image with a spread of channel values.
    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) * 7 % 256) as u8;
                pixels.extend_from_slice(&[v, v.wrapping_mul(3), 255 - v, 255]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    #[test]
    fn test_none_returns_identical_copy() {
        let img = test_image(8, 5);
        let out = apply_filter(&img, FilterKind::None);
        assert_eq!(out, img);
        assert_ne!(out.pixels.as_ptr(), img.pixels.as_ptr());
    }

    #[test]
    fn test_bright_white_saturates() {
        let img = Bitmap::filled(2, 2, [255, 255, 255, 255]);
        let out = apply_filter(&img, FilterKind::Bright);
        assert!(out.pixels.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_contrast_black_clamps_to_zero() {
        let img = Bitmap::filled(1, 1, [0, 0, 0, 255]);
        let out = apply_filter(&img, FilterKind::Contrast);
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_invert_values() {
        let img = Bitmap::new(1, 1, vec![0, 100, 255, 200]);
        let out = apply_filter(&img, FilterKind::Invert);
        assert_eq!(out.pixel(0, 0), Some([255, 155, 0, 200]));
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let out = apply_filter(&test_image(6, 6), FilterKind::Grayscale);
        for px in out.pixels.chunks_exact(4) {
            assert!(px[0].abs_diff(px[1]) <= 1 && px[1].abs_diff(px[2]) <= 1);
        }
    }

    #[test]
    fn test_sepia_white() {
        let img = Bitmap::filled(1, 1, [255, 255, 255, 255]);
        let out = apply_filter(&img, FilterKind::Sepia);
        // Row sums: 1.351, 1.203, 0.937
        assert_eq!(out.pixel(0, 0), Some([255, 255, 239, 255]));
    }

    #[test]
    fn test_fade_reduces_alpha_only() {
        let img = Bitmap::filled(1, 1, [40, 80, 120, 255]);
        let out = apply_filter(&img, FilterKind::Fade);
        assert_eq!(out.pixel(0, 0), Some([40, 80, 120, 179]));
    }

    #[test]
    fn test_tints_shift_balance() {
        let img = Bitmap::filled(1, 1, [100, 100, 100, 255]);
        assert_eq!(
            apply_filter(&img, FilterKind::BlueTint).pixel(0, 0),
            Some([90, 90, 130, 255])
        );
        assert_eq!(
            apply_filter(&img, FilterKind::RedTint).pixel(0, 0),
            Some([130, 90, 90, 255])
        );
    }

    #[test]
    fn test_vintage_bias() {
        let img = Bitmap::filled(1, 1, [0, 0, 0, 255]);
        let out = apply_filter(&img, FilterKind::Vintage);
        assert_eq!(out.pixel(0, 0), Some([30, 20, 10, 255]));
    }

    #[test]
    fn test_in_place_matches_copying_apply() {
        let img = test_image(4, 4);
        let mut pixels = img.pixels.clone();
        apply_filter_in_place(&mut pixels, FilterKind::Vivid);
        assert_eq!(pixels, apply_filter(&img, FilterKind::Vivid).pixels);
    }

    #[test]
    fn test_in_place_ignores_trailing_partial_pixel() {
        let mut pixels = vec![0, 0, 0, 255, 7, 7];
        apply_filter_in_place(&mut pixels, FilterKind::Invert);
        assert_eq!(pixels, vec![255, 255, 255, 255, 7, 7]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
