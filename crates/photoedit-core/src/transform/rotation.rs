//! Quarter-turn image rotation.
//!
//! The editor only rotates in exact 90° clockwise steps, so rotation is a
//! pure pixel permutation with no interpolation. For a source of size
//! `w × h`, the pixel at `(x, y)` lands at `(h - 1 - y, x)` in a `h × w`
//! output.

use crate::decode::{Bitmap, CHANNELS};

/// Angle, in degrees, added by each rotate action.
pub const ROTATION_STEP: f64 = 90.0;

/// Fold any angle into the range [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// The rotation angle after one more clockwise step.
pub fn next_rotation(angle: f64) -> f64 {
    normalize_degrees(angle + ROTATION_STEP)
}

/// Rotate an image exactly 90° clockwise.
///
/// # Returns
///
/// A new `Bitmap` with width and height swapped. Pixels missing from a
/// short buffer come out as transparent black.
pub fn rotate_cw90(image: &Bitmap) -> Bitmap {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = (src_h, src_w);
    let mut output = vec![0u8; src_w * src_h * CHANNELS];

    for y in 0..src_h {
        let src_row = y * src_w * CHANNELS;
        let dst_x = src_h - 1 - y;
        for x in 0..src_w {
            let src_idx = src_row + x * CHANNELS;
            let Some(pixel) = image.pixels.get(src_idx..src_idx + CHANNELS) else {
                continue;
            };
            let dst_idx = (x * dst_w + dst_x) * CHANNELS;
            output[dst_idx..dst_idx + CHANNELS].copy_from_slice(pixel);
        }
    }

    Bitmap {
        width: dst_w as u32,
        height: dst_h as u32,
        pixels: output,
    }
}

/// Apply `turns` clockwise quarter turns. Zero turns returns a copy.
pub fn rotate_quarter_turns(image: &Bitmap, turns: u32) -> Bitmap {
    let mut result = image.clone();
    for _ in 0..turns % 4 {
        result = rotate_cw90(&result);
    }
    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn bitmap_strategy() -> impl Strategy<Value = Bitmap> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| Bitmap::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: A full turn restores the original pixels exactly.
        #[test]
        fn prop_full_turn_is_identity(img in bitmap_strategy()) {
            prop_assert_eq!(rotate_quarter_turns(&img, 4), img);
        }

        /// Property: Each quarter turn swaps dimensions.
        #[test]
        fn prop_quarter_turn_swaps_dimensions(img in bitmap_strategy()) {
            let rotated = rotate_cw90(&img);
            prop_assert_eq!((rotated.width, rotated.height), (img.height, img.width));
        }

        /// Property: Normalized angles stay in [0, 360).
        #[test]
        fn prop_normalized_in_range(angle in -10_000.0f64..10_000.0) {
            let n = normalize_degrees(angle);
            prop_assert!((0.0..360.0).contains(&n));
        }
    }
}
