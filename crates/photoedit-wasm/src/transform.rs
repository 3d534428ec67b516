//! WASM bindings for rotation and crop.
//!
//! Crop selections are passed in display coordinates together with the
//! container size and scale mode the image is shown with, exactly as the
//! user drew them.

use crate::types::JsBitmap;
use photoedit_core::transform::{
    compute_crop as core_compute_crop, crop_bitmap, rotate_cw90 as core_rotate, ContentScale,
    CropRect, PixelRect, Size,
};
use wasm_bindgen::prelude::*;

/// Rotate an image 90° clockwise.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_cw90(image); // width and height swap
/// ```
#[wasm_bindgen]
pub fn rotate_cw90(image: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(core_rotate(image.as_bitmap()))
}

/// Map a display selection to source pixels.
///
/// # Arguments
///
/// * `left`, `top`, `width`, `height` - Selection in display coordinates
/// * `container_width`, `container_height` - Display container size
/// * `fit` - `true` if the image is letterboxed (fit), `false` if it covers
///   the container (fill)
///
/// # Returns
///
/// `[x, y, width, height]` in source pixels, or `undefined` when the
/// selection is degenerate.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn compute_crop(
    image_width: u32,
    image_height: u32,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    container_width: f64,
    container_height: f64,
    fit: bool,
) -> Option<Vec<u32>> {
    pixel_rect(
        image_width,
        image_height,
        CropRect::from_origin_size(left, top, width, height),
        Size::new(container_width, container_height),
        fit,
    )
    .map(|r| vec![r.x, r.y, r.width, r.height])
}

/// Crop an image to a display selection.
///
/// Returns `undefined` (and leaves nothing allocated) when the selection is
/// degenerate.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // 600x300 image shown filling a 300x300 box: the visible square
/// const cropped = apply_crop(image, 0, 0, 300, 300, 300, 300, false);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn apply_crop(
    image: &JsBitmap,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    container_width: f64,
    container_height: f64,
    fit: bool,
) -> Option<JsBitmap> {
    let src = image.as_bitmap();
    let rect = pixel_rect(
        src.width,
        src.height,
        CropRect::from_origin_size(left, top, width, height),
        Size::new(container_width, container_height),
        fit,
    )?;
    Some(JsBitmap::from_bitmap(crop_bitmap(src, &rect)))
}

pub(crate) fn scale_mode(fit: bool) -> ContentScale {
    if fit {
        ContentScale::Fit
    } else {
        ContentScale::Fill
    }
}

fn pixel_rect(
    image_width: u32,
    image_height: u32,
    rect: CropRect,
    container: Size,
    fit: bool,
) -> Option<PixelRect> {
    core_compute_crop(&rect, container, image_width, image_height, scale_mode(fit))
}
