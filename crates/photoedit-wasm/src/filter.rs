//! Color filter WASM bindings.
//!
//! Filters are addressed by their identifier (`"sepia"`, `"blue_tint"`, ...).
//! [`filter_names`] lists them in picker order.

use crate::types::JsBitmap;
use photoedit_core::filter::{self, FilterKind};
use wasm_bindgen::prelude::*;

/// Apply a named filter, returning a new image.
///
/// # Errors
///
/// Returns an error if `name` is not a known filter.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const sepia = apply_filter(image, "sepia");
/// ```
#[wasm_bindgen]
pub fn apply_filter(image: &JsBitmap, name: &str) -> Result<JsBitmap, JsValue> {
    let kind = parse_filter(name)?;
    Ok(JsBitmap::from_bitmap(filter::apply_filter(
        image.as_bitmap(),
        kind,
    )))
}

/// Filter identifiers in picker order.
#[wasm_bindgen]
pub fn filter_names() -> js_sys::Array {
    FilterKind::ALL
        .iter()
        .map(|kind| JsValue::from_str(kind.id()))
        .collect()
}

/// Human-readable label for a filter identifier.
#[wasm_bindgen]
pub fn filter_label(name: &str) -> Option<String> {
    name.parse::<FilterKind>()
        .ok()
        .map(|kind| kind.label().to_string())
}

/// The 4×5 color matrix (20 row-major coefficients) for a filter.
///
/// The bias column (indices 4, 9, 14, 19) is in 0-255 units. An SVG
/// `feColorMatrix` takes the same layout but a 0-1 bias, so divide those four
/// values by 255 before handing the matrix to one.
#[wasm_bindgen]
pub fn filter_matrix(name: &str) -> Result<Vec<f32>, JsValue> {
    let kind = parse_filter(name)?;
    Ok(kind.matrix().coefficients().to_vec())
}

pub(crate) fn parse_filter(name: &str) -> Result<FilterKind, JsValue> {
    name.parse::<FilterKind>().map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_filter_by_name() {
        let img = JsBitmap::new(2, 1, vec![255, 255, 255, 255, 0, 0, 0, 255]);
        let inverted = apply_filter(&img, "invert").unwrap();
        assert_eq!(inverted.pixels(), vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_none_filter_copies() {
        let img = JsBitmap::new(1, 1, vec![10, 20, 30, 40]);
        assert_eq!(apply_filter(&img, "none").unwrap().pixels(), img.pixels());
    }

    #[test]
    fn test_filter_label() {
        assert_eq!(filter_label("blue_tint").as_deref(), Some("Blue tint"));
        assert_eq!(filter_label("nope"), None);
    }

    #[test]
    fn test_filter_matrix_length() {
        assert_eq!(filter_matrix("sepia").unwrap().len(), 20);
    }

    #[test]
    fn test_filter_matrix_bias_in_byte_units() {
        let matrix = filter_matrix("invert").unwrap();
        assert_eq!(matrix[0], -1.0);
        for bias in [matrix[4], matrix[9], matrix[14]] {
            assert_eq!(bias, 255.0);
        }
        assert_eq!(matrix[19], 0.0);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_filter_names_lists_all() {
        assert_eq!(filter_names().length(), 15);
    }

    #[wasm_bindgen_test]
    fn test_unknown_filter_is_error() {
        let img = JsBitmap::new(1, 1, vec![0, 0, 0, 255]);
        assert!(apply_filter(&img, "polaroid").is_err());
    }
}
