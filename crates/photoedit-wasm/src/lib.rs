//! Photoedit WASM - WebAssembly bindings for photoedit
//!
//! This crate provides WASM bindings to expose the photoedit-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for RGBA image data
//! - `decode` - Image decoding bindings
//! - `encode` - JPEG export bindings
//! - `filter` - Named color filters
//! - `transform` - Quarter-turn rotation and display-space cropping
//! - `session` - Stateful editing session with undo/redo
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession } from '@photoedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession();
//! session.load(decode_image(bytes));
//! session.select_filter("warm");
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod filter;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, image_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use filter::{apply_filter, filter_label, filter_matrix, filter_names};
pub use session::JsEditSession;
pub use transform::{apply_crop, compute_crop, rotate_cw90};
pub use types::JsBitmap;

/// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "photoedit wasm {}",
        photoedit_core::VERSION
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    photoedit_core::VERSION.to_string()
}
