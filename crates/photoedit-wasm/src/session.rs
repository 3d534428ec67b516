//! WASM bindings for the editing session.
//!
//! `JsEditSession` wraps the core [`EditSession`]. Each editing method
//! returns the command outcome as a string: `"applied"`, `"skipped"` or
//! `"no_image"`. The browser has no background pool, so export runs
//! synchronously and returns JPEG bytes for the page to store.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession();
//! session.load(decode_image(bytes));
//! session.select_filter("vintage");
//! session.rotate();
//! session.begin_crop();
//! session.start_drag(x, y);
//! session.drag_by(dx, dy);
//! session.apply_crop(container.width, container.height);
//! const preview = session.preview();
//! const jpeg = session.export_jpeg();
//! ```

use std::path::PathBuf;

use crate::filter::parse_filter;
use crate::types::JsBitmap;
use photoedit_core::encode::{encode_jpeg, EXPORT_QUALITY};
use photoedit_core::transform::{CropRect, Point, Size};
use photoedit_core::{CommandOutcome, EditCommand, EditSession};
use wasm_bindgen::prelude::*;

/// An editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create an empty session.
    ///
    /// `history_limit` bounds the number of undo snapshots; pass `undefined`
    /// for unlimited.
    #[wasm_bindgen(constructor)]
    pub fn new(history_limit: Option<u32>) -> JsEditSession {
        let config = photoedit_core::EditorConfig {
            history_limit: history_limit.map(|l| l as usize),
            ..Default::default()
        };
        JsEditSession {
            inner: EditSession::with_config(&config),
        }
    }

    /// Install a decoded image, discarding previous edits.
    pub fn load(&mut self, image: &JsBitmap) {
        self.inner.load(image.as_bitmap().clone());
    }

    /// Pick a filter by identifier.
    pub fn select_filter(&mut self, name: &str) -> Result<String, JsValue> {
        let kind = parse_filter(name)?;
        Ok(self.run(EditCommand::SelectFilter(kind)))
    }

    pub fn rotate(&mut self) -> String {
        self.run(EditCommand::Rotate)
    }

    pub fn begin_crop(&mut self) -> String {
        self.run(EditCommand::BeginCrop)
    }

    /// Set the crop selection from two drag corners in display coordinates.
    pub fn update_crop(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> String {
        self.run(EditCommand::UpdateCrop(CropRect::from_corners(
            Point::new(x0, y0),
            Point::new(x1, y1),
        )))
    }

    /// Start a crop drag gesture at a display point.
    pub fn start_drag(&mut self, x: f64, y: f64) -> String {
        self.run(EditCommand::StartDrag(Point::new(x, y)))
    }

    /// Move the drag's end point by a pointer delta.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> String {
        self.run(EditCommand::DragBy { dx, dy })
    }

    /// Crop to the current selection, given the display container size.
    pub fn apply_crop(&mut self, container_width: f64, container_height: f64) -> String {
        self.run(EditCommand::ApplyCrop {
            container: Size::new(container_width, container_height),
        })
    }

    pub fn cancel_crop(&mut self) -> String {
        self.run(EditCommand::CancelCrop)
    }

    pub fn undo(&mut self) -> String {
        self.run(EditCommand::Undo)
    }

    pub fn redo(&mut self) -> String {
        self.run(EditCommand::Redo)
    }

    pub fn close(&mut self) {
        self.inner.apply(EditCommand::Close);
    }

    /// The working image with the current filter applied.
    pub fn preview(&self) -> Option<JsBitmap> {
        self.inner.preview().map(JsBitmap::from_bitmap)
    }

    /// Encode the filtered image as JPEG (quality 100).
    ///
    /// # Errors
    ///
    /// Returns an error if no image is loaded or encoding fails. The session
    /// is unchanged either way.
    pub fn export_jpeg(&mut self) -> Result<Vec<u8>, JsValue> {
        let export = self
            .inner
            .begin_save()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let encoded = encode_jpeg(&export, EXPORT_QUALITY);
        let status = self.inner.finish_save(match &encoded {
            Ok(_) => Ok(PathBuf::from("export.jpg")),
            Err(e) => Err(e),
        });
        match encoded {
            Ok(bytes) => Ok(bytes),
            Err(_) => {
                web_sys::console::warn_1(&JsValue::from_str(status.message()));
                Err(JsValue::from_str(status.message()))
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.history().can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.history().can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.inner.filter().id().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    /// Full session summary as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.state())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEditSession {
    fn run(&mut self, command: EditCommand) -> String {
        outcome_name(self.inner.apply(command)).to_string()
    }
}

fn outcome_name(outcome: CommandOutcome) -> &'static str {
    match outcome {
        CommandOutcome::Applied => "applied",
        CommandOutcome::Skipped => "skipped",
        CommandOutcome::NoImage => "no_image",
    }
}
