//! The editing session: one working image and the state around it.
//!
//! An [`EditSession`] is driven by [`EditCommand`]s. Each command either
//! changes the session (`Applied`), is a no-op at a boundary or on
//! degenerate geometry (`Skipped`), or arrives before any image is loaded
//! (`NoImage`). Filters are non-destructive: the working image keeps its
//! unfiltered pixels and the filter is applied on [`EditSession::preview`]
//! and at export. Rotation and cropping replace the working image.
//!
//! Saving is split in two so the blocking encode/write can run elsewhere:
//! [`EditSession::begin_save`] hands out the export bitmap and raises a busy
//! flag, [`EditSession::finish_save`] lowers it and produces the status
//! message. While the flag is up further saves are refused.

use std::fmt::Display;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::decode::Bitmap;
use crate::filter::{apply_filter, FilterKind};
use crate::history::{EditHistory, EditSnapshot};
use crate::transform::{
    compute_crop, crop_bitmap, next_rotation, rotate_cw90, ContentScale, CropDrag, CropRect, Point,
    Size,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("A save is already in progress")]
    SaveInProgress,
    #[error("No image loaded")]
    NoImage,
}

/// A user action on the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    /// Pick a filter; the pick is recorded in history.
    SelectFilter(FilterKind),
    /// Rotate the working image 90° clockwise.
    Rotate,
    /// Enter crop mode with an empty selection.
    BeginCrop,
    /// Start a drag gesture at a display point; the selection is empty.
    StartDrag(Point),
    /// Move the drag's end point by a delta and select the spanned rectangle.
    DragBy { dx: f64, dy: f64 },
    /// Set the selection directly.
    UpdateCrop(CropRect),
    /// Crop the working image to the selection.
    ApplyCrop { container: Size },
    /// Leave crop mode without cropping.
    CancelCrop,
    Undo,
    Redo,
    /// Drop the working image and all history.
    Close,
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Skipped,
    NoImage,
}

/// Result of a finished save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved(PathBuf),
    Failed,
}

impl SaveStatus {
    /// The message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            SaveStatus::Saved(_) => "Image saved to gallery",
            SaveStatus::Failed => "Failed to save image",
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved(_))
    }
}

/// A serializable summary of the session, for UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub has_image: bool,
    pub width: u32,
    pub height: u32,
    pub filter: FilterKind,
    pub rotation: f64,
    pub content_scale: ContentScale,
    pub cropping: bool,
    pub crop_rect: Option<CropRect>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history_len: usize,
    pub history_index: Option<usize>,
    pub saving: bool,
}

/// Editing state for a single image.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    working: Option<Bitmap>,
    filter: FilterKind,
    rotation: f64,
    history: EditHistory,
    content_scale: ContentScale,
    cropping: bool,
    crop_rect: Option<CropRect>,
    drag: Option<CropDrag>,
    saving: bool,
}

impl EditSession {
    /// Create an empty session with unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session using the history limit from `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            history: EditHistory::with_limit(config.history_limit),
            ..Self::default()
        }
    }

    /// Install a freshly loaded image, discarding any previous edits.
    pub fn load(&mut self, image: Bitmap) {
        self.history.reset(&image);
        info!(width = image.width, height = image.height, "image loaded");
        self.working = Some(image);
        self.filter = FilterKind::None;
        self.rotation = 0.0;
        self.content_scale = ContentScale::Fill;
        self.leave_crop_mode();
    }

    /// Apply one command.
    pub fn apply(&mut self, command: EditCommand) -> CommandOutcome {
        if let EditCommand::Close = command {
            self.close();
            return CommandOutcome::Applied;
        }
        let Some(working) = self.working.as_ref() else {
            debug!(?command, "command ignored, no image");
            return CommandOutcome::NoImage;
        };

        let outcome = match command {
            EditCommand::SelectFilter(filter) => {
                self.filter = filter;
                self.history.commit(working, filter, self.rotation);
                self.leave_crop_mode();
                CommandOutcome::Applied
            }
            EditCommand::Rotate => {
                let rotated = rotate_cw90(working);
                // A selection drawn over the old orientation does not carry over
                self.leave_crop_mode();
                self.rotation = next_rotation(self.rotation);
                self.history.commit(&rotated, self.filter, self.rotation);
                self.working = Some(rotated);
                CommandOutcome::Applied
            }
            EditCommand::BeginCrop => {
                self.leave_crop_mode();
                self.cropping = true;
                self.content_scale = ContentScale::Fill;
                CommandOutcome::Applied
            }
            EditCommand::StartDrag(at) => {
                if !self.cropping {
                    return CommandOutcome::Skipped;
                }
                let drag = CropDrag::begin(at);
                self.drag = Some(drag);
                self.set_crop_rect(drag.rect())
            }
            EditCommand::DragBy { dx, dy } => match self.drag.as_mut() {
                Some(drag) if self.cropping => {
                    let rect = drag.drag_by(dx, dy);
                    self.set_crop_rect(rect)
                }
                _ => CommandOutcome::Skipped,
            },
            EditCommand::UpdateCrop(rect) => self.set_crop_rect(rect),
            EditCommand::ApplyCrop { container } => self.apply_crop(container),
            EditCommand::CancelCrop => {
                if !self.cropping {
                    return CommandOutcome::Skipped;
                }
                self.leave_crop_mode();
                CommandOutcome::Applied
            }
            EditCommand::Undo => match self.history.undo().cloned() {
                Some(snapshot) => self.restore(snapshot),
                None => CommandOutcome::Skipped,
            },
            EditCommand::Redo => match self.history.redo().cloned() {
                Some(snapshot) => self.restore(snapshot),
                None => CommandOutcome::Skipped,
            },
            EditCommand::Close => CommandOutcome::Applied,
        };

        debug!(?command, ?outcome, "command");
        outcome
    }

    fn set_crop_rect(&mut self, rect: CropRect) -> CommandOutcome {
        if !self.cropping {
            return CommandOutcome::Skipped;
        }
        self.crop_rect = Some(rect);
        CommandOutcome::Applied
    }

    fn apply_crop(&mut self, container: Size) -> CommandOutcome {
        if !self.cropping {
            return CommandOutcome::Skipped;
        }
        let (Some(working), Some(rect)) = (self.working.as_ref(), self.crop_rect) else {
            return CommandOutcome::Skipped;
        };
        let Some(pixels) = compute_crop(
            &rect,
            container,
            working.width,
            working.height,
            self.content_scale,
        ) else {
            debug!(?rect, ?container, "degenerate crop skipped");
            return CommandOutcome::Skipped;
        };

        let cropped = crop_bitmap(working, &pixels);
        self.history.commit(&cropped, self.filter, self.rotation);
        self.working = Some(cropped);
        self.leave_crop_mode();
        self.content_scale = ContentScale::Fit;
        CommandOutcome::Applied
    }

    fn leave_crop_mode(&mut self) {
        self.cropping = false;
        self.crop_rect = None;
        self.drag = None;
    }

    fn restore(&mut self, snapshot: EditSnapshot) -> CommandOutcome {
        self.filter = snapshot.filter();
        self.rotation = snapshot.rotation();
        self.working = Some(snapshot.bitmap().clone());
        CommandOutcome::Applied
    }

    fn close(&mut self) {
        self.working = None;
        self.filter = FilterKind::None;
        self.rotation = 0.0;
        self.history.clear();
        self.content_scale = ContentScale::Fill;
        self.leave_crop_mode();
        debug!("session closed");
    }

    /// The working image with the current filter applied.
    pub fn preview(&self) -> Option<Bitmap> {
        self.working
            .as_ref()
            .map(|image| apply_filter(image, self.filter))
    }

    /// Start a save and return the bitmap to export.
    ///
    /// Fails if no image is loaded or another save has not finished.
    pub fn begin_save(&mut self) -> Result<Bitmap, SessionError> {
        if self.saving {
            return Err(SessionError::SaveInProgress);
        }
        let export = self.preview().ok_or(SessionError::NoImage)?;
        self.saving = true;
        debug!(width = export.width, height = export.height, "save started");
        Ok(export)
    }

    /// Finish the outstanding save and report its status.
    ///
    /// The cause of a failure is logged; the returned status only carries
    /// the generic message.
    pub fn finish_save<E: Display>(&mut self, result: Result<PathBuf, E>) -> SaveStatus {
        self.saving = false;
        match result {
            Ok(path) => {
                info!(path = %path.display(), "save finished");
                SaveStatus::Saved(path)
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                SaveStatus::Failed
            }
        }
    }

    /// Snapshot of the session for display.
    pub fn state(&self) -> SessionState {
        let (width, height) = self
            .working
            .as_ref()
            .map_or((0, 0), |image| (image.width, image.height));
        SessionState {
            has_image: self.working.is_some(),
            width,
            height,
            filter: self.filter,
            rotation: self.rotation,
            content_scale: self.content_scale,
            cropping: self.cropping,
            crop_rect: self.crop_rect,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            history_len: self.history.len(),
            history_index: self.history.index(),
            saving: self.saving,
        }
    }

    /// The unfiltered working image.
    pub fn working(&self) -> Option<&Bitmap> {
        self.working.as_ref()
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn content_scale(&self) -> ContentScale {
        self.content_scale
    }

    pub fn is_cropping(&self) -> bool {
        self.cropping
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.crop_rect
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }
}
