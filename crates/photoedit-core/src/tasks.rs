//! Background load and save.
//!
//! Decoding and encoding are CPU and I/O bound, so they run on tokio's
//! blocking pool and the result is awaited from the interactive context.
//! There is no cancellation; the session's busy flag keeps at most one save
//! outstanding.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::{self, JoinError};
use tracing::warn;

use crate::decode::{decode_image_file, Bitmap, DecodeError};
use crate::gallery::{GalleryError, GalleryWriter};

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("Save failed: {0}")]
    Gallery(#[from] GalleryError),
}

/// Decode an image file on the blocking pool.
pub async fn load_image(path: PathBuf, apply_exif: bool) -> Result<Bitmap, TaskError> {
    let result = task::spawn_blocking(move || decode_image_file(&path, apply_exif)).await?;
    result.map_err(|e| {
        warn!(error = %e, "decode failed");
        TaskError::from(e)
    })
}

/// Encode and store `image` through `writer` on the blocking pool.
pub async fn save_to_gallery(
    writer: Arc<dyn GalleryWriter>,
    image: Bitmap,
    folder: String,
) -> Result<PathBuf, TaskError> {
    let path = task::spawn_blocking(move || writer.write(&image, &folder)).await??;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKind;
    use crate::gallery::tests::MockGallery;
    use crate::gallery::DirectoryGallery;
    use crate::session::{EditCommand, EditSession};

    fn write_png(dir: &std::path::Path, width: u32, height: u32) -> PathBuf {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let path = dir.join("input.png");
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), 7, 5);

        let bitmap = load_image(path, true).await.unwrap();
        assert_eq!((bitmap.width, bitmap.height), (7, 5));
        assert_eq!(bitmap.pixel(0, 0), Some([10, 20, 30, 255]));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_image(PathBuf::from("/nonexistent/input.png"), true).await;
        assert!(matches!(
            result,
            Err(TaskError::Decode(DecodeError::IoError(_)))
        ));
    }

    #[tokio::test]
    async fn test_save_to_directory_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let writer: Arc<dyn GalleryWriter> = Arc::new(DirectoryGallery::new(dir.path()));

        let path = save_to_gallery(writer, Bitmap::filled(4, 4, [1, 2, 3, 255]), "out".into())
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_session_round_trip_through_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), 6, 4);
        let mut session = EditSession::new();

        session.load(load_image(input, true).await.unwrap());
        session.apply(EditCommand::SelectFilter(FilterKind::Grayscale));
        session.apply(EditCommand::Rotate);

        let export = session.begin_save().unwrap();
        let gallery = Arc::new(MockGallery::default());
        let result = save_to_gallery(gallery.clone(), export, "Pictures".into()).await;
        let status = session.finish_save(result);

        assert!(status.is_saved());
        assert!(!session.is_saving());
        let writes = gallery.writes.lock().unwrap();
        assert_eq!(writes[0].0, 4);
        assert_eq!(writes[0].1, 6);
    }

    #[tokio::test]
    async fn test_failed_save_reports_failure() {
        let mut session = EditSession::new();
        session.load(Bitmap::filled(2, 2, [0, 0, 0, 255]));

        let export = session.begin_save().unwrap();
        let result =
            save_to_gallery(Arc::new(MockGallery::failing()), export, "x".into()).await;
        assert!(matches!(result, Err(TaskError::Gallery(_))));

        let status = session.finish_save(result);
        assert_eq!(status.message(), "Failed to save image");
    }
}
