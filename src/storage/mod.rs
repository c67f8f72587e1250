use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

use crate::error::{AppError, Result};

pub fn ensure_dirs(upload_folder: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(upload_folder)
}

/// Date-prefixed unique filename, keeping the uploaded file's extension.
pub fn photo_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    format!(
        "{}_{}.{}",
        Utc::now().format("%Y%m%d"),
        &Uuid::new_v4().to_string()[..8],
        ext
    )
}

/// Writes the photo bytes and returns the public URL path. A failed write
/// aborts the whole found-item submission.
pub fn save_photo(upload_folder: &Path, original_name: &str, data: &[u8]) -> Result<String> {
    let filename = photo_filename(original_name);
    let path = upload_folder.join(&filename);
    std::fs::write(&path, data).map_err(|e| AppError::Upload(e.to_string()))?;
    Ok(format!("/uploads/{}", filename))
}

/// Removes a previously saved photo given the public URL `save_photo`
/// returned. Used when a submission fails after the upload already landed,
/// so the file does not sit orphaned on disk.
pub fn remove_photo(upload_folder: &Path, url: &str) {
    if let Some(name) = url.strip_prefix("/uploads/") {
        if let Err(e) = std::fs::remove_file(upload_folder.join(name)) {
            tracing::warn!("failed to remove orphaned photo {}: {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_extension_and_is_unique() {
        let a = photo_filename("photo.png");
        let b = photo_filename("photo.png");
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);

        assert!(photo_filename("no_extension").ends_with(".jpg"));
    }

    #[test]
    fn save_photo_writes_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let url = save_photo(dir.path(), "item.jpg", b"bytes").unwrap();
        assert!(url.starts_with("/uploads/"));

        let filename = url.trim_start_matches("/uploads/");
        let written = std::fs::read(dir.path().join(filename)).unwrap();
        assert_eq!(written, b"bytes");
    }

    #[test]
    fn remove_photo_deletes_the_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = save_photo(dir.path(), "item.jpg", b"bytes").unwrap();
        let filename = url.trim_start_matches("/uploads/").to_string();
        assert!(dir.path().join(&filename).exists());

        remove_photo(dir.path(), &url);
        assert!(!dir.path().join(&filename).exists());

        // A URL outside the uploads prefix is ignored.
        remove_photo(dir.path(), "/elsewhere/item.jpg");
    }

    #[test]
    fn save_photo_into_missing_dir_is_an_upload_error() {
        let err = save_photo(Path::new("/nonexistent/dir"), "item.jpg", b"bytes").unwrap_err();
        assert!(err.to_string().contains("Photo upload failed"));
    }
}
