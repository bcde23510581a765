//! Rescan notifier for the SQLite media index
//!
//! Indexes a single file on a background thread and reports the public locator
//! of the resulting record through the completion callback.

use crate::error::{StoreError, StoreResult};
use crate::models::{MediaKind, NewRecord};
use crate::store::SqliteMediaStore;
use crate::traits::{MediaScanner, ScanCallback};
use sha2::{Digest, Sha256};
use std::path::Path;

/// MIME type for a file extension, or `None` for files the index does not treat as media
pub fn guess_mime_from_ext(path: &Path) -> Option<&'static str> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("heic") | Some("heif") => "image/heic",
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("3gp") => "video/3gpp",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("mov") => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

/// Media kind implied by a MIME type
pub fn kind_for_mime(mime: &str) -> Option<MediaKind> {
    if mime.starts_with("image/") {
        Some(MediaKind::Photo)
    } else if mime.starts_with("video/") {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Stable album id for a directory
pub fn bucket_id_for_dir(dir: &Path) -> String {
    let digest = Sha256::digest(dir.to_string_lossy().to_lowercase().as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

impl SqliteMediaStore {
    /// Indexes `path` synchronously. Returns the locator, or `None` when the file is
    /// not media.
    pub fn index_file(&self, path: &Path) -> StoreResult<Option<String>> {
        let Some(mime) = guess_mime_from_ext(path) else {
            log::debug!("Not a media file: {:?}", path);
            return Ok(None);
        };
        let Some(kind) = kind_for_mime(mime) else {
            return Ok(None);
        };

        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(StoreError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            )));
        }
        let modified_at = chrono::DateTime::<chrono::Utc>::from(metadata.modified()?).timestamp();

        let (width, height) = match kind {
            MediaKind::Photo => match image::image_dimensions(path) {
                Ok((w, h)) => (Some(w as i32), Some(h as i32)),
                Err(e) => {
                    log::warn!("Could not read dimensions of {:?}: {}", path, e);
                    (None, None)
                }
            },
            MediaKind::Video => (None, None),
        };

        let parent = path.parent().unwrap_or_else(|| Path::new("/"));
        let record = NewRecord {
            id: None,
            data_path: path.to_string_lossy().to_string(),
            kind: Some(kind),
            mime_type: Some(mime.to_string()),
            modified_at,
            width,
            height,
            duration_ms: None,
            display_name: path.file_name().map(|n| n.to_string_lossy().to_string()),
            bucket_id: Some(bucket_id_for_dir(parent)),
            bucket_display_name: parent.file_name().map(|n| n.to_string_lossy().to_string()),
        };

        let id = self.insert_record(&record)?;
        let uri = self.locator(kind, id);
        log::info!("Indexed {:?} as {}", path, uri);
        Ok(Some(uri))
    }
}

impl MediaScanner for SqliteMediaStore {
    fn scan_file(&self, path: &Path, on_complete: ScanCallback) {
        let store = self.clone();
        let path = path.to_path_buf();

        std::thread::spawn(move || {
            let uri = match store.index_file(&path) {
                Ok(uri) => uri,
                Err(e) => {
                    log::error!("Scan of {:?} failed: {}", path, e);
                    None
                }
            };
            on_complete(uri);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Predicate, RecordQuery};
    use crate::traits::RecordStore;
    use std::sync::mpsc;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime_from_ext(Path::new("a/b.JPG")), Some("image/jpeg"));
        assert_eq!(guess_mime_from_ext(Path::new("clip.mp4")), Some("video/mp4"));
        assert_eq!(guess_mime_from_ext(Path::new("notes.txt")), None);
        assert_eq!(guess_mime_from_ext(Path::new("README")), None);
    }

    #[test]
    fn test_bucket_id_is_stable() {
        let a = bucket_id_for_dir(Path::new("/storage/Pictures"));
        let b = bucket_id_for_dir(Path::new("/storage/pictures"));
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_ne!(a, bucket_id_for_dir(Path::new("/storage/Movies")));
    }

    #[test]
    fn test_scan_indexes_photo() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteMediaStore::open_in_memory(dir.path()).unwrap();
        let photo = dir.path().join("photo.png");
        image::RgbImage::from_pixel(40, 30, image::Rgb([0, 0, 0]))
            .save(&photo)
            .unwrap();

        let (tx, rx) = mpsc::channel();
        store.scan_file(&photo, Box::new(move |uri| tx.send(uri).unwrap()));
        let uri = rx.recv().unwrap().unwrap();
        assert!(uri.starts_with("content://media/external/images/media/"));

        let query = RecordQuery::new().with(Predicate::MediaKindIn(vec![MediaKind::Photo]));
        let mut cursor = store.query(&query).unwrap();
        let record = cursor.next_record().unwrap().unwrap();
        assert_eq!(record.width, Some(40));
        assert_eq!(record.height, Some(30));
        assert_eq!(record.display_name.as_deref(), Some("photo.png"));
        assert_eq!(uri, format!("{}/{}", crate::IMAGES_CONTENT_URI, record.id));
    }

    #[test]
    fn test_scan_uses_configured_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteMediaStore::open_in_memory(dir.path())
            .unwrap()
            .with_uri_bases("app://images/", "app://videos");
        let clip = dir.path().join("clip.mp4");
        std::fs::write(&clip, b"frames").unwrap();

        let uri = store.index_file(&clip).unwrap().unwrap();
        assert!(uri.starts_with("app://videos/"));
        assert!(!uri.starts_with("app://videos//"));
    }

    #[test]
    fn test_scan_rejects_non_media() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteMediaStore::open_in_memory(dir.path()).unwrap();
        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();

        let (tx, rx) = mpsc::channel();
        store.scan_file(&text, Box::new(move |uri| tx.send(uri).unwrap()));
        assert_eq!(rx.recv().unwrap(), None);
    }
}
