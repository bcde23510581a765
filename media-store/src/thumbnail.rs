use crate::error::StoreResult;
use crate::store::SqliteMediaStore;
use crate::traits::ThumbnailService;
use image::{imageops::FilterType, ImageFormat};
use rusqlite::{params, OptionalExtension};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Bounding box of a mini thumbnail
pub const MINI_THUMBNAIL_WIDTH: u32 = 512;
pub const MINI_THUMBNAIL_HEIGHT: u32 = 384;

/// Extensions checked for a poster frame sitting next to a video
const POSTER_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Finds a poster image with the same stem as the video, if any
pub fn find_poster_frame(video_path: &Path) -> Option<PathBuf> {
    POSTER_EXTENSIONS
        .iter()
        .map(|ext| video_path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

/// Creates a JPEG mini thumbnail from `source` inside `thumbnail_dir`.
/// Returns the path of the written file.
pub fn create_mini_thumbnail(
    source: &Path,
    thumbnail_dir: &Path,
    video_id: i64,
) -> StoreResult<PathBuf> {
    log::debug!("Creating mini thumbnail for video {} from {:?}", video_id, source);

    let img = image::open(source)?;
    let thumb = img.resize(MINI_THUMBNAIL_WIDTH, MINI_THUMBNAIL_HEIGHT, FilterType::Lanczos3);

    let mut buffer = Cursor::new(Vec::new());
    thumb.to_rgb8().write_to(&mut buffer, ImageFormat::Jpeg)?;

    std::fs::create_dir_all(thumbnail_dir)?;
    let thumb_path = thumbnail_dir.join(format!("{}_mini.jpg", video_id));
    std::fs::write(&thumb_path, buffer.into_inner())?;

    log::debug!("Mini thumbnail created: {:?}", thumb_path);
    Ok(thumb_path)
}

impl ThumbnailService for SqliteMediaStore {
    fn request_thumbnail(&self, video_id: i64) -> StoreResult<()> {
        if self.thumbnail_path(video_id)?.is_some() {
            return Ok(());
        }

        let Some(data_path) = self.data_path(video_id)? else {
            log::debug!("No indexed file for video {}", video_id);
            return Ok(());
        };

        let Some(poster) = find_poster_frame(Path::new(&data_path)) else {
            log::debug!("No poster frame next to {}", data_path);
            return Ok(());
        };

        let thumb_path = create_mini_thumbnail(&poster, self.thumbnail_dir(), video_id)?;
        self.insert_thumbnail(video_id, &thumb_path.to_string_lossy())
    }

    fn thumbnail_path(&self, video_id: i64) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let path = conn
            .query_row(
                "SELECT _data FROM video_thumbnails WHERE video_id = ?1",
                params![video_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRecord;

    fn write_poster(path: &Path) {
        let img = image::RgbImage::from_pixel(1024, 768, image::Rgb([200, 40, 40]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_request_generates_from_poster_frame() {
        let dir = tempfile::tempdir().unwrap();
        let thumbs = dir.path().join("thumbs");
        let store = SqliteMediaStore::open_in_memory(&thumbs).unwrap();

        let video_path = dir.path().join("clip.mp4");
        std::fs::write(&video_path, b"not really a video").unwrap();
        write_poster(&dir.path().join("clip.jpg"));

        let mut record = NewRecord::video(7, 100, "b", "Movies");
        record.data_path = video_path.to_string_lossy().to_string();
        store.insert_record(&record).unwrap();

        assert_eq!(store.thumbnail_path(7).unwrap(), None);
        store.request_thumbnail(7).unwrap();

        let path = store.thumbnail_path(7).unwrap().unwrap();
        let (w, h) = image::image_dimensions(&path).unwrap();
        assert!(w <= MINI_THUMBNAIL_WIDTH);
        assert!(h <= MINI_THUMBNAIL_HEIGHT);
    }

    #[test]
    fn test_request_without_poster_leaves_no_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteMediaStore::open_in_memory(dir.path()).unwrap();
        store
            .insert_record(&NewRecord::video(8, 100, "b", "Movies"))
            .unwrap();

        store.request_thumbnail(8).unwrap();
        assert_eq!(store.thumbnail_path(8).unwrap(), None);

        // Unknown ids are not an error either
        store.request_thumbnail(999).unwrap();
    }
}
