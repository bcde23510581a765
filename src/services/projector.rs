use crate::config::{CameraRollConfig, MissingThumbnail, StoreCapabilities};
use crate::error::{CameraRollError, Result};
use crate::models::Asset;
use media_store::{AssetRecord, MediaKind, StoreError, ThumbnailService, DIMENSION_UNKNOWN};
use std::sync::Arc;

/// Outcome of projecting one record
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Asset(Asset),
    /// No usable locator; the record is dropped without an error
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingThumbnail,
}

/// Maps raw records to the assets handed to callers
#[derive(Clone)]
pub struct AssetProjector {
    thumbnails: Arc<dyn ThumbnailService>,
    capabilities: StoreCapabilities,
    missing_thumbnail: MissingThumbnail,
    image_uri_base: String,
    video_uri_base: String,
}

impl AssetProjector {
    pub fn new(thumbnails: Arc<dyn ThumbnailService>, config: &CameraRollConfig) -> Self {
        Self {
            thumbnails,
            capabilities: config.capabilities,
            missing_thumbnail: config.missing_thumbnail,
            image_uri_base: config.image_uri_base.trim_end_matches('/').to_string(),
            video_uri_base: config.video_uri_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn project(&self, record: &AssetRecord) -> Result<Projection> {
        match record.kind {
            MediaKind::Photo => Ok(self.project_photo(record)),
            MediaKind::Video => self.project_video(record),
        }
    }

    fn project_photo(&self, record: &AssetRecord) -> Projection {
        let uri = format!("{}/{}", self.image_uri_base, record.id);
        Projection::Asset(self.build_asset(record, uri, None))
    }

    fn project_video(&self, record: &AssetRecord) -> Result<Projection> {
        let source_uri = format!("{}/{}", self.video_uri_base, record.id);

        let uri = match self.resolve_thumbnail(record.id)? {
            Some(path) => format!("file://{}", path),
            None => match self.missing_thumbnail {
                MissingThumbnail::Skip => {
                    log::debug!("Skipping video {}: no thumbnail", record.id);
                    return Ok(Projection::Skip(SkipReason::MissingThumbnail));
                }
                MissingThumbnail::Source => source_uri.clone(),
            },
        };

        Ok(Projection::Asset(self.build_asset(
            record,
            uri,
            Some(source_uri),
        )))
    }

    /// Asks for generation first, then looks the thumbnail up
    fn resolve_thumbnail(&self, video_id: i64) -> Result<Option<String>> {
        if let Err(e) = self.thumbnails.request_thumbnail(video_id) {
            tolerate(e, video_id)?;
        }

        match self.thumbnails.thumbnail_path(video_id) {
            Ok(path) => Ok(path.filter(|p| !p.is_empty())),
            Err(e) => tolerate(e, video_id).map(|_| None),
        }
    }

    fn build_asset(&self, record: &AssetRecord, uri: String, source_uri: Option<String>) -> Asset {
        let (width, height) = if self.capabilities.dimension_columns {
            (
                record.width.unwrap_or(DIMENSION_UNKNOWN),
                record.height.unwrap_or(DIMENSION_UNKNOWN),
            )
        } else {
            (DIMENSION_UNKNOWN, DIMENSION_UNKNOWN)
        };

        Asset {
            id: record.id_string(),
            uri,
            source_uri,
            width: f64::from(width),
            height: f64::from(height),
            filename: record.display_name.clone().unwrap_or_default(),
            mime_type: record.mime_type.clone(),
            media_type: record.kind,
            creation_date: record.modified_at,
            duration_ms: match record.kind {
                MediaKind::Video => record.duration_ms,
                MediaKind::Photo => None,
            },
        }
    }
}

/// Thumbnail failures only cost the record its locator, except refused access
fn tolerate(e: StoreError, video_id: i64) -> Result<()> {
    match e {
        StoreError::PermissionDenied(msg) => Err(CameraRollError::PermissionDenied(msg)),
        other => {
            log::warn!("Thumbnail lookup for video {} failed: {}", video_id, other);
            Ok(())
        }
    }
}
