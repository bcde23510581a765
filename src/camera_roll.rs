use crate::config::CameraRollConfig;
use crate::error::Result;
use crate::models::{AlbumList, ImportRequest, Page, PhotoQueryParams};
use crate::services::albums::AlbumAggregator;
use crate::services::import::{parse_media_type, resolve_source_path, ImportEngine};
use crate::services::pagination::PaginationEngine;
use crate::services::projector::AssetProjector;
use crate::services::query_builder::QueryBuilder;
use media_store::{MediaScanner, RecordStore, SqliteMediaStore, ThumbnailService};
use std::sync::Arc;

/// Entry point for the calling application.
///
/// Each request runs as its own unit of work on tokio's blocking pool. Nothing but the
/// collaborators and the configuration is shared between requests.
#[derive(Clone)]
pub struct CameraRoll {
    store: Arc<dyn RecordStore>,
    thumbnails: Arc<dyn ThumbnailService>,
    scanner: Arc<dyn MediaScanner>,
    config: Arc<CameraRollConfig>,
}

impl CameraRoll {
    pub fn new(
        store: Arc<dyn RecordStore>,
        thumbnails: Arc<dyn ThumbnailService>,
        scanner: Arc<dyn MediaScanner>,
        config: CameraRollConfig,
    ) -> Self {
        Self {
            store,
            thumbnails,
            scanner,
            config: Arc::new(config),
        }
    }

    /// Uses one SQLite store as record store, thumbnail service and scanner.
    /// The store hands out locators with the configured bases.
    pub fn with_sqlite_store(store: SqliteMediaStore, config: CameraRollConfig) -> Self {
        let store =
            Arc::new(store.with_uri_bases(&config.image_uri_base, &config.video_uri_base));
        Self::new(store.clone(), store.clone(), store, config)
    }

    pub fn config(&self) -> &CameraRollConfig {
        &self.config
    }

    fn projector(&self) -> AssetProjector {
        AssetProjector::new(self.thumbnails.clone(), &self.config)
    }

    /// One page of assets, newest first
    pub async fn get_photos(&self, params: PhotoQueryParams) -> Result<Page> {
        log::debug!("get_photos: {:?}", params);
        let request = QueryBuilder::new(self.config.capabilities).build(&params)?;
        let engine =
            PaginationEngine::new(self.store.clone(), self.projector(), self.config.cursor_mode);

        tokio::task::spawn_blocking(move || engine.fetch_page(&request)).await?
    }

    /// The whole-library album followed by one album per bucket
    pub async fn get_albums(&self) -> Result<AlbumList> {
        log::debug!("get_albums");
        let query = QueryBuilder::new(self.config.capabilities).base_query();
        let aggregator = AlbumAggregator::new(self.store.clone(), self.projector());

        let albums = tokio::task::spawn_blocking(move || aggregator.aggregate(&query)).await??;
        Ok(AlbumList { albums })
    }

    /// Copies the file into the public media directory and returns its public locator
    pub async fn save_to_camera_roll(&self, request: ImportRequest) -> Result<String> {
        log::info!("save_to_camera_roll: {}", request.source_uri);
        let source = resolve_source_path(&request.source_uri)?;
        let kind = parse_media_type(request.media_type.as_deref(), &source)?;

        ImportEngine::new(self.scanner.clone(), &self.config)
            .import_to_library(source, kind)
            .await
    }

    /// [`CameraRoll::get_photos`] over the bridge's parameter and response maps
    pub async fn get_photos_json(&self, params: serde_json::Value) -> Result<serde_json::Value> {
        let page = self.get_photos(PhotoQueryParams::from_value(params)?).await?;
        Ok(serde_json::to_value(page)?)
    }

    /// [`CameraRoll::get_albums`] as the bridge's response map
    pub async fn get_albums_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.get_albums().await?)?)
    }

    /// [`CameraRoll::save_to_camera_roll`] over the bridge's parameter map
    pub async fn save_to_camera_roll_json(&self, request: serde_json::Value) -> Result<String> {
        self.save_to_camera_roll(ImportRequest::from_value(request)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CameraRollError;
    use crate::services::projector::tests::FailingStore;
    use media_store::NewRecord;
    use serde_json::json;

    fn camera_roll(dir: &std::path::Path) -> (SqliteMediaStore, CameraRoll) {
        let store = SqliteMediaStore::open_in_memory(&dir.join("thumbs")).unwrap();
        let config = CameraRollConfig {
            pictures_dir: dir.join("Pictures"),
            movies_dir: dir.join("Movies"),
            ..CameraRollConfig::default()
        };
        let camera_roll = CameraRoll::with_sqlite_store(store.clone(), config);
        (store, camera_roll)
    }

    #[tokio::test]
    async fn test_get_photos_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let (store, camera_roll) = camera_roll(dir.path());
        store.insert_record(&NewRecord::photo(1, 30, "b", "B")).unwrap();
        store.insert_record(&NewRecord::photo(2, 20, "b", "B")).unwrap();

        let response = camera_roll
            .get_photos_json(json!({ "first": 1 }))
            .await
            .unwrap();
        assert_eq!(response["page_info"]["has_next_page"], json!(true));
        assert_eq!(response["page_info"]["end_cursor"], json!("30"));
        assert_eq!(response["assets"][0]["mediaType"], json!("photo"));
        assert_eq!(response["assets"][0]["creationDate"], json!(30));
        assert_eq!(
            response["assets"][0]["uri"],
            json!("content://media/external/images/media/1")
        );
    }

    #[tokio::test]
    async fn test_invalid_parameters_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let (_store, camera_roll) = camera_roll(dir.path());

        let err = camera_roll.get_photos_json(json!([1, 2])).await.unwrap_err();
        assert_eq!(err.code(), "E_INVALID_ARGUMENT");

        let err = camera_roll
            .get_photos(PhotoQueryParams::first(2).after("yesterday"))
            .await
            .unwrap_err();
        assert!(matches!(err, CameraRollError::InvalidArgument(_)));

        let err = camera_roll
            .save_to_camera_roll_json(json!({ "mediaType": "photo" }))
            .await
            .unwrap_err();
        assert!(matches!(err, CameraRollError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = camera_roll(dir.path());
        let camera_roll = CameraRoll::new(
            Arc::new(FailingStore),
            Arc::new(store.clone()),
            Arc::new(store),
            CameraRollConfig::default(),
        );

        let err = camera_roll
            .get_photos(PhotoQueryParams::first(5))
            .await
            .unwrap_err();
        assert!(matches!(err, CameraRollError::StoreUnavailable(_)));
        assert_eq!(err.code(), "E_UNABLE_TO_LOAD");

        let err = camera_roll.get_albums().await.unwrap_err();
        assert!(matches!(err, CameraRollError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_imported_locator_matches_enumeration() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteMediaStore::open_in_memory(&dir.path().join("thumbs")).unwrap();
        let config = CameraRollConfig {
            pictures_dir: dir.path().join("Pictures"),
            movies_dir: dir.path().join("Movies"),
            image_uri_base: "app://media/images".to_string(),
            ..CameraRollConfig::default()
        };
        let camera_roll = CameraRoll::with_sqlite_store(store, config);

        let source = dir.path().join("scan.png");
        std::fs::write(&source, b"not decoded").unwrap();
        let uri = camera_roll
            .save_to_camera_roll(ImportRequest::new(source.to_string_lossy(), None))
            .await
            .unwrap();
        assert!(uri.starts_with("app://media/images/"));

        let page = camera_roll
            .get_photos(PhotoQueryParams::first(1))
            .await
            .unwrap();
        assert_eq!(page.assets[0].uri, uri);
    }

    #[tokio::test]
    async fn test_albums_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let (store, camera_roll) = camera_roll(dir.path());
        store.insert_record(&NewRecord::photo(1, 30, "cam", "Camera")).unwrap();

        let response = camera_roll.get_albums_json().await.unwrap();
        let albums = response["albums"].as_array().unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0]["id"], json!("-1"));
        assert_eq!(albums[1]["title"], json!("Camera"));
        assert_eq!(albums[1]["assetCount"], json!(1));
        assert_eq!(albums[1]["previewAssets"][0]["id"], json!("1"));
    }
}
