use crate::camera_roll::CameraRoll;
use crate::error::Result;
use crate::models::{Album, Asset, PhotoQueryParams, ALL_ASSETS_ALBUM_ID};
use serde::{Deserialize, Serialize};

/// Album selection passed back into [`Gallery::get_photos`]; no id means the whole library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&Album> for AlbumRef {
    fn from(album: &Album) -> Self {
        Self {
            id: Some(album.id.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoOptions {
    pub first: i64,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub mime_types: Option<Vec<String>>,
}

/// Reduced asset for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub uri: String,
    /// Full-resolution locator, videos only
    pub source: Option<String>,
    pub is_video: bool,
    /// `creationDate` scaled by 1000
    pub time_stamp: i64,
}

impl From<Asset> for AssetSummary {
    fn from(asset: Asset) -> Self {
        Self {
            is_video: asset.is_video(),
            time_stamp: asset.creation_date.saturating_mul(1000),
            id: asset.id,
            uri: asset.uri,
            source: asset.source_uri,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoBatch {
    /// Pass as `after` to load the next batch
    pub after: Option<String>,
    pub has_more: bool,
    pub assets: Vec<AssetSummary>,
}

/// Thin wrapper for gallery screens
#[derive(Clone)]
pub struct Gallery {
    camera_roll: CameraRoll,
}

impl Gallery {
    pub fn new(camera_roll: CameraRoll) -> Self {
        Self { camera_roll }
    }

    pub fn get_default_album(&self) -> AlbumRef {
        AlbumRef::default()
    }

    pub async fn get_albums(&self) -> Result<Vec<Album>> {
        Ok(self.camera_roll.get_albums().await?.albums)
    }

    pub async fn get_photos(&self, album: &AlbumRef, options: PhotoOptions) -> Result<PhotoBatch> {
        let album_id = album
            .id
            .as_deref()
            .filter(|id| *id != ALL_ASSETS_ALBUM_ID)
            .map(str::to_string);

        let params = PhotoQueryParams {
            first: Some(options.first),
            after: options.after,
            album_id,
            mime_types: options.mime_types,
            group_types: None,
        };

        let page = self.camera_roll.get_photos(params).await?;
        Ok(PhotoBatch {
            after: page.page_info.end_cursor,
            has_more: page.page_info.has_next_page,
            assets: page.assets.into_iter().map(AssetSummary::from).collect(),
        })
    }
}
