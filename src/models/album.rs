use super::asset::Asset;
use serde::{Deserialize, Serialize};

/// Id of the pseudo-album holding every matching record
pub const ALL_ASSETS_ALBUM_ID: &str = "-1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub asset_count: usize,
    /// At most one asset: the first resolvable member in store order
    pub preview_assets: Vec<Asset>,
}

impl Album {
    pub fn is_all_assets(&self) -> bool {
        self.id == ALL_ASSETS_ALBUM_ID
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AlbumList {
    pub albums: Vec<Album>,
}
