use serde::{Deserialize, Serialize};

/// Canonical locator base for photo records
pub const IMAGES_CONTENT_URI: &str = "content://media/external/images/media";
/// Canonical locator base for video records
pub const VIDEO_CONTENT_URI: &str = "content://media/external/video/media";

/// Sentinel used for width/height when the store has no value
pub const DIMENSION_UNKNOWN: i32 = -1;

/// Kind of media a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Numeric code stored in the `media_type` column
    pub fn store_code(self) -> i32 {
        match self {
            MediaKind::Photo => 1,
            MediaKind::Video => 3,
        }
    }

    /// Maps a `media_type` column value back to a kind; anything else is not media
    pub fn from_store_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(MediaKind::Photo),
            3 => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// Content locator base for records of this kind
    pub fn content_uri_base(self) -> &'static str {
        match self {
            MediaKind::Photo => IMAGES_CONTENT_URI,
            MediaKind::Video => VIDEO_CONTENT_URI,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the record store, read-only from the caller's point of view
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub id: i64,
    pub kind: MediaKind,
    pub mime_type: Option<String>,
    /// Store-native modification time; an opaque sort and cursor key
    pub modified_at: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub display_name: Option<String>,
    pub bucket_id: Option<String>,
    pub bucket_display_name: Option<String>,
    pub duration_ms: Option<i64>,
}

impl AssetRecord {
    /// The store id in its string form, as handed to callers
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }
}

/// Values for a row to be written into the SQLite media index
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// Explicit id; `None` lets the database assign one
    pub id: Option<i64>,
    /// Absolute path of the media file
    pub data_path: String,
    /// `None` stores a non-media row (`media_type = 0`)
    pub kind: Option<MediaKind>,
    pub mime_type: Option<String>,
    pub modified_at: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_ms: Option<i64>,
    pub display_name: Option<String>,
    pub bucket_id: Option<String>,
    pub bucket_display_name: Option<String>,
}

impl NewRecord {
    /// A photo row with the fields most callers care about
    pub fn photo(id: i64, modified_at: i64, bucket_id: &str, bucket_name: &str) -> Self {
        Self {
            id: Some(id),
            data_path: format!("/storage/{}/IMG_{}.jpg", bucket_name, id),
            kind: Some(MediaKind::Photo),
            mime_type: Some("image/jpeg".to_string()),
            modified_at,
            width: Some(4032),
            height: Some(3024),
            duration_ms: None,
            display_name: Some(format!("IMG_{}.jpg", id)),
            bucket_id: Some(bucket_id.to_string()),
            bucket_display_name: Some(bucket_name.to_string()),
        }
    }

    /// A video row with the fields most callers care about
    pub fn video(id: i64, modified_at: i64, bucket_id: &str, bucket_name: &str) -> Self {
        Self {
            id: Some(id),
            data_path: format!("/storage/{}/VID_{}.mp4", bucket_name, id),
            kind: Some(MediaKind::Video),
            mime_type: Some("video/mp4".to_string()),
            modified_at,
            width: Some(1920),
            height: Some(1080),
            duration_ms: Some(12_000),
            display_name: Some(format!("VID_{}.mp4", id)),
            bucket_id: Some(bucket_id.to_string()),
            bucket_display_name: Some(bucket_name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_codes() {
        assert_eq!(MediaKind::from_store_code(1), Some(MediaKind::Photo));
        assert_eq!(MediaKind::from_store_code(3), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_store_code(0), None);
        assert_eq!(MediaKind::from_store_code(2), None);
        assert_eq!(MediaKind::Video.store_code(), 3);
    }

    #[test]
    fn test_media_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MediaKind::Video).unwrap();
        assert_eq!(json, "\"video\"");
    }
}
