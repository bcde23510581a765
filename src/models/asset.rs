use media_store::MediaKind;
use serde::{Deserialize, Serialize};

/// A media asset as returned to the calling application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    /// Displayable locator; never empty
    pub uri: String,
    /// Full-resolution locator, videos only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    /// `-1.0` when unknown
    pub width: f64,
    /// `-1.0` when unknown
    pub height: f64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub media_type: MediaKind,
    /// Store-native modification time, passed through untouched
    pub creation_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
}

impl Asset {
    pub fn is_video(&self) -> bool {
        self.media_type == MediaKind::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys() {
        let asset = Asset {
            id: "42".to_string(),
            uri: "file:///thumbs/42_mini.jpg".to_string(),
            source_uri: Some("content://media/external/video/media/42".to_string()),
            width: -1.0,
            height: -1.0,
            filename: "VID_42.mp4".to_string(),
            mime_type: Some("video/mp4".to_string()),
            media_type: MediaKind::Video,
            creation_date: 1_700_000_000,
            duration_ms: Some(5000),
        };

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["sourceUri"], "content://media/external/video/media/42");
        assert_eq!(json["mediaType"], "video");
        assert_eq!(json["mimeType"], "video/mp4");
        assert_eq!(json["creationDate"], 1_700_000_000i64);
        assert_eq!(json["durationMs"], 5000);
        assert_eq!(json["width"], -1.0);
        assert!(asset.is_video());
    }
}
