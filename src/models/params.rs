use crate::error::{CameraRollError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Parameters of an enumeration request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoQueryParams {
    /// Page size; required and positive
    pub first: Option<i64>,
    /// `end_cursor` of the previous page
    #[serde(default, deserialize_with = "string_or_number")]
    pub after: Option<String>,
    pub album_id: Option<String>,
    pub mime_types: Option<Vec<String>>,
    /// Grouping by asset type; not supported here, only detected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_types: Option<serde_json::Value>,
}

impl PhotoQueryParams {
    pub fn first(first: i64) -> Self {
        Self {
            first: Some(first),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn album(mut self, album_id: impl Into<String>) -> Self {
        self.album_id = Some(album_id.into());
        self
    }

    pub fn mime_types<I, S>(mut self, mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mime_types = Some(mime_types.into_iter().map(Into::into).collect());
        self
    }

    /// Decodes the parameter map sent by the calling application
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(CameraRollError::InvalidArgument(
                "parameters must be a map".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Parameters of an import request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// `file://` URL or plain path of the file to import
    pub source_uri: String,
    /// `"photo"` or `"video"`; inferred from the file extension when absent
    pub media_type: Option<String>,
}

impl ImportRequest {
    pub fn new(source_uri: impl Into<String>, media_type: Option<&str>) -> Self {
        Self {
            source_uri: source_uri.into(),
            media_type: media_type.map(str::to_string),
        }
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Cursors arrive as strings, but some callers send the raw number
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cursor {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Cursor>::deserialize(deserializer)?.map(|c| match c {
        Cursor::Text(s) => s,
        Cursor::Number(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_map() {
        let params = PhotoQueryParams::from_value(json!({
            "first": 20,
            "after": "1700000000",
            "albumId": "-1739773001",
            "mimeTypes": ["image/jpeg", "image/png"]
        }))
        .unwrap();

        assert_eq!(params.first, Some(20));
        assert_eq!(params.after.as_deref(), Some("1700000000"));
        assert_eq!(params.album_id.as_deref(), Some("-1739773001"));
        assert_eq!(params.mime_types.unwrap().len(), 2);
        assert!(params.group_types.is_none());
    }

    #[test]
    fn test_numeric_cursor_is_accepted() {
        let params = PhotoQueryParams::from_value(json!({ "first": 1, "after": 20 })).unwrap();
        assert_eq!(params.after.as_deref(), Some("20"));
    }

    #[test]
    fn test_malformed_maps_are_invalid_arguments() {
        let err = PhotoQueryParams::from_value(json!({ "first": "ten" })).unwrap_err();
        assert!(matches!(err, CameraRollError::InvalidArgument(_)));

        let err = PhotoQueryParams::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CameraRollError::InvalidArgument(_)));

        let err = ImportRequest::from_value(json!({ "mediaType": "photo" })).unwrap_err();
        assert!(matches!(err, CameraRollError::InvalidArgument(_)));
    }
}
