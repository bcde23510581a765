use crate::error::{CameraRollError, Result};
use media_store::{IMAGES_CONTENT_URI, VIDEO_CONTENT_URI};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the record store can provide, checked once and injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreCapabilities {
    /// The width/height columns exist on this platform
    pub dimension_columns: bool,
}

impl Default for StoreCapabilities {
    fn default() -> Self {
        Self {
            dimension_columns: true,
        }
    }
}

/// What to do with a video whose thumbnail cannot be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingThumbnail {
    /// Drop the record; the page is backfilled from later rows
    #[default]
    Skip,
    /// Use the full-resolution video locator as `uri`
    Source,
}

/// How `end_cursor` is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    /// `"<modifiedAt>"`
    #[default]
    Timestamp,
    /// `"<modifiedAt>:<id>"`, safe across timestamp ties
    Composite,
}

/// Configuration for the camera roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRollConfig {
    /// Destination for imported photos
    pub pictures_dir: PathBuf,
    /// Destination for imported videos
    pub movies_dir: PathBuf,
    pub missing_thumbnail: MissingThumbnail,
    pub cursor_mode: CursorMode,
    /// Base of the canonical photo locator
    pub image_uri_base: String,
    /// Base of the canonical video locator
    pub video_uri_base: String,
    pub capabilities: StoreCapabilities,
}

impl Default for CameraRollConfig {
    fn default() -> Self {
        Self {
            pictures_dir: default_pictures_dir(),
            movies_dir: default_movies_dir(),
            missing_thumbnail: MissingThumbnail::default(),
            cursor_mode: CursorMode::default(),
            image_uri_base: IMAGES_CONTENT_URI.to_string(),
            video_uri_base: VIDEO_CONTENT_URI.to_string(),
            capabilities: StoreCapabilities::default(),
        }
    }
}

impl CameraRollConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(|e| CameraRollError::InvalidArgument(format!("Invalid configuration: {}", e)))
    }

    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reads a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loaded configuration from {:?}", path);
        Self::from_toml(&content)
    }
}

/// Public pictures directory for the current platform
pub fn default_pictures_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        PathBuf::from("/storage/emulated/0/Pictures")
    }

    #[cfg(not(target_os = "android"))]
    {
        dirs::picture_dir().unwrap_or_else(|| PathBuf::from("./data/Pictures"))
    }
}

/// Public movies directory for the current platform
pub fn default_movies_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        PathBuf::from("/storage/emulated/0/Movies")
    }

    #[cfg(not(target_os = "android"))]
    {
        dirs::video_dir().unwrap_or_else(|| PathBuf::from("./data/Movies"))
    }
}
