//! # Camera Roll
//!
//! Exposes a device's media library to a calling application.
//!
//! This crate provides:
//! - Paginated, filterable enumeration of photos and videos ([`CameraRoll::get_photos`])
//! - Album listing with counts and one preview per album ([`CameraRoll::get_albums`])
//! - Import of external files into the public media directories with collision-safe
//!   naming ([`CameraRoll::save_to_camera_roll`])
//! - A reduced [`Gallery`] wrapper for list screens
//!
//! The record store, thumbnail service and rescan notifier are traits from the
//! `media-store` crate; [`media_store::SqliteMediaStore`] implements all three.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use camera_roll::{CameraRoll, CameraRollConfig, PhotoQueryParams};
//! use media_store::SqliteMediaStore;
//!
//! camera_roll::logging::init_logging();
//! let store = SqliteMediaStore::open("media.db".as_ref(), "thumbs".as_ref())?;
//! let camera_roll = CameraRoll::with_sqlite_store(store, CameraRollConfig::default());
//!
//! let page = camera_roll.get_photos(PhotoQueryParams::first(20)).await?;
//! if let Some(cursor) = page.page_info.end_cursor {
//!     let next = camera_roll
//!         .get_photos(PhotoQueryParams::first(20).after(cursor))
//!         .await?;
//! }
//! ```

pub mod camera_roll;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use camera_roll::CameraRoll;
pub use config::{CameraRollConfig, CursorMode, MissingThumbnail, StoreCapabilities};
pub use error::{CameraRollError, Result};
pub use models::{
    Album, AlbumList, Asset, ImportRequest, Page, PageInfo, PhotoQueryParams, ALL_ASSETS_ALBUM_ID,
};
pub use services::{AlbumRef, AssetSummary, Gallery, PhotoBatch, PhotoOptions};
