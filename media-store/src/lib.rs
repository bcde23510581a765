//! # Media Store
//!
//! The record store boundary of the camera roll: what a media index looks like to
//! the enumeration and import pipelines, plus a SQLite implementation of it.
//!
//! This crate provides:
//! - The read-only record model ([`AssetRecord`], [`MediaKind`])
//! - A store-independent query description ([`RecordQuery`], [`Predicate`])
//! - Collaborator traits ([`RecordStore`], [`RecordCursor`], [`ThumbnailService`],
//!   [`MediaScanner`])
//! - [`SqliteMediaStore`], which implements all three collaborators over one database
//!
//! ## Platform Separation
//!
//! Platform media indexes (e.g. Android's MediaStore) implement the traits in the
//! host application. The SQLite store covers hosts without one, and the tests.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use media_store::{MediaKind, Predicate, RecordQuery, RecordStore, SqliteMediaStore};
//!
//! let store = SqliteMediaStore::open("media.db".as_ref(), "thumbs".as_ref())?;
//! let query = RecordQuery::new()
//!     .with(Predicate::MediaKindIn(vec![MediaKind::Photo, MediaKind::Video]))
//!     .limit(20);
//! let mut cursor = store.query(&query)?;
//! while let Some(record) = cursor.next_record()? {
//!     println!("{} {}", record.id, record.modified_at);
//! }
//! ```

pub mod error;
pub mod models;
pub mod query;
pub mod scanner;
pub mod schema;
pub mod store;
pub mod thumbnail;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use models::{
    AssetRecord, MediaKind, NewRecord, DIMENSION_UNKNOWN, IMAGES_CONTENT_URI, VIDEO_CONTENT_URI,
};
pub use query::{Predicate, RecordQuery, SortOrder};
pub use scanner::{bucket_id_for_dir, guess_mime_from_ext, kind_for_mime};
pub use schema::init_media_schema;
pub use store::SqliteMediaStore;
pub use thumbnail::{create_mini_thumbnail, find_poster_frame};
pub use traits::{
    MediaScanner, RecordCursor, RecordStore, ScanCallback, ThumbnailService, VecRecordCursor,
};
