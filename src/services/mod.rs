pub mod albums;
pub mod cursor;
pub mod gallery;
pub mod import;
pub mod pagination;
pub mod projector;
pub mod query_builder;

pub use albums::AlbumAggregator;
pub use cursor::PageCursor;
pub use gallery::{AlbumRef, AssetSummary, Gallery, PhotoBatch, PhotoOptions};
pub use import::ImportEngine;
pub use pagination::PaginationEngine;
pub use projector::{AssetProjector, Projection, SkipReason};
pub use query_builder::{PageRequest, QueryBuilder};
