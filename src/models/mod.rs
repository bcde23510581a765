pub mod album;
pub mod asset;
pub mod page;
pub mod params;

pub use album::{Album, AlbumList, ALL_ASSETS_ALBUM_ID};
pub use asset::Asset;
pub use page::{Page, PageInfo};
pub use params::{ImportRequest, PhotoQueryParams};
