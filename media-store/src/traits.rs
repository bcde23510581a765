use crate::error::StoreResult;
use crate::models::AssetRecord;
use crate::query::RecordQuery;
use std::path::Path;

/// Forward-only cursor over the rows of one query.
///
/// A cursor belongs to the request that opened it and is advanced sequentially;
/// it is `Send` so the request can move to a worker thread, but it is not shared.
pub trait RecordCursor: Send {
    /// Number of rows the query matched, known before iteration starts
    fn total_rows(&self) -> usize;

    /// Advances the cursor; `Ok(None)` once exhausted
    fn next_record(&mut self) -> StoreResult<Option<AssetRecord>>;
}

/// Queryable index of media records
pub trait RecordStore: Send + Sync {
    /// Runs the query. Failing to produce a cursor is an error, zero matching rows is not.
    fn query(&self, query: &RecordQuery) -> StoreResult<Box<dyn RecordCursor>>;
}

/// Thumbnail generation and lookup for video records
pub trait ThumbnailService: Send + Sync {
    /// Asks the platform to generate (or refresh) the thumbnail for a video
    fn request_thumbnail(&self, video_id: i64) -> StoreResult<()>;

    /// Filesystem path of the video's thumbnail, if one exists
    fn thumbnail_path(&self, video_id: i64) -> StoreResult<Option<String>>;
}

/// Completion callback of a rescan; receives the public locator or `None` when
/// the scan did not index the file
pub type ScanCallback = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// File-system rescan notifier
pub trait MediaScanner: Send + Sync {
    /// Requests an asynchronous rescan of `path`. `on_complete` is called exactly once.
    fn scan_file(&self, path: &Path, on_complete: ScanCallback);
}

/// Cursor over rows that were already read into memory
#[derive(Debug)]
pub struct VecRecordCursor {
    total: usize,
    rows: std::vec::IntoIter<AssetRecord>,
}

impl VecRecordCursor {
    pub fn new(rows: Vec<AssetRecord>) -> Self {
        Self {
            total: rows.len(),
            rows: rows.into_iter(),
        }
    }
}

impl RecordCursor for VecRecordCursor {
    fn total_rows(&self) -> usize {
        self.total
    }

    fn next_record(&mut self) -> StoreResult<Option<AssetRecord>> {
        Ok(self.rows.next())
    }
}
