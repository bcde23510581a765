use super::cursor::PageCursor;
use super::projector::{AssetProjector, Projection};
use super::query_builder::PageRequest;
use crate::config::CursorMode;
use crate::error::Result;
use crate::models::{Page, PageInfo};
use media_store::{AssetRecord, RecordStore};
use std::sync::Arc;

/// Drives a record cursor into one page of assets.
///
/// A window of `limit + 1` rows is read; the extra row only decides `has_next_page`.
/// Rows the projector skips do not count toward the limit: the engine keeps consuming
/// (opening follow-up windows after the last consumed row if needed) until `limit`
/// assets are accepted or the store runs out. When rows remain but none of the consumed
/// ones was accepted, `end_cursor` points at the last consumed row instead.
pub struct PaginationEngine {
    store: Arc<dyn RecordStore>,
    projector: AssetProjector,
    cursor_mode: CursorMode,
}

impl PaginationEngine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        projector: AssetProjector,
        cursor_mode: CursorMode,
    ) -> Self {
        Self {
            store,
            projector,
            cursor_mode,
        }
    }

    pub fn fetch_page(&self, request: &PageRequest) -> Result<Page> {
        let limit = request.limit;
        let mut window_size = limit.saturating_add(1);
        let mut cursor = self.store.query(&request.query.clone().limit(window_size))?;
        let mut window_rows = cursor.total_rows();
        let has_next_page = window_rows > limit;

        let mut assets = Vec::with_capacity(limit.min(window_rows));
        let mut last_accepted: Option<AssetRecord> = None;
        let mut last_consumed: Option<(i64, i64)> = None;
        let mut skipped = 0usize;

        loop {
            while assets.len() < limit {
                let Some(record) = cursor.next_record()? else {
                    break;
                };
                last_consumed = Some((record.modified_at, record.id));

                match self.projector.project(&record)? {
                    Projection::Asset(asset) => {
                        assets.push(asset);
                        last_accepted = Some(record);
                    }
                    Projection::Skip(reason) => {
                        skipped += 1;
                        log::debug!("Record {} skipped: {:?}", record.id, reason);
                    }
                }
            }

            // A short window means the store is exhausted
            if assets.len() >= limit || window_rows < window_size {
                break;
            }
            let Some((modified_at, id)) = last_consumed else {
                break;
            };

            window_size = (limit - assets.len()).saturating_add(1);
            log::debug!(
                "Backfilling {} skipped rows after ({}, {})",
                window_size - 1,
                modified_at,
                id
            );
            cursor = self
                .store
                .query(&request.query.continue_after(modified_at, id, window_size))?;
            window_rows = cursor.total_rows();
            if window_rows == 0 {
                break;
            }
        }

        let end_cursor = match (&last_accepted, last_consumed, has_next_page) {
            (_, _, false) => None,
            (Some(record), _, true) => Some(PageCursor::for_record(record, self.cursor_mode)),
            (None, Some((modified_at, id)), true) => {
                Some(PageCursor::at(modified_at, id, self.cursor_mode))
            }
            (None, None, true) => None,
        }
        .map(|cursor| cursor.to_string());

        log::info!(
            "Fetched {} assets ({} skipped), has_next_page={}",
            assets.len(),
            skipped,
            has_next_page
        );

        Ok(Page {
            assets,
            page_info: PageInfo {
                has_next_page,
                end_cursor,
            },
        })
    }
}
