use super::projector::{AssetProjector, Projection};
use crate::error::Result;
use crate::models::{Album, Asset, ALL_ASSETS_ALBUM_ID};
use media_store::{RecordQuery, RecordStore};
use std::collections::HashMap;
use std::sync::Arc;

/// In-progress album, owned by one aggregation call
#[derive(Debug)]
struct AlbumBuilder {
    id: String,
    title: Option<String>,
    asset_count: usize,
    preview: Option<Asset>,
}

impl AlbumBuilder {
    fn new(id: String, title: Option<String>, asset_count: usize) -> Self {
        Self {
            id,
            title,
            asset_count,
            preview: None,
        }
    }

    fn build(self) -> Album {
        Album {
            id: self.id,
            title: self.title,
            asset_count: self.asset_count,
            preview_assets: self.preview.into_iter().collect(),
        }
    }
}

/// Groups every matching record by album
pub struct AlbumAggregator {
    store: Arc<dyn RecordStore>,
    projector: AssetProjector,
}

impl AlbumAggregator {
    pub fn new(store: Arc<dyn RecordStore>, projector: AssetProjector) -> Self {
        Self { store, projector }
    }

    /// Single pass over all records matched by `query`.
    ///
    /// Returns the whole-library album (id `"-1"`) first, then one album per bucket in
    /// first-seen order. Each preview is the first member in sort order that projects.
    pub fn aggregate(&self, query: &RecordQuery) -> Result<Vec<Album>> {
        let mut cursor = self.store.query(query)?;
        let total = cursor.total_rows();

        let mut all_assets: Option<AlbumBuilder> = None;
        let mut buckets: Vec<AlbumBuilder> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        while let Some(record) = cursor.next_record()? {
            let all = all_assets.get_or_insert_with(|| {
                AlbumBuilder::new(ALL_ASSETS_ALBUM_ID.to_string(), None, total)
            });
            let mut needs_preview = all.preview.is_none();

            let bucket_slot = match record.bucket_id.as_deref() {
                Some(bucket_id) => {
                    let slot = match index.get(bucket_id) {
                        Some(&slot) => {
                            buckets[slot].asset_count += 1;
                            slot
                        }
                        None => {
                            buckets.push(AlbumBuilder::new(
                                bucket_id.to_string(),
                                record.bucket_display_name.clone(),
                                1,
                            ));
                            index.insert(bucket_id.to_string(), buckets.len() - 1);
                            buckets.len() - 1
                        }
                    };
                    needs_preview |= buckets[slot].preview.is_none();
                    Some(slot)
                }
                None => None,
            };

            if !needs_preview {
                continue;
            }

            match self.projector.project(&record)? {
                Projection::Asset(asset) => {
                    if let Some(slot) = bucket_slot {
                        buckets[slot].preview.get_or_insert_with(|| asset.clone());
                    }
                    all.preview.get_or_insert(asset);
                }
                Projection::Skip(reason) => {
                    log::debug!("No preview from record {}: {:?}", record.id, reason);
                }
            }
        }

        let albums: Vec<Album> = all_assets
            .into_iter()
            .chain(buckets)
            .map(AlbumBuilder::build)
            .collect();

        log::info!("Aggregated {} records into {} albums", total, albums.len());
        Ok(albums)
    }
}
