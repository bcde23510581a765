use super::cursor::PageCursor;
use crate::config::StoreCapabilities;
use crate::error::{CameraRollError, Result};
use crate::models::PhotoQueryParams;
use media_store::{MediaKind, Predicate, RecordQuery, SortOrder};

/// A validated enumeration request
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Matching records, without the page limit applied
    pub query: RecordQuery,
    /// Number of assets the page should hold
    pub limit: usize,
}

/// Composes record store queries from caller parameters
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    capabilities: StoreCapabilities,
}

impl QueryBuilder {
    pub fn new(capabilities: StoreCapabilities) -> Self {
        Self { capabilities }
    }

    /// Every media record, in store order
    pub fn base_query(&self) -> RecordQuery {
        RecordQuery {
            predicates: vec![Predicate::MediaKindIn(vec![
                MediaKind::Photo,
                MediaKind::Video,
            ])],
            sort: SortOrder::ModifiedDescending,
            limit: None,
            include_dimensions: self.capabilities.dimension_columns,
        }
    }

    /// Validates `params` and turns them into a query plus page size
    pub fn build(&self, params: &PhotoQueryParams) -> Result<PageRequest> {
        if params.group_types.is_some() {
            return Err(CameraRollError::UnsupportedOption(
                "groupTypes is not supported on this platform".to_string(),
            ));
        }

        let limit = match params.first {
            Some(first) if first > 0 => usize::try_from(first).map_err(|_| {
                CameraRollError::InvalidArgument(format!("first is too large: {}", first))
            })?,
            Some(first) => {
                return Err(CameraRollError::InvalidArgument(format!(
                    "first must be positive, got {}",
                    first
                )))
            }
            None => {
                return Err(CameraRollError::InvalidArgument(
                    "first is required".to_string(),
                ))
            }
        };

        let mut query = self.base_query();

        if let Some(cursor) = PageCursor::parse_after(params.after.as_deref())? {
            query.predicates.push(cursor.predicate());
        }

        if let Some(album_id) = params.album_id.as_deref().filter(|id| !id.is_empty()) {
            query
                .predicates
                .push(Predicate::BucketEquals(album_id.to_string()));
        }

        if let Some(mime_types) = params.mime_types.as_ref().filter(|m| !m.is_empty()) {
            query
                .predicates
                .push(Predicate::MimeTypeIn(mime_types.clone()));
        }

        log::debug!("Built query for limit {}: {:?}", limit, query.predicates);
        Ok(PageRequest { query, limit })
    }
}
