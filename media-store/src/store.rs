use crate::error::{StoreError, StoreResult};
use crate::models::{AssetRecord, MediaKind, NewRecord};
use crate::query::{Predicate, RecordQuery, SortOrder};
use crate::schema::init_media_schema;
use crate::traits::{RecordCursor, RecordStore, VecRecordCursor};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite-backed media index.
///
/// Implements [`RecordStore`], [`ThumbnailService`](crate::ThumbnailService) and
/// [`MediaScanner`](crate::MediaScanner) over one shared connection. Clones share the
/// same database.
#[derive(Clone)]
pub struct SqliteMediaStore {
    conn: Arc<Mutex<Connection>>,
    thumbnail_dir: PathBuf,
    image_uri_base: String,
    video_uri_base: String,
}

impl std::fmt::Debug for SqliteMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteMediaStore")
            .field("thumbnail_dir", &self.thumbnail_dir)
            .field("image_uri_base", &self.image_uri_base)
            .field("video_uri_base", &self.video_uri_base)
            .finish_non_exhaustive()
    }
}

impl SqliteMediaStore {
    /// Opens (or creates) the media index at `db_path`
    pub fn open(db_path: &Path, thumbnail_dir: &Path) -> StoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::from_connection(conn, thumbnail_dir)
    }

    /// In-memory index, mainly for tests and ephemeral hosts
    pub fn open_in_memory(thumbnail_dir: &Path) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, thumbnail_dir)
    }

    fn from_connection(conn: Connection, thumbnail_dir: &Path) -> StoreResult<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        init_media_schema(&conn)?;
        log::debug!("Media index ready, thumbnails in {:?}", thumbnail_dir);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            thumbnail_dir: thumbnail_dir.to_path_buf(),
            image_uri_base: MediaKind::Photo.content_uri_base().to_string(),
            video_uri_base: MediaKind::Video.content_uri_base().to_string(),
        })
    }

    /// Replaces the locator bases handed out by the scanner
    pub fn with_uri_bases(mut self, image_uri_base: &str, video_uri_base: &str) -> Self {
        self.image_uri_base = image_uri_base.trim_end_matches('/').to_string();
        self.video_uri_base = video_uri_base.trim_end_matches('/').to_string();
        self
    }

    pub fn thumbnail_dir(&self) -> &Path {
        &self.thumbnail_dir
    }

    /// Public locator of the record `id`
    pub fn locator(&self, kind: MediaKind, id: i64) -> String {
        let base = match kind {
            MediaKind::Photo => &self.image_uri_base,
            MediaKind::Video => &self.video_uri_base,
        };
        format!("{}/{}", base, id)
    }

    pub(crate) fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("media index lock poisoned".to_string()))
    }

    /// Inserts a row, or updates the row already indexed for the same file path.
    /// Returns the row id.
    pub fn insert_record(&self, record: &NewRecord) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO files (_id, _data, date_modified, mime_type, media_type, width, height, duration, _display_name, bucket_id, bucket_display_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(_data) DO UPDATE SET
                date_modified = excluded.date_modified,
                mime_type = excluded.mime_type,
                media_type = excluded.media_type,
                width = excluded.width,
                height = excluded.height,
                duration = excluded.duration,
                _display_name = excluded._display_name,
                bucket_id = excluded.bucket_id,
                bucket_display_name = excluded.bucket_display_name",
            params![
                record.id,
                &record.data_path,
                record.modified_at,
                &record.mime_type,
                record.kind.map(MediaKind::store_code).unwrap_or(0),
                record.width,
                record.height,
                record.duration_ms,
                &record.display_name,
                &record.bucket_id,
                &record.bucket_display_name,
            ],
        )?;

        let id = conn.query_row(
            "SELECT _id FROM files WHERE _data = ?1",
            params![&record.data_path],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Registers an existing thumbnail file for a video
    pub fn insert_thumbnail(&self, video_id: i64, path: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO video_thumbnails (video_id, _data) VALUES (?1, ?2)",
            params![video_id, path],
        )?;
        Ok(())
    }

    /// File path stored for a record
    pub fn data_path(&self, id: i64) -> StoreResult<Option<String>> {
        let conn = self.lock()?;
        let path = conn
            .query_row(
                "SELECT _data FROM files WHERE _id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(path)
    }
}

impl RecordStore for SqliteMediaStore {
    fn query(&self, query: &RecordQuery) -> StoreResult<Box<dyn RecordCursor>> {
        let (sql, args) = render_query(query);
        log::debug!("Media query: {} {:?}", sql, args);

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            match row? {
                Some(record) => records.push(record),
                None => log::debug!("Skipping non-media row"),
            }
        }

        Ok(Box::new(VecRecordCursor::new(records)))
    }
}

/// Renders a query into SQL text plus positional arguments
fn render_query(query: &RecordQuery) -> (String, Vec<Value>) {
    let dimensions = if query.include_dimensions {
        "width, height"
    } else {
        "NULL AS width, NULL AS height"
    };

    let mut selection = String::from("1");
    let mut args: Vec<Value> = Vec::new();

    for predicate in &query.predicates {
        match predicate {
            Predicate::MediaKindIn(kinds) => {
                if kinds.is_empty() {
                    selection.push_str(" AND 0");
                    continue;
                }
                selection.push_str(" AND media_type IN (");
                selection.push_str(&placeholders(kinds.len()));
                selection.push(')');
                args.extend(kinds.iter().map(|k| Value::Integer(k.store_code() as i64)));
            }
            Predicate::ModifiedBefore(t) => {
                selection.push_str(" AND date_modified < ?");
                args.push(Value::Integer(*t));
            }
            Predicate::PositionBefore { modified_at, id } => {
                selection.push_str(" AND (date_modified < ? OR (date_modified = ? AND _id < ?))");
                args.push(Value::Integer(*modified_at));
                args.push(Value::Integer(*modified_at));
                args.push(Value::Integer(*id));
            }
            Predicate::BucketEquals(bucket) => {
                selection.push_str(" AND bucket_id = ?");
                args.push(Value::Text(bucket.clone()));
            }
            Predicate::MimeTypeIn(mime_types) => {
                if mime_types.is_empty() {
                    selection.push_str(" AND 0");
                    continue;
                }
                selection.push_str(" AND mime_type IN (");
                selection.push_str(&placeholders(mime_types.len()));
                selection.push(')');
                args.extend(mime_types.iter().cloned().map(Value::Text));
            }
        }
    }

    let order = match query.sort {
        SortOrder::ModifiedDescending => "date_modified DESC, _id DESC",
    };

    let mut sql = format!(
        "SELECT _id, date_modified, mime_type, media_type, {}, duration, _display_name, bucket_id, bucket_display_name
         FROM files WHERE {} ORDER BY {}",
        dimensions, selection, order
    );
    // Limits beyond SQLite's integer range mean "no limit"
    if let Some(limit) = query.limit.and_then(|l| i64::try_from(l).ok()) {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    (sql, args)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Option<AssetRecord>> {
    let media_type: i32 = row.get(3)?;
    let Some(kind) = MediaKind::from_store_code(media_type) else {
        return Ok(None);
    };

    Ok(Some(AssetRecord {
        id: row.get(0)?,
        kind,
        mime_type: row.get(2)?,
        modified_at: row.get(1)?,
        width: row.get(4)?,
        height: row.get(5)?,
        duration_ms: row.get(6)?,
        display_name: row.get(7)?,
        bucket_id: row.get(8)?,
        bucket_display_name: row.get(9)?,
    }))
}
