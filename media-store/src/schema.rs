use rusqlite::{Connection, Result};

/// Initialize the media index schema
pub fn init_media_schema(conn: &Connection) -> Result<()> {
    // Schema version table for the media index
    conn.execute(
        "CREATE TABLE IF NOT EXISTS media_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM media_schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        create_media_schema_v1(conn)?;
        conn.execute("INSERT INTO media_schema_version (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Create media index schema version 1
fn create_media_schema_v1(conn: &Connection) -> Result<()> {
    // Table: files - one row per file known to the index, media or not
    conn.execute(
        "CREATE TABLE IF NOT EXISTS files (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            _data TEXT NOT NULL UNIQUE,
            date_modified INTEGER NOT NULL DEFAULT 0,
            mime_type TEXT,
            media_type INTEGER NOT NULL DEFAULT 0 CHECK(media_type IN (0, 1, 2, 3, 4)),
            width INTEGER,
            height INTEGER,
            duration INTEGER,
            _display_name TEXT,
            bucket_id TEXT,
            bucket_display_name TEXT
        )",
        [],
    )?;

    // Index backing the modified-descending enumeration order
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_files_date_modified ON files(date_modified DESC, _id DESC)",
        [],
    )?;

    // Index for album filtering and grouping
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_files_bucket ON files(bucket_id)",
        [],
    )?;

    // Table: video_thumbnails - generated mini thumbnails keyed by video id
    conn.execute(
        "CREATE TABLE IF NOT EXISTS video_thumbnails (
            video_id INTEGER PRIMARY KEY,
            _data TEXT NOT NULL,
            FOREIGN KEY (video_id) REFERENCES files(_id) ON DELETE CASCADE
        )",
        [],
    )?;

    Ok(())
}
