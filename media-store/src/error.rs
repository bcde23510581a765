/// Error type for record store, thumbnail and scanner operations
#[derive(Debug)]
pub enum StoreError {
    /// The platform refused access to the media index
    PermissionDenied(String),
    /// The query produced no cursor at all (distinct from zero matching rows)
    Unavailable(String),
    DatabaseError(rusqlite::Error),
    IoError(std::io::Error),
    ImageError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::DatabaseError(e) => write!(f, "Database error: {}", e),
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
            StoreError::ImageError(msg) => write!(f, "Image error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::DatabaseError(e) => Some(e),
            StoreError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        // SQLITE_AUTH / SQLITE_PERM are how the engine reports refused access
        if let rusqlite::Error::SqliteFailure(code, msg) = &err {
            if matches!(
                code.code,
                rusqlite::ErrorCode::PermissionDenied
                    | rusqlite::ErrorCode::AuthorizationForStatementDenied
            ) {
                return StoreError::PermissionDenied(
                    msg.clone().unwrap_or_else(|| code.to_string()),
                );
            }
        }
        StoreError::DatabaseError(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            StoreError::PermissionDenied(err.to_string())
        } else {
            StoreError::IoError(err)
        }
    }
}

impl From<image::ImageError> for StoreError {
    fn from(err: image::ImageError) -> Self {
        StoreError::ImageError(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
