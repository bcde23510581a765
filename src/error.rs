use media_store::StoreError;
use std::fmt;

/// Central error type for camera roll requests
#[derive(Debug)]
pub enum CameraRollError {
    /// Missing or malformed request parameters
    InvalidArgument(String),
    /// Record store or filesystem access refused by the platform
    PermissionDenied(String),
    /// The record store produced no cursor
    StoreUnavailable(String),
    /// The destination directory cannot be prepared
    StorageUnavailable(String),
    /// Copy failure
    IoError(std::io::Error),
    /// The rescan did not yield a locator
    ImportFailed(String),
    /// A filter or grouping mode this platform cannot express
    UnsupportedOption(String),
    /// Background task failure
    Other(String),
}

impl fmt::Display for CameraRollError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CameraRollError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CameraRollError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            CameraRollError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            CameraRollError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            CameraRollError::IoError(e) => write!(f, "IO error: {}", e),
            CameraRollError::ImportFailed(msg) => write!(f, "Import failed: {}", msg),
            CameraRollError::UnsupportedOption(msg) => write!(f, "Unsupported option: {}", msg),
            CameraRollError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CameraRollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraRollError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraRollError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            CameraRollError::PermissionDenied(e.to_string())
        } else {
            CameraRollError::IoError(e)
        }
    }
}

impl From<StoreError> for CameraRollError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::PermissionDenied(msg) => CameraRollError::PermissionDenied(msg),
            other => CameraRollError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CameraRollError {
    fn from(e: serde_json::Error) -> Self {
        CameraRollError::InvalidArgument(e.to_string())
    }
}

impl From<tokio::task::JoinError> for CameraRollError {
    fn from(e: tokio::task::JoinError) -> Self {
        CameraRollError::Other(format!("Task join error: {}", e))
    }
}

/// Error codes handed to the calling application
impl CameraRollError {
    pub fn code(&self) -> &'static str {
        match self {
            CameraRollError::InvalidArgument(_) => "E_INVALID_ARGUMENT",
            CameraRollError::PermissionDenied(_) => "E_UNABLE_TO_LOAD_PERMISSION",
            CameraRollError::StoreUnavailable(_) | CameraRollError::StorageUnavailable(_) => {
                "E_UNABLE_TO_LOAD"
            }
            CameraRollError::IoError(_) | CameraRollError::ImportFailed(_) => "E_UNABLE_TO_SAVE",
            CameraRollError::UnsupportedOption(_) => "E_UNSUPPORTED_OPTION",
            CameraRollError::Other(_) => "E_UNKNOWN",
        }
    }
}

pub type Result<T> = std::result::Result<T, CameraRollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_permission_maps_to_permission_denied() {
        let err: CameraRollError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, CameraRollError::PermissionDenied(_)));
        assert_eq!(err.code(), "E_UNABLE_TO_LOAD_PERMISSION");

        let err: CameraRollError = std::io::Error::other("disk on fire").into();
        assert!(matches!(err, CameraRollError::IoError(_)));
        assert_eq!(err.code(), "E_UNABLE_TO_SAVE");
    }

    #[test]
    fn test_store_errors() {
        let err: CameraRollError = StoreError::Unavailable("no cursor".to_string()).into();
        assert!(matches!(err, CameraRollError::StoreUnavailable(_)));

        let err: CameraRollError = StoreError::PermissionDenied("READ_MEDIA".to_string()).into();
        assert!(matches!(err, CameraRollError::PermissionDenied(ref m) if m == "READ_MEDIA"));
    }
}
