use crate::config::CameraRollConfig;
use crate::error::{CameraRollError, Result};
use media_store::{guess_mime_from_ext, kind_for_mime, MediaKind, MediaScanner};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Copies external files into the public media directories and gets them indexed
#[derive(Clone)]
pub struct ImportEngine {
    scanner: Arc<dyn MediaScanner>,
    pictures_dir: PathBuf,
    movies_dir: PathBuf,
}

impl ImportEngine {
    pub fn new(scanner: Arc<dyn MediaScanner>, config: &CameraRollConfig) -> Self {
        Self {
            scanner,
            pictures_dir: config.pictures_dir.clone(),
            movies_dir: config.movies_dir.clone(),
        }
    }

    pub fn destination_dir(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Photo => &self.pictures_dir,
            MediaKind::Video => &self.movies_dir,
        }
    }

    /// Copies `source` into the library and waits for the rescan. Returns the public locator.
    pub async fn import_to_library(&self, source: PathBuf, kind: MediaKind) -> Result<String> {
        let engine = self.clone();
        let destination =
            tokio::task::spawn_blocking(move || engine.copy_to_library(&source, kind)).await??;
        self.rescan(&destination).await
    }

    /// Prepares the destination directory, claims a free file name and copies the bytes.
    /// Returns the destination path.
    pub fn copy_to_library(&self, source: &Path, kind: MediaKind) -> Result<PathBuf> {
        log::debug!("=== copy_to_library called ===");
        log::debug!("Source: {:?}, kind: {}", source, kind);

        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                CameraRollError::InvalidArgument(format!("No file name in {:?}", source))
            })?;

        let export_dir = self.destination_dir(kind);
        prepare_directory(export_dir)?;

        let mut input = File::open(source)?;
        let (destination, mut output) = create_unique_file(export_dir, file_name)?;
        log::debug!("Destination: {:?}", destination);

        let copied = std::io::copy(&mut input, &mut output)?;
        output.sync_all()?;

        log::info!("Copied {} bytes to {:?}", copied, destination);
        Ok(destination)
    }

    /// Requests a rescan of `path` and waits for its locator
    pub async fn rescan(&self, path: &Path) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        self.scanner.scan_file(
            path,
            Box::new(move |uri| {
                let _ = tx.send(uri);
            }),
        );

        match rx.await {
            Ok(Some(uri)) => {
                log::info!("Scan of {:?} completed: {}", path, uri);
                Ok(uri)
            }
            Ok(None) | Err(_) => {
                log::warn!("Scan of {:?} yielded no locator", path);
                Err(CameraRollError::ImportFailed(
                    "Could not add media to gallery".to_string(),
                ))
            }
        }
    }
}

/// Creates the directory if needed; it must end up being a directory
fn prepare_directory(dir: &Path) -> Result<()> {
    check_directory(dir, fs::create_dir_all(dir))
}

/// Refused access is reported as such, anything else as unavailable storage
fn check_directory(dir: &Path, created: std::io::Result<()>) -> Result<()> {
    if let Err(e) = created {
        if e.kind() == ErrorKind::PermissionDenied {
            log::error!("Access to {:?} refused: {}", dir, e);
            return Err(e.into());
        }
        log::warn!("Could not create {:?}: {}", dir, e);
    }
    if !dir.is_dir() {
        return Err(CameraRollError::StorageUnavailable(format!(
            "External media storage directory not available: {}",
            dir.display()
        )));
    }
    Ok(())
}

/// Splits a file name at its last `.` into stem and extension (with the dot)
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => file_name.split_at(dot),
        None => (file_name, ""),
    }
}

/// Atomically creates a file named `file_name` in `dir`, or `stem_0.ext`, `stem_1.ext`, ...
/// when taken. Each candidate is claimed with a single exclusive create.
pub fn create_unique_file(dir: &Path, file_name: &str) -> std::io::Result<(PathBuf, File)> {
    let (stem, ext) = split_file_name(file_name);
    let mut candidate = dir.join(file_name);
    let mut n: u64 = 0;

    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("{:?} already exists", candidate);
                candidate = dir.join(format!("{}_{}{}", stem, n, ext));
                n += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Turns the caller's source locator into a filesystem path
pub fn resolve_source_path(source_uri: &str) -> Result<PathBuf> {
    if source_uri.trim().is_empty() {
        return Err(CameraRollError::InvalidArgument(
            "sourceUri is required".to_string(),
        ));
    }

    match url::Url::parse(source_uri) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|_| {
            CameraRollError::InvalidArgument(format!("Not a local file: {}", source_uri))
        }),
        // Single-letter schemes are Windows drive letters
        Ok(url) if url.scheme().len() > 1 => Err(CameraRollError::InvalidArgument(format!(
            "Unsupported source scheme: {}",
            url.scheme()
        ))),
        _ => Ok(PathBuf::from(source_uri)),
    }
}

/// Parses the requested media type, inferring it from the extension when absent
pub fn parse_media_type(media_type: Option<&str>, source: &Path) -> Result<MediaKind> {
    match media_type {
        Some("photo") => Ok(MediaKind::Photo),
        Some("video") => Ok(MediaKind::Video),
        Some(other) => Err(CameraRollError::InvalidArgument(format!(
            "Unknown media type: {:?}",
            other
        ))),
        None => Ok(guess_mime_from_ext(source)
            .and_then(kind_for_mime)
            .unwrap_or(MediaKind::Photo)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_store::ScanCallback;

    /// Scanner answering with a fixed locator (or none)
    struct FixedScanner(Option<String>);

    impl MediaScanner for FixedScanner {
        fn scan_file(&self, _path: &Path, on_complete: ScanCallback) {
            on_complete(self.0.clone());
        }
    }

    fn engine(dir: &Path, answer: Option<&str>) -> ImportEngine {
        let config = CameraRollConfig {
            pictures_dir: dir.join("Pictures"),
            movies_dir: dir.join("Movies"),
            ..CameraRollConfig::default()
        };
        ImportEngine::new(Arc::new(FixedScanner(answer.map(str::to_string))), &config)
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_file_name("README"), ("README", ""));
        assert_eq!(split_file_name(".hidden"), ("", ".hidden"));
    }

    #[test]
    fn test_collisions_get_numbered_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let names: Vec<String> = (0..3)
            .map(|_| {
                let (path, _file) = create_unique_file(dir.path(), "photo.jpg").unwrap();
                path.file_name().unwrap().to_string_lossy().to_string()
            })
            .collect();
        assert_eq!(names, vec!["photo.jpg", "photo_0.jpg", "photo_1.jpg"]);

        let (path, _file) = create_unique_file(dir.path(), "notes").unwrap();
        assert_eq!(path, dir.path().join("notes"));
        let (path, _file) = create_unique_file(dir.path(), "notes").unwrap();
        assert_eq!(path, dir.path().join("notes_0"));
    }

    #[test]
    fn test_copy_preserves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("clip.mp4");
        fs::write(&source, b"\x00\x01video bytes").unwrap();

        let engine = engine(dir.path(), None);
        let destination = engine.copy_to_library(&source, MediaKind::Video).unwrap();
        assert_eq!(destination, dir.path().join("Movies").join("clip.mp4"));
        assert_eq!(fs::read(&destination).unwrap(), b"\x00\x01video bytes");
    }

    #[test]
    fn test_destination_that_is_a_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Pictures"), b"in the way").unwrap();
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let err = engine(dir.path(), None)
            .copy_to_library(&source, MediaKind::Photo)
            .unwrap_err();
        assert!(matches!(err, CameraRollError::StorageUnavailable(_)));
    }

    #[test]
    fn test_refused_directory_is_permission_denied() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("Pictures");
        let refused = std::io::Error::from(ErrorKind::PermissionDenied);

        let err = check_directory(&pictures, Err(refused)).unwrap_err();
        assert!(matches!(err, CameraRollError::PermissionDenied(_)));
        assert_eq!(err.code(), "E_UNABLE_TO_LOAD_PERMISSION");

        let other = std::io::Error::from(ErrorKind::Other);
        let err = check_directory(&pictures, Err(other)).unwrap_err();
        assert!(matches!(err, CameraRollError::StorageUnavailable(_)));
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = engine(dir.path(), None)
            .copy_to_library(&dir.path().join("gone.jpg"), MediaKind::Photo)
            .unwrap_err();
        assert!(matches!(err, CameraRollError::IoError(_)));
        assert!(!dir.path().join("Pictures").join("gone.jpg").exists());
    }

    #[tokio::test]
    async fn test_import_resolves_scanned_locator() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let engine = engine(dir.path(), Some("content://media/external/images/media/12"));
        let uri = engine
            .import_to_library(source, MediaKind::Photo)
            .await
            .unwrap();
        assert_eq!(uri, "content://media/external/images/media/12");
    }

    #[tokio::test]
    async fn test_rejected_scan_fails_import() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        fs::write(&source, b"jpeg").unwrap();

        let err = engine(dir.path(), None)
            .import_to_library(source, MediaKind::Photo)
            .await
            .unwrap_err();
        assert!(matches!(err, CameraRollError::ImportFailed(_)));
        // The copy stays where it is
        assert!(dir.path().join("Pictures").join("photo.jpg").exists());
    }

    #[test]
    fn test_resolve_source_path() {
        assert_eq!(
            resolve_source_path("file:///tmp/a%20b.jpg").unwrap(),
            PathBuf::from("/tmp/a b.jpg")
        );
        assert_eq!(
            resolve_source_path("/tmp/plain.jpg").unwrap(),
            PathBuf::from("/tmp/plain.jpg")
        );
        assert!(matches!(
            resolve_source_path("https://example.com/x.jpg"),
            Err(CameraRollError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve_source_path("  "),
            Err(CameraRollError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_media_type() {
        let clip = Path::new("/x/clip.MP4");
        assert_eq!(parse_media_type(Some("photo"), clip).unwrap(), MediaKind::Photo);
        assert_eq!(parse_media_type(None, clip).unwrap(), MediaKind::Video);
        assert_eq!(
            parse_media_type(None, Path::new("/x/unknown.bin")).unwrap(),
            MediaKind::Photo
        );
        assert!(parse_media_type(Some("audio"), clip).is_err());
    }
}
