//! Persistence backends for collected vacancy records.
//!
//! Each backend implements the same `Saver` contract, so the pipeline stays
//! format-agnostic. Writes go through a temp-file-then-rename step: a failed
//! save leaves a pre-existing destination byte-for-byte unchanged.

mod csv;
mod json;
mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use self::csv::CsvSaver;
pub use json::JsonSaver;
pub use types::{SaveError, SaveSummary, Saver};

/// Select a saver by explicit format name.
pub fn for_format(format: &str) -> Result<Arc<dyn Saver>, SaveError> {
    match format.to_ascii_lowercase().as_str() {
        "json" => Ok(Arc::new(JsonSaver)),
        "csv" => Ok(Arc::new(CsvSaver)),
        other => Err(SaveError::UnsupportedFormat(other.to_string())),
    }
}

/// Select a saver from the destination file extension.
pub fn for_destination(destination: &Path) -> Result<Arc<dyn Saver>, SaveError> {
    let extension = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if extension.is_empty() {
        return Err(SaveError::UnsupportedFormat(
            destination.display().to_string(),
        ));
    }
    for_format(extension)
}

/// Write encoded bytes to the destination atomically: temp file in the same
/// directory, then rename over the destination.
pub(crate) async fn write_atomic(destination: &Path, bytes: &[u8]) -> Result<u64, SaveError> {
    let io_err = |source: std::io::Error| SaveError::Io {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    let temp_path = temp_path_for(destination);
    if let Err(e) = tokio::fs::write(&temp_path, bytes).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(io_err(e));
    }
    if let Err(e) = tokio::fs::rename(&temp_path, destination).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(io_err(e));
    }

    Ok(bytes.len() as u64)
}

fn temp_path_for(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    destination.with_file_name(format!(".{file_name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_selection() {
        assert_eq!(for_format("json").unwrap().format(), "json");
        assert_eq!(for_format("CSV").unwrap().format(), "csv");
        assert!(matches!(
            for_format("xlsx"),
            Err(SaveError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_destination_selection() {
        assert_eq!(
            for_destination(Path::new("out/records.json")).unwrap().format(),
            "json"
        );
        assert_eq!(
            for_destination(Path::new("records.csv")).unwrap().format(),
            "csv"
        );
        assert!(for_destination(Path::new("records")).is_err());
        assert!(for_destination(Path::new("records.xml")).is_err());
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.json");

        tokio::fs::write(&destination, b"old").await.unwrap();
        let bytes = write_atomic(&destination, b"new contents").await.unwrap();

        assert_eq!(bytes, 12);
        let contents = tokio::fs::read(&destination).await.unwrap();
        assert_eq!(contents, b"new contents");
        // Temp file must be gone.
        assert!(!temp_path_for(&destination).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_write_leaves_destination_unchanged() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("out.json");
        tokio::fs::write(&destination, b"original").await.unwrap();

        // Read-only directory: the temp file cannot be created.
        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_mode(0o555);
        std::fs::set_permissions(dir.path(), perms).unwrap();

        let result = write_atomic(&destination, b"replacement").await;
        assert!(matches!(result, Err(SaveError::Io { .. })));

        let mut perms = std::fs::metadata(dir.path()).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(dir.path(), perms).unwrap();

        let contents = tokio::fs::read(&destination).await.unwrap();
        assert_eq!(contents, b"original");
    }
}
