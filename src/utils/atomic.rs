//! Atomic replacement of JSON table files.
//!
//! A table is serialized up front, written to a synced temp file beside the
//! target and persisted over it. Readers see the old table or the new one.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with the pretty-printed JSON of `value`.
///
/// Returns the number of bytes written. The target is left untouched when
/// serialization fails.
///
/// # Errors
///
/// Returns an `io::Error` if `value` cannot be serialized, the path has no
/// parent directory, or the temp file cannot be written, synced or persisted.
pub async fn atomic_write_json<T>(path: &Path, value: &T) -> io::Result<usize>
where
    T: Serialize + ?Sized,
{
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?
        .to_path_buf();
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> io::Result<usize> {
        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(&bytes)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&target)?;
        Ok(bytes.len())
    })
    .await
    .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_replaces_table_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("statistics.json");
        std::fs::write(&file_path, "[]").unwrap();

        let rows = json!([{"id": "a", "order": 0}]);
        let written = atomic_write_json(&file_path, &rows).await.unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content.len(), written);
        assert!(content.ends_with('\n'));
        assert_eq!(serde_json::from_str::<Value>(&content).unwrap(), rows);
    }

    #[tokio::test]
    async fn test_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("partners.json");

        atomic_write_json(&file_path, &json!([])).await.unwrap();

        let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(count, 1, "Should only have the table file, no temp files");
    }

    #[tokio::test]
    async fn test_fails_with_missing_directory() {
        let result =
            atomic_write_json(Path::new("/nonexistent/kcic/data/table.json"), &json!([])).await;
        assert!(result.is_err());
    }
}
