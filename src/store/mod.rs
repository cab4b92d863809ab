//! JSON-file persistence for screened candidates and application analyses

pub mod analysis;
pub mod candidates;

pub use analysis::{AnalysisRecord, AnalysisStore};
pub use candidates::{CandidateRecord, CandidateStore, InsertOutcome};

use crate::error::{Result, ScreenerError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Read a JSON array of records; a missing file is an empty store.
pub(crate) async fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        debug!("No store at {}, starting empty", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .map_err(|e| ScreenerError::Store(format!("Corrupt store {}: {}", path.display(), e)))
}

/// Write records as pretty JSON next to `path`, then rename over it.
pub(crate) async fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let content = serde_json::to_string_pretty(records)?;
    let tmp_path = path.with_extension("json.tmp");

    fs::write(&tmp_path, content).await?;
    fs::rename(&tmp_path, path).await?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_and_empty_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let loaded: Vec<u32> = load_records(&missing).await.unwrap();
        assert!(loaded.is_empty());

        let blank = dir.path().join("blank.json");
        std::fs::write(&blank, "  \n").unwrap();
        let loaded: Vec<u32> = load_records(&blank).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("values.json");

        write_records(&path, &[1u32, 2, 3]).await.unwrap();
        assert!(!path.with_extension("json.tmp").exists());

        let loaded: Vec<u32> = load_records(&path).await.unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let result: Result<Vec<u32>> = load_records(&path).await;
        assert!(matches!(result, Err(ScreenerError::Store(_))));
    }
}
