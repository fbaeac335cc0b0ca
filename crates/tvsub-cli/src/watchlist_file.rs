//! JSON file watch-list store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tvsub_core::{RepositoryError, WatchEntry, WatchListRepository};

/// Watch-list persisted as a pretty-printed JSON array.
///
/// A missing or empty file reads as an empty list. Saves go through a
/// temporary file in the same directory and a rename.
#[derive(Debug, Clone)]
pub struct JsonWatchListRepository {
    path: PathBuf,
}

impl JsonWatchListRepository {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl WatchListRepository for JsonWatchListRepository {
    async fn load(&self) -> Result<Vec<WatchEntry>, RepositoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn save(&self, entries: &[WatchEntry]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), count = entries.len(), "Saved watch-list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tvsub_core::QualityTier;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonWatchListRepository::new(dir.path().join("subscribes.json"));
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subscribes.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(JsonWatchListRepository::new(path).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("subscribes.json");
        let repo = JsonWatchListRepository::new(&path);
        let entries = vec![
            WatchEntry::new("36391902", QualityTier::High)
                .with_id("a")
                .with_display_name("漫长的季节"),
        ];

        repo.save(&entries).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"), "expected pretty JSON: {text}");
        assert!(text.contains("\"douban_id\": \"36391902\""));
        assert!(!repo.temp_path().exists());
        assert_eq!(repo.load().await.unwrap(), entries);
    }

    #[tokio::test]
    async fn test_reads_file_written_by_hand() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subscribes.json");
        std::fs::write(
            &path,
            r#"[{"douban_id":"1","resolution":1},{"id":"x","douban_id":"2","name":"B","resolution":0}]"#,
        )
        .unwrap();

        let entries = JsonWatchListRepository::new(path).load().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].quality_tier, QualityTier::Standard);
        assert_eq!(entries[1].quality_tier, QualityTier::High);
        assert_eq!(entries[1].display_name, "B");
    }

    #[tokio::test]
    async fn test_garbage_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subscribes.json");
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            JsonWatchListRepository::new(path).load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
