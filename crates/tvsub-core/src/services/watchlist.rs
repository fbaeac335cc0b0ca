//! Watch-list service - subscription CRUD over a repository.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{QualityTier, WatchEntry};
use crate::ports::{CatalogPort, RepositoryError, WatchListRepository};

/// Errors from watch-list operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WatchListError {
    #[error("Catalog id cannot be empty")]
    EmptyCatalogId,

    #[error("Already subscribed: catalog id {catalog_id} at {tier}")]
    Duplicate {
        catalog_id: String,
        tier: QualityTier,
    },

    #[error("Not subscribed: catalog id {catalog_id} at {tier}")]
    NotFound {
        catalog_id: String,
        tier: QualityTier,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// In-memory watch-list backed by a repository.
///
/// Mutations persist the whole list; a failed save leaves memory unchanged.
pub struct WatchListService {
    repo: Arc<dyn WatchListRepository>,
    catalog: Option<Arc<dyn CatalogPort>>,
    entries: RwLock<Vec<WatchEntry>>,
}

impl WatchListService {
    /// Load the watch-list from `repo`.
    ///
    /// `catalog` is used to back-fill display names on add; without it,
    /// entries added with no name get the fallback label.
    pub async fn load(
        repo: Arc<dyn WatchListRepository>,
        catalog: Option<Arc<dyn CatalogPort>>,
    ) -> Result<Self, WatchListError> {
        let entries = repo.load().await?;
        tracing::debug!(count = entries.len(), "Loaded watch-list");
        Ok(Self {
            repo,
            catalog,
            entries: RwLock::new(entries),
        })
    }

    /// Snapshot of all entries.
    pub async fn list(&self) -> Vec<WatchEntry> {
        self.entries.read().await.clone()
    }

    /// Entry with subscription id `id`.
    pub async fn get(&self, id: &str) -> Option<WatchEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Add a subscription, returning the stored entry.
    pub async fn add(&self, entry: WatchEntry) -> Result<WatchEntry, WatchListError> {
        let mut entry = entry;
        entry.catalog_id = entry.catalog_id.trim().to_string();
        if entry.catalog_id.is_empty() {
            return Err(WatchListError::EmptyCatalogId);
        }

        let mut entries = self.entries.write().await;
        if entries
            .iter()
            .any(|e| e.same_identity(&entry.catalog_id, entry.quality_tier))
        {
            return Err(WatchListError::Duplicate {
                catalog_id: entry.catalog_id,
                tier: entry.quality_tier,
            });
        }

        if entry.id.trim().is_empty() {
            entry.id = Uuid::new_v4().to_string();
        }
        if entry.display_name.trim().is_empty() {
            entry.display_name = self.lookup_name(&entry.catalog_id).await;
        }

        entries.push(entry.clone());
        if let Err(e) = self.repo.save(&entries).await {
            entries.pop();
            return Err(e.into());
        }

        tracing::info!(catalog_id = %entry.catalog_id, name = %entry.display_name, "Subscription added");
        Ok(entry)
    }

    /// Remove the subscription identified by `(catalog_id, tier)`.
    pub async fn remove(
        &self,
        catalog_id: &str,
        tier: QualityTier,
    ) -> Result<WatchEntry, WatchListError> {
        let catalog_id = catalog_id.trim();
        let mut entries = self.entries.write().await;

        let Some(index) = entries
            .iter()
            .position(|e| e.same_identity(catalog_id, tier))
        else {
            return Err(WatchListError::NotFound {
                catalog_id: catalog_id.to_string(),
                tier,
            });
        };

        let mut remaining = entries.clone();
        let removed = remaining.remove(index);
        self.repo.save(&remaining).await?;
        *entries = remaining;

        tracing::info!(catalog_id, %tier, "Subscription removed");
        Ok(removed)
    }

    async fn lookup_name(&self, catalog_id: &str) -> String {
        let fallback = || format!("豆瓣ID: {catalog_id}");
        let Some(catalog) = &self.catalog else {
            return fallback();
        };
        match catalog.lookup_title(catalog_id).await {
            Ok(title) if !title.trim().is_empty() => title.trim().to_string(),
            Ok(_) => fallback(),
            Err(e) => {
                tracing::warn!(catalog_id, error = %e, "Catalog lookup failed, using fallback name");
                fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CatalogError, CatalogHit};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MockRepo {
        stored: Mutex<Vec<WatchEntry>>,
        fail_save: AtomicBool,
        saves: Mutex<usize>,
    }

    #[async_trait]
    impl WatchListRepository for MockRepo {
        async fn load(&self) -> Result<Vec<WatchEntry>, RepositoryError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, entries: &[WatchEntry]) -> Result<(), RepositoryError> {
            if self.fail_save.load(Ordering::SeqCst) {
                return Err(RepositoryError::Storage("disk full".to_string()));
            }
            *self.saves.lock().unwrap() += 1;
            *self.stored.lock().unwrap() = entries.to_vec();
            Ok(())
        }
    }

    struct FixedCatalog(Result<String, CatalogError>);

    #[async_trait]
    impl CatalogPort for FixedCatalog {
        async fn lookup_title(&self, _catalog_id: &str) -> Result<String, CatalogError> {
            self.0.clone()
        }

        async fn search(&self, _name: &str) -> Result<Vec<CatalogHit>, CatalogError> {
            Ok(Vec::new())
        }
    }

    async fn service_with(
        repo: Arc<MockRepo>,
        catalog: Option<Arc<dyn CatalogPort>>,
    ) -> WatchListService {
        WatchListService::load(repo, catalog).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_backfills_name() {
        let repo = Arc::new(MockRepo::default());
        let catalog: Arc<dyn CatalogPort> = Arc::new(FixedCatalog(Ok("漫长的季节".to_string())));
        let service = service_with(repo.clone(), Some(catalog)).await;

        let added = service
            .add(WatchEntry::new("35588177", QualityTier::High))
            .await
            .unwrap();

        assert!(!added.id.is_empty());
        assert_eq!(added.display_name, "漫长的季节");
        assert_eq!(repo.stored.lock().unwrap().as_slice(), &[added.clone()]);
        assert_eq!(service.get(&added.id).await, Some(added));
    }

    #[tokio::test]
    async fn test_add_uses_fallback_name_on_lookup_failure() {
        let repo = Arc::new(MockRepo::default());
        let catalog: Arc<dyn CatalogPort> = Arc::new(FixedCatalog(Err(CatalogError::Request {
            message: "timeout".to_string(),
        })));
        let service = service_with(repo, Some(catalog)).await;

        let added = service
            .add(WatchEntry::new("123", QualityTier::Standard))
            .await
            .unwrap();
        assert_eq!(added.display_name, "豆瓣ID: 123");
    }

    #[tokio::test]
    async fn test_add_keeps_given_name_and_id() {
        let service = service_with(Arc::new(MockRepo::default()), None).await;
        let added = service
            .add(
                WatchEntry::new("1", QualityTier::Standard)
                    .with_id("fixed")
                    .with_display_name("Named"),
            )
            .await
            .unwrap();
        assert_eq!(added.id, "fixed");
        assert_eq!(added.display_name, "Named");
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_identity() {
        let repo = Arc::new(MockRepo::default());
        let service = service_with(repo.clone(), None).await;

        service.add(WatchEntry::new("1", QualityTier::High)).await.unwrap();
        // same id at another tier is a different subscription
        service.add(WatchEntry::new("1", QualityTier::Standard)).await.unwrap();

        let err = service
            .add(WatchEntry::new(" 1 ", QualityTier::High))
            .await
            .unwrap_err();
        assert!(matches!(err, WatchListError::Duplicate { .. }));
        assert_eq!(service.list().await.len(), 2);
        assert_eq!(*repo.saves.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_catalog_id() {
        let service = service_with(Arc::new(MockRepo::default()), None).await;
        assert_eq!(
            service.add(WatchEntry::new("  ", QualityTier::High)).await,
            Err(WatchListError::EmptyCatalogId)
        );
    }

    #[tokio::test]
    async fn test_add_rolls_back_on_save_failure() {
        let repo = Arc::new(MockRepo::default());
        let service = service_with(repo.clone(), None).await;
        repo.fail_save.store(true, Ordering::SeqCst);

        let err = service
            .add(WatchEntry::new("1", QualityTier::High))
            .await
            .unwrap_err();

        assert!(matches!(err, WatchListError::Repository(_)));
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = Arc::new(MockRepo::default());
        let service = service_with(repo.clone(), None).await;
        service.add(WatchEntry::new("1", QualityTier::High)).await.unwrap();
        service.add(WatchEntry::new("2", QualityTier::High)).await.unwrap();

        let removed = service.remove("1", QualityTier::High).await.unwrap();
        assert_eq!(removed.catalog_id, "1");
        assert_eq!(service.list().await.len(), 1);
        assert_eq!(repo.stored.lock().unwrap().len(), 1);

        assert!(matches!(
            service.remove("1", QualityTier::High).await,
            Err(WatchListError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_keeps_memory_on_save_failure() {
        let repo = Arc::new(MockRepo::default());
        let service = service_with(repo.clone(), None).await;
        service.add(WatchEntry::new("1", QualityTier::High)).await.unwrap();
        repo.fail_save.store(true, Ordering::SeqCst);

        assert!(service.remove("1", QualityTier::High).await.is_err());
        assert_eq!(service.list().await.len(), 1);
    }
}
