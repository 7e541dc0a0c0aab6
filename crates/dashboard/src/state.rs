//! Application state shared across handlers.
//!
//! One in-memory cache holds every record regardless of type. The cache is
//! entirely derived: it is replaced wholesale by [`AppState::refresh`]
//! after startup and after every successful mutation, and is never the
//! source of truth. There is no diffing and no optimistic update; a view
//! rendered between a mutation and the following reload simply shows the
//! previous snapshot.

use std::sync::Arc;

use syllabus_core::{CourseRecord, Record, TeacherRecord, UserRecord};
use tokio::sync::RwLock;

use crate::config::DashboardConfig;
use crate::store::{StoreError, SyllabusStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    store: SyllabusStore,
    cache: RwLock<Vec<Record>>,
}

impl AppState {
    /// Create application state over a store client.
    ///
    /// The cache starts empty; call [`AppState::refresh`] before serving.
    #[must_use]
    pub fn new(config: DashboardConfig, store: SyllabusStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                cache: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the store client.
    #[must_use]
    pub fn store(&self) -> &SyllabusStore {
        &self.inner.store
    }

    /// Replace the cache wholesale from the remote store.
    ///
    /// This is the only place the cache is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the reload fails; the previous cache contents
    /// are kept in that case.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let records = self.inner.store.fetch_all().await?;
        let mut cache = self.inner.cache.write().await;
        *cache = records;
        Ok(())
    }

    /// Owned snapshot of the entire cached record set.
    pub async fn snapshot(&self) -> Vec<Record> {
        self.inner.cache.read().await.clone()
    }

    /// Cached user records.
    pub async fn users(&self) -> Vec<UserRecord> {
        self.inner
            .cache
            .read()
            .await
            .iter()
            .filter_map(|r| r.as_user().cloned())
            .collect()
    }

    /// Cached course records.
    pub async fn courses(&self) -> Vec<CourseRecord> {
        self.inner
            .cache
            .read()
            .await
            .iter()
            .filter_map(|r| r.as_course().cloned())
            .collect()
    }

    /// Cached teacher records.
    pub async fn teachers(&self) -> Vec<TeacherRecord> {
        self.inner
            .cache
            .read()
            .await
            .iter()
            .filter_map(|r| r.as_teacher().cloned())
            .collect()
    }

    /// Create a record, then reload the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation itself fails. A failed reload
    /// after a successful mutation is logged and swallowed: the view
    /// keeps showing pre-mutation data until the next reload succeeds.
    pub async fn create_record(&self, record: &Record) -> Result<Record, StoreError> {
        let created = self.inner.store.create(record).await?;
        self.reload_after_mutation().await;
        Ok(created)
    }

    /// Replace a record wholesale, then reload the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation itself fails.
    pub async fn update_record(&self, record: &Record) -> Result<(), StoreError> {
        self.inner.store.update(record).await?;
        self.reload_after_mutation().await;
        Ok(())
    }

    /// Delete a record, then reload the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation itself fails.
    pub async fn delete_record(&self, record: &Record) -> Result<(), StoreError> {
        self.inner.store.delete(record).await?;
        self.reload_after_mutation().await;
        Ok(())
    }

    async fn reload_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            // Known staleness gap: the mutation landed but the view will
            // show the previous snapshot until a later reload succeeds.
            tracing::error!(error = %e, "Reload after mutation failed; cache is stale");
        }
    }
}
