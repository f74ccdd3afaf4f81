//! The read-only catalog store the HTTP layer is written against.

use async_trait::async_trait;
use catalog_core::schema::TitleFilter;
use catalog_core::types::Timestamp;
use thiserror::Error;

use crate::models::episode::EpisodeRow;
use crate::models::source::SourceRow;
use crate::models::stats::CatalogCounts;
use crate::models::title::TitleRow;
use crate::repositories::{EpisodeRepo, SourceRepo, StatsRepo, TitleRepo};
use crate::DbPool;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Parameters of one keyset listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleListFilter {
    /// Exclusive upper bound on `created_at`; `None` for the first page.
    pub created_before: Option<Timestamp>,
    /// Rows to fetch, normally one more than the page size.
    pub fetch: i64,
    /// Accepted for forward compatibility; every tab currently lists by
    /// recency.
    pub filter: TitleFilter,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Published titles ordered by `created_at DESC, id DESC`.
    async fn list_published_titles(&self, filter: &TitleListFilter) -> Result<Vec<TitleRow>, StoreError>;

    async fn find_published_title(&self, id: &str) -> Result<Option<TitleRow>, StoreError>;

    /// Episodes of a title ordered by `episode_number` ascending.
    async fn list_episodes(&self, title_id: &str) -> Result<Vec<EpisodeRow>, StoreError>;

    async fn has_active_title_source(&self, title_id: &str) -> Result<bool, StoreError>;

    /// An episode whose parent title is published.
    async fn find_published_episode(&self, episode_id: &str) -> Result<Option<EpisodeRow>, StoreError>;

    /// Active sources of an episode, in no particular order.
    async fn list_active_episode_sources(&self, episode_id: &str) -> Result<Vec<SourceRow>, StoreError>;

    async fn counts(&self) -> Result<CatalogCounts, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Release connections. Called once during shutdown.
    async fn close(&self);
}

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_published_titles(&self, filter: &TitleListFilter) -> Result<Vec<TitleRow>, StoreError> {
        let rows = TitleRepo::list_published(&self.pool, filter.created_before, filter.fetch).await?;
        tracing::debug!(
            rows = rows.len(),
            fetch = filter.fetch,
            first_page = filter.created_before.is_none(),
            "Fetched published titles"
        );
        Ok(rows)
    }

    async fn find_published_title(&self, id: &str) -> Result<Option<TitleRow>, StoreError> {
        Ok(TitleRepo::find_published(&self.pool, id).await?)
    }

    async fn list_episodes(&self, title_id: &str) -> Result<Vec<EpisodeRow>, StoreError> {
        Ok(EpisodeRepo::list_by_title(&self.pool, title_id).await?)
    }

    async fn has_active_title_source(&self, title_id: &str) -> Result<bool, StoreError> {
        Ok(SourceRepo::has_active_for_title(&self.pool, title_id).await?)
    }

    async fn find_published_episode(&self, episode_id: &str) -> Result<Option<EpisodeRow>, StoreError> {
        Ok(EpisodeRepo::find_published(&self.pool, episode_id).await?)
    }

    async fn list_active_episode_sources(&self, episode_id: &str) -> Result<Vec<SourceRow>, StoreError> {
        Ok(SourceRepo::list_active_for_episode(&self.pool, episode_id).await?)
    }

    async fn counts(&self) -> Result<CatalogCounts, StoreError> {
        Ok(StatsRepo::counts(&self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn close(&self) {
        tracing::info!(connections = self.pool.size(), "Closing database pool");
        self.pool.close().await;
    }
}
