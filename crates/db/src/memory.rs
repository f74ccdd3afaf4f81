//! In-process [`CatalogStore`] used by tests and database-less demos.
//!
//! Mirrors the Postgres queries closely enough that pagination, publication
//! and source-activity rules behave identically.

use std::cmp::Reverse;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::episode::{CreateEpisode, EpisodeRow};
use crate::models::source::{CreateSource, SourceRow};
use crate::models::stats::CatalogCounts;
use crate::models::title::{CreateTitle, TitleRow};
use crate::store::{CatalogStore, StoreError, TitleListFilter};

#[derive(Debug, Default)]
struct Tables {
    titles: Vec<TitleRow>,
    episodes: Vec<EpisodeRow>,
    sources: Vec<SourceRow>,
    users: i64,
    unavailable: Option<String>,
}

#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_title(&self, input: CreateTitle) -> TitleRow {
        let row = input.into_row();
        self.tables.write().await.titles.push(row.clone());
        row
    }

    pub async fn insert_episode(&self, input: CreateEpisode) -> EpisodeRow {
        let row = input.into_row();
        self.tables.write().await.episodes.push(row.clone());
        row
    }

    pub async fn insert_source(&self, input: CreateSource) -> SourceRow {
        let row = input.into_row();
        self.tables.write().await.sources.push(row.clone());
        row
    }

    /// Insert an already-built row, bypassing the typed DTO. Lets tests plant
    /// values the schema would reject.
    pub async fn insert_title_row(&self, row: TitleRow) {
        self.tables.write().await.titles.push(row);
    }

    pub async fn set_user_count(&self, users: i64) {
        self.tables.write().await.users = users;
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub async fn set_unavailable(&self, reason: impl Into<String>) {
        self.tables.write().await.unavailable = Some(reason.into());
    }

    async fn read(&self) -> Result<tokio::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        let tables = self.tables.read().await;
        if let Some(reason) = &tables.unavailable {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        Ok(tables)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_published_titles(&self, filter: &TitleListFilter) -> Result<Vec<TitleRow>, StoreError> {
        let tables = self.read().await?;
        let mut rows: Vec<TitleRow> = tables
            .titles
            .iter()
            .filter(|t| t.is_published())
            .filter(|t| filter.created_before.map_or(true, |before| t.created_at < before))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (Reverse(a.created_at), Reverse(&a.id)).cmp(&(Reverse(b.created_at), Reverse(&b.id)))
        });
        rows.truncate(usize::try_from(filter.fetch).unwrap_or(0));
        Ok(rows)
    }

    async fn find_published_title(&self, id: &str) -> Result<Option<TitleRow>, StoreError> {
        let tables = self.read().await?;
        Ok(tables
            .titles
            .iter()
            .find(|t| t.id == id && t.is_published())
            .cloned())
    }

    async fn list_episodes(&self, title_id: &str) -> Result<Vec<EpisodeRow>, StoreError> {
        let tables = self.read().await?;
        let mut rows: Vec<EpisodeRow> = tables
            .episodes
            .iter()
            .filter(|e| e.title_id == title_id)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.episode_number);
        Ok(rows)
    }

    async fn has_active_title_source(&self, title_id: &str) -> Result<bool, StoreError> {
        let tables = self.read().await?;
        Ok(tables
            .sources
            .iter()
            .any(|s| s.is_active && s.title_id.as_deref() == Some(title_id)))
    }

    async fn find_published_episode(&self, episode_id: &str) -> Result<Option<EpisodeRow>, StoreError> {
        let tables = self.read().await?;
        let Some(episode) = tables.episodes.iter().find(|e| e.id == episode_id) else {
            return Ok(None);
        };
        let published = tables
            .titles
            .iter()
            .any(|t| t.id == episode.title_id && t.is_published());
        Ok(published.then(|| episode.clone()))
    }

    async fn list_active_episode_sources(&self, episode_id: &str) -> Result<Vec<SourceRow>, StoreError> {
        let tables = self.read().await?;
        Ok(tables
            .sources
            .iter()
            .filter(|s| s.is_active && s.episode_id.as_deref() == Some(episode_id))
            .cloned()
            .collect())
    }

    async fn counts(&self) -> Result<CatalogCounts, StoreError> {
        let tables = self.read().await?;
        Ok(CatalogCounts {
            titles: tables.titles.len() as i64,
            episodes: tables.episodes.len() as i64,
            sources: tables.sources.len() as i64,
            users: tables.users,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().await.map(|_| ())
    }

    async fn close(&self) {}
}
