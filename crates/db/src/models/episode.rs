//! Episode entity model and DTOs.

use catalog_core::schema::EpisodeSummary;
use catalog_core::types::{EntityId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `episodes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EpisodeRow {
    pub id: EntityId,
    pub title_id: EntityId,
    pub episode_number: i32,
    pub name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
}

impl EpisodeRow {
    pub fn into_summary(self) -> EpisodeSummary {
        EpisodeSummary {
            id: self.id,
            episode_number: self.episode_number,
            name: self.name,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

/// DTO for inserting an episode.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEpisode {
    pub id: EntityId,
    pub title_id: EntityId,
    pub episode_number: i32,
    pub name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
}

impl CreateEpisode {
    pub fn into_row(self) -> EpisodeRow {
        EpisodeRow {
            id: self.id,
            title_id: self.title_id,
            episode_number: self.episode_number,
            name: self.name,
            thumbnail_url: self.thumbnail_url,
            created_at: self.created_at,
        }
    }
}
