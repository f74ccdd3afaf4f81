//! Playback source model and DTOs.

use catalog_core::schema::{EpisodeSource, SubtitleTrack, ValidationError, DEFAULT_SOURCE_PRIORITY};
use catalog_core::types::{EntityId, Timestamp};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::FromRow;

use super::unknown_column;

/// A row from the `sources` table.
///
/// Exactly one of `title_id` (a movie's full feature) and `episode_id` is set.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SourceRow {
    pub id: EntityId,
    pub title_id: Option<EntityId>,
    pub episode_id: Option<EntityId>,
    pub url: String,
    pub provider: String,
    pub quality: Option<String>,
    pub lang: Option<String>,
    pub priority: i32,
    pub is_active: bool,
    pub subtitles: Option<Json<Vec<SubtitleTrack>>>,
    pub created_at: Timestamp,
}

impl SourceRow {
    pub fn into_source(self) -> Result<EpisodeSource, ValidationError> {
        let provider = self
            .provider
            .parse()
            .map_err(|err| unknown_column("provider", err))?;
        Ok(EpisodeSource {
            id: self.id,
            url: self.url,
            provider,
            quality: self.quality,
            lang: self.lang,
            priority: self.priority,
            is_active: self.is_active,
            subtitles: self.subtitles.map(|Json(tracks)| tracks),
        })
    }
}

/// DTO for inserting a source. Omitted `priority` and `is_active` take the
/// same defaults as the table.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSource {
    pub id: EntityId,
    pub title_id: Option<EntityId>,
    pub episode_id: Option<EntityId>,
    pub url: String,
    pub provider: catalog_core::schema::SourceProvider,
    pub quality: Option<String>,
    pub lang: Option<String>,
    pub priority: Option<i32>,
    pub is_active: Option<bool>,
    pub subtitles: Option<Vec<SubtitleTrack>>,
    pub created_at: Timestamp,
}

impl CreateSource {
    pub fn into_row(self) -> SourceRow {
        SourceRow {
            id: self.id,
            title_id: self.title_id,
            episode_id: self.episode_id,
            url: self.url,
            provider: self.provider.as_str().to_string(),
            quality: self.quality,
            lang: self.lang,
            priority: self.priority.unwrap_or(DEFAULT_SOURCE_PRIORITY),
            is_active: self.is_active.unwrap_or(true),
            subtitles: self.subtitles.map(Json),
            created_at: self.created_at,
        }
    }
}
