//! Repository for the `sources` table.

use sqlx::PgPool;

use crate::models::source::{CreateSource, SourceRow};

const COLUMNS: &str = "id, title_id, episode_id, url, provider, quality, lang, priority, \
                       is_active, subtitles, created_at";

pub struct SourceRepo;

impl SourceRepo {
    pub async fn create(pool: &PgPool, input: CreateSource) -> Result<SourceRow, sqlx::Error> {
        let row = input.into_row();
        let query = format!(
            "INSERT INTO sources ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SourceRow>(&query)
            .bind(&row.id)
            .bind(&row.title_id)
            .bind(&row.episode_id)
            .bind(&row.url)
            .bind(&row.provider)
            .bind(&row.quality)
            .bind(&row.lang)
            .bind(row.priority)
            .bind(row.is_active)
            .bind(&row.subtitles)
            .bind(row.created_at)
            .fetch_one(pool)
            .await
    }

    /// Active sources attached to an episode. Ordering is applied by the
    /// caller's configured comparator.
    pub async fn list_active_for_episode(
        pool: &PgPool,
        episode_id: &str,
    ) -> Result<Vec<SourceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sources WHERE episode_id = $1 AND is_active ORDER BY id"
        );
        sqlx::query_as::<_, SourceRow>(&query)
            .bind(episode_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a title has at least one active title-level source.
    pub async fn has_active_for_title(pool: &PgPool, title_id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM sources WHERE title_id = $1 AND is_active)",
        )
        .bind(title_id)
        .fetch_one(pool)
        .await
    }
}
