//! Repository for the `episodes` table.

use sqlx::PgPool;

use crate::models::episode::{CreateEpisode, EpisodeRow};

const COLUMNS: &str = "id, title_id, episode_number, name, thumbnail_url, created_at";

pub struct EpisodeRepo;

impl EpisodeRepo {
    pub async fn create(pool: &PgPool, input: CreateEpisode) -> Result<EpisodeRow, sqlx::Error> {
        let row = input.into_row();
        let query = format!(
            "INSERT INTO episodes ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(&row.id)
            .bind(&row.title_id)
            .bind(row.episode_number)
            .bind(&row.name)
            .bind(&row.thumbnail_url)
            .bind(row.created_at)
            .fetch_one(pool)
            .await
    }

    /// Episodes of a title by `episode_number` ascending.
    pub async fn list_by_title(pool: &PgPool, title_id: &str) -> Result<Vec<EpisodeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM episodes WHERE title_id = $1 ORDER BY episode_number ASC"
        );
        sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(title_id)
            .fetch_all(pool)
            .await
    }

    /// Find an episode whose parent title is published.
    pub async fn find_published(pool: &PgPool, id: &str) -> Result<Option<EpisodeRow>, sqlx::Error> {
        sqlx::query_as::<_, EpisodeRow>(
            "SELECT e.id, e.title_id, e.episode_number, e.name, e.thumbnail_url, e.created_at
             FROM episodes e
             JOIN titles t ON t.id = e.title_id
             WHERE e.id = $1 AND t.status = 'PUBLISHED'",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
