//! Repository for the `titles` table.

use catalog_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::title::{CreateTitle, TitleRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, title_type, status, poster_url, backdrop_url, overview, \
                       created_at, updated_at";

pub struct TitleRepo;

impl TitleRepo {
    pub async fn create(pool: &PgPool, input: CreateTitle) -> Result<TitleRow, sqlx::Error> {
        let row = input.into_row();
        let query = format!(
            "INSERT INTO titles ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(&row.id)
            .bind(&row.title)
            .bind(&row.title_type)
            .bind(&row.status)
            .bind(&row.poster_url)
            .bind(&row.backdrop_url)
            .bind(&row.overview)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(pool)
            .await
    }

    /// Published titles, newest first, strictly older than `created_before`
    /// when given. Returns at most `fetch` rows.
    pub async fn list_published(
        pool: &PgPool,
        created_before: Option<Timestamp>,
        fetch: i64,
    ) -> Result<Vec<TitleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM titles
             WHERE status = 'PUBLISHED'
               AND ($1::timestamptz IS NULL OR created_at < $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(created_before)
            .bind(fetch)
            .fetch_all(pool)
            .await
    }

    /// Find a published title. Drafts are reported as absent.
    pub async fn find_published(pool: &PgPool, id: &str) -> Result<Option<TitleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE id = $1 AND status = 'PUBLISHED'");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
