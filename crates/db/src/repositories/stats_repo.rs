//! Table-size counters for diagnostics.

use sqlx::PgPool;

use crate::models::stats::CatalogCounts;

pub struct StatsRepo;

impl StatsRepo {
    /// Count every catalog table concurrently.
    pub async fn counts(pool: &PgPool) -> Result<CatalogCounts, sqlx::Error> {
        let (titles, episodes, sources, users) = futures::try_join!(
            count(pool, "titles"),
            count(pool, "episodes"),
            count(pool, "sources"),
            count(pool, "users"),
        )?;
        Ok(CatalogCounts {
            titles,
            episodes,
            sources,
            users,
        })
    }
}

async fn count(pool: &PgPool, table: &'static str) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&query).fetch_one(pool).await
}
