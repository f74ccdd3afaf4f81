use axum::extract::State;
use axum::Json;
use catalog_db::models::stats::CatalogCounts;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /v1/debug/counts
pub async fn counts(State(state): State<AppState>) -> AppResult<Json<CatalogCounts>> {
    let counts = state.store.counts().await?;
    Ok(Json(counts))
}
