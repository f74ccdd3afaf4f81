//! Handlers for the `/episodes` resource.

use axum::extract::{Path, State};
use axum::Json;
use catalog_core::schema::EpisodeSourcesResponse;

use crate::catalog;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /v1/episodes/{id}/sources
pub async fn list_sources(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EpisodeSourcesResponse>> {
    let sources =
        catalog::list_episode_sources(state.store.as_ref(), &id, state.config.source_order).await?;
    Ok(Json(sources))
}
