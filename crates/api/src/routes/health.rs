use axum::{routing::get, Json, Router};
use catalog_core::schema::HealthResponse;

use crate::state::AppState;

/// GET /v1/health
///
/// Liveness only; does not touch the store.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
