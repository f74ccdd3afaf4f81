use axum::routing::get;
use axum::Router;

use crate::handlers::titles;
use crate::state::AppState;

/// Routes mounted at `/titles`.
///
/// ```text
/// GET /       -> list
/// GET /{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(titles::list))
        .route("/{id}", get(titles::get_by_id))
}
