use axum::routing::get;
use axum::Router;

use crate::handlers::episodes;
use crate::state::AppState;

/// Routes mounted at `/episodes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/sources", get(episodes::list_sources))
}
