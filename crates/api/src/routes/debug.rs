use axum::routing::get;
use axum::Router;

use crate::handlers::debug;
use crate::state::AppState;

/// Diagnostic routes mounted at `/debug`. Disabled with `DEBUG_ROUTES=false`.
pub fn router() -> Router<AppState> {
    Router::new().route("/counts", get(debug::counts))
}
