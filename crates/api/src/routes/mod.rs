pub mod contracts;
pub mod debug;
pub mod episodes;
pub mod health;
pub mod titles;

use axum::Router;

use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// ```text
/// GET /health                  -> health
/// GET /contracts               -> contract version and hash
/// GET /titles                  -> titles::list
/// GET /titles/{id}             -> titles::get_by_id
/// GET /episodes/{id}/sources   -> episodes::list_sources
/// GET /debug/counts            -> debug::counts (only when enabled)
/// ```
pub fn api_routes(debug_routes: bool) -> Router<AppState> {
    let routes = Router::new()
        .merge(health::router())
        .merge(contracts::router())
        .nest("/titles", titles::router())
        .nest("/episodes", episodes::router());

    if debug_routes {
        routes.nest("/debug", debug::router())
    } else {
        routes
    }
}
