use axum::{routing::get, Json, Router};
use catalog_core::contract::ContractFingerprint;
use catalog_core::schema::ContractInfo;

use crate::state::AppState;

/// GET /v1/contracts -- version and fingerprint of the schema set this build
/// serves. Clients compare the hash with their own before trusting payloads.
async fn contracts() -> Json<ContractInfo> {
    Json(ContractFingerprint::current().to_info())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/contracts", get(contracts))
}
