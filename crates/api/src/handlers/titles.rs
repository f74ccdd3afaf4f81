//! Handlers for the `/titles` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::schema::{
    TitleDetail, TitleListQuery, TitleListRequest, TitleListResponse, ValidationError,
};

use crate::catalog;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /v1/titles
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<TitleListQuery>, QueryRejection>,
) -> AppResult<Json<TitleListResponse>> {
    let Query(query) = query.map_err(|rejection| {
        CoreError::Validation(ValidationError::field("$", rejection.body_text()))
    })?;
    let request = TitleListRequest::decode(&query).map_err(CoreError::Validation)?;
    let page = catalog::list_titles(state.store.as_ref(), &request).await?;
    Ok(Json(page))
}

/// GET /v1/titles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TitleDetail>> {
    let detail = catalog::get_title_detail(state.store.as_ref(), &id).await?;
    Ok(Json(detail))
}
