//! Catalog read operations behind the HTTP handlers.
//!
//! Each operation decodes its input, queries the [`CatalogStore`], maps rows
//! to wire types and checks the assembled payload against its schema before
//! returning it. A payload that fails its own schema is reported as
//! [`CoreError::ContractViolation`] and never reaches the client.

use catalog_core::error::CoreError;
use catalog_core::ordering::SourceOrder;
use catalog_core::pagination::{fetch_size, paginate, Cursor};
use catalog_core::schema::{
    EpisodeSourcesResponse, MovieDetail, Schema, SeriesDetail, TitleDetail, TitleListRequest,
    TitleListResponse, TitleType, ValidationError,
};
use catalog_db::{CatalogStore, TitleListFilter};

use crate::error::AppResult;

/// One page of published titles, newest first.
pub async fn list_titles(
    store: &dyn CatalogStore,
    request: &TitleListRequest,
) -> AppResult<TitleListResponse> {
    request.check().map_err(CoreError::Validation)?;
    let created_before = request
        .cursor
        .as_deref()
        .map(Cursor::decode)
        .transpose()
        .map_err(CoreError::Validation)?
        .map(|cursor| cursor.created_before());

    let rows = store
        .list_published_titles(&TitleListFilter {
            created_before,
            fetch: fetch_size(request.limit),
            filter: request.filter,
        })
        .await?;

    let page = paginate(rows, request.limit, |row| row.created_at)
        .try_map(|row| row.into_card())
        .map_err(violation("TitleListResponse"))?
        .into_paginated();

    ensure_outgoing("TitleListResponse", &page)?;
    tracing::debug!(
        items = page.items.len(),
        has_more = page.has_more(),
        filter = request.filter.as_str(),
        "Listed titles"
    );
    Ok(page)
}

/// Detail of a published title, shaped by its type.
pub async fn get_title_detail(store: &dyn CatalogStore, id: &str) -> AppResult<TitleDetail> {
    let row = store
        .find_published_title(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", id))?;
    let title_type = row.title_type().map_err(violation(TitleDetail::NAME))?;
    let info = row.into_info().map_err(violation(TitleDetail::NAME))?;

    let detail = match title_type {
        TitleType::Movie => TitleDetail::Movie(MovieDetail {
            has_full_movie: store.has_active_title_source(&info.id).await?,
            info,
        }),
        TitleType::Series => {
            let episodes = store
                .list_episodes(&info.id)
                .await?
                .into_iter()
                .map(|episode| episode.into_summary())
                .collect();
            TitleDetail::Series(SeriesDetail { info, episodes })
        }
    };

    ensure_outgoing(TitleDetail::NAME, &detail)?;
    Ok(detail)
}

/// Active sources of an episode in playback preference order.
pub async fn list_episode_sources(
    store: &dyn CatalogStore,
    episode_id: &str,
    order: SourceOrder,
) -> AppResult<EpisodeSourcesResponse> {
    store
        .find_published_episode(episode_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Episode", episode_id))?;

    let mut items = store
        .list_active_episode_sources(episode_id)
        .await?
        .into_iter()
        .map(|row| row.into_source())
        .collect::<Result<Vec<_>, _>>()
        .map_err(violation(EpisodeSourcesResponse::NAME))?;
    order.sort(&mut items);

    let response = EpisodeSourcesResponse { items };
    ensure_outgoing(EpisodeSourcesResponse::NAME, &response)?;
    Ok(response)
}

fn violation(schema: &'static str) -> impl Fn(ValidationError) -> CoreError {
    move |violations| CoreError::ContractViolation { schema, violations }
}

fn ensure_outgoing<S: Schema>(schema: &'static str, payload: &S) -> Result<(), CoreError> {
    payload.check().map_err(violation(schema))
}
