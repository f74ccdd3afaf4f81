#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::schema::{PublicationStatus, SourceProvider, SubtitleTrack, TitleType};
use catalog_db::models::episode::CreateEpisode;
use catalog_db::models::source::CreateSource;
use catalog_db::models::title::CreateTitle;
use catalog_db::MemoryCatalogStore;
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given in-memory store.
pub fn build_test_app(store: Arc<MemoryCatalogStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<MemoryCatalogStore>, config: ServerConfig) -> Router {
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Reference instant; fixtures are placed relative to it.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn title(id: &str, title_type: TitleType, minutes_ago: i64) -> CreateTitle {
    CreateTitle {
        id: id.to_string(),
        title: format!("Title {id}"),
        title_type,
        status: PublicationStatus::Published,
        poster_url: Some(format!("https://cdn.example.com/posters/{id}.jpg")),
        backdrop_url: None,
        overview: Some(format!("Overview of {id}")),
        created_at: epoch() - Duration::minutes(minutes_ago),
    }
}

pub fn episode(id: &str, title_id: &str, number: i32) -> CreateEpisode {
    CreateEpisode {
        id: id.to_string(),
        title_id: title_id.to_string(),
        episode_number: number,
        name: Some(format!("Episode {number}")),
        thumbnail_url: Some(format!("https://cdn.example.com/thumbs/{id}.jpg")),
        created_at: epoch(),
    }
}

pub fn episode_source(id: &str, episode_id: &str, priority: i32, active: bool) -> CreateSource {
    CreateSource {
        id: id.to_string(),
        title_id: None,
        episode_id: Some(episode_id.to_string()),
        url: format!("https://cdn.example.com/streams/{id}.m3u8"),
        provider: SourceProvider::Hls,
        quality: Some("720".to_string()),
        lang: Some("EN".to_string()),
        priority: Some(priority),
        is_active: Some(active),
        subtitles: Some(vec![SubtitleTrack {
            lang: "ID".to_string(),
            url: format!("https://cdn.example.com/subs/{id}.vtt"),
        }]),
        created_at: epoch(),
    }
}

pub fn full_movie_source(id: &str, title_id: &str, active: bool) -> CreateSource {
    CreateSource {
        id: id.to_string(),
        title_id: Some(title_id.to_string()),
        episode_id: None,
        url: format!("https://cdn.example.com/movies/{id}.mp4"),
        provider: SourceProvider::Mp4,
        quality: Some("1080".to_string()),
        lang: None,
        priority: None,
        is_active: Some(active),
        subtitles: None,
        created_at: epoch(),
    }
}

/// Store holding `count` published movies `t01` (newest) .. `tNN`, one
/// minute apart.
pub async fn seeded_titles(count: i64) -> Arc<MemoryCatalogStore> {
    let store = Arc::new(MemoryCatalogStore::new());
    for i in 1..=count {
        store
            .insert_title(title(&format!("t{i:02}"), TitleType::Movie, i))
            .await;
    }
    store
}
