//! Postgres-backed checks of the catalog queries.
//!
//! These need a reachable `DATABASE_URL`; run with `cargo test -- --ignored`.

use catalog_core::pagination::{fetch_size, paginate, Cursor};
use catalog_core::schema::{PublicationStatus, SourceProvider, TitleFilter, TitleType};
use catalog_db::models::episode::CreateEpisode;
use catalog_db::models::source::CreateSource;
use catalog_db::models::title::CreateTitle;
use catalog_db::repositories::{EpisodeRepo, SourceRepo, TitleRepo};
use catalog_db::{CatalogStore, PgCatalogStore, TitleListFilter};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::PgPool;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

fn title(id: &str, minutes_ago: i64, title_type: TitleType, status: PublicationStatus) -> CreateTitle {
    CreateTitle {
        id: id.to_string(),
        title: format!("Title {id}"),
        title_type,
        status,
        poster_url: Some(format!("https://cdn.example.com/{id}.jpg")),
        backdrop_url: None,
        overview: None,
        created_at: base() - Duration::minutes(minutes_ago),
    }
}

fn episode(id: &str, title_id: &str, number: i32) -> CreateEpisode {
    CreateEpisode {
        id: id.to_string(),
        title_id: title_id.to_string(),
        episode_number: number,
        name: Some(format!("Episode {number}")),
        thumbnail_url: None,
        created_at: base(),
    }
}

fn source(id: &str, title_id: Option<&str>, episode_id: Option<&str>, active: bool) -> CreateSource {
    CreateSource {
        id: id.to_string(),
        title_id: title_id.map(str::to_string),
        episode_id: episode_id.map(str::to_string),
        url: format!("https://cdn.example.com/{id}.m3u8"),
        provider: SourceProvider::Hls,
        quality: Some("720".to_string()),
        lang: None,
        priority: None,
        is_active: Some(active),
        subtitles: None,
        created_at: base(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_migrations_apply(pool: PgPool) {
    PgCatalogStore::new(pool.clone()).ping().await.unwrap();

    for table in ["titles", "episodes", "sources", "users"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_listing_pages_without_gaps(pool: PgPool) {
    for i in 0..13 {
        TitleRepo::create(
            &pool,
            title(&format!("t{i:02}"), i, TitleType::Movie, PublicationStatus::Published),
        )
        .await
        .unwrap();
    }
    TitleRepo::create(&pool, title("draft", 0, TitleType::Movie, PublicationStatus::Draft))
        .await
        .unwrap();

    let store = PgCatalogStore::new(pool);
    let first = store
        .list_published_titles(&TitleListFilter {
            created_before: None,
            fetch: 13,
            filter: TitleFilter::All,
        })
        .await
        .unwrap();
    assert_eq!(first.len(), 13);
    assert!(first.iter().all(|t| t.status == "PUBLISHED"));
    assert_eq!(first[0].id, "t00");

    let second = store
        .list_published_titles(&TitleListFilter {
            created_before: Some(first[11].created_at),
            fetch: 13,
            filter: TitleFilter::All,
        })
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, "t12");
}

/// Follow cursors through the published listing and return every id seen.
async fn walk_listing(store: &PgCatalogStore, limit: i64) -> Vec<String> {
    let mut seen = Vec::new();
    let mut cursor: Option<Cursor> = None;
    loop {
        let rows = store
            .list_published_titles(&TitleListFilter {
                created_before: cursor.map(|c| c.created_before()),
                fetch: fetch_size(limit),
                filter: TitleFilter::All,
            })
            .await
            .unwrap();
        let page = paginate(rows, limit, |row| row.created_at);
        seen.extend(page.items.into_iter().map(|row| row.id));
        match page.next {
            Some(next) => cursor = Some(next),
            None => return seen,
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_bulk_insert_gets_distinct_timestamps(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    for i in 0..13 {
        sqlx::query("INSERT INTO titles (id, title, title_type, status) VALUES ($1, $2, 'MOVIE', 'PUBLISHED')")
            .bind(format!("bulk{i:02}"))
            .bind(format!("Bulk {i}"))
            .execute(&mut *tx)
            .await
            .unwrap();
    }
    tx.commit().await.unwrap();

    let distinct: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT created_at) FROM titles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(distinct.0, 13);

    let mut seen = walk_listing(&PgCatalogStore::new(pool), 12).await;
    assert_eq!(seen.len(), 13);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 13);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_equal_timestamps_at_page_boundary_are_listed(pool: PgPool) {
    for i in 1..=11 {
        TitleRepo::create(
            &pool,
            title(&format!("t{i:02}"), i, TitleType::Movie, PublicationStatus::Published),
        )
        .await
        .unwrap();
    }
    for id in ["t12", "t13"] {
        TitleRepo::create(&pool, title(id, 12, TitleType::Movie, PublicationStatus::Published))
            .await
            .unwrap();
    }

    let seen = walk_listing(&PgCatalogStore::new(pool), 12).await;
    let mut expected: Vec<String> = (1..=11).map(|i| format!("t{i:02}")).collect();
    expected.extend(["t13".to_string(), "t12".to_string()]);
    assert_eq!(seen, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_drafts_are_not_found(pool: PgPool) {
    TitleRepo::create(&pool, title("d1", 0, TitleType::Series, PublicationStatus::Draft))
        .await
        .unwrap();
    EpisodeRepo::create(&pool, episode("d1e1", "d1", 1)).await.unwrap();

    assert!(TitleRepo::find_published(&pool, "d1").await.unwrap().is_none());
    assert!(EpisodeRepo::find_published(&pool, "d1e1").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_episodes_ordered_by_number(pool: PgPool) {
    TitleRepo::create(&pool, title("s1", 0, TitleType::Series, PublicationStatus::Published))
        .await
        .unwrap();
    for (id, number) in [("e3", 3), ("e1", 1), ("e2", 2)] {
        EpisodeRepo::create(&pool, episode(id, "s1", number)).await.unwrap();
    }

    let numbers: Vec<i32> = EpisodeRepo::list_by_title(&pool, "s1")
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.episode_number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_source_activity_filters(pool: PgPool) {
    TitleRepo::create(&pool, title("m1", 0, TitleType::Movie, PublicationStatus::Published))
        .await
        .unwrap();
    TitleRepo::create(&pool, title("s1", 1, TitleType::Series, PublicationStatus::Published))
        .await
        .unwrap();
    EpisodeRepo::create(&pool, episode("e1", "s1", 1)).await.unwrap();

    SourceRepo::create(&pool, source("full-off", Some("m1"), None, false)).await.unwrap();
    assert!(!SourceRepo::has_active_for_title(&pool, "m1").await.unwrap());
    SourceRepo::create(&pool, source("full-on", Some("m1"), None, true)).await.unwrap();
    assert!(SourceRepo::has_active_for_title(&pool, "m1").await.unwrap());

    SourceRepo::create(&pool, source("e1-a", None, Some("e1"), true)).await.unwrap();
    SourceRepo::create(&pool, source("e1-b", None, Some("e1"), false)).await.unwrap();
    let active = SourceRepo::list_active_for_episode(&pool, "e1").await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "e1-a");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_source_must_have_one_owner(pool: PgPool) {
    let result = SourceRepo::create(&pool, source("orphan", None, None, true)).await;
    assert!(result.is_err(), "a source without an owner must be rejected");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_counts_every_table(pool: PgPool) {
    TitleRepo::create(&pool, title("s1", 0, TitleType::Series, PublicationStatus::Published))
        .await
        .unwrap();
    EpisodeRepo::create(&pool, episode("e1", "s1", 1)).await.unwrap();
    SourceRepo::create(&pool, source("src", None, Some("e1"), true)).await.unwrap();

    let counts = PgCatalogStore::new(pool).counts().await.unwrap();
    assert_eq!(counts.titles, 1);
    assert_eq!(counts.episodes, 1);
    assert_eq!(counts.sources, 1);
    assert_eq!(counts.users, 0);
}
