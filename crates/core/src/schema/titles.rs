//! Title listing and detail schemas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Paginated, Schema, UnknownVariant, ValidationError, Violations};
use crate::pagination::DEFAULT_PAGE_LIMIT;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleType {
    Movie,
    Series,
}

impl TitleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Series => "SERIES",
        }
    }
}

impl FromStr for TitleType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MOVIE" => Ok(Self::Movie),
            "SERIES" => Ok(Self::Series),
            other => Err(UnknownVariant::new("title type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    Draft,
    Published,
}

impl PublicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            other => Err(UnknownVariant::new("publication status", other)),
        }
    }
}

/// Listing tab requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleFilter {
    #[default]
    All,
    Popular,
    New,
}

impl TitleFilter {
    pub const ALLOWED: &'static str = "all, popular, new";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Popular => "popular",
            Self::New => "new",
        }
    }
}

impl FromStr for TitleFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "popular" => Ok(Self::Popular),
            "new" => Ok(Self::New),
            other => Err(UnknownVariant::new("title filter", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// A title as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TitleCard {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: EntityId,
    pub title: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "must be a URL"))]
    pub poster_url: Option<String>,
    pub status: PublicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Schema for TitleCard {
    const NAME: &'static str = "TitleCard";

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

/// `GET /v1/titles` response body.
pub type TitleListResponse = Paginated<TitleCard>;

/// Raw `GET /v1/titles` query string, before any coercion.
///
/// Every field is kept as text so that malformed values are reported through
/// [`TitleListRequest::decode`] as field violations rather than as an opaque
/// extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleListQuery {
    pub limit: Option<String>,
    pub cursor: Option<String>,
    pub filter: Option<String>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TitleListRequest {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50, message = "must be an integer between 1 and 50"))]
    pub limit: i64,
    /// Opaque; decoded by [`crate::pagination::Cursor`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default)]
    pub filter: TitleFilter,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for TitleListRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
            filter: TitleFilter::All,
        }
    }
}

impl TitleListRequest {
    /// Coerce a raw query string into typed parameters.
    ///
    /// Absent or empty values take their defaults (`limit=12`, `filter=all`,
    /// no cursor). Numeric strings are coerced; everything else that does not
    /// fit is reported, all fields at once.
    pub fn decode(query: &TitleListQuery) -> Result<Self, ValidationError> {
        let mut violations = Violations::default();

        let limit = match query.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PAGE_LIMIT,
            Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
                violations.push("limit", "must be an integer between 1 and 50");
                DEFAULT_PAGE_LIMIT
            }),
        };

        let filter = match query.filter.as_deref().map(str::trim) {
            None | Some("") => TitleFilter::All,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                violations.push(
                    "filter",
                    format!("must be one of {}", TitleFilter::ALLOWED),
                );
                TitleFilter::All
            }),
        };

        let cursor = query.cursor.clone().filter(|c| !c.trim().is_empty());

        let request = Self {
            limit,
            cursor,
            filter,
        };
        violations.merge(request.check());
        violations.finish()?;
        Ok(request)
    }
}

impl Schema for TitleListRequest {
    const NAME: &'static str = "TitleListRequest";

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: EntityId,
    #[validate(range(min = 1, message = "must be a positive integer"))]
    pub episode_number: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "must be a URL"))]
    pub thumbnail_url: Option<String>,
}

/// Fields shared by both detail shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TitleInfo {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "must be a URL"))]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "must be a URL"))]
    pub backdrop_url: Option<String>,
    pub status: PublicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(flatten)]
    pub info: TitleInfo,
    pub has_full_movie: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetail {
    #[serde(flatten)]
    pub info: TitleInfo,
    /// Ordered by `episodeNumber` ascending.
    pub episodes: Vec<EpisodeSummary>,
}

/// `GET /v1/titles/{id}` response body, discriminated by `type`.
///
/// The movie shape never carries `episodes` and the series shape never
/// carries `hasFullMovie`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleDetail {
    Movie(MovieDetail),
    Series(SeriesDetail),
}

impl TitleDetail {
    pub fn info(&self) -> &TitleInfo {
        match self {
            Self::Movie(movie) => &movie.info,
            Self::Series(series) => &series.info,
        }
    }

    pub fn title_type(&self) -> TitleType {
        match self {
            Self::Movie(_) => TitleType::Movie,
            Self::Series(_) => TitleType::Series,
        }
    }
}

impl Schema for TitleDetail {
    const NAME: &'static str = "TitleDetail";

    fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.merge(self.info().validate().map_err(ValidationError::from));

        if let Self::Series(series) = self {
            for (index, episode) in series.episodes.iter().enumerate() {
                violations.nest(
                    &format!("episodes[{index}]"),
                    episode.validate().map_err(ValidationError::from),
                );
            }
            let ascending = series
                .episodes
                .windows(2)
                .all(|pair| pair[0].episode_number < pair[1].episode_number);
            if !ascending {
                violations.push(
                    "episodes",
                    "must be ordered by episodeNumber ascending without duplicates",
                );
            }
        }

        violations.finish()
    }
}
