//! Title entity model and DTOs.

use catalog_core::schema::{PublicationStatus, TitleCard, TitleInfo, TitleType, ValidationError};
use catalog_core::types::{EntityId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

use super::unknown_column;

/// A row from the `titles` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TitleRow {
    pub id: EntityId,
    pub title: String,
    pub title_type: String,
    pub status: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub overview: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TitleRow {
    pub fn title_type(&self) -> Result<TitleType, ValidationError> {
        self.title_type
            .parse()
            .map_err(|err| unknown_column("type", err))
    }

    pub fn status(&self) -> Result<PublicationStatus, ValidationError> {
        self.status.parse().map_err(|err| unknown_column("status", err))
    }

    pub fn is_published(&self) -> bool {
        self.status == PublicationStatus::Published.as_str()
    }

    pub fn into_card(self) -> Result<TitleCard, ValidationError> {
        Ok(TitleCard {
            title_type: self.title_type()?,
            status: self.status()?,
            id: self.id,
            title: self.title,
            poster_url: self.poster_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    pub fn into_info(self) -> Result<TitleInfo, ValidationError> {
        Ok(TitleInfo {
            status: self.status()?,
            id: self.id,
            title: self.title,
            poster_url: self.poster_url,
            overview: self.overview,
            backdrop_url: self.backdrop_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DTO for inserting a title.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTitle {
    pub id: EntityId,
    pub title: String,
    pub title_type: TitleType,
    pub status: PublicationStatus,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub overview: Option<String>,
    pub created_at: Timestamp,
}

impl CreateTitle {
    pub fn into_row(self) -> TitleRow {
        TitleRow {
            id: self.id,
            title: self.title,
            title_type: self.title_type.as_str().to_string(),
            status: self.status.as_str().to_string(),
            poster_url: self.poster_url,
            backdrop_url: self.backdrop_url,
            overview: self.overview,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn row(title_type: &str, status: &str) -> TitleRow {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap();
        TitleRow {
            id: "t1".into(),
            title: "Harbour Lights".into(),
            title_type: title_type.into(),
            status: status.into(),
            poster_url: Some("https://cdn.example.com/t1.jpg".into()),
            backdrop_url: None,
            overview: Some("A quiet port town.".into()),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn converts_to_card() {
        let card = row("SERIES", "PUBLISHED").into_card().unwrap();
        assert_eq!(card.title_type, TitleType::Series);
        assert_eq!(card.status, PublicationStatus::Published);
        assert_eq!(card.poster_url.as_deref(), Some("https://cdn.example.com/t1.jpg"));
    }

    #[test]
    fn unknown_stored_type_is_reported_on_the_wire_field() {
        let err = row("PODCAST", "PUBLISHED").into_card().unwrap_err();
        assert!(err.has_field("type"));
    }

    #[test]
    fn unknown_stored_status_fails_info_conversion() {
        assert_matches!(row("MOVIE", "ARCHIVED").into_info(), Err(e) if e.has_field("status"));
    }

    #[test]
    fn create_dto_stores_enum_text() {
        let created = CreateTitle {
            id: "m1".into(),
            title: "Dune".into(),
            title_type: TitleType::Movie,
            status: PublicationStatus::Draft,
            poster_url: None,
            backdrop_url: None,
            overview: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
        .into_row();
        assert_eq!(created.title_type, "MOVIE");
        assert_eq!(created.status, "DRAFT");
        assert!(!created.is_published());
        assert_eq!(created.updated_at, created.created_at);
    }
}
