//! Playback source schemas.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Schema, UnknownVariant, ValidationError, Violations};
use crate::types::EntityId;

/// Default `priority` of a source when the store does not specify one.
pub const DEFAULT_SOURCE_PRIORITY: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceProvider {
    Hls,
    Mp4,
    Embed,
    Custom,
}

impl SourceProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hls => "HLS",
            Self::Mp4 => "MP4",
            Self::Embed => "EMBED",
            Self::Custom => "CUSTOM",
        }
    }
}

impl FromStr for SourceProvider {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HLS" => Ok(Self::Hls),
            "MP4" => Ok(Self::Mp4),
            "EMBED" => Ok(Self::Embed),
            "CUSTOM" => Ok(Self::Custom),
            other => Err(UnknownVariant::new("source provider", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SubtitleTrack {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub lang: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub url: String,
}

/// One playable stream of an episode (or of a whole movie).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSource {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: EntityId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub url: String,
    pub provider: SourceProvider,
    /// e.g. `"720"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// e.g. `"EN"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<SubtitleTrack>>,
}

fn default_priority() -> i32 {
    DEFAULT_SOURCE_PRIORITY
}

fn default_active() -> bool {
    true
}

impl Schema for EpisodeSource {
    const NAME: &'static str = "EpisodeSource";

    fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.merge(self.validate().map_err(ValidationError::from));
        for (index, track) in self.subtitles.iter().flatten().enumerate() {
            violations.nest(
                &format!("subtitles[{index}]"),
                track.validate().map_err(ValidationError::from),
            );
        }
        violations.finish()
    }
}

/// `GET /v1/episodes/{id}/sources` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSourcesResponse {
    pub items: Vec<EpisodeSource>,
}

impl Schema for EpisodeSourcesResponse {
    const NAME: &'static str = "EpisodeSourcesResponse";

    fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        for (index, source) in self.items.iter().enumerate() {
            violations.nest(&format!("items[{index}]"), source.check());
        }
        violations.finish()
    }
}
