//! Preference order for playback sources.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::schema::{EpisodeSource, UnknownVariant};

/// Which end of the `priority` scale is preferred.
///
/// Ties are always broken by source id ascending so the order is total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceOrder {
    /// Lower `priority` first.
    #[default]
    Ascending,
    /// Higher `priority` first.
    Descending,
}

impl SourceOrder {
    pub fn compare(self, a: &EpisodeSource, b: &EpisodeSource) -> Ordering {
        let by_priority = match self {
            Self::Ascending => a.priority.cmp(&b.priority),
            Self::Descending => b.priority.cmp(&a.priority),
        };
        by_priority.then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(self, sources: &mut [EpisodeSource]) {
        sources.sort_by(|a, b| self.compare(a, b));
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SourceOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(UnknownVariant {
                kind: "source order",
                value: s.to_string(),
            }),
        }
    }
}
