use serde::Serialize;

/// Row counts per catalog table, served by the debug endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub titles: i64,
    pub episodes: i64,
    pub sources: i64,
    pub users: i64,
}
