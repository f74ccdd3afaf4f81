//! Keyset pagination over `created_at DESC`.
//!
//! A cursor is the RFC 3339 `createdAt` of the last item on the previous
//! page. The next page holds rows strictly older than that instant. Callers
//! fetch [`fetch_size`] rows (one more than the page) so that [`paginate`]
//! can tell whether a further page exists without a count query.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::schema::{Paginated, ValidationError};
use crate::types::Timestamp;

/// Page size when the client does not ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 12;

/// Largest page a client may ask for.
pub const MAX_PAGE_LIMIT: i64 = 50;

/// Exclusive upper bound on `created_at` for the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(Timestamp);

impl Cursor {
    pub fn new(created_at: Timestamp) -> Self {
        Self(created_at)
    }

    /// Rows on the page this cursor points to were created strictly before this.
    pub fn created_before(&self) -> Timestamp {
        self.0
    }

    /// Render the cursor with the full stored precision and a `Z` suffix, so
    /// that decoding yields the exact same instant.
    pub fn encode(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parse any RFC 3339 timestamp, normalising the offset to UTC.
    pub fn decode(raw: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|at| Self(at.with_timezone(&Utc)))
            .map_err(|_| ValidationError::field("cursor", "must be an ISO-8601 timestamp"))
    }
}

/// Rows to request from the store for a page of `limit` items.
pub fn fetch_size(limit: i64) -> i64 {
    limit.saturating_add(1)
}

/// One page of rows plus the position of the following page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    /// Convert every row, keeping the cursor. Stops at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            next: self.next,
        })
    }

    pub fn into_paginated(self) -> Paginated<T> {
        Paginated::new(self.items, self.next.map(|cursor| cursor.encode()))
    }
}

/// Trim an over-fetched row set down to `limit` items.
///
/// `rows` must already be ordered newest first and hold at most
/// [`fetch_size`]`(limit)` rows. A cursor is produced only when the store
/// returned more than `limit` rows; it points at the last kept row.
///
/// The cursor carries no tiebreaker, so rows sharing the boundary timestamp
/// with the first row of the next page are held back and the page ends
/// early: the next page then starts with the whole tied group. When every
/// row of the page shares that timestamp nothing can be held back, and the
/// tied rows beyond this page are unreachable. Stored timestamps default to
/// `clock_timestamp()`, so such a group only arises from explicitly written
/// equal values.
pub fn paginate<T>(mut rows: Vec<T>, limit: i64, created_at: impl Fn(&T) -> Timestamp) -> Page<T> {
    let limit = usize::try_from(limit).unwrap_or(0);
    let Some(boundary) = rows.get(limit).map(&created_at) else {
        return Page {
            items: rows,
            next: None,
        };
    };
    rows.truncate(limit);
    if let Some(last_older) = rows.iter().rposition(|row| created_at(row) > boundary) {
        rows.truncate(last_older + 1);
    }
    let next = rows.last().map(|row| Cursor::new(created_at(row)));
    Page { items: rows, next }
}
