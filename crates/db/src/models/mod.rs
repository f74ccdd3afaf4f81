pub mod episode;
pub mod source;
pub mod stats;
pub mod title;

use catalog_core::schema::{UnknownVariant, ValidationError};

/// Stored enum text that no longer maps to a variant is reported against the
/// wire field it would have populated.
pub(crate) fn unknown_column(field: &'static str, err: UnknownVariant) -> ValidationError {
    ValidationError::field(field, err.to_string())
}
