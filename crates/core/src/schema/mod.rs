//! Schema registry: every entity that crosses the HTTP boundary.
//!
//! A schema is a typed wire struct plus a [`Schema::check`] predicate. The
//! same definitions are used to decode incoming values ([`parse`]) and to
//! verify outgoing payloads before they are serialized, so a handler bug
//! surfaces as a [`ValidationError`] instead of a malformed response.
//!
//! Field-level rules are declared with `validator` derive attributes;
//! composite schemas (pages, tagged unions) walk their children and report
//! violations under indexed paths such as `items[3].posterUrl`.

mod common;
mod episodes;
mod payments;
mod titles;
mod users;

use std::fmt;

use serde::de::DeserializeOwned;
use validator::{ValidationErrors, ValidationErrorsKind};

pub use common::{ContractInfo, ErrorResponse, HealthResponse, Paginated};
pub use episodes::{
    EpisodeSource, EpisodeSourcesResponse, SourceProvider, SubtitleTrack, DEFAULT_SOURCE_PRIORITY,
};
pub use payments::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentStatus, PaymentStatusResponse,
};
pub use titles::{
    EpisodeSummary, MovieDetail, PublicationStatus, SeriesDetail, TitleCard, TitleDetail,
    TitleFilter, TitleInfo, TitleListQuery, TitleListRequest, TitleListResponse, TitleType,
};
pub use users::{UserPlan, UserProfile};

/// Registry identifiers covered by the published contract, in fingerprint
/// order.
///
/// Identifiers are the schema name with a `z` prefix, as first published
/// under contract 1.0.0; see [`registry_name`]. Reordering, renaming, adding
/// or removing an entry changes the contract hash and therefore requires a
/// contract version bump.
pub const SCHEMA_NAMES: &[&str] = &[
    "zPaginated",
    "zErrorResponse",
    "zUserProfile",
    "zTitleCard",
    "zTitleListRequest",
    "zTitleListResponse",
    "zTitleDetail",
    "zEpisodeSourcesResponse",
    "zCreatePaymentRequest",
    "zCreatePaymentResponse",
    "zPaymentStatusResponse",
];

/// Registry identifier of a schema name, e.g. `TitleCard` -> `zTitleCard`.
pub fn registry_name(schema_name: &str) -> String {
    format!("z{schema_name}")
}

/// A wire entity with a declared validation contract.
pub trait Schema {
    /// Registry name of the schema.
    const NAME: &'static str;

    /// Verify every declared rule, collecting all violations.
    fn check(&self) -> Result<(), ValidationError>;
}

/// Decode an untyped JSON value into a schema type, applying serde defaults,
/// then run its rules.
pub fn parse<S>(value: serde_json::Value) -> Result<S, ValidationError>
where
    S: Schema + DeserializeOwned,
{
    let decoded: S = serde_json::from_value(value).map_err(ValidationError::undecodable)?;
    decoded.check()?;
    Ok(decoded)
}

/// Same as [`parse`], starting from raw JSON bytes.
pub fn parse_slice<S>(bytes: &[u8]) -> Result<S, ValidationError>
where
    S: Schema + DeserializeOwned,
{
    let decoded: S = serde_json::from_slice(bytes).map_err(ValidationError::undecodable)?;
    decoded.check()?;
    Ok(decoded)
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// One rule broken by one field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldViolation {
    /// Dotted/indexed path to the field (`$` for the whole document).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The set of fields that violated a schema. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// A single violation.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// A value that could not even be decoded into the schema's shape.
    pub fn undecodable(err: serde_json::Error) -> Self {
        Self::field("$", err.to_string())
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation is reported for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        flatten_validator_errors(&errors, "", &mut violations);
        violations.sort();
        Self { violations }
    }
}

fn flatten_validator_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, &wire_field_name(&field.to_string()));
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed `{}` check", err.code));
                    out.push(FieldViolation::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten_validator_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validator_errors(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// `validator` reports Rust field names; the wire uses camelCase.
fn wire_field_name(rust_name: &str) -> String {
    let mut out = String::with_capacity(rust_name.len());
    let mut upper_next = false;
    for ch in rust_name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Accumulates violations across the children of a composite schema.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    list: Vec<FieldViolation>,
}

impl Violations {
    pub(crate) fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.list.push(FieldViolation::new(field, message));
    }

    /// Record the outcome of a child check, nesting its paths under `prefix`.
    pub(crate) fn nest(&mut self, prefix: &str, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.list.extend(
                err.violations
                    .into_iter()
                    .map(|v| FieldViolation::new(join_path(prefix, &v.field), v.message)),
            );
        }
    }

    /// Record a flat (non-nested) outcome as-is.
    pub(crate) fn merge(&mut self, result: Result<(), ValidationError>) {
        self.nest("", result);
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.list.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.list,
            })
        }
    }
}

/// Returned when a stored or transmitted enum value has no matching variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_field_names_become_camel_case() {
        assert_eq!(wire_field_name("poster_url"), "posterUrl");
        assert_eq!(wire_field_name("id"), "id");
        assert_eq!(wire_field_name("vip_expires_at"), "vipExpiresAt");
    }

    #[test]
    fn display_joins_all_violations() {
        let mut v = Violations::default();
        v.push("limit", "must be between 1 and 50");
        v.push("filter", "must be one of all, popular, new");
        let err = v.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "limit: must be between 1 and 50; filter: must be one of all, popular, new"
        );
    }

    #[test]
    fn nested_paths_are_prefixed() {
        let mut v = Violations::default();
        v.nest("items[2]", Err(ValidationError::field("posterUrl", "must be a URL")));
        let err = v.finish().unwrap_err();
        assert!(err.has_field("items[2].posterUrl"));
    }

    #[test]
    fn empty_collector_is_ok() {
        assert!(Violations::default().finish().is_ok());
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names = SCHEMA_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SCHEMA_NAMES.len());
    }

    #[test]
    fn schema_type_names_are_registered() {
        for name in [
            <Paginated<TitleCard> as Schema>::NAME,
            <ErrorResponse as Schema>::NAME,
            <UserProfile as Schema>::NAME,
            <TitleCard as Schema>::NAME,
            <TitleListRequest as Schema>::NAME,
            <TitleDetail as Schema>::NAME,
            <EpisodeSourcesResponse as Schema>::NAME,
            <CreatePaymentRequest as Schema>::NAME,
            <CreatePaymentResponse as Schema>::NAME,
            <PaymentStatusResponse as Schema>::NAME,
        ] {
            let id = registry_name(name);
            assert!(SCHEMA_NAMES.contains(&id.as_str()), "{id} missing from registry");
        }
    }
}
