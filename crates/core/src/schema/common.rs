use serde::{Deserialize, Serialize};

use super::{Schema, ValidationError, Violations};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Schema for ErrorResponse {
    const NAME: &'static str = "ErrorResponse";

    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A page of items plus the cursor of the following page, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

impl<T: Schema> Schema for Paginated<T> {
    const NAME: &'static str = "Paginated";

    fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        for (index, item) in self.items.iter().enumerate() {
            violations.nest(&format!("items[{index}]"), item.check());
        }
        if matches!(self.next_cursor.as_deref(), Some("")) {
            violations.push("nextCursor", "must not be empty when present");
        }
        violations.finish()
    }
}

/// Body of `GET /v1/health`. Not part of the fingerprinted schema set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl Schema for HealthResponse {
    const NAME: &'static str = "HealthResponse";

    fn check(&self) -> Result<(), ValidationError> {
        if self.ok {
            Ok(())
        } else {
            Err(ValidationError::field("ok", "must be true"))
        }
    }
}

/// Body of `GET /v1/contracts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub version: String,
    pub hash: String,
}

impl Schema for ContractInfo {
    const NAME: &'static str = "ContractInfo";

    fn check(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        if self.version.is_empty() {
            violations.push("version", "must not be empty");
        }
        if self.hash.is_empty() || !self.hash.chars().all(|c| c.is_ascii_hexdigit()) {
            violations.push("hash", "must be a non-empty hex string");
        }
        violations.finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::{parse, TitleCard};

    #[test]
    fn next_cursor_is_omitted_when_absent() {
        let page: Paginated<TitleCard> = Paginated::new(vec![], None);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value, json!({ "items": [] }));
        assert!(!page.has_more());
    }

    #[test]
    fn item_violations_carry_their_index() {
        let value = json!({
            "items": [
                {
                    "id": "t1", "title": "Ok", "type": "MOVIE", "status": "PUBLISHED",
                    "createdAt": "2024-01-02T00:00:00Z", "updatedAt": "2024-01-02T00:00:00Z"
                },
                {
                    "id": "t2", "title": "Bad", "type": "SERIES", "status": "PUBLISHED",
                    "posterUrl": "not a url",
                    "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
                }
            ],
            "nextCursor": "2024-01-01T00:00:00Z"
        });
        let err = parse::<Paginated<TitleCard>>(value).unwrap_err();
        assert!(err.has_field("items[1].posterUrl"), "{err}");
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn empty_next_cursor_is_rejected() {
        let page: Paginated<TitleCard> = Paginated::new(vec![], Some(String::new()));
        assert!(page.check().unwrap_err().has_field("nextCursor"));
    }

    #[test]
    fn error_response_code_is_optional() {
        let parsed = parse::<ErrorResponse>(json!({ "error": "Title not found" })).unwrap();
        assert_eq!(parsed.code, None);
    }

    #[test]
    fn health_requires_ok_true() {
        assert!(parse::<HealthResponse>(json!({ "ok": true })).is_ok());
        assert!(parse::<HealthResponse>(json!({ "ok": false })).unwrap_err().has_field("ok"));
        assert!(parse::<HealthResponse>(json!({ "status": "up" })).is_err());
    }

    #[test]
    fn contract_info_requires_hex_hash() {
        let info = ContractInfo {
            version: "1.0.0".into(),
            hash: "xyz".into(),
        };
        assert!(info.check().unwrap_err().has_field("hash"));
    }
}
