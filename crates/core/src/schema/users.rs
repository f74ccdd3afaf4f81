use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Schema, ValidationError};
use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserPlan {
    #[default]
    Free,
    Vip,
}

/// A viewer profile as exposed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: EntityId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub telegram_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "must be a URL"))]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub plan: UserPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vip_expires_at: Option<Timestamp>,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl Schema for UserProfile {
    const NAME: &'static str = "UserProfile";

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}
