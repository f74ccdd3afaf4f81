//! Payment contracts. The provider integration lives outside this system;
//! only the shapes exchanged with the client are declared here.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Schema, ValidationError};
use crate::types::{EntityId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub plan_id: EntityId,
}

impl Schema for CreatePaymentRequest {
    const NAME: &'static str = "CreatePaymentRequest";

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub payment_id: EntityId,
    /// QR payload: either base64 image data or an image URL.
    #[validate(length(min = 1, message = "must not be empty"))]
    pub qr: String,
    pub expires_at: Timestamp,
}

impl Schema for CreatePaymentResponse {
    const NAME: &'static str = "CreatePaymentResponse";

    fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
}

impl Schema for PaymentStatusResponse {
    const NAME: &'static str = "PaymentStatusResponse";

    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::parse;

    #[test]
    fn plan_id_is_required() {
        let err = parse::<CreatePaymentRequest>(json!({ "planId": "" })).unwrap_err();
        assert!(err.has_field("planId"));
    }

    #[test]
    fn status_uses_upper_case_names() {
        let parsed: PaymentStatusResponse = parse(json!({ "status": "EXPIRED" })).unwrap();
        assert_eq!(parsed.status, PaymentStatus::Expired);
        assert!(parse::<PaymentStatusResponse>(json!({ "status": "REFUNDED" })).is_err());
    }
}
