use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use catalog_core::schema::ErrorResponse;
use catalog_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence.
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Entity not found");
                    (StatusCode::NOT_FOUND, "NOT_FOUND", format!("{entity} not found"))
                }
                CoreError::Validation(err) => {
                    tracing::debug!(violations = %err, "Rejected request parameters");
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                CoreError::ContractViolation { schema, violations } => {
                    tracing::error!(
                        schema,
                        violations = %violations,
                        "Outgoing payload violated contract"
                    );
                    internal()
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal()
            }
        };

        let body = ErrorResponse {
            error: message,
            code: Some(code.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}
