use crate::schema::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Client input failed a request schema.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A payload produced by the server failed its own response schema.
    #[error("Contract violation in {schema}: {violations}")]
    ContractViolation {
        schema: &'static str,
        violations: ValidationError,
    },
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
