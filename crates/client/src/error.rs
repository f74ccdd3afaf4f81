use catalog_core::schema::ValidationError;

/// Errors from the catalog HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The base URL given to `connect` is not an absolute http(s) URL.
    #[error("invalid catalog URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server publishes a different schema set than this build.
    #[error("contract mismatch: client has {local}, server has {remote}")]
    ContractMismatch { local: String, remote: String },

    /// Parameters failed their schema; nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] ValidationError),

    /// A 2xx body did not satisfy the expected schema.
    #[error("response violated {schema}: {violations}")]
    InvalidResponse {
        schema: &'static str,
        violations: ValidationError,
    },

    /// The server answered with a non-2xx status.
    #[error("catalog API error ({status}): {error}")]
    Api {
        status: u16,
        error: String,
        code: Option<String>,
    },
}

impl ClientError {
    /// Machine-readable code of an API error body, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
