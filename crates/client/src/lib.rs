//! HTTP client for the catalog API.
//!
//! Every payload is checked against the same schemas the server uses: query
//! parameters before they are sent, bodies after they are received. A
//! [`CatalogClient`] can only be obtained through [`CatalogClient::connect`]
//! or [`CatalogClient::connect_with`], both of which first confirm that the
//! server publishes the same contract fingerprint as this build.

mod error;

use catalog_core::contract::ContractFingerprint;
use catalog_core::schema::{
    parse_slice, ContractInfo, EpisodeSourcesResponse, ErrorResponse, HealthResponse, Schema,
    TitleDetail, TitleListRequest, TitleListResponse,
};
use futures::Stream;
use reqwest::Url;
use serde::de::DeserializeOwned;

pub use error::ClientError;

/// Client for one catalog API deployment whose contract has been verified.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    /// Connect to a deployment and refuse to return a client unless the
    /// server's contract matches this build.
    ///
    /// * `api_url` - Base URL without the `/v1` prefix, e.g. `http://host:3000`.
    pub async fn connect(api_url: &str) -> Result<Self, ClientError> {
        Self::connect_with(reqwest::Client::new(), api_url).await
    }

    /// Same as [`connect`](Self::connect), reusing an existing [`reqwest::Client`].
    pub async fn connect_with(client: reqwest::Client, api_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(api_url).map_err(|err| ClientError::InvalidUrl {
            url: api_url.to_string(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: api_url.to_string(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }
        let unverified = Self { client, base };
        unverified.verify_contract().await?;
        Ok(unverified)
    }

    pub fn api_url(&self) -> &str {
        self.base.as_str()
    }

    /// `GET /v1/contracts`.
    pub async fn contract(&self) -> Result<ContractInfo, ClientError> {
        self.get(&["contracts"], &[]).await
    }

    /// Fetch the server's contract again and compare it with the local
    /// fingerprint, e.g. after the deployment behind the URL was replaced.
    ///
    /// Legacy 8-character server hashes are accepted when they prefix the
    /// local hash.
    pub async fn verify_contract(&self) -> Result<ContractInfo, ClientError> {
        let local = ContractFingerprint::current();
        let remote = self.contract().await?;
        if !local.matches(&remote.hash) {
            tracing::warn!(
                local = %local.hash,
                remote = %remote.hash,
                remote_version = %remote.version,
                "Catalog contract mismatch"
            );
            return Err(ClientError::ContractMismatch {
                local: local.hash,
                remote: remote.hash,
            });
        }
        tracing::debug!(version = %remote.version, hash = %remote.hash, "Catalog contract verified");
        Ok(remote)
    }

    /// `GET /v1/health`.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let body: HealthResponse = self.get(&["health"], &[]).await?;
        Ok(body.ok)
    }

    /// `GET /v1/titles`.
    pub async fn list_titles(
        &self,
        request: &TitleListRequest,
    ) -> Result<TitleListResponse, ClientError> {
        request.check().map_err(ClientError::InvalidRequest)?;

        let mut query = vec![
            ("limit", request.limit.to_string()),
            ("filter", request.filter.as_str().to_string()),
        ];
        if let Some(cursor) = &request.cursor {
            query.push(("cursor", cursor.clone()));
        }
        self.get(&["titles"], &query).await
    }

    /// `GET /v1/titles/{id}`.
    pub async fn title_detail(&self, id: &str) -> Result<TitleDetail, ClientError> {
        self.get(&["titles", id], &[]).await
    }

    /// `GET /v1/episodes/{id}/sources`.
    pub async fn episode_sources(
        &self,
        episode_id: &str,
    ) -> Result<EpisodeSourcesResponse, ClientError> {
        self.get(&["episodes", episode_id, "sources"], &[]).await
    }

    /// Walk the title listing page by page, following `nextCursor` until
    /// the server reports no further page. The stream ends after the first
    /// error.
    pub fn pages(
        &self,
        first: TitleListRequest,
    ) -> impl Stream<Item = Result<TitleListResponse, ClientError>> + '_ {
        futures::stream::try_unfold(Some(first), move |next| async move {
            let Some(request) = next else {
                return Ok(None);
            };
            let page = self.list_titles(&request).await?;
            let following = page.next_cursor.clone().map(|cursor| TitleListRequest {
                cursor: Some(cursor),
                ..request
            });
            Ok::<_, ClientError>(Some((page, following)))
        })
    }

    // ---- private helpers ----

    /// `/v1/<segments...>` under the base URL. Each segment is
    /// percent-encoded, so ids containing `/`, `?` or `#` stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    async fn get<S>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<S, ClientError>
    where
        S: Schema + DeserializeOwned,
    {
        let response = self
            .client
            .get(self.endpoint(segments))
            .query(query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Map non-2xx responses to [`ClientError::Api`], reading the standard
    /// `{ error, code }` body when present.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let bytes = response.bytes().await?;
        let body =
            serde_json::from_slice::<ErrorResponse>(&bytes).unwrap_or_else(|_| ErrorResponse {
                error: status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string(),
                code: None,
            });
        Err(ClientError::Api {
            status: status.as_u16(),
            error: body.error,
            code: body.code,
        })
    }

    async fn parse_response<S>(response: reqwest::Response) -> Result<S, ClientError>
    where
        S: Schema + DeserializeOwned,
    {
        let bytes = Self::ensure_success(response).await?.bytes().await?;
        parse_slice::<S>(&bytes).map_err(|violations| ClientError::InvalidResponse {
            schema: S::NAME,
            violations,
        })
    }
}
