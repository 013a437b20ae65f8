//! HTTP access to the candidates API
//!
//! `CandidateSource` is the seam between the query controller and the
//! transport. `HttpCandidateSource` is the reqwest-backed implementation;
//! tests substitute their own.

use std::future::Future;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::models::CandidatePage;
use crate::query::QueryParams;

/// Failure of a single candidates request
#[derive(Debug, Error)]
pub enum ApiError {
    /// Superseded by a newer request; never shown to the user
    #[error("request cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Something that can answer a candidates query
pub trait CandidateSource: Send + Sync + 'static {
    fn fetch(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = Result<CandidatePage, ApiError>> + Send;
}

/// Run `fetch` until it completes or `cancel` fires, whichever is first
pub async fn fetch_cancellable<S: CandidateSource + ?Sized>(
    source: &S,
    params: &QueryParams,
    cancel: &CancellationToken,
) -> Result<CandidatePage, ApiError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = source.fetch(params) => result,
    }
}

/// Candidates API over HTTP
#[derive(Debug, Clone)]
pub struct HttpCandidateSource {
    client: Client,
    endpoint: Url,
}

impl HttpCandidateSource {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Parse `raw` and build a source for it
    pub fn from_url(raw: &str) -> Result<Self, ApiError> {
        let endpoint = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(endpoint))
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `params`, without sending anything
    #[must_use]
    pub fn request_url(&self, params: &QueryParams) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.pairs() {
                query.append_pair(key, value);
            }
        }
        url
    }
}

impl CandidateSource for HttpCandidateSource {
    async fn fetch(&self, params: &QueryParams) -> Result<CandidatePage, ApiError> {
        let url = self.request_url(params);
        tracing::debug!(%url, "GET candidates");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        response
            .json::<CandidatePage>()
            .await
            .map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterKey, FilterState, derive_params};
    use std::time::Duration;

    fn source() -> HttpCandidateSource {
        HttpCandidateSource::from_url("http://localhost:8000/api/candidates").unwrap()
    }

    #[test]
    fn test_request_url_for_search() {
        let params = derive_params("alice", &FilterState::default(), 1);
        let url = source().request_url(&params);
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/candidates?page=1&per_page=5&search=alice"
        );
    }

    #[test]
    fn test_request_url_repeats_sources() {
        let filters = FilterState::default()
            .with_value(FilterKey::Source, "LinkedIn", true)
            .with_value(FilterKey::Source, "GitHub", true);
        let url = source().request_url(&derive_params("", &filters, 1));
        assert_eq!(url.query(), Some("page=1&per_page=5&source=LinkedIn&source=GitHub"));
    }

    #[test]
    fn test_request_url_encodes_values() {
        let filters = FilterState::default().with_value(FilterKey::Source, "Career Page", true);
        let url = source().request_url(&derive_params("o'neil & co", &filters, 2));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("search".to_string(), "o'neil & co".to_string())));
        assert!(pairs.contains(&("source".to_string(), "Career Page".to_string())));
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        let err = HttpCandidateSource::from_url("::nope::").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    struct NeverSource;

    impl CandidateSource for NeverSource {
        async fn fetch(&self, _params: &QueryParams) -> Result<CandidatePage, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_fetch_cancellable_returns_cancelled() {
        let cancel = CancellationToken::new();
        let params = derive_params("", &FilterState::default(), 1);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = fetch_cancellable(&NeverSource, &params, &cancel).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) is closed on any sane test host
        let source = HttpCandidateSource::from_url("http://127.0.0.1:9/api/candidates").unwrap();
        let params = derive_params("", &FilterState::default(), 1);
        let err = source.fetch(&params).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.is_cancelled());
    }
}
