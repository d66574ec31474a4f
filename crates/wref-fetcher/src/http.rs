use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use tokio_util::sync::CancellationToken;
use wref_config::fetcher::FetcherConfig;
use wref_types::Query;

use crate::wire::WireResponse;
use crate::{FetchError, FetchOutcome, ProviderMetadata, TranslationFetcher};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Fetches entries from a JSON dictionary lookup service at `{api_url}/{pair}/{word}`
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, ClientError> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.api_url.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, api_url })
    }

    /// Full request URL for `query`; the word is escaped as a single path segment
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(&query.pair.code())
                .push(&query.word);
        }
        url
    }

    async fn request(&self, query: &Query) -> FetchOutcome {
        let url = self.request_url(query);
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if let Some(err) = classify_status(status) {
            return Err(err);
        }

        let body = response.text().await?;
        let wire: WireResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::ServiceFormatError(format!("failed to parse response: {e}")))?;

        Ok(wire.into_entries())
    }
}

#[async_trait]
impl TranslationFetcher for HttpFetcher {
    async fn fetch(&self, query: &Query, cancel: &CancellationToken) -> FetchOutcome {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            outcome = self.request(query) => outcome,
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "WordReference".to_string(),
            endpoint: self.api_url.to_string(),
        }
    }
}

/// Map a non-success status to the matching error class
pub fn classify_status(status: StatusCode) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }

    let err = match status {
        StatusCode::NOT_FOUND => FetchError::NotFound,
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            FetchError::NetworkError(format!("HTTP {}", status.as_u16()))
        }
        s if s.is_server_error() => FetchError::NetworkError(format!("HTTP {}", s.as_u16())),
        s => FetchError::ServiceFormatError(format!("unexpected HTTP status {s}")),
    };
    Some(err)
}
