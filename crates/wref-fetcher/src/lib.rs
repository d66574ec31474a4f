use tokio_util::sync::CancellationToken;
use wref_types::{Query, TranslationEntry};

pub mod http;
pub mod wire;

pub use http::{ClientError, HttpFetcher};

/// Result of one lookup, in the service's ranking order
pub type FetchOutcome = Result<Vec<TranslationEntry>, FetchError>;

/// Dictionary lookup provider interface
#[async_trait::async_trait]
pub trait TranslationFetcher: Send + Sync {
    /// Look up `query`, returning entries in the provider's order.
    ///
    /// Implementations must check `cancel` before doing any work and return
    /// [`FetchError::Cancelled`] promptly once it fires.
    async fn fetch(&self, query: &Query, cancel: &CancellationToken) -> FetchOutcome;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("no entry found")]
    NotFound,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("unexpected service response: {0}")]
    ServiceFormatError(String),

    #[error("lookup cancelled")]
    Cancelled,
}

impl FetchError {
    /// Only transport problems are worth re-issuing
    pub fn is_retriable(&self) -> bool {
        matches!(self, FetchError::NetworkError(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::ServiceFormatError(err.to_string());
        }

        let reason = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        FetchError::NetworkError(reason.to_string())
    }
}
