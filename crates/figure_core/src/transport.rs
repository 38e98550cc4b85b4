use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::error::ErrorKind;
use thiserror::Error;
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Client(_) | FetchError::Network { .. } => ErrorKind::Network,
            FetchError::HttpStatus { .. } => ErrorKind::HttpStatus,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Network { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Where status bodies come from. One call is one fetch; no retries.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<String, FetchError>;
}

pub struct HttpStatusSource {
    http: Client,
    url: Url,
}

impl HttpStatusSource {
    /// `timeout` bounds the whole request, body included.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            url: self.url.to_string(),
            source,
        };

        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: self.url.to_string(),
                status,
            });
        }

        response.text().await.map_err(network)
    }
}
