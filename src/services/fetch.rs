use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use thiserror::Error;

pub struct FetchedResource {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("request to {0} timed out")]
    Timeout(String),
    #[error("remote answered with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// One-shot outbound GET. Implementations must not retry.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedResource, FetchError>;
}

pub struct HttpImageFetcher {
    pub client: Client,
}

impl HttpImageFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedResource, FetchError> {
        tracing::debug!("Fetching {} (timeout {:?})", url, timeout);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "image/*")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| classify(url, e))?;

        Ok(FetchedResource {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

fn classify(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if err.is_builder() {
        FetchError::InvalidUrl(url.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}
