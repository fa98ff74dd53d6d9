use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::Client;

/// Chunked body of a fetched resource.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

/// Failures at the HTTP boundary. Everything here degrades the unit of work
/// to "no result" instead of aborting the crawl.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. } | FetchError::Status { url, .. } => url,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { .. } => None,
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the decoded body of a 2xx response.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// GET `url` and return the body of a 2xx response as a chunk stream.
    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError>;
}

/// [`Fetcher`] over one shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<HttpFetcher> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(HttpFetcher { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

fn transport(url: &str, error: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message: error.to_string(),
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| transport(url, e))
    }

    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        let response = self.get(url).await?;
        let owned_url = url.to_string();
        let stream = response
            .bytes_stream()
            .map_err(move |e| transport(&owned_url, e));
        Ok(Box::pin(stream))
    }
}
