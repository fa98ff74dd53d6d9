use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;

use crate::context::SlurpContext;
use crate::fetch::{ByteStream, FetchError, Fetcher};

pub mod fixtures;

/// Helper function to save HTML that failed to parse for future regression testing
pub fn save_failed_html(html: &str, test_name: &str) -> Result<()> {
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir)?;

    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, html)?;

    println!("Saved failed HTML to {}", file_path.display());
    Ok(())
}

/// What the fake site answers for one URL.
#[derive(Clone)]
pub enum FakeResponse {
    Html(String),
    Chunks(Vec<Vec<u8>>),
    Status(u16),
    /// Sends these bytes, then the connection drops.
    Truncated(Vec<u8>),
}

/// In-memory site. URLs it does not know fail like an unreachable host.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> FakeFetcher {
        FakeFetcher::default()
    }

    pub fn html(mut self, url: &str, html: &str) -> FakeFetcher {
        self.responses
            .insert(url.to_string(), FakeResponse::Html(html.to_string()));
        self
    }

    pub fn bytes(mut self, url: &str, chunks: &[&[u8]]) -> FakeFetcher {
        let chunks = chunks.iter().map(|chunk| chunk.to_vec()).collect();
        self.responses
            .insert(url.to_string(), FakeResponse::Chunks(chunks));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> FakeFetcher {
        self.responses
            .insert(url.to_string(), FakeResponse::Status(status));
        self
    }

    pub fn truncated(mut self, url: &str, partial: &[u8]) -> FakeFetcher {
        self.responses
            .insert(url.to_string(), FakeResponse::Truncated(partial.to_vec()));
        self
    }

    /// Every URL requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn respond(&self, url: &str) -> Result<FakeResponse, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(FakeResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(response) => Ok(response.clone()),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        match self.respond(url)? {
            FakeResponse::Html(html) => Ok(html),
            FakeResponse::Chunks(chunks) => Ok(String::from_utf8_lossy(&chunks.concat()).into_owned()),
            FakeResponse::Truncated(_) | FakeResponse::Status(_) => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection reset".to_string(),
            }),
        }
    }

    async fn fetch_stream(&self, url: &str) -> Result<ByteStream, FetchError> {
        let items: Vec<Result<Bytes, FetchError>> = match self.respond(url)? {
            FakeResponse::Html(html) => vec![Ok(Bytes::from(html))],
            FakeResponse::Chunks(chunks) => chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect(),
            FakeResponse::Truncated(partial) => vec![
                Ok(Bytes::from(partial)),
                Err(FetchError::Transport {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                }),
            ],
            FakeResponse::Status(_) => Vec::new(),
        };
        Ok(Box::pin(stream::iter(items)))
    }
}

/// Context over `fetcher` writing into `posts_root`, keeping a handle on the
/// fake so tests can inspect the requests.
pub fn fake_context(fetcher: FakeFetcher, posts_root: &Path) -> (SlurpContext, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    let ctx = SlurpContext::new(fetcher.clone(), posts_root);
    (ctx, fetcher)
}
