use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::config::SlurpConfig;
use crate::fetch::{Fetcher, HttpFetcher};

/// Handles shared read-only by every month, post and image task of a run.
#[derive(Clone)]
pub struct SlurpContext {
    fetcher: Arc<dyn Fetcher>,
    posts_root: PathBuf,
}

impl SlurpContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, posts_root: impl Into<PathBuf>) -> SlurpContext {
        SlurpContext {
            fetcher,
            posts_root: posts_root.into(),
        }
    }

    /// Opens one HTTP connection pool for the duration of the run.
    pub fn from_config(config: &SlurpConfig) -> Result<SlurpContext> {
        let fetcher = HttpFetcher::new(config.timeout)?;
        Ok(SlurpContext::new(Arc::new(fetcher), &config.posts_root))
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    pub fn posts_root(&self) -> &Path {
        &self.posts_root
    }

    pub fn post_dir(&self, slug: &str) -> PathBuf {
        self.posts_root.join(slug)
    }
}
