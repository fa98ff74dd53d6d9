use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};

pub const DEFAULT_POSTS_DIR: &str = "posts";

/// Everything a batch run needs, validated before any request is made.
#[derive(Debug, Clone, PartialEq)]
pub struct SlurpConfig {
    pub blog_url: String,
    pub year: i32,
    pub month: Option<u32>,
    pub posts_root: PathBuf,
    pub timeout: Option<Duration>,
}

impl SlurpConfig {
    pub fn new(blog_url: &str, year: Option<i32>, month: Option<u32>) -> Result<SlurpConfig> {
        let blog_url = blog_url.trim();
        if blog_url.is_empty() {
            return Err(anyhow!(
                "The blog url is required. Have you set the BLOG_URL env variable?"
            ));
        }

        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(anyhow!("Month must be between 1 and 12, got {}", m));
            }
        }

        let year = year.unwrap_or_else(current_year);
        if year < 1 {
            return Err(anyhow!("Year must be positive, got {}", year));
        }

        Ok(SlurpConfig {
            blog_url: with_trailing_slash(blog_url),
            year,
            month,
            posts_root: PathBuf::from(DEFAULT_POSTS_DIR),
            timeout: None,
        })
    }

    pub fn posts_root(mut self, posts_root: impl Into<PathBuf>) -> SlurpConfig {
        self.posts_root = posts_root.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> SlurpConfig {
        self.timeout = timeout;
        self
    }

    /// The requested month, or all twelve.
    pub fn months(&self) -> Vec<u32> {
        match self.month {
            Some(m) => vec![m],
            None => (1..=12).collect(),
        }
    }
}

pub fn current_year() -> i32 {
    Local::now().year()
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
