pub mod archive;
pub mod config;
pub mod context;
pub mod extract;
pub mod fetch;
pub mod markup;
pub mod post;
pub mod slurp;
pub mod store;

// Unit tests and their HTML fixtures
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::{extract_month_links, month_index_url, resolve_month, ArchiveIndexEntry};
pub use crate::config::SlurpConfig;
pub use crate::context::SlurpContext;
pub use crate::extract::{extract_post, parse_post};
pub use crate::fetch::{FetchError, Fetcher, HttpFetcher};
pub use crate::post::{clean_title, ImageRef, Post};
pub use crate::slurp::{slurp_blog, slurp_month, BatchReport, MonthReport, PostReport};
pub use crate::store::{save_post_image, save_post_text};
