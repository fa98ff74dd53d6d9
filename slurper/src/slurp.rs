use futures::future::join_all;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::archive::{resolve_month, ArchiveIndexEntry};
use crate::config::SlurpConfig;
use crate::context::SlurpContext;
use crate::extract::extract_post;
use crate::post::Post;
use crate::store::{ensure_dir, save_post_image, save_post_text};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageOutcome {
    pub source_url: String,
    pub saved: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostReport {
    pub post_url: String,
    pub slug: Option<String>,
    pub text_saved: bool,
    pub images: Vec<ImageOutcome>,
    pub error: Option<String>,
}

impl PostReport {
    fn failed(post_url: &str, error: Option<String>) -> PostReport {
        PostReport {
            post_url: post_url.to_string(),
            slug: None,
            text_saved: false,
            images: Vec::new(),
            error,
        }
    }

    pub fn images_saved(&self) -> usize {
        self.images.iter().filter(|image| image.saved).count()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub posts: Vec<PostReport>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchReport {
    pub blog_url: String,
    pub year: i32,
    pub months: Vec<MonthReport>,
}

impl BatchReport {
    pub fn posts_saved(&self) -> usize {
        self.months
            .iter()
            .flat_map(|month| &month.posts)
            .filter(|post| post.text_saved)
            .count()
    }

    pub fn images_saved(&self) -> usize {
        self.months
            .iter()
            .flat_map(|month| &month.posts)
            .map(PostReport::images_saved)
            .sum()
    }
}

/// Write one post's text, then download all of its images concurrently.
/// Every image finishes, saved or not, before this returns.
async fn save_post(ctx: &SlurpContext, post_url: &str, post: &Post) -> PostReport {
    let slug = post.slug();

    let text_saved = match save_post_text(ctx, post).await {
        Ok(_) => true,
        Err(e) => {
            error!("Failed to save post text for {}: {:#}", slug, e);
            false
        }
    };

    let downloads = post
        .image_refs
        .iter()
        .map(|image| save_post_image(ctx, image, &slug));
    let results = join_all(downloads).await;

    let images = post
        .image_refs
        .iter()
        .zip(results)
        .map(|(image, result)| match result {
            Ok(_) => ImageOutcome {
                source_url: image.source_url.clone(),
                saved: true,
                error: None,
            },
            Err(e) => {
                error!("Failed to save image {}: {:#}", image.source_url, e);
                ImageOutcome {
                    source_url: image.source_url.clone(),
                    saved: false,
                    error: Some(format!("{:#}", e)),
                }
            }
        })
        .collect();

    PostReport {
        post_url: post_url.to_string(),
        slug: Some(slug),
        text_saved,
        images,
        error: None,
    }
}

async fn slurp_post(ctx: &SlurpContext, entry: &ArchiveIndexEntry) -> PostReport {
    match extract_post(ctx, &entry.post_url).await {
        Ok(Some(post)) => save_post(ctx, &entry.post_url, &post).await,
        Ok(None) => PostReport::failed(&entry.post_url, Some("fetch failed".to_string())),
        Err(e) => {
            error!("Skipping post {}: {:#}", entry.post_url, e);
            PostReport::failed(&entry.post_url, Some(format!("{:#}", e)))
        }
    }
}

/// Slurp posts and images for one month.
///
/// Posts are handled one at a time in archive order; only the images of a
/// single post are in flight together.
pub async fn slurp_month(ctx: &SlurpContext, blog_url: &str, year: i32, month: u32) -> MonthReport {
    let entries = match resolve_month(ctx, blog_url, year, month).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to resolve {}/{:02}: {:#}", year, month, e);
            Vec::new()
        }
    };

    let mut posts = Vec::with_capacity(entries.len());
    for entry in &entries {
        posts.push(slurp_post(ctx, entry).await);
    }

    info!(
        "Finished {}/{:02}: {} of {} posts saved",
        year,
        month,
        posts.iter().filter(|post| post.text_saved).count(),
        entries.len()
    );

    MonthReport { year, month, posts }
}

/// Slurp every requested month concurrently over one shared context. A month
/// that fails does not stop the others.
pub async fn slurp_blog(ctx: &SlurpContext, config: &SlurpConfig) -> BatchReport {
    if let Err(e) = ensure_dir(ctx.posts_root()).await {
        warn!("Posts folder unavailable, every write will fail: {:#}", e);
    }

    let months = config
        .months()
        .into_iter()
        .map(|month| slurp_month(ctx, &config.blog_url, config.year, month));
    let months = join_all(months).await;

    BatchReport {
        blog_url: config.blog_url.clone(),
        year: config.year,
        months,
    }
}
