use anyhow::{Context, Result};
use log::{debug, error, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::SlurpContext;
use crate::markup::Document;

const ARCHIVE_LIST_QUERY: &str = "#BlogArchive1_ArchiveList";
const YEAR_LINK_CLASS: &str = "post-count-link";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArchiveIndexEntry {
    pub year: i32,
    pub month: u32,
    pub post_url: String,
}

pub fn month_index_url(blog_url: &str, year: i32, month: u32) -> String {
    format!("{}{}/{:02}", blog_url, year, month)
}

fn post_link_pattern(year: i32, month: u32) -> Result<Regex> {
    let pattern = format!(r"^[\w:/.]+{}/{:02}/[\w-]+", year, month);
    Regex::new(&pattern).with_context(|| format!("Invalid post link pattern: {}", pattern))
}

/// Post links for `year`/`month` listed by the archive widget.
///
/// The widget groups links by year under direct `<ul>` children; each group
/// carries a `post-count-link` whose text is the year. Only hrefs shaped like
/// `<prefix><year>/<MM>/<slug>` are kept, since the same markup can expose
/// other years' posts. A page without the widget or without the requested
/// year yields no entries.
pub fn extract_month_links(html: &str, year: i32, month: u32) -> Result<Vec<ArchiveIndexEntry>> {
    let document = Document::parse(html);
    let archive_list = match document.find(ARCHIVE_LIST_QUERY)? {
        Some(list) => list,
        None => {
            debug!("No archive list found for {}/{:02}", year, month);
            return Ok(Vec::new());
        }
    };

    let pattern = post_link_pattern(year, month)?;

    for group in archive_list.children(Some("ul")) {
        for item in group.children(None) {
            let year_link = item
                .children(Some("a"))
                .into_iter()
                .find(|a| a.has_class(YEAR_LINK_CLASS));
            let link_year = year_link.and_then(|a| a.text().trim().parse::<i32>().ok());

            if link_year == Some(year) {
                let entries = group
                    .find_all("a")?
                    .into_iter()
                    .filter_map(|a| a.attr("href"))
                    .filter(|href| pattern.is_match(href))
                    .map(|href| ArchiveIndexEntry {
                        year,
                        month,
                        post_url: href.to_string(),
                    })
                    .collect();
                return Ok(entries);
            }
        }
    }

    debug!("Archive list has no group for {}", year);
    Ok(Vec::new())
}

/// Resolve the posts of one month. Fetch failures are logged and treated as
/// a month without posts.
pub async fn resolve_month(
    ctx: &SlurpContext,
    blog_url: &str,
    year: i32,
    month: u32,
) -> Result<Vec<ArchiveIndexEntry>> {
    let url = month_index_url(blog_url, year, month);
    info!("Resolving archive {}", url);

    let html = match ctx.fetcher().fetch_text(&url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Fetch failed for {} [{:?}]: {}", e.url(), e.status(), e);
            return Ok(Vec::new());
        }
    };

    let entries = extract_month_links(&html, year, month)?;
    info!("Found {} posts for {}/{:02}", entries.len(), year, month);
    Ok(entries)
}
