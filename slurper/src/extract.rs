use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Weekday};
use log::{error, info};

use crate::context::SlurpContext;
use crate::markup::Document;
use crate::post::{clean_title, ImageRef, Post};

/// The part after `<Weekday>, `, e.g. "January 05, 2020".
const DATE_FORMAT: &str = "%B %d, %Y";

/// Parse `<Weekday>, <Month> <Day>, <Year>` (e.g. "Monday, January 05, 2020").
///
/// The weekday must be a real weekday name, full or abbreviated, but is not
/// checked against the date.
pub fn parse_date_header(header: &str) -> Result<NaiveDate> {
    let header = header.trim();
    let (weekday, date) = header
        .split_once(", ")
        .ok_or_else(|| anyhow!("Unparseable date header: {:?}", header))?;

    if weekday.parse::<Weekday>().is_err() {
        return Err(anyhow!("Unparseable date header: {:?}", header));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .with_context(|| format!("Unparseable date header: {:?}", header))
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Non-empty trimmed lines, in order. Bare `\r` and Unicode line and
/// paragraph separators also end a line.
pub fn body_lines(text: &str) -> Vec<String> {
    text.split(is_line_break)
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

pub fn parse_post(html: &str) -> Result<Post> {
    let document = Document::parse(html);

    let date_header = document
        .find(".date-header")?
        .ok_or_else(|| anyhow!("No date header found"))?;
    let date = parse_date_header(&date_header.text())?;

    let title = match document.find(".post-title")? {
        Some(el) => clean_title(&el.text()),
        None => clean_title(""),
    };

    let body = document
        .find(".post-body")?
        .ok_or_else(|| anyhow!("No post body found"))?;

    let image_refs = body
        .find_all("img")?
        .into_iter()
        .filter_map(|img| img.attr("src"))
        .map(|src| ImageRef::new(src))
        .collect();

    Ok(Post {
        date,
        title,
        body_lines: body_lines(&body.text()),
        image_refs,
    })
}

/// Fetch and parse one post.
///
/// `Ok(None)` means the page could not be fetched, which was logged. A page
/// that arrives but does not parse is an error for this post only.
pub async fn extract_post(ctx: &SlurpContext, post_url: &str) -> Result<Option<Post>> {
    info!("Extracting post {}", post_url);

    let html = match ctx.fetcher().fetch_text(post_url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Fetch failed for {} [{:?}]: {}", e.url(), e.status(), e);
            return Ok(None);
        }
    };

    let post = parse_post(&html).with_context(|| format!("Failed to parse post {}", post_url))?;
    Ok(Some(post))
}
