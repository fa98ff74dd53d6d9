use std::sync::Arc;

use anyhow::{Context, Result};
use blog_slurper::{month_index_url, resolve_month, HttpFetcher, SlurpConfig, SlurpContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Get blog URL, year and month from command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        eprintln!("Please provide a blog URL, year and month as arguments");
        eprintln!("Usage: cargo run --bin archive_links <BLOG_URL> <YEAR> <MONTH>");
        eprintln!("Example: cargo run --bin archive_links http://example.blogspot.com/ 2020 01");
        std::process::exit(1);
    }

    let year = args[2].parse::<i32>().context("Invalid year format")?;
    let month = args[3].parse::<u32>().context("Invalid month format")?;
    let config = SlurpConfig::new(&args[1], Some(year), Some(month))?;

    println!(
        "Navigating to {}...",
        month_index_url(&config.blog_url, year, month)
    );

    let ctx = SlurpContext::new(Arc::new(HttpFetcher::new(None)?), &config.posts_root);
    let entries = resolve_month(&ctx, &config.blog_url, year, month).await?;

    if entries.is_empty() {
        println!("No posts found for {}/{:02}", year, month);
        return Ok(());
    }

    println!("Found {} posts for {}/{:02}", entries.len(), year, month);
    for (index, entry) in entries.iter().enumerate() {
        println!("{}. {}", index + 1, entry.post_url);
    }

    Ok(())
}
