use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use blog_slurper::{parse_post, Fetcher, HttpFetcher};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Get URL from command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a post URL and a test name");
        eprintln!("Usage: cargo run --bin save_page_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching HTML from {}...", url);

    let fetcher = HttpFetcher::new(None)?;
    let html = fetcher
        .fetch_text(url)
        .await
        .context("Failed to fetch page")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    match parse_post(&html) {
        Ok(post) => {
            println!("⚠️ Parse succeeded as {}. This may not be a failure case.", post.file_name());
        }
        Err(e) => {
            println!("✅ Parse failed with error: {:#}", e);
            println!("\nThis test case has been saved and will be included in regression tests.");
        }
    }

    Ok(())
}
