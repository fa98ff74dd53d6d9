use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use blog_slurper::{slurp_blog, SlurpConfig, SlurpContext};
use clap::Parser;

/// Slurp blog posts and images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Blog URL, e.g. http://example.blogspot.com/
    #[arg(short = 'u', long, env = "BLOG_URL")]
    blog_url: String,

    /// Year to slurp. Default is current year
    #[arg(short, long, env = "BLOG_YEAR")]
    year: Option<i32>,

    /// Month to slurp. Default is all months
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Folder the posts are saved under
    #[arg(short = 'o', long, env = "BLOG_POSTS_DIR", default_value = "posts")]
    posts_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = SlurpConfig::new(&cli.blog_url, cli.year, cli.month)?
        .posts_root(&cli.posts_dir)
        .timeout(cli.timeout.map(Duration::from_secs));

    let ctx = SlurpContext::from_config(&config)?;
    let report = slurp_blog(&ctx, &config).await;
    drop(ctx);

    println!(
        "Saved {} posts and {} images to {}",
        report.posts_saved(),
        report.images_saved(),
        config.posts_root.display()
    );

    if let Some(report_path) = &cli.report {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        fs::write(report_path, json)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        println!("Report saved to {}", report_path.display());
    }

    Ok(())
}
