//! Basic bulk download example
//!
//! This example demonstrates the core download flow:
//! - Building a pipeline with a concurrency cap
//! - Reporting progress through a plain closure
//! - Reading the final batch report

use bulk_dl::DownloadPipeline;
use bulk_dl::config::{Config, DownloadConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: fetch_gallery <url> [<url> ...]");
        return Ok(());
    }

    // Build configuration
    let config = Config {
        download: DownloadConfig {
            max_concurrent_downloads: 4,
        },
        ..Default::default()
    };

    // Downloads land in ./downloads, which must exist before the run starts
    let target = std::path::Path::new("downloads");
    std::fs::create_dir_all(target)?;

    // Any Fn(&str) can act as the reporter; stdout is enough here
    let reporter = Arc::new(|line: &str| println!("{line}"));
    let pipeline = DownloadPipeline::new(config, reporter)?;

    let report = pipeline.run(urls, target).await?;
    if report.summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
