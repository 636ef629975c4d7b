//! Tracker list aggregation example
//!
//! Fetches the built-in set of published tracker lists, merges them into one
//! deduplicated sorted list, and writes `tracker.txt` into the current
//! directory.

use bulk_dl::{Config, DownloadPipeline};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let reporter = Arc::new(|line: &str| println!("{line}"));
    let pipeline = DownloadPipeline::new(Config::default(), reporter)?;

    // The default config carries a built-in set of source lists
    let report = pipeline.tracker_list(".").await?;
    println!(
        "{} trackers written to {}",
        report.entries.len(),
        report.path.display()
    );
    Ok(())
}
