//! Tracker list aggregation
//!
//! Fetches several published tracker lists, merges them into one
//! deduplicated, sorted list and writes it out as a CRLF-joined text file.
//! A source that cannot be fetched is logged and skipped; the merged result
//! is whatever the remaining sources yielded.

use crate::client::FetchClient;
use crate::config::TrackerConfig;
use crate::error::Result;
use crate::reporter::Reporter;
use crate::scheduler::run_bounded;
use crate::types::WorkItem;
use crate::utils::ensure_writable_dir;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What one aggregation run produced: the merged entries and where they
/// were written.
#[derive(Debug, Clone)]
pub struct TrackerReport {
    /// Sorted, deduplicated entries from all reachable sources.
    pub entries: Vec<String>,
    /// Path of the written list file.
    pub path: PathBuf,
}

/// Parse one tracker list document into its entries.
///
/// Lines are trimmed; blank lines and `#` comments are dropped, and a
/// leading UTF-8 BOM is ignored. Duplicates within the document collapse.
pub fn parse_tracker_text(text: &str) -> BTreeSet<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Fetch every source and merge the parsed entries into one sorted,
/// deduplicated list.
///
/// All sources are fetched at once; the merge is a set union, so the order
/// in which sources answer never changes the result. A failing source
/// contributes nothing and is logged at warn level.
pub async fn aggregate(client: &FetchClient, sources: &[String]) -> Result<Vec<String>> {
    let items = WorkItem::batch(sources.iter().cloned());
    let limit = items.len();

    let client = client.clone();
    let per_source = run_bounded(limit, items, move |item| {
        let client = client.clone();
        async move {
            match client.fetch_text(&item.source_url).await {
                Ok(text) => {
                    let entries = parse_tracker_text(&text);
                    debug!(url = %item.source_url, count = entries.len(), "tracker source fetched");
                    entries
                }
                Err(err) => {
                    warn!(url = %item.source_url, error = %err, "tracker source failed, skipping");
                    BTreeSet::new()
                }
            }
        }
    })
    .await?;

    let mut merged = BTreeSet::new();
    for entries in per_source {
        merged.extend(entries);
    }
    Ok(merged.into_iter().collect())
}

/// Write `entries` to `path` joined by CRLF, with no trailing line
/// terminator. An existing file is replaced.
pub async fn save(entries: &[String], path: &Path) -> Result<()> {
    let body = entries.join("\r\n");
    tokio::fs::write(path, body).await?;
    Ok(())
}

/// Aggregate the configured tracker sources and write the merged list to
/// `<dir>/<output_name>`, reporting the saved path.
///
/// `dir` must already exist, be a directory and be writable; a violation
/// aborts before any source is fetched.
pub async fn build_tracker_list(
    client: &FetchClient,
    config: &TrackerConfig,
    dir: &Path,
    reporter: &dyn Reporter,
) -> Result<TrackerReport> {
    ensure_writable_dir(dir)?;
    let entries = aggregate(client, &config.sources).await?;
    let path = dir.join(&config.output_name);
    save(&entries, &path).await?;
    info!(count = entries.len(), path = %path.display(), "tracker list saved");
    reporter.notify(&format!("Tracker list saved to: {}", path.display()));
    Ok(TrackerReport { entries, path })
}
