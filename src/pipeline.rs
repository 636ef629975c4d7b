//! Download pipeline orchestration
//!
//! Wires the validator, fetch client, bounded scheduler, persister and
//! reporter into the end-to-end flow: validate the input, check the target
//! directory, fan the items out under the concurrency cap, stream each
//! payload to a collision-safe path, and report progress as tasks finish.

use crate::client::FetchClient;
use crate::config::Config;
use crate::discover::ResourceDiscovery;
use crate::error::{Error, Result};
use crate::persist::Persister;
use crate::reporter::Reporter;
use crate::scheduler::run_bounded;
use crate::tracker::{self, TrackerReport};
use crate::types::{RunSummary, TaskOutcome, WorkItem};
use crate::utils::ensure_writable_dir;
use crate::validate::validate_url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Everything a finished batch hands back: one outcome per submitted item
/// (in completion order) and the derived totals.
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// One outcome per work item, ordered by completion.
    pub outcomes: Vec<TaskOutcome>,
    /// Totals and elapsed time for the whole batch.
    pub summary: RunSummary,
}

/// The bounded-concurrency download pipeline.
///
/// One instance owns a connection-reusing HTTP client and a reporter; each
/// [`run`](Self::run) call is an independent batch with its own claimed-path
/// registry and summary. Per-item failures become `Failed` outcomes; only
/// bad input, an unusable target directory, or a torn-down worker fail the
/// run as a whole.
pub struct DownloadPipeline {
    config: Config,
    client: FetchClient,
    reporter: Arc<dyn Reporter>,
}

impl DownloadPipeline {
    /// Build a pipeline from `config`, reporting through `reporter`.
    pub fn new(config: Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let client = FetchClient::new(&config.http)?;
        Ok(Self {
            config,
            client,
            reporter,
        })
    }

    /// Download every URL into `target_dir`, at most
    /// `download.max_concurrent_downloads` at a time.
    ///
    /// All URLs are validated and the directory precondition is checked
    /// before the first request goes out; any violation aborts the run with
    /// nothing fetched. After that, every item runs to exactly one outcome
    /// and the reporter sees a start line, one line per finished task and a
    /// final summary line.
    pub async fn run<I, S>(&self, urls: I, target_dir: impl AsRef<Path>) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let target_dir = target_dir.as_ref();

        let mut validated = Vec::new();
        for url in urls {
            let url = url.into();
            let trimmed = validate_url(&url).map_err(|e| self.notify_err(e))?;
            validated.push(trimmed.to_string());
        }
        ensure_writable_dir(target_dir).map_err(|e| self.notify_err(e))?;

        self.execute(WorkItem::batch(validated), target_dir).await
    }

    /// Fan `items` out under the concurrency cap, report each completion
    /// and collect the batch report.
    async fn execute(&self, items: Vec<WorkItem>, target_dir: &Path) -> Result<BatchReport> {
        let total = items.len();
        self.reporter.notify(&format!(
            "Starting download: {} resources -> {}",
            total,
            target_dir.display()
        ));

        let client = self.client.clone();
        let persister = Arc::new(Persister::new(target_dir));
        let reporter = Arc::clone(&self.reporter);
        let started = Instant::now();
        let outcomes = run_bounded(
            self.config.download.max_concurrent_downloads,
            items,
            move |item| {
                let client = client.clone();
                let persister = Arc::clone(&persister);
                let reporter = Arc::clone(&reporter);
                async move {
                    let outcome = download_one(&client, &persister, item).await;
                    reporter.notify(&outcome.progress_line(total));
                    outcome
                }
            },
        )
        .await
        .map_err(|e| self.notify_err(e))?;

        let summary = RunSummary::from_outcomes(&outcomes, started.elapsed());
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "download batch finished"
        );
        self.reporter.notify(&summary.summary_line());
        Ok(BatchReport { outcomes, summary })
    }

    /// Discover the resources behind `start_url`, then download them all.
    ///
    /// The starting URL and the target directory are checked before the
    /// discovery call goes out. Discovered URLs are scraped, not caller
    /// input: a malformed one becomes a single `Failed` outcome instead of
    /// aborting its siblings.
    pub async fn run_with_discovery(
        &self,
        discovery: &dyn ResourceDiscovery,
        start_url: &str,
        target_dir: impl AsRef<Path>,
    ) -> Result<BatchReport> {
        let target_dir = target_dir.as_ref();
        let start = validate_url(start_url).map_err(|e| self.notify_err(e))?;
        ensure_writable_dir(target_dir).map_err(|e| self.notify_err(e))?;

        let urls = discovery
            .discover_resources(start)
            .await
            .map_err(|e| self.notify_err(e))?;
        self.execute(WorkItem::batch(urls), target_dir).await
    }

    /// Run a batch on a background task so the caller's own control flow
    /// stays responsive. The final report comes back through the join
    /// handle; incremental messages keep flowing through the reporter.
    pub fn spawn(
        self: Arc<Self>,
        urls: Vec<String>,
        target_dir: impl Into<PathBuf>,
    ) -> JoinHandle<Result<BatchReport>> {
        let target_dir = target_dir.into();
        tokio::spawn(async move { self.run(urls, target_dir).await })
    }

    /// Build the merged tracker list with this pipeline's shared HTTP
    /// client and reporter, writing to the configured output name inside
    /// `target_dir`.
    ///
    /// The directory precondition is checked before any source is fetched;
    /// a violation aborts with nothing fetched, echoed through the reporter
    /// like any other run-level failure.
    pub async fn tracker_list(&self, target_dir: impl AsRef<Path>) -> Result<TrackerReport> {
        tracker::build_tracker_list(
            &self.client,
            &self.config.tracker,
            target_dir.as_ref(),
            self.reporter.as_ref(),
        )
        .await
        .map_err(|e| self.notify_err(e))
    }

    /// Background-task variant of [`tracker_list`](Self::tracker_list).
    pub fn spawn_tracker_list(
        self: Arc<Self>,
        target_dir: impl Into<PathBuf>,
    ) -> JoinHandle<Result<TrackerReport>> {
        let target_dir = target_dir.into();
        tokio::spawn(async move { self.tracker_list(target_dir).await })
    }

    /// Run-level failures are echoed through the reporter before they
    /// surface to the caller, so no run ends silently.
    fn notify_err(&self, err: Error) -> Error {
        self.reporter.notify(&err.to_string());
        err
    }
}

/// Validate, fetch and stream one item to disk, folding any error into the
/// outcome. Nothing escapes the task boundary.
async fn download_one(client: &FetchClient, persister: &Persister, item: WorkItem) -> TaskOutcome {
    debug!(index = item.sequence_index, url = %item.source_url, "download task started");
    let result = async {
        let url = validate_url(&item.source_url)?;
        let stream = client.fetch_stream(url).await?;
        persister.persist(&item, stream).await
    }
    .await;

    match result {
        Ok((local_path, bytes_written)) => TaskOutcome::saved(item, local_path, bytes_written),
        Err(err) => TaskOutcome::failed(item, err.to_string()),
    }
}
