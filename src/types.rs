//! Core types for bulk-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One unit of fetch-and-persist work with a stable reporting index
///
/// The sequence index is assigned at submission time, is 1-based, and is only
/// used for human-readable progress lines. It carries no ordering guarantee:
/// tasks complete and report in whatever order they finish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// 1-based position of this item within its submission batch
    pub sequence_index: usize,

    /// The URL this item will fetch
    pub source_url: String,
}

impl WorkItem {
    /// Create a work item with an explicit sequence index
    pub fn new(sequence_index: usize, source_url: impl Into<String>) -> Self {
        Self {
            sequence_index,
            source_url: source_url.into(),
        }
    }

    /// Build a submission batch from an ordered URL list, assigning 1-based
    /// sequence indexes in input order
    pub fn batch<I, S>(urls: I) -> Vec<WorkItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(i, url)| WorkItem::new(i + 1, url))
            .collect()
    }
}

/// What happened to one work item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The resource was fetched and written to disk
    Saved {
        /// Where the file ended up after collision resolution
        local_path: PathBuf,
        /// Total bytes streamed to disk
        bytes_written: u64,
    },
    /// The item failed at some step (validation, transport, filesystem)
    Failed {
        /// Human-readable cause, shown verbatim in progress lines
        reason: String,
    },
}

/// The success-or-failure result of processing one WorkItem
///
/// Created exactly once per item by the worker that processed it; consumed by
/// the reporter and the summary builder. The originating WorkItem always rides
/// along so failure lines can name the URL that failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// The work item this outcome belongs to
    pub item: WorkItem,

    /// Success or failure details
    pub kind: OutcomeKind,
}

impl TaskOutcome {
    /// Record a successful download
    pub fn saved(item: WorkItem, local_path: impl Into<PathBuf>, bytes_written: u64) -> Self {
        Self {
            item,
            kind: OutcomeKind::Saved {
                local_path: local_path.into(),
                bytes_written,
            },
        }
    }

    /// Record a failed download with a human-readable reason
    pub fn failed(item: WorkItem, reason: impl Into<String>) -> Self {
        Self {
            item,
            kind: OutcomeKind::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Saved { .. })
    }

    /// One-line progress message for this outcome
    ///
    /// Format: `[<index>/<total>] Saved: <path> (<bytes> bytes)` on success,
    /// `[<index>/<total>] Failed: <url> -> <reason>` on failure.
    pub fn progress_line(&self, total: usize) -> String {
        match &self.kind {
            OutcomeKind::Saved {
                local_path,
                bytes_written,
            } => format!(
                "[{}/{}] Saved: {} ({} bytes)",
                self.item.sequence_index,
                total,
                local_path.display(),
                bytes_written
            ),
            OutcomeKind::Failed { reason } => format!(
                "[{}/{}] Failed: {} -> {}",
                self.item.sequence_index, total, self.item.source_url, reason
            ),
        }
    }
}

/// Aggregate counts and timing for one finished batch
///
/// Derived from the collected outcomes after the last task completes; never
/// stored or updated incrementally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of work items submitted
    pub total: usize,

    /// Number of items that produced a file
    pub succeeded: usize,

    /// Number of items that failed
    pub failed: usize,

    /// Wall-clock time from scheduling start to last outcome collected
    pub elapsed: Duration,
}

impl RunSummary {
    /// Derive the summary from a batch's collected outcomes
    pub fn from_outcomes(outcomes: &[TaskOutcome], elapsed: Duration) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            elapsed,
        }
    }

    /// One-line end-of-run message
    ///
    /// Format: `Downloaded: <n>, Failed: <n>, Elapsed: <seconds>s` with
    /// seconds rendered to millisecond precision.
    pub fn summary_line(&self) -> String {
        format!(
            "Downloaded: {}, Failed: {}, Elapsed: {:.3}s",
            self.succeeded,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}
