//! # bulk-dl
//!
//! Backend library for bulk HTTP download and list aggregation.
//!
//! ## Design Philosophy
//!
//! bulk-dl is designed to be:
//! - **Bounded** - A fixed concurrency budget caps in-flight downloads
//! - **Isolated** - One failing item never cancels or delays its siblings
//! - **Collision-safe** - Concurrent items can never overwrite each other
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use bulk_dl::{Config, DownloadPipeline, TracingReporter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = DownloadPipeline::new(Config::default(), Arc::new(TracingReporter))?;
//!
//!     let report = pipeline
//!         .run(
//!             vec![
//!                 "https://example.com/images/a.jpg".to_string(),
//!                 "https://example.com/images/b.jpg".to_string(),
//!             ],
//!             "/tmp/downloads",
//!         )
//!         .await?;
//!
//!     println!("{}", report.summary.summary_line());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP fetch client
pub mod client;
/// Configuration types
pub mod config;
/// Resource discovery boundary
pub mod discover;
/// Error types
pub mod error;
/// Collision-safe persistence
pub mod persist;
/// Download pipeline orchestration
pub mod pipeline;
/// Progress and result reporting
pub mod reporter;
/// Bounded task scheduling
pub mod scheduler;
/// Tracker list aggregation
pub mod tracker;
/// Core work item and outcome types
pub mod types;
/// Utility functions
pub mod utils;
/// URL validation
pub mod validate;

// Re-export commonly used types
pub use client::{ByteStream, FetchClient};
pub use config::{Config, DownloadConfig, HttpConfig, TrackerConfig};
pub use discover::{FixedListDiscovery, ResourceDiscovery};
pub use error::{Error, Result};
pub use pipeline::{BatchReport, DownloadPipeline};
pub use reporter::{ChannelReporter, NullReporter, Reporter, TracingReporter};
pub use tracker::TrackerReport;
pub use types::{OutcomeKind, RunSummary, TaskOutcome, WorkItem};
