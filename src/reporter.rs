//! Progress reporting — the observer boundary between pipeline and embedder
//!
//! The pipeline emits plain-text progress lines (start-of-run, one per
//! completed task, end-of-run summary) through a [`Reporter`]. Reporting is
//! best-effort by contract: implementations must be cheap, must not block,
//! and must never surface a failure back into the pipeline. A GUI whose log
//! panel is already torn down simply loses the line.

use tokio::sync::mpsc;

/// Observer invoked with each progress line
///
/// Implementations must be non-blocking and non-failing. The pipeline calls
/// `notify` from inside worker tasks, so implementations are shared across
/// tasks (`Send + Sync`).
pub trait Reporter: Send + Sync {
    /// Deliver one progress line
    fn notify(&self, message: &str);
}

/// Any shared closure over a message line is a reporter
impl<F> Reporter for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Discards every message
///
/// Useful when only the returned [`BatchReport`](crate::pipeline::BatchReport)
/// matters, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn notify(&self, _message: &str) {}
}

/// Logs each message at `info` level via `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Forwards messages into an unbounded channel for another task or thread
///
/// This is the safe post-back mechanism for embedders whose display runs on a
/// different thread of control than the pipeline (a GUI main loop, a TUI
/// renderer). Messages arrive in notification order.
#[derive(Clone, Debug)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelReporter {
    /// Create a reporter plus the receiving end for the consumer
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Reporter for ChannelReporter {
    fn notify(&self, message: &str) {
        // The receiver may already be gone; reporting is best-effort.
        self.tx.send(message.to_string()).ok();
    }
}
