//! Error types for bulk-dl
//!
//! This module provides error handling for the library, including:
//! - Run-level errors that abort a batch before or during scheduling
//!   (validation, precondition, scheduler faults)
//! - Task-level transport and filesystem errors, which callers fold into
//!   per-item failure outcomes instead of propagating
//!
//! Per-task errors never cross the task boundary: the pipeline converts them
//! into `TaskOutcome::Failure` reasons via their `Display` output. Only the
//! run-level variants reach the embedding caller as an `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bulk-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Placeholder reported when a validated input was empty after trimming
pub const EMPTY_INPUT_PLACEHOLDER: &str = "<empty>";

/// Main error type for bulk-dl
///
/// Each variant carries enough context to produce a human-readable message;
/// `Display` output doubles as the failure reason shown to users.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected by the URL validator before any work was scheduled
    #[error("Invalid URL: {input}")]
    InvalidUrl {
        /// The offending input, or `<empty>` when the trimmed input was blank
        input: String,
    },

    /// Target directory failed a precondition check (missing, not a
    /// directory, or unwritable) — fatal before any network call
    #[error("{message}: {path}")]
    Precondition {
        /// What was wrong with the directory
        message: String,
        /// The path that failed the check
        path: PathBuf,
    },

    /// Transport failure: timeout, connection error, or non-2xx status
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error while resolving or writing a destination file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A worker task was lost before yielding its outcome (panic or runtime
    /// teardown) — surfaced run-level because a lost task would break the
    /// one-outcome-per-item accounting
    #[error("scheduler error: {0}")]
    Scheduler(String),
}

impl Error {
    /// Build the validation error for a rejected input URL.
    ///
    /// Empty (post-trim) input is reported with a `<empty>` placeholder so
    /// the message never ends in a bare colon.
    pub fn invalid_url(input: &str) -> Self {
        let trimmed = input.trim();
        let input = if trimmed.is_empty() {
            EMPTY_INPUT_PLACEHOLDER.to_string()
        } else {
            trimmed.to_string()
        };
        Error::InvalidUrl { input }
    }

    /// Build a precondition error for a rejected target directory.
    pub fn precondition(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::Precondition {
            message: message.into(),
            path: path.into(),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Display output is user-facing contract: these strings appear verbatim
    // in reporter messages and failure reasons.
    // -----------------------------------------------------------------------

    #[test]
    fn invalid_url_displays_offending_input() {
        let err = Error::invalid_url("ftp://mirror.example.com/file");
        assert_eq!(err.to_string(), "Invalid URL: ftp://mirror.example.com/file");
    }

    #[test]
    fn invalid_url_substitutes_placeholder_for_empty_input() {
        let err = Error::invalid_url("");
        assert_eq!(err.to_string(), "Invalid URL: <empty>");
    }

    #[test]
    fn invalid_url_substitutes_placeholder_for_whitespace_only_input() {
        let err = Error::invalid_url("   \t ");
        assert_eq!(
            err.to_string(),
            "Invalid URL: <empty>",
            "whitespace-only input must be reported as <empty>, not as blank spaces"
        );
    }

    #[test]
    fn invalid_url_trims_surrounding_whitespace_in_message() {
        let err = Error::invalid_url("  not a url  ");
        assert_eq!(err.to_string(), "Invalid URL: not a url");
    }

    #[test]
    fn precondition_displays_message_then_path() {
        let err = Error::precondition("directory does not exist", "/data/missing");
        assert_eq!(err.to_string(), "directory does not exist: /data/missing");
    }

    #[test]
    fn io_error_converts_and_preserves_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();

        assert!(matches!(err, Error::Io(_)), "From<io::Error> must map to Error::Io");
        assert!(
            err.to_string().contains("denied"),
            "I/O cause must survive conversion, got: {err}"
        );
    }

    #[test]
    fn scheduler_error_displays_detail() {
        let err = Error::Scheduler("task 3 panicked".into());
        assert_eq!(err.to_string(), "scheduler error: task 3 panicked");
    }
}
