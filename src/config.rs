//! Configuration types for bulk-dl

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Download behavior configuration (concurrency)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Maximum concurrently in-flight download tasks (default: 4)
    ///
    /// Caps how many tasks may be inside their network-and-disk critical
    /// section at once. Submission beyond the cap waits for a permit; it is
    /// never rejected.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_downloads: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_downloads: default_max_concurrent(),
        }
    }
}

/// HTTP client configuration
///
/// Used as a nested sub-config within [`Config`]. One connection-reusing
/// client is built from these settings per pipeline instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout (default: 30 seconds)
    ///
    /// Bounds each individual network call, not total batch time. Redirects
    /// are always followed.
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header to send (default: none, use the transport default)
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: None,
        }
    }
}

/// Tracker list aggregation configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Tracker list sources fetched on each aggregation run
    ///
    /// Defaults to a small set of public, regularly maintained lists.
    #[serde(default = "default_tracker_sources")]
    pub sources: Vec<String>,

    /// Output file name created in the target directory (default: "tracker.txt")
    #[serde(default = "default_tracker_output_name")]
    pub output_name: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sources: default_tracker_sources(),
            output_name: default_tracker_output_name(),
        }
    }
}

/// Main configuration for the fetch-and-persist pipeline
///
/// Fields are organized into logical sub-configs:
/// - [`download`](DownloadConfig) — concurrency budget
/// - [`http`](HttpConfig) — request timeout, User-Agent
/// - [`tracker`](TrackerConfig) — aggregation sources and output name
///
/// This is plain data: the library does not read config files. Embedders
/// deserialize it from whatever source they own, or start from
/// `Config::default()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Download behavior settings (concurrency)
    #[serde(default)]
    pub download: DownloadConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Tracker list aggregation settings
    #[serde(default)]
    pub tracker: TrackerConfig,
}

// Default value functions
fn default_max_concurrent() -> usize {
    4
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_tracker_sources() -> Vec<String> {
    vec![
        // https://github.com/ngosang/trackerslist
        "https://raw.githubusercontent.com/ngosang/trackerslist/master/trackers_best_ip.txt".into(),
        // https://trackerslist.com/#/zh
        "https://raw.githubusercontent.com/XIU2/TrackersListCollection/refs/heads/master/best.txt"
            .into(),
        // https://github.com/DeSireFire/animeTrackerList
        "https://raw.githubusercontent.com/DeSireFire/animeTrackerList/master/AT_best.txt".into(),
    ]
}

fn default_tracker_output_name() -> String {
    "tracker.txt".into()
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
