use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Listing page the run starts from
pub const DEFAULT_LISTING_URL: &str = "https://www.submarinecablemap.com/";

/// Substring a detail-page href must contain
pub const DEFAULT_LINK_MARKER: &str = "/submarine-cable/";

/// Substring marking a non-data link on the listing page
pub const DEFAULT_EXCLUDE_MARKER: &str = "trivia";

/// Maximum number of detail links to visit
pub const DEFAULT_MAX_LINKS: usize = 645;

/// Seconds to wait for an expected element before giving up on a page
pub const DEFAULT_WAIT_SECS: u64 = 10;

/// Default WebDriver endpoint
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Default output CSV path
pub const DEFAULT_OUTPUT_PATH: &str = "submarine_cables.csv";

/// Configuration for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Listing page to collect detail links from
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Substring a detail-page href must contain
    #[serde(default = "default_link_marker")]
    pub link_marker: String,

    /// Substring marking a non-data link to drop
    #[serde(default = "default_exclude_marker")]
    pub exclude_marker: String,

    /// Extra regex patterns for hrefs to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum number of detail links to visit
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Seconds to wait for an expected element on each page
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Path the aggregated CSV is written to
    #[serde(default = "default_output_path")]
    pub output_path: String,

    /// Flush already-aggregated rows to the sink before exiting on a
    /// structural failure, instead of discarding them
    #[serde(default)]
    pub keep_partial: bool,
}

impl ScrapeConfig {
    /// Create a configuration with default values for the given listing URL
    pub fn new(listing_url: &str) -> Self {
        Self {
            listing_url: listing_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            link_marker: default_link_marker(),
            exclude_marker: default_exclude_marker(),
            exclude_patterns: Vec::new(),
            max_links: default_max_links(),
            wait_secs: default_wait_secs(),
            webdriver_url: default_webdriver_url(),
            output_path: default_output_path(),
            keep_partial: false,
        }
    }
}

fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

fn default_link_marker() -> String {
    DEFAULT_LINK_MARKER.to_string()
}

fn default_exclude_marker() -> String {
    DEFAULT_EXCLUDE_MARKER.to_string()
}

fn default_max_links() -> usize {
    DEFAULT_MAX_LINKS
}

fn default_wait_secs() -> u64 {
    DEFAULT_WAIT_SECS
}

fn default_webdriver_url() -> String {
    DEFAULT_WEBDRIVER_URL.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}
