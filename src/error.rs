use thiserror::Error;

/// Failures a scrape run can hit.
///
/// The run distinguishes two severities: a page whose expected elements
/// never show up is skipped and the run continues, while a page whose
/// layout is outright unrecognized (or a listing page with no links at
/// all) is a structural regression that aborts the whole run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Could not establish a WebDriver session at any candidate URL
    #[error("failed to start WebDriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed, including bounded waits timing out
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// An element the extraction policy relies on was not present
    #[error("missing page element: {0}")]
    MissingElement(String),

    /// The listing page yielded no detail links within the wait window
    #[error("no detail links found on listing page {0}")]
    NoLinks(String),

    /// A detail page had an item count outside the recognized layouts
    #[error("unrecognized detail page layout on {url}: {count} field items")]
    UnrecognizedLayout { url: String, count: usize },

    /// The listing URL could not be parsed
    #[error("invalid listing URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A link filter pattern failed to compile
    #[error("invalid link filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Output file could not be created or written
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("failed to serialize record: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    /// Whether this failure must abort the run.
    ///
    /// Missing elements and WebDriver failures (timeouts included) only
    /// cost the page they occurred on; everything else is structural.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ScrapeError::WebDriver(_) | ScrapeError::MissingElement(_)
        )
    }
}
