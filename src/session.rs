use crate::error::ScrapeError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;

/// Fallback WebDriver endpoints tried when the configured one is down
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium/geckodriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Owns the single WebDriver session used for the whole run
pub struct Session {
    client: Client,
    wait_timeout: Duration,
}

impl Session {
    /// Connects to the WebDriver server, trying common fallback URLs
    /// before giving up.
    pub async fn connect(webdriver_url: &str, wait_secs: u64) -> Result<Self, ScrapeError> {
        let wait_timeout = Duration::from_secs(wait_secs);

        let first_err = match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self {
                    client,
                    wait_timeout,
                });
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                e
            }
        };

        for url in FALLBACK_WEBDRIVER_URLS {
            if *url == webdriver_url {
                continue; // Skip if it's the same as the one we already tried
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self {
                    client,
                    wait_timeout,
                });
            }
        }

        ::log::error!("Failed to connect to any WebDriver server");
        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Session(first_err))
    }

    /// Navigates to a URL and waits for the page body to be present
    pub async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        ::log::debug!("Navigating to {}", url);
        self.client.goto(url).await?;
        self.wait_for("body").await?;
        Ok(())
    }

    /// Waits for an element matching the CSS selector, bounded by the
    /// configured timeout
    pub async fn wait_for(&self, selector: &str) -> Result<(), ScrapeError> {
        self.client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(Locator::Css(selector))
            .await?;
        Ok(())
    }

    /// Current page HTML
    pub async fn source(&self) -> Result<String, ScrapeError> {
        Ok(self.client.source().await?)
    }

    /// Ends the WebDriver session
    pub async fn close(self) -> Result<(), ScrapeError> {
        Ok(self.client.close().await?)
    }
}
