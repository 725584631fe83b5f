// Re-export modules
pub mod config;
pub mod error;
pub mod extract;
pub mod links;
pub mod records;
pub mod session;
pub mod sink;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use records::CableRecord;

use links::LinkFilter;
use session::Session;
use url::Url;

/// Builder for one sequential scrape of the cable directory.
///
/// The run opens a single WebDriver session, collects the detail links
/// from the listing page, visits them one at a time and returns the
/// extracted records in visit order.
pub struct Scrape {
    config: ScrapeConfig,
}

impl Scrape {
    /// Create a scrape run with the given configuration
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Load the configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ScrapeConfig::from_file(path)?;
        Ok(Self { config })
    }

    /// The effective configuration for this run
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Runs the full pass and returns the aggregated records.
    ///
    /// Pages whose expected elements never appear are skipped; an
    /// unrecognized page layout or an empty listing page aborts the run
    /// with an error.
    pub async fn run(&self) -> Result<Vec<CableRecord>, ScrapeError> {
        // Override the WebDriver URL with an environment variable if provided
        let mut webdriver_url = self.config.webdriver_url.clone();
        if let Ok(url) = std::env::var("WEBDRIVER_URL") {
            if !url.is_empty() {
                webdriver_url = url;
            }
        }

        let base = Url::parse(&self.config.listing_url)?;
        let filter = LinkFilter::new(
            &self.config.link_marker,
            &self.config.exclude_marker,
            &self.config.exclude_patterns,
        )?;

        let session = Session::connect(&webdriver_url, self.config.wait_secs).await?;

        let result = self.run_with_session(&session, &base, &filter).await;

        if let Err(e) = session.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        result
    }

    async fn run_with_session(
        &self,
        session: &Session,
        base: &Url,
        filter: &LinkFilter,
    ) -> Result<Vec<CableRecord>, ScrapeError> {
        ::log::info!("Navigating to {}", self.config.listing_url);
        session.goto(&self.config.listing_url).await?;

        ::log::info!("Extracting links...");
        session.wait_for(&filter.wait_selector()).await?;
        let listing_html = session.source().await?;
        let links = links::collect_links(&listing_html, base, filter, self.config.max_links)?;

        ::log::info!("Scraping data from links...");
        let mut table = Vec::new();
        for link in &links {
            ::log::info!("Visiting link: {}", link);
            match self.visit(session, link).await {
                Ok(record) => {
                    log_record(&record);
                    table.push(record);
                }
                Err(e) if e.is_fatal() => {
                    ::log::error!(
                        "Aborting run: {} ({} aggregated rows unsaved)",
                        e,
                        table.len()
                    );
                    if self.config.keep_partial && !table.is_empty() {
                        sink::write_csv(&table, &self.config.output_path)?;
                        ::log::warn!(
                            "Flushed {} partial rows to {}",
                            table.len(),
                            self.config.output_path
                        );
                    }
                    return Err(e);
                }
                Err(e) => {
                    ::log::warn!("Failed to scrape data from {}: {}", link, e);
                }
            }
        }

        Ok(table)
    }

    /// Visits one detail page and extracts its record
    async fn visit(&self, session: &Session, url: &str) -> Result<CableRecord, ScrapeError> {
        session.goto(url).await?;
        session.wait_for("div ul").await?;
        let html = session.source().await?;
        extract::extract_record(&html, url)
    }
}

/// Logs the extracted fields of a record
fn log_record(record: &CableRecord) {
    ::log::debug!("RFS: {}", record.rfs);
    ::log::debug!("Cable Length: {}", record.cable_length);
    ::log::debug!("Owners: {}", record.owners);
    ::log::debug!("Suppliers: {}", record.suppliers);
    ::log::debug!("Submarine Networks URL: {}", record.submarine_networks_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Pipeline test without a browser: collect links from a synthetic
    // listing page, extract each detail page from canned HTML, and
    // serialize the table.

    const BASE: &str = "https://www.submarinecablemap.com/";

    fn detail_page(items: &[&str]) -> String {
        let items_html = items
            .iter()
            .map(|body| format!("<li class=\"mb-2\">{}</li>", body))
            .collect::<String>();
        format!(
            "<html><body><div><ul>{}</ul></div></body></html>",
            items_html
        )
    }

    fn synthetic_site() -> (String, HashMap<String, String>) {
        let listing = "<html><body>\
                       <a href=\"/submarine-cable/five\">five</a>\
                       <a href=\"/submarine-cable/four\">four</a>\
                       <a href=\"/submarine-cable/trivia-corner\">trivia</a>\
                       <a href=\"/submarine-cable/three\">three</a>\
                       </body></html>"
            .to_string();

        let mut pages = HashMap::new();
        pages.insert(
            format!("{}submarine-cable/five", BASE),
            detail_page(&[
                "<strong>RFS</strong><br>2024",
                "<strong>Length</strong><br>\"1234\"",
                "<strong>Owners</strong><br>A, B",
                "<strong>Suppliers</strong><br>S1, S2",
                "<strong>More</strong><br><a href=\"https://www.submarinenetworks.com/five\">link</a>",
            ]),
        );
        pages.insert(
            format!("{}submarine-cable/four", BASE),
            detail_page(&[
                "<strong>RFS</strong><br>2020",
                "<strong>Length</strong><br>800 km",
                "<strong>Owners</strong><br>C",
                "<strong>Suppliers</strong><br>S3",
            ]),
        );
        pages.insert(
            format!("{}submarine-cable/three", BASE),
            detail_page(&[
                "<strong>RFS</strong><br>2018",
                "<strong>Length</strong><br>50 km",
                "<strong>Owners</strong><br>D",
            ]),
        );
        (listing, pages)
    }

    #[test]
    fn test_end_to_end_over_synthetic_pages() {
        let (listing, pages) = synthetic_site();
        let base = Url::parse(BASE).unwrap();
        let filter = LinkFilter::new("/submarine-cable/", "trivia", &[]).unwrap();

        let links = links::collect_links(&listing, &base, &filter, 645).unwrap();
        assert_eq!(links.len(), 3, "trivia link must be excluded");

        let mut table = Vec::new();
        for link in &links {
            let html = &pages[link];
            table.push(extract::extract_record(html, link).unwrap());
        }

        assert_eq!(table.len(), 3);

        // Encounter order preserved
        assert_eq!(table[0].cable_name, "five");
        assert_eq!(table[1].cable_name, "four");
        assert_eq!(table[2].cable_name, "three");

        // Per-count rules
        assert_eq!(table[0].cable_length, "1234");
        assert_eq!(
            table[0].submarine_networks_url,
            "https://www.submarinenetworks.com/five"
        );
        assert_eq!(table[0].owners, "A - B");
        assert_eq!(table[1].suppliers, "S3");
        assert_eq!(table[1].submarine_networks_url, "Not Given");
        assert_eq!(table[2].suppliers, "Not Given");
        assert_eq!(table[2].submarine_networks_url, "Not Given");

        let mut buf = Vec::new();
        sink::write_csv_to(&table, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.lines().count(), 4); // header + 3 rows
    }

    #[test]
    fn test_unrecognized_detail_page_aborts_before_sink() {
        let (listing, mut pages) = synthetic_site();
        let key = format!("{}submarine-cable/four", BASE);
        pages.insert(
            key,
            detail_page(&["<strong>RFS</strong><br>2020", "<strong>Length</strong><br>800 km"]),
        );

        let base = Url::parse(BASE).unwrap();
        let filter = LinkFilter::new("/submarine-cable/", "trivia", &[]).unwrap();
        let links = links::collect_links(&listing, &base, &filter, 645).unwrap();

        let mut table = Vec::new();
        let mut fatal = None;
        for link in &links {
            match extract::extract_record(&pages[link], link) {
                Ok(record) => table.push(record),
                Err(e) if e.is_fatal() => {
                    fatal = Some(e);
                    break;
                }
                Err(_) => {}
            }
        }

        // The second page has two items: the run stops there with one
        // row aggregated and nothing written.
        assert!(matches!(
            fatal,
            Some(ScrapeError::UnrecognizedLayout { count: 2, .. })
        ));
        assert_eq!(table.len(), 1);
    }
}
