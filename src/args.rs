use cablemap_scrape::config::{
    self, DEFAULT_LISTING_URL, DEFAULT_OUTPUT_PATH, DEFAULT_WEBDRIVER_URL, ScrapeConfig,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cablemap-scrape")]
#[command(about = "Scrapes the submarine cable directory into a CSV table")]
#[command(version)]
pub struct Args {
    /// Listing page to collect detail links from
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub out: String,

    /// Maximum number of detail links to visit
    #[arg(long, default_value_t = config::DEFAULT_MAX_LINKS)]
    pub max_links: usize,

    /// Seconds to wait for an expected element before giving up on a page
    #[arg(long, default_value_t = config::DEFAULT_WAIT_SECS)]
    pub wait_secs: u64,

    /// WebDriver server URL
    #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    /// Write already-aggregated rows before exiting on a structural failure
    #[arg(long, default_value_t = false)]
    pub keep_partial: bool,

    /// Load the full configuration from a JSON file instead of flags
    #[arg(long)]
    pub config: Option<String>,
}

/// Build the run configuration from the parsed arguments.
///
/// A `--config` file takes precedence over the individual flags.
pub fn build_config(args: &Args) -> Result<ScrapeConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        return ScrapeConfig::from_file(path);
    }

    Ok(ScrapeConfig {
        listing_url: args.listing_url.clone(),
        max_links: args.max_links,
        wait_secs: args.wait_secs,
        webdriver_url: args.webdriver_url.clone(),
        output_path: args.out.clone(),
        keep_partial: args.keep_partial,
        ..ScrapeConfig::default()
    })
}
