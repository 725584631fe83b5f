use cablemap_scrape::{Scrape, sink};
use clap::Parser;

mod args;
use args::{build_config, Args};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default {}",
        config.webdriver_url
    );

    ::log::info!("Starting scrape of {}", config.listing_url);
    let start_time = std::time::Instant::now();

    let output_path = config.output_path.clone();
    let scrape = Scrape::new(config);

    let records = match scrape.run().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sink::write_csv(&records, &output_path) {
        ::log::error!("Failed to write {}: {}", output_path, e);
        std::process::exit(1);
    }

    let duration = start_time.elapsed();
    ::log::info!(
        "Wrote {} records to {} in {:.2} seconds",
        records.len(),
        output_path,
        duration.as_secs_f64()
    );
    println!("Scraping process completed!");
}
