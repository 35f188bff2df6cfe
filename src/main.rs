use futures::future::join_all;
use meli_sniper::config::{AppConfig, load_config};
use meli_sniper::parser::{MeliParser, Parser};
use meli_sniper::scrape::{Fetcher, FetcherImpl, download_image};
use meli_sniper::{analyzer, exporter};
use std::path::Path;
use tracing::{error, info, warn};

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = if Path::new(CONFIG_PATH).exists() {
        match load_config(CONFIG_PATH) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return;
            }
        }
    } else {
        info!("No {} found, using defaults", CONFIG_PATH);
        AppConfig::default()
    };

    let fetcher = FetcherImpl::new();

    info!("Fetching deals page: {}", config.input_url);
    let html = match fetcher.fetch(&config.input_url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Fetch failed: {}", e);
            return;
        }
    };

    info!("Parsing offer cards...");
    let records = match MeliParser::new().parse(&html) {
        Ok(records) => records,
        Err(e) => {
            error!("Parse error: {}", e);
            return;
        }
    };
    let scraped = records.len();
    info!("Extracted {} raw offers", scraped);

    if config.download_images {
        let images_dir = Path::new(&config.images_dir);
        if let Err(e) = std::fs::create_dir_all(images_dir) {
            warn!("Failed to create image folder {}: {}", images_dir.display(), e);
        } else {
            info!("Downloading images to {}...", images_dir.display());
            let downloads = records
                .iter()
                .map(|record| download_image(&fetcher.client, images_dir, record));
            join_all(downloads).await;
        }
    }

    let ranked = analyzer::rank(records, &config.score);
    info!("✅ Scraped: {} | After dedupe: {}", scraped, ranked.len());

    if let Err(e) = exporter::write_spreadsheet(&ranked, &config.output_file) {
        error!("Export failed: {}", e);
        return;
    }
    info!("📄 Spreadsheet saved to {}", config.output_file);

    info!("Top 10 by relevance:");
    for (i, offer) in ranked.iter().take(10).enumerate() {
        let name = offer.record.name.as_deref().unwrap_or("");
        let name: String = name.chars().take(90).collect();
        info!(
            "{:02}. {} | {} | ${} | score={:.6}",
            i + 1,
            name,
            offer.record.discount_label.as_deref().unwrap_or("-"),
            offer.record.price_current.as_deref().unwrap_or("-"),
            offer.score
        );
    }
}
