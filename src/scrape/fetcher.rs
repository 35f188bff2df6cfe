use crate::model::{OfferRecord, ScraperError};
use crate::scrape::traits::Fetcher;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub struct FetcherImpl {
    pub client: Client,
}

impl FetcherImpl {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("❗ Failed to create HTTP client");

        Self { client }
    }
}

impl Default for FetcherImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Fetcher for FetcherImpl {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ScraperError::InvalidResponse(response.status()));
        }

        Ok(response.text().await?)
    }
}

/// Best-effort download of an offer's image into `images_dir` as
/// `<image_id>.webp`. Failures are logged and swallowed; the image is a
/// side effect and never influences scoring or dedup.
pub async fn download_image(client: &Client, images_dir: &Path, record: &OfferRecord) {
    let Some(url) = record.image_url.as_deref() else {
        return;
    };

    let response = match client.get(url).send().await {
        Ok(resp) if resp.status().is_success() => resp,
        Ok(resp) => {
            warn!("Image fetch failed [{}]: {}", resp.status(), url);
            return;
        }
        Err(e) => {
            warn!("Image fetch error: {}: {}", url, e);
            return;
        }
    };

    let bytes = match response.bytes().await {
        Ok(b) => b,
        Err(e) => {
            warn!("Image body error: {}: {}", url, e);
            return;
        }
    };

    let path = images_dir.join(format!("{}.webp", record.image_id));
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        warn!("Image write failed: {}: {}", path.display(), e);
    } else {
        debug!("Saved image {}", path.display());
    }
}
