// Core structs: OfferRecord, ScoredOffer
use chrono::{DateTime, Utc};
use thiserror::Error;

/// One raw product listing as extracted from the deals page.
///
/// Every field except `image_id` may be absent; scoring degrades missing
/// fields to a zero contribution instead of failing.
#[derive(Debug, Clone)]
pub struct OfferRecord {
    pub name: Option<String>,
    /// Locale-formatted integer with grouping dots, e.g. "1.234.567".
    pub price_before: Option<String>,
    pub price_current: Option<String>,
    /// Free text possibly containing a percentage, e.g. "53% OFF".
    pub discount_label: Option<String>,
    pub purchase_link: Option<String>,
    pub image_url: Option<String>,
    /// Random large integer drawn at extraction time. Dedup handle only.
    pub image_id: u64,
    pub fetched_at: DateTime<Utc>,
}

/// An offer record with its relevance score attached.
///
/// The score is computed once and never recomputed downstream.
#[derive(Debug, Clone)]
pub struct ScoredOffer {
    pub record: OfferRecord,
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    InvalidResponse(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
