// Analyzer module: scoring and duplicate elimination for scraped offers.

pub mod dedup;
pub mod scoring;

pub use dedup::Deduplicator;
pub use scoring::score_offer;

use crate::config::ScoreConfig;
use crate::model::{OfferRecord, ScoredOffer};

/// Turns the raw scraped list into the final ranked list: score every
/// record, stable-sort descending by score, then deduplicate in one pass.
///
/// The stable sort keeps extraction order among equal scores, which makes
/// the survivor of a tied duplicate group deterministic.
pub fn rank(records: Vec<OfferRecord>, cfg: &ScoreConfig) -> Vec<ScoredOffer> {
    let mut scored: Vec<ScoredOffer> = records
        .into_iter()
        .map(|record| {
            let score = score_offer(&record, cfg);
            ScoredOffer { record, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    Deduplicator::new().dedupe(scored)
}
